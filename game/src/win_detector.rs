use crate::board::{BOARD_SIZE, Board, Mark};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    InProgress,
    XWon,
    OWon,
    Draw,
}

/// Recomputed from the board on every applied move; never stored.
pub fn evaluate(board: &Board) -> Outcome {
    for row in 0..BOARD_SIZE {
        if let Some(mark) = line_winner(board, (row, 0), (row, 1), (row, 2)) {
            return won(mark);
        }
    }

    for col in 0..BOARD_SIZE {
        if let Some(mark) = line_winner(board, (0, col), (1, col), (2, col)) {
            return won(mark);
        }
    }

    if let Some(mark) = line_winner(board, (0, 0), (1, 1), (2, 2)) {
        return won(mark);
    }
    if let Some(mark) = line_winner(board, (0, 2), (1, 1), (2, 0)) {
        return won(mark);
    }

    if board.is_full() {
        Outcome::Draw
    } else {
        Outcome::InProgress
    }
}

fn line_winner(board: &Board, a: (usize, usize), b: (usize, usize), c: (usize, usize)) -> Option<Mark> {
    let first = board.get(a.0, a.1)?;
    if first == Mark::Empty {
        return None;
    }
    if board.get(b.0, b.1)? == first && board.get(c.0, c.1)? == first {
        Some(first)
    } else {
        None
    }
}

fn won(mark: Mark) -> Outcome {
    match mark {
        Mark::X => Outcome::XWon,
        Mark::O => Outcome::OWon,
        Mark::Empty => unreachable!(),
    }
}
