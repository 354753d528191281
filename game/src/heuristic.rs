use crate::board::{Board, Mark};
use crate::session_rng::SessionRng;
use crate::win_detector::{Outcome, evaluate};

const CORNERS: [(usize, usize); 4] = [(0, 0), (0, 2), (2, 0), (2, 2)];

/// Picks a move for `mark` by priority: win now, block the opponent,
/// take the center, take a corner, then a random remaining cell.
/// Returns `None` only on a full board, which correct turn sequencing
/// never produces.
pub fn choose_move(board: &Board, mark: Mark, rng: &mut SessionRng) -> Option<(usize, usize)> {
    debug_assert!(mark != Mark::Empty);

    let empty_cells = board.empty_cells();
    if empty_cells.is_empty() {
        return None;
    }

    let opponent = mark.opponent()?;

    if let Some(cell) = winning_cell(board, &empty_cells, mark) {
        return Some(cell);
    }
    if let Some(cell) = winning_cell(board, &empty_cells, opponent) {
        return Some(cell);
    }

    if board.get(1, 1) == Some(Mark::Empty) {
        return Some((1, 1));
    }

    for &(row, col) in &CORNERS {
        if board.get(row, col) == Some(Mark::Empty) {
            return Some((row, col));
        }
    }

    let index = rng.random_range(0..empty_cells.len());
    Some(empty_cells[index])
}

// Hypothetical placements go on a scratch copy; the live board is never touched.
fn winning_cell(
    board: &Board,
    empty_cells: &[(usize, usize)],
    mark: Mark,
) -> Option<(usize, usize)> {
    let target = match mark {
        Mark::X => Outcome::XWon,
        Mark::O => Outcome::OWon,
        Mark::Empty => return None,
    };

    for &(row, col) in empty_cells {
        let mut scratch = board.clone();
        if scratch.place(row, col, mark).is_ok() && evaluate(&scratch) == target {
            return Some((row, col));
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rng() -> SessionRng {
        SessionRng::new(7)
    }

    #[test]
    fn test_takes_winning_cell_first() {
        let board = Board::from_rows([['X', 'X', ' '], ['O', 'O', ' '], [' ', ' ', ' ']]);
        assert_eq!(choose_move(&board, Mark::X, &mut rng()), Some((0, 2)));
    }

    #[test]
    fn test_own_win_takes_priority_over_block() {
        // O can win at (1, 2) even though X threatens (0, 2).
        let board = Board::from_rows([['X', 'X', ' '], ['O', 'O', ' '], [' ', ' ', ' ']]);
        assert_eq!(choose_move(&board, Mark::O, &mut rng()), Some((1, 2)));
    }

    #[test]
    fn test_blocks_opponent_win() {
        let board = Board::from_rows([['X', ' ', ' '], ['O', 'O', ' '], ['X', ' ', ' ']]);
        assert_eq!(choose_move(&board, Mark::X, &mut rng()), Some((1, 2)));
    }

    #[test]
    fn test_block_beats_center_and_corners() {
        // Center and all corners are free, but the block must come first.
        let board = Board::from_rows([[' ', ' ', ' '], ['O', 'O', ' '], ['X', ' ', ' ']]);
        assert_eq!(choose_move(&board, Mark::X, &mut rng()), Some((1, 2)));
    }

    #[test]
    fn test_takes_center_on_empty_board() {
        assert_eq!(choose_move(&Board::new(), Mark::X, &mut rng()), Some((1, 1)));
    }

    #[test]
    fn test_takes_first_free_corner_when_center_taken() {
        let board = Board::from_rows([[' ', ' ', ' '], [' ', 'X', ' '], [' ', ' ', ' ']]);
        assert_eq!(choose_move(&board, Mark::O, &mut rng()), Some((0, 0)));

        let board = Board::from_rows([['O', ' ', ' '], [' ', 'X', ' '], [' ', ' ', 'X']]);
        assert_eq!(choose_move(&board, Mark::O, &mut rng()), Some((0, 2)));
    }

    #[test]
    fn test_random_fallback_is_seeded_and_among_empty_cells() {
        // No win, no block, center and corners all taken.
        let board = Board::from_rows([['X', ' ', 'O'], ['O', 'O', 'X'], ['X', ' ', 'O']]);
        let empty = board.empty_cells();
        assert_eq!(empty, vec![(0, 1), (2, 1)]);

        let first = choose_move(&board, Mark::X, &mut SessionRng::new(11)).unwrap();
        let second = choose_move(&board, Mark::X, &mut SessionRng::new(11)).unwrap();
        assert!(empty.contains(&first));
        assert_eq!(first, second);
    }

    #[test]
    fn test_single_remaining_cell_is_taken() {
        let board = Board::from_rows([['X', 'X', 'O'], ['O', 'O', 'X'], ['X', ' ', 'O']]);
        assert_eq!(choose_move(&board, Mark::X, &mut rng()), Some((2, 1)));
    }

    #[test]
    fn test_full_board_returns_none() {
        let board = Board::from_rows([['X', 'O', 'X'], ['X', 'O', 'O'], ['O', 'X', 'X']]);
        assert_eq!(choose_move(&board, Mark::X, &mut rng()), None);
    }
}
