use std::fmt;

pub const BOARD_SIZE: usize = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mark {
    Empty,
    X,
    O,
}

impl Mark {
    pub fn opponent(&self) -> Option<Mark> {
        match self {
            Mark::X => Some(Mark::O),
            Mark::O => Some(Mark::X),
            Mark::Empty => None,
        }
    }

    pub fn as_char(&self) -> char {
        match self {
            Mark::Empty => ' ',
            Mark::X => 'X',
            Mark::O => 'O',
        }
    }

    pub fn from_char(c: char) -> Option<Mark> {
        match c {
            'X' => Some(Mark::X),
            'O' => Some(Mark::O),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlaceError {
    OutOfRange,
    CellOccupied,
}

impl fmt::Display for PlaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlaceError::OutOfRange => write!(f, "position out of range"),
            PlaceError::CellOccupied => write!(f, "cell is already marked"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    cells: [[Mark; BOARD_SIZE]; BOARD_SIZE],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    pub fn new() -> Self {
        Self {
            cells: [[Mark::Empty; BOARD_SIZE]; BOARD_SIZE],
        }
    }

    #[cfg(test)]
    pub fn from_rows(rows: [[char; BOARD_SIZE]; BOARD_SIZE]) -> Self {
        let mut board = Self::new();
        for (row, row_chars) in rows.iter().enumerate() {
            for (col, &c) in row_chars.iter().enumerate() {
                if let Some(mark) = Mark::from_char(c) {
                    board.cells[row][col] = mark;
                }
            }
        }
        board
    }

    pub fn reset(&mut self) {
        self.cells = [[Mark::Empty; BOARD_SIZE]; BOARD_SIZE];
    }

    pub fn get(&self, row: usize, col: usize) -> Option<Mark> {
        if row >= BOARD_SIZE || col >= BOARD_SIZE {
            return None;
        }
        Some(self.cells[row][col])
    }

    /// The only mutator besides `reset`: a cell goes Empty -> X/O exactly once.
    pub fn place(&mut self, row: usize, col: usize, mark: Mark) -> Result<(), PlaceError> {
        debug_assert!(mark != Mark::Empty);

        if row >= BOARD_SIZE || col >= BOARD_SIZE {
            return Err(PlaceError::OutOfRange);
        }
        if self.cells[row][col] != Mark::Empty {
            return Err(PlaceError::CellOccupied);
        }
        self.cells[row][col] = mark;
        Ok(())
    }

    pub fn empty_cells(&self) -> Vec<(usize, usize)> {
        let mut cells = Vec::new();
        for (row, row_cells) in self.cells.iter().enumerate() {
            for (col, &cell) in row_cells.iter().enumerate() {
                if cell == Mark::Empty {
                    cells.push((row, col));
                }
            }
        }
        cells
    }

    pub fn is_full(&self) -> bool {
        self.cells
            .iter()
            .all(|row| row.iter().all(|&cell| cell != Mark::Empty))
    }

    pub fn render(&self) -> String {
        let mut text = String::new();
        for (row, row_cells) in self.cells.iter().enumerate() {
            text.push_str(&format!(
                " {} | {} | {} \n",
                row_cells[0].as_char(),
                row_cells[1].as_char(),
                row_cells[2].as_char()
            ));
            if row < BOARD_SIZE - 1 {
                text.push_str("---+---+---\n");
            }
        }
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_place_on_empty_cell_succeeds() {
        let mut board = Board::new();
        assert_eq!(board.place(0, 0, Mark::X), Ok(()));
        assert_eq!(board.get(0, 0), Some(Mark::X));
    }

    #[test]
    fn test_place_on_occupied_cell_is_rejected_without_change() {
        let mut board = Board::new();
        board.place(1, 1, Mark::X).unwrap();
        assert_eq!(board.place(1, 1, Mark::O), Err(PlaceError::CellOccupied));
        assert_eq!(board.get(1, 1), Some(Mark::X));
    }

    #[test]
    fn test_place_out_of_range_is_rejected() {
        let mut board = Board::new();
        assert_eq!(board.place(3, 0, Mark::X), Err(PlaceError::OutOfRange));
        assert_eq!(board.place(0, 3, Mark::X), Err(PlaceError::OutOfRange));
        assert_eq!(board, Board::new());
    }

    #[test]
    fn test_occupied_rejection_holds_across_alternating_moves() {
        let mut board = Board::new();
        let moves = [(0, 0), (1, 1), (0, 1), (2, 2)];
        let mut mark = Mark::X;
        for &(row, col) in &moves {
            board.place(row, col, mark).unwrap();
            mark = mark.opponent().unwrap();
        }
        for &(row, col) in &moves {
            assert_eq!(board.place(row, col, mark), Err(PlaceError::CellOccupied));
        }
    }

    #[test]
    fn test_reset_clears_all_cells() {
        let mut board = Board::new();
        board.place(0, 0, Mark::X).unwrap();
        board.place(2, 2, Mark::O).unwrap();
        board.reset();
        assert_eq!(board.empty_cells().len(), 9);
    }

    #[test]
    fn test_empty_cells_row_major_order() {
        let board = Board::from_rows([['X', ' ', 'O'], [' ', 'X', 'O'], ['X', 'O', ' ']]);
        assert_eq!(board.empty_cells(), vec![(0, 1), (1, 0), (2, 2)]);
    }

    #[test]
    fn test_render_grid_format() {
        let board = Board::from_rows([['X', ' ', 'O'], [' ', 'X', ' '], [' ', ' ', 'O']]);
        let expected = concat!(
            " X |   | O \n",
            "---+---+---\n",
            "   | X |   \n",
            "---+---+---\n",
            "   |   | O \n",
        );
        assert_eq!(board.render(), expected);
    }
}
