//! Board and mark types for the 3x3 grid.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::instrument;

/// Number of cells on the board.
pub const BOARD_CELLS: usize = 9;

/// Mark a player places on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum Symbol {
    /// Assigned to the first player to join an empty table.
    X,
    /// Assigned to the second player.
    O,
}

impl Symbol {
    /// Returns the opposing symbol.
    pub fn other(self) -> Self {
        match self {
            Symbol::X => Symbol::O,
            Symbol::O => Symbol::X,
        }
    }
}

/// A single cell on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    /// Nobody has played here.
    Empty,
    /// Owned by the player holding this symbol.
    Occupied(Symbol),
}

/// 3x3 board, row-major (`row * 3 + col`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    cells: [Cell; BOARD_CELLS],
}

impl Board {
    /// Creates an empty board.
    pub fn new() -> Self {
        Self {
            cells: [Cell::Empty; BOARD_CELLS],
        }
    }

    /// Gets the cell at `index`, or `None` when out of range.
    pub fn get(&self, index: usize) -> Option<Cell> {
        self.cells.get(index).copied()
    }

    /// Checks if the cell at `index` exists and is empty.
    pub fn is_empty(&self, index: usize) -> bool {
        matches!(self.get(index), Some(Cell::Empty))
    }

    /// Returns all cells in index order.
    pub fn cells(&self) -> &[Cell; BOARD_CELLS] {
        &self.cells
    }

    /// Returns true when no empty cell remains.
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| *cell != Cell::Empty)
    }

    /// Marks `index` for `symbol`. Callers validate range and vacancy first.
    #[instrument(skip(self))]
    pub(crate) fn place(&mut self, index: usize, symbol: Symbol) {
        if let Some(cell) = self.cells.get_mut(index) {
            *cell = Cell::Occupied(symbol);
        }
    }

    /// Empties every cell.
    pub(crate) fn clear(&mut self) {
        self.cells = [Cell::Empty; BOARD_CELLS];
    }

    /// Builds a board from explicit cells.
    #[cfg(test)]
    pub(crate) fn from_cells(cells: [Cell; BOARD_CELLS]) -> Self {
        Self { cells }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..3 {
            for col in 0..3 {
                let index = row * 3 + col;
                match self.cells[index] {
                    Cell::Empty => write!(f, "{index}")?,
                    Cell::Occupied(symbol) => write!(f, "{symbol}")?,
                }
                if col < 2 {
                    f.write_str("|")?;
                }
            }
            if row < 2 {
                f.write_str("\n-+-+-\n")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new();
        assert!((0..BOARD_CELLS).all(|i| board.is_empty(i)));
        assert!(!board.is_full());
    }

    #[test]
    fn test_out_of_range_is_not_empty() {
        let board = Board::new();
        assert_eq!(board.get(9), None);
        assert!(!board.is_empty(9));
    }

    #[test]
    fn test_place_and_clear() {
        let mut board = Board::new();
        board.place(4, Symbol::O);
        assert_eq!(board.get(4), Some(Cell::Occupied(Symbol::O)));
        board.clear();
        assert!(board.is_empty(4));
    }

    #[test]
    fn test_display_layout() {
        let mut board = Board::new();
        board.place(0, Symbol::X);
        board.place(8, Symbol::O);
        assert_eq!(board.to_string(), "X|1|2\n-+-+-\n3|4|5\n-+-+-\n6|7|O");
    }

    #[test]
    fn test_symbol_other() {
        assert_eq!(Symbol::X.other(), Symbol::O);
        assert_eq!(Symbol::O.other(), Symbol::X);
    }
}
