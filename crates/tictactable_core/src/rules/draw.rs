//! Draw detection.

use crate::types::Board;
use tracing::instrument;

/// Checks if the board is full (no empty cell remains).
#[instrument(skip(board))]
pub fn is_full(board: &Board) -> bool {
    board.is_full()
}
