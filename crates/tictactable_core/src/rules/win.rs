//! Win detection.

use crate::player::Player;
use crate::types::{Board, Cell, Symbol};
use tracing::{debug, instrument};

/// The eight winning lines, in scan order: rows, columns, diagonals.
pub const LINES: [[usize; 3]; 8] = [
    // Rows
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    // Columns
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    // Diagonals
    [0, 4, 8],
    [2, 4, 6],
];

/// Checks whether `symbol` holds all three cells of `line`.
pub fn owns_line(board: &Board, symbol: Symbol, line: &[usize; 3]) -> bool {
    line.iter()
        .all(|&index| board.get(index) == Some(Cell::Occupied(symbol)))
}

/// Finds the winning player, if any.
///
/// Players are scanned in join order and, for each player, lines in
/// [`LINES`] order. The first player owning a complete line wins, so the
/// result is deterministic even on a board where two lines are complete.
#[instrument(skip(board, players), fields(players = players.len()))]
pub fn find_winner<'a>(board: &Board, players: &'a [Player]) -> Option<&'a Player> {
    for player in players {
        if let Some(line) = LINES
            .iter()
            .find(|line| owns_line(board, *player.symbol(), line))
        {
            debug!(party_id = %player.id(), ?line, "Winning line found");
            return Some(player);
        }
    }
    None
}
