//! Game result.

use serde::{Deserialize, Serialize};

use crate::player::Player;

/// Where the game stands.
///
/// Serialized with a `status` tag so clients can switch on one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum GameResult {
    /// Fewer than two players are seated.
    Waiting,
    /// Two players are seated and moves are accepted.
    #[serde(rename = "playing")]
    InProgress,
    /// The board filled with no completed line.
    Draw,
    /// A player completed a line.
    Win {
        /// The player who completed it.
        winner: Player,
    },
}

impl GameResult {
    /// True for `Win` and `Draw`.
    pub fn is_terminal(&self) -> bool {
        matches!(self, GameResult::Draw | GameResult::Win { .. })
    }
}
