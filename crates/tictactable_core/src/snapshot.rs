//! Owned, serializable copy of the session sent after every change.

use serde::{Deserialize, Serialize};

use crate::player::Player;
use crate::status::GameResult;

/// Full authoritative state, as clients see it.
///
/// Each board entry is the occupying player or `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FullState {
    /// Nine cells, row-major.
    pub board: Vec<Option<Player>>,
    /// Player expected to move next.
    pub current_mover: Option<Player>,
    /// Seated players in join order.
    pub players: Vec<Player>,
    /// Game result.
    pub result: GameResult,
}
