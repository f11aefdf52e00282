//! Rejections returned by session operations.

use derive_more::{Display, Error};

/// Why a registration was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum RegisterError {
    /// Both seats are taken.
    #[display("There are already 2 players in this game. Please try again later")]
    GameFull,
    /// The party already holds a seat.
    #[display("Party is already registered")]
    AlreadyRegistered,
}

/// Why a move was ignored.
///
/// Never surfaced to the sender; useful for logs and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum MoveRejection {
    /// No game is being played.
    #[display("Game is not in progress")]
    NotInProgress,
    /// The sender is not the current mover.
    #[display("Not this party's turn")]
    NotYourTurn,
    /// Cell index outside 0..=8.
    #[display("Cell index out of range (must be 0-8)")]
    OutOfRange,
    /// Cell already taken.
    #[display("Cell is already occupied")]
    CellOccupied,
}

/// Why a rematch request was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum RematchRejection {
    /// Only seated players may ask for a rematch.
    #[display("Only seated players may request a rematch")]
    NotAPlayer,
    /// The current game has not ended.
    #[display("Game has not finished")]
    NotFinished,
}
