//! Tictactable core - the authoritative two-player tic-tac-toe session.
//!
//! This crate holds the game session state machine and nothing else: player
//! slot assignment, turn enforcement, move application, terminal-condition
//! detection, and reset/rematch semantics. It knows nothing about sockets;
//! a transport resolves each inbound event to a [`PartyId`] and calls the
//! matching [`GameSession`] operation.
//!
//! # Example
//!
//! ```
//! use tictactable_core::{GameResult, GameSession, PartyId, Symbol};
//!
//! let mut session = GameSession::new();
//! let ann = PartyId::from("ann");
//! let bo = PartyId::from("bo");
//!
//! assert_eq!(session.register(ann.clone(), "Ann".to_string()), Ok(Symbol::X));
//! assert_eq!(session.register(bo.clone(), "Bo".to_string()), Ok(Symbol::O));
//! assert_eq!(session.result(), &GameResult::InProgress);
//!
//! // The second player to join moves first.
//! assert!(session.apply_move(&bo, 4).is_ok());
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod player;
pub mod rules;
mod session;
mod snapshot;
mod status;
mod types;

pub use error::{MoveRejection, RegisterError, RematchRejection};
pub use player::{PartyId, Player};
pub use session::{GameSession, MAX_PLAYERS};
pub use snapshot::FullState;
pub use status::GameResult;
pub use types::{BOARD_CELLS, Board, Cell, Symbol};
