//! Tictactable server - one tic-tac-toe table over WebSockets.
//!
//! # Architecture
//!
//! - **Protocol**: named JSON events exchanged with clients
//! - **Hub**: registry of connected parties and their outbound queues
//! - **Table**: single task owning the [`GameSession`](tictactable_core::GameSession);
//!   every inbound event is resolved there, one at a time
//! - **Ws**: the WebSocket endpoint bridging sockets to the table
//! - **Server**: router, CORS policy and bootstrap

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod cli;
pub mod config;
pub mod error;
pub mod hub;
pub mod protocol;
pub mod server;
pub mod table;
pub mod ws;

pub use cli::{Cli, Command, ServeArgs};
pub use config::{ConfigError, ServerConfig};
pub use error::ServerError;
pub use hub::{Hub, OUTBOX_CAPACITY, Outbox, outbox};
pub use protocol::{ClientEvent, GameFullNotice, RegisterPlayer, RematchRequest, ServerEvent, SubmitMove};
pub use table::{GameTable, TableClosed, TableCommand, TableHandle};
