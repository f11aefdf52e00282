//! Game rules for tic-tac-toe.
//!
//! Pure functions over a [`Board`](crate::Board) and the seated players.
//! Rules are kept apart from the session so they can be checked in
//! isolation.

pub mod draw;
pub mod win;

pub use draw::is_full;
pub use win::{LINES, find_winner, owns_line};
