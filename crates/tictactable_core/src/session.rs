//! The game session state machine.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fmt;
use tracing::{debug, info, instrument, warn};

use crate::error::{MoveRejection, RegisterError, RematchRejection};
use crate::player::{PartyId, Player};
use crate::rules;
use crate::snapshot::FullState;
use crate::status::GameResult;
use crate::types::{BOARD_CELLS, Board, Cell, Symbol};

/// Seats at the table.
pub const MAX_PLAYERS: usize = 2;

/// Single authoritative game table: board, players, mover and result.
///
/// Every operation takes the originating party explicitly. Operations run
/// to completion synchronously; callers serialize access (one owner, one
/// event at a time).
pub struct GameSession {
    board: Board,
    players: Vec<Player>,
    current_mover: Option<Symbol>,
    result: GameResult,
    rng: StdRng,
}

impl fmt::Debug for GameSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameSession")
            .field("board", &self.board)
            .field("players", &self.players)
            .field("current_mover", &self.current_mover)
            .field("result", &self.result)
            .finish_non_exhaustive()
    }
}

impl GameSession {
    /// Creates an empty session in `Waiting`, seeded from the OS.
    #[instrument]
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    /// Creates an empty session with a fixed seed for the rematch coin flip.
    #[instrument]
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        info!("Creating game session");
        Self {
            board: Board::new(),
            players: Vec::with_capacity(MAX_PLAYERS),
            current_mover: None,
            result: GameResult::Waiting,
            rng,
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns seated players in join order.
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Returns the game result.
    pub fn result(&self) -> &GameResult {
        &self.result
    }

    /// Returns the player expected to move, if a game is in progress.
    pub fn current_mover(&self) -> Option<&Player> {
        self.current_mover.and_then(|symbol| self.player_with(symbol))
    }

    /// Looks up a seated player by party.
    pub fn player(&self, party: &PartyId) -> Option<&Player> {
        self.players.iter().find(|p| p.id() == party)
    }

    fn player_with(&self, symbol: Symbol) -> Option<&Player> {
        self.players.iter().find(|p| *p.symbol() == symbol)
    }

    /// Seats `party` and returns the symbol it was given.
    ///
    /// The first seat takes `X`; the second takes whichever symbol the first
    /// seat does not hold. Filling the second seat starts the game with the
    /// newcomer to move.
    ///
    /// # Errors
    ///
    /// [`RegisterError::AlreadyRegistered`] if the party holds a seat,
    /// [`RegisterError::GameFull`] if both seats are taken. Neither mutates
    /// the session.
    #[instrument(skip(self, display_name), fields(party_id = %party, seated = self.players.len()))]
    pub fn register(
        &mut self,
        party: PartyId,
        display_name: String,
    ) -> Result<Symbol, RegisterError> {
        if self.player(&party).is_some() {
            warn!("Party tried to register twice");
            return Err(RegisterError::AlreadyRegistered);
        }
        if self.players.len() >= MAX_PLAYERS {
            warn!("Table already has 2 players");
            return Err(RegisterError::GameFull);
        }

        let symbol = self
            .players
            .first()
            .map_or(Symbol::X, |first| first.symbol().other());

        info!(%symbol, display_name = %display_name, "Seating player");
        self.players.push(Player::new(party, display_name, symbol));

        if self.players.len() == MAX_PLAYERS {
            self.result = GameResult::InProgress;
            self.current_mover = Some(symbol);
            info!(mover = %symbol, "Both seats filled, game started");
        }

        Ok(symbol)
    }

    /// Plays `cell_index` for `party`.
    ///
    /// Accepted only while in progress, from the current mover, on an empty
    /// cell in 0..=8. After a placement the turn passes and the board is
    /// checked for a win or draw.
    ///
    /// # Errors
    ///
    /// A [`MoveRejection`] naming the first failed check. The session is
    /// untouched on error.
    #[instrument(skip(self), fields(party_id = %party))]
    pub fn apply_move(&mut self, party: &PartyId, cell_index: i64) -> Result<(), MoveRejection> {
        if self.result != GameResult::InProgress {
            debug!(result = ?self.result, "Move outside of a running game");
            return Err(MoveRejection::NotInProgress);
        }

        let mover = self
            .current_mover()
            .filter(|mover| mover.id() == party)
            .map(|mover| *mover.symbol())
            .ok_or(MoveRejection::NotYourTurn)?;

        let index = usize::try_from(cell_index)
            .ok()
            .filter(|&i| i < BOARD_CELLS)
            .ok_or(MoveRejection::OutOfRange)?;

        if !self.board.is_empty(index) {
            return Err(MoveRejection::CellOccupied);
        }

        self.board.place(index, mover);
        self.current_mover = Some(mover.other());
        debug!(%mover, index, board = %self.board, "Move applied");

        self.detect_terminal();
        Ok(())
    }

    /// Recomputes the result from scratch after a move.
    fn detect_terminal(&mut self) {
        if let Some(winner) = rules::find_winner(&self.board, &self.players) {
            info!(party_id = %winner.id(), symbol = %winner.symbol(), "Game won");
            self.result = GameResult::Win {
                winner: winner.clone(),
            };
            self.current_mover = None;
        } else if rules::is_full(&self.board) {
            info!("Game drawn");
            self.result = GameResult::Draw;
            self.current_mover = None;
        }
    }

    /// Removes `party` from its seat and resets the table.
    ///
    /// Returns the removed player, or `None` (and changes nothing) when the
    /// party held no seat.
    #[instrument(skip(self), fields(party_id = %party))]
    pub fn disconnect(&mut self, party: &PartyId) -> Option<Player> {
        let position = self.players.iter().position(|p| p.id() == party)?;
        let removed = self.players.remove(position);
        info!(display_name = %removed.display_name(), remaining = self.players.len(), "Player left");
        self.reset();
        Some(removed)
    }

    /// Starts a new round for the two seated players.
    ///
    /// # Errors
    ///
    /// [`RematchRejection::NotAPlayer`] for parties without a seat,
    /// [`RematchRejection::NotFinished`] unless the game was won or drawn.
    #[instrument(skip(self), fields(party_id = %party))]
    pub fn rematch(&mut self, party: &PartyId) -> Result<(), RematchRejection> {
        if self.player(party).is_none() {
            debug!("Rematch from a party without a seat");
            return Err(RematchRejection::NotAPlayer);
        }
        if !self.result.is_terminal() {
            debug!(result = ?self.result, "Rematch before the game ended");
            return Err(RematchRejection::NotFinished);
        }
        self.reset();
        Ok(())
    }

    /// Clears the board and picks who moves.
    ///
    /// With two players seated the game restarts immediately and the first
    /// mover is a coin flip; otherwise the table waits.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        self.board.clear();
        if self.players.len() > 1 {
            let pick = self.rng.random_range(0..self.players.len());
            let symbol = *self.players[pick].symbol();
            self.result = GameResult::InProgress;
            self.current_mover = Some(symbol);
            info!(mover = %symbol, "Table reset, new round started");
        } else {
            self.result = GameResult::Waiting;
            self.current_mover = None;
            info!("Table reset, waiting for players");
        }
    }

    /// Builds the full-state view broadcast to clients.
    pub fn snapshot(&self) -> FullState {
        let board = self
            .board
            .cells()
            .iter()
            .map(|cell| match cell {
                Cell::Empty => None,
                Cell::Occupied(symbol) => self.player_with(*symbol).cloned(),
            })
            .collect();

        FullState {
            board,
            current_mover: self.current_mover().cloned(),
            players: self.players.clone(),
            result: self.result.clone(),
        }
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}
