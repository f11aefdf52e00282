//! The game table: single owner of the session.
//!
//! Connection tasks push [`TableCommand`]s into one queue; [`GameTable::run`]
//! drains it and resolves each command against the [`GameSession`] to
//! completion before taking the next. Nothing else touches the session, so
//! turn and seat checks need no locks.

use derive_more::{Display, Error};
use tictactable_core::{GameSession, PartyId, RegisterError};
use tokio::sync::mpsc;
use tracing::{debug, info, instrument};

use crate::hub::{Hub, Outbox};
use crate::protocol::{ClientEvent, GameFullNotice, ServerEvent};

/// Work item for the table, tagged with the originating party.
#[derive(Debug)]
pub enum TableCommand {
    /// A party connected.
    Connect {
        /// New party.
        party: PartyId,
        /// Where to deliver its events.
        outbox: Outbox,
    },
    /// A party sent an event.
    Event {
        /// Sender.
        party: PartyId,
        /// Decoded event.
        event: ClientEvent,
    },
    /// A party's connection ended.
    Disconnect {
        /// Departed party.
        party: PartyId,
        /// Transport-supplied reason.
        reason: String,
    },
}

/// The table task has stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
#[display("Game table is no longer running")]
pub struct TableClosed;

/// Cloneable sender side used by connection tasks.
#[derive(Debug, Clone)]
pub struct TableHandle {
    commands: mpsc::UnboundedSender<TableCommand>,
}

impl TableHandle {
    /// Announces a new party.
    pub fn connect(&self, party: PartyId, outbox: Outbox) -> Result<(), TableClosed> {
        self.send(TableCommand::Connect { party, outbox })
    }

    /// Forwards an event from `party`.
    pub fn dispatch(&self, party: PartyId, event: ClientEvent) -> Result<(), TableClosed> {
        self.send(TableCommand::Event { party, event })
    }

    /// Reports that `party` went away.
    pub fn disconnect(&self, party: PartyId, reason: impl Into<String>) -> Result<(), TableClosed> {
        self.send(TableCommand::Disconnect {
            party,
            reason: reason.into(),
        })
    }

    fn send(&self, command: TableCommand) -> Result<(), TableClosed> {
        self.commands.send(command).map_err(|_| TableClosed)
    }
}

/// Owns the session and the connected parties.
#[derive(Debug)]
pub struct GameTable {
    session: GameSession,
    hub: Hub,
    commands: mpsc::UnboundedReceiver<TableCommand>,
}

impl GameTable {
    /// Creates a table around `session` and the handle that feeds it.
    #[instrument(skip(session))]
    pub fn new(session: GameSession) -> (Self, TableHandle) {
        let (tx, rx) = mpsc::unbounded_channel();
        let table = Self {
            session,
            hub: Hub::new(),
            commands: rx,
        };
        (table, TableHandle { commands: tx })
    }

    /// Returns the session.
    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// Returns the connected parties.
    pub fn hub(&self) -> &Hub {
        &self.hub
    }

    /// Processes commands until every handle is dropped.
    #[instrument(skip(self))]
    pub async fn run(mut self) {
        info!("Game table running");
        while let Some(command) = self.commands.recv().await {
            self.handle(command);
        }
        info!("All handles dropped, game table stopped");
    }

    /// Resolves one command against the session and emits the results.
    pub fn handle(&mut self, command: TableCommand) {
        match command {
            TableCommand::Connect { party, outbox } => self.on_connect(party, outbox),
            TableCommand::Event { party, event } => self.on_event(party, event),
            TableCommand::Disconnect { party, reason } => self.on_disconnect(party, reason),
        }
    }

    #[instrument(skip(self, outbox), fields(party_id = %party))]
    fn on_connect(&mut self, party: PartyId, outbox: Outbox) {
        info!("Party connected");
        self.hub.join(party.clone(), outbox);
        self.hub
            .send_to(&party, ServerEvent::FullState(self.session.snapshot()));
    }

    #[instrument(skip(self, event), fields(party_id = %party))]
    fn on_event(&mut self, party: PartyId, event: ClientEvent) {
        match event {
            ClientEvent::RegisterPlayer(request) => {
                match self.session.register(party.clone(), request.display_name) {
                    Ok(symbol) => {
                        debug!(%symbol, "Registration accepted");
                        self.broadcast_state();
                    }
                    Err(RegisterError::GameFull) => {
                        self.hub.send_to(
                            &party,
                            ServerEvent::GameFull(GameFullNotice {
                                message: RegisterError::GameFull.to_string(),
                            }),
                        );
                    }
                    Err(RegisterError::AlreadyRegistered) => {
                        debug!("Duplicate registration dropped");
                    }
                }
            }
            ClientEvent::SubmitMove(request) => {
                if let Err(rejection) = self.session.apply_move(&party, request.cell_index) {
                    debug!(cell_index = request.cell_index, %rejection, "Move ignored");
                }
                self.broadcast_state();
            }
            ClientEvent::Rematch(_) => match self.session.rematch(&party) {
                Ok(()) => self.broadcast_state(),
                Err(rejection) => debug!(%rejection, "Rematch ignored"),
            },
            ClientEvent::Message(payload) => {
                debug!("Relaying chat message");
                self.hub.broadcast(ServerEvent::Broadcast(payload));
            }
        }
    }

    #[instrument(skip(self), fields(party_id = %party))]
    fn on_disconnect(&mut self, party: PartyId, reason: String) {
        info!("Party disconnected");
        self.hub.leave(&party);
        if self.session.disconnect(&party).is_some() {
            self.broadcast_state();
        } else {
            debug!("Departed party held no seat");
        }
    }

    #[instrument(skip(self))]
    fn broadcast_state(&self) {
        if self.hub.is_empty() {
            debug!("No connected parties to receive state");
        }
        self.hub
            .broadcast(ServerEvent::FullState(self.session.snapshot()));
    }
}
