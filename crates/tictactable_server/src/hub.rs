//! Registry of connected parties.

use std::collections::HashMap;
use tictactable_core::PartyId;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tracing::{debug, instrument, warn};

use crate::protocol::ServerEvent;

/// Events queued per party before new ones are dropped.
pub const OUTBOX_CAPACITY: usize = 64;

/// Outbound queue of one party; drained by its socket writer.
pub type Outbox = mpsc::Sender<ServerEvent>;

/// Creates a party queue holding up to [`OUTBOX_CAPACITY`] events.
pub fn outbox() -> (Outbox, mpsc::Receiver<ServerEvent>) {
    mpsc::channel(OUTBOX_CAPACITY)
}

/// Queues without waiting; a stalled reader loses events instead of growing
/// the queue.
#[instrument(skip(outbox, event), fields(party_id = %party))]
fn deliver(party: &PartyId, outbox: &Outbox, event: ServerEvent) {
    match outbox.try_send(event) {
        Ok(()) => {}
        Err(TrySendError::Full(_)) => {
            warn!(capacity = OUTBOX_CAPACITY, "Party outbox full, dropping event");
        }
        Err(TrySendError::Closed(_)) => {
            warn!("Party writer is gone, dropping event");
        }
    }
}

/// Connected parties, whether seated or not.
#[derive(Debug, Default)]
pub struct Hub {
    parties: HashMap<PartyId, Outbox>,
}

impl Hub {
    /// Creates an empty hub.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a party. A reconnect under the same id replaces the old queue.
    #[instrument(skip(self, outbox), fields(party_id = %party))]
    pub fn join(&mut self, party: PartyId, outbox: Outbox) {
        if self.parties.insert(party, outbox).is_some() {
            warn!("Replaced existing outbox for party");
        }
        debug!(connected = self.parties.len(), "Party joined");
    }

    /// Removes a party. Returns whether it was connected.
    #[instrument(skip(self), fields(party_id = %party))]
    pub fn leave(&mut self, party: &PartyId) -> bool {
        let removed = self.parties.remove(party).is_some();
        debug!(removed, connected = self.parties.len(), "Party left");
        removed
    }

    /// Number of connected parties.
    pub fn len(&self) -> usize {
        self.parties.len()
    }

    /// True when nobody is connected.
    pub fn is_empty(&self) -> bool {
        self.parties.is_empty()
    }

    /// Sends to one party.
    #[instrument(skip(self, event), fields(party_id = %party))]
    pub fn send_to(&self, party: &PartyId, event: ServerEvent) {
        match self.parties.get(party) {
            Some(outbox) => deliver(party, outbox, event),
            None => debug!("Party not connected, dropping event"),
        }
    }

    /// Sends to every connected party.
    #[instrument(skip(self, event), fields(connected = self.parties.len()))]
    pub fn broadcast(&self, event: ServerEvent) {
        for (party, outbox) in &self.parties {
            deliver(party, outbox, event.clone());
        }
    }
}
