//! Players and the party identifiers they are bound to.

use derive_getters::Getters;
use derive_more::{Display, From};
use derive_new::new;
use serde::{Deserialize, Serialize};

use crate::types::Symbol;

/// Stable, opaque identifier of a connected party.
///
/// The transport assigns one per connection; the core only compares them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Display, From, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PartyId(String);

impl PartyId {
    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PartyId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// A registered player seated at the table.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize, new)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    /// Identifier of the owning connection.
    id: PartyId,
    /// Free-text name supplied at registration.
    display_name: String,
    /// Mark this player places.
    symbol: Symbol,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_wire_shape() {
        let player = Player::new(PartyId::from("abc"), "Ann".to_string(), Symbol::X);
        let json = serde_json::to_value(&player).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"id": "abc", "displayName": "Ann", "symbol": "X"})
        );
    }
}
