//! Wire events.
//!
//! Every frame is a JSON text message `{"event": "<name>", "data": ...}`.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tictactable_core::FullState;
use tracing::instrument;

/// Payload of `register-player`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterPlayer {
    /// Name shown to the other parties.
    pub display_name: String,
}

/// Payload of `submit-move`.
///
/// Signed so that negative indices reach the session as out-of-range moves
/// instead of failing to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitMove {
    /// Target cell, 0-8 row-major.
    pub cell_index: i64,
}

/// Payload of `rematch` (empty object).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RematchRequest {}

/// Events a party sends to the table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum ClientEvent {
    /// Ask for a seat.
    RegisterPlayer(RegisterPlayer),
    /// Play a cell.
    SubmitMove(SubmitMove),
    /// Start another round after a win or draw.
    Rematch(RematchRequest),
    /// Free-text chat, relayed verbatim to everyone.
    Message(Value),
}

impl ClientEvent {
    /// Decodes a text frame.
    #[instrument(skip(text), fields(len = text.len()))]
    pub fn decode(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

/// Payload of `game-full`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameFullNotice {
    /// Human-readable explanation.
    pub message: String,
}

/// Events the table sends to parties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum ServerEvent {
    /// Complete authoritative state.
    FullState(FullState),
    /// Registration refused because both seats are taken.
    GameFull(GameFullNotice),
    /// Relayed chat payload.
    Broadcast(Value),
}

impl ServerEvent {
    /// Encodes as a text frame.
    pub fn encode(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_register() {
        let event = ClientEvent::decode(r#"{"event":"register-player","data":{"displayName":"Ann"}}"#)
            .unwrap();
        assert_eq!(
            event,
            ClientEvent::RegisterPlayer(RegisterPlayer {
                display_name: "Ann".to_string()
            })
        );
    }

    #[test]
    fn test_decode_negative_move() {
        let event = ClientEvent::decode(r#"{"event":"submit-move","data":{"cellIndex":-3}}"#).unwrap();
        assert_eq!(event, ClientEvent::SubmitMove(SubmitMove { cell_index: -3 }));
    }

    #[test]
    fn test_decode_rematch_and_message() {
        assert_eq!(
            ClientEvent::decode(r#"{"event":"rematch","data":{}}"#).unwrap(),
            ClientEvent::Rematch(RematchRequest {})
        );
        assert_eq!(
            ClientEvent::decode(r#"{"event":"message","data":"hello"}"#).unwrap(),
            ClientEvent::Message(json!("hello"))
        );
    }

    #[test]
    fn test_decode_rejects_unknown_event() {
        assert!(ClientEvent::decode(r#"{"event":"cheat","data":{}}"#).is_err());
        assert!(ClientEvent::decode("not json").is_err());
    }

    #[test]
    fn test_encode_game_full() {
        let event = ServerEvent::GameFull(GameFullNotice {
            message: "full".to_string(),
        });
        let value: Value = serde_json::from_str(&event.encode().unwrap()).unwrap();
        assert_eq!(value, json!({"event": "game-full", "data": {"message": "full"}}));
    }
}
