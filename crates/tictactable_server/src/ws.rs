//! WebSocket endpoint bridging sockets to the game table.

use axum::extract::State;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::IntoResponse;
use futures::{SinkExt, StreamExt};
use std::ops::ControlFlow;
use tictactable_core::PartyId;
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

use crate::hub;
use crate::protocol::ClientEvent;
use crate::table::TableHandle;

/// Upgrades `GET /ws` and hands the socket to [`handle_socket`].
#[instrument(skip_all)]
pub async fn ws_handler(ws: WebSocketUpgrade, State(table): State<TableHandle>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, table))
}

/// Runs one connection: assigns its party id, pumps outbound events to the
/// socket, forwards decoded inbound events to the table, and reports the
/// disconnect when the socket ends.
#[instrument(skip_all, fields(party_id = tracing::field::Empty))]
pub async fn handle_socket(socket: WebSocket, table: TableHandle) {
    let party = PartyId::from(Uuid::new_v4().to_string());
    tracing::Span::current().record("party_id", tracing::field::display(&party));
    info!("New connection");

    let (mut sink, mut stream) = socket.split();
    let (outbox, mut inbox) = hub::outbox();

    if table.connect(party.clone(), outbox).is_err() {
        error!("Game table is not running, closing connection");
        return;
    }

    // The table drops our outbox on disconnect, which ends this task.
    tokio::spawn(async move {
        while let Some(event) = inbox.recv().await {
            let text = match event.encode() {
                Ok(text) => text,
                Err(e) => {
                    error!(error = %e, "Failed to encode event");
                    continue;
                }
            };
            if sink.send(Message::Text(text.into())).await.is_err() {
                debug!("Socket closed while sending");
                break;
            }
        }
    });

    let reason = loop {
        match stream.next().await {
            Some(Ok(message)) => {
                if let ControlFlow::Break(reason) = on_frame(&table, &party, message) {
                    break reason;
                }
            }
            Some(Err(e)) => break e.to_string(),
            None => break "transport closed".to_string(),
        }
    };

    info!(%reason, "Connection ended");
    if table.disconnect(party, reason).is_err() {
        warn!("Game table stopped before disconnect was delivered");
    }
}

/// Handles one inbound frame from `party`.
///
/// Decoded events go to the table. Undecodable text, binary and ping/pong
/// frames are dropped. Returns `Break` with the disconnect reason when the
/// connection should end.
#[instrument(skip(table, message), fields(party_id = %party))]
pub fn on_frame(table: &TableHandle, party: &PartyId, message: Message) -> ControlFlow<String> {
    match message {
        Message::Text(text) => match ClientEvent::decode(text.as_str()) {
            Ok(event) => match table.dispatch(party.clone(), event) {
                Ok(()) => ControlFlow::Continue(()),
                Err(_) => ControlFlow::Break("game table stopped".to_string()),
            },
            Err(e) => {
                warn!(error = %e, "Dropping undecodable frame");
                ControlFlow::Continue(())
            }
        },
        Message::Close(frame) => ControlFlow::Break(
            frame
                .map(|f| f.reason.as_str().to_string())
                .filter(|reason| !reason.is_empty())
                .unwrap_or_else(|| "client closed".to_string()),
        ),
        _ => ControlFlow::Continue(()),
    }
}
