//! WebSocket handler: chat relay.
//!
//! DESIGN
//! ======
//! On upgrade, registers the client, replays the backlog, and enters a
//! `select!` loop:
//! - Incoming client frames → decode → stamp + broadcast to every client
//! - Broadcast messages from the relay → forward to this client
//!
//! LIFECYCLE
//! =========
//! 1. Upgrade → `relay::join` → send backlog oldest first
//! 2. Client sends frames → `relay::publish` (echo comes back via the queue)
//! 3. Close, socket error, or write failure → `relay::part`

use axum::extract::State;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::Response;
use frames::ChatMessage;
use tracing::{info, warn};
use uuid::Uuid;

use crate::services::relay;
use crate::state::AppState;

pub async fn handle_ws(State(state): State<AppState>, ws: WebSocketUpgrade) -> Response {
    ws.on_upgrade(move |socket| run_ws(socket, state))
}

async fn run_ws(mut socket: WebSocket, state: AppState) {
    let client_id = Uuid::new_v4();
    let (mut client_rx, backlog) = relay::join(&state, client_id).await;
    info!(%client_id, "ws: client connected");

    let mut replayed = true;
    for message in &backlog {
        if send_message(&mut socket, client_id, message).await.is_err() {
            replayed = false;
            break;
        }
    }

    while replayed {
        tokio::select! {
            msg = socket.recv() => {
                let Some(Ok(msg)) = msg else { break };
                match msg {
                    Message::Text(text) => {
                        process_inbound_text(&state, client_id, text.as_str()).await;
                    }
                    Message::Close(_) => break,
                    _ => {}
                }
            }
            Some(message) = client_rx.recv() => {
                if send_message(&mut socket, client_id, &message).await.is_err() {
                    break;
                }
            }
        }
    }

    relay::part(&state, client_id).await;
    info!(%client_id, "ws: client disconnected");
}

/// Decode one inbound text frame and publish it.
///
/// Malformed frames are logged and skipped; the socket stays open.
async fn process_inbound_text(state: &AppState, client_id: Uuid, text: &str) -> Option<ChatMessage> {
    match frames::decode_message(text) {
        Ok(message) => {
            let message = relay::publish(state, message).await;
            info!(%client_id, sender = %message.sender, "ws: relayed message");
            Some(message)
        }
        Err(e) => {
            warn!(%client_id, error = %e, "ws: invalid inbound frame");
            None
        }
    }
}

async fn send_message(socket: &mut WebSocket, client_id: Uuid, message: &ChatMessage) -> Result<(), axum::Error> {
    let text = match frames::encode_message(message) {
        Ok(text) => text,
        Err(e) => {
            warn!(%client_id, error = %e, "ws: failed to encode outbound message");
            return Ok(());
        }
    };
    socket.send(Message::Text(text.into())).await
}

#[cfg(test)]
#[path = "ws_test.rs"]
mod ws_test;
