//! Relay service: client registry, backlog, and fan-out.
//!
//! DESIGN
//! ======
//! Every accepted message is stamped with the server clock, appended to the
//! bounded backlog, and sent to every connected client, its author
//! included. Clients render their own messages from that echo.
//!
//! `join` and `publish` both take the history lock before the client lock,
//! so a joining client sees each message exactly once: either in its
//! backlog snapshot or on its queue.

use frames::ChatMessage;
use time::OffsetDateTime;
use tokio::sync::mpsc::{self, error::TrySendError};
use tracing::{info, warn};
use uuid::Uuid;

use crate::state::AppState;

/// Register a client. Returns its inbound queue and the backlog to replay,
/// oldest first.
pub async fn join(state: &AppState, client_id: Uuid) -> (mpsc::Receiver<ChatMessage>, Vec<ChatMessage>) {
    let (tx, rx) = mpsc::channel(state.client_queue_capacity);

    let history = state.history.read().await;
    let mut clients = state.clients.write().await;
    clients.insert(client_id, tx);
    let backlog = history.iter().cloned().collect::<Vec<_>>();

    info!(%client_id, connected = clients.len(), backlog = backlog.len(), "client joined");
    (rx, backlog)
}

/// Unregister a client. Idempotent.
pub async fn part(state: &AppState, client_id: Uuid) {
    let mut clients = state.clients.write().await;
    if clients.remove(&client_id).is_some() {
        info!(%client_id, remaining = clients.len(), "client left");
    }
}

/// Stamp, record, and broadcast a message. Returns the stamped copy.
pub async fn publish(state: &AppState, message: ChatMessage) -> ChatMessage {
    let message = message.stamped(now_ms());

    let mut history = state.history.write().await;
    if state.history_limit > 0 {
        if history.len() >= state.history_limit {
            history.pop_front();
        }
        history.push_back(message.clone());
    }

    let closed = broadcast(state, &message).await;
    drop(history);

    if !closed.is_empty() {
        let mut clients = state.clients.write().await;
        for client_id in &closed {
            clients.remove(client_id);
        }
        info!(evicted = closed.len(), remaining = clients.len(), "evicted disconnected clients");
    }

    message
}

/// Best-effort fan-out. Returns the clients whose queue is closed.
async fn broadcast(state: &AppState, message: &ChatMessage) -> Vec<Uuid> {
    let clients = state.clients.read().await;
    let mut closed = Vec::new();
    for (client_id, tx) in clients.iter() {
        match tx.try_send(message.clone()) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => warn!(%client_id, "client queue full, dropping message"),
            Err(TrySendError::Closed(_)) => closed.push(*client_id),
        }
    }
    closed
}

fn now_ms() -> i64 {
    let nanos = OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000;
    i64::try_from(nanos).unwrap_or(i64::MAX)
}

#[cfg(test)]
#[path = "relay_test.rs"]
mod tests;
