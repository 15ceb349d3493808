//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor.
//! It holds the connected clients and the bounded backlog of recent
//! messages. Lock order is always `history` then `clients`.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use frames::ChatMessage;
use tokio::sync::{RwLock, mpsc};
use uuid::Uuid;

use crate::config::ServerConfig;

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum; all inner fields are Arc-wrapped or Copy.
#[derive(Clone)]
pub struct AppState {
    /// Connected clients: `client_id` -> sender for outgoing messages.
    pub clients: Arc<RwLock<HashMap<Uuid, mpsc::Sender<ChatMessage>>>>,
    /// Most recent messages, oldest first.
    pub history: Arc<RwLock<VecDeque<ChatMessage>>>,
    pub history_limit: usize,
    pub client_queue_capacity: usize,
}

impl AppState {
    #[must_use]
    pub fn new(config: &ServerConfig) -> Self {
        Self {
            clients: Arc::new(RwLock::new(HashMap::new())),
            history: Arc::new(RwLock::new(VecDeque::with_capacity(config.history_limit))),
            history_limit: config.history_limit,
            client_queue_capacity: config.client_queue_capacity,
        }
    }
}

#[cfg(test)]
#[path = "state_test.rs"]
mod tests;
