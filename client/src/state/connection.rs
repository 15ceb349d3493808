//! Connection status snapshot published by the driver loop for the views.

#[cfg(test)]
#[path = "connection_test.rs"]
mod connection_test;

use connection::{ConnectionManager, ConnectionStatus, Environment, Phase};

/// Snapshot of the connection manager published to the UI.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ConnectionView {
    pub status: ConnectionStatus,
    pub retry_count: u32,
    pub exhausted: bool,
}

impl ConnectionView {
    #[must_use]
    pub fn from_manager<E: Environment>(manager: &ConnectionManager<E>) -> Self {
        Self {
            status: manager.status(),
            retry_count: manager.retry_count(),
            exhausted: manager.phase() == Phase::Exhausted,
        }
    }

    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.status == ConnectionStatus::Connected
    }

    /// Hover text for the status indicator.
    #[must_use]
    pub fn title(&self) -> String {
        if self.exhausted {
            return "Unable to reach the chat server".to_owned();
        }
        match (self.status, self.retry_count) {
            (ConnectionStatus::Connecting, n) if n > 0 => format!("Reconnecting (attempt {n})"),
            (ConnectionStatus::Disconnected, n) if n > 0 => format!("Connection lost, retry {n} pending"),
            (status, _) => status.label().to_owned(),
        }
    }

    /// Class for the status dot.
    #[must_use]
    pub fn dot_class(&self) -> &'static str {
        match self.status {
            ConnectionStatus::Connected => "status__dot status__dot--connected",
            ConnectionStatus::Connecting => "status__dot status__dot--connecting",
            ConnectionStatus::Disconnected => "status__dot status__dot--disconnected",
        }
    }
}
