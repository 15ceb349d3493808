//! Networking modules for the chat socket.
//!
//! SYSTEM CONTEXT
//! ==============
//! `socket` owns the command channel and the driver loop around
//! `connection::ConnectionManager`; `browser` supplies the WebSocket and
//! timer environment that loop runs against in the browser.

#[cfg(feature = "hydrate")]
pub mod browser;
pub mod socket;

/// Chat relay endpoint.
pub const CHAT_WS_URL: &str = "ws://localhost:8080/ws";
