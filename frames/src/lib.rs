//! Shared chat frame model and JSON codec for the realtime WS transport.
//!
//! This crate owns the wire representation used by both `server` and
//! `client`. One frame carries exactly one [`ChatMessage`], serialized as a
//! JSON text message; the transport's own message boundaries are the only
//! framing.

use serde::{Deserialize, Serialize};

/// Tag carried by ordinary chat messages.
pub const MESSAGE_KIND: &str = "message";

/// Error returned by [`encode_message`] and [`decode_message`].
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// The text could not be parsed as a chat frame.
    #[error("failed to decode chat frame: {0}")]
    Decode(#[source] serde_json::Error),
    /// The message could not be serialized.
    #[error("failed to encode chat frame: {0}")]
    Encode(#[source] serde_json::Error),
}

/// A single chat entry on the wire.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Frame tag, `"message"` for ordinary chat entries.
    #[serde(rename = "type", default = "default_kind")]
    pub kind: String,
    /// Message body as typed by the sender.
    pub content: String,
    /// Display name of the sender. Not authenticated.
    pub sender: String,
    /// Milliseconds since the Unix epoch. `0` when the frame omitted it.
    #[serde(default)]
    pub timestamp: i64,
}

impl ChatMessage {
    /// Build an ordinary `"message"` entry.
    #[must_use]
    pub fn new(content: impl Into<String>, sender: impl Into<String>, timestamp: i64) -> Self {
        Self { kind: MESSAGE_KIND.to_owned(), content: content.into(), sender: sender.into(), timestamp }
    }

    /// Copy of this message with `timestamp` replaced.
    #[must_use]
    pub fn stamped(mut self, timestamp: i64) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Whether this entry was written by `display_name`.
    #[must_use]
    pub fn is_from(&self, display_name: &str) -> bool {
        self.sender == display_name
    }
}

fn default_kind() -> String {
    MESSAGE_KIND.to_owned()
}

/// Encode a message into one JSON text frame.
///
/// # Errors
///
/// Returns [`CodecError::Encode`] if serialization fails.
pub fn encode_message(message: &ChatMessage) -> Result<String, CodecError> {
    serde_json::to_string(message).map_err(CodecError::Encode)
}

/// Decode one JSON text frame into a message.
///
/// # Errors
///
/// Returns [`CodecError::Decode`] for malformed JSON or missing
/// `content`/`sender` fields.
pub fn decode_message(text: &str) -> Result<ChatMessage, CodecError> {
    serde_json::from_str(text).map_err(CodecError::Decode)
}

#[cfg(test)]
#[path = "lib_test.rs"]
mod tests;
