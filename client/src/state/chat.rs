//! Chat room message model and compose rules.
//!
//! Messages are append-only in arrival order: no dedup, no sorting by
//! timestamp, no mutation after insert.

#[cfg(test)]
#[path = "chat_test.rs"]
mod chat_test;

use frames::ChatMessage;

/// State for the chat message list.
#[derive(Clone, Debug, Default)]
pub struct ChatState {
    pub messages: Vec<ChatMessage>,
}

impl ChatState {
    /// Append a message received from the transport.
    pub fn push_inbound(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Message at arrival position `index`.
    #[must_use]
    pub fn message_at(&self, index: usize) -> Option<&ChatMessage> {
        self.messages.get(index)
    }
}

/// Which side of the conversation a message belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageSide {
    Own,
    Other,
}

impl MessageSide {
    #[must_use]
    pub fn of(message: &ChatMessage, display_name: &str) -> Self {
        if message.is_from(display_name) { Self::Own } else { Self::Other }
    }

    /// Row alignment class.
    #[must_use]
    pub fn row_class(self) -> &'static str {
        match self {
            Self::Own => "message-row message-row--own",
            Self::Other => "message-row message-row--other",
        }
    }

    /// Bubble styling class.
    #[must_use]
    pub fn bubble_class(self) -> &'static str {
        match self {
            Self::Own => "message message--own",
            Self::Other => "message message--other",
        }
    }
}

/// Author line shown above a message body.
#[must_use]
pub fn author_label<'a>(message: &'a ChatMessage, display_name: &str) -> &'a str {
    match MessageSide::of(message, display_name) {
        MessageSide::Own => "You",
        MessageSide::Other => &message.sender,
    }
}

/// Why a submit did not produce a message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ComposeRejection {
    /// Draft is empty or whitespace only.
    Empty,
    /// Socket is not connected.
    Disconnected,
}

/// Turn the compose draft into an outbound message.
///
/// The content is sent exactly as typed; only the emptiness check trims.
///
/// # Errors
///
/// Returns a [`ComposeRejection`] when the draft is blank or the socket is
/// down. Callers ignore the rejection silently.
pub fn compose_message(
    draft: &str,
    display_name: &str,
    connected: bool,
    now_ms: i64,
) -> Result<ChatMessage, ComposeRejection> {
    if draft.trim().is_empty() {
        return Err(ComposeRejection::Empty);
    }
    if !connected {
        return Err(ComposeRejection::Disconnected);
    }
    Ok(ChatMessage::new(draft, display_name, now_ms))
}
