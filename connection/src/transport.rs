//! Seams between the connection manager and the outside world.

use std::fmt;
use std::time::Duration;

/// Identifies one transport opened by a manager. Strictly increasing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(pub u64);

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Identifies one armed retry timer. Strictly increasing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerTicket(pub u64);

/// Error raised by an [`Environment`] or a [`Transport`].
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TransportError {
    /// The transport could not be created at all.
    #[error("failed to open transport: {0}")]
    Open(String),
    /// A frame could not be written.
    #[error("failed to send frame: {0}")]
    Send(String),
}

/// Something the transport reported, tagged by the caller with the
/// [`Generation`] of the transport it came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TransportEvent {
    Opened,
    Message(String),
    Closed,
    Errored(String),
}

/// One live bidirectional message connection.
///
/// Implementations detach their event handlers when dropped; the manager
/// drops a transport right after closing or releasing it.
pub trait Transport {
    /// Write one text frame.
    fn send_text(&self, text: &str) -> Result<(), TransportError>;

    /// Begin closing the connection.
    fn close(&self);
}

/// A pending retry timer. Dropping it must not fire the callback either.
pub trait RetryTimer {
    fn cancel(self);
}

/// Factory for transports and retry timers.
///
/// Transport events and timer expirations are delivered back to the
/// manager by the caller, carrying the `Generation` / `TimerTicket` handed
/// out here.
pub trait Environment {
    type Transport: Transport;
    type Timer: RetryTimer;

    /// Start opening a new transport.
    fn open(&mut self, generation: Generation) -> Result<Self::Transport, TransportError>;

    /// Arm a one-shot timer that reports `ticket` after `delay`.
    fn schedule_retry(&mut self, delay: Duration, ticket: TimerTicket) -> Self::Timer;
}
