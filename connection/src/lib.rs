//! # connection
//!
//! Lifecycle management for the single chat socket.
//!
//! DESIGN
//! ======
//! The crate is split Sans-IO style:
//! - [`ConnectionMachine`] is a pure state machine. Callers feed it
//!   [`ConnectionEvent`]s and execute the [`ConnectionAction`]s it returns.
//! - [`ConnectionManager`] executes those actions against an
//!   [`Environment`] that knows how to open a transport and arm a retry
//!   timer. The browser client supplies a WebSocket environment; tests
//!   supply a recording fake.
//!
//! Transports are tagged with a [`Generation`] and timers with a
//! [`TimerTicket`], so events from torn-down transports or cancelled
//! timers can never drive the machine.

mod machine;
mod manager;
mod transport;

pub use machine::{
    ConnectionAction, ConnectionEvent, ConnectionMachine, ConnectionStatus, DEFAULT_MAX_RETRIES, DEFAULT_RETRY_DELAY,
    Phase, RetryPolicy,
};
pub use manager::{ConnectionManager, SendOutcome};
pub use transport::{Environment, Generation, RetryTimer, TimerTicket, Transport, TransportError, TransportEvent};
