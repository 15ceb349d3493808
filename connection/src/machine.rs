//! Connection lifecycle state machine.
//!
//! ```text
//!   Idle ──Start──▶ Connecting ──Opened──▶ Connected
//!                     ▲    │                  │
//!          RetryElapsed    └──Closed/Errored──┤
//!                     │                       ▼
//!                  Backoff ◀── retries left ── lost ── cap reached ──▶ Exhausted
//! ```
//!
//! `Shutdown` moves any phase to `Stopped`, which absorbs every later
//! event. `Start` from `Exhausted` is an external restart and resets the
//! retry counter.

#[cfg(test)]
#[path = "machine_test.rs"]
mod machine_test;

use std::time::Duration;

/// Automatic reconnect attempts allowed after a connection is lost.
pub const DEFAULT_MAX_RETRIES: u32 = 5;

/// Fixed delay before each automatic reconnect attempt.
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(3);

/// Reconnect policy: a fixed delay and a capped attempt count. No backoff
/// growth and no jitter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self { max_retries: DEFAULT_MAX_RETRIES, delay: DEFAULT_RETRY_DELAY }
    }
}

/// Internal lifecycle position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Phase {
    /// Never started.
    #[default]
    Idle,
    /// A transport has been requested and has not opened yet.
    Connecting,
    /// The transport reported open.
    Connected,
    /// Lost the transport; a delayed retry is pending.
    Backoff,
    /// Lost the transport with no retries left. Terminal until restarted.
    Exhausted,
    /// Shut down by the owner. Terminal.
    Stopped,
}

/// Coarse connection status shown to the user.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ConnectionStatus {
    #[default]
    Disconnected,
    Connecting,
    Connected,
}

impl ConnectionStatus {
    /// Human-readable label for the status indicator.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Connected => "Connected",
            Self::Connecting => "Connecting...",
            Self::Disconnected => "Disconnected",
        }
    }
}

/// Inputs to the machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConnectionEvent {
    /// Owner asks for a connection (first mount or external restart).
    Start,
    /// The transport finished its handshake.
    Opened,
    /// The transport closed.
    Closed,
    /// The transport reported an error or could not be created.
    Errored,
    /// The pending retry delay elapsed.
    RetryElapsed,
    /// Owner is going away.
    Shutdown,
}

/// Side effects the caller must execute, in order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConnectionAction {
    /// Create a new transport.
    Open,
    /// Close the current transport and release it.
    Close,
    /// Release the current transport without closing it (it is already closed).
    Release,
    /// Arm the retry timer.
    ScheduleRetry { delay: Duration, attempt: u32 },
    /// Disarm the retry timer.
    CancelRetry,
}

/// Pure connection lifecycle: `{phase, retry_count}` plus the policy.
#[derive(Clone, Debug, Default)]
pub struct ConnectionMachine {
    policy: RetryPolicy,
    phase: Phase,
    retry_count: u32,
}

impl ConnectionMachine {
    #[must_use]
    pub fn new(policy: RetryPolicy) -> Self {
        Self { policy, phase: Phase::Idle, retry_count: 0 }
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn policy(&self) -> RetryPolicy {
        self.policy
    }

    /// Reconnect attempts made since the last successful open.
    #[must_use]
    pub fn retry_count(&self) -> u32 {
        self.retry_count
    }

    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.phase == Phase::Connected
    }

    #[must_use]
    pub fn status(&self) -> ConnectionStatus {
        match self.phase {
            Phase::Connected => ConnectionStatus::Connected,
            Phase::Connecting => ConnectionStatus::Connecting,
            Phase::Idle | Phase::Backoff | Phase::Exhausted | Phase::Stopped => ConnectionStatus::Disconnected,
        }
    }

    /// Apply one event and return the actions it requires.
    ///
    /// Events that make no sense in the current phase (a late `Closed` after
    /// an `Errored`, a `RetryElapsed` after a restart) are ignored.
    pub fn handle(&mut self, event: ConnectionEvent) -> Vec<ConnectionAction> {
        use ConnectionAction as A;
        use ConnectionEvent as E;

        if event == E::Shutdown {
            let actions = match self.phase {
                Phase::Connecting | Phase::Connected => vec![A::Close],
                Phase::Backoff => vec![A::CancelRetry],
                Phase::Idle | Phase::Exhausted | Phase::Stopped => Vec::new(),
            };
            self.phase = Phase::Stopped;
            return actions;
        }

        match (self.phase, event) {
            (Phase::Idle | Phase::Exhausted, E::Start) => {
                self.retry_count = 0;
                self.phase = Phase::Connecting;
                vec![A::Open]
            }
            (Phase::Connecting, E::Opened) => {
                self.retry_count = 0;
                self.phase = Phase::Connected;
                Vec::new()
            }
            (Phase::Connecting | Phase::Connected, E::Closed) => self.lost(A::Release),
            (Phase::Connecting | Phase::Connected, E::Errored) => self.lost(A::Close),
            (Phase::Backoff, E::RetryElapsed) => {
                self.phase = Phase::Connecting;
                vec![A::Open]
            }
            _ => Vec::new(),
        }
    }

    fn lost(&mut self, teardown: ConnectionAction) -> Vec<ConnectionAction> {
        if self.retry_count < self.policy.max_retries {
            self.retry_count += 1;
            self.phase = Phase::Backoff;
            vec![teardown, ConnectionAction::ScheduleRetry { delay: self.policy.delay, attempt: self.retry_count }]
        } else {
            self.phase = Phase::Exhausted;
            vec![teardown]
        }
    }
}
