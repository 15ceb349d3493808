//! Connection manager: owns the transport handle, the retry timer, and the
//! lifecycle machine, and executes the machine's actions.
//!
//! ERROR HANDLING
//! ==============
//! Nothing here returns an error to the caller. Open failures feed back into
//! the machine as `Errored`, malformed inbound frames are logged and skipped,
//! and sends while disconnected are dropped. The connected flag is the only
//! failure signal the UI gets.

#[cfg(test)]
#[path = "manager_test.rs"]
mod manager_test;

use frames::ChatMessage;
use log::{debug, info, warn};

use crate::machine::{ConnectionAction, ConnectionEvent, ConnectionMachine, ConnectionStatus, Phase, RetryPolicy};
use crate::transport::{Environment, Generation, RetryTimer, TimerTicket, Transport, TransportEvent};

/// What happened to a message handed to [`ConnectionManager::send`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SendOutcome {
    /// Written to the live transport.
    Sent,
    /// Not connected; the message was discarded.
    Dropped,
    /// Connected, but encoding or writing failed.
    Failed,
}

/// Single-socket connection manager.
pub struct ConnectionManager<E: Environment> {
    env: E,
    machine: ConnectionMachine,
    transport: Option<(Generation, E::Transport)>,
    timer: Option<(TimerTicket, E::Timer)>,
    last_generation: u64,
    last_ticket: u64,
}

impl<E: Environment> ConnectionManager<E> {
    #[must_use]
    pub fn new(env: E, policy: RetryPolicy) -> Self {
        Self {
            env,
            machine: ConnectionMachine::new(policy),
            transport: None,
            timer: None,
            last_generation: 0,
            last_ticket: 0,
        }
    }

    #[must_use]
    pub fn environment(&self) -> &E {
        &self.env
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.machine.phase()
    }

    #[must_use]
    pub fn status(&self) -> ConnectionStatus {
        self.machine.status()
    }

    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.machine.is_connected()
    }

    #[must_use]
    pub fn retry_count(&self) -> u32 {
        self.machine.retry_count()
    }

    /// Generation of the live transport handle, if any.
    #[must_use]
    pub fn current_generation(&self) -> Option<Generation> {
        self.transport.as_ref().map(|(generation, _)| *generation)
    }

    /// Whether a retry timer is armed.
    #[must_use]
    pub fn retry_pending(&self) -> bool {
        self.timer.is_some()
    }

    /// Connect, or reconnect after retries were exhausted.
    pub fn start(&mut self) {
        self.apply(ConnectionEvent::Start);
    }

    /// Close everything and ignore every later event.
    pub fn shutdown(&mut self) {
        info!("connection: shutting down");
        self.apply(ConnectionEvent::Shutdown);
    }

    /// Feed one transport event. Returns the decoded message for inbound
    /// frames.
    pub fn handle_transport(&mut self, generation: Generation, event: TransportEvent) -> Option<ChatMessage> {
        if self.current_generation() != Some(generation) {
            debug!("connection: ignoring {event:?} from stale transport {generation}");
            return None;
        }

        match event {
            TransportEvent::Opened => {
                info!("connection: transport {generation} connected");
                self.apply(ConnectionEvent::Opened);
                None
            }
            TransportEvent::Message(text) => match frames::decode_message(&text) {
                Ok(message) => Some(message),
                Err(e) => {
                    warn!("connection: dropping malformed frame: {e}");
                    None
                }
            },
            TransportEvent::Closed => {
                info!("connection: transport {generation} disconnected");
                self.apply(ConnectionEvent::Closed);
                None
            }
            TransportEvent::Errored(detail) => {
                warn!("connection: transport {generation} error: {detail}");
                self.apply(ConnectionEvent::Errored);
                None
            }
        }
    }

    /// Feed a retry timer expiration.
    pub fn retry_elapsed(&mut self, ticket: TimerTicket) {
        match self.timer.take() {
            Some((armed, _)) if armed == ticket => self.apply(ConnectionEvent::RetryElapsed),
            other => {
                debug!("connection: ignoring stale retry timer {ticket:?}");
                self.timer = other;
            }
        }
    }

    /// Serialize and transmit `message` if connected; drop it otherwise.
    pub fn send(&self, message: &ChatMessage) -> SendOutcome {
        let Some((generation, transport)) = self.transport.as_ref().filter(|_| self.machine.is_connected()) else {
            debug!("connection: not connected, dropping outbound message");
            return SendOutcome::Dropped;
        };

        let text = match frames::encode_message(message) {
            Ok(text) => text,
            Err(e) => {
                warn!("connection: {e}");
                return SendOutcome::Failed;
            }
        };

        match transport.send_text(&text) {
            Ok(()) => SendOutcome::Sent,
            Err(e) => {
                warn!("connection: transport {generation}: {e}");
                SendOutcome::Failed
            }
        }
    }

    fn apply(&mut self, event: ConnectionEvent) {
        let before = self.machine.phase();
        let mut open_failed = false;
        for action in self.machine.handle(event) {
            match action {
                ConnectionAction::Open => open_failed = !self.open(),
                ConnectionAction::Close => {
                    if let Some((_, transport)) = self.transport.take() {
                        transport.close();
                    }
                }
                ConnectionAction::Release => {
                    self.transport = None;
                }
                ConnectionAction::ScheduleRetry { delay, attempt } => {
                    let max = self.machine.policy().max_retries;
                    info!("connection: reconnecting in {delay:?} (attempt {attempt}/{max})");
                    self.last_ticket += 1;
                    let ticket = TimerTicket(self.last_ticket);
                    self.timer = Some((ticket, self.env.schedule_retry(delay, ticket)));
                }
                ConnectionAction::CancelRetry => {
                    if let Some((_, timer)) = self.timer.take() {
                        timer.cancel();
                    }
                }
            }
        }

        // A transport that cannot even be created counts as an errored one.
        if open_failed {
            self.apply(ConnectionEvent::Errored);
            return;
        }

        if before != Phase::Exhausted && self.machine.phase() == Phase::Exhausted {
            warn!("connection: giving up after {} reconnect attempts", self.machine.retry_count());
        }
    }

    fn open(&mut self) -> bool {
        self.last_generation += 1;
        let generation = Generation(self.last_generation);
        match self.env.open(generation) {
            Ok(transport) => {
                debug!("connection: opening transport {generation}");
                self.transport = Some((generation, transport));
                true
            }
            Err(e) => {
                warn!("connection: {e}");
                false
            }
        }
    }
}
