//! Command channel and driver loop for the chat connection.
//!
//! DESIGN
//! ======
//! One local task owns the `ConnectionManager`. Every input reaches it as a
//! [`ClientCommand`] on a single unbounded channel: transport events, retry
//! timer expirations, outbound messages from the compose form, and the
//! shutdown issued when the chat room unmounts. All state changes therefore
//! happen in one place, in channel order.
//!
//! Views never touch the manager. They hold a [`ChatSender`] (a cloneable
//! channel handle) and read the signals the loop publishes.

#[cfg(test)]
#[path = "socket_test.rs"]
mod socket_test;

use connection::{ConnectionManager, Environment, Generation, Phase, SendOutcome, TimerTicket, TransportEvent};
use frames::ChatMessage;
use futures::StreamExt;
use futures::channel::mpsc::{UnboundedReceiver, UnboundedSender};

use crate::state::connection::ConnectionView;

/// Input to the connection driver loop.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClientCommand {
    /// Event reported by the transport with the given generation.
    Transport(Generation, TransportEvent),
    /// The retry timer with the given ticket fired.
    RetryElapsed(TimerTicket),
    /// Compose form submitted a message.
    Send(ChatMessage),
    /// Chat room is unmounting.
    Shutdown,
}

/// Result of applying one command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CommandOutcome {
    /// Nothing for the view.
    Idle,
    /// A decoded inbound message to append.
    Inbound(ChatMessage),
    /// The loop must exit.
    Stop,
}

/// Cloneable handle views use to reach the driver loop.
///
/// The default handle is detached (SSR, tests) and drops everything.
#[derive(Clone, Debug, Default)]
pub struct ChatSender {
    tx: Option<UnboundedSender<ClientCommand>>,
}

impl ChatSender {
    #[must_use]
    pub fn new(tx: UnboundedSender<ClientCommand>) -> Self {
        Self { tx: Some(tx) }
    }

    /// Queue `message` for the driver loop.
    ///
    /// Returns `false` if the loop is gone. Whether the message reaches the
    /// wire is decided by the connection manager.
    pub fn send(&self, message: ChatMessage) -> bool {
        self.dispatch(ClientCommand::Send(message))
    }

    /// Ask the driver loop to close the socket and exit.
    pub fn shutdown(&self) {
        if !self.dispatch(ClientCommand::Shutdown) {
            log::debug!("chat: driver already stopped");
        }
    }

    fn dispatch(&self, command: ClientCommand) -> bool {
        self.tx.as_ref().is_some_and(|tx| tx.unbounded_send(command).is_ok())
    }
}

/// Apply one command to the manager.
pub fn apply_command<E: Environment>(manager: &mut ConnectionManager<E>, command: ClientCommand) -> CommandOutcome {
    match command {
        ClientCommand::Transport(generation, event) => {
            manager.handle_transport(generation, event).map_or(CommandOutcome::Idle, CommandOutcome::Inbound)
        }
        ClientCommand::RetryElapsed(ticket) => {
            manager.retry_elapsed(ticket);
            CommandOutcome::Idle
        }
        ClientCommand::Send(message) => {
            if manager.send(&message) == SendOutcome::Dropped {
                log::debug!("chat: message from {} dropped while disconnected", message.sender);
            }
            CommandOutcome::Idle
        }
        ClientCommand::Shutdown => {
            manager.shutdown();
            CommandOutcome::Stop
        }
    }
}

/// Start the manager and process commands until shutdown.
///
/// `on_message` receives every decoded inbound message in arrival order;
/// `on_status` receives the connection snapshot whenever it changes.
pub async fn drive_connection<E, M, S>(
    mut manager: ConnectionManager<E>,
    mut commands: UnboundedReceiver<ClientCommand>,
    mut on_message: M,
    mut on_status: S,
) where
    E: Environment,
    M: FnMut(ChatMessage),
    S: FnMut(ConnectionView),
{
    manager.start();
    let mut published = ConnectionView::from_manager(&manager);
    on_status(published);

    while let Some(command) = commands.next().await {
        let outcome = apply_command(&mut manager, command);

        let view = ConnectionView::from_manager(&manager);
        if view != published {
            on_status(view);
            published = view;
        }

        match outcome {
            CommandOutcome::Idle => {}
            CommandOutcome::Inbound(message) => on_message(message),
            CommandOutcome::Stop => break,
        }
    }

    if manager.phase() != Phase::Stopped {
        manager.shutdown();
        on_status(ConnectionView::from_manager(&manager));
    }
}
