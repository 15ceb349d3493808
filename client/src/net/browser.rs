//! Browser environment for the connection manager: `web_sys::WebSocket`
//! transports and `gloo_timers` retry timers.
//!
//! Socket callbacks and timer expirations never touch the manager directly.
//! They push a tagged [`ClientCommand`] onto the driver loop's channel, so
//! an event from a replaced socket or a cancelled timer arrives with a stale
//! tag and is ignored there.

use std::time::Duration;

use connection::{ConnectionManager, Environment, Generation, RetryPolicy, RetryTimer, TimerTicket, Transport, TransportError, TransportEvent};
use futures::channel::mpsc::{self, UnboundedSender};
use gloo_timers::callback::Timeout;
use leptos::prelude::{RwSignal, Set, Update};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{CloseEvent, Event, MessageEvent, WebSocket};

use super::CHAT_WS_URL;
use super::socket::{ChatSender, ClientCommand, drive_connection};
use crate::state::chat::ChatState;
use crate::state::connection::ConnectionView;

/// Opens browser WebSockets against a fixed URL.
pub struct BrowserEnvironment {
    url: String,
    commands: UnboundedSender<ClientCommand>,
}

impl BrowserEnvironment {
    #[must_use]
    pub fn new(url: impl Into<String>, commands: UnboundedSender<ClientCommand>) -> Self {
        Self { url: url.into(), commands }
    }
}

impl Environment for BrowserEnvironment {
    type Transport = BrowserSocket;
    type Timer = BrowserTimer;

    fn open(&mut self, generation: Generation) -> Result<BrowserSocket, TransportError> {
        let ws = WebSocket::new(&self.url).map_err(|e| TransportError::Open(format!("{e:?}")))?;
        Ok(BrowserSocket::attach(ws, generation, &self.commands))
    }

    fn schedule_retry(&mut self, delay: Duration, ticket: TimerTicket) -> BrowserTimer {
        let tx = self.commands.clone();
        let millis = u32::try_from(delay.as_millis()).unwrap_or(u32::MAX);
        BrowserTimer(Timeout::new(millis, move || {
            let _ = tx.unbounded_send(ClientCommand::RetryElapsed(ticket));
        }))
    }
}

/// One browser WebSocket with its event handlers.
///
/// The closures must outlive the socket's registration, so they live here
/// and are unregistered on drop.
pub struct BrowserSocket {
    ws: WebSocket,
    _on_open: Closure<dyn FnMut(Event)>,
    _on_message: Closure<dyn FnMut(MessageEvent)>,
    _on_close: Closure<dyn FnMut(CloseEvent)>,
    _on_error: Closure<dyn FnMut(Event)>,
}

impl BrowserSocket {
    fn attach(ws: WebSocket, generation: Generation, commands: &UnboundedSender<ClientCommand>) -> Self {
        let emit = {
            let tx = commands.clone();
            move |event: TransportEvent| {
                let _ = tx.unbounded_send(ClientCommand::Transport(generation, event));
            }
        };

        let on_open = {
            let emit = emit.clone();
            Closure::wrap(Box::new(move |_: Event| emit(TransportEvent::Opened)) as Box<dyn FnMut(Event)>)
        };
        let on_message = {
            let emit = emit.clone();
            Closure::wrap(Box::new(move |e: MessageEvent| match e.data().as_string() {
                Some(text) => emit(TransportEvent::Message(text)),
                None => log::warn!("chat: ignoring non-text frame on socket {generation}"),
            }) as Box<dyn FnMut(MessageEvent)>)
        };
        let on_close = {
            let emit = emit.clone();
            Closure::wrap(Box::new(move |e: CloseEvent| {
                log::debug!("chat: socket {generation} closed (code {})", e.code());
                emit(TransportEvent::Closed);
            }) as Box<dyn FnMut(CloseEvent)>)
        };
        let on_error =
            Closure::wrap(Box::new(move |e: Event| emit(TransportEvent::Errored(e.type_()))) as Box<dyn FnMut(Event)>);

        ws.set_onopen(Some(on_open.as_ref().unchecked_ref()));
        ws.set_onmessage(Some(on_message.as_ref().unchecked_ref()));
        ws.set_onclose(Some(on_close.as_ref().unchecked_ref()));
        ws.set_onerror(Some(on_error.as_ref().unchecked_ref()));

        Self { ws, _on_open: on_open, _on_message: on_message, _on_close: on_close, _on_error: on_error }
    }
}

impl Transport for BrowserSocket {
    fn send_text(&self, text: &str) -> Result<(), TransportError> {
        self.ws.send_with_str(text).map_err(|e| TransportError::Send(format!("{e:?}")))
    }

    fn close(&self) {
        let _ = self.ws.close();
    }
}

impl Drop for BrowserSocket {
    fn drop(&mut self) {
        self.ws.set_onopen(None);
        self.ws.set_onmessage(None);
        self.ws.set_onclose(None);
        self.ws.set_onerror(None);
    }
}

/// Pending retry. Dropping a `Timeout` also cancels it.
pub struct BrowserTimer(Timeout);

impl RetryTimer for BrowserTimer {
    fn cancel(self) {
        drop(self.0.cancel());
    }
}

/// Spawn the chat connection driver as a local task.
///
/// Inbound messages are appended to `chat`; connection snapshots are
/// written to `connection`. The returned sender is the only way in.
pub fn spawn_chat_client(chat: RwSignal<ChatState>, connection: RwSignal<ConnectionView>) -> ChatSender {
    let (tx, rx) = mpsc::unbounded();
    let manager = ConnectionManager::new(BrowserEnvironment::new(CHAT_WS_URL, tx.clone()), RetryPolicy::default());

    leptos::task::spawn_local(drive_connection(
        manager,
        rx,
        move |message| chat.update(|c| c.push_inbound(message)),
        move |view| connection.set(view),
    ));

    ChatSender::new(tx)
}
