//! Chat room: owns the room-scoped state and the connection for as long as
//! it is mounted.
//!
//! LIFECYCLE
//! =========
//! Mounting spawns the connection driver (browser only). Unmounting sends
//! `Shutdown`, which closes the socket and cancels any pending retry; no
//! callback touches the room's signals after that.

use leptos::prelude::*;

use crate::components::compose_form::ComposeForm;
use crate::components::message_list::MessageList;
use crate::components::status_indicator::StatusIndicator;
use crate::state::chat::ChatState;
use crate::state::connection::ConnectionView;

#[component]
pub fn ChatRoom() -> impl IntoView {
    let chat = RwSignal::new(ChatState::default());
    let connection = RwSignal::new(ConnectionView::default());

    #[cfg(feature = "hydrate")]
    let sender = crate::net::browser::spawn_chat_client(chat, connection);
    #[cfg(not(feature = "hydrate"))]
    let sender = crate::net::socket::ChatSender::default();

    provide_context(chat);
    provide_context(connection);
    provide_context(sender.clone());

    on_cleanup(move || sender.shutdown());

    view! {
        <div class="chat-room">
            <header class="chat-room__header">
                <h1>"Chat Room"</h1>
                <StatusIndicator/>
            </header>
            <MessageList/>
            <ComposeForm/>
        </div>
    }
}
