//! Message input and send button.

use leptos::prelude::*;

use crate::net::socket::ChatSender;
use crate::state::chat::compose_message;
use crate::state::connection::ConnectionView;
use crate::state::session::SessionState;
use crate::util::clock::now_ms;

/// Compose form. Send is disabled while disconnected; blank drafts are
/// ignored and left in place.
#[component]
pub fn ComposeForm() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    let connection = expect_context::<RwSignal<ConnectionView>>();
    let sender = expect_context::<ChatSender>();
    let draft = RwSignal::new(String::new());

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let name = session.with_untracked(|s| s.name().to_owned());
        let connected = connection.get_untracked().is_connected();

        match draft.with_untracked(|d| compose_message(d, &name, connected, now_ms())) {
            Ok(message) => {
                if sender.send(message) {
                    draft.set(String::new());
                } else {
                    log::warn!("chat: connection driver is gone, message not queued");
                }
            }
            Err(rejection) => log::debug!("chat: submit ignored ({rejection:?})"),
        }
    };

    view! {
        <form class="compose" on:submit=on_submit>
            <input
                class="compose__input"
                type="text"
                placeholder="Type a message..."
                prop:value=move || draft.get()
                on:input=move |ev| draft.set(event_target_value(&ev))
            />
            <button class="compose__send" type="submit" disabled=move || !connection.get().is_connected()>
                "Send"
            </button>
        </form>
    }
}
