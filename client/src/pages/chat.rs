//! Chat page: the name gate until a display name is chosen, then the room.

use leptos::prelude::*;

use crate::components::chat_room::ChatRoom;
use crate::components::username_gate::UsernameGate;
use crate::state::session::SessionState;

#[component]
pub fn ChatPage() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();

    view! {
        <Show when=move || session.with(SessionState::has_joined) fallback=|| view! { <UsernameGate/> }>
            <ChatRoom/>
        </Show>
    }
}
