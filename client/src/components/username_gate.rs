//! Display-name gate shown before the chat room.

use leptos::prelude::*;

use crate::state::session::SessionState;

/// Name entry form. Blank names are ignored; the gate stays up.
#[component]
pub fn UsernameGate() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    let draft = RwSignal::new(String::new());

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let raw = draft.get_untracked();
        if session.try_update(|s| s.join(&raw)) != Some(true) {
            log::debug!("gate: ignoring blank display name");
        }
    };

    view! {
        <div class="gate">
            <form class="gate__card" on:submit=on_submit>
                <h1>"Enter your username"</h1>
                <input
                    class="gate__input"
                    type="text"
                    placeholder="Username"
                    autofocus=true
                    prop:value=move || draft.get()
                    on:input=move |ev| draft.set(event_target_value(&ev))
                />
                <button class="gate__button" type="submit">
                    "Join Chat"
                </button>
            </form>
        </div>
    }
}
