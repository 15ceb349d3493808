//! Connection status dot and label for the room header.

use leptos::prelude::*;

use crate::state::connection::ConnectionView;

#[component]
pub fn StatusIndicator() -> impl IntoView {
    let connection = expect_context::<RwSignal<ConnectionView>>();

    view! {
        <div class="status" title=move || connection.get().title()>
            <span class=move || connection.get().dot_class()></span>
            <span class="status__label">{move || connection.get().status.label()}</span>
        </div>
    }
}
