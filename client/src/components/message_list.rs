//! Scrolling list of chat messages.
//!
//! Own messages align right, everyone else's left. The list scrolls to the
//! newest message whenever one is appended. Rows are keyed by arrival
//! position, so an append renders only the new row.

use frames::ChatMessage;
use leptos::prelude::*;

use crate::state::chat::{ChatState, MessageSide, author_label};
use crate::state::session::SessionState;
use crate::util::clock::time_label;

#[component]
pub fn MessageList() -> impl IntoView {
    let chat = expect_context::<RwSignal<ChatState>>();
    let list_ref = NodeRef::<leptos::html::Div>::new();

    #[cfg(feature = "hydrate")]
    {
        Effect::new(move || {
            chat.track();
            let Some(list) = list_ref.get() else {
                return;
            };
            list.set_scroll_top(list.scroll_height());
        });
    }

    view! {
        <div class="message-list" node_ref=list_ref>
            <For
                each=move || 0..chat.with(ChatState::len)
                key=|index| *index
                children=move |index| {
                    chat.with_untracked(|c| c.message_at(index).cloned())
                        .map(|message| view! { <MessageBubble message/> })
                }
            />
        </div>
    }
}

#[component]
fn MessageBubble(message: ChatMessage) -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    let name = session.with_untracked(|s| s.name().to_owned());

    let side = MessageSide::of(&message, &name);
    let author = author_label(&message, &name).to_owned();
    let time = time_label(message.timestamp);

    view! {
        <div class=side.row_class()>
            <div class=side.bubble_class()>
                <div class="message__meta">
                    <span class="message__author">{author}</span>
                    <span class="message__time">{time}</span>
                </div>
                <p class="message__content">{message.content}</p>
            </div>
        </div>
    }
}
