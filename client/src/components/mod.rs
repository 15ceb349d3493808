//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render the gate and the chat room while reading/writing shared
//! state from Leptos context providers. `ChatRoom` provides the room-scoped
//! contexts the other room components expect.

pub mod chat_room;
pub mod compose_form;
pub mod message_list;
pub mod status_indicator;
pub mod username_gate;
