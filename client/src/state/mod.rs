//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! State is split by concern (`session`, `chat`, `connection`) so each
//! component depends on a small focused model. The models are plain structs
//! wrapped in `RwSignal`s by the components that own them, and the logic on
//! them is pure so it can be tested without a browser.

pub mod chat;
pub mod connection;
pub mod session;
