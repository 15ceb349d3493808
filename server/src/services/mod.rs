//! Domain services used by the websocket handler.

pub mod relay;
