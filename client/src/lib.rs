//! # client
//!
//! Leptos + WASM frontend for the chat room.
//!
//! This crate contains the name gate, the chat room components, the client
//! state models, and the WebSocket connection driver. Browser-only code is
//! gated behind the `hydrate` feature; everything else also builds for SSR
//! and native tests.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: installs browser logging and hydrates the SSR markup.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}
