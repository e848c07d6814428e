//! # client
//!
//! Leptos + WASM browser front-end for the guessing game.
//!
//! This crate contains the page, components, HTTP session creation, and the
//! realtime channel manager. Game state and its rules live in the `game`
//! crate; this crate only binds them to the DOM and the network.

pub mod app;
pub mod components;
pub mod config;
pub mod net;
pub mod pages;
pub mod util;

/// WASM entry point: install the panic hook and console logger, then mount.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::mount_to_body(app::App);
}
