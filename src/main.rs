//! Prizm Board Frontend Entry Point

mod app;
mod board;
mod commands;
mod components;
mod config;
mod context;
mod dom;
mod markdown;
mod models;
mod notifications;
mod reconcile;
mod requests;
mod search;
mod store;
#[cfg(test)]
mod testing;

use app::App;
use leptos::prelude::*;
use tracing::Level;

fn main() {
    console_error_panic_hook::set_once();
    if let Err(e) = rolling_logger::init_logger("PrizmBoard", 500, Level::DEBUG) {
        web_sys::console::error_1(&format!("logger init failed: {}", e).into());
    }
    rolling_logger::info("board client started");
    mount_to_body(App);
}
