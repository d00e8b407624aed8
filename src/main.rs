//! Todopy Frontend Entry Point

mod api;
mod app;
mod cache;
mod components;
mod composables;
mod config;
mod context;
mod logger;
mod models;
mod storage;
mod store;

use app::App;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    logger::init();
    mount_to_body(App);
}
