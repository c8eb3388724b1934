//! ResolveIt Frontend Entry Point

mod account;
mod api;
mod app;
mod autocomplete;
mod case_form;
mod cases;
mod components;
mod config;
mod context;
mod help;
mod markdown;
mod models;
mod notifications;
mod pages;
mod session;
mod store;

use app::App;
use config::AppConfig;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();

    let config = AppConfig::load();
    if let Err(e) = console_logger::init(config.log_level) {
        web_sys::console::warn_1(&format!("logger already set: {}", e).into());
    }
    log::info!("ResolveIt starting, api={} ws={}", config.api_base, config.ws_url);

    mount_to_body(move || view! { <App config=config.clone() /> });
}
