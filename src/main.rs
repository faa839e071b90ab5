//! Laneboard Frontend Entry Point

mod app;
mod commands;
mod components;
mod config;
mod context;
mod logging;
mod models;
mod repository;
mod store;

use app::App;
use config::AppConfig;
use leptos::prelude::*;
use tracing::{info, warn};

fn main() {
    console_error_panic_hook::set_once();

    let (config, config_error) = match AppConfig::read() {
        Ok(config) => (config.unwrap_or_default(), None),
        Err(e) => (AppConfig::default(), Some(e)),
    };
    logging::init(config.level());
    if let Some(e) = config_error {
        warn!(error = %e, "ignoring unreadable config, using defaults");
    }
    info!(storage_key = %config.storage_key, "starting laneboard");

    mount_to_body(move || view! { <App config=config.clone() /> });
}
