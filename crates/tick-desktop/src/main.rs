//! Tick Desktop Application
//!
//! A personal task list with live cloud sync.

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod components;
mod services;
mod state;
mod theme;
mod views;

fn main() {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("tick_core=debug".parse().unwrap())
                .add_directive("tick_desktop=debug".parse().unwrap()),
        )
        .init();

    tracing::info!("Starting Tick...");

    dioxus::launch(app::App);
}
