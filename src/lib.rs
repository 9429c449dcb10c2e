// Library interface for rust_menu_scraper
// This allows tests and the server binary to share the scraper components

pub mod app_state;
pub mod browser;
pub mod config;
pub mod fetcher;
pub mod handlers;
pub mod menu;
pub mod metrics;
