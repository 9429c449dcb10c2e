//! Headless Chrome session used to render the menu page
//!
//! The menu page is a client-side rendered Angular app, so a plain HTTP GET
//! only returns an empty shell. This module launches Chrome, waits for the
//! menu to be laid out and hands back the rendered HTML.
//!
//! # Example
//!
//! ```no_run
//! use rust_menu_scraper::browser::{BrowserConfig, BrowserManager, BrowserScraper};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let manager = BrowserManager::new(BrowserConfig::default())?;
//! let scraper = BrowserScraper::new(manager.new_tab()?);
//!
//! scraper.navigate("https://example.com")?;
//! scraper.wait_for_visible("h1")?;
//! let html = scraper.get_html()?;
//!
//! println!("Extracted {} bytes of HTML", html.len());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod manager;
pub mod scraper;

pub use config::BrowserConfig;
pub use manager::{BrowserError, BrowserManager};
pub use scraper::BrowserScraper;
