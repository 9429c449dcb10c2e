//! The fetch boundary: browser session in, menu records out
//!
//! [`ChromeMenuFetcher`] drives one headless Chrome session per call. Any
//! failure on the way (launch, navigation, the container never showing up) is
//! a [`FetchError`]; [`fetch_menu_data`] is where those are logged and turned
//! into an empty result for the HTTP layer.

use crate::browser::{BrowserConfig, BrowserError, BrowserManager, BrowserScraper};
use crate::config::{Config, MenuConfig};
use crate::menu::page::CONTAINER_SELECTOR;
use crate::menu::{extract, MenuPage, MenuRecord, PageError};
use crate::metrics::{track_fetch, MetricsTracker};
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error(transparent)]
    Browser(#[from] BrowserError),

    #[error("failed to read menu page: {0}")]
    Page(#[from] PageError),
}

impl FetchError {
    /// The menu container never became visible within the wait timeout
    pub fn is_timeout(&self) -> bool {
        matches!(self, FetchError::Browser(BrowserError::Timeout(_)))
    }
}

/// Anything that can produce the current menu
pub trait MenuSource: Send + Sync {
    fn fetch(&self) -> Result<Vec<MenuRecord>, FetchError>;
}

/// Fetches the menu by rendering the target page in headless Chrome
#[derive(Debug, Clone)]
pub struct ChromeMenuFetcher {
    menu: MenuConfig,
    browser: BrowserConfig,
}

impl ChromeMenuFetcher {
    pub fn new(config: &Config) -> Self {
        Self {
            menu: config.menu.clone(),
            browser: config.browser.browser_config(),
        }
    }

    pub fn target_url(&self) -> &str {
        &self.menu.target_url
    }

    /// How long to wait for the menu container to become visible
    pub fn wait_timeout(&self) -> Duration {
        Duration::from_secs(self.menu.wait_timeout)
    }

    fn render(&self) -> Result<String, BrowserError> {
        let manager = BrowserManager::new(self.browser.clone())?;
        let scraper = BrowserScraper::with_timeout(manager.new_tab()?, self.wait_timeout())
            .with_call_timeout(self.browser.timeout());

        log::info!("Fetching menu from: {}", self.menu.target_url);
        scraper.navigate(&self.menu.target_url)?;

        scraper.wait_for_visible(CONTAINER_SELECTOR).map_err(|e| {
            log::error!(
                "Timeout waiting for menu elements at {}",
                self.menu.target_url
            );
            e
        })?;
        log::info!("Menu container div located.");

        scraper.get_html()
    }
}

impl MenuSource for ChromeMenuFetcher {
    fn fetch(&self) -> Result<Vec<MenuRecord>, FetchError> {
        // The browser is gone by the time the snapshot is parsed
        let html = self.render()?;
        parse_menu(&html)
    }
}

/// Extract the menu from a rendered HTML snapshot
pub fn parse_menu(html: &str) -> Result<Vec<MenuRecord>, FetchError> {
    let page = MenuPage::parse(html)?;
    let items = page.items()?;
    log::info!("Found {} potential menu item elements.", items.len());

    let records = extract(&items);
    log::info!("Successfully extracted {} menu items.", records.len());
    Ok(records)
}

/// Fetch the menu, recording metrics. Failures are logged and yield an empty list.
pub fn fetch_menu_data(source: &dyn MenuSource, metrics: &MetricsTracker) -> Vec<MenuRecord> {
    match track_fetch(metrics, || source.fetch(), FetchError::is_timeout) {
        Ok(records) => records,
        Err(e) => {
            log::error!("An error occurred during menu fetching: {}", e);
            Vec::new()
        }
    }
}
