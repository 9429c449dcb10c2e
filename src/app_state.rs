//! Application state for the Actix-web server
//!
//! `AppState` is wrapped in `web::Data` and shared across all handlers. Every
//! field is cheap to clone so handlers can move what they need into
//! `web::block` for the blocking browser work.

use crate::config::Config;
use crate::fetcher::{ChromeMenuFetcher, MenuSource};
use crate::metrics::MetricsTracker;
use std::sync::Arc;

pub struct AppState {
    /// Where `GET /menu` gets its records from
    pub source: Arc<dyn MenuSource>,
    /// Fetch statistics served by `GET /metrics`
    pub metrics: MetricsTracker,
}

impl AppState {
    /// State backed by a headless Chrome fetcher built from `config`
    pub fn new(config: &Config) -> Self {
        Self::with_source(Arc::new(ChromeMenuFetcher::new(config)))
    }

    pub fn with_source(source: Arc<dyn MenuSource>) -> Self {
        Self {
            source,
            metrics: MetricsTracker::new(),
        }
    }
}
