//! Metrics for menu fetches
//!
//! Tracks success, empty and failed fetches plus timing, exposed at `GET /metrics`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FetchMetrics {
    pub total_fetches: u64,
    pub successful_fetches: u64,
    /// Fetches that completed but found no menu items
    pub empty_fetches: u64,
    pub failed_fetches: u64,
    pub timeout_count: u64,
    pub items_last_fetch: usize,
    pub last_success: Option<DateTime<Utc>>,
    pub last_failure: Option<DateTime<Utc>>,
    pub last_error: Option<String>,
    pub average_fetch_time_ms: f64,
    pub total_fetch_time_ms: u64,
}

impl FetchMetrics {
    pub fn success_rate(&self) -> f64 {
        if self.total_fetches == 0 {
            0.0
        } else {
            (self.successful_fetches as f64 / self.total_fetches as f64) * 100.0
        }
    }

    fn record_duration(&mut self, elapsed: Duration) {
        self.total_fetches += 1;
        self.total_fetch_time_ms += elapsed.as_millis() as u64;
        self.average_fetch_time_ms = self.total_fetch_time_ms as f64 / self.total_fetches as f64;
    }

    pub fn record_success(&mut self, elapsed: Duration, items: usize) {
        self.record_duration(elapsed);
        self.successful_fetches += 1;
        self.items_last_fetch = items;
        self.last_success = Some(Utc::now());
    }

    pub fn record_empty(&mut self, elapsed: Duration) {
        self.record_duration(elapsed);
        self.empty_fetches += 1;
        self.last_failure = Some(Utc::now());
        self.last_error = Some("no menu items found".to_string());
    }

    pub fn record_failure(&mut self, elapsed: Duration, error: String, is_timeout: bool) {
        self.record_duration(elapsed);
        self.failed_fetches += 1;
        self.last_failure = Some(Utc::now());

        if is_timeout {
            self.timeout_count += 1;
        }
        self.last_error = Some(error);
    }
}

/// Shared, cloneable handle to the fetch metrics
#[derive(Clone, Default)]
pub struct MetricsTracker {
    metrics: Arc<Mutex<FetchMetrics>>,
}

impl MetricsTracker {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, FetchMetrics> {
        self.metrics.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn record_success(&self, elapsed: Duration, items: usize) {
        let mut metrics = self.lock();
        metrics.record_success(elapsed, items);

        log::info!(
            "Menu fetch succeeded - {} items in {}ms - Success rate: {:.2}%",
            items,
            elapsed.as_millis(),
            metrics.success_rate()
        );
    }

    pub fn record_empty(&self, elapsed: Duration) {
        let mut metrics = self.lock();
        metrics.record_empty(elapsed);

        log::warn!(
            "Menu fetch returned no items after {}ms - Success rate: {:.2}%",
            elapsed.as_millis(),
            metrics.success_rate()
        );
    }

    pub fn record_failure(&self, elapsed: Duration, error: String, is_timeout: bool) {
        let mut metrics = self.lock();
        metrics.record_failure(elapsed, error.clone(), is_timeout);

        log::warn!(
            "Menu fetch failed - Error: {} - Success rate: {:.2}%",
            error,
            metrics.success_rate()
        );
    }

    pub fn snapshot(&self) -> FetchMetrics {
        self.lock().clone()
    }
}

/// Time a fetch and record its outcome.
///
/// `is_timeout` decides which errors count towards `timeout_count`.
pub fn track_fetch<T, E, F, C>(
    tracker: &MetricsTracker,
    operation: F,
    is_timeout: C,
) -> Result<Vec<T>, E>
where
    F: FnOnce() -> Result<Vec<T>, E>,
    C: Fn(&E) -> bool,
    E: std::fmt::Display,
{
    let start = Instant::now();
    let result = operation();
    let elapsed = start.elapsed();

    match &result {
        Ok(items) if items.is_empty() => tracker.record_empty(elapsed),
        Ok(items) => tracker.record_success(elapsed, items.len()),
        Err(e) => tracker.record_failure(elapsed, e.to_string(), is_timeout(e)),
    }

    result
}
