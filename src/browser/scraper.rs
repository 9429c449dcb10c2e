use super::manager::BrowserError;
use headless_chrome::Tab;
use std::sync::Arc;
use std::time::{Duration, Instant};

const POLL_INTERVAL: Duration = Duration::from_millis(100);
const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(30);

/// High-level page utilities for a browser tab
pub struct BrowserScraper {
    tab: Arc<Tab>,
    default_timeout: Duration,
    /// Tab timeout restored once a wait is over
    call_timeout: Duration,
}

impl BrowserScraper {
    /// Create a new scraper with the given tab
    pub fn new(tab: Arc<Tab>) -> Self {
        Self::with_timeout(tab, Duration::from_secs(10))
    }

    /// Create a new scraper with a custom default timeout
    pub fn with_timeout(tab: Arc<Tab>, timeout: Duration) -> Self {
        Self {
            tab,
            default_timeout: timeout,
            call_timeout: DEFAULT_CALL_TIMEOUT,
        }
    }

    /// Set the tab timeout used outside of waits (navigation, snapshots)
    pub fn with_call_timeout(mut self, timeout: Duration) -> Self {
        self.call_timeout = timeout;
        self
    }

    /// Navigate to a URL and wait for page load
    pub fn navigate(&self, url: &str) -> Result<(), BrowserError> {
        self.tab.navigate_to(url).map_err(|e| {
            BrowserError::NavigationError(format!("Failed to navigate to {}: {}", url, e))
        })?;

        self.tab.wait_until_navigated().map_err(|e| {
            BrowserError::NavigationError(format!("Navigation timeout for {}: {}", url, e))
        })?;

        Ok(())
    }

    /// Wait until an element matching `selector` is rendered and visible
    pub fn wait_for_visible(&self, selector: &str) -> Result<(), BrowserError> {
        self.wait_for_visible_with_timeout(selector, self.default_timeout)
    }

    /// Wait for a visible element with a custom timeout.
    ///
    /// Client-side frameworks attach the element long before it is laid out,
    /// so presence alone is not enough: the element needs a non-empty box and
    /// must not be hidden through CSS.
    pub fn wait_for_visible_with_timeout(
        &self,
        selector: &str,
        timeout: Duration,
    ) -> Result<(), BrowserError> {
        let script = visibility_script(selector)?;

        let visible = poll_until(timeout, POLL_INTERVAL, |remaining| {
            // A single evaluation may not outlive the wait
            self.tab.set_default_timeout(remaining.max(POLL_INTERVAL));

            // Evaluation errors while the page is still booting are expected
            match self.tab.evaluate(&script, false) {
                Ok(result) => result.value.and_then(|v| v.as_bool()) == Some(true),
                Err(_) => false,
            }
        });
        self.tab.set_default_timeout(self.call_timeout);

        if visible {
            Ok(())
        } else {
            Err(BrowserError::Timeout(format!(
                "visible element {} after {}s",
                selector,
                timeout.as_secs()
            )))
        }
    }

    /// Get the HTML content of the page
    pub fn get_html(&self) -> Result<String, BrowserError> {
        self.tab
            .get_content()
            .map_err(|e| BrowserError::HtmlExtractionError(e.to_string()))
    }
}

/// Run `check` until it returns true or `timeout` runs out.
///
/// `check` always runs at least once and receives the time left. Returns
/// whether it ever succeeded.
fn poll_until(
    timeout: Duration,
    interval: Duration,
    mut check: impl FnMut(Duration) -> bool,
) -> bool {
    let deadline = Instant::now() + timeout;

    loop {
        if check(deadline.saturating_duration_since(Instant::now())) {
            return true;
        }

        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            return false;
        }
        std::thread::sleep(interval.min(remaining));
    }
}

/// Build the JavaScript expression that reports whether `selector` is visible.
fn visibility_script(selector: &str) -> Result<String, BrowserError> {
    let literal = serde_json::to_string(selector)
        .map_err(|e| BrowserError::JavaScriptError(e.to_string()))?;

    Ok(format!(
        r#"(() => {{
    const el = document.querySelector({literal});
    if (!el) return false;
    const style = window.getComputedStyle(el);
    if (style.display === 'none' || style.visibility === 'hidden') return false;
    const rect = el.getBoundingClientRect();
    return rect.width > 0 && rect.height > 0;
}})()"#
    ))
}
