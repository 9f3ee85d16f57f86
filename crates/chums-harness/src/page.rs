//! The active browser page, as seen by page objects and helpers.
//!
//! [`Page`] pairs a driver with the run configuration. It is cheap to clone
//! and is passed explicitly into every helper; there is no global page.

use crate::config::HarnessConfig;
use crate::dialog::Dialog;
use crate::driver::PageDriver;
use crate::locator::Locator;
use crate::page_object::{path_of, UrlPattern};
use crate::result::HarnessResult;
use crate::wait::{poll_until, WaitOptions};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// A browser page bound to a harness configuration
#[derive(Clone)]
pub struct Page {
    driver: Arc<dyn PageDriver>,
    config: Arc<HarnessConfig>,
}

impl Page {
    /// Wrap a driver
    #[must_use]
    pub fn new(driver: Arc<dyn PageDriver>, config: HarnessConfig) -> Self {
        Self {
            driver,
            config: Arc::new(config),
        }
    }

    /// The run configuration
    #[must_use]
    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    /// The underlying driver
    #[must_use]
    pub fn driver(&self) -> &Arc<dyn PageDriver> {
        &self.driver
    }

    /// Wait options bounded by `timeout`, polling at the configured rate
    #[must_use]
    pub fn wait_options(&self, timeout: Duration) -> WaitOptions {
        WaitOptions::new()
            .with_timeout(timeout.as_millis() as u64)
            .with_poll_interval(self.config.timeouts.poll_ms)
    }

    /// Navigate to an in-app path (or absolute URL)
    pub async fn goto(&self, path: &str) -> HarnessResult<()> {
        let url = self.config.url_for(path);
        debug!(%url, "goto");
        self.driver.goto(&url).await
    }

    /// Current absolute URL
    pub async fn url(&self) -> HarnessResult<String> {
        self.driver.current_url().await
    }

    /// Path portion of the current URL
    pub async fn path(&self) -> HarnessResult<String> {
        Ok(path_of(&self.url().await?).to_string())
    }

    /// Whether the current URL matches `pattern`
    pub async fn is_on(&self, pattern: &UrlPattern) -> HarnessResult<bool> {
        Ok(pattern.matches(&self.url().await?))
    }

    /// Number of current matches
    pub async fn count(&self, locator: &Locator) -> HarnessResult<usize> {
        self.driver.count(locator).await
    }

    /// Whether any match is visible
    pub async fn is_visible(&self, locator: &Locator) -> HarnessResult<bool> {
        self.driver.is_visible(locator).await
    }

    /// Click the first visible match
    pub async fn click(&self, locator: &Locator) -> HarnessResult<()> {
        self.driver.click(locator).await
    }

    /// Fill the first visible match
    pub async fn fill(&self, locator: &Locator, value: &str) -> HarnessResult<()> {
        self.driver.fill(locator, value).await
    }

    /// Press a key on the first visible match
    pub async fn press(&self, locator: &Locator, key: &str) -> HarnessResult<()> {
        self.driver.press(locator, key).await
    }

    /// Check or uncheck
    pub async fn set_checked(&self, locator: &Locator, checked: bool) -> HarnessResult<()> {
        self.driver.set_checked(locator, checked).await
    }

    /// Text of every match
    pub async fn text_contents(&self, locator: &Locator) -> HarnessResult<Vec<String>> {
        self.driver.text_contents(locator).await
    }

    /// Value of the first match
    pub async fn input_value(&self, locator: &Locator) -> HarnessResult<Option<String>> {
        self.driver.input_value(locator).await
    }

    /// Dialogs answered so far
    pub async fn dialogs(&self) -> HarnessResult<Vec<Dialog>> {
        self.driver.dialogs().await
    }

    /// PNG screenshot
    pub async fn screenshot(&self) -> HarnessResult<Vec<u8>> {
        self.driver.screenshot().await
    }

    /// The locator back if it is visible right now, `None` otherwise.
    ///
    /// Lookup errors count as "not there": optional and permission-gated
    /// controls are expected to be missing in some environments, and the
    /// caller decides whether that is a skip or a failure.
    pub async fn find(&self, locator: &Locator) -> Option<Locator> {
        match self.driver.is_visible(locator).await {
            Ok(true) => Some(locator.clone()),
            Ok(false) => {
                debug!(locator = %locator, "not visible");
                None
            }
            Err(e) => {
                debug!(locator = %locator, error = %e, "lookup failed");
                None
            }
        }
    }

    /// Like [`Page::find`], but gives the control up to `timeout` to appear
    pub async fn find_within(&self, locator: &Locator, timeout: Duration) -> Option<Locator> {
        let found = poll_until(
            self.wait_options(timeout),
            &locator.describe(),
            || async { self.driver.is_visible(locator).await },
        )
        .await;
        match found {
            Ok(_) => Some(locator.clone()),
            Err(e) => {
                debug!(locator = %locator, error = %e, "did not appear");
                None
            }
        }
    }

    /// Close the page
    pub async fn close(&self) -> HarnessResult<()> {
        self.driver.close().await
    }
}

impl std::fmt::Debug for Page {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Page")
            .field("base_url", &self.config.base_url)
            .finish_non_exhaustive()
    }
}
