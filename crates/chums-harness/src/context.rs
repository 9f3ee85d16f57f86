//! Per-spec test context.
//!
//! Everything a scenario needs travels in a [`TestContext`] passed by
//! parameter: the page (and through it the configuration) plus the name of
//! the spec being run, used to tag log lines and artifacts.

use crate::config::HarnessConfig;
use crate::helpers::auth::{login_and_select_church, navigate_directly};
use crate::page::Page;
use crate::result::HarnessResult;

/// Explicit context for one spec run
#[derive(Debug, Clone)]
pub struct TestContext {
    page: Page,
    spec: String,
}

impl TestContext {
    /// Context for `spec` on `page`
    #[must_use]
    pub fn new(page: Page, spec: impl Into<String>) -> Self {
        Self {
            page,
            spec: spec.into(),
        }
    }

    /// The page under test
    #[must_use]
    pub const fn page(&self) -> &Page {
        &self.page
    }

    /// Run configuration
    #[must_use]
    pub fn config(&self) -> &HarnessConfig {
        self.page.config()
    }

    /// Name of the running spec
    #[must_use]
    pub fn spec(&self) -> &str {
        &self.spec
    }

    /// Sign in and select the configured church
    pub async fn login(&self) -> HarnessResult<()> {
        login_and_select_church(&self.page).await
    }

    /// Navigate, signing in first when bounced to login
    pub async fn navigate(&self, path: &str) -> HarnessResult<()> {
        navigate_directly(&self.page, path).await
    }
}
