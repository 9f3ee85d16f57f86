//! Harness configuration.
//!
//! Resolution order, later wins: built-in defaults, YAML file, environment
//! (`CHUMS_*`, `CHROMIUM_PATH`), then whatever the caller sets with the
//! `with_*` builders (the CLI maps its flags onto those).

use crate::dialog::AutoDialogBehavior;
use crate::result::{HarnessError, HarnessResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default address of a locally served admin app
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

/// Demo account shipped with the seed dataset
pub const DEMO_EMAIL: &str = "demo@chums.org";

/// Password of the demo account
pub const DEMO_PASSWORD: &str = "password";

/// Tenant the demo account selects after login
pub const DEMO_CHURCH: &str = "Grace Community Church";

/// Login credentials
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Credentials {
    /// Account email
    pub email: String,
    /// Account password
    pub password: String,
}

impl Default for Credentials {
    fn default() -> Self {
        Self {
            email: DEMO_EMAIL.to_string(),
            password: DEMO_PASSWORD.to_string(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"********")
            .finish()
    }
}

/// Timeouts, in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timeouts {
    /// Navigation and load-state waits
    pub navigation_ms: u64,
    /// `expect_*` assertions
    pub assertion_ms: u64,
    /// Waiting for a single control to appear
    pub element_ms: u64,
    /// Leaving the login screen after picking a church
    pub login_ms: u64,
    /// Pause after every click/fill so reactive updates land
    pub settle_ms: u64,
    /// Polling interval for all waits
    pub poll_ms: u64,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            navigation_ms: 30_000,
            assertion_ms: 10_000,
            element_ms: 5_000,
            login_ms: 10_000,
            settle_ms: 500,
            poll_ms: 100,
        }
    }
}

impl Timeouts {
    /// Short timeouts for in-process drivers that never lag
    #[must_use]
    pub const fn fast() -> Self {
        Self {
            navigation_ms: 200,
            assertion_ms: 200,
            element_ms: 100,
            login_ms: 200,
            settle_ms: 0,
            poll_ms: 5,
        }
    }

    /// Navigation timeout
    #[must_use]
    pub const fn navigation(&self) -> Duration {
        Duration::from_millis(self.navigation_ms)
    }

    /// Assertion timeout
    #[must_use]
    pub const fn assertion(&self) -> Duration {
        Duration::from_millis(self.assertion_ms)
    }

    /// Element timeout
    #[must_use]
    pub const fn element(&self) -> Duration {
        Duration::from_millis(self.element_ms)
    }

    /// Login timeout
    #[must_use]
    pub const fn login(&self) -> Duration {
        Duration::from_millis(self.login_ms)
    }

    /// Settle delay
    #[must_use]
    pub const fn settle(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }
}

/// Browser launch options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserConfig {
    /// Run in headless mode
    pub headless: bool,
    /// Viewport width
    pub viewport_width: u32,
    /// Viewport height
    pub viewport_height: u32,
    /// Path to chromium binary (None = auto-detect)
    pub chromium_path: Option<String>,
    /// Sandbox mode (disable for containers)
    pub sandbox: bool,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: true,
            viewport_width: 1280,
            viewport_height: 800,
            chromium_path: None,
            sandbox: true,
        }
    }
}

/// Everything a spec run needs to know about its environment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HarnessConfig {
    /// Origin of the admin app, without trailing slash
    pub base_url: String,
    /// Account used by the login bootstrap
    pub credentials: Credentials,
    /// Tenant picked in the post-login modal
    pub church: String,
    /// Wait budgets
    pub timeouts: Timeouts,
    /// Browser launch options
    pub browser: BrowserConfig,
    /// How native dialogs are answered
    pub dialogs: AutoDialogBehavior,
    /// Where reports and failure screenshots go
    pub artifacts_dir: PathBuf,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            credentials: Credentials::default(),
            church: DEMO_CHURCH.to_string(),
            timeouts: Timeouts::default(),
            browser: BrowserConfig::default(),
            dialogs: AutoDialogBehavior::default(),
            artifacts_dir: PathBuf::from("target/chums-e2e"),
        }
    }
}

impl HarnessConfig {
    /// Create new default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a YAML document; missing keys keep their defaults
    pub fn from_yaml_str(yaml: &str) -> HarnessResult<Self> {
        let config: Self = serde_yaml_ng::from_str(yaml)?;
        config.validated()
    }

    /// Read a YAML file
    pub fn from_yaml_file(path: &Path) -> HarnessResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&text)
    }

    /// Defaults or `path`, then the process environment
    pub fn load(path: Option<&Path>) -> HarnessResult<Self> {
        let config = match path {
            Some(path) => Self::from_yaml_file(path)?,
            None => Self::default(),
        };
        config
            .with_env_overrides(|key| std::env::var(key).ok())
            .validated()
    }

    /// Apply `CHUMS_*` overrides read through `lookup`
    #[must_use]
    pub fn with_env_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = lookup("CHUMS_BASE_URL") {
            self.base_url = url;
        }
        if let Some(email) = lookup("CHUMS_EMAIL") {
            self.credentials.email = email;
        }
        if let Some(password) = lookup("CHUMS_PASSWORD") {
            self.credentials.password = password;
        }
        if let Some(church) = lookup("CHUMS_CHURCH") {
            self.church = church;
        }
        if let Some(headless) = lookup("CHUMS_HEADLESS") {
            self.browser.headless = !matches!(
                headless.to_ascii_lowercase().as_str(),
                "0" | "false" | "no" | "off"
            );
        }
        if let Some(path) = lookup("CHROMIUM_PATH") {
            self.browser.chromium_path = Some(path);
        }
        self
    }

    /// Check invariants and normalize the base URL
    pub fn validated(mut self) -> HarnessResult<Self> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(HarnessError::config(format!(
                "base_url must start with http:// or https://, got {:?}",
                self.base_url
            )));
        }
        while self.base_url.ends_with('/') {
            self.base_url.pop();
        }
        if self.church.trim().is_empty() {
            return Err(HarnessError::config("church must not be empty"));
        }
        Ok(self)
    }

    /// Set base URL
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set credentials
    #[must_use]
    pub fn with_credentials(mut self, email: impl Into<String>, password: impl Into<String>) -> Self {
        self.credentials = Credentials {
            email: email.into(),
            password: password.into(),
        };
        self
    }

    /// Set the tenant name
    #[must_use]
    pub fn with_church(mut self, church: impl Into<String>) -> Self {
        self.church = church.into();
        self
    }

    /// Set timeouts
    #[must_use]
    pub const fn with_timeouts(mut self, timeouts: Timeouts) -> Self {
        self.timeouts = timeouts;
        self
    }

    /// Set headless mode
    #[must_use]
    pub const fn with_headless(mut self, headless: bool) -> Self {
        self.browser.headless = headless;
        self
    }

    /// Set artifacts directory
    #[must_use]
    pub fn with_artifacts_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.artifacts_dir = dir.into();
        self
    }

    /// Absolute URL for an in-app path
    #[must_use]
    pub fn url_for(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        if path.starts_with('/') {
            format!("{}{path}", self.base_url)
        } else {
            format!("{}/{path}", self.base_url)
        }
    }

    /// YAML rendering with the password masked
    pub fn to_redacted_yaml(&self) -> HarnessResult<String> {
        let mut shown = self.clone();
        shown.credentials.password = "********".to_string();
        Ok(serde_yaml_ng::to_string(&shown)?)
    }
}
