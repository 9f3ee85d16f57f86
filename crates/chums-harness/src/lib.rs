//! ChuMS E2E: page-object browser tests for the ChuMS admin app
//!
//! Drives the church-management admin UI (people, groups, donations, forms,
//! plans, settings, tasks, profile, reports, attendance) through a browser
//! and checks each feature end to end.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    CHUMS E2E Architecture                       │
//! ├─────────────────────────────────────────────────────────────────┤
//! │   ┌────────────┐    ┌────────────┐    ┌────────────┐            │
//! │   │ Spec       │    │ Feature    │    │ Page       │            │
//! │   │ catalogue  │───►│ scenarios  │───►│ objects    │            │
//! │   └────────────┘    └────────────┘    └─────┬──────┘            │
//! │         │                                   │                   │
//! │   ┌─────▼──────┐                     ┌──────▼─────┐             │
//! │   │ SpecRunner │                     │ PageDriver │             │
//! │   │ + report   │                     │ CDP / mock │             │
//! │   └────────────┘                     └────────────┘             │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Controls that are missing (optional or permission-gated UI) make page
//! object actions return `Ok(false)`; features bounced to login come back as
//! [`FeatureOutcome::NotAccessible`]. Only `expect_*` assertions fail a
//! spec.
//!
//! ```
//! use chums_harness::prelude::*;
//!
//! let registry = SpecRegistry::catalogue();
//! assert!(registry.suites().contains(&"people"));
//! ```

#![warn(missing_docs)]
#![cfg_attr(test, allow(clippy::large_stack_arrays, clippy::large_stack_frames))]

#[cfg(feature = "browser")]
pub mod browser;
pub mod config;
pub mod context;
pub mod dialog;
pub mod driver;
pub mod features;
pub mod helpers;
pub mod locator;
pub mod mock;
pub mod page;
pub mod page_object;
pub mod pages;
pub mod report;
pub mod result;
pub mod runner;
pub mod simulated;
pub mod specs;
pub mod wait;

#[cfg(feature = "browser")]
pub use browser::{CdpDriver, CdpDriverFactory};
pub use config::{BrowserConfig, Credentials, HarnessConfig, Timeouts};
pub use context::TestContext;
pub use dialog::{AutoDialogBehavior, Dialog, DialogType};
pub use driver::{DriverFactory, PageDriver};
pub use features::{Feature, FeatureOutcome, SearchMode};
pub use locator::{AriaRole, Locator, Selector};
pub use mock::{MockApp, MockDriver, MockDriverFactory};
pub use page::Page;
pub use page_object::{ListScreen, PageObject, ScreenState, UrlPattern};
pub use report::{RunReport, SpecResult, SpecStatus};
pub use result::{HarnessError, HarnessResult};
pub use runner::SpecRunner;
pub use simulated::SimulatedChms;
pub use specs::{SpecCase, SpecRegistry};
pub use wait::{LoadState, WaitOptions};

use std::sync::Once;
use tracing_subscriber::EnvFilter;

/// Default filter when neither an explicit filter nor `RUST_LOG` is given
pub const DEFAULT_LOG_FILTER: &str = "chums_harness=info";

/// Filter directives in order of precedence: `explicit`, then `env`
/// (`RUST_LOG`), then `default`. Blank values are skipped.
#[must_use]
pub fn select_filter(explicit: Option<&str>, env: Option<String>, default: &str) -> String {
    explicit
        .map(str::to_string)
        .or(env)
        .filter(|directives| !directives.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Install a stderr `tracing` subscriber. An `explicit` filter wins over
/// `RUST_LOG`, which wins over `default_filter`. Later calls, and calls
/// after another subscriber was installed, do nothing.
pub fn init_tracing(explicit: Option<&str>, default_filter: &str) {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let env = std::env::var(EnvFilter::DEFAULT_ENV).ok();
        let directives = select_filter(explicit, env, default_filter);
        let filter = EnvFilter::try_new(&directives).unwrap_or_else(|_| EnvFilter::new(default_filter));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    });
}

/// Everything a spec author needs
pub mod prelude {
    pub use super::context::TestContext;
    pub use super::features::{run_feature, Feature, FeatureOutcome, SearchMode};
    pub use super::helpers::*;
    pub use super::locator::{AriaRole, Locator};
    pub use super::page::Page;
    pub use super::page_object::{ListScreen, PageObject, UrlPattern};
    pub use super::pages::*;
    pub use super::result::{HarnessError, HarnessResult};
    pub use super::specs::{SpecCase, SpecRegistry};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_tracing_is_idempotent() {
        init_tracing(None, DEFAULT_LOG_FILTER);
        init_tracing(Some("debug"), DEFAULT_LOG_FILTER);
    }

    #[test]
    fn test_explicit_filter_beats_rust_log() {
        let filter = select_filter(Some("chums_harness=error"), Some("debug".into()), DEFAULT_LOG_FILTER);
        assert_eq!(filter, "chums_harness=error");
    }

    #[test]
    fn test_rust_log_beats_default() {
        assert_eq!(select_filter(None, Some("trace".into()), DEFAULT_LOG_FILTER), "trace");
    }

    #[test]
    fn test_default_when_nothing_given() {
        assert_eq!(select_filter(None, None, DEFAULT_LOG_FILTER), DEFAULT_LOG_FILTER);
        assert_eq!(select_filter(None, Some("  ".into()), DEFAULT_LOG_FILTER), DEFAULT_LOG_FILTER);
    }
}
