//! PageDriver - Abstract Browser Automation Trait
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  PageDriver (Abstract Trait)                                      │
//! ├───────────────────────────────────────────────────────────────────┤
//! │  ┌─────────────────────────┐      ┌─────────────────────────────┐ │
//! │  │  CdpDriver              │      │  MockDriver                 │ │
//! │  │  (feature = "browser")  │      │  (unit + harness tests)     │ │
//! │  │  chromiumoxide over CDP │      │  scripted in-process app    │ │
//! │  └─────────────────────────┘      └─────────────────────────────┘ │
//! └───────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every method takes `&self`: one driver belongs to one test flow, and the
//! flow is sequential, so implementations only need interior mutability for
//! bookkeeping.

use crate::dialog::Dialog;
use crate::locator::Locator;
use crate::result::HarnessResult;
use crate::wait::LoadState;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

/// Abstract driver trait for browser automation
#[async_trait]
pub trait PageDriver: Send + Sync {
    /// Navigate to an absolute URL
    async fn goto(&self, url: &str) -> HarnessResult<()>;

    /// Get the current absolute URL
    async fn current_url(&self) -> HarnessResult<String>;

    /// Suspend until the page reaches `state`, or time out
    async fn wait_for_load_state(&self, state: LoadState, timeout: Duration)
        -> HarnessResult<()>;

    /// Number of elements the locator currently matches
    async fn count(&self, locator: &Locator) -> HarnessResult<usize>;

    /// Whether any match is rendered and visible
    async fn is_visible(&self, locator: &Locator) -> HarnessResult<bool>;

    /// Click the first visible match
    async fn click(&self, locator: &Locator) -> HarnessResult<()>;

    /// Replace the value of the first visible match
    async fn fill(&self, locator: &Locator, value: &str) -> HarnessResult<()>;

    /// Press a key on the first visible match
    async fn press(&self, locator: &Locator, key: &str) -> HarnessResult<()>;

    /// Put a checkbox or switch into the given state
    async fn set_checked(&self, locator: &Locator, checked: bool) -> HarnessResult<()>;

    /// Trimmed text of every match
    async fn text_contents(&self, locator: &Locator) -> HarnessResult<Vec<String>>;

    /// Value of the first match, if it has one
    async fn input_value(&self, locator: &Locator) -> HarnessResult<Option<String>>;

    /// Dialogs raised (and answered) so far
    async fn dialogs(&self) -> HarnessResult<Vec<Dialog>>;

    /// PNG screenshot of the viewport
    async fn screenshot(&self) -> HarnessResult<Vec<u8>>;

    /// Close the page
    async fn close(&self) -> HarnessResult<()>;
}

/// Creates an isolated page per spec
#[async_trait]
pub trait DriverFactory: Send + Sync {
    /// Open a fresh page with its own session
    async fn new_driver(&self) -> HarnessResult<Arc<dyn PageDriver>>;

    /// Release shared resources (e.g. the browser process)
    async fn shutdown(&self) -> HarnessResult<()> {
        Ok(())
    }
}
