//! Wait mechanisms.
//!
//! The admin app renders asynchronously after every navigation and every
//! API round trip, so the harness never acts on the DOM without first waiting
//! for it to settle. All waits here are bounded; running out of time is the
//! only way a stuck wait ends.

use crate::result::{HarnessError, HarnessResult};
use std::future::Future;
use std::time::{Duration, Instant};

/// Default timeout for wait operations (30 seconds)
pub const DEFAULT_WAIT_TIMEOUT_MS: u64 = 30_000;

/// Default polling interval (100ms)
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 100;

/// Network idle threshold (500ms without new requests)
pub const NETWORK_IDLE_THRESHOLD_MS: u64 = 500;

/// Page load states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LoadState {
    /// Wait for the `load` event to fire
    #[default]
    Load,
    /// Wait for `DOMContentLoaded` event
    DomContentLoaded,
    /// Wait for network to be idle (no requests for 500ms)
    NetworkIdle,
}

impl LoadState {
    /// Get the event name for this load state
    #[must_use]
    pub const fn event_name(&self) -> &'static str {
        match self {
            Self::Load => "load",
            Self::DomContentLoaded => "DOMContentLoaded",
            Self::NetworkIdle => "networkidle",
        }
    }

    /// Script returning whether the state has been reached. For
    /// `NetworkIdle` the script resolves once no resource entry has been
    /// added for [`NETWORK_IDLE_THRESHOLD_MS`].
    #[must_use]
    pub fn check_script(&self) -> String {
        match self {
            Self::Load => "document.readyState === 'complete'".to_string(),
            Self::DomContentLoaded => "document.readyState !== 'loading'".to_string(),
            Self::NetworkIdle => format!(
                "new Promise(resolve => {{ \
                 if (document.readyState !== 'complete') {{ resolve(false); return; }} \
                 const before = performance.getEntriesByType('resource').length; \
                 setTimeout(() => resolve(performance.getEntriesByType('resource').length === before), {NETWORK_IDLE_THRESHOLD_MS}); }})"
            ),
        }
    }
}

impl std::fmt::Display for LoadState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.event_name())
    }
}

/// Options for wait operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitOptions {
    /// Timeout in milliseconds
    pub timeout_ms: u64,
    /// Polling interval in milliseconds
    pub poll_interval_ms: u64,
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_WAIT_TIMEOUT_MS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }
}

impl WaitOptions {
    /// Create new wait options with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set timeout in milliseconds
    #[must_use]
    pub const fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Set polling interval in milliseconds
    #[must_use]
    pub const fn with_poll_interval(mut self, poll_interval_ms: u64) -> Self {
        self.poll_interval_ms = poll_interval_ms;
        self
    }

    /// Get timeout as Duration
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Get poll interval as Duration
    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

/// Result of a successful wait
#[derive(Debug, Clone)]
pub struct WaitResult {
    /// How long the wait took
    pub elapsed: Duration,
    /// Number of checks made
    pub attempts: usize,
    /// What was waited for
    pub waited_for: String,
}

/// Poll an async condition until it holds or the timeout expires.
///
/// The condition is always checked at least once, even with a zero timeout.
/// A check that errors counts as "not yet"; if the wait times out, the last
/// such error is folded into the timeout message.
pub async fn poll_until<F, Fut>(
    options: WaitOptions,
    waited_for: &str,
    mut check: F,
) -> HarnessResult<WaitResult>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = HarnessResult<bool>>,
{
    let start = Instant::now();
    let mut attempts = 0;
    let mut last_error: Option<String> = None;

    loop {
        attempts += 1;
        match check().await {
            Ok(true) => {
                return Ok(WaitResult {
                    elapsed: start.elapsed(),
                    attempts,
                    waited_for: waited_for.to_string(),
                });
            }
            Ok(false) => {}
            Err(e) => last_error = Some(e.to_string()),
        }

        if start.elapsed() >= options.timeout() {
            let waited_for = match last_error {
                Some(e) => format!("{waited_for} (last error: {e})"),
                None => waited_for.to_string(),
            };
            return Err(HarnessError::timeout(options.timeout_ms, waited_for));
        }

        tokio::time::sleep(options.poll_interval()).await;
    }
}

/// Yield for a fixed delay so reactive UI updates can land
pub async fn settle(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    mod load_state_tests {
        use super::*;

        #[test]
        fn test_default_is_load() {
            assert_eq!(LoadState::default(), LoadState::Load);
        }

        #[test]
        fn test_display() {
            assert_eq!(LoadState::NetworkIdle.to_string(), "networkidle");
        }

        #[test]
        fn test_network_idle_check_uses_threshold() {
            let script = LoadState::NetworkIdle.check_script();
            assert!(script.contains("500"));
            assert!(script.contains("getEntriesByType('resource')"));
        }
    }

    mod wait_options_tests {
        use super::*;

        #[test]
        fn test_builder() {
            let opts = WaitOptions::new().with_timeout(250).with_poll_interval(10);
            assert_eq!(opts.timeout(), Duration::from_millis(250));
            assert_eq!(opts.poll_interval(), Duration::from_millis(10));
        }
    }

    mod poll_tests {
        use super::*;

        #[tokio::test]
        async fn test_immediate_success() {
            let result = poll_until(WaitOptions::new().with_timeout(0), "always", || async {
                Ok(true)
            })
            .await
            .unwrap();
            assert_eq!(result.attempts, 1);
        }

        #[tokio::test]
        async fn test_eventual_success() {
            let calls = Arc::new(AtomicUsize::new(0));
            let counter = Arc::clone(&calls);
            let result = poll_until(
                WaitOptions::new().with_timeout(2_000).with_poll_interval(5),
                "third call",
                move || {
                    let counter = Arc::clone(&counter);
                    async move { Ok(counter.fetch_add(1, Ordering::SeqCst) >= 2) }
                },
            )
            .await
            .unwrap();
            assert_eq!(result.attempts, 3);
        }

        #[tokio::test]
        async fn test_timeout_carries_last_error() {
            let err = poll_until(
                WaitOptions::new().with_timeout(30).with_poll_interval(5),
                "never",
                || async { Err(HarnessError::script("boom")) },
            )
            .await
            .unwrap_err();
            assert!(err.is_timeout());
            assert!(err.to_string().contains("boom"));
        }

        #[tokio::test]
        async fn test_settle_zero_returns() {
            settle(Duration::ZERO).await;
        }
    }
}
