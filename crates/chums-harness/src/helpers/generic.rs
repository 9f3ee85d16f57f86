//! Generic wait and assertion primitives.
//!
//! Nothing here retries on its own account: a wait polls until its timeout,
//! and the `expect_*` functions turn a timed-out wait into
//! [`HarnessError::AssertionFailed`]. These are the only places a scenario
//! hard-fails.

use crate::locator::Locator;
use crate::page::Page;
use crate::page_object::UrlPattern;
use crate::result::{HarnessError, HarnessResult};
use crate::wait::{poll_until, settle, LoadState};
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::debug;

/// Suspend until the network goes quiet after a navigation
pub async fn wait_for_page_load(page: &Page) -> HarnessResult<()> {
    page.driver()
        .wait_for_load_state(LoadState::NetworkIdle, page.config().timeouts.navigation())
        .await
}

/// Navigate to a path and wait for it to load
pub async fn goto_and_wait(page: &Page, path: &str) -> HarnessResult<()> {
    page.goto(path).await?;
    wait_for_page_load(page).await
}

/// Fail unless the current URL matches `pattern` within the assertion
/// timeout
pub async fn expect_url(page: &Page, pattern: &UrlPattern) -> HarnessResult<()> {
    let options = page.wait_options(page.config().timeouts.assertion());
    let waited_for = format!("URL matching {pattern}");
    let result = poll_until(options, &waited_for, || async {
        Ok(pattern.matches(&page.url().await?))
    })
    .await;

    match result {
        Ok(_) => Ok(()),
        Err(e) if e.is_timeout() => {
            let at = page.url().await.unwrap_or_default();
            Err(HarnessError::assertion(format!(
                "expected URL matching {pattern}, still at {at}"
            )))
        }
        Err(e) => Err(e),
    }
}

/// Fill an input, then let the UI settle
pub async fn fill_and_wait(page: &Page, locator: &Locator, value: &str) -> HarnessResult<()> {
    page.fill(locator, value).await?;
    settle(page.config().timeouts.settle()).await;
    Ok(())
}

/// Click, then let the UI settle
pub async fn click_and_wait(page: &Page, locator: &Locator) -> HarnessResult<()> {
    page.click(locator).await?;
    settle(page.config().timeouts.settle()).await;
    Ok(())
}

/// Fail unless the locator becomes visible within the assertion timeout
pub async fn expect_visible(page: &Page, locator: &Locator) -> HarnessResult<()> {
    expect_condition(page, &format!("{} to be visible", locator.describe()), || async {
        page.is_visible(locator).await
    })
    .await
}

/// Fail unless the locator is (or becomes) hidden within the assertion
/// timeout
pub async fn expect_hidden(page: &Page, locator: &Locator) -> HarnessResult<()> {
    expect_condition(page, &format!("{} to be hidden", locator.describe()), || async {
        Ok(!page.is_visible(locator).await?)
    })
    .await
}

/// Fail unless the locator matches exactly `expected` elements
pub async fn expect_count(page: &Page, locator: &Locator, expected: usize) -> HarnessResult<()> {
    let last = AtomicUsize::new(0);
    let waited_for = format!("{} to match {expected} element(s)", locator.describe());
    expect_condition(page, &waited_for, || async {
        let count = page.count(locator).await?;
        last.store(count, Ordering::Relaxed);
        Ok(count == expected)
    })
    .await
    .map_err(|e| match e {
        HarnessError::AssertionFailed { message } => HarnessError::assertion(format!(
            "{message} (found {})",
            last.load(Ordering::Relaxed)
        )),
        other => other,
    })
}

/// Fail unless some match of the locator contains `text`
pub async fn expect_text(page: &Page, locator: &Locator, text: &str) -> HarnessResult<()> {
    let waited_for = format!("{} to contain {text:?}", locator.describe());
    expect_condition(page, &waited_for, || async {
        Ok(page
            .text_contents(locator)
            .await?
            .iter()
            .any(|t| t.contains(text)))
    })
    .await
}

/// Wait for the first of several alternatives to become visible and return
/// its index. Fails only when none shows up within the assertion timeout.
pub async fn expect_any_visible(
    page: &Page,
    candidates: &[&Locator],
    what: &str,
) -> HarnessResult<usize> {
    let hit = AtomicUsize::new(usize::MAX);
    expect_condition(page, what, || async {
        for (i, locator) in candidates.iter().enumerate() {
            if page.find(locator).await.is_some() {
                hit.store(i, Ordering::Relaxed);
                return Ok(true);
            }
        }
        Ok(false)
    })
    .await?;
    let index = hit.load(Ordering::Relaxed);
    debug!(what, index, "alternative visible");
    Ok(index)
}

async fn expect_condition<F, Fut>(page: &Page, waited_for: &str, check: F) -> HarnessResult<()>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = HarnessResult<bool>>,
{
    let options = page.wait_options(page.config().timeouts.assertion());
    match poll_until(options, waited_for, check).await {
        Ok(_) => Ok(()),
        Err(HarnessError::Timeout { ms, waited_for }) => Err(HarnessError::assertion(format!(
            "expected {waited_for} within {ms}ms"
        ))),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::{HarnessConfig, Timeouts};
    use crate::locator::AriaRole;
    use crate::mock::{Access, MockApp, MockDriver, MockElement};
    use std::sync::Arc;

    fn page(app: MockApp) -> Page {
        let config = HarnessConfig::default().with_timeouts(Timeouts::fast());
        Page::new(Arc::new(MockDriver::new(app)), config)
    }

    fn app() -> MockApp {
        MockApp::new()
            .screen("/people", Access::Public, |_| {
                vec![
                    MockElement::new("title").role(AriaRole::Heading).text("People"),
                    MockElement::new("row1").css("table tbody tr").text("Dorothy Jackson"),
                    MockElement::new("row2").css("table tbody tr").text("Carol Clark"),
                    MockElement::new("spinner").css(".spinner").hidden(),
                    MockElement::button("search", "Search").on_click(|s| s.navigate("/groups")),
                ]
            })
            .screen("/groups", Access::Public, |_| Vec::new())
    }

    mod url_tests {
        use super::*;

        #[tokio::test]
        async fn test_expect_url_passes() {
            let page = page(app());
            goto_and_wait(&page, "/people").await.unwrap();
            expect_url(&page, &UrlPattern::exact("/people")).await.unwrap();
        }

        #[tokio::test]
        async fn test_expect_url_is_assertion_failure() {
            let page = page(app());
            goto_and_wait(&page, "/people").await.unwrap();
            let err = expect_url(&page, &UrlPattern::exact("/groups"))
                .await
                .unwrap_err();
            assert!(matches!(err, HarnessError::AssertionFailed { .. }));
            assert!(err.to_string().contains("still at"));
        }

        #[tokio::test]
        async fn test_click_and_wait_follows_navigation() {
            let page = page(app());
            goto_and_wait(&page, "/people").await.unwrap();
            click_and_wait(&page, &Locator::role(AriaRole::Button, "Search"))
                .await
                .unwrap();
            assert_eq!(page.path().await.unwrap(), "/groups");
        }
    }

    mod element_tests {
        use super::*;

        #[tokio::test]
        async fn test_visible_hidden_count_text() {
            let page = page(app());
            goto_and_wait(&page, "/people").await.unwrap();
            expect_visible(&page, &Locator::any_role(AriaRole::Heading))
                .await
                .unwrap();
            expect_hidden(&page, &Locator::new(".spinner")).await.unwrap();
            expect_count(&page, &Locator::new("table tbody tr"), 2)
                .await
                .unwrap();
            expect_text(&page, &Locator::new("table tbody tr"), "Carol")
                .await
                .unwrap();
        }

        #[tokio::test]
        async fn test_expect_count_reports_found() {
            let page = page(app());
            goto_and_wait(&page, "/people").await.unwrap();
            let err = expect_count(&page, &Locator::new("table tbody tr"), 1)
                .await
                .unwrap_err();
            assert!(err.to_string().contains("found 2"));
        }

        #[tokio::test]
        async fn test_expect_any_visible_picks_present_alternative() {
            let page = page(app());
            goto_and_wait(&page, "/people").await.unwrap();
            let table = Locator::new("table");
            let rows = Locator::new("table tbody tr");
            let index = expect_any_visible(&page, &[&table, &rows], "people list")
                .await
                .unwrap();
            assert_eq!(index, 1);
        }

        #[tokio::test]
        async fn test_expect_any_visible_fails_when_nothing_shows() {
            let page = page(app());
            goto_and_wait(&page, "/groups").await.unwrap();
            let table = Locator::new("table");
            let err = expect_any_visible(&page, &[&table], "groups list")
                .await
                .unwrap_err();
            assert!(matches!(err, HarnessError::AssertionFailed { .. }));
        }
    }
}
