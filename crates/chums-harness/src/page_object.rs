//! Page Object Model support.
//!
//! Every admin screen gets a page object: a [`Page`] handle plus the fixed
//! locator vocabulary for that screen. Page objects hold no data of their
//! own; every read goes back to the live DOM.
//!
//! Screens move through an implicit lifecycle, made explicit here as
//! [`ScreenState`]:
//!
//! ```text
//! Unvisited ──▶ Loading ──┬──▶ LoadedWithData
//!                         ├──▶ LoadedEmpty
//!                         └──▶ RedirectedToLogin
//! ```
//!
//! List screens implement [`ListScreen`] and treat both loaded states as
//! success.

use crate::helpers::auth::is_login_url;
use crate::helpers::generic;
use crate::locator::Locator;
use crate::page::Page;
use crate::result::HarnessResult;
use async_trait::async_trait;
use std::collections::HashMap;

/// Strip scheme, host, query and fragment from a URL, leaving its path.
///
/// Relative input is returned as-is (minus query and fragment); an empty
/// path is reported as `/`.
#[must_use]
pub fn path_of(url: &str) -> &str {
    let rest = match url.find("://") {
        Some(i) => {
            let after = &url[i + 3..];
            match after.find('/') {
                Some(j) => &after[j..],
                None => "",
            }
        }
        None => url,
    };
    let end = rest.find(['?', '#']).unwrap_or(rest.len());
    let path = &rest[..end];
    if path.is_empty() {
        "/"
    } else {
        path
    }
}

/// URL pattern for matching where the browser currently is.
///
/// `Exact`, `Prefix`, `Route` and `Regex` look at the path only;
/// `Contains` looks at the whole URL, query string included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UrlPattern {
    /// Exact path match
    Exact(String),
    /// Path prefix match
    Prefix(String),
    /// URL contains substring
    Contains(String),
    /// Regex search on the path
    Regex(String),
    /// Segment route: literals, `*` wildcards and `:name` parameters
    /// (`/groups/:id`). Each wildcard or parameter consumes one segment.
    Route(String),
    /// Match any URL
    Any,
}

impl UrlPattern {
    /// Exact path
    #[must_use]
    pub fn exact(path: impl Into<String>) -> Self {
        Self::Exact(path.into())
    }

    /// Path prefix
    #[must_use]
    pub fn prefix(path: impl Into<String>) -> Self {
        Self::Prefix(path.into())
    }

    /// Regex on the path
    #[must_use]
    pub fn regex(pattern: impl Into<String>) -> Self {
        Self::Regex(pattern.into())
    }

    /// Segment route
    #[must_use]
    pub fn route(pattern: impl Into<String>) -> Self {
        Self::Route(pattern.into())
    }

    /// Check if a URL matches this pattern
    #[must_use]
    pub fn matches(&self, url: &str) -> bool {
        let path = path_of(url);
        match self {
            Self::Exact(pattern) => trim_slash(path) == trim_slash(pattern),
            Self::Prefix(pattern) => path.starts_with(pattern.as_str()),
            Self::Contains(pattern) => url.contains(pattern.as_str()),
            Self::Regex(pattern) => regex::Regex::new(pattern)
                .map(|re| re.is_match(path))
                .unwrap_or(false),
            Self::Route(pattern) => route_params(pattern, path).is_some(),
            Self::Any => true,
        }
    }

    /// Named parameters captured by a `Route` pattern; empty for other
    /// variants or when the URL does not match
    #[must_use]
    pub fn extract_params(&self, url: &str) -> HashMap<String, String> {
        match self {
            Self::Route(pattern) => route_params(pattern, path_of(url)).unwrap_or_default(),
            _ => HashMap::new(),
        }
    }
}

impl std::fmt::Display for UrlPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Exact(p) => write!(f, "{p}"),
            Self::Prefix(p) => write!(f, "{p}*"),
            Self::Contains(p) => write!(f, "*{p}*"),
            Self::Regex(p) => write!(f, "/{p}/"),
            Self::Route(p) => write!(f, "{p}"),
            Self::Any => write!(f, "*"),
        }
    }
}

fn trim_slash(path: &str) -> &str {
    match path.trim_end_matches('/') {
        "" => "/",
        trimmed => trimmed,
    }
}

fn route_params(pattern: &str, path: &str) -> Option<HashMap<String, String>> {
    let expected: Vec<&str> = pattern.split('/').filter(|s| !s.is_empty()).collect();
    let actual: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    if expected.len() != actual.len() {
        return None;
    }

    let mut params = HashMap::new();
    for (want, got) in expected.iter().zip(&actual) {
        if *want == "*" {
            continue;
        }
        if let Some(name) = want.strip_prefix(':') {
            let _ = params.insert(name.to_string(), (*got).to_string());
        } else if want != got {
            return None;
        }
    }
    Some(params)
}

/// Where a screen is in its load lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScreenState {
    /// The browser is somewhere else
    Unvisited,
    /// On the screen's URL, nothing recognisable rendered yet
    Loading,
    /// Rendered with content
    LoadedWithData,
    /// Rendered its empty-state message
    LoadedEmpty,
    /// Bounced to the login screen
    RedirectedToLogin,
}

impl ScreenState {
    /// Whether the screen finished loading (with or without data)
    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        matches!(self, Self::LoadedWithData | Self::LoadedEmpty)
    }
}

/// A screen of the admin app
#[async_trait]
pub trait PageObject: Send + Sync {
    /// The page this object drives
    fn page(&self) -> &Page;

    /// Where the screen lives
    fn url_pattern(&self) -> UrlPattern;

    /// Name for logs
    fn page_name(&self) -> &'static str;

    /// Something that is visible once the screen has rendered
    fn ready_marker(&self) -> Option<&Locator> {
        None
    }

    /// Fail unless the browser reaches this screen within the assertion
    /// timeout
    async fn expect_to_be_on_page(&self) -> HarnessResult<()> {
        generic::expect_url(self.page(), &self.url_pattern()).await
    }

    /// Where the screen is in its lifecycle right now
    async fn state(&self) -> HarnessResult<ScreenState> {
        let url = self.page().url().await?;
        if self.url_pattern().matches(&url) {
            let rendered = match self.ready_marker() {
                Some(marker) => self.page().find(marker).await.is_some(),
                None => true,
            };
            return Ok(if rendered {
                ScreenState::LoadedWithData
            } else {
                ScreenState::Loading
            });
        }
        if is_login_url(&url) {
            return Ok(ScreenState::RedirectedToLogin);
        }
        Ok(ScreenState::Unvisited)
    }
}

/// A screen whose main content is a table that may legitimately be empty
#[async_trait]
pub trait ListScreen: PageObject {
    /// The data table
    fn table(&self) -> &Locator;

    /// One locator matching every data row
    fn rows(&self) -> &Locator;

    /// The message shown instead of the table when there are no records
    fn empty_state(&self) -> &Locator;

    /// Fail unless either the table or the empty-state message shows up
    /// within the assertion timeout
    async fn expect_displayed(&self) -> HarnessResult<()> {
        let what = format!("{} table or empty state", self.page_name());
        generic::expect_any_visible(self.page(), &[self.table(), self.empty_state()], &what)
            .await
            .map(|_| ())
    }

    /// Whether the table (rather than the empty state) is showing
    async fn has_data(&self) -> bool {
        self.page().find(self.table()).await.is_some()
    }

    /// Number of data rows currently rendered
    async fn row_count(&self) -> HarnessResult<usize> {
        self.page().count(self.rows()).await
    }

    /// Lifecycle state, distinguishing empty from populated
    async fn list_state(&self) -> HarnessResult<ScreenState> {
        let state = self.state().await?;
        if state != ScreenState::LoadedWithData {
            return Ok(state);
        }
        if self.page().find(self.table()).await.is_some() {
            Ok(ScreenState::LoadedWithData)
        } else if self.page().find(self.empty_state()).await.is_some() {
            Ok(ScreenState::LoadedEmpty)
        } else {
            Ok(ScreenState::Loading)
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    mod path_tests {
        use super::*;

        #[test]
        fn test_strips_origin_query_and_fragment() {
            assert_eq!(path_of("http://localhost:3000/people/PER1?x=1#top"), "/people/PER1");
        }

        #[test]
        fn test_bare_origin_is_root() {
            assert_eq!(path_of("https://app.chums.org"), "/");
        }

        #[test]
        fn test_relative_passthrough() {
            assert_eq!(path_of("/groups/GRP1"), "/groups/GRP1");
        }
    }

    mod url_pattern_tests {
        use super::*;

        #[test]
        fn test_exact_ignores_trailing_slash() {
            let pattern = UrlPattern::exact("/people");
            assert!(pattern.matches("http://localhost:3000/people/"));
            assert!(!pattern.matches("http://localhost:3000/people/PER1"));
        }

        #[test]
        fn test_prefix() {
            assert!(UrlPattern::prefix("/login").matches("http://h/login?returnUrl=%2Fgroups"));
        }

        #[test]
        fn test_contains_sees_query() {
            let pattern = UrlPattern::Contains("returnUrl".to_string());
            assert!(pattern.matches("http://h/login?returnUrl=%2Fgroups"));
        }

        #[test]
        fn test_regex_person_path() {
            let pattern = UrlPattern::regex(r"^/people/PER\d+$");
            assert!(pattern.matches("http://localhost:3000/people/PER00000082"));
            assert!(!pattern.matches("http://localhost:3000/people"));
        }

        #[test]
        fn test_invalid_regex_never_matches() {
            assert!(!UrlPattern::regex("(").matches("http://h/("));
        }

        #[test]
        fn test_route_params() {
            let pattern = UrlPattern::route("/plans/ministries/:id");
            assert!(pattern.matches("http://h/plans/ministries/MIN1"));
            assert!(!pattern.matches("http://h/plans/ministries"));
            let params = pattern.extract_params("http://h/plans/ministries/MIN1");
            assert_eq!(params.get("id"), Some(&"MIN1".to_string()));
        }

        #[test]
        fn test_route_wildcard() {
            assert!(UrlPattern::route("/reports/*").matches("http://h/reports/birthdays"));
        }

        #[test]
        fn test_display() {
            assert_eq!(UrlPattern::prefix("/login").to_string(), "/login*");
        }
    }

    mod screen_state_tests {
        use super::*;

        #[test]
        fn test_both_loaded_states_count() {
            assert!(ScreenState::LoadedWithData.is_loaded());
            assert!(ScreenState::LoadedEmpty.is_loaded());
            assert!(!ScreenState::RedirectedToLogin.is_loaded());
            assert!(!ScreenState::Loading.is_loaded());
        }
    }

    proptest! {
        #[test]
        fn prop_route_param_roundtrip(id in "[A-Za-z0-9]{1,12}") {
            let pattern = UrlPattern::route("/groups/:id");
            let url = format!("http://localhost:3000/groups/{id}");
            prop_assert!(pattern.matches(&url));
            prop_assert_eq!(pattern.extract_params(&url).get("id").cloned(), Some(id));
        }

        #[test]
        fn prop_path_of_never_contains_query(path in "/[a-z/]{0,20}", query in "[a-z=&]{0,10}") {
            let url = format!("http://h{path}?{query}");
            prop_assert!(!path_of(&url).contains('?'));
        }
    }
}
