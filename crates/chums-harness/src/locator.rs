//! Locator abstraction for element selection.
//!
//! A [`Locator`] is a description of how to find elements, never a handle to
//! them. Every action re-evaluates the description against the live DOM, so
//! nothing can go stale between steps.
//!
//! # Design Philosophy
//!
//! - **Lazy**: building a locator touches nothing; drivers evaluate it per call
//! - **Role/Text aware**: select by ARIA role + accessible name or by visible text
//! - **Unions**: `a.or(b)` tolerates markup that differs between environments
//! - **Fluent API**: chainable methods for building selectors

use serde::{Deserialize, Serialize};
use std::fmt;

/// ARIA roles the admin app exposes through its component library
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AriaRole {
    /// Buttons, including submit inputs
    Button,
    /// Anchors with an href
    Link,
    /// Single- or multi-line text inputs
    Textbox,
    /// Checkboxes and MUI switches
    Checkbox,
    /// h1..h6
    Heading,
    /// Modal dialogs
    Dialog,
    /// Table rows
    Row,
    /// Table cells
    Cell,
    /// Data tables
    Table,
    /// Tabs in a tab strip
    Tab,
    /// Selects and autocompletes
    Combobox,
    /// Options inside a listbox
    Option,
    /// Entries in an open menu
    Menuitem,
}

impl AriaRole {
    /// Role name as written in `role="..."`
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Button => "button",
            Self::Link => "link",
            Self::Textbox => "textbox",
            Self::Checkbox => "checkbox",
            Self::Heading => "heading",
            Self::Dialog => "dialog",
            Self::Row => "row",
            Self::Cell => "cell",
            Self::Table => "table",
            Self::Tab => "tab",
            Self::Combobox => "combobox",
            Self::Option => "option",
            Self::Menuitem => "menuitem",
        }
    }

    /// CSS selector covering the implicit and explicit forms of the role
    #[must_use]
    pub const fn css(&self) -> &'static str {
        match self {
            Self::Button => {
                "button, [role='button'], input[type='button'], input[type='submit']"
            }
            Self::Link => "a[href], [role='link']",
            Self::Textbox => {
                "input:not([type]), input[type='text'], input[type='email'], \
                 input[type='password'], input[type='search'], input[type='tel'], \
                 input[type='number'], textarea, [role='textbox']"
            }
            Self::Checkbox => "input[type='checkbox'], [role='checkbox'], [role='switch']",
            Self::Heading => "h1, h2, h3, h4, h5, h6, [role='heading']",
            Self::Dialog => "dialog, [role='dialog']",
            Self::Row => "tr, [role='row']",
            Self::Cell => "td, th, [role='cell'], [role='gridcell']",
            Self::Table => "table, [role='table'], [role='grid']",
            Self::Tab => "[role='tab']",
            Self::Combobox => "select, [role='combobox']",
            Self::Option => "option, [role='option']",
            Self::Menuitem => "[role='menuitem']",
        }
    }
}

impl fmt::Display for AriaRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Selector type for locating elements
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// CSS selector (e.g., "button.primary")
    Css(String),
    /// Deepest element whose text contains the string
    Text(String),
    /// Deepest element whose trimmed text equals the string
    ExactText(String),
    /// Test ID selector (data-testid attribute)
    TestId(String),
    /// ARIA role, optionally narrowed by accessible name
    Role {
        /// Role to match
        role: AriaRole,
        /// Substring of the accessible name
        name: Option<String>,
    },
    /// Combined selector with text filter
    CssWithText {
        /// Base CSS selector
        css: String,
        /// Text content to match
        text: String,
    },
    /// Matches of `base` whose text contains `text`
    Filtered {
        /// Selector being narrowed
        base: Box<Selector>,
        /// Text content to match
        text: String,
    },
    /// Union of selectors, in document order of the first alternative that
    /// matched
    Any(Vec<Selector>),
}

impl Selector {
    /// Create a CSS selector
    #[must_use]
    pub fn css(selector: impl Into<String>) -> Self {
        Self::Css(selector.into())
    }

    /// Create a text selector
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Create an exact-text selector
    #[must_use]
    pub fn exact_text(text: impl Into<String>) -> Self {
        Self::ExactText(text.into())
    }

    /// Create a test ID selector
    #[must_use]
    pub fn test_id(id: impl Into<String>) -> Self {
        Self::TestId(id.into())
    }

    /// Create a role selector
    #[must_use]
    pub fn role(role: AriaRole, name: Option<&str>) -> Self {
        Self::Role {
            role,
            name: name.map(str::to_string),
        }
    }

    /// Narrow to matches whose text contains `text`; unions narrow every
    /// alternative
    #[must_use]
    pub fn with_text(self, text: impl Into<String>) -> Self {
        let text = text.into();
        match self {
            Self::Css(css) => Self::CssWithText { css, text },
            Self::Role { role, name: None } => Self::Role {
                role,
                name: Some(text),
            },
            Self::TestId(id) => Self::CssWithText {
                css: format!("[data-testid=\"{id}\"]"),
                text,
            },
            Self::Any(alternatives) => Self::Any(
                alternatives
                    .into_iter()
                    .map(|alt| alt.with_text(text.clone()))
                    .collect(),
            ),
            base => Self::Filtered {
                base: Box::new(base),
                text,
            },
        }
    }

    /// JavaScript expression evaluating to an array of matching elements
    #[must_use]
    pub fn to_query_all(&self) -> String {
        match self {
            Self::Css(s) => format!("Array.from(document.querySelectorAll({}))", js_str(s)),
            Self::Text(t) => {
                let t = js_str(t);
                format!(
                    "Array.from(document.querySelectorAll('body *')).filter(el => \
                     el.textContent.includes({t}) && \
                     !Array.from(el.children).some(c => c.textContent.includes({t})))"
                )
            }
            Self::ExactText(t) => {
                let t = js_str(t);
                format!(
                    "Array.from(document.querySelectorAll('body *')).filter(el => \
                     el.textContent.trim() === {t} && \
                     !Array.from(el.children).some(c => c.textContent.trim() === {t}))"
                )
            }
            Self::TestId(id) => format!(
                "Array.from(document.querySelectorAll({}))",
                js_str(&format!("[data-testid=\"{id}\"]"))
            ),
            Self::Role { role, name } => {
                let base = format!(
                    "Array.from(document.querySelectorAll({}))",
                    js_str(role.css())
                );
                match name {
                    Some(name) => format!(
                        "{base}.filter(el => ((el.getAttribute('aria-label') || el.textContent \
                         || el.value || el.title || '').trim()).includes({}))",
                        js_str(name)
                    ),
                    None => base,
                }
            }
            Self::CssWithText { css, text } => format!(
                "Array.from(document.querySelectorAll({})).filter(el => el.textContent.includes({}))",
                js_str(css),
                js_str(text)
            ),
            Self::Filtered { base, text } => format!(
                "({}).filter(el => el.textContent.includes({}))",
                base.to_query_all(),
                js_str(text)
            ),
            Self::Any(alternatives) => {
                let parts: Vec<String> = alternatives.iter().map(Self::to_query_all).collect();
                format!("[...new Set([].concat({}))]", parts.join(", "))
            }
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Css(s) => write!(f, "css={s}"),
            Self::Text(t) => write!(f, "text={t:?}"),
            Self::ExactText(t) => write!(f, "exact-text={t:?}"),
            Self::TestId(id) => write!(f, "testid={id}"),
            Self::Role { role, name: None } => write!(f, "role={role}"),
            Self::Role {
                role,
                name: Some(name),
            } => write!(f, "role={role}[name={name:?}]"),
            Self::CssWithText { css, text } => write!(f, "css={css} >> text={text:?}"),
            Self::Filtered { base, text } => write!(f, "{base} >> text={text:?}"),
            Self::Any(alternatives) => {
                let parts: Vec<String> = alternatives.iter().map(ToString::to_string).collect();
                write!(f, "any({})", parts.join(" | "))
            }
        }
    }
}

/// Quote a string as a JavaScript string literal
fn js_str(s: &str) -> String {
    serde_json::to_string(s).unwrap_or_else(|_| String::from("\"\""))
}

/// Locator options for customizing behavior
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocatorOptions {
    /// Restrict to the n-th match (0-based)
    pub nth: Option<usize>,
}

/// A lazily evaluated description of a set of elements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locator {
    selector: Selector,
    options: LocatorOptions,
}

impl Locator {
    /// Create a new locator with a CSS selector
    #[must_use]
    pub fn new(selector: impl Into<String>) -> Self {
        Self::from_selector(Selector::Css(selector.into()))
    }

    /// Create a locator from a selector
    #[must_use]
    pub fn from_selector(selector: Selector) -> Self {
        Self {
            selector,
            options: LocatorOptions::default(),
        }
    }

    /// Locate the deepest element containing `text`
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::from_selector(Selector::text(text))
    }

    /// Locate the deepest element whose text is exactly `text`
    #[must_use]
    pub fn exact_text(text: impl Into<String>) -> Self {
        Self::from_selector(Selector::exact_text(text))
    }

    /// Locate by `data-testid`
    #[must_use]
    pub fn test_id(id: impl Into<String>) -> Self {
        Self::from_selector(Selector::test_id(id))
    }

    /// Locate by ARIA role and accessible name
    #[must_use]
    pub fn role(role: AriaRole, name: &str) -> Self {
        Self::from_selector(Selector::role(role, Some(name)))
    }

    /// Locate every element with an ARIA role
    #[must_use]
    pub fn any_role(role: AriaRole) -> Self {
        Self::from_selector(Selector::role(role, None))
    }

    /// Union of several locators; options of the first are kept
    #[must_use]
    pub fn any_of(locators: impl IntoIterator<Item = Self>) -> Self {
        let mut iter = locators.into_iter();
        let Some(first) = iter.next() else {
            return Self::from_selector(Selector::Any(Vec::new()));
        };
        iter.fold(first, Self::or)
    }

    /// Match either this locator or `other`
    #[must_use]
    pub fn or(self, other: Self) -> Self {
        let mut alternatives = match self.selector {
            Selector::Any(alts) => alts,
            single => vec![single],
        };
        match other.selector {
            Selector::Any(alts) => alternatives.extend(alts),
            single => alternatives.push(single),
        }
        Self {
            selector: Selector::Any(alternatives),
            options: self.options,
        }
    }

    /// Filter by text content
    ///
    /// `Locator::new("button").with_text("Save")`
    #[must_use]
    pub fn with_text(self, text: impl Into<String>) -> Self {
        Self {
            selector: self.selector.with_text(text),
            options: self.options,
        }
    }

    /// Restrict to the first match
    #[must_use]
    pub fn first(self) -> Self {
        self.nth(0)
    }

    /// Restrict to the n-th match (0-based)
    #[must_use]
    pub fn nth(mut self, index: usize) -> Self {
        self.options.nth = Some(index);
        self
    }

    /// Get the selector
    #[must_use]
    pub const fn selector(&self) -> &Selector {
        &self.selector
    }

    /// Get the options
    #[must_use]
    pub const fn options(&self) -> &LocatorOptions {
        &self.options
    }

    /// Human-readable description for logs and errors
    #[must_use]
    pub fn describe(&self) -> String {
        match self.options.nth {
            Some(n) => format!("{} >> nth={n}", self.selector),
            None => self.selector.to_string(),
        }
    }

    /// JavaScript expression for the matched elements, honoring `nth`
    #[must_use]
    pub fn to_query_all(&self) -> String {
        let all = self.selector.to_query_all();
        match self.options.nth {
            Some(n) => format!("({all}).slice({n}, {})", n + 1),
            None => all,
        }
    }

    /// Script returning the number of matches
    #[must_use]
    pub fn count_script(&self) -> String {
        wrap(&format!("return ({}).length;", self.to_query_all()))
    }

    /// Script returning whether any match is rendered and visible
    #[must_use]
    pub fn visible_script(&self) -> String {
        wrap(&format!(
            "return ({}).some(__visible);",
            self.to_query_all()
        ))
    }

    /// Script clicking the first visible match; returns false when none
    #[must_use]
    pub fn click_script(&self) -> String {
        wrap(&format!(
            "const el = __target({}); if (!el) return false; \
             el.scrollIntoView({{block: 'center'}}); el.click(); return true;",
            self.to_query_all()
        ))
    }

    /// Script setting the value of the first visible match the way a user
    /// typing would; returns false when none
    #[must_use]
    pub fn fill_script(&self, value: &str) -> String {
        wrap(&format!(
            "const el = __target({}); if (!el) return false; el.focus(); \
             const proto = el instanceof HTMLTextAreaElement ? HTMLTextAreaElement.prototype \
             : el instanceof HTMLSelectElement ? HTMLSelectElement.prototype \
             : HTMLInputElement.prototype; \
             Object.getOwnPropertyDescriptor(proto, 'value').set.call(el, {}); \
             el.dispatchEvent(new Event('input', {{bubbles: true}})); \
             el.dispatchEvent(new Event('change', {{bubbles: true}})); return true;",
            self.to_query_all(),
            js_str(value)
        ))
    }

    /// Script pressing a key on the first visible match; Enter submits the
    /// enclosing form
    #[must_use]
    pub fn press_script(&self, key: &str) -> String {
        let key = js_str(key);
        wrap(&format!(
            "const el = __target({}); if (!el) return false; el.focus(); \
             for (const type of ['keydown', 'keypress', 'keyup']) {{ \
             el.dispatchEvent(new KeyboardEvent(type, {{key: {key}, bubbles: true}})); }} \
             if ({key} === 'Enter' && el.form) el.form.requestSubmit(); return true;",
            self.to_query_all()
        ))
    }

    /// Script toggling a checkbox into the requested state
    #[must_use]
    pub fn set_checked_script(&self, checked: bool) -> String {
        wrap(&format!(
            "const el = __target({}); if (!el) return false; \
             const input = el.matches('input') ? el : (el.querySelector('input') || el); \
             const current = input.checked ?? (el.getAttribute('aria-checked') === 'true'); \
             if (current !== {checked}) el.click(); return true;",
            self.to_query_all()
        ))
    }

    /// Script returning the trimmed text of every match
    #[must_use]
    pub fn texts_script(&self) -> String {
        wrap(&format!(
            "return ({}).map(el => el.textContent.trim());",
            self.to_query_all()
        ))
    }

    /// Script returning the value of the first match, or null
    #[must_use]
    pub fn value_script(&self) -> String {
        wrap(&format!(
            "const el = __target({}); return el ? (el.value ?? null) : null;",
            self.to_query_all()
        ))
    }
}

impl From<Selector> for Locator {
    fn from(selector: Selector) -> Self {
        Self::from_selector(selector)
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

const PRELUDE: &str = "const __visible = el => { const s = getComputedStyle(el); \
    return s.visibility !== 'hidden' && s.display !== 'none' && \
    !!(el.offsetWidth || el.offsetHeight || el.getClientRects().length); }; \
    const __target = els => els.find(__visible) || null;";

fn wrap(body: &str) -> String {
    format!("(() => {{ {PRELUDE} {body} }})()")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    mod selector_tests {
        use super::*;

        #[test]
        fn test_css_query() {
            let q = Selector::css("table tbody tr").to_query_all();
            assert_eq!(
                q,
                "Array.from(document.querySelectorAll(\"table tbody tr\"))"
            );
        }

        #[test]
        fn test_text_query_prefers_deepest_element() {
            let q = Selector::text("Dorothy Jackson").to_query_all();
            assert!(q.contains("el.textContent.includes(\"Dorothy Jackson\")"));
            assert!(q.contains("el.children"));
        }

        #[test]
        fn test_role_query_with_name() {
            let q = Selector::role(AriaRole::Button, Some("Save")).to_query_all();
            assert!(q.contains("button, [role='button']"));
            assert!(q.contains("aria-label"));
            assert!(q.contains("\"Save\""));
        }

        #[test]
        fn test_role_query_without_name_has_no_filter() {
            let q = Selector::role(AriaRole::Table, None).to_query_all();
            assert!(!q.contains(".filter("));
        }

        #[test]
        fn test_test_id_query() {
            let q = Selector::test_id("add-fund").to_query_all();
            assert!(q.contains("data-testid=\\\"add-fund\\\""));
        }

        #[test]
        fn test_any_query_dedupes() {
            let q = Selector::Any(vec![Selector::css("#a"), Selector::css("#b")]).to_query_all();
            assert!(q.starts_with("[...new Set([].concat("));
            assert!(q.contains("\"#a\""));
            assert!(q.contains("\"#b\""));
        }

        #[test]
        fn test_display() {
            assert_eq!(Selector::css("a").to_string(), "css=a");
            assert_eq!(
                Selector::role(AriaRole::Link, Some("Octavian Fund")).to_string(),
                "role=link[name=\"Octavian Fund\"]"
            );
            assert_eq!(
                Selector::Any(vec![Selector::css("a"), Selector::text("b")]).to_string(),
                "any(css=a | text=\"b\")"
            );
        }
    }

    mod locator_tests {
        use super::*;

        #[test]
        fn test_with_text_on_css() {
            let loc = Locator::new("button").with_text("Save");
            assert_eq!(
                loc.selector(),
                &Selector::CssWithText {
                    css: "button".into(),
                    text: "Save".into()
                }
            );
        }

        #[test]
        fn test_with_text_on_role_sets_name() {
            let loc = Locator::any_role(AriaRole::Link).with_text("Groups");
            assert_eq!(loc.selector(), &Selector::role(AriaRole::Link, Some("Groups")));
        }

        #[test]
        fn test_or_flattens() {
            let loc = Locator::new("#a").or(Locator::new("#b")).or(Locator::text("c"));
            match loc.selector() {
                Selector::Any(alts) => assert_eq!(alts.len(), 3),
                other => panic!("expected union, got {other:?}"),
            }
        }

        #[test]
        fn test_any_of_empty_matches_nothing() {
            let loc = Locator::any_of(Vec::new());
            assert_eq!(loc.selector(), &Selector::Any(Vec::new()));
        }

        #[test]
        fn test_nth_slices_query() {
            let loc = Locator::new("tr").nth(2);
            assert!(loc.to_query_all().ends_with(".slice(2, 3)"));
            assert_eq!(loc.describe(), "css=tr >> nth=2");
        }

        #[test]
        fn test_first_is_nth_zero() {
            assert_eq!(Locator::new("tr").first().options().nth, Some(0));
        }

        #[test]
        fn test_with_text_narrows_every_alternative() {
            let loc = Locator::new("a").or(Locator::new("button")).with_text("Save");
            assert_eq!(
                loc.describe(),
                "any(css=a >> text=\"Save\" | css=button >> text=\"Save\")"
            );
        }

        #[test]
        fn test_with_text_on_text_keeps_both_filters() {
            let loc = Locator::text("Fund").with_text("Octavian");
            assert_eq!(loc.describe(), "text=\"Fund\" >> text=\"Octavian\"");
            let q = loc.to_query_all();
            assert!(q.contains("\"Fund\""));
            assert!(q.contains(".filter(el => el.textContent.includes(\"Octavian\"))"));
        }

        #[test]
        fn test_with_text_on_named_role_keeps_name() {
            let loc = Locator::role(AriaRole::Link, "Funds").with_text("Octavian");
            assert_eq!(
                loc.describe(),
                "role=link[name=\"Funds\"] >> text=\"Octavian\""
            );
        }

        #[test]
        fn test_scripts_are_iife() {
            let loc = Locator::new("#searchText");
            for script in [
                loc.count_script(),
                loc.visible_script(),
                loc.click_script(),
                loc.fill_script("Smith"),
                loc.press_script("Enter"),
                loc.set_checked_script(false),
                loc.texts_script(),
                loc.value_script(),
            ] {
                assert!(script.starts_with("(() => {"));
                assert!(script.ends_with("})()"));
            }
        }

        #[test]
        fn test_fill_script_quotes_value() {
            let script = Locator::new("input").fill_script("O'Brien \"Jr\"");
            assert!(script.contains(r#""O'Brien \"Jr\"""#));
        }
    }

    proptest! {
        #[test]
        fn prop_js_str_round_trips(s in ".*") {
            let quoted = js_str(&s);
            let parsed: String = serde_json::from_str(&quoted).unwrap();
            prop_assert_eq!(parsed, s);
        }

        #[test]
        fn prop_or_keeps_every_alternative(n in 1usize..8) {
            let loc = Locator::any_of((0..n).map(|i| Locator::new(format!("#el{i}"))));
            if n == 1 {
                prop_assert_eq!(loc.selector(), &Selector::css("#el0"));
            } else {
                match loc.selector() {
                    Selector::Any(alts) => prop_assert_eq!(alts.len(), n),
                    _ => prop_assert!(false, "expected union"),
                }
            }
        }
    }
}
