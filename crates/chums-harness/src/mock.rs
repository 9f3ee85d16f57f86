//! In-process scripted application for exercising page objects without a
//! browser.
//!
//! A [`MockApp`] is a set of screens keyed by route. Each screen renders a
//! flat list of [`MockElement`]s from the current [`MockState`] every time
//! the driver queries it, so the "DOM" is always live. Elements carry the
//! CSS strings, role, text and test id they answer to, plus optional click
//! and Enter handlers that mutate the state (navigate, store records,
//! raise a confirm dialog, ...).
//!
//! [`MockDriver`] implements [`PageDriver`] over one such app with its own
//! state, so every driver is an isolated session.

use crate::config::DEFAULT_BASE_URL;
use crate::dialog::{AutoDialogBehavior, Dialog, DialogType};
use crate::driver::{DriverFactory, PageDriver};
use crate::helpers::auth::LOGIN_PATH;
use crate::locator::{AriaRole, Locator, Selector};
use crate::page_object::{path_of, UrlPattern};
use crate::result::{HarnessError, HarnessResult};
use crate::wait::LoadState;
use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

/// Eight-byte PNG signature returned as the mock screenshot
pub const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// State mutation triggered by an element
pub type MockAction = Arc<dyn Fn(&mut MockState) + Send + Sync>;

/// Screen renderer
pub type RenderFn = Arc<dyn Fn(&MockState) -> Vec<MockElement> + Send + Sync>;

/// Who may see a screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Anyone
    Public,
    /// Signed-in sessions only; others go to login
    Authenticated,
    /// Nobody: always bounces to login, like a feature the demo account
    /// has no permission for
    Forbidden,
}

/// A rendered element
#[derive(Clone)]
pub struct MockElement {
    key: String,
    css: Vec<String>,
    test_id: Option<String>,
    role: Option<AriaRole>,
    text: String,
    label: Option<String>,
    visible: bool,
    value: Option<String>,
    checked: Option<bool>,
    on_click: Option<MockAction>,
    on_enter: Option<MockAction>,
}

impl MockElement {
    /// Bare visible element; `key` identifies it for stored values
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            css: Vec::new(),
            test_id: None,
            role: None,
            text: String::new(),
            label: None,
            visible: true,
            value: None,
            checked: None,
            on_click: None,
            on_enter: None,
        }
    }

    /// `<button>` with a label
    #[must_use]
    pub fn button(key: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(key).css("button").role(AriaRole::Button).text(text)
    }

    /// Material icon button, e.g. `edit_square`
    #[must_use]
    pub fn icon_button(key: impl Into<String>, glyph: &str) -> Self {
        Self::button(key, glyph)
    }

    /// `<a href>` that navigates when clicked
    #[must_use]
    pub fn link(key: impl Into<String>, text: impl Into<String>, href: &str) -> Self {
        let target = href.to_string();
        Self::new(key)
            .css("a")
            .css(format!("a[href='{href}']"))
            .role(AriaRole::Link)
            .text(text)
            .on_click(move |s| s.navigate(&target))
    }

    /// `<input name>`
    #[must_use]
    pub fn input(name: &str) -> Self {
        Self::new(name)
            .css("input")
            .css(format!("input[name='{name}']"))
            .role(AriaRole::Textbox)
            .value("")
    }

    /// `<input type=checkbox name>`
    #[must_use]
    pub fn checkbox(name: &str, checked: bool) -> Self {
        Self::new(name)
            .css("input[type='checkbox']")
            .css(format!("input[name='{name}']"))
            .role(AriaRole::Checkbox)
            .checked(checked)
    }

    /// Add a CSS selector this element answers to
    #[must_use]
    pub fn css(mut self, selector: impl Into<String>) -> Self {
        self.css.push(selector.into());
        self
    }

    /// Set `data-testid`
    #[must_use]
    pub fn test_id(mut self, id: impl Into<String>) -> Self {
        self.test_id = Some(id.into());
        self
    }

    /// Set the ARIA role
    #[must_use]
    pub const fn role(mut self, role: AriaRole) -> Self {
        self.role = Some(role);
        self
    }

    /// Set the text content
    #[must_use]
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Set `aria-label`
    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Render but hide
    #[must_use]
    pub const fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    /// Initial value
    #[must_use]
    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Initial checked state
    #[must_use]
    pub const fn checked(mut self, checked: bool) -> Self {
        self.checked = Some(checked);
        self
    }

    /// Click handler
    #[must_use]
    pub fn on_click(mut self, action: impl Fn(&mut MockState) + Send + Sync + 'static) -> Self {
        self.on_click = Some(Arc::new(action));
        self
    }

    /// Enter-key handler
    #[must_use]
    pub fn on_enter(mut self, action: impl Fn(&mut MockState) + Send + Sync + 'static) -> Self {
        self.on_enter = Some(Arc::new(action));
        self
    }

    /// Element key
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Text content
    #[must_use]
    pub fn text_content(&self) -> &str {
        &self.text
    }

    fn matches(&self, selector: &Selector) -> bool {
        match selector {
            Selector::Css(css) => self.matches_css(css),
            Selector::Text(text) => self.text.contains(text.as_str()),
            Selector::ExactText(text) => self.text.trim() == text,
            Selector::TestId(id) => self.test_id.as_deref() == Some(id.as_str()),
            Selector::Role { role, name } => {
                self.role == Some(*role)
                    && name.as_deref().map_or(true, |name| {
                        self.label.as_deref().unwrap_or(&self.text).contains(name)
                    })
            }
            Selector::CssWithText { css, text } => {
                self.matches_css(css) && self.text.contains(text.as_str())
            }
            Selector::Filtered { base, text } => {
                self.matches(base) && self.text.contains(text.as_str())
            }
            Selector::Any(alternatives) => alternatives.iter().any(|alt| self.matches(alt)),
        }
    }

    fn matches_css(&self, css: &str) -> bool {
        css.split(',')
            .map(str::trim)
            .any(|part| self.css.iter().any(|c| c == part))
    }
}

impl std::fmt::Debug for MockElement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockElement")
            .field("key", &self.key)
            .field("css", &self.css)
            .field("role", &self.role)
            .field("text", &self.text)
            .field("visible", &self.visible)
            .finish_non_exhaustive()
    }
}

/// A stored entity (person, group, fund, ...)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockRecord {
    /// Identifier used in URLs
    pub id: String,
    /// Display name
    pub name: String,
    /// Free-form attributes
    pub fields: BTreeMap<String, String>,
}

impl MockRecord {
    /// Record with no attributes
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            fields: BTreeMap::new(),
        }
    }

    /// Set an attribute
    #[must_use]
    pub fn with(mut self, field: &str, value: impl Into<String>) -> Self {
        let _ = self.fields.insert(field.to_string(), value.into());
        self
    }

    /// Read an attribute
    #[must_use]
    pub fn field(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }
}

struct MockScreen {
    pattern: UrlPattern,
    access: Access,
    render: RenderFn,
}

/// A scripted application
#[derive(Clone)]
pub struct MockApp {
    base_url: String,
    screens: Vec<Arc<MockScreen>>,
    seed: Vec<MockAction>,
}

impl Default for MockApp {
    fn default() -> Self {
        Self::new()
    }
}

impl MockApp {
    /// Empty app served at the default base URL
    #[must_use]
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            screens: Vec::new(),
            seed: Vec::new(),
        }
    }

    /// Serve from a different origin
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Add a screen at a route (`/groups/:id`). Earlier screens win.
    #[must_use]
    pub fn screen(
        mut self,
        route: impl Into<String>,
        access: Access,
        render: impl Fn(&MockState) -> Vec<MockElement> + Send + Sync + 'static,
    ) -> Self {
        self.screens.push(Arc::new(MockScreen {
            pattern: UrlPattern::route(route),
            access,
            render: Arc::new(render),
        }));
        self
    }

    /// Change the access rule of every screen whose route matches `path`
    #[must_use]
    pub fn restrict(mut self, path: &str, access: Access) -> Self {
        self.screens = self
            .screens
            .into_iter()
            .map(|screen| {
                if screen.pattern.matches(path) {
                    Arc::new(MockScreen {
                        pattern: screen.pattern.clone(),
                        access,
                        render: Arc::clone(&screen.render),
                    })
                } else {
                    screen
                }
            })
            .collect();
        self
    }

    /// Run once against every fresh session
    #[must_use]
    pub fn seed(mut self, action: impl Fn(&mut MockState) + Send + Sync + 'static) -> Self {
        self.seed.push(Arc::new(action));
        self
    }

    /// Origin the app is served from
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn screen_for(&self, path: &str) -> Option<Arc<MockScreen>> {
        self.screens
            .iter()
            .find(|s| s.pattern.matches(path))
            .map(Arc::clone)
    }
}

impl std::fmt::Debug for MockApp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockApp")
            .field("base_url", &self.base_url)
            .field("screens", &self.screens.len())
            .finish_non_exhaustive()
    }
}

/// Session state of one mock driver
pub struct MockState {
    app: MockApp,
    path: String,
    params: HashMap<String, String>,
    authenticated: bool,
    values: HashMap<String, String>,
    checked: HashMap<String, bool>,
    flags: HashSet<String>,
    tables: BTreeMap<String, Vec<MockRecord>>,
    next_id: u64,
    dialog_behavior: AutoDialogBehavior,
    dialogs: Vec<Dialog>,
    visits: Vec<String>,
}

impl MockState {
    fn new(app: MockApp, dialogs: AutoDialogBehavior) -> Self {
        let seed = app.seed.clone();
        let mut state = Self {
            app,
            path: "about:blank".to_string(),
            params: HashMap::new(),
            authenticated: false,
            values: HashMap::new(),
            checked: HashMap::new(),
            flags: HashSet::new(),
            tables: BTreeMap::new(),
            next_id: 100,
            dialog_behavior: dialogs,
            dialogs: Vec::new(),
            visits: Vec::new(),
        };
        for action in &seed {
            action(&mut state);
        }
        state
    }

    /// Current path (with query)
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Route parameter of the current screen
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    /// Go to a path, applying the screen's access rule. Form values and
    /// transient flags do not survive navigation.
    pub fn navigate(&mut self, path: &str) {
        let requested = path_of(path).to_string();
        let screen = self.app.screen_for(&requested);
        let allowed = match screen.as_ref().map(|s| s.access) {
            Some(Access::Public) | None => true,
            Some(Access::Authenticated) => self.authenticated,
            Some(Access::Forbidden) => false,
        };

        self.path = if allowed {
            path.to_string()
        } else {
            format!("{LOGIN_PATH}?returnUrl={}", requested.replace('/', "%2F"))
        };
        self.params = self
            .app
            .screen_for(path_of(&self.path))
            .map(|s| s.pattern.extract_params(&self.path))
            .unwrap_or_default();
        self.values.clear();
        self.checked.clear();
        self.flags.retain(|f| f.starts_with('@'));
        self.visits.push(self.path.clone());
    }

    /// Mark the session signed in
    pub fn authenticate(&mut self) {
        self.authenticated = true;
    }

    /// Whether the session is signed in
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    /// Value typed into an element
    #[must_use]
    pub fn value(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Value typed into an element, or empty
    #[must_use]
    pub fn value_or_empty(&self, key: &str) -> String {
        self.value(key).unwrap_or_default().to_string()
    }

    /// Checked state set on an element, if it was toggled
    #[must_use]
    pub fn is_checked(&self, key: &str) -> Option<bool> {
        self.checked.get(key).copied()
    }

    /// Whether a flag is set. Flags starting with `@` survive navigation.
    #[must_use]
    pub fn flag(&self, name: &str) -> bool {
        self.flags.contains(name)
    }

    /// Set or clear a flag
    pub fn set_flag(&mut self, name: &str, on: bool) {
        if on {
            let _ = self.flags.insert(name.to_string());
        } else {
            let _ = self.flags.remove(name);
        }
    }

    /// Records of a table
    #[must_use]
    pub fn records(&self, table: &str) -> &[MockRecord] {
        self.tables.get(table).map(Vec::as_slice).unwrap_or(&[])
    }

    /// A record by id
    #[must_use]
    pub fn record(&self, table: &str, id: &str) -> Option<&MockRecord> {
        self.records(table).iter().find(|r| r.id == id)
    }

    /// Store a record as-is
    pub fn put(&mut self, table: &str, record: MockRecord) {
        self.tables.entry(table.to_string()).or_default().push(record);
    }

    /// Store a new record with a generated id (`{prefix}00000101`) and
    /// return the id
    pub fn insert(&mut self, table: &str, prefix: &str, record: MockRecord) -> String {
        self.next_id += 1;
        let id = format!("{prefix}{:08}", self.next_id);
        self.put(table, MockRecord { id: id.clone(), ..record });
        id
    }

    /// Mutate a record in place; false when it does not exist
    pub fn update(&mut self, table: &str, id: &str, change: impl FnOnce(&mut MockRecord)) -> bool {
        match self
            .tables
            .get_mut(table)
            .and_then(|rows| rows.iter_mut().find(|r| r.id == id))
        {
            Some(record) => {
                change(record);
                true
            }
            None => false,
        }
    }

    /// Remove a record; false when it does not exist
    pub fn remove(&mut self, table: &str, id: &str) -> bool {
        let Some(rows) = self.tables.get_mut(table) else {
            return false;
        };
        let before = rows.len();
        rows.retain(|r| r.id != id);
        rows.len() != before
    }

    /// Raise a native confirm dialog and return the answer
    pub fn confirm(&mut self, message: &str) -> bool {
        let dialog = self.dialog_behavior.answer(DialogType::Confirm, message);
        let accepted = dialog.is_accepted();
        self.dialogs.push(dialog);
        accepted
    }

    /// Every path the session landed on, in order
    #[must_use]
    pub fn visits(&self) -> &[String] {
        &self.visits
    }

    fn render(&self) -> Vec<MockElement> {
        let Some(screen) = self.app.screen_for(path_of(&self.path)) else {
            return Vec::new();
        };
        let mut elements = (screen.render)(self);
        for element in &mut elements {
            if let Some(value) = self.values.get(&element.key) {
                element.value = Some(value.clone());
            }
            if let Some(checked) = self.checked.get(&element.key) {
                element.checked = Some(*checked);
            }
        }
        elements
    }
}

impl std::fmt::Debug for MockState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockState")
            .field("path", &self.path)
            .field("authenticated", &self.authenticated)
            .field("tables", &self.tables.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

fn matching(elements: Vec<MockElement>, locator: &Locator) -> Vec<MockElement> {
    let matched = elements
        .into_iter()
        .filter(|e| e.matches(locator.selector()));
    match locator.options().nth {
        Some(n) => matched.skip(n).take(1).collect(),
        None => matched.collect(),
    }
}

/// Driver over a [`MockApp`]
pub struct MockDriver {
    state: Mutex<MockState>,
    closed: AtomicBool,
}

impl MockDriver {
    /// Fresh signed-out session
    #[must_use]
    pub fn new(app: MockApp) -> Self {
        Self::with_dialogs(app, AutoDialogBehavior::AcceptAll)
    }

    /// Fresh session answering dialogs with `behavior`
    #[must_use]
    pub fn with_dialogs(app: MockApp, behavior: AutoDialogBehavior) -> Self {
        Self {
            state: Mutex::new(MockState::new(app, behavior)),
            closed: AtomicBool::new(false),
        }
    }

    /// Inspect the session state
    pub fn inspect<R>(&self, f: impl FnOnce(&MockState) -> R) -> R {
        f(&self.lock())
    }

    /// Whether `close` was called
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn ensure_open(&self) -> HarnessResult<()> {
        if self.is_closed() {
            return Err(HarnessError::PageError {
                message: "page is closed".to_string(),
            });
        }
        Ok(())
    }

    fn target(&self, state: &MockState, locator: &Locator) -> HarnessResult<MockElement> {
        matching(state.render(), locator)
            .into_iter()
            .find(|e| e.visible)
            .ok_or_else(|| HarnessError::ElementNotFound {
                selector: locator.describe(),
            })
    }
}

impl std::fmt::Debug for MockDriver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockDriver")
            .field("state", &*self.lock())
            .field("closed", &self.is_closed())
            .finish()
    }
}

#[async_trait]
impl PageDriver for MockDriver {
    async fn goto(&self, url: &str) -> HarnessResult<()> {
        self.ensure_open()?;
        let mut state = self.lock();
        let base = state.app.base_url.clone();
        let path = url.strip_prefix(base.as_str()).unwrap_or(url);
        if path.contains("://") {
            return Err(HarnessError::NavigationError {
                url: url.to_string(),
                message: format!("outside {base}"),
            });
        }
        let path = if path.is_empty() { "/" } else { path };
        state.navigate(path);
        Ok(())
    }

    async fn current_url(&self) -> HarnessResult<String> {
        self.ensure_open()?;
        let state = self.lock();
        Ok(format!("{}{}", state.app.base_url, state.path))
    }

    async fn wait_for_load_state(&self, _state: LoadState, _timeout: Duration) -> HarnessResult<()> {
        self.ensure_open()
    }

    async fn count(&self, locator: &Locator) -> HarnessResult<usize> {
        self.ensure_open()?;
        Ok(matching(self.lock().render(), locator).len())
    }

    async fn is_visible(&self, locator: &Locator) -> HarnessResult<bool> {
        self.ensure_open()?;
        Ok(matching(self.lock().render(), locator)
            .iter()
            .any(|e| e.visible))
    }

    async fn click(&self, locator: &Locator) -> HarnessResult<()> {
        self.ensure_open()?;
        let mut state = self.lock();
        let element = self.target(&state, locator)?;
        if let Some(checked) = element.checked {
            let _ = state.checked.insert(element.key.clone(), !checked);
        }
        if let Some(action) = element.on_click {
            action(&mut state);
        }
        Ok(())
    }

    async fn fill(&self, locator: &Locator, value: &str) -> HarnessResult<()> {
        self.ensure_open()?;
        let mut state = self.lock();
        let element = self.target(&state, locator)?;
        let _ = state.values.insert(element.key, value.to_string());
        Ok(())
    }

    async fn press(&self, locator: &Locator, key: &str) -> HarnessResult<()> {
        self.ensure_open()?;
        let mut state = self.lock();
        let element = self.target(&state, locator)?;
        if key == "Enter" {
            if let Some(action) = element.on_enter {
                action(&mut state);
            }
        }
        Ok(())
    }

    async fn set_checked(&self, locator: &Locator, checked: bool) -> HarnessResult<()> {
        self.ensure_open()?;
        let mut state = self.lock();
        let element = self.target(&state, locator)?;
        let _ = state.checked.insert(element.key, checked);
        Ok(())
    }

    async fn text_contents(&self, locator: &Locator) -> HarnessResult<Vec<String>> {
        self.ensure_open()?;
        Ok(matching(self.lock().render(), locator)
            .into_iter()
            .map(|e| e.text.trim().to_string())
            .collect())
    }

    async fn input_value(&self, locator: &Locator) -> HarnessResult<Option<String>> {
        self.ensure_open()?;
        Ok(matching(self.lock().render(), locator)
            .into_iter()
            .next()
            .and_then(|e| e.value))
    }

    async fn dialogs(&self) -> HarnessResult<Vec<Dialog>> {
        Ok(self.lock().dialogs.clone())
    }

    async fn screenshot(&self) -> HarnessResult<Vec<u8>> {
        self.ensure_open()?;
        Ok(PNG_SIGNATURE.to_vec())
    }

    async fn close(&self) -> HarnessResult<()> {
        self.closed.store(true, Ordering::SeqCst);
        Ok(())
    }
}

/// Hands out isolated [`MockDriver`] sessions over one app
#[derive(Debug, Clone)]
pub struct MockDriverFactory {
    app: MockApp,
    dialogs: AutoDialogBehavior,
}

impl MockDriverFactory {
    /// Factory over `app`
    #[must_use]
    pub fn new(app: MockApp) -> Self {
        Self {
            app,
            dialogs: AutoDialogBehavior::AcceptAll,
        }
    }

    /// Answer dialogs with `behavior`
    #[must_use]
    pub const fn with_dialogs(mut self, behavior: AutoDialogBehavior) -> Self {
        self.dialogs = behavior;
        self
    }
}

#[async_trait]
impl DriverFactory for MockDriverFactory {
    async fn new_driver(&self) -> HarnessResult<Arc<dyn PageDriver>> {
        Ok(Arc::new(MockDriver::with_dialogs(self.app.clone(), self.dialogs)))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn app() -> MockApp {
        MockApp::new()
            .screen("/login", Access::Public, |_| {
                vec![MockElement::button("signin", "Sign In").on_click(|s| {
                    s.authenticate();
                    s.navigate("/");
                })]
            })
            .screen("/", Access::Authenticated, |_| {
                vec![MockElement::link("nav-funds", "Funds", "/donations/funds")]
            })
            .screen("/donations/funds", Access::Authenticated, |s| {
                let mut els = vec![
                    MockElement::input("fundName"),
                    MockElement::checkbox("taxDeductible", true),
                    MockElement::button("save", "Save").on_click(|s| {
                        let name = s.value_or_empty("fundName");
                        let _ = s.insert("funds", "FUN", MockRecord::new("", name));
                    }),
                ];
                for fund in s.records("funds") {
                    els.push(
                        MockElement::button(format!("del-{}", fund.id), "Delete").on_click({
                            let id = fund.id.clone();
                            move |s| {
                                if s.confirm("Are you sure you wish to delete this fund?") {
                                    let _ = s.remove("funds", &id);
                                }
                            }
                        }),
                    );
                    els.push(MockElement::link(
                        format!("fund-{}", fund.id),
                        fund.name.clone(),
                        &format!("/donations/funds/{}", fund.id),
                    ));
                }
                els
            })
            .screen("/groups/:id", Access::Forbidden, |_| Vec::new())
    }

    async fn signed_in(driver: &MockDriver) {
        driver.goto("http://localhost:3000/login").await.unwrap();
        driver
            .click(&Locator::role(AriaRole::Button, "Sign In"))
            .await
            .unwrap();
    }

    mod navigation_tests {
        use super::*;

        #[tokio::test]
        async fn test_authenticated_screen_redirects_to_login() {
            let driver = MockDriver::new(app());
            driver.goto("http://localhost:3000/donations/funds").await.unwrap();
            let url = driver.current_url().await.unwrap();
            assert_eq!(url, "http://localhost:3000/login?returnUrl=%2Fdonations%2Ffunds");
        }

        #[tokio::test]
        async fn test_sign_in_then_navigate() {
            let driver = MockDriver::new(app());
            signed_in(&driver).await;
            assert_eq!(driver.current_url().await.unwrap(), "http://localhost:3000/");
            driver
                .click(&Locator::role(AriaRole::Link, "Funds"))
                .await
                .unwrap();
            assert!(driver.current_url().await.unwrap().ends_with("/donations/funds"));
        }

        #[tokio::test]
        async fn test_forbidden_even_when_signed_in() {
            let driver = MockDriver::new(app());
            signed_in(&driver).await;
            driver.goto("http://localhost:3000/groups/GRP1").await.unwrap();
            assert!(driver.current_url().await.unwrap().contains("/login"));
        }

        #[tokio::test]
        async fn test_foreign_origin_rejected() {
            let driver = MockDriver::new(app());
            let err = driver.goto("https://example.com/").await.unwrap_err();
            assert!(matches!(err, HarnessError::NavigationError { .. }));
        }

        #[tokio::test]
        async fn test_route_params() {
            let app = MockApp::new().screen("/people/:id", Access::Public, |s| {
                vec![MockElement::new("id").text(s.param("id").unwrap_or_default())]
            });
            let driver = MockDriver::new(app);
            driver.goto("http://localhost:3000/people/PER7").await.unwrap();
            let texts = driver.text_contents(&Locator::exact_text("PER7")).await.unwrap();
            assert_eq!(texts, vec!["PER7".to_string()]);
        }
    }

    mod element_tests {
        use super::*;

        #[tokio::test]
        async fn test_fill_then_create_record() {
            let driver = MockDriver::new(app());
            signed_in(&driver).await;
            driver.goto("http://localhost:3000/donations/funds").await.unwrap();
            driver
                .fill(&Locator::new("input[name='fundName']"), "Octavian Fund")
                .await
                .unwrap();
            assert_eq!(
                driver
                    .input_value(&Locator::new("input[name='fundName']"))
                    .await
                    .unwrap(),
                Some("Octavian Fund".to_string())
            );
            driver.click(&Locator::new("button").with_text("Save")).await.unwrap();
            let links = Locator::new("a").with_text("Octavian Fund");
            assert_eq!(driver.count(&links).await.unwrap(), 1);
        }

        #[tokio::test]
        async fn test_text_filter_narrows_unions_and_text_locators() {
            let driver = MockDriver::new(app());
            signed_in(&driver).await;
            driver.goto("http://localhost:3000/donations/funds").await.unwrap();
            driver
                .fill(&Locator::new("input[name='fundName']"), "Octavian Fund")
                .await
                .unwrap();
            driver.click(&Locator::new("button").with_text("Save")).await.unwrap();

            let union = Locator::new("a").or(Locator::new("button")).with_text("Octavian");
            assert_eq!(driver.count(&union).await.unwrap(), 1);
            let narrowed = Locator::text("Fund").with_text("Octavian");
            assert_eq!(driver.count(&narrowed).await.unwrap(), 1);
            let none = Locator::text("Fund").with_text("Caesar");
            assert_eq!(driver.count(&none).await.unwrap(), 0);
        }

        #[tokio::test]
        async fn test_checkbox_click_toggles() {
            let driver = MockDriver::new(app());
            signed_in(&driver).await;
            driver.goto("http://localhost:3000/donations/funds").await.unwrap();
            let checkbox = Locator::new("input[name='taxDeductible']");
            driver.click(&checkbox).await.unwrap();
            assert_eq!(driver.inspect(|s| s.is_checked("taxDeductible")), Some(false));
            driver.set_checked(&checkbox, true).await.unwrap();
            assert_eq!(driver.inspect(|s| s.is_checked("taxDeductible")), Some(true));
        }

        #[tokio::test]
        async fn test_confirm_dialog_recorded() {
            let driver = MockDriver::new(app());
            signed_in(&driver).await;
            driver.goto("http://localhost:3000/donations/funds").await.unwrap();
            driver
                .fill(&Locator::new("input[name='fundName']"), "Temp")
                .await
                .unwrap();
            driver.click(&Locator::new("button").with_text("Save")).await.unwrap();
            driver
                .click(&Locator::new("button").with_text("Delete"))
                .await
                .unwrap();
            let dialogs = driver.dialogs().await.unwrap();
            assert_eq!(dialogs.len(), 1);
            assert!(dialogs[0].is_accepted());
            assert_eq!(driver.inspect(|s| s.records("funds").len()), 0);
        }

        #[tokio::test]
        async fn test_dismissed_confirm_keeps_record() {
            let driver = MockDriver::with_dialogs(app(), AutoDialogBehavior::DismissAll);
            signed_in(&driver).await;
            driver.goto("http://localhost:3000/donations/funds").await.unwrap();
            driver
                .fill(&Locator::new("input[name='fundName']"), "Temp")
                .await
                .unwrap();
            driver.click(&Locator::new("button").with_text("Save")).await.unwrap();
            driver
                .click(&Locator::new("button").with_text("Delete"))
                .await
                .unwrap();
            assert_eq!(driver.inspect(|s| s.records("funds").len()), 1);
            let dialogs = driver.dialogs().await.unwrap();
            assert_eq!(dialogs.len(), 1);
            assert!(!dialogs[0].is_accepted());
            assert!(dialogs[0].message().contains("delete this fund"));
        }

        #[tokio::test]
        async fn test_missing_element_is_not_found() {
            let driver = MockDriver::new(app());
            driver.goto("http://localhost:3000/login").await.unwrap();
            let err = driver.click(&Locator::new("#nope")).await.unwrap_err();
            assert!(matches!(err, HarnessError::ElementNotFound { .. }));
            assert!(!driver.is_visible(&Locator::new("#nope")).await.unwrap());
        }

        #[tokio::test]
        async fn test_nth() {
            let app = MockApp::new().screen("/", Access::Public, |_| {
                vec![
                    MockElement::new("a").css("li").text("one"),
                    MockElement::new("b").css("li").text("two"),
                ]
            });
            let driver = MockDriver::new(app);
            driver.goto("http://localhost:3000/").await.unwrap();
            let second = Locator::new("li").nth(1);
            assert_eq!(driver.text_contents(&second).await.unwrap(), vec!["two".to_string()]);
        }

        #[tokio::test]
        async fn test_closed_driver_errors() {
            let driver = MockDriver::new(app());
            driver.close().await.unwrap();
            assert!(driver.is_closed());
            assert!(driver.current_url().await.is_err());
        }
    }

    mod factory_tests {
        use super::*;

        #[tokio::test]
        async fn test_sessions_are_isolated() {
            let factory = MockDriverFactory::new(app());
            let first = factory.new_driver().await.unwrap();
            let second = factory.new_driver().await.unwrap();
            first.goto("http://localhost:3000/login").await.unwrap();
            first
                .click(&Locator::role(AriaRole::Button, "Sign In"))
                .await
                .unwrap();
            second.goto("http://localhost:3000/donations/funds").await.unwrap();
            assert!(second.current_url().await.unwrap().contains("/login"));
        }

        #[tokio::test]
        async fn test_seed_runs_per_session() {
            let app = app().seed(|s| s.put("funds", MockRecord::new("FUN1", "General Fund")));
            let driver = MockDriver::new(app);
            assert_eq!(driver.inspect(|s| s.records("funds").len()), 1);
        }
    }
}
