//! A simulated ChMS admin app for running specs without a browser.
//!
//! [`SimulatedChms`] builds a [`MockApp`] whose screens render the same
//! selectors, roles and labels the page objects look for: sign-in with the
//! church picker, the dashboard search widget, and the list/detail screens
//! of every feature. State lives per session, so each spec starts from the
//! same seed data.
//!
//! ```
//! use chums_harness::simulated::SimulatedChms;
//!
//! let app = SimulatedChms::new().forbid("/groups").app();
//! assert_eq!(app.base_url(), "http://localhost:3000");
//! ```

use crate::config::{Credentials, DEFAULT_BASE_URL, DEMO_CHURCH};
use crate::helpers::auth::LOGIN_PATH;
use crate::locator::AriaRole;
use crate::mock::{Access, MockApp, MockDriverFactory, MockElement, MockRecord, MockState};
use crate::pages::css;

/// Id of the seeded person the dashboard search spec looks for
pub const SEED_PERSON_ID: &str = "PER00000082";

/// Report keys the catalogue offers
pub const REPORTS: [(&str, &str); 2] = [("birthdays", "Birthdays"), ("attendanceTrend", "Attendance Trend")];

/// Permissions listed on every role
pub const PERMISSIONS: [&str; 3] = ["Edit People", "Edit Groups", "View Donations"];

const PEOPLE: &str = "people";
const GROUPS: &str = "groups";
const BATCHES: &str = "batches";
const FUNDS: &str = "funds";
const FORMS: &str = "forms";
const MINISTRIES: &str = "ministries";
const PLANS: &str = "plans";
const ROLES: &str = "roles";
const TASKS: &str = "tasks";
const AUTOMATIONS: &str = "automations";
const DEVICES: &str = "devices";
const REPORT_TABLE: &str = "reports";
const CAMPUSES: &str = "campuses";
const ACCOUNT: &str = "account";

/// Builder for the simulated app
#[derive(Debug, Clone)]
pub struct SimulatedChms {
    base_url: String,
    credentials: Credentials,
    churches: Vec<String>,
    seeded: bool,
    forbidden: Vec<String>,
}

impl Default for SimulatedChms {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulatedChms {
    /// Demo data, demo credentials, every feature accessible
    #[must_use]
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            credentials: Credentials::default(),
            churches: vec![DEMO_CHURCH.to_string(), "First Baptist Church".to_string()],
            seeded: true,
            forbidden: Vec::new(),
        }
    }

    /// No records anywhere: every list screen shows its empty state
    #[must_use]
    pub fn empty(mut self) -> Self {
        self.seeded = false;
        self
    }

    /// Serve from another origin
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Accept a different account
    #[must_use]
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = credentials;
        self
    }

    /// Churches offered in the picker
    #[must_use]
    pub fn with_churches(mut self, churches: &[&str]) -> Self {
        self.churches = churches.iter().map(ToString::to_string).collect();
        self
    }

    /// Bounce every visit to `path` to login, even when signed in
    #[must_use]
    pub fn forbid(mut self, path: impl Into<String>) -> Self {
        self.forbidden.push(path.into());
        self
    }

    /// Driver factory handing out isolated sessions
    #[must_use]
    pub fn factory(&self) -> MockDriverFactory {
        MockDriverFactory::new(self.app())
    }

    /// Build the app
    #[must_use]
    pub fn app(&self) -> MockApp {
        let credentials = self.credentials.clone();
        let churches = self.churches.clone();
        let email = self.credentials.email.clone();
        let seeded = self.seeded;

        let mut app = MockApp::new()
            .with_base_url(self.base_url.clone())
            .seed(move |s| seed(s, seeded, &email))
            .screen(LOGIN_PATH, Access::Public, move |s| login_screen(s, &credentials, &churches))
            .screen("/", Access::Authenticated, dashboard_screen)
            .screen("/people", Access::Authenticated, people_screen)
            .screen("/people/:id", Access::Authenticated, person_screen)
            .screen("/groups", Access::Authenticated, groups_screen)
            .screen("/groups/:id", Access::Authenticated, group_screen)
            .screen("/donations", Access::Authenticated, batches_screen)
            .screen("/donations/funds", Access::Authenticated, funds_screen)
            .screen("/donations/funds/:id", Access::Authenticated, |s| {
                detail_screen(s, FUNDS, "Fund")
            })
            .screen("/donations/:id", Access::Authenticated, |s| {
                detail_screen(s, BATCHES, "Batch")
            })
            .screen("/forms", Access::Authenticated, forms_screen)
            .screen("/forms/:id", Access::Authenticated, form_screen)
            .screen("/plans", Access::Authenticated, ministries_screen)
            .screen("/plans/ministries/:id", Access::Authenticated, ministry_screen)
            .screen("/plans/:id", Access::Authenticated, plan_screen)
            .screen("/settings", Access::Authenticated, settings_screen)
            .screen("/settings/role/:id", Access::Authenticated, role_screen)
            .screen("/tasks", Access::Authenticated, tasks_screen)
            .screen("/tasks/automations", Access::Authenticated, automations_screen)
            .screen("/tasks/automations/:id", Access::Authenticated, |s| {
                detail_screen(s, AUTOMATIONS, "Automation")
            })
            .screen("/tasks/:id", Access::Authenticated, |s| detail_screen(s, TASKS, "Task"))
            .screen("/profile", Access::Authenticated, profile_screen)
            .screen("/profile/devices", Access::Authenticated, devices_screen)
            .screen("/reports", Access::Authenticated, reports_screen)
            .screen("/reports/:key", Access::Authenticated, report_screen)
            .screen("/attendance", Access::Authenticated, attendance_screen);

        for path in &self.forbidden {
            app = app.restrict(path, Access::Forbidden);
        }
        app
    }
}

fn seed(s: &mut MockState, seeded: bool, email: &str) {
    s.put(
        ACCOUNT,
        MockRecord::new("me", "Demo User")
            .with("firstName", "Demo")
            .with("lastName", "User")
            .with("email", email),
    );
    if !seeded {
        return;
    }

    for (id, name, household) in [
        (SEED_PERSON_ID, "Dorothy Jackson", "HH1"),
        ("PER00000083", "Harold Jackson", "HH1"),
        ("PER00000084", "John Smith", "HH2"),
        ("PER00000085", "Mary Smith", "HH2"),
    ] {
        s.put(PEOPLE, MockRecord::new(id, name).with("household", household));
    }
    s.put(
        GROUPS,
        MockRecord::new("GRP00000001", "Youth Group")
            .with("category", "Youth")
            .with("members", "PER00000084"),
    );
    s.put(
        GROUPS,
        MockRecord::new("GRP00000002", "Men's Bible Study").with("category", "Adults"),
    );
    s.put(BATCHES, MockRecord::new("BAT00000001", "Sunday Offering"));
    s.put(FUNDS, MockRecord::new("FUN00000001", "General Fund").with("taxDeductible", "true"));
    s.put(FUNDS, MockRecord::new("FUN00000002", "Building Fund").with("taxDeductible", "true"));
    s.put(FORMS, MockRecord::new("FRM00000001", "Visitor Card"));
    s.put(FORMS, MockRecord::new("FRM00000002", "Old Survey").with("archived", "true"));
    s.put(MINISTRIES, MockRecord::new("MIN00000001", "Worship"));
    s.put(
        PLANS,
        MockRecord::new("PLN00000001", "Easter Sunday").with("ministry", "MIN00000001"),
    );
    s.put(ROLES, MockRecord::new("ROL00000001", "Church Admin").with("members", SEED_PERSON_ID));
    s.put(TASKS, MockRecord::new("TSK00000001", "Call new visitors").with("status", "open"));
    s.put(TASKS, MockRecord::new("TSK00000002", "Order bulletins").with("status", "closed"));
    s.put(CAMPUSES, MockRecord::new("CMP00000001", "Main Campus"));
    for (key, title) in REPORTS {
        s.put(REPORT_TABLE, MockRecord::new(key, title));
    }
    s.put(
        "report_rows:birthdays",
        MockRecord::new("R1", "Dorothy Jackson - March 3"),
    );
}

fn set_flag(flag: &str) -> impl Fn(&mut MockState) + Send + Sync + 'static {
    let flag = flag.to_string();
    move |s| s.set_flag(&flag, true)
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.trim().to_lowercase())
}

fn heading(text: &str) -> MockElement {
    MockElement::new("heading").css("h1").role(AriaRole::Heading).text(text)
}

fn tab(label: &str) -> MockElement {
    MockElement::new(format!("tab-{label}"))
        .css("[role='tab']")
        .role(AriaRole::Tab)
        .text(label)
        .on_click(set_flag(&format!("tab:{label}")))
}

fn nav(key: &str, text: &str, href: &str) -> MockElement {
    MockElement::link(format!("nav-{key}"), text, href)
}

/// Table with one linked row per record, or the empty-state message
fn linked_rows(
    records: &[MockRecord],
    href: impl Fn(&MockRecord) -> String,
    link_css: &[&str],
    empty: &str,
) -> Vec<MockElement> {
    if records.is_empty() {
        return vec![MockElement::new("empty").css("p").text(empty)];
    }
    let mut elements = vec![MockElement::new("table").css(css::TABLE).role(AriaRole::Table)];
    for record in records {
        elements.push(
            MockElement::new(format!("row-{}", record.id))
                .css(css::ROWS)
                .role(AriaRole::Row),
        );
        let link = link_css.iter().fold(
            MockElement::link(format!("link-{}", record.id), record.name.clone(), &href(record))
                .css(css::ROW_LINKS),
            |link, extra| link.css(*extra),
        );
        elements.push(link);
    }
    elements
}

/// Search input (`name`) with its button; both submit
fn search_box(name: &str) -> Vec<MockElement> {
    let flag = format!("searched:{name}");
    vec![
        MockElement::input(name)
            .css(format!("#{name}"))
            .on_enter(set_flag(&flag)),
        MockElement::button(format!("search-{name}"), "Search").on_click(set_flag(&flag)),
    ]
}

/// Submitted search term of the box called `name`
fn search_term(s: &MockState, name: &str) -> Option<String> {
    s.flag(&format!("searched:{name}"))
        .then(|| s.value_or_empty(name))
}

/// "Add ..." button revealing a one-field editor that saves a new record
fn add_one(
    s: &MockState,
    label: &str,
    field: &str,
    table: &str,
    prefix: &'static str,
    extra: &[(&str, &str)],
) -> Vec<MockElement> {
    let flag = format!("adding:{field}");
    let mut elements = vec![MockElement::button(format!("add-{field}"), label).on_click(set_flag(&flag))];
    if !s.flag(&flag) {
        return elements;
    }

    let field_key = field.to_string();
    let table = table.to_string();
    let extra: Vec<(String, String)> = extra
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect();
    elements.push(MockElement::input(field));
    elements.push(MockElement::button(format!("save-{field}"), "Save").on_click(move |s| {
        let name = s.value_or_empty(&field_key).trim().to_string();
        if !name.is_empty() {
            let record = extra
                .iter()
                .fold(MockRecord::new("", name), |r, (k, v)| r.with(k, v.clone()));
            let _ = s.insert(&table, prefix, record);
        }
        s.set_flag(&flag, false);
    }));
    elements
}

fn delete_button(table: &str, id: &str, what: &str, then: &str) -> MockElement {
    let (table, id, then) = (table.to_string(), id.to_string(), then.to_string());
    let message = format!("Are you sure you wish to delete this {what}?");
    MockElement::button(format!("delete-{id}"), "Delete").on_click(move |s| {
        if s.confirm(&message) {
            let _ = s.remove(&table, &id);
            s.navigate(&then);
        }
    })
}

fn rename_button(table: &str, id: &str, field: &str, flag: &str) -> MockElement {
    let (table, id, field, flag) = (table.to_string(), id.to_string(), field.to_string(), flag.to_string());
    MockElement::button(format!("save-{field}"), "Save").on_click(move |s| {
        let name = s.value_or_empty(&field).trim().to_string();
        if !name.is_empty() {
            let _ = s.update(&table, &id, |r| r.name = name);
        }
        s.set_flag(&flag, false);
    })
}

fn member_ids(record: &MockRecord) -> Vec<String> {
    record
        .field("members")
        .unwrap_or_default()
        .split(',')
        .filter(|id| !id.is_empty())
        .map(ToString::to_string)
        .collect()
}

fn change_members(s: &mut MockState, table: &str, id: &str, change: impl FnOnce(&mut Vec<String>)) {
    let _ = s.update(table, id, |record| {
        let mut ids = member_ids(record);
        change(&mut ids);
        let _ = record.fields.insert("members".to_string(), ids.join(","));
    });
}

/// Member rows under `box_id`, a remove icon per member, and a person
/// search whose results carry `pick_label` buttons
fn members_panel(s: &MockState, table: &str, id: &str, box_id: &str, pick_label: &str) -> Vec<MockElement> {
    let Some(record) = s.record(table, id) else {
        return Vec::new();
    };
    let mut elements = Vec::new();
    for member in member_ids(record) {
        let name = s
            .record(PEOPLE, &member)
            .map_or_else(|| member.clone(), |p| p.name.clone());
        elements.push(
            MockElement::new(format!("member-{member}"))
                .css(format!("#{box_id} tbody tr"))
                .role(AriaRole::Row)
                .text(name),
        );
        let (table, id) = (table.to_string(), id.to_string());
        elements.push(
            MockElement::icon_button(format!("remove-{member}"), "person_remove").on_click(move |s| {
                change_members(s, &table, &id, |ids| ids.retain(|m| *m != member));
            }),
        );
    }

    if let Some(term) = search_term(s, "personAddText") {
        for person in s.records(PEOPLE).iter().filter(|p| contains_ci(&p.name, &term)) {
            let (table, id, pid) = (table.to_string(), id.to_string(), person.id.clone());
            elements.push(
                MockElement::button(format!("pick-{pid}"), pick_label)
                    .label(format!("{pick_label} {}", person.name))
                    .on_click(move |s| {
                        change_members(s, &table, &id, |ids| {
                            if !ids.contains(&pid) {
                                ids.push(pid.clone());
                            }
                        });
                        s.set_flag("searched:personAddText", false);
                    }),
            );
        }
    }
    elements
}

fn login_screen(s: &MockState, credentials: &Credentials, churches: &[String]) -> Vec<MockElement> {
    let expected = credentials.clone();
    let mut elements = vec![
        MockElement::input("email").css("input[type='email']"),
        MockElement::input("password").css("input[type='password']"),
        MockElement::button("signin", "Sign In")
            .css("button[type='submit']")
            .on_click(move |s| {
                let ok = s.value("email") == Some(expected.email.as_str())
                    && s.value("password") == Some(expected.password.as_str());
                s.set_flag("church_modal", ok);
                s.set_flag("login_error", !ok);
            }),
    ];
    if s.flag("login_error") {
        elements.push(
            MockElement::new("login-error")
                .css("[role='alert']")
                .text("Invalid email or password"),
        );
    }
    if s.flag("church_modal") {
        elements.push(
            MockElement::new("church-modal")
                .css("[role='dialog']")
                .role(AriaRole::Dialog)
                .label("Select a Church")
                .text("Select a Church"),
        );
        for church in churches {
            elements.push(
                MockElement::new(format!("church-{church}"))
                    .css("a")
                    .role(AriaRole::Link)
                    .text(church.clone())
                    .on_click(|s| {
                        s.authenticate();
                        s.navigate("/");
                    }),
            );
        }
    }
    elements
}

fn dashboard_screen(s: &MockState) -> Vec<MockElement> {
    let mut elements = vec![
        heading("Dashboard"),
        nav("people", "People", "/people"),
        nav("groups", "Groups", "/groups"),
        nav("donations", "Donations", "/donations"),
        nav("forms", "Forms", "/forms"),
        nav("plans", "Plans", "/plans"),
        nav("tasks", "Tasks", "/tasks"),
        nav("settings", "Settings", "/settings"),
    ];
    elements.extend(search_box("searchText"));
    if let Some(term) = search_term(s, "searchText") {
        for person in s.records(PEOPLE).iter().filter(|p| contains_ci(&p.name, &term)) {
            elements.push(
                MockElement::link(
                    format!("result-{}", person.id),
                    person.name.clone(),
                    &format!("/people/{}", person.id),
                )
                .css(css::PERSON_LINK),
            );
        }
    }
    elements
}

fn people_screen(s: &MockState) -> Vec<MockElement> {
    let mut elements = vec![
        heading("People"),
        MockElement::button("add-person", "Add Person")
            .css("#addBtnGroup")
            .on_click(set_flag("adding:person")),
    ];
    elements.extend(search_box("searchText"));
    if s.flag("adding:person") {
        elements.extend([
            MockElement::input("first"),
            MockElement::input("last"),
            MockElement::input("email"),
            MockElement::button("save-person", "Save").on_click(|s| {
                let first = s.value_or_empty("first");
                let last = s.value_or_empty("last");
                let name = format!("{} {}", first.trim(), last.trim()).trim().to_string();
                if !name.is_empty() {
                    let record = MockRecord::new("", name)
                        .with("first", first.trim())
                        .with("last", last.trim())
                        .with("email", s.value_or_empty("email"));
                    let _ = s.insert(PEOPLE, "PER", record);
                }
                s.set_flag("adding:person", false);
            }),
        ]);
    }

    let term = search_term(s, "searchText");
    let people: Vec<MockRecord> = s
        .records(PEOPLE)
        .iter()
        .filter(|p| term.as_deref().map_or(true, |t| contains_ci(&p.name, t)))
        .cloned()
        .collect();
    elements.extend(linked_rows(
        &people,
        |p| format!("/people/{}", p.id),
        &[css::PERSON_LINK],
        "No people found",
    ));
    elements
}

fn person_screen(s: &MockState) -> Vec<MockElement> {
    let id = s.param("id").unwrap_or_default().to_string();
    let Some(person) = s.record(PEOPLE, &id) else {
        return vec![heading("Person not found")];
    };
    let mut elements = vec![
        heading(&person.name),
        MockElement::icon_button("edit-person", "edit_square")
            .test_id("edit-person-button")
            .on_click(set_flag("editing")),
    ];

    if s.flag("editing") {
        let mut parts = person.name.splitn(2, ' ');
        let first = person.field("first").unwrap_or_else(|| parts.next().unwrap_or_default());
        let last = person.field("last").unwrap_or_else(|| parts.next().unwrap_or_default());
        let save_id = id.clone();
        elements.extend([
            MockElement::input("first").value(first),
            MockElement::input("last").value(last),
            MockElement::button("save-person", "Save").on_click(move |s| {
                let first = s.value_or_empty("first").trim().to_string();
                let last = s.value_or_empty("last").trim().to_string();
                let _ = s.update(PEOPLE, &save_id, |p| {
                    if !first.is_empty() {
                        p.name = format!("{first} {last}").trim().to_string();
                        let _ = p.fields.insert("first".to_string(), first.clone());
                        let _ = p.fields.insert("last".to_string(), last.clone());
                    }
                });
                s.set_flag("editing", false);
            }),
            MockElement::button("cancel-person", "Cancel").on_click(|s| s.set_flag("editing", false)),
            delete_button(PEOPLE, &id, "person", "/people"),
        ]);
    }

    let household = person.field("household").unwrap_or_default().to_string();
    if !household.is_empty() {
        for member in s
            .records(PEOPLE)
            .iter()
            .filter(|p| p.id != id && p.field("household") == Some(household.as_str()))
        {
            elements.push(
                MockElement::new(format!("household-{}", member.id))
                    .css("#householdBox tr")
                    .text(member.name.clone()),
            );
            let member_id = member.id.clone();
            elements.push(
                MockElement::icon_button(format!("remove-{member_id}"), "person_remove").on_click(
                    move |s| {
                        let _ = s.update(PEOPLE, &member_id, |p| {
                            let _ = p.fields.remove("household");
                        });
                    },
                ),
            );
        }
    }
    elements
}

fn groups_screen(s: &MockState) -> Vec<MockElement> {
    let mut elements = vec![
        heading("Groups"),
        MockElement::button("add-group", "Add Group")
            .css("#addBtnGroup")
            .on_click(set_flag("adding:group")),
    ];
    elements.extend(search_box("searchText"));
    if s.flag("adding:group") {
        elements.extend([
            MockElement::input("categoryName"),
            MockElement::input("groupName"),
            MockElement::button("save-group", "Save").on_click(|s| {
                let name = s.value_or_empty("groupName").trim().to_string();
                if !name.is_empty() {
                    let record = MockRecord::new("", name).with("category", s.value_or_empty("categoryName"));
                    let _ = s.insert(GROUPS, "GRP", record);
                }
                s.set_flag("adding:group", false);
            }),
        ]);
    }

    let term = search_term(s, "searchText");
    let groups: Vec<MockRecord> = s
        .records(GROUPS)
        .iter()
        .filter(|g| term.as_deref().map_or(true, |t| contains_ci(&g.name, t)))
        .cloned()
        .collect();
    elements.extend(linked_rows(&groups, |g| format!("/groups/{}", g.id), &[], "No groups found"));
    elements
}

fn group_screen(s: &MockState) -> Vec<MockElement> {
    let id = s.param("id").unwrap_or_default().to_string();
    let Some(group) = s.record(GROUPS, &id) else {
        return vec![heading("Group not found")];
    };
    let mut elements = vec![
        heading(&group.name),
        tab("Members"),
        tab("Sessions"),
        MockElement::icon_button("edit-group", "edit_square").on_click(set_flag("editing")),
    ];
    if s.flag("editing") {
        elements.extend([
            MockElement::input("name").value(group.name.clone()),
            rename_button(GROUPS, &id, "name", "editing"),
            delete_button(GROUPS, &id, "group", "/groups"),
        ]);
    }
    elements.extend(search_box("personAddText"));
    elements.extend(members_panel(s, GROUPS, &id, "groupMembersBox", "Add"));
    elements
}

fn batches_screen(s: &MockState) -> Vec<MockElement> {
    let mut elements = vec![heading("Donations"), nav("funds", "Funds", "/donations/funds")];
    elements.extend(add_one(s, "Add Batch", "name", BATCHES, "BAT", &[]));
    elements.extend(linked_rows(
        s.records(BATCHES),
        |b| format!("/donations/{}", b.id),
        &[],
        "No batches found",
    ));
    elements
}

fn funds_screen(s: &MockState) -> Vec<MockElement> {
    let mut elements = vec![
        heading("Funds"),
        MockElement::button("add-fund", "Add Fund")
            .css("#addBtnGroup")
            .on_click(set_flag("editing:new")),
    ];

    let editing = s
        .records(FUNDS)
        .iter()
        .find(|f| s.flag(&format!("editing:{}", f.id)))
        .map(|f| (f.id.clone(), f.name.clone()));
    if s.flag("editing:new") || editing.is_some() {
        let (fund_id, current) = editing.unzip();
        let flag = format!("editing:{}", fund_id.as_deref().unwrap_or("new"));
        let save_id = fund_id.clone();
        let save_flag = flag.clone();
        elements.extend([
            MockElement::input("fundName").value(current.unwrap_or_default()),
            MockElement::checkbox("taxDeductible", true).label("Tax Deductible"),
            MockElement::button("save-fund", "Save").on_click(move |s| {
                let name = s.value_or_empty("fundName").trim().to_string();
                let deductible = s.is_checked("taxDeductible").unwrap_or(true).to_string();
                if !name.is_empty() {
                    match &save_id {
                        Some(id) => {
                            let _ = s.update(FUNDS, id, |f| f.name = name);
                        }
                        None => {
                            let record = MockRecord::new("", name).with("taxDeductible", deductible);
                            let _ = s.insert(FUNDS, "FUN", record);
                        }
                    }
                }
                s.set_flag(&save_flag, false);
            }),
        ]);
        if let Some(id) = fund_id {
            elements.push(delete_button(FUNDS, &id, "fund", "/donations/funds"));
        }
    }

    let funds = s.records(FUNDS);
    elements.extend(linked_rows(
        funds,
        |f| format!("/donations/funds/{}", f.id),
        &[],
        "No funds found",
    ));
    for fund in funds {
        elements.push(
            MockElement::icon_button(format!("edit-{}", fund.id), "edit")
                .label(format!("Edit {}", fund.name))
                .on_click(set_flag(&format!("editing:{}", fund.id))),
        );
        if fund.field("taxDeductible") == Some("false") {
            elements.push(
                MockElement::new(format!("nondeductible-{}", fund.id))
                    .css("span")
                    .text("Non-Deductible"),
            );
        }
    }
    elements
}

fn forms_screen(s: &MockState) -> Vec<MockElement> {
    let archived = s.flag("tab:Archived");
    let mut elements = vec![heading("Forms"), tab("Archived")];
    elements.extend(add_one(s, "Add Form", "formName", FORMS, "FRM", &[]));
    let forms: Vec<MockRecord> = s
        .records(FORMS)
        .iter()
        .filter(|f| (f.field("archived") == Some("true")) == archived)
        .cloned()
        .collect();
    elements.extend(linked_rows(&forms, |f| format!("/forms/{}", f.id), &[], "No forms found"));
    elements
}

fn form_screen(s: &MockState) -> Vec<MockElement> {
    let id = s.param("id").unwrap_or_default().to_string();
    let Some(form) = s.record(FORMS, &id) else {
        return vec![heading("Form not found")];
    };
    let questions = format!("questions:{id}");
    let mut elements = vec![
        heading(&form.name),
        tab("Questions"),
        MockElement::icon_button("edit-form", "edit_square").on_click(set_flag("editing")),
    ];
    if s.flag("editing") {
        elements.extend([
            MockElement::input("formName").value(form.name.clone()),
            rename_button(FORMS, &id, "formName", "editing"),
            delete_button(FORMS, &id, "form", "/forms"),
        ]);
    }
    elements.extend(add_one(s, "Add Question", "title", &questions, "QST", &[]));
    for question in s.records(&questions) {
        elements.push(
            MockElement::new(format!("question-{}", question.id))
                .css("#questionsBox tbody tr")
                .role(AriaRole::Row)
                .text(question.name.clone()),
        );
    }
    elements
}

fn ministries_screen(s: &MockState) -> Vec<MockElement> {
    let mut elements = vec![heading("Plans")];
    elements.extend(add_one(s, "Add Ministry", "ministryName", MINISTRIES, "MIN", &[]));
    let ministries = s.records(MINISTRIES);
    if ministries.is_empty() {
        elements.push(MockElement::new("empty").css("p").text("No ministries found"));
        return elements;
    }
    elements.push(MockElement::new("ministry-list").css("ul").test_id("ministry-list"));
    for ministry in ministries {
        elements.push(
            MockElement::link(
                format!("ministry-{}", ministry.id),
                ministry.name.clone(),
                &format!("/plans/ministries/{}", ministry.id),
            )
            .css("a[href^='/plans/ministries/']"),
        );
    }
    elements
}

fn ministry_screen(s: &MockState) -> Vec<MockElement> {
    let id = s.param("id").unwrap_or_default().to_string();
    let name = s
        .record(MINISTRIES, &id)
        .map_or_else(|| "Ministry".to_string(), |m| m.name.clone());
    let mut elements = vec![heading(&name)];
    elements.extend(add_one(s, "Add Plan", "planName", PLANS, "PLN", &[("ministry", id.as_str())]));
    let plans: Vec<MockRecord> = s
        .records(PLANS)
        .iter()
        .filter(|p| p.field("ministry") == Some(id.as_str()))
        .cloned()
        .collect();
    elements.extend(linked_rows(&plans, |p| format!("/plans/{}", p.id), &[], "No plans found"));
    elements
}

fn plan_screen(s: &MockState) -> Vec<MockElement> {
    let id = s.param("id").unwrap_or_default().to_string();
    let Some(plan) = s.record(PLANS, &id) else {
        return vec![heading("Plan not found")];
    };
    let positions = format!("positions:{id}");
    let mut elements = vec![heading(&plan.name), tab("Order of Service")];
    elements.extend(add_one(s, "Add Position", "positionName", &positions, "POS", &[]));
    for position in s.records(&positions) {
        elements.push(
            MockElement::new(format!("position-{}", position.id))
                .css("#positionsBox tbody tr")
                .role(AriaRole::Row)
                .text(position.name.clone()),
        );
    }
    elements
}

fn settings_screen(s: &MockState) -> Vec<MockElement> {
    let mut elements = vec![
        heading("Settings"),
        MockElement::icon_button("edit-church", "edit_square").on_click(set_flag("editing")),
    ];
    if s.flag("editing") {
        elements.push(MockElement::input("churchName").value(DEMO_CHURCH));
    }
    elements.extend(add_one(s, "Add Role", "roleName", ROLES, "ROL", &[]));
    elements.extend(linked_rows(
        s.records(ROLES),
        |r| format!("/settings/role/{}", r.id),
        &["a[href^='/settings/role/']"],
        "No roles found",
    ));
    elements
}

fn role_screen(s: &MockState) -> Vec<MockElement> {
    let id = s.param("id").unwrap_or_default().to_string();
    let Some(role) = s.record(ROLES, &id) else {
        return vec![heading("Role not found")];
    };
    let mut elements = vec![
        heading(&role.name),
        MockElement::button("add-member", "Add Member").on_click(set_flag("adding:member")),
    ];
    if s.flag("adding:member") {
        elements.extend(search_box("personAddText"));
    }
    elements.extend(members_panel(s, ROLES, &id, "roleMembersBox", "Select"));
    for permission in PERMISSIONS {
        elements.push(
            MockElement::checkbox(&format!("perm-{permission}"), false).label(permission),
        );
    }
    elements
}

fn tasks_screen(s: &MockState) -> Vec<MockElement> {
    let show_closed = s.flag("closed");
    let mut elements = vec![
        heading("Tasks"),
        MockElement::button("show-closed", "Show Closed").on_click(set_flag("closed")),
        nav("automations", "Automations", "/tasks/automations"),
    ];
    elements.extend(add_one(s, "Add Task", "title", TASKS, "TSK", &[("status", "open")]));
    let tasks: Vec<MockRecord> = s
        .records(TASKS)
        .iter()
        .filter(|t| show_closed || t.field("status") != Some("closed"))
        .cloned()
        .collect();
    elements.extend(linked_rows(&tasks, |t| format!("/tasks/{}", t.id), &[], "No tasks found"));
    elements
}

fn automations_screen(s: &MockState) -> Vec<MockElement> {
    let mut elements = vec![heading("Automations")];
    elements.extend(add_one(s, "Add Automation", "title", AUTOMATIONS, "AUT", &[]));
    elements.extend(linked_rows(
        s.records(AUTOMATIONS),
        |a| format!("/tasks/automations/{}", a.id),
        &[],
        "No automations found",
    ));
    elements
}

fn profile_screen(s: &MockState) -> Vec<MockElement> {
    let account = s.record(ACCOUNT, "me");
    let field = |name: &str| account.and_then(|a| a.field(name)).unwrap_or_default().to_string();
    vec![
        heading("Profile"),
        MockElement::input("firstName").value(field("firstName")),
        MockElement::input("lastName").value(field("lastName")),
        MockElement::input("email").value(field("email")),
        MockElement::input("password"),
        MockElement::button("save-profile", "Save").on_click(|s| {
            let first = s.value_or_empty("firstName");
            let last = s.value_or_empty("lastName");
            let _ = s.update(ACCOUNT, "me", |a| {
                a.name = format!("{first} {last}").trim().to_string();
                let _ = a.fields.insert("firstName".to_string(), first.clone());
                let _ = a.fields.insert("lastName".to_string(), last.clone());
            });
        }),
        nav("devices", "Devices", "/profile/devices"),
    ]
}

fn devices_screen(s: &MockState) -> Vec<MockElement> {
    let mut elements = vec![heading("Devices")];
    elements.extend(add_one(s, "Pair", "pairingCode", DEVICES, "DEV", &[]));
    if s.records(DEVICES).is_empty() {
        elements.push(MockElement::new("empty").css("p").text("No devices"));
        return elements;
    }
    elements.push(MockElement::new("table").css(css::TABLE).role(AriaRole::Table));
    for device in s.records(DEVICES) {
        elements.push(
            MockElement::new(format!("row-{}", device.id))
                .css(css::ROWS)
                .role(AriaRole::Row)
                .text(format!("Device {}", device.name)),
        );
    }
    elements
}

fn reports_screen(s: &MockState) -> Vec<MockElement> {
    let mut elements = vec![heading("Reports")];
    let reports = s.records(REPORT_TABLE);
    if reports.is_empty() {
        elements.push(MockElement::new("empty").css("p").text("No reports available"));
        return elements;
    }
    elements.push(MockElement::new("report-list").css("ul").test_id("report-list"));
    for report in reports {
        elements.push(
            MockElement::link(
                format!("report-{}", report.id),
                report.name.clone(),
                &format!("/reports/{}", report.id),
            )
            .css("a[href^='/reports/']"),
        );
    }
    elements
}

fn report_screen(s: &MockState) -> Vec<MockElement> {
    let key = s.param("key").unwrap_or_default().to_string();
    let title = s
        .record(REPORT_TABLE, &key)
        .map_or_else(|| key.clone(), |r| r.name.clone());
    let mut elements = vec![
        heading(&title),
        MockElement::button("run-report", "Run Report").on_click(set_flag("ran")),
    ];
    let rows = s.records(&format!("report_rows:{key}"));
    if rows.is_empty() {
        elements.push(MockElement::new("empty").css("p").text("No data"));
        return elements;
    }
    elements.push(MockElement::new("table").css(css::TABLE).role(AriaRole::Table));
    for row in rows {
        elements.push(
            MockElement::new(format!("row-{}", row.id))
                .css(css::ROWS)
                .role(AriaRole::Row)
                .text(row.name.clone()),
        );
    }
    elements
}

fn attendance_screen(s: &MockState) -> Vec<MockElement> {
    let mut elements = vec![heading("Attendance"), tab("Setup"), tab("Attendance"), tab("Groups")];
    elements.extend(add_one(s, "Add Campus", "campusName", CAMPUSES, "CMP", &[]));
    elements.extend(linked_rows(
        s.records(CAMPUSES),
        |c| format!("/attendance/campuses/{}", c.id),
        &[],
        "No campuses found",
    ));
    elements
}

fn detail_screen(s: &MockState, table: &str, kind: &str) -> Vec<MockElement> {
    let id = s.param("id").unwrap_or_default();
    let title = s
        .record(table, id)
        .map_or_else(|| format!("{kind} not found"), |r| r.name.clone());
    vec![heading(&title)]
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::driver::PageDriver;
    use crate::locator::Locator;
    use crate::mock::MockDriver;

    const BASE: &str = "http://localhost:3000";

    async fn sign_in(driver: &MockDriver, password: &str) {
        driver.goto(&format!("{BASE}/login")).await.unwrap();
        driver
            .fill(&Locator::new("input[name='email']"), "demo@chums.org")
            .await
            .unwrap();
        driver
            .fill(&Locator::new("input[name='password']"), password)
            .await
            .unwrap();
        driver
            .click(&Locator::new("button[type='submit']"))
            .await
            .unwrap();
    }

    async fn signed_in(app: MockApp) -> MockDriver {
        let driver = MockDriver::new(app);
        sign_in(&driver, "password").await;
        driver
            .click(&Locator::role(AriaRole::Link, DEMO_CHURCH))
            .await
            .unwrap();
        driver
    }

    mod login_tests {
        use super::*;

        #[tokio::test]
        async fn test_church_picker_signs_in() {
            let driver = signed_in(SimulatedChms::new().app()).await;
            assert_eq!(driver.current_url().await.unwrap(), format!("{BASE}/"));
            assert!(driver.inspect(MockState::is_authenticated));
        }

        #[tokio::test]
        async fn test_wrong_password_shows_error() {
            let driver = MockDriver::new(SimulatedChms::new().app());
            sign_in(&driver, "nope").await;
            assert!(driver.is_visible(&Locator::new("[role='alert']")).await.unwrap());
            assert!(!driver
                .is_visible(&Locator::role(AriaRole::Dialog, "Select a Church"))
                .await
                .unwrap());
            assert!(!driver.inspect(MockState::is_authenticated));
        }

        #[tokio::test]
        async fn test_custom_churches_offered() {
            let driver = MockDriver::new(SimulatedChms::new().with_churches(&["St. Mark"]).app());
            sign_in(&driver, "password").await;
            let church = Locator::role(AriaRole::Link, "St. Mark");
            assert_eq!(driver.count(&church).await.unwrap(), 1);
            assert_eq!(
                driver
                    .count(&Locator::role(AriaRole::Link, DEMO_CHURCH))
                    .await
                    .unwrap(),
                0
            );
        }
    }

    mod screen_tests {
        use super::*;

        #[tokio::test]
        async fn test_seed_person_found_from_dashboard() {
            let driver = signed_in(SimulatedChms::new().app()).await;
            driver.fill(&Locator::new("#searchText"), "Dorothy").await.unwrap();
            driver
                .click(&Locator::new("button").with_text("Search"))
                .await
                .unwrap();
            let results = Locator::new(css::PERSON_LINK);
            assert_eq!(driver.count(&results).await.unwrap(), 1);
            driver.click(&results).await.unwrap();
            assert!(driver
                .current_url()
                .await
                .unwrap()
                .ends_with(&format!("/people/{SEED_PERSON_ID}")));
        }

        #[tokio::test]
        async fn test_empty_lists_show_empty_state() {
            let driver = signed_in(SimulatedChms::new().empty().app()).await;
            driver.goto(&format!("{BASE}/groups")).await.unwrap();
            assert!(driver.is_visible(&Locator::text("No groups found")).await.unwrap());
            assert_eq!(driver.count(&Locator::new(css::TABLE)).await.unwrap(), 0);
        }

        #[tokio::test]
        async fn test_add_fund_without_deduction_shows_label() {
            let driver = signed_in(SimulatedChms::new().app()).await;
            driver.goto(&format!("{BASE}/donations/funds")).await.unwrap();
            driver
                .click(&Locator::new("button").with_text("Add Fund"))
                .await
                .unwrap();
            driver
                .fill(&Locator::new("input[name='fundName']"), "Octavian Fund")
                .await
                .unwrap();
            driver
                .set_checked(&Locator::new("input[name='taxDeductible']"), false)
                .await
                .unwrap();
            driver
                .click(&Locator::new("button").with_text("Save"))
                .await
                .unwrap();
            let label = Locator::exact_text("Non-Deductible");
            assert_eq!(driver.count(&label).await.unwrap(), 1);
            assert_eq!(
                driver
                    .count(&Locator::new("a").with_text("Octavian Fund"))
                    .await
                    .unwrap(),
                1
            );
        }

        #[tokio::test]
        async fn test_forbidden_path_bounces_signed_in_session() {
            let driver = signed_in(SimulatedChms::new().forbid("/groups").app()).await;
            driver.goto(&format!("{BASE}/groups")).await.unwrap();
            assert!(driver.current_url().await.unwrap().contains("/login?returnUrl="));
            driver.goto(&format!("{BASE}/people")).await.unwrap();
            assert!(driver.current_url().await.unwrap().ends_with("/people"));
        }
    }
}
