use crate::helpers::generic::goto_and_wait;
use crate::locator::{AriaRole, Locator};
use crate::page::Page;
use crate::page_object::{ListScreen, PageObject, UrlPattern};
use crate::result::HarnessResult;

use super::{button, click_if_visible, css, input, open_fill_save};

/// Attendance setup: campuses, services and service times
#[derive(Debug, Clone)]
pub struct AttendancePage {
    page: Page,
    /// Page heading
    pub heading: Locator,
    /// Opens the add-campus editor
    pub add_campus_button: Locator,
    /// Name in the campus editor
    pub campus_name_input: Locator,
    /// Campus / service tree
    pub table: Locator,
    /// Tree rows
    pub rows: Locator,
    /// Shown when nothing is configured
    pub empty_state: Locator,
}

impl AttendancePage {
    /// Attendance path
    pub const PATH: &'static str = "/attendance";

    /// Create the page object
    #[must_use]
    pub fn new(page: Page) -> Self {
        Self {
            page,
            heading: Locator::role(AriaRole::Heading, "Attendance"),
            add_campus_button: button("Add Campus"),
            campus_name_input: input("campusName"),
            table: Locator::new(css::TABLE),
            rows: Locator::new(css::ROWS),
            empty_state: Locator::text("No campuses found"),
        }
    }

    /// Open attendance
    pub async fn goto(&self) -> HarnessResult<()> {
        goto_and_wait(&self.page, Self::PATH).await
    }

    /// Tab by label (`Setup`, `Attendance`, `Groups`)
    #[must_use]
    pub fn tab(&self, label: &str) -> Locator {
        Locator::role(AriaRole::Tab, label)
    }

    /// Switch tab
    pub async fn open_tab(&self, label: &str) -> HarnessResult<bool> {
        click_if_visible(&self.page, &self.tab(label)).await
    }

    /// Create a campus
    pub async fn add_campus(&self, name: &str) -> HarnessResult<bool> {
        open_fill_save(&self.page, &self.add_campus_button, &self.campus_name_input, name).await
    }

    /// Fail unless the setup tree or the empty state shows up
    pub async fn expect_attendance_displayed(&self) -> HarnessResult<()> {
        self.expect_displayed().await
    }
}

impl PageObject for AttendancePage {
    fn page(&self) -> &Page {
        &self.page
    }

    fn url_pattern(&self) -> UrlPattern {
        UrlPattern::exact(Self::PATH)
    }

    fn page_name(&self) -> &'static str {
        "attendance"
    }

    fn ready_marker(&self) -> Option<&Locator> {
        Some(&self.heading)
    }
}

impl ListScreen for AttendancePage {
    fn table(&self) -> &Locator {
        &self.table
    }

    fn rows(&self) -> &Locator {
        &self.rows
    }

    fn empty_state(&self) -> &Locator {
        &self.empty_state
    }
}
