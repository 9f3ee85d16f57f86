use crate::helpers::generic::goto_and_wait;
use crate::locator::{AriaRole, Locator};
use crate::page::Page;
use crate::page_object::{ListScreen, PageObject, UrlPattern};
use crate::result::HarnessResult;

use super::{button, click_if_visible, css, goto_via_link, input, nav_link, open_fill_save};
use super::AutomationsPage;

/// Task list
#[derive(Debug, Clone)]
pub struct TasksPage {
    page: Page,
    /// Page heading
    pub heading: Locator,
    /// Opens the add-task editor
    pub add_task_button: Locator,
    /// Title in the task editor
    pub title_input: Locator,
    /// Toggles closed tasks
    pub show_closed_button: Locator,
    /// Link to automations
    pub automations_link: Locator,
    /// Tasks table
    pub table: Locator,
    /// Task rows
    pub rows: Locator,
    /// Links to tasks
    pub task_links: Locator,
    /// Shown when there are no open tasks
    pub empty_state: Locator,
}

impl TasksPage {
    /// Tasks path
    pub const PATH: &'static str = "/tasks";

    /// Create the page object
    #[must_use]
    pub fn new(page: Page) -> Self {
        Self {
            page,
            heading: Locator::role(AriaRole::Heading, "Tasks"),
            add_task_button: button("Add Task"),
            title_input: input("title"),
            show_closed_button: button("Show Closed"),
            automations_link: nav_link(AutomationsPage::PATH),
            table: Locator::new(css::TABLE),
            rows: Locator::new(css::ROWS),
            task_links: Locator::new(css::ROW_LINKS),
            empty_state: Locator::text("No tasks found"),
        }
    }

    /// Open the task list
    pub async fn goto(&self) -> HarnessResult<()> {
        goto_and_wait(&self.page, Self::PATH).await
    }

    /// Create a task
    pub async fn add_task(&self, title: &str) -> HarnessResult<bool> {
        open_fill_save(&self.page, &self.add_task_button, &self.title_input, title).await
    }

    /// Open the first task
    pub async fn click_first_task(&self) -> HarnessResult<bool> {
        click_if_visible(&self.page, &self.task_links.clone().first()).await
    }

    /// Include closed tasks
    pub async fn show_closed(&self) -> HarnessResult<bool> {
        click_if_visible(&self.page, &self.show_closed_button).await
    }

    /// Follow the Automations link, or navigate directly
    pub async fn goto_automations(&self) -> HarnessResult<()> {
        goto_via_link(&self.page, &self.automations_link, AutomationsPage::PATH).await
    }

    /// Fail unless the table or the empty state shows up
    pub async fn expect_tasks_displayed(&self) -> HarnessResult<()> {
        self.expect_displayed().await
    }
}

impl PageObject for TasksPage {
    fn page(&self) -> &Page {
        &self.page
    }

    fn url_pattern(&self) -> UrlPattern {
        UrlPattern::exact(Self::PATH)
    }

    fn page_name(&self) -> &'static str {
        "tasks"
    }

    fn ready_marker(&self) -> Option<&Locator> {
        Some(&self.heading)
    }
}

impl ListScreen for TasksPage {
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
