use crate::helpers::generic::{expect_visible, goto_and_wait};
use crate::locator::{AriaRole, Locator};
use crate::page::Page;
use crate::page_object::{PageObject, UrlPattern};
use crate::result::HarnessResult;

use super::{button, click_if_visible, fill_if_visible, goto_via_link, input, nav_link};
use super::DevicesPage;

/// The signed-in user's own profile
#[derive(Debug, Clone)]
pub struct ProfilePage {
    page: Page,
    /// Page heading
    pub heading: Locator,
    /// First name
    pub first_name_input: Locator,
    /// Last name
    pub last_name_input: Locator,
    /// Email
    pub email_input: Locator,
    /// New password
    pub password_input: Locator,
    /// Save
    pub save_button: Locator,
    /// Link to paired devices
    pub devices_link: Locator,
}

impl ProfilePage {
    /// Profile path
    pub const PATH: &'static str = "/profile";

    /// Create the page object
    #[must_use]
    pub fn new(page: Page) -> Self {
        Self {
            page,
            heading: Locator::role(AriaRole::Heading, "Profile"),
            first_name_input: input("firstName"),
            last_name_input: input("lastName"),
            email_input: input("email"),
            password_input: input("password"),
            save_button: button("Save"),
            devices_link: nav_link(DevicesPage::PATH),
        }
    }

    /// Open the profile
    pub async fn goto(&self) -> HarnessResult<()> {
        goto_and_wait(&self.page, Self::PATH).await
    }

    /// Fail unless the profile form rendered
    pub async fn expect_profile_displayed(&self) -> HarnessResult<()> {
        self.expect_to_be_on_page().await?;
        expect_visible(&self.page, &self.email_input).await
    }

    /// Email currently in the form
    pub async fn email(&self) -> HarnessResult<Option<String>> {
        self.page.input_value(&self.email_input).await
    }

    /// Change the user's name and save
    pub async fn update_name(&self, first: &str, last: &str) -> HarnessResult<bool> {
        if !fill_if_visible(&self.page, &self.first_name_input, first).await?
            || !fill_if_visible(&self.page, &self.last_name_input, last).await?
        {
            return Ok(false);
        }
        click_if_visible(&self.page, &self.save_button).await
    }

    /// Follow the Devices link, or navigate directly
    pub async fn goto_devices(&self) -> HarnessResult<()> {
        goto_via_link(&self.page, &self.devices_link, DevicesPage::PATH).await
    }
}

impl PageObject for ProfilePage {
    fn page(&self) -> &Page {
        &self.page
    }

    fn url_pattern(&self) -> UrlPattern {
        UrlPattern::exact(Self::PATH)
    }

    fn page_name(&self) -> &'static str {
        "profile"
    }

    fn ready_marker(&self) -> Option<&Locator> {
        Some(&self.heading)
    }
}
