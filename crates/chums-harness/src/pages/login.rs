use crate::helpers::auth::LOGIN_PATH;
use crate::helpers::generic::{expect_visible, fill_and_wait, goto_and_wait, wait_for_page_load};
use crate::locator::{AriaRole, Locator};
use crate::page::Page;
use crate::page_object::{PageObject, UrlPattern};
use crate::result::HarnessResult;
use crate::wait::poll_until;

use super::{click_if_visible, input};

/// Sign-in form and the church picker that follows it
#[derive(Debug, Clone)]
pub struct LoginPage {
    page: Page,
    /// Email field
    pub email_input: Locator,
    /// Password field
    pub password_input: Locator,
    /// Submit button
    pub sign_in_button: Locator,
    /// Church selection modal
    pub church_modal: Locator,
    /// Inline error (bad credentials)
    pub error_message: Locator,
}

impl LoginPage {
    /// Create the page object
    #[must_use]
    pub fn new(page: Page) -> Self {
        Self {
            page,
            email_input: input("email").or(Locator::new("input[type='email']")),
            password_input: input("password").or(Locator::new("input[type='password']")),
            sign_in_button: Locator::role(AriaRole::Button, "Sign In")
                .or(Locator::new("button[type='submit']")),
            church_modal: Locator::role(AriaRole::Dialog, "Select a Church"),
            error_message: Locator::new(".MuiAlert-message").or(Locator::new("[role='alert']")),
        }
    }

    /// Open the login screen
    pub async fn goto(&self) -> HarnessResult<()> {
        goto_and_wait(&self.page, LOGIN_PATH).await
    }

    /// Option for one church inside the picker
    #[must_use]
    pub fn church_option(&self, name: &str) -> Locator {
        Locator::role(AriaRole::Link, name)
            .or(Locator::role(AriaRole::Button, name))
            .or(Locator::role(AriaRole::Option, name))
    }

    /// Submit credentials. Fails if the form never shows up.
    pub async fn login(&self, email: &str, password: &str) -> HarnessResult<()> {
        expect_visible(&self.page, &self.email_input).await?;
        fill_and_wait(&self.page, &self.email_input, email).await?;
        fill_and_wait(&self.page, &self.password_input, password).await?;
        self.page.click(&self.sign_in_button).await?;
        wait_for_page_load(&self.page).await
    }

    /// Wait for either the church picker or a redirect away from login.
    /// Returns whether the picker is showing.
    pub async fn wait_for_church_choice(&self) -> HarnessResult<bool> {
        let options = self.page.wait_options(self.page.config().timeouts.login());
        let pattern = self.url_pattern();
        poll_until(options, "church picker or redirect", || async {
            if self.page.find(&self.church_modal).await.is_some() {
                return Ok(true);
            }
            Ok(!pattern.matches(&self.page.url().await?))
        })
        .await?;
        Ok(self.page.find(&self.church_modal).await.is_some())
    }

    /// Pick a church from the modal
    pub async fn select_church(&self, name: &str) -> HarnessResult<bool> {
        let option = self.church_option(name);
        if self
            .page
            .find_within(&option, self.page.config().timeouts.element())
            .await
            .is_none()
        {
            return Ok(false);
        }
        click_if_visible(&self.page, &option).await
    }

    /// Whether the form is showing an error
    pub async fn has_error(&self) -> bool {
        self.page.find(&self.error_message).await.is_some()
    }
}

impl PageObject for LoginPage {
    fn page(&self) -> &Page {
        &self.page
    }

    fn url_pattern(&self) -> UrlPattern {
        UrlPattern::prefix(LOGIN_PATH)
    }

    fn page_name(&self) -> &'static str {
        "login"
    }

    fn ready_marker(&self) -> Option<&Locator> {
        Some(&self.email_input)
    }
}
