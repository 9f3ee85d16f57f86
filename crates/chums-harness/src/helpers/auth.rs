//! Authentication bootstrap.
//!
//! Establishes a signed-in session with a church selected, and recovers
//! from being bounced to the login screen mid-flow.

use crate::helpers::generic::goto_and_wait;
use crate::page::Page;
use crate::page_object::path_of;
use crate::pages::LoginPage;
use crate::result::{HarnessError, HarnessResult};
use crate::wait::poll_until;
use tracing::{debug, info, warn};

/// Where the app sends unauthenticated visitors
pub const LOGIN_PATH: &str = "/login";

/// Whether a URL points at the login screen
#[must_use]
pub fn is_login_url(url: &str) -> bool {
    let path = path_of(url);
    path == LOGIN_PATH || path.starts_with("/login/")
}

/// Sign in with the configured credentials and pick the configured church.
///
/// Succeeds once the browser has left the login screen; fails with
/// [`HarnessError::AssertionFailed`] if that does not happen within the
/// login timeout.
pub async fn login_and_select_church(page: &Page) -> HarnessResult<()> {
    let config = page.config();
    let login = LoginPage::new(page.clone());

    login.goto().await?;
    if !is_login_url(&page.url().await?) {
        debug!("login screen redirected away; session already active");
        return Ok(());
    }

    login
        .login(&config.credentials.email, &config.credentials.password)
        .await?;

    if login.wait_for_church_choice().await? && !login.select_church(&config.church).await? {
        return Err(HarnessError::assertion(format!(
            "church {:?} is not offered after login",
            config.church
        )));
    }

    let options = page.wait_options(config.timeouts.login());
    poll_until(options, "browser to leave the login screen", || async {
        Ok(!is_login_url(&page.url().await?))
    })
    .await
    .map_err(|e| match e {
        HarnessError::Timeout { ms, .. } => {
            HarnessError::assertion(format!("still on the login screen {ms}ms after signing in"))
        }
        other => other,
    })?;

    info!(church = %config.church, "signed in");
    Ok(())
}

/// Navigate to an in-app path, signing in first if the app bounces to
/// login.
///
/// Returns [`HarnessError::SessionExpired`] when the path still redirects
/// to login after a fresh sign-in, which is how a permission-gated
/// feature shows up.
pub async fn navigate_directly(page: &Page, path: &str) -> HarnessResult<()> {
    goto_and_wait(page, path).await?;
    if is_login_url(path) || !is_login_url(&page.url().await?) {
        return Ok(());
    }

    info!(path, "redirected to login; signing in and retrying");
    login_and_select_church(page).await?;
    goto_and_wait(page, path).await?;

    if is_login_url(&page.url().await?) {
        warn!(path, "still redirected to login after signing in");
        return Err(HarnessError::SessionExpired {
            path: path.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_login_url() {
        assert!(is_login_url("http://localhost:3000/login"));
        assert!(is_login_url("http://localhost:3000/login?returnUrl=%2Fgroups"));
        assert!(!is_login_url("http://localhost:3000/logins"));
        assert!(!is_login_url("http://localhost:3000/people"));
    }
}
