//! Chromium over the DevTools protocol.
//!
//! [`CdpDriverFactory`] launches one browser per run and opens each spec's
//! page in its own browser context, so cookies and storage never leak
//! between specs. Every locator operation is a script built by
//! [`Locator`] and evaluated in the page, so the CSS/role/text semantics are
//! the same as in the scripts' own unit tests. Native dialogs are replaced
//! before any app code runs by the [`AutoDialogBehavior`] init script.

use crate::config::HarnessConfig;
use crate::dialog::{AutoDialogBehavior, Dialog, DialogType};
use crate::driver::{DriverFactory, PageDriver};
use crate::locator::Locator;
use crate::result::{HarnessError, HarnessResult};
use crate::wait::{poll_until, LoadState, WaitOptions};
use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig as CdpConfig};
use chromiumoxide::cdp::browser_protocol::browser::BrowserContextId;
use chromiumoxide::cdp::browser_protocol::page::{
    AddScriptToEvaluateOnNewDocumentParams, CaptureScreenshotFormat, CaptureScreenshotParams,
};
use chromiumoxide::cdp::browser_protocol::target::{CreateBrowserContextParams, CreateTargetParams};
use chromiumoxide::cdp::js_protocol::runtime::EvaluateParams;
use chromiumoxide::handler::viewport::Viewport;
use chromiumoxide::page::Page as CdpPage;
use futures::StreamExt;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info};

const DIALOG_LOG_SCRIPT: &str = "window.__chumsDialogs || []";

/// Dialog as recorded by the init script
#[derive(Debug, Deserialize)]
struct RecordedDialog {
    #[serde(rename = "type")]
    kind: DialogType,
    message: String,
    accepted: bool,
}

impl From<RecordedDialog> for Dialog {
    fn from(raw: RecordedDialog) -> Self {
        Self::answered(raw.kind, raw.message, raw.accepted)
    }
}

type SharedBrowser = Arc<Mutex<Option<Browser>>>;

/// Blank tab inside `context`
fn target_params(context: BrowserContextId) -> HarnessResult<CreateTargetParams> {
    CreateTargetParams::builder()
        .url("about:blank")
        .browser_context_id(context)
        .build()
        .map_err(|message| HarnessError::PageError { message })
}

/// One Chromium tab in a browser context of its own
pub struct CdpDriver {
    page: CdpPage,
    context: BrowserContextId,
    browser: SharedBrowser,
}

impl std::fmt::Debug for CdpDriver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CdpDriver")
            .field("context", &self.context.inner().as_str())
            .finish_non_exhaustive()
    }
}

impl CdpDriver {
    async fn eval<T: DeserializeOwned>(&self, script: String) -> HarnessResult<T> {
        let params = EvaluateParams::builder()
            .expression(script)
            .await_promise(true)
            .return_by_value(true)
            .build()
            .map_err(HarnessError::script)?;
        self.page
            .evaluate_expression(params)
            .await
            .map_err(|e| HarnessError::script(e.to_string()))?
            .into_value()
            .map_err(|e| HarnessError::script(e.to_string()))
    }

    /// Run an action script; `false` from the page means nothing matched
    async fn act(&self, locator: &Locator, script: String) -> HarnessResult<()> {
        if self.eval::<bool>(script).await? {
            Ok(())
        } else {
            Err(HarnessError::ElementNotFound {
                selector: locator.describe(),
            })
        }
    }
}

#[async_trait]
impl PageDriver for CdpDriver {
    async fn goto(&self, url: &str) -> HarnessResult<()> {
        self.page
            .goto(url)
            .await
            .map_err(|e| HarnessError::NavigationError {
                url: url.to_string(),
                message: e.to_string(),
            })?;
        Ok(())
    }

    async fn current_url(&self) -> HarnessResult<String> {
        let url = self.page.url().await.map_err(|e| HarnessError::PageError {
            message: e.to_string(),
        })?;
        Ok(url.unwrap_or_else(|| "about:blank".to_string()))
    }

    async fn wait_for_load_state(&self, state: LoadState, timeout: Duration) -> HarnessResult<()> {
        let options = WaitOptions::new().with_timeout(u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX));
        let check = state.check_script();
        poll_until(options, &format!("{state} state"), || self.eval::<bool>(check.clone())).await?;
        Ok(())
    }

    async fn count(&self, locator: &Locator) -> HarnessResult<usize> {
        self.eval(locator.count_script()).await
    }

    async fn is_visible(&self, locator: &Locator) -> HarnessResult<bool> {
        self.eval(locator.visible_script()).await
    }

    async fn click(&self, locator: &Locator) -> HarnessResult<()> {
        self.act(locator, locator.click_script()).await
    }

    async fn fill(&self, locator: &Locator, value: &str) -> HarnessResult<()> {
        self.act(locator, locator.fill_script(value)).await
    }

    async fn press(&self, locator: &Locator, key: &str) -> HarnessResult<()> {
        self.act(locator, locator.press_script(key)).await
    }

    async fn set_checked(&self, locator: &Locator, checked: bool) -> HarnessResult<()> {
        self.act(locator, locator.set_checked_script(checked)).await
    }

    async fn text_contents(&self, locator: &Locator) -> HarnessResult<Vec<String>> {
        self.eval(locator.texts_script()).await
    }

    async fn input_value(&self, locator: &Locator) -> HarnessResult<Option<String>> {
        self.eval(locator.value_script()).await
    }

    async fn dialogs(&self) -> HarnessResult<Vec<Dialog>> {
        let recorded: Vec<RecordedDialog> = self.eval(DIALOG_LOG_SCRIPT.to_string()).await?;
        Ok(recorded.into_iter().map(Dialog::from).collect())
    }

    async fn screenshot(&self) -> HarnessResult<Vec<u8>> {
        use base64::Engine;

        let params = CaptureScreenshotParams::builder()
            .format(CaptureScreenshotFormat::Png)
            .build();
        let screenshot = self
            .page
            .execute(params)
            .await
            .map_err(|e| HarnessError::ScreenshotError {
                message: e.to_string(),
            })?;
        base64::engine::general_purpose::STANDARD
            .decode(&screenshot.data)
            .map_err(|e| HarnessError::ScreenshotError {
                message: e.to_string(),
            })
    }

    async fn close(&self) -> HarnessResult<()> {
        let closed = self.page.clone().close().await;
        if let Some(browser) = self.browser.lock().await.as_ref() {
            browser
                .dispose_browser_context(self.context.clone())
                .await
                .map_err(|e| HarnessError::PageError {
                    message: e.to_string(),
                })?;
            debug!(context = self.context.inner().as_str(), "browser context disposed");
        }
        closed.map_err(|e| HarnessError::PageError {
            message: e.to_string(),
        })
    }
}

/// Launches Chromium once and opens an isolated tab per spec
pub struct CdpDriverFactory {
    browser: SharedBrowser,
    handler: JoinHandle<()>,
    dialogs: AutoDialogBehavior,
}

impl std::fmt::Debug for CdpDriverFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CdpDriverFactory")
            .field("dialogs", &self.dialogs)
            .finish_non_exhaustive()
    }
}

impl CdpDriverFactory {
    /// Launch Chromium as `config.browser` describes
    pub async fn launch(config: &HarnessConfig) -> HarnessResult<Self> {
        let options = &config.browser;
        let mut builder = CdpConfig::builder()
            .window_size(options.viewport_width, options.viewport_height)
            .viewport(Viewport {
                width: options.viewport_width,
                height: options.viewport_height,
                ..Viewport::default()
            });
        if !options.headless {
            builder = builder.with_head();
        }
        if !options.sandbox {
            builder = builder.no_sandbox();
        }
        if let Some(path) = &options.chromium_path {
            if !Path::new(path).exists() {
                return Err(HarnessError::BrowserNotFound);
            }
            builder = builder.chrome_executable(path);
        }

        let cdp_config = builder
            .build()
            .map_err(|message| HarnessError::BrowserLaunchError { message })?;
        let (browser, mut handler) =
            Browser::launch(cdp_config)
                .await
                .map_err(|e| HarnessError::BrowserLaunchError {
                    message: e.to_string(),
                })?;

        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        info!(headless = options.headless, "browser launched");
        Ok(Self {
            browser: Arc::new(Mutex::new(Some(browser))),
            handler,
            dialogs: config.dialogs,
        })
    }
}

#[async_trait]
impl DriverFactory for CdpDriverFactory {
    async fn new_driver(&self) -> HarnessResult<Arc<dyn PageDriver>> {
        let guard = self.browser.lock().await;
        let browser = guard.as_ref().ok_or_else(|| HarnessError::PageError {
            message: "browser already shut down".to_string(),
        })?;
        let context = browser
            .create_browser_context(CreateBrowserContextParams::default())
            .await
            .map_err(|e| HarnessError::PageError {
                message: e.to_string(),
            })?;
        let page = match browser.new_page(target_params(context.clone())?).await {
            Ok(page) => page,
            Err(e) => {
                let _ = browser.dispose_browser_context(context).await;
                return Err(HarnessError::PageError {
                    message: e.to_string(),
                });
            }
        };
        drop(guard);

        let driver = CdpDriver {
            page,
            context,
            browser: Arc::clone(&self.browser),
        };
        if let Err(e) = driver
            .page
            .execute(AddScriptToEvaluateOnNewDocumentParams::new(
                self.dialogs.init_script(),
            ))
            .await
        {
            let _ = driver.close().await;
            return Err(HarnessError::script(e.to_string()));
        }
        debug!(context = driver.context.inner().as_str(), "page opened");
        Ok(Arc::new(driver))
    }

    async fn shutdown(&self) -> HarnessResult<()> {
        let Some(mut browser) = self.browser.lock().await.take() else {
            return Ok(());
        };
        let closed = browser.close().await;
        let _ = browser.wait().await;
        self.handler.abort();
        closed.map_err(|e| HarnessError::BrowserLaunchError {
            message: e.to_string(),
        })?;
        info!("browser closed");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_recorded_dialog_converts() {
        let raw: RecordedDialog = serde_json::from_str(
            r#"{"type":"confirm","message":"Are you sure you wish to delete this fund?","accepted":true}"#,
        )
        .unwrap();
        let dialog = Dialog::from(raw);
        assert_eq!(dialog.dialog_type(), DialogType::Confirm);
        assert!(dialog.is_accepted());
        assert!(dialog.message().contains("delete this fund"));
    }

    #[test]
    fn test_target_params_open_in_given_context() {
        let params = target_params(BrowserContextId::new("ctx-7")).unwrap();
        assert_eq!(params.url, "about:blank");
        let context = params.browser_context_id.as_ref().map(|id| id.inner().as_str());
        assert_eq!(context, Some("ctx-7"));
    }

    #[tokio::test]
    async fn test_missing_chromium_path_is_browser_not_found() {
        let mut config = HarnessConfig::default();
        config.browser.chromium_path = Some("/nonexistent/chromium".to_string());
        let err = CdpDriverFactory::launch(&config).await.unwrap_err();
        assert!(matches!(err, HarnessError::BrowserNotFound));
    }
}
