//! Real browser control via the Chrome DevTools Protocol.
//!
//! One Chromium process per driver, so one per session: a test case's
//! failures cannot leak browser state into the next case.

use chromiumoxide::browser::{Browser as CdpBrowser, BrowserConfig as CdpConfig};
use chromiumoxide::page::Page as CdpPage;
use futures::StreamExt;
use std::time::Duration;
use tracing::debug;

use crate::config::HarnessConfig;
use crate::driver::PageDriver;
use crate::locator::Locator;
use crate::result::{NavegarError, NavegarResult};

/// [`PageDriver`] backed by a dedicated Chromium process
#[derive(Debug)]
pub struct CdpDriver {
    browser: CdpBrowser,
    page: CdpPage,
    handle: tokio::task::JoinHandle<()>,
    navigation_timeout: Duration,
    element_timeout: Duration,
}

impl CdpDriver {
    /// Launch a browser and open a blank page.
    ///
    /// # Errors
    ///
    /// Returns [`NavegarError::BrowserLaunch`] if the browser cannot be
    /// started or the initial page cannot be created.
    pub async fn launch(config: &HarnessConfig) -> NavegarResult<Self> {
        let mut builder =
            CdpConfig::builder().window_size(config.viewport_width, config.viewport_height);

        if !config.headless {
            builder = builder.with_head();
        }

        if !config.sandbox {
            builder = builder.no_sandbox();
        }

        if let Some(ref path) = config.browser_path {
            builder = builder.chrome_executable(path);
        }

        let cdp_config = builder
            .build()
            .map_err(|e| NavegarError::BrowserLaunch {
                message: e.to_string(),
            })?;

        let (browser, mut handler) =
            CdpBrowser::launch(cdp_config)
                .await
                .map_err(|e| NavegarError::BrowserLaunch {
                    message: e.to_string(),
                })?;

        // Drive the CDP event stream until the browser goes away.
        let handle = tokio::spawn(async move {
            while let Some(h) = handler.next().await {
                if h.is_err() {
                    break;
                }
            }
        });

        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| NavegarError::BrowserLaunch {
                message: e.to_string(),
            })?;

        debug!("browser launched");
        Ok(Self {
            browser,
            page,
            handle,
            navigation_timeout: config.navigation_timeout,
            element_timeout: config.element_timeout,
        })
    }

    /// Interaction script shared by `set_value` and `click`: resolve the
    /// locator strictly, check usability, perform `action`, and report a
    /// status string back to Rust.
    fn interaction_script(locator: &Locator, action: &str) -> String {
        format!(
            "(() => {{ const matches = {matches}; \
             if (matches.length !== 1) return 'count:' + matches.length; \
             const el = matches[0]; \
             const style = window.getComputedStyle(el); \
             if (style.display === 'none' || style.visibility === 'hidden' || \
                 (el.offsetParent === null && style.position !== 'fixed')) return 'hidden'; \
             if (el.disabled) return 'disabled'; \
             {action} \
             return 'ok'; }})()",
            matches = locator.to_matches_query(),
            action = action,
        )
    }

    fn map_status(status: &str, locator: &Locator) -> NavegarResult<()> {
        if status == "ok" {
            return Ok(());
        }
        if let Some(count) = status.strip_prefix("count:") {
            return Err(NavegarError::ElementNotFound {
                locator: locator.to_string(),
                matches: count.parse().unwrap_or(0),
            });
        }
        match status {
            "hidden" => Err(NavegarError::ElementNotInteractable {
                locator: locator.to_string(),
                reason: "not visible".to_string(),
            }),
            "disabled" => Err(NavegarError::ElementNotInteractable {
                locator: locator.to_string(),
                reason: "disabled".to_string(),
            }),
            other => Err(NavegarError::Page {
                message: format!("unexpected interaction status {other:?}"),
            }),
        }
    }

    async fn eval_string(&self, script: String) -> NavegarResult<String> {
        let ms = self.element_timeout.as_millis() as u64;
        let result = tokio::time::timeout(self.element_timeout, self.page.evaluate(script))
            .await
            .map_err(|_| NavegarError::Timeout { ms })?
            .map_err(|e| NavegarError::Page {
                message: e.to_string(),
            })?;
        result.into_value().map_err(|e| NavegarError::Page {
            message: e.to_string(),
        })
    }
}

#[async_trait::async_trait]
impl PageDriver for CdpDriver {
    async fn navigate(&mut self, url: &str) -> NavegarResult<()> {
        let ms = self.navigation_timeout.as_millis() as u64;
        tokio::time::timeout(self.navigation_timeout, self.page.goto(url))
            .await
            .map_err(|_| NavegarError::Timeout { ms })?
            .map_err(|e| NavegarError::Navigation {
                url: url.to_string(),
                message: e.to_string(),
            })?;
        Ok(())
    }

    async fn set_value(&mut self, locator: &Locator, value: &str) -> NavegarResult<()> {
        let action = format!(
            "el.focus(); el.value = {value:?}; \
             el.dispatchEvent(new Event('input', {{ bubbles: true }})); \
             el.dispatchEvent(new Event('change', {{ bubbles: true }}));"
        );
        let status = self
            .eval_string(Self::interaction_script(locator, &action))
            .await?;
        Self::map_status(&status, locator)
    }

    async fn click(&mut self, locator: &Locator) -> NavegarResult<()> {
        let status = self
            .eval_string(Self::interaction_script(locator, "el.click();"))
            .await?;
        Self::map_status(&status, locator)
    }

    async fn page_text(&mut self) -> NavegarResult<String> {
        self.eval_string("document.body ? document.body.innerText : ''".to_string())
            .await
    }

    async fn current_url(&mut self) -> NavegarResult<String> {
        let url = self.page.url().await.map_err(|e| NavegarError::Page {
            message: e.to_string(),
        })?;
        url.ok_or_else(|| NavegarError::Page {
            message: "page has no URL".to_string(),
        })
    }

    async fn dispose(&mut self) -> NavegarResult<()> {
        let closed = self
            .browser
            .close()
            .await
            .map_err(|e| NavegarError::BrowserLaunch {
                message: e.to_string(),
            });
        self.handle.abort();
        debug!("browser closed");
        closed.map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interaction_script_embeds_strict_match_check() {
        let script = CdpDriver::interaction_script(&Locator::id("submit"), "el.click();");
        assert!(script.contains("matches.length !== 1"));
        assert!(script.contains("getElementById"));
        assert!(script.contains("el.click();"));
    }

    #[test]
    fn map_status_covers_the_failure_taxonomy() {
        let locator = Locator::id("submit");
        assert!(CdpDriver::map_status("ok", &locator).is_ok());
        assert!(matches!(
            CdpDriver::map_status("count:0", &locator).unwrap_err(),
            NavegarError::ElementNotFound { matches: 0, .. }
        ));
        assert!(matches!(
            CdpDriver::map_status("count:3", &locator).unwrap_err(),
            NavegarError::ElementNotFound { matches: 3, .. }
        ));
        assert!(matches!(
            CdpDriver::map_status("hidden", &locator).unwrap_err(),
            NavegarError::ElementNotInteractable { .. }
        ));
        assert!(matches!(
            CdpDriver::map_status("disabled", &locator).unwrap_err(),
            NavegarError::ElementNotInteractable { .. }
        ));
        assert!(matches!(
            CdpDriver::map_status("???", &locator).unwrap_err(),
            NavegarError::Page { .. }
        ));
    }
}
