//! Browser session lifecycle.
//!
//! One session per test case: created, opened onto a target URL, driven,
//! then closed exactly once. A closed session is never reused.

use tracing::debug;
use uuid::Uuid;

#[cfg(feature = "browser")]
use crate::config::HarnessConfig;
use crate::driver::{MockDriver, PageDriver, PageModel};
use crate::expect::PageView;
use crate::locator::Locator;
use crate::result::{NavegarError, NavegarResult};

/// Session lifecycle state: created → open → closed, strictly in order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SessionState {
    Created,
    Open,
    Closed,
}

/// One isolated browser automation context owned by a single test case
pub struct Session {
    id: Uuid,
    driver: Box<dyn PageDriver>,
    state: SessionState,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("id", &self.id)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl Session {
    /// Create a session over an arbitrary driver
    #[must_use]
    pub fn new(driver: Box<dyn PageDriver>) -> Self {
        let id = Uuid::new_v4();
        debug!(session = %id, "session created");
        Self {
            id,
            driver,
            state: SessionState::Created,
        }
    }

    /// Create a session over an in-memory page model
    #[must_use]
    pub fn mock(model: PageModel) -> Self {
        Self::new(Box::new(MockDriver::new(model)))
    }

    /// Launch a real browser session
    ///
    /// # Errors
    ///
    /// Returns [`NavegarError::BrowserLaunch`] if the browser cannot be
    /// started.
    #[cfg(feature = "browser")]
    pub async fn launch(config: &HarnessConfig) -> NavegarResult<Self> {
        let driver = crate::cdp::CdpDriver::launch(config).await?;
        Ok(Self::new(Box::new(driver)))
    }

    /// Session identifier (for log correlation)
    #[must_use]
    pub const fn id(&self) -> Uuid {
        self.id
    }

    /// Whether `close()` has run
    #[must_use]
    pub const fn is_closed(&self) -> bool {
        matches!(self.state, SessionState::Closed)
    }

    fn guard(&self, operation: &str, needs_page: bool) -> NavegarResult<()> {
        match self.state {
            SessionState::Closed => Err(NavegarError::SessionClosed {
                operation: operation.to_string(),
            }),
            SessionState::Created if needs_page => Err(NavegarError::NotOpen {
                operation: operation.to_string(),
            }),
            _ => Ok(()),
        }
    }

    /// Navigate the session to `url`.
    ///
    /// # Errors
    ///
    /// [`NavegarError::Navigation`] if the page fails to load within the
    /// bounded timeout; lifecycle error if the session is closed.
    pub async fn open(&mut self, url: &str) -> NavegarResult<()> {
        self.guard("open", false)?;
        debug!(session = %self.id, url, "open");
        self.driver.navigate(url).await?;
        self.state = SessionState::Open;
        Ok(())
    }

    /// Resolve `locator` to an input element and write `value`.
    ///
    /// The target page must already be loaded.
    ///
    /// # Errors
    ///
    /// [`NavegarError::ElementNotFound`] if the locator does not resolve
    /// to exactly one element, [`NavegarError::ElementNotInteractable`]
    /// if the element cannot currently accept input.
    pub async fn fill(&mut self, locator: &Locator, value: &str) -> NavegarResult<()> {
        self.guard("fill", true)?;
        debug!(session = %self.id, %locator, "fill");
        self.driver.set_value(locator, value).await
    }

    /// Resolve `locator` and activate it (buttons/links).
    ///
    /// # Errors
    ///
    /// Same failure modes as [`Session::fill`].
    pub async fn click(&mut self, locator: &Locator) -> NavegarResult<()> {
        self.guard("click", true)?;
        debug!(session = %self.id, %locator, "click");
        self.driver.click(locator).await
    }

    /// Whether the rendered page text contains `substring`.
    ///
    /// Literal, case-sensitive; pure read, no side effect.
    pub async fn page_contains(&mut self, substring: &str) -> NavegarResult<bool> {
        self.guard("read page text", true)?;
        Ok(self.driver.page_text().await?.contains(substring))
    }

    /// Rendered text of the current page; pure read.
    pub async fn page_text(&mut self) -> NavegarResult<String> {
        self.guard("read page text", true)?;
        self.driver.page_text().await
    }

    /// The session's current address; pure read.
    pub async fn current_url(&mut self) -> NavegarResult<String> {
        self.guard("read current URL", true)?;
        self.driver.current_url().await
    }

    /// Snapshot (page text, current URL) for expectation evaluation.
    pub async fn page_view(&mut self) -> NavegarResult<PageView> {
        let text = self.page_text().await?;
        let url = self.current_url().await?;
        Ok(PageView::new(text, url))
    }

    /// Release the browser handle.
    ///
    /// Idempotent: closing an already-closed session is a no-op. The
    /// underlying driver is disposed exactly once.
    pub async fn close(&mut self) -> NavegarResult<()> {
        if self.is_closed() {
            return Ok(());
        }
        // Mark closed before disposing so a dispose failure cannot lead
        // to a second dispose attempt.
        self.state = SessionState::Closed;
        debug!(session = %self.id, "close");
        self.driver.dispose().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::{MockElement, MockPage};

    fn model() -> PageModel {
        PageModel::new().with_page(
            "http://localhost/form.php",
            MockPage::new("A form")
                .with_element(MockElement::id("fullname"))
                .with_element(MockElement::id("submit").render_on_click("Saved")),
        )
    }

    #[tokio::test]
    async fn lifecycle_created_open_closed() {
        let mut session = Session::mock(model());
        assert!(!session.is_closed());
        session.open("http://localhost/form.php").await.unwrap();
        session.close().await.unwrap();
        assert!(session.is_closed());
    }

    #[tokio::test]
    async fn operations_before_open_fail() {
        let mut session = Session::mock(model());
        let err = session.fill(&Locator::id("fullname"), "x").await.unwrap_err();
        assert!(matches!(err, NavegarError::NotOpen { .. }));
    }

    #[tokio::test]
    async fn operations_after_close_fail_with_lifecycle_error() {
        let mut session = Session::mock(model());
        session.open("http://localhost/form.php").await.unwrap();
        session.close().await.unwrap();

        assert!(matches!(
            session.open("http://localhost/form.php").await.unwrap_err(),
            NavegarError::SessionClosed { .. }
        ));
        assert!(matches!(
            session.fill(&Locator::id("fullname"), "x").await.unwrap_err(),
            NavegarError::SessionClosed { .. }
        ));
        assert!(matches!(
            session.click(&Locator::id("submit")).await.unwrap_err(),
            NavegarError::SessionClosed { .. }
        ));
        assert!(matches!(
            session.page_contains("A form").await.unwrap_err(),
            NavegarError::SessionClosed { .. }
        ));
        assert!(matches!(
            session.current_url().await.unwrap_err(),
            NavegarError::SessionClosed { .. }
        ));
    }

    #[tokio::test]
    async fn close_is_idempotent() {
        let mut session = Session::mock(model());
        session.open("http://localhost/form.php").await.unwrap();
        session.close().await.unwrap();
        session.close().await.unwrap();
        session.close().await.unwrap();
        assert!(session.is_closed());
    }

    #[tokio::test]
    async fn page_contains_is_case_sensitive_substring() {
        let mut session = Session::mock(model());
        session.open("http://localhost/form.php").await.unwrap();
        assert!(session.page_contains("A form").await.unwrap());
        assert!(session.page_contains("form").await.unwrap());
        assert!(!session.page_contains("a form").await.unwrap());
    }

    #[tokio::test]
    async fn page_view_snapshots_text_and_url() {
        let mut session = Session::mock(model());
        session.open("http://localhost/form.php").await.unwrap();
        session.click(&Locator::id("submit")).await.unwrap();
        let view = session.page_view().await.unwrap();
        assert_eq!(view.text, "Saved");
        assert_eq!(view.url, "http://localhost/form.php");
    }
}
