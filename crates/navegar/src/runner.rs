//! Test-case execution.
//!
//! Every test case runs through the same fixed loop: acquire a fresh
//! session, open the target URL, perform the steps in order, evaluate the
//! expected outcome, and close the session on every exit path. One case's
//! failure never affects another; there are no retries.

use async_trait::async_trait;
use std::time::Instant;
use tracing::{info, warn};

use crate::config::HarnessConfig;
use crate::driver::PageModel;
use crate::outcome::{Outcome, SuiteReport};
use crate::result::{NavegarError, NavegarResult};
use crate::session::Session;
use crate::testcase::{Step, TestCase, TestSuite};

/// Source of fresh, isolated sessions — one per test case
#[async_trait]
pub trait SessionProvider: Send + Sync {
    /// Produce a new session. Sessions are never reused across cases.
    async fn session(&self) -> NavegarResult<Session>;
}

/// Provider handing out sessions over copies of an in-memory page model
#[derive(Debug, Clone)]
pub struct MockSessionProvider {
    model: PageModel,
}

impl MockSessionProvider {
    /// Create a provider over the given model
    #[must_use]
    pub fn new(model: PageModel) -> Self {
        Self { model }
    }
}

#[async_trait]
impl SessionProvider for MockSessionProvider {
    async fn session(&self) -> NavegarResult<Session> {
        // Each session gets its own copy; failures cannot leak state
        // into the next case.
        Ok(Session::mock(self.model.clone()))
    }
}

/// Provider launching one real browser per test case
#[cfg(feature = "browser")]
#[derive(Debug, Clone)]
pub struct CdpSessionProvider {
    config: HarnessConfig,
}

#[cfg(feature = "browser")]
impl CdpSessionProvider {
    /// Create a provider using the given harness configuration
    #[must_use]
    pub fn new(config: HarnessConfig) -> Self {
        Self { config }
    }
}

#[cfg(feature = "browser")]
#[async_trait]
impl SessionProvider for CdpSessionProvider {
    async fn session(&self) -> NavegarResult<Session> {
        Session::launch(&self.config).await
    }
}

/// Executes test cases sequentially against a session provider
#[derive(Debug, Clone)]
pub struct Runner {
    config: HarnessConfig,
    fail_fast: bool,
}

impl Runner {
    /// Create a runner with the given configuration
    #[must_use]
    pub fn new(config: HarnessConfig) -> Self {
        Self {
            config,
            fail_fast: false,
        }
    }

    /// Stop the suite at the first failing case, recording the rest as
    /// skipped
    #[must_use]
    pub const fn with_fail_fast(mut self) -> Self {
        self.fail_fast = true;
        self
    }

    /// The harness configuration
    #[must_use]
    pub const fn config(&self) -> &HarnessConfig {
        &self.config
    }

    /// Run one test case: open, step, assert, close — close runs on
    /// every exit path, and a close failure never masks a step failure.
    pub async fn run_case(&self, provider: &dyn SessionProvider, case: &TestCase) -> Outcome {
        let start = Instant::now();
        if case.uses_structural_locator() {
            warn!(case = %case.name, "case relies on structural locators; brittle on layout change");
        }

        let mut session = match provider.session().await {
            Ok(session) => session,
            Err(e) => return Outcome::failed(&case.name, e.to_string(), start.elapsed()),
        };

        let driven = self.drive(&mut session, case).await;
        let closed = session.close().await;

        let outcome = match (driven, closed) {
            (Ok(()), Ok(())) => Outcome::passed(&case.name, start.elapsed()),
            (Err(e), _) => Outcome::failed(&case.name, e.to_string(), start.elapsed()),
            (Ok(()), Err(e)) => Outcome::failed(
                &case.name,
                format!("session close failed: {e}"),
                start.elapsed(),
            ),
        };
        info!(
            case = %case.name,
            passed = outcome.status.is_passed(),
            ms = outcome.duration.as_millis() as u64,
            "case finished"
        );
        outcome
    }

    async fn drive(&self, session: &mut Session, case: &TestCase) -> NavegarResult<()> {
        let url = self.config.resolve_url(&case.path);
        session.open(&url).await?;

        for step in &case.steps {
            match step {
                Step::Fill { locator, value } => session.fill(locator, value).await?,
                Step::Click { locator } => session.click(locator).await?,
            }
        }

        if case.expect.is_unchecked() {
            return Ok(());
        }
        let view = session.page_view().await?;
        if case.expect.evaluate(&view) {
            Ok(())
        } else {
            Err(NavegarError::AssertionFailed {
                message: format!(
                    "expected {}; page is at {}",
                    case.expect.describe(),
                    view.url
                ),
            })
        }
    }

    /// Run a suite strictly sequentially, one isolated session per case.
    pub async fn run_suite(&self, provider: &dyn SessionProvider, suite: &TestSuite) -> SuiteReport {
        let start = Instant::now();
        let mut outcomes = Vec::with_capacity(suite.len());
        let mut stopped = false;

        for case in &suite.cases {
            if stopped {
                outcomes.push(Outcome::skipped(&case.name));
                continue;
            }
            let outcome = self.run_case(provider, case).await;
            if self.fail_fast && outcome.status.is_failed() {
                stopped = true;
            }
            outcomes.push(outcome);
        }

        SuiteReport::new(&suite.name, outcomes, start.elapsed())
    }
}
