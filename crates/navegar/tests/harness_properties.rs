//! Harness-level guarantees: guaranteed teardown, lifecycle enforcement,
//! and deterministic outcomes.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use navegar::{
    Expectation, HarnessConfig, Locator, MockDriver, MockElement, MockPage, NavegarError,
    NavegarResult, PageDriver, PageModel, Runner, Session, SessionProvider, TestCase,
};

/// Delegates to the in-memory driver while counting dispose calls.
struct CountingDriver {
    inner: MockDriver,
    disposals: Arc<AtomicUsize>,
}

#[async_trait]
impl PageDriver for CountingDriver {
    async fn navigate(&mut self, url: &str) -> NavegarResult<()> {
        self.inner.navigate(url).await
    }

    async fn set_value(&mut self, locator: &Locator, value: &str) -> NavegarResult<()> {
        self.inner.set_value(locator, value).await
    }

    async fn click(&mut self, locator: &Locator) -> NavegarResult<()> {
        self.inner.click(locator).await
    }

    async fn page_text(&mut self) -> NavegarResult<String> {
        self.inner.page_text().await
    }

    async fn current_url(&mut self) -> NavegarResult<String> {
        self.inner.current_url().await
    }

    async fn dispose(&mut self) -> NavegarResult<()> {
        self.disposals.fetch_add(1, Ordering::SeqCst);
        self.inner.dispose().await
    }
}

struct CountingProvider {
    model: PageModel,
    disposals: Arc<AtomicUsize>,
}

#[async_trait]
impl SessionProvider for CountingProvider {
    async fn session(&self) -> NavegarResult<Session> {
        Ok(Session::new(Box::new(CountingDriver {
            inner: MockDriver::new(self.model.clone()),
            disposals: Arc::clone(&self.disposals),
        })))
    }
}

fn form_model() -> PageModel {
    PageModel::new().with_page(
        "http://localhost/covid-tms/new-user-testing.php",
        MockPage::new("New user registration")
            .with_element(MockElement::id("fullname"))
            .with_element(MockElement::id("submit").render_on_click("All fields are required")),
    )
}

fn counting_provider() -> (CountingProvider, Arc<AtomicUsize>) {
    let disposals = Arc::new(AtomicUsize::new(0));
    (
        CountingProvider {
            model: form_model(),
            disposals: Arc::clone(&disposals),
        },
        disposals,
    )
}

#[tokio::test]
async fn session_is_released_exactly_once_on_pass() {
    let (provider, disposals) = counting_provider();
    let runner = Runner::new(HarnessConfig::default());
    let case = TestCase::new("empty_submit", "/covid-tms/new-user-testing.php")
        .submit(Locator::id("submit"))
        .expect(Expectation::page_contains("All fields are required"));

    let outcome = runner.run_case(&provider, &case).await;
    assert!(outcome.status.is_passed());
    assert_eq!(disposals.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn session_is_released_exactly_once_when_a_step_fails() {
    let (provider, disposals) = counting_provider();
    let runner = Runner::new(HarnessConfig::default());
    let case = TestCase::new("bad_locator", "/covid-tms/new-user-testing.php")
        .fill(Locator::id("no-such-field"), "x");

    let outcome = runner.run_case(&provider, &case).await;
    assert!(outcome.status.is_failed());
    assert_eq!(disposals.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn session_is_released_exactly_once_when_the_assertion_fails() {
    let (provider, disposals) = counting_provider();
    let runner = Runner::new(HarnessConfig::default());
    let case = TestCase::new("wrong_expectation", "/covid-tms/new-user-testing.php")
        .submit(Locator::id("submit"))
        .expect(Expectation::page_contains("Registration complete"));

    let outcome = runner.run_case(&provider, &case).await;
    assert!(outcome.status.is_failed());
    assert_eq!(disposals.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn session_is_released_exactly_once_when_navigation_fails() {
    let (provider, disposals) = counting_provider();
    let runner = Runner::new(HarnessConfig::default());
    let case = TestCase::new("nowhere", "/covid-tms/not-a-page.php");

    let outcome = runner.run_case(&provider, &case).await;
    assert!(outcome.status.is_failed());
    assert_eq!(disposals.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn closed_session_never_silently_succeeds() {
    let mut session = Session::mock(form_model());
    session
        .open("http://localhost/covid-tms/new-user-testing.php")
        .await
        .unwrap();
    session.close().await.unwrap();

    let err = session
        .fill(&Locator::id("fullname"), "Test User")
        .await
        .unwrap_err();
    assert!(matches!(err, NavegarError::SessionClosed { .. }));

    // And closing again stays a no-op.
    session.close().await.unwrap();
}

#[tokio::test]
async fn same_case_twice_yields_the_same_outcome() {
    let runner = Runner::new(HarnessConfig::default());
    let case = TestCase::new("empty_submit", "/covid-tms/new-user-testing.php")
        .submit(Locator::id("submit"))
        .expect(Expectation::any_of([
            Expectation::page_contains("All fields are required"),
            Expectation::page_contains("Please fill out this field"),
        ]));

    // Fresh provider per run models a target-system reset between runs.
    let first = {
        let provider = navegar::MockSessionProvider::new(form_model());
        runner.run_case(&provider, &case).await
    };
    let second = {
        let provider = navegar::MockSessionProvider::new(form_model());
        runner.run_case(&provider, &case).await
    };

    assert_eq!(first.status, second.status);
    assert_eq!(first.reason(), second.reason());
}
