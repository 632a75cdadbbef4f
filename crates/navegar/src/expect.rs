//! Expected-outcome predicates.
//!
//! The source suites checked outcomes with a mix of raw assertions and
//! exceptions; both are unified behind one predicate type evaluated by
//! the driver loop.

use serde::{Deserialize, Serialize};

/// Read-only snapshot of a session's page state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageView {
    /// Rendered page text
    pub text: String,
    /// Current address
    pub url: String,
}

impl PageView {
    /// Create a page view
    #[must_use]
    pub fn new(text: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            url: url.into(),
        }
    }
}

/// Expected-outcome predicate over (page text, current URL).
///
/// Evaluation is pure; substring matching is literal and case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Expectation {
    /// Rendered page text contains the literal substring
    PageContains(String),
    /// Current URL contains the literal substring
    UrlContains(String),
    /// At least one sub-predicate holds
    AnyOf(Vec<Expectation>),
    /// Every sub-predicate holds
    AllOf(Vec<Expectation>),
    /// No outcome check; the case passes iff every step succeeded
    Unchecked,
}

impl Expectation {
    /// Expect the page text to contain `s`
    #[must_use]
    pub fn page_contains(s: impl Into<String>) -> Self {
        Self::PageContains(s.into())
    }

    /// Expect the current URL to contain `s`
    #[must_use]
    pub fn url_contains(s: impl Into<String>) -> Self {
        Self::UrlContains(s.into())
    }

    /// Expect at least one of the given predicates to hold
    #[must_use]
    pub fn any_of(expectations: impl IntoIterator<Item = Expectation>) -> Self {
        Self::AnyOf(expectations.into_iter().collect())
    }

    /// Expect all of the given predicates to hold
    #[must_use]
    pub fn all_of(expectations: impl IntoIterator<Item = Expectation>) -> Self {
        Self::AllOf(expectations.into_iter().collect())
    }

    /// Whether this expectation performs no outcome check
    #[must_use]
    pub const fn is_unchecked(&self) -> bool {
        matches!(self, Self::Unchecked)
    }

    /// Evaluate the predicate against a page view
    #[must_use]
    pub fn evaluate(&self, view: &PageView) -> bool {
        match self {
            Self::PageContains(s) => view.text.contains(s.as_str()),
            Self::UrlContains(s) => view.url.contains(s.as_str()),
            Self::AnyOf(inner) => inner.iter().any(|e| e.evaluate(view)),
            Self::AllOf(inner) => inner.iter().all(|e| e.evaluate(view)),
            Self::Unchecked => true,
        }
    }

    /// Human-readable description used in failure reasons
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::PageContains(s) => format!("page contains {s:?}"),
            Self::UrlContains(s) => format!("URL contains {s:?}"),
            Self::AnyOf(inner) => {
                let parts: Vec<String> = inner.iter().map(Expectation::describe).collect();
                format!("any of [{}]", parts.join(", "))
            }
            Self::AllOf(inner) => {
                let parts: Vec<String> = inner.iter().map(Expectation::describe).collect();
                format!("all of [{}]", parts.join(", "))
            }
            Self::Unchecked => "unchecked".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn page_contains_is_literal_and_case_sensitive() {
        let view = PageView::new("Login to continue", "http://localhost/covid-tms/login.php");
        assert!(Expectation::page_contains("Login to continue").evaluate(&view));
        assert!(Expectation::page_contains("to cont").evaluate(&view));
        assert!(!Expectation::page_contains("login to continue").evaluate(&view));
    }

    #[test]
    fn url_contains_matches_address_only() {
        let view = PageView::new("Dashboard", "http://localhost/covid-tms/login.php");
        assert!(Expectation::url_contains("login.php").evaluate(&view));
        assert!(!Expectation::url_contains("Dashboard").evaluate(&view));
    }

    #[test]
    fn any_of_mirrors_the_source_or_assertions() {
        let expect = Expectation::any_of([
            Expectation::page_contains("already registered"),
            Expectation::page_contains("User exists"),
        ]);
        let hit = PageView::new("Error: User exists", "u");
        let miss = PageView::new("Registration complete", "u");
        assert!(expect.evaluate(&hit));
        assert!(!expect.evaluate(&miss));
    }

    #[test]
    fn all_of_requires_every_predicate() {
        let expect = Expectation::all_of([
            Expectation::page_contains("Dashboard"),
            Expectation::url_contains("live-test-updates.php"),
        ]);
        let both = PageView::new("Dashboard", "http://localhost/covid-tms/live-test-updates.php");
        let one = PageView::new("Dashboard", "http://localhost/covid-tms/login.php");
        assert!(expect.evaluate(&both));
        assert!(!expect.evaluate(&one));
    }

    #[test]
    fn unchecked_always_holds() {
        assert!(Expectation::Unchecked.evaluate(&PageView::new("", "")));
        assert!(Expectation::Unchecked.is_unchecked());
    }

    #[test]
    fn describe_names_the_predicate() {
        let expect = Expectation::any_of([
            Expectation::page_contains("All fields are required"),
            Expectation::url_contains("login.php"),
        ]);
        let text = expect.describe();
        assert!(text.contains("All fields are required"));
        assert!(text.contains("login.php"));
        assert!(text.starts_with("any of"));
    }

    proptest! {
        #[test]
        fn page_contains_iff_substring(text in ".*", needle in ".{0,8}") {
            let view = PageView::new(text.clone(), "http://localhost/");
            let holds = Expectation::page_contains(needle.clone()).evaluate(&view);
            prop_assert_eq!(holds, text.contains(&needle));
        }

        #[test]
        fn evaluation_is_deterministic(text in ".*", url in ".*", needle in ".{0,8}") {
            let view = PageView::new(text, url);
            let expect = Expectation::any_of([
                Expectation::page_contains(needle.clone()),
                Expectation::url_contains(needle),
            ]);
            prop_assert_eq!(expect.evaluate(&view), expect.evaluate(&view));
        }
    }
}
