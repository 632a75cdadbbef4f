//! Test cases as plain data.
//!
//! A test case is a target URL, an ordered list of interactions, and an
//! expected-outcome predicate. It is immutable once defined and owned
//! entirely by the test author; all control flow lives in the runner.

use serde::{Deserialize, Serialize};

use crate::expect::Expectation;
use crate::locator::Locator;

/// One interaction with the page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Step {
    /// Resolve the locator to an input element and write the value
    Fill {
        /// Target element
        locator: Locator,
        /// Value to write
        value: String,
    },
    /// Resolve the locator and activate it (buttons/links)
    Click {
        /// Target element
        locator: Locator,
    },
}

impl Step {
    /// The locator this step resolves
    #[must_use]
    pub const fn locator(&self) -> &Locator {
        match self {
            Self::Fill { locator, .. } | Self::Click { locator } => locator,
        }
    }

    /// Short label for logs and failure reasons
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Fill { locator, value } => format!("fill {locator} with {value:?}"),
            Self::Click { locator } => format!("click {locator}"),
        }
    }
}

/// A single browser-driven test case
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestCase {
    /// Case name
    pub name: String,
    /// Target URL, relative to the harness base URL
    pub path: String,
    /// Ordered interactions to perform after navigation
    pub steps: Vec<Step>,
    /// Expected outcome, evaluated after the last step
    pub expect: Expectation,
}

impl TestCase {
    /// Create a test case with no steps and no outcome check
    #[must_use]
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            steps: Vec::new(),
            expect: Expectation::Unchecked,
        }
    }

    /// Append a field write
    #[must_use]
    pub fn fill(mut self, locator: Locator, value: impl Into<String>) -> Self {
        self.steps.push(Step::Fill {
            locator,
            value: value.into(),
        });
        self
    }

    /// Append a click
    #[must_use]
    pub fn click(mut self, locator: Locator) -> Self {
        self.steps.push(Step::Click { locator });
        self
    }

    /// Append the submit click. Same as [`TestCase::click`]; named for
    /// the classic fill-then-submit shape.
    #[must_use]
    pub fn submit(self, locator: Locator) -> Self {
        self.click(locator)
    }

    /// Set the expected outcome
    #[must_use]
    pub fn expect(mut self, expectation: Expectation) -> Self {
        self.expect = expectation;
        self
    }

    /// Whether any step resolves through a structural (XPath) locator
    #[must_use]
    pub fn uses_structural_locator(&self) -> bool {
        self.steps.iter().any(|s| s.locator().is_structural())
    }
}

/// An ordered collection of test cases
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestSuite {
    /// Suite name
    pub name: String,
    /// Cases in execution order
    pub cases: Vec<TestCase>,
}

impl TestSuite {
    /// Create an empty suite
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cases: Vec::new(),
        }
    }

    /// Add a test case
    pub fn add_case(&mut self, case: TestCase) {
        self.cases.push(case);
    }

    /// Add a test case, builder style
    #[must_use]
    pub fn with_case(mut self, case: TestCase) -> Self {
        self.cases.push(case);
        self
    }

    /// Number of cases
    #[must_use]
    pub fn len(&self) -> usize {
        self.cases.len()
    }

    /// Whether the suite has no cases
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    /// Keep only cases whose name contains `needle`
    #[must_use]
    pub fn filtered(mut self, needle: &str) -> Self {
        self.cases.retain(|c| c.name.contains(needle));
        self
    }
}
