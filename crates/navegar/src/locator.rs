//! Locator abstraction for element selection.
//!
//! A locator identifies one page element by a single strategy. Resolution
//! is strict: anything other than exactly one match is a test error, never
//! a silent no-op.
//!
//! Structural-path locators (XPath) are tied to exact page layout and are
//! the last-resort strategy; prefer [`Locator::id`] or [`Locator::name`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// Strategy used to resolve a locator to a page element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Strategy {
    /// Element `id` attribute
    Id,
    /// Element `name` attribute
    Name,
    /// Structural path (XPath) — brittle, last resort
    XPath,
}

impl Strategy {
    /// Short wire name for display and reports
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Name => "name",
            Self::XPath => "xpath",
        }
    }
}

/// A rule identifying exactly one page element
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Locator {
    strategy: Strategy,
    value: String,
}

impl Locator {
    /// Locate by element id
    #[must_use]
    pub fn id(value: impl Into<String>) -> Self {
        Self {
            strategy: Strategy::Id,
            value: value.into(),
        }
    }

    /// Locate by element name
    #[must_use]
    pub fn name(value: impl Into<String>) -> Self {
        Self {
            strategy: Strategy::Name,
            value: value.into(),
        }
    }

    /// Locate by structural path (XPath)
    #[must_use]
    pub fn xpath(value: impl Into<String>) -> Self {
        Self {
            strategy: Strategy::XPath,
            value: value.into(),
        }
    }

    /// Get the resolution strategy
    #[must_use]
    pub const fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Get the strategy-specific value
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Whether this locator is tied to exact page structure.
    ///
    /// Structural locators break on layout changes; the runner flags them
    /// so suites don't over-invest in page-structure fidelity.
    #[must_use]
    pub const fn is_structural(&self) -> bool {
        matches!(self.strategy, Strategy::XPath)
    }

    /// JavaScript expression evaluating to an array of all matches
    #[must_use]
    pub fn to_matches_query(&self) -> String {
        match self.strategy {
            Strategy::Id => format!(
                "(document.getElementById({v:?}) ? [document.getElementById({v:?})] : [])",
                v = self.value
            ),
            Strategy::Name => format!("Array.from(document.getElementsByName({:?}))", self.value),
            Strategy::XPath => format!(
                "(() => {{ const r = document.evaluate({:?}, document, null, \
                 XPathResult.ORDERED_NODE_SNAPSHOT_TYPE, null); \
                 const out = []; \
                 for (let i = 0; i < r.snapshotLength; i++) out.push(r.snapshotItem(i)); \
                 return out; }})()",
                self.value
            ),
        }
    }

    /// JavaScript expression evaluating to the number of matches
    #[must_use]
    pub fn to_count_query(&self) -> String {
        format!("{}.length", self.to_matches_query())
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.strategy.as_str(), self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_strategy_and_value() {
        assert_eq!(Locator::id("submit").to_string(), "id=submit");
        assert_eq!(Locator::name("login").to_string(), "name=login");
        assert_eq!(Locator::xpath("/html/body").to_string(), "xpath=/html/body");
    }

    #[test]
    fn only_xpath_is_structural() {
        assert!(!Locator::id("submit").is_structural());
        assert!(!Locator::name("search").is_structural());
        assert!(Locator::xpath("/html/body/div/input").is_structural());
    }

    #[test]
    fn id_query_wraps_single_match_in_array() {
        let query = Locator::id("fullname").to_matches_query();
        assert!(query.contains("getElementById"));
        assert!(query.contains("\"fullname\""));
    }

    #[test]
    fn name_query_uses_get_elements_by_name() {
        let query = Locator::name("username").to_matches_query();
        assert!(query.contains("getElementsByName"));
    }

    #[test]
    fn xpath_query_uses_snapshot_evaluation() {
        let query = Locator::xpath("/html/body/div/input").to_matches_query();
        assert!(query.contains("document.evaluate"));
        assert!(query.contains("ORDERED_NODE_SNAPSHOT_TYPE"));
    }

    #[test]
    fn count_query_appends_length() {
        assert!(Locator::id("dob").to_count_query().ends_with(".length"));
    }
}
