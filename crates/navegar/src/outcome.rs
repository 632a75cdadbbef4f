//! Test outcomes and suite reports.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Pass/fail status of one executed case
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CaseStatus {
    /// Every step succeeded and the expectation held
    Passed,
    /// A step or the expectation failed
    Failed {
        /// Human-readable reason
        reason: String,
    },
    /// Not executed (fail-fast stopped the run earlier)
    Skipped,
}

impl CaseStatus {
    /// Check if status is passing
    #[must_use]
    pub const fn is_passed(&self) -> bool {
        matches!(self, Self::Passed)
    }

    /// Check if status is failing
    #[must_use]
    pub const fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

/// Result of running a single test case
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    /// Case name
    pub name: String,
    /// Pass/fail plus reason
    pub status: CaseStatus,
    /// Wall-clock duration of the case
    pub duration: Duration,
}

impl Outcome {
    /// Create a passing outcome
    #[must_use]
    pub fn passed(name: impl Into<String>, duration: Duration) -> Self {
        Self {
            name: name.into(),
            status: CaseStatus::Passed,
            duration,
        }
    }

    /// Create a failing outcome
    #[must_use]
    pub fn failed(name: impl Into<String>, reason: impl Into<String>, duration: Duration) -> Self {
        Self {
            name: name.into(),
            status: CaseStatus::Failed {
                reason: reason.into(),
            },
            duration,
        }
    }

    /// Create a skipped outcome
    #[must_use]
    pub fn skipped(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: CaseStatus::Skipped,
            duration: Duration::ZERO,
        }
    }

    /// Failure reason, if any
    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        match &self.status {
            CaseStatus::Failed { reason } => Some(reason),
            _ => None,
        }
    }
}

/// Results from running a suite
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuiteReport {
    /// Suite name
    pub suite_name: String,
    /// Outcomes in execution order
    pub outcomes: Vec<Outcome>,
    /// Total wall-clock duration
    pub duration: Duration,
}

impl SuiteReport {
    /// Assemble a report from recorded outcomes
    #[must_use]
    pub fn new(suite_name: impl Into<String>, outcomes: Vec<Outcome>, duration: Duration) -> Self {
        Self {
            suite_name: suite_name.into(),
            outcomes,
            duration,
        }
    }

    /// Check if every executed case passed
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.outcomes.iter().all(|o| !o.status.is_failed())
    }

    /// Count passed cases
    #[must_use]
    pub fn passed_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.status.is_passed()).count()
    }

    /// Count failed cases
    #[must_use]
    pub fn failed_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.status.is_failed()).count()
    }

    /// Count skipped cases
    #[must_use]
    pub fn skipped_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.status == CaseStatus::Skipped)
            .count()
    }

    /// Total case count
    #[must_use]
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    /// Get failed outcomes
    #[must_use]
    pub fn failures(&self) -> Vec<&Outcome> {
        self.outcomes.iter().filter(|o| o.status.is_failed()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_report() -> SuiteReport {
        SuiteReport::new(
            "covid-tms",
            vec![
                Outcome::passed("login", Duration::from_millis(120)),
                Outcome::failed("logout", "Assertion failed", Duration::from_millis(80)),
                Outcome::skipped("dashboard_loads"),
            ],
            Duration::from_millis(200),
        )
    }

    #[test]
    fn counts_by_status() {
        let report = sample_report();
        assert_eq!(report.total(), 3);
        assert_eq!(report.passed_count(), 1);
        assert_eq!(report.failed_count(), 1);
        assert_eq!(report.skipped_count(), 1);
        assert!(!report.all_passed());
    }

    #[test]
    fn skipped_cases_do_not_fail_the_suite() {
        let report = SuiteReport::new(
            "s",
            vec![
                Outcome::passed("a", Duration::ZERO),
                Outcome::skipped("b"),
            ],
            Duration::ZERO,
        );
        assert!(report.all_passed());
    }

    #[test]
    fn failures_carry_reasons() {
        let report = sample_report();
        let failures = report.failures();
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].reason(), Some("Assertion failed"));
    }
}
