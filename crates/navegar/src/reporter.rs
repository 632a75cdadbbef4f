//! Suite report rendering.

use crate::outcome::{CaseStatus, SuiteReport};
use crate::result::NavegarResult;

/// Renders suite reports as plain text or JSON.
///
/// Colorless on purpose; terminal styling belongs to the CLI front end.
#[derive(Debug, Clone, Copy)]
pub struct Reporter {
    /// Include passed cases in the per-case listing
    pub show_passed: bool,
}

impl Default for Reporter {
    fn default() -> Self {
        Self { show_passed: true }
    }
}

impl Reporter {
    /// Create a reporter with default settings
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Only list failures and skips
    #[must_use]
    pub const fn failures_only() -> Self {
        Self { show_passed: false }
    }

    /// Render a human-readable report
    #[must_use]
    pub fn render(&self, report: &SuiteReport) -> String {
        let mut out = String::new();
        for outcome in &report.outcomes {
            let ms = outcome.duration.as_millis();
            match &outcome.status {
                CaseStatus::Passed => {
                    if self.show_passed {
                        out.push_str(&format!("PASS {} ({ms}ms)\n", outcome.name));
                    }
                }
                CaseStatus::Failed { reason } => {
                    out.push_str(&format!("FAIL {} ({ms}ms): {reason}\n", outcome.name));
                }
                CaseStatus::Skipped => {
                    out.push_str(&format!("SKIP {}\n", outcome.name));
                }
            }
        }
        out.push_str(&format!(
            "suite {}: {} passed, {} failed, {} skipped in {:.1}s\n",
            report.suite_name,
            report.passed_count(),
            report.failed_count(),
            report.skipped_count(),
            report.duration.as_secs_f64(),
        ));
        out
    }

    /// Render the report as pretty-printed JSON
    pub fn render_json(&self, report: &SuiteReport) -> NavegarResult<String> {
        Ok(serde_json::to_string_pretty(report)?)
    }
}
