//! Navegar: browser session harness for data-driven web UI test cases.
//!
//! Each test case is plain data — a target URL, an ordered list of
//! locator interactions, and an expected-outcome predicate. A fixed
//! driver loop executes cases sequentially, one isolated browser session
//! per case, with guaranteed teardown and per-case failure isolation.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    NAVEGAR Architecture                          │
//! ├─────────────────────────────────────────────────────────────────┤
//! │   ┌────────────┐    ┌────────────┐    ┌────────────┐            │
//! │   │ Test Case  │    │ Session    │    │ PageDriver │            │
//! │   │ (data)     │───►│ Harness    │───►│ CDP | mock │            │
//! │   └────────────┘    └────────────┘    └────────────┘            │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! With the `browser` feature, sessions drive real Chromium over the
//! Chrome DevTools Protocol. Without it, the same contract runs against
//! an in-memory page model, which is how the harness tests itself.

#![warn(missing_docs)]
// Lints are configured in workspace Cargo.toml [workspace.lints.clippy]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

#[cfg(feature = "browser")]
mod cdp;
mod config;
mod driver;
mod expect;
mod locator;
mod outcome;
mod reporter;
mod result;
mod runner;
mod session;
mod testcase;

#[cfg(feature = "browser")]
pub use cdp::CdpDriver;
pub use config::{HarnessConfig, DEFAULT_ELEMENT_TIMEOUT_MS, DEFAULT_NAVIGATION_TIMEOUT_MS};
pub use driver::{ClickEffect, MockDriver, MockElement, MockPage, PageDriver, PageModel};
pub use expect::{Expectation, PageView};
pub use locator::{Locator, Strategy};
pub use outcome::{CaseStatus, Outcome, SuiteReport};
pub use reporter::Reporter;
pub use result::{NavegarError, NavegarResult};
#[cfg(feature = "browser")]
pub use runner::CdpSessionProvider;
pub use runner::{MockSessionProvider, Runner, SessionProvider};
pub use session::Session;
pub use testcase::{Step, TestCase, TestSuite};
