//! Navegante: browser-driven test runner for the COVID test-management
//! suite.
//!
//! ## Usage
//!
//! ```bash
//! navegante list                      # Show the known test cases
//! navegante run                       # Run against http://localhost
//! navegante run --filter login        # Run a subset
//! navegante run --format json         # Machine-readable report
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::process::ExitCode;

mod error;
mod output;

use error::{CliError, CliResult};

#[derive(Debug, Parser)]
#[command(
    name = "navegante",
    version,
    about = "Browser-driven test runner for the COVID test-management suite"
)]
struct Cli {
    /// Reduce output to failures only
    #[arg(long, global = true)]
    quiet: bool,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run test cases against a live target application
    Run(RunArgs),
    /// List the known test cases
    List(ListArgs),
}

#[derive(Debug, Args)]
struct RunArgs {
    /// Base URL of the target application
    #[arg(long, default_value = "http://localhost", env = "NAVEGAR_BASE_URL")]
    base_url: String,

    /// Path to the browser binary (auto-detected when omitted)
    #[arg(long, env = "NAVEGAR_BROWSER")]
    browser_path: Option<String>,

    /// Run with a visible browser window
    #[arg(long)]
    headed: bool,

    /// Disable the browser sandbox (containers/CI)
    #[arg(long)]
    no_sandbox: bool,

    /// Navigation timeout in seconds
    #[arg(long, default_value_t = 30)]
    navigation_timeout: u64,

    /// Element interaction timeout in seconds
    #[arg(long, default_value_t = 5)]
    element_timeout: u64,

    /// Only run cases whose name contains this substring
    #[arg(long)]
    filter: Option<String>,

    /// Stop at the first failing case
    #[arg(long)]
    fail_fast: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,
}

#[derive(Debug, Args)]
struct ListArgs {
    /// Only list cases whose name contains this substring
    #[arg(long)]
    filter: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Human-readable text
    Text,
    /// JSON report
    Json,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> CliResult<ExitCode> {
    match cli.command {
        Commands::List(args) => {
            run_list(&args);
            Ok(ExitCode::SUCCESS)
        }
        Commands::Run(args) => run_cases(&args, cli.quiet).await,
    }
}

fn init_tracing(verbose: u8, quiet: bool) {
    let default = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn load_suite(filter: Option<&str>) -> navegar::TestSuite {
    let suite = covid_tms_suite::full_suite();
    match filter {
        Some(needle) => suite.filtered(needle),
        None => suite,
    }
}

fn run_list(args: &ListArgs) {
    let suite = load_suite(args.filter.as_deref());
    for case in &suite.cases {
        println!("{:<32} {}", case.name, case.path);
    }
    println!("{} case(s)", suite.len());
}

#[cfg(feature = "browser")]
fn harness_config(args: &RunArgs) -> navegar::HarnessConfig {
    use std::time::Duration;

    let mut config = navegar::HarnessConfig::new()
        .with_base_url(args.base_url.clone())
        .with_headless(!args.headed)
        .with_navigation_timeout(Duration::from_secs(args.navigation_timeout))
        .with_element_timeout(Duration::from_secs(args.element_timeout));
    if args.no_sandbox {
        config = config.with_no_sandbox();
    }
    if let Some(ref path) = args.browser_path {
        config = config.with_browser_path(path.clone());
    }
    config
}

#[cfg(feature = "browser")]
async fn run_cases(args: &RunArgs, quiet: bool) -> CliResult<ExitCode> {
    use navegar::{CdpSessionProvider, Outcome, Reporter, Runner, SuiteReport};
    use std::time::Instant;

    let suite = load_suite(args.filter.as_deref());
    if suite.is_empty() {
        return Err(CliError::invalid_argument("no test case matches the filter"));
    }

    let config = harness_config(args);
    let runner = Runner::new(config.clone());
    let provider = CdpSessionProvider::new(config);

    let mut progress = output::ProgressReporter::new(console::colors_enabled(), quiet);
    progress.start_progress(suite.len() as u64, "running cases");

    let start = Instant::now();
    let mut outcomes = Vec::with_capacity(suite.len());
    let mut stopped = false;

    for case in &suite.cases {
        if stopped {
            progress.skipped(&case.name);
            outcomes.push(Outcome::skipped(&case.name));
            continue;
        }

        let outcome = runner.run_case(&provider, case).await;
        progress.increment(1);
        match outcome.reason() {
            None => progress.success(&format!(
                "{} ({}ms)",
                outcome.name,
                outcome.duration.as_millis()
            )),
            Some(reason) => progress.failure(&format!("{}: {reason}", outcome.name)),
        }
        if args.fail_fast && outcome.status.is_failed() {
            stopped = true;
        }
        outcomes.push(outcome);
    }
    progress.finish();

    let report = SuiteReport::new(&suite.name, outcomes, start.elapsed());
    match args.format {
        Format::Json => println!("{}", Reporter::new().render_json(&report)?),
        Format::Text => progress.summary(
            report.passed_count(),
            report.failed_count(),
            report.skipped_count(),
            report.duration.as_secs_f64(),
        ),
    }

    Ok(if report.all_passed() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

#[cfg(not(feature = "browser"))]
async fn run_cases(_args: &RunArgs, _quiet: bool) -> CliResult<ExitCode> {
    Err(CliError::config(
        "Browser control not enabled. Rebuild with --features browser",
    ))
}
