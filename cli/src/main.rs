mod error_formatter;
mod formatter;
mod server;
mod target;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use echoprobe::{
    summarize, Adapter, Engine, Faulty, FuzzConfig, IntRange, Retention, RunResult, Seed,
    StopSignal,
};
use formatter::Formatter;
use serde::Serialize;
use std::time::Duration;
use target::TargetSpec;
use tracing::{info, warn};

/// Exit status when the run completed and the verdict is FAIL
const EXIT_FAIL: i32 = 1;
/// Exit status for configuration and setup errors
const EXIT_SETUP_ERROR: i32 = 2;
/// Exit status when Ctrl-C cut the run short, whatever the completed rounds showed
const EXIT_INTERRUPTED: i32 = 130;

/// How a finished `run` maps onto the process exit status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RunStatus {
    Pass,
    Fail,
    Interrupted,
}

impl RunStatus {
    fn of<V>(result: &RunResult<V>) -> Self {
        if result.cancelled {
            RunStatus::Interrupted
        } else if result.is_pass() {
            RunStatus::Pass
        } else {
            RunStatus::Fail
        }
    }

    fn exit_code(self) -> i32 {
        match self {
            RunStatus::Pass => 0,
            RunStatus::Fail => EXIT_FAIL,
            RunStatus::Interrupted => EXIT_INTERRUPTED,
        }
    }
}

#[derive(Parser)]
#[command(name = "echoprobe")]
#[command(about = "Write it, read it back, check it stuck.")]
#[command(
    long_about = "echoprobe drives a stateful set/get target with seeded random values and checks that every write is observable by the next read.\nThe CLI fuzzes a target over HTTP or in memory, and can host a reference target to fuzz against."
)]
#[command(version)]
struct Cli {
    /// Log every generated value (same as RUST_LOG=echoprobe=debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fuzz a target with random write/read rounds
    ///
    /// Every round writes one random value from [MIN, MAX], reads the value back and
    /// compares. The seed is always printed to stderr so a failing run can be replayed.
    ///
    /// Exit status: 0 on PASS, 1 on FAIL, 2 on setup errors.
    Run {
        /// Number of write/read rounds to attempt
        #[arg(short = 'n', long, default_value_t = 100)]
        rounds: u64,
        /// Smallest value to generate (inclusive)
        #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
        min: i64,
        /// Largest value to generate (inclusive)
        #[arg(long, default_value_t = 1000, allow_negative_numbers = true)]
        max: i64,
        /// Seed for replay (decimal or 0x-hex); a fresh one is drawn when omitted
        #[arg(short, long)]
        seed: Option<String>,
        /// Stop at the first round that does not pass
        #[arg(short = 'x', long)]
        stop_on_first_failure: bool,
        /// Keep only failing rounds in the result
        #[arg(long)]
        failures_only: bool,
        /// Target to fuzz
        ///
        /// Examples:
        ///   memory                  - built-in in-memory echo
        ///   http://127.0.0.1:3000   - a server speaking the echoprobe value API
        #[arg(short = 't', long, default_value = "memory")]
        target: String,
        /// Per-request timeout for network targets, in milliseconds
        #[arg(long, default_value_t = 5000)]
        timeout_ms: u64,
        /// Silently drop the Nth write (0-based) to check the harness catches it
        #[arg(long, value_name = "N")]
        drop_write: Option<u64>,
        /// Print the full result as JSON on stdout
        #[arg(long)]
        json: bool,
    },
    /// Start the reference HTTP target (default: localhost:3000)
    ///
    /// Holds a single integer behind GET/PUT /value. Useful for trying echoprobe
    /// end to end, and as a template for adapting real services.
    Serve {
        /// Host address to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
        /// Port number to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,
        /// Silently drop the Nth write (0-based) received by the server
        #[arg(long, value_name = "N")]
        drop_write: Option<u64>,
    },
}

#[derive(Serialize)]
struct JsonReport<'a, V: Serialize> {
    summary: &'a echoprobe::Summary,
    result: &'a echoprobe::RunResult<V>,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match &cli.command {
        Commands::Run {
            rounds,
            min,
            max,
            seed,
            stop_on_first_failure,
            failures_only,
            target,
            timeout_ms,
            drop_write,
            json,
        } => {
            let config = FuzzConfig::new()
                .with_rounds(*rounds)
                .with_stop_on_first_failure(*stop_on_first_failure)
                .with_retention(if *failures_only {
                    Retention::FailuresOnly
                } else {
                    Retention::All
                });
            run_command(
                config,
                (*min, *max),
                seed.as_deref(),
                target,
                Duration::from_millis(*timeout_ms),
                *drop_write,
                *json,
            )
        }
        Commands::Serve {
            host,
            port,
            drop_write,
        } => serve_command(host, *port, *drop_write).map(|_| RunStatus::Pass),
    };

    match result {
        Ok(RunStatus::Pass) => {}
        Ok(status) => std::process::exit(status.exit_code()),
        Err(e) => {
            // Check if it's a FuzzError and format it nicely, otherwise use default
            if let Some(fuzz_err) = e.downcast_ref::<echoprobe::FuzzError>() {
                eprintln!("{}", error_formatter::format_error(fuzz_err));
            } else {
                eprintln!("Error: {:#}", e);
            }
            std::process::exit(EXIT_SETUP_ERROR);
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "echoprobe=debug,tower_http=debug"
    } else {
        "echoprobe=info,tower_http=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn run_command(
    config: FuzzConfig,
    (min, max): (i64, i64),
    seed: Option<&str>,
    target: &str,
    timeout: Duration,
    drop_write: Option<u64>,
    json: bool,
) -> Result<RunStatus> {
    let domain = IntRange::new(min, max)?;
    config.validate()?;

    let seed = match seed {
        Some(s) => s.parse::<Seed>()?,
        None => Seed::fresh(),
    };
    eprintln!("seed: {}", seed);

    let spec: TargetSpec = target.parse()?;
    let mut adapter: Box<dyn Adapter<i64>> = spec
        .connect(timeout)
        .with_context(|| format!("Failed to set up target '{}'", target))?;
    if let Some(n) = drop_write {
        info!("Injecting a dropped write at call {}", n);
        adapter = Box::new(Faulty::new(adapter).drop_write(n));
    }

    let signal = StopSignal::new();
    install_interrupt_handler(signal.clone());

    let engine = Engine::new(config);
    let result = engine.run_until(domain, seed, adapter, &signal)?;
    let summary = summarize(&result);

    if json {
        let report = JsonReport {
            summary: &summary,
            result: &result,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        let formatter = Formatter::default();
        print!("{}", formatter.format_run(&result, &summary));
    }
    eprintln!("{}", summary);

    let status = RunStatus::of(&result);
    if status == RunStatus::Interrupted {
        eprintln!(
            "Interrupted after {} of {} rounds; the verdict covers only those rounds",
            result.rounds_completed, result.rounds_requested
        );
    }
    Ok(status)
}

/// First Ctrl-C stops after the in-flight round, the second exits at once
fn install_interrupt_handler(signal: StopSignal) {
    std::thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
        {
            Ok(rt) => rt,
            Err(e) => {
                warn!("Interrupt handling unavailable: {}", e);
                return;
            }
        };
        runtime.block_on(async {
            if tokio::signal::ctrl_c().await.is_err() {
                return;
            }
            warn!("Interrupt received, stopping after the current round");
            signal.stop();

            if tokio::signal::ctrl_c().await.is_ok() {
                std::process::exit(130);
            }
        });
    });
}

fn serve_command(host: &str, port: u16, drop_write: Option<u64>) -> Result<()> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(server::http::start_server(host, port, drop_write))
}
