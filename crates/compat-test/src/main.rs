//! compat-test: regression check of the CAD tool's OBJ export.
//!
//! Runs `open_export_obj` for every fixture model, re-imports the exported
//! OBJ/MTL pair and compares bounding box and surface area against the
//! reference values. Exits 0 only when every scenario passes.
//!
//! # Logging
//!
//! Set the `RUST_LOG` environment variable to control log output:
//! - `RUST_LOG=test_harness=info` - One line per scenario step
//! - `RUST_LOG=obj_format=debug` - Import details
//! - `RUST_LOG=debug` - All debug output
//!
//! # Example
//!
//! ```bash
//! compat-test --build-dir Build/Release
//! compat-test --build-dir Build/Release --fixtures fixtures.json --fail-fast -v
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use mesh_measure::{Tolerance, DEFAULT_TOLERANCE};
use test_harness::{CliExportTool, FixtureTable, HarnessConfig, RunReport, ScenarioRunner};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod paths;

/// compat-test - Check OBJ exports of the CAD tool against reference values.
#[derive(Parser)]
#[command(name = "compat-test")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Build directory holding the tool, `Examples/` and `TestResults/`
    #[arg(long)]
    build_dir: Option<PathBuf>,

    /// Path to the tool executable
    #[arg(long)]
    cli: Option<PathBuf>,

    /// Directory with the example models
    #[arg(long)]
    examples: Option<PathBuf>,

    /// Directory the tool exports into (emptied before the run)
    #[arg(long)]
    results: Option<PathBuf>,

    /// JSON fixture table to use instead of the built-in one
    #[arg(long)]
    fixtures: Option<PathBuf>,

    /// Absolute tolerance for every comparison
    #[arg(long, default_value_t = DEFAULT_TOLERANCE)]
    tolerance: f64,

    /// Stop at the first scenario that does not pass
    #[arg(long)]
    fail_fast: bool,

    /// Keep exported files even when every scenario passes
    #[arg(long)]
    keep_results: bool,

    /// Print the fixture table as JSON and exit
    #[arg(long)]
    dump_fixtures: bool,

    /// Suppress the report and all log output
    #[arg(long, short)]
    quiet: bool,

    /// Increase output verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(long, short, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Initialize the tracing subscriber based on verbosity level.
fn init_tracing(verbose: u8, quiet: bool) {
    if quiet {
        return;
    }

    // RUST_LOG takes precedence over -v flags
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        let level = match verbose {
            0 => "warn",
            1 => "compat_test=info,test_harness=info,obj_format=info",
            2 => "compat_test=debug,test_harness=debug,obj_format=debug,mesh_measure=debug",
            _ => "trace",
        };
        EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .with(filter)
        .init();
}

fn load_fixtures(cli: &Cli) -> Result<FixtureTable> {
    match &cli.fixtures {
        Some(path) => FixtureTable::load(path)
            .with_context(|| format!("loading fixtures from {}", path.display())),
        None => Ok(FixtureTable::builtin()),
    }
}

fn run(cli: &Cli) -> Result<i32> {
    let tolerance = Tolerance::new(cli.tolerance)?;
    let fixtures = load_fixtures(cli)?;
    if cli.dump_fixtures {
        println!("{}", fixtures.to_json()?);
        return Ok(0);
    }

    let paths = paths::resolve(
        cli.build_dir.as_deref(),
        cli.cli.as_deref(),
        cli.examples.as_deref(),
        cli.results.as_deref(),
    )?;
    paths::check_inputs(&paths)?;
    info!(
        tool = %paths.tool.display(),
        examples = %paths.examples.display(),
        results = %paths.results.display(),
        fixtures = fixtures.len(),
        "starting run"
    );

    let config = HarnessConfig::new(&paths.examples, &paths.results)
        .with_tolerance(tolerance)
        .with_fail_fast(cli.fail_fast)
        .with_keep_results(cli.keep_results);
    let mut runner = ScenarioRunner::new(config, fixtures, CliExportTool::new(&paths.tool));
    let summary = runner.run()?;

    if !cli.quiet {
        print!("{}", RunReport::new(&summary, tolerance.epsilon));
    }
    Ok(summary.exit_code())
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    match run(&cli) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {}", e);
            for cause in e.chain().skip(1) {
                eprintln!("  Caused by: {}", cause);
            }
            std::process::exit(1);
        }
    }
}
