//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments and sets up logging
//! - resolves the dataset path and run configuration
//! - loads and profiles the dataset
//! - runs the ten insights
//! - prints reports and renders charts

use std::path::PathBuf;

use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::cli::{Command, DatasetArgs, RunArgs};
use crate::domain::InsightConfig;
use crate::error::AppError;

pub mod pipeline;

/// Environment variable naming the dataset when `--file` is not given.
pub const DATASET_ENV: &str = "SALES_DATASET";

/// Entry point for the `sales` binary.
pub fn run() -> Result<(), AppError> {
    // We want `sales` and `sales -f data.csv` to behave like `sales run ...`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of the
    // argv list before parsing.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    init_tracing(cli.verbose);

    match cli.command {
        Command::Run(args) => handle_insights(&args, OutputMode::Full),
        Command::Insights(args) => handle_insights(&args, OutputMode::InsightsOnly),
        Command::Profile(args) => handle_profile(&args),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputMode {
    Full,
    InsightsOnly,
}

fn handle_profile(args: &DatasetArgs) -> Result<(), AppError> {
    let config = InsightConfig {
        csv_path: dataset_path(args.file.clone(), env_dataset()),
        sample_rows: args.sample_rows,
        ..InsightConfig::default()
    };
    let (_, profile) = pipeline::load(&config, true)?;
    if let Some(profile) = profile {
        println!("{}", crate::report::format_profile(&profile));
    }
    Ok(())
}

fn handle_insights(args: &RunArgs, mode: OutputMode) -> Result<(), AppError> {
    let config = config_from_args(args, env_dataset())?;
    let (mut table, profile) = pipeline::load(&config, mode == OutputMode::Full)?;

    if let Some(profile) = &profile {
        println!("{}", crate::report::format_profile(profile));
    }

    let run = pipeline::run_insights(&mut table, &config);
    println!("{}", crate::report::format_insights(&run, &config));

    let failures = run.failures();
    if failures > 0 {
        warn!(failures, "some insights could not be computed");
    }

    if config.charts {
        let outcomes = crate::chart::render_charts(&run, &config.charts_dir)?;
        println!("{}", crate::report::format_charts(&outcomes));
    }

    info!(rows = table.row_count(), failures, "run complete");
    Ok(())
}

/// Build and validate the run configuration.
pub fn config_from_args(args: &RunArgs, env_dataset: Option<String>) -> Result<InsightConfig, AppError> {
    if args.top_cities == 0 {
        return Err(AppError::new(2, "`--top-cities` must be > 0."));
    }
    if args.top_subcategories == 0 {
        return Err(AppError::new(2, "`--top-subcategories` must be > 0."));
    }
    if !args.discount_threshold.is_finite() {
        return Err(AppError::new(2, "`--discount-threshold` must be a finite number."));
    }

    Ok(InsightConfig {
        csv_path: dataset_path(args.dataset.file.clone(), env_dataset),
        category: args.category.clone(),
        top_cities: args.top_cities,
        top_subcategories: args.top_subcategories,
        discount_threshold: args.discount_threshold,
        sample_rows: args.dataset.sample_rows,
        charts: !args.no_charts,
        charts_dir: args.charts_dir.clone(),
    })
}

/// Dataset path priority: `--file` > `SALES_DATASET` > the default path.
pub fn dataset_path(file: Option<PathBuf>, env_dataset: Option<String>) -> PathBuf {
    file.or_else(|| env_dataset.filter(|s| !s.trim().is_empty()).map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(crate::DEFAULT_DATASET_PATH))
}

fn env_dataset() -> Option<String> {
    dotenvy::dotenv().ok();
    std::env::var(DATASET_ENV).ok()
}

/// Logging goes to stderr so stdout carries only the report.
///
/// Priority: `RUST_LOG` > `--verbose` > `info`.
fn init_tracing(verbose: bool) {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr).compact())
        .init();
}

/// Rewrite argv so `sales` defaults to `sales run`.
///
/// Rules:
/// - `sales`                      -> `sales run`
/// - `sales -f data.csv ...`      -> `sales run -f data.csv ...`
/// - `sales --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("run".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "run" | "profile" | "insights");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "run flags".
    if arg1.starts_with('-') {
        argv.insert(1, "run".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}
