//! Command-line parsing for the sales insight tool.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the aggregation code.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "sales", version, about = "Sales dataset profiling and insights")]
pub struct Cli {
    /// Enable debug logging (overridden by `RUST_LOG`).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Profile the dataset, compute all ten insights, and render charts.
    Run(RunArgs),
    /// Profile the dataset only (shape, samples, types, summary, duplicates, nulls).
    Profile(DatasetArgs),
    /// Compute and print the insights without the profile.
    Insights(RunArgs),
}

/// Where to read the dataset from.
#[derive(Debug, Args, Clone)]
pub struct DatasetArgs {
    /// Sales CSV. Falls back to `SALES_DATASET`, then `dataset/dataset.csv`.
    #[arg(short = 'f', long, value_name = "CSV")]
    pub file: Option<PathBuf>,

    /// Rows shown in the head/tail samples.
    #[arg(long, default_value_t = 5)]
    pub sample_rows: usize,
}

/// Options for computing insights.
#[derive(Debug, Args, Clone)]
pub struct RunArgs {
    #[command(flatten)]
    pub dataset: DatasetArgs,

    /// Category whose best-selling city is reported.
    #[arg(long, default_value = "Office Supplies")]
    pub category: String,

    /// How many cities to rank by total sales.
    #[arg(long, default_value_t = 10)]
    pub top_cities: usize,

    /// How many subcategories to keep for the category rollup.
    #[arg(long, default_value_t = 12)]
    pub top_subcategories: usize,

    /// Sales strictly above this value get the 15% discount (others 10%).
    #[arg(long, default_value_t = 1000.0)]
    pub discount_threshold: f64,

    /// Directory the SVG charts are written to.
    #[arg(long, default_value = "charts")]
    pub charts_dir: PathBuf,

    /// Skip chart rendering.
    #[arg(long)]
    pub no_charts: bool,
}
