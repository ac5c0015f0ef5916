//! `sales-insights` library crate.
//!
//! The binary (`sales`) is a thin wrapper around this library so that:
//!
//! - the profile and every insight are testable without spawning processes
//! - charts and reports stay separate from the aggregation code
//! - code stays easy to navigate as the project grows

pub mod app;
pub mod chart;
pub mod cli;
pub mod domain;
pub mod error;
pub mod insights;
pub mod io;
pub mod math;
pub mod profile;
pub mod report;

/// Dataset read when neither `--file` nor `SALES_DATASET` is given.
pub const DEFAULT_DATASET_PATH: &str = "dataset/dataset.csv";
