//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the sales table and its rows (`SalesTable`, `SalesRecord`)
//! - known dataset columns (`Column`)
//! - the discount simulation rule (`DiscountTier`)
//! - run configuration (`InsightConfig`)

pub mod types;

pub use types::*;
