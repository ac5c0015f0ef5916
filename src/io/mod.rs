//! Input helpers.
//!
//! - CSV ingest into a `SalesTable` (`ingest`)

pub mod ingest;

pub use ingest::*;
