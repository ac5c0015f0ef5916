//! Numeric utilities: descriptive statistics and rounding.

pub mod summary;

pub use summary::*;
