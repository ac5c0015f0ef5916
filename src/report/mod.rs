//! Reporting: fixed-width terminal text for the profile, insights and charts.

pub mod format;

pub use format::*;
