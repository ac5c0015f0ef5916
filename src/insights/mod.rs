//! The ten insight queries over the sales table.
//!
//! Each insight is a group-by plus an aggregation, computed independently.
//! Insights that need a derived column (`Year`, `Discount`, ...) take the
//! table mutably and add it on first use.

pub mod calendar;
pub mod derive;
pub mod discount;
pub mod group;
pub mod sales;
pub mod subcategory;

pub use calendar::*;
pub use discount::*;
pub use sales::*;
pub use subcategory::*;
