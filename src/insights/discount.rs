//! Discount tier simulation (insights 7 and 8).
//!
//! Rule: sales strictly above the threshold get 15% off, everything else 10%.

use crate::domain::{PREMIUM_DISCOUNT, SalesTable};
use crate::error::InsightError;
use crate::insights::derive::{ensure_discount, ensure_discounted_value};
use crate::math::{mean, round_to};

/// Row counts per discount tier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiscountTally {
    pub threshold: f64,
    /// Rows at 10%.
    pub standard: usize,
    /// Rows at 15%.
    pub premium: usize,
}

impl DiscountTally {
    pub fn total(&self) -> usize {
        self.standard + self.premium
    }
}

/// Insight 7: how many sales would receive each discount tier?
pub fn simulate_discount(table: &mut SalesTable, threshold: f64) -> Result<DiscountTally, InsightError> {
    ensure_discount(table, threshold)?;
    let premium = table
        .records
        .iter()
        .filter(|r| r.discount == Some(PREMIUM_DISCOUNT))
        .count();
    Ok(DiscountTally {
        threshold,
        standard: table.row_count() - premium,
        premium,
    })
}

/// Mean sale of the 15% tier before and after the discount.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiscountAverages {
    pub rows: usize,
    /// Rounded to 2 decimal places.
    pub before: f64,
    /// Rounded to 2 decimal places.
    pub after: f64,
}

/// Insight 8: average `Sales_Value` of the 15% tier before and after discount.
pub fn discount_averages(table: &mut SalesTable, threshold: f64) -> Result<DiscountAverages, InsightError> {
    ensure_discounted_value(table, threshold)?;

    let (before, after): (Vec<f64>, Vec<f64>) = table
        .records
        .iter()
        .filter(|r| r.discount == Some(PREMIUM_DISCOUNT))
        .filter_map(|r| Some((r.sales_value?, r.sales_value_discount?)))
        .unzip();

    let (Some(mean_before), Some(mean_after)) = (mean(&before), mean(&after)) else {
        return Err(InsightError::NoMatchingRows(format!(
            "no sales above {threshold} receive the 15% discount"
        )));
    };

    Ok(DiscountAverages {
        rows: before.len(),
        before: round_to(mean_before, 2),
        after: round_to(mean_after, 2),
    })
}
