//! Segment sales broken down by year and month (insights 6 and 9).

use crate::domain::{Column, SalesTable};
use crate::error::InsightError;
use crate::insights::derive::{ensure_month, ensure_year};
use crate::insights::group::{sum_by, values_by};
use crate::math::{mean, median};

/// Total sales of one segment in one year.
#[derive(Debug, Clone, PartialEq)]
pub struct YearSegmentTotal {
    pub year: i32,
    pub segment: String,
    pub total: f64,
}

/// Insight 6: total sales per `(Year, Segment)`, ordered by year then segment.
pub fn sales_by_year_segment(table: &mut SalesTable) -> Result<Vec<YearSegmentTotal>, InsightError> {
    table.require(&[Column::DataOrder, Column::Segment, Column::SalesValue])?;
    ensure_year(table)?;

    let totals = sum_by(&table.records, |r| Some((r.year?, r.segment.clone()?)));
    Ok(totals
        .into_iter()
        .map(|((year, segment), total)| YearSegmentTotal { year, segment, total })
        .collect())
}

/// Sum, mean and median of one segment's sales in one month.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlySegmentStats {
    pub year: i32,
    pub month: u32,
    pub segment: String,
    pub sum: f64,
    pub mean: f64,
    pub median: f64,
}

/// Insight 9: sum/mean/median per `(Year, Month, Segment)`.
pub fn monthly_segment_stats(table: &mut SalesTable) -> Result<Vec<MonthlySegmentStats>, InsightError> {
    table.require(&[Column::DataOrder, Column::Segment, Column::SalesValue])?;
    ensure_year(table)?;
    ensure_month(table)?;

    let groups = values_by(&table.records, |r| Some((r.year?, r.month?, r.segment.clone()?)));
    Ok(groups
        .into_iter()
        .filter_map(|((year, month, segment), values)| {
            Some(MonthlySegmentStats {
                year,
                month,
                segment,
                sum: values.iter().sum(),
                mean: mean(&values)?,
                median: median(&values)?,
            })
        })
        .collect())
}

/// Distinct years in `stats`, ascending (one chart facet each).
pub fn years(stats: &[MonthlySegmentStats]) -> Vec<i32> {
    let mut years: Vec<i32> = stats.iter().map(|s| s.year).collect();
    years.dedup();
    years
}
