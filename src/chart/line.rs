//! Line charts: the daily sales time series (insight 2) and the per-year
//! facet grid of monthly segment means (insight 9).

use std::path::Path;

use chrono::{Datelike, NaiveDate};
use plotters::prelude::*;

use super::pie::pick_color;
use super::{DrawResult, y_upper};
use crate::insights::{MonthlySegmentStats, years};

/// Facets per row in the monthly grid.
pub const FACET_COLUMNS: usize = 4;

/// Draw total sales per order date as a single line.
///
/// Dates are placed on a day-number axis so gaps between orders keep their
/// real width.
pub fn draw_daily_sales(path: &Path, daily: &[(NaiveDate, f64)]) -> DrawResult {
    let (Some(first), Some(last)) = (daily.first(), daily.last()) else {
        return Ok(());
    };
    let x0 = f64::from(first.0.num_days_from_ce());
    let x1 = f64::from(last.0.num_days_from_ce()).max(x0 + 1.0);
    let y_max = y_upper(daily.iter().map(|(_, v)| *v));

    let root = SVGBackend::new(path, (2000, 600)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Total Sales by Order Date", ("sans-serif", 26))
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(90)
        .build_cartesian_2d(x0..x1, 0f64..y_max)?;

    chart
        .configure_mesh()
        .x_labels(12)
        .x_label_formatter(&|x| day_label(*x))
        .y_desc("Sales_Value")
        .y_label_formatter(&|v| format!("{v:.0}"))
        .draw()?;

    chart.draw_series(LineSeries::new(
        daily
            .iter()
            .map(|(d, v)| (f64::from(d.num_days_from_ce()), *v)),
        &BLUE,
    ))?;

    root.present()?;
    Ok(())
}

/// Draw one facet per year with a line per segment (x = month, y = mean).
pub fn draw_monthly_facets(path: &Path, stats: &[MonthlySegmentStats]) -> DrawResult {
    let years = years(stats);
    if years.is_empty() {
        return Ok(());
    }
    let (rows, cols) = facet_grid(years.len());

    let mut segments: Vec<&str> = stats.iter().map(|s| s.segment.as_str()).collect();
    segments.sort_unstable();
    segments.dedup();

    let y_max = y_upper(stats.iter().map(|s| s.mean));

    let root = SVGBackend::new(path, (420 * cols as u32, 360 * rows as u32 + 60)).into_drawing_area();
    root.fill(&WHITE)?;
    let root = root.titled("Average Sales per Segment, Year and Month", ("sans-serif", 26))?;
    let panels = root.split_evenly((rows, cols));

    for (year, panel) in years.iter().zip(panels.iter()) {
        let mut chart = ChartBuilder::on(panel)
            .caption(format!("Year = {year}"), ("sans-serif", 18))
            .margin(10)
            .x_label_area_size(30)
            .y_label_area_size(60)
            .build_cartesian_2d(1u32..12u32, 0f64..y_max)?;

        chart
            .configure_mesh()
            .x_labels(12)
            .x_desc("Month")
            .y_desc("mean")
            .y_label_formatter(&|v| format!("{v:.0}"))
            .draw()?;

        for (idx, segment) in segments.iter().enumerate() {
            let color = pick_color(idx);
            let points: Vec<(u32, f64)> = stats
                .iter()
                .filter(|s| s.year == *year && s.segment == *segment)
                .map(|s| (s.month, s.mean))
                .collect();
            if points.is_empty() {
                continue;
            }
            chart
                .draw_series(LineSeries::new(points, color.stroke_width(2)))?
                .label(*segment)
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));
        }

        chart
            .configure_series_labels()
            .border_style(&BLACK)
            .background_style(&WHITE.mix(0.8))
            .draw()?;
    }

    root.present()?;
    Ok(())
}

/// `(rows, columns)` for `facets` panels, wrapping after [`FACET_COLUMNS`].
pub fn facet_grid(facets: usize) -> (usize, usize) {
    let cols = facets.clamp(1, FACET_COLUMNS);
    (facets.div_ceil(cols).max(1), cols)
}

fn day_label(x: f64) -> String {
    NaiveDate::from_num_days_from_ce_opt(x.round() as i32)
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}
