//! Chart rendering for the insights that have a visual.
//!
//! Charts are written as SVG files (one per insight) so a run never blocks on
//! a window. Rendering is presentation-only: every number drawn comes straight
//! from the insight results.

use std::fs::create_dir_all;
use std::path::{Path, PathBuf};

use plotters::prelude::RGBColor;
use tracing::{info, warn};

use crate::app::pipeline::InsightRun;
use crate::error::{AppError, InsightError};

pub mod bar;
pub mod line;
pub mod pie;

pub use pie::{absolute_label, wedges};

pub type DrawResult = Result<(), Box<dyn std::error::Error>>;

/// Outcome of rendering one insight's chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartOutcome {
    pub insight: u8,
    pub result: Result<PathBuf, InsightError>,
}

/// Render every chart whose insight succeeded into `dir`.
///
/// A failed chart is logged and reported in its outcome; it does not stop the
/// others. Only a missing/unwritable output directory is fatal.
pub fn render_charts(run: &InsightRun, dir: &Path) -> Result<Vec<ChartOutcome>, AppError> {
    create_dir_all(dir).map_err(|e| {
        AppError::new(4, format!("Failed to create chart directory '{}': {e}", dir.display()))
    })?;

    let mut outcomes = Vec::new();

    if let Ok(daily) = &run.daily_sales {
        outcomes.push(render(dir, 2, "02_sales_by_order_date.svg", |p| {
            line::draw_daily_sales(p, daily)
        }));
    }
    if let Ok(states) = &run.state_sales {
        outcomes.push(render(dir, 3, "03_sales_by_state.svg", |p| {
            bar::draw_bars(p, "Sales by State", states, RGBColor(70, 130, 180))
        }));
    }
    if let Ok(cities) = &run.top_cities {
        let title = format!("Top {} cities with the highest total sales", cities.len());
        outcomes.push(render(dir, 4, "04_top_cities.svg", |p| {
            bar::draw_bars(p, &title, cities, RGBColor(221, 132, 82))
        }));
    }
    if let Ok(segments) = &run.segment_sales {
        outcomes.push(render(dir, 5, "05_sales_by_segment.svg", |p| {
            pie::draw_segment_donut(p, segments)
        }));
    }
    if let Ok(monthly) = &run.monthly_stats {
        outcomes.push(render(dir, 9, "09_monthly_segment_means.svg", |p| {
            line::draw_monthly_facets(p, monthly)
        }));
    }
    if let Ok(rollup) = &run.subcategories {
        outcomes.push(render(dir, 10, "10_category_subcategory_rings.svg", |p| {
            pie::draw_category_rings(p, rollup)
        }));
    }

    Ok(outcomes)
}

fn render(dir: &Path, insight: u8, file: &str, draw: impl FnOnce(&Path) -> DrawResult) -> ChartOutcome {
    let path = dir.join(file);
    let result = draw(&path)
        .map(|()| path.clone())
        .map_err(|e| InsightError::Chart(e.to_string()));
    match &result {
        Ok(p) => info!(insight, path = %p.display(), "chart written"),
        Err(e) => warn!(insight, error = %e, "chart failed"),
    }
    ChartOutcome { insight, result }
}

/// Upper y bound for non-negative series, with 5% headroom.
fn y_upper(values: impl Iterator<Item = f64>) -> f64 {
    let max = values.filter(|v| v.is_finite()).fold(0.0, f64::max);
    if max > 0.0 { max * 1.05 } else { 1.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn y_upper_has_headroom_and_a_floor() {
        assert!((y_upper([10.0, 20.0].into_iter()) - 21.0).abs() < 1e-9);
        assert_eq!(y_upper(std::iter::empty()), 1.0);
        assert_eq!(y_upper([-5.0, f64::NAN].into_iter()), 1.0);
    }
}
