//! Donut and nested-ring pie charts.
//!
//! Plotters has no pie series we can label the way we want, so wedges are
//! computed here and drawn as polygons on the root drawing area (pixel
//! coordinates, y pointing down). Wedges start at 12 o'clock and run
//! counter-clockwise.

use std::path::Path;

use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use super::DrawResult;
use crate::insights::{SegmentTotals, SubcategoryRollup};

const START_ANGLE_DEG: f64 = 90.0;

/// Angular extent of one pie wedge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wedge {
    pub start_deg: f64,
    pub end_deg: f64,
    /// Share of the whole, in percent.
    pub pct: f64,
}

impl Wedge {
    pub fn mid_deg(&self) -> f64 {
        (self.start_deg + self.end_deg) / 2.0
    }
}

/// Split a full turn proportionally to `values`.
///
/// Returns no wedges when the values do not sum to a positive total.
pub fn wedges(values: &[f64], start_deg: f64) -> Vec<Wedge> {
    let total: f64 = values.iter().sum();
    if !(total.is_finite() && total > 0.0) {
        return Vec::new();
    }
    let mut angle = start_deg;
    values
        .iter()
        .map(|v| {
            let pct = v / total * 100.0;
            let wedge = Wedge {
                start_deg: angle,
                end_deg: angle + pct * 3.6,
                pct,
            };
            angle = wedge.end_deg;
            wedge
        })
        .collect()
}

/// Absolute-value wedge label: the currency amount a `pct` share represents.
///
/// Rounds half to even, so `$ 2` for 2.5.
pub fn absolute_label(values: &[f64], pct: f64) -> String {
    let total: f64 = values.iter().sum();
    let amount = (pct * total / 100.0).round_ties_even() as i64;
    format!("$ {amount}")
}

/// Centre annotation showing a whole-dollar grand total.
pub fn total_label(total: f64) -> String {
    format!("Sales Total: $ {}", total.trunc() as i64)
}

/// Insight 5 chart: segment totals as a donut with absolute labels.
pub fn draw_segment_donut(path: &Path, totals: &SegmentTotals) -> DrawResult {
    let values: Vec<f64> = totals.segments.iter().map(|(_, v)| *v).collect();
    let labels: Vec<&str> = totals.segments.iter().map(|(s, _)| s.as_str()).collect();
    let colors: Vec<RGBColor> = (0..values.len()).map(pick_color).collect();

    let root = SVGBackend::new(path, (1000, 900)).into_drawing_area();
    root.fill(&WHITE)?;
    let root = root.titled("Sales Total by Segment", ("sans-serif", 28))?;

    let (w, h) = root.dim_in_pixel();
    let center = (w as i32 / 2, h as i32 / 2);
    let radius = f64::from(w.min(h)) * 0.38;

    let slices = wedges(&values, START_ANGLE_DEG);
    for (i, wedge) in slices.iter().enumerate() {
        root.draw(&Polygon::new(
            ring_sector(center, radius * 0.82, radius, wedge),
            colors[i].filled(),
        ))?;
        root.draw(&Text::new(
            labels[i].to_string(),
            polar(center, radius * 1.12, wedge.mid_deg()),
            centered(16),
        ))?;
        root.draw(&Text::new(
            absolute_label(&values, wedge.pct),
            polar(center, radius * 0.65, wedge.mid_deg()),
            centered(14),
        ))?;
    }

    root.draw(&Text::new(total_label(totals.total), center, centered(20)))?;
    root.present()?;
    Ok(())
}

/// Insight 10 chart: category totals (outer ring) around the selected
/// subcategories (inner ring).
pub fn draw_category_rings(path: &Path, rollup: &SubcategoryRollup) -> DrawResult {
    let cat_values: Vec<f64> = rollup.categories.iter().map(|(_, v)| *v as f64).collect();
    let sub_values: Vec<f64> = rollup.subcategories.iter().map(|s| s.total as f64).collect();

    let root = SVGBackend::new(path, (1400, 1200)).into_drawing_area();
    root.fill(&WHITE)?;
    let title = format!(
        "Total Sales by Category and Top {} Subcategories",
        rollup.subcategories.len()
    );
    let root = root.titled(&title, ("sans-serif", 28))?;

    let (w, h) = root.dim_in_pixel();
    let center = (w as i32 / 2, h as i32 / 2);
    let radius = f64::from(w.min(h)) * 0.40;

    let cat_wedges = wedges(&cat_values, START_ANGLE_DEG);
    for (i, wedge) in cat_wedges.iter().enumerate() {
        root.draw(&Polygon::new(
            ring_sector(center, radius * 0.9, radius, wedge),
            category_color(i).filled(),
        ))?;
        root.draw(&Text::new(
            rollup.categories[i].0.clone(),
            polar(center, radius * 1.1, wedge.mid_deg()),
            centered(18),
        ))?;
    }

    let sub_wedges = wedges(&sub_values, START_ANGLE_DEG);
    for (wedge, sub) in sub_wedges.iter().zip(&rollup.subcategories) {
        let cat_idx = rollup
            .categories
            .iter()
            .position(|(c, _)| *c == sub.category)
            .unwrap_or(0);
        root.draw(&Polygon::new(
            ring_sector(center, radius * 0.6, radius * 0.9, wedge),
            lighten(category_color(cat_idx), 0.45).filled(),
        ))?;
        root.draw(&Text::new(
            sub.subcategory.clone(),
            polar(center, radius * 0.76, wedge.mid_deg()),
            centered(13),
        ))?;
        root.draw(&Text::new(
            absolute_label(&sub_values, wedge.pct),
            polar(center, radius * 0.5, wedge.mid_deg()),
            centered(13),
        ))?;
    }

    let grand_total = rollup.grand_total as f64;
    root.draw(&Text::new(total_label(grand_total), center, centered(20)))?;
    root.present()?;
    Ok(())
}

/// Polygon outline of an annulus sector (`inner == 0` gives a plain slice).
pub fn ring_sector(center: (i32, i32), inner: f64, outer: f64, wedge: &Wedge) -> Vec<(i32, i32)> {
    let span = wedge.end_deg - wedge.start_deg;
    let steps = (span.abs().ceil() as usize).max(1);
    let arc = |r: f64| {
        (0..=steps).map(move |i| polar(center, r, wedge.start_deg + span * i as f64 / steps as f64))
    };

    let mut points: Vec<(i32, i32)> = arc(outer).collect();
    if inner > 0.0 {
        let mut inner_arc: Vec<(i32, i32)> = arc(inner).collect();
        inner_arc.reverse();
        points.extend(inner_arc);
    } else {
        points.push(center);
    }
    points
}

/// Pixel position at `radius` and `deg` (counter-clockwise from 3 o'clock).
fn polar(center: (i32, i32), radius: f64, deg: f64) -> (i32, i32) {
    let rad = deg.to_radians();
    (
        center.0 + (radius * rad.cos()).round() as i32,
        center.1 - (radius * rad.sin()).round() as i32,
    )
}

fn centered(size: u32) -> TextStyle<'static> {
    TextStyle::from(("sans-serif", size).into_font()).pos(Pos::new(HPos::Center, VPos::Center))
}

pub(crate) fn pick_color(idx: usize) -> RGBColor {
    let (r, g, b) = Palette99::pick(idx).to_backend_color().rgb;
    RGBColor(r, g, b)
}

fn category_color(idx: usize) -> RGBColor {
    const CATEGORY: [RGBColor; 3] = [
        RGBColor(0x5d, 0x00, 0xde),
        RGBColor(0x0e, 0xe8, 0x4f),
        RGBColor(0xe8, 0x0e, 0x27),
    ];
    CATEGORY.get(idx).copied().unwrap_or_else(|| pick_color(idx))
}

/// Blend `color` towards white by `amount` (0 = unchanged, 1 = white).
pub fn lighten(color: RGBColor, amount: f64) -> RGBColor {
    let mix = |c: u8| (f64::from(c) + (255.0 - f64::from(c)) * amount.clamp(0.0, 1.0)).round() as u8;
    RGBColor(mix(color.0), mix(color.1), mix(color.2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::insights::{SubcategoryTotal, rollup};

    #[test]
    fn wedges_cover_a_full_turn() {
        let w = wedges(&[300.0, 100.0, 200.0], 90.0);
        assert_eq!(w.len(), 3);
        assert_eq!(w[0].start_deg, 90.0);
        assert!((w[0].pct - 50.0).abs() < 1e-9);
        assert!((w[2].end_deg - 450.0).abs() < 1e-9);
        assert!((w[1].start_deg - w[0].end_deg).abs() < 1e-12);
    }

    #[test]
    fn no_wedges_without_positive_total() {
        assert!(wedges(&[], 90.0).is_empty());
        assert!(wedges(&[0.0, 0.0], 90.0).is_empty());
    }

    #[test]
    fn absolute_label_recovers_amounts() {
        let values = [300.0, 100.0, 200.0];
        assert_eq!(absolute_label(&values, 50.0), "$ 300");
        assert_eq!(absolute_label(&values, 100.0 / 6.0), "$ 100");
        // 0.5 rounds to even.
        assert_eq!(absolute_label(&[1.0], 50.0), "$ 0");
        assert_eq!(absolute_label(&[3.0], 50.0), "$ 2");
    }

    #[test]
    fn total_label_truncates() {
        assert_eq!(total_label(600.9), "Sales Total: $ 600");
    }

    #[test]
    fn sector_outline_closes_on_the_inner_arc() {
        let wedge = Wedge { start_deg: 0.0, end_deg: 90.0, pct: 25.0 };
        let pts = ring_sector((0, 0), 5.0, 10.0, &wedge);
        assert_eq!(pts.first(), Some(&(10, 0)));
        assert_eq!(pts[90], (0, -10));
        assert_eq!(pts[91], (0, -5));
        assert_eq!(pts.last(), Some(&(5, 0)));

        let slice = ring_sector((0, 0), 0.0, 10.0, &wedge);
        assert_eq!(slice.last(), Some(&(0, 0)));
    }

    #[test]
    fn lighten_moves_towards_white() {
        let c = lighten(RGBColor(0, 100, 255), 0.5);
        assert_eq!((c.0, c.1, c.2), (128, 178, 255));
        let same = lighten(RGBColor(10, 20, 30), 0.0);
        assert_eq!((same.0, same.1, same.2), (10, 20, 30));
    }

    #[test]
    fn renders_nested_rings_svg() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rings.svg");
        let data = rollup(vec![
            SubcategoryTotal { category: "Cat1".into(), subcategory: "A1".into(), total: 300 },
            SubcategoryTotal { category: "Cat1".into(), subcategory: "A2".into(), total: 100 },
            SubcategoryTotal { category: "Cat2".into(), subcategory: "B1".into(), total: 200 },
        ]);
        draw_category_rings(&path, &data).unwrap();

        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.contains("Sales Total: $ 600"));
        assert!(svg.contains("$ 300"));
        assert!(svg.contains("Cat2"));
    }
}
