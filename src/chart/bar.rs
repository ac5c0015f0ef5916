//! Vertical bar charts over named totals (insights 3 and 4).

use std::path::Path;

use plotters::prelude::*;

use super::{DrawResult, y_upper};

/// Draw one bar per `(label, value)`, in the given order.
pub fn draw_bars(path: &Path, title: &str, bars: &[(String, f64)], color: RGBColor) -> DrawResult {
    if bars.is_empty() {
        return Ok(());
    }
    let n = bars.len() as u32;
    let y_max = y_upper(bars.iter().map(|(_, v)| *v));

    let root = SVGBackend::new(path, (1600, 700)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 26))
        .margin(20)
        .x_label_area_size(150)
        .y_label_area_size(90)
        .build_cartesian_2d((0u32..n).into_segmented(), 0f64..y_max)?;

    // Category names can be long (US states), so tick labels are rotated.
    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(bars.len())
        .x_label_formatter(&|v| match v {
            SegmentValue::CenterOf(i) => bars
                .get(*i as usize)
                .map(|(label, _)| label.clone())
                .unwrap_or_default(),
            _ => String::new(),
        })
        .x_label_style(("sans-serif", 13).into_font().transform(FontTransform::Rotate90))
        .y_desc("Sales_Value")
        .y_label_formatter(&|v| format!("{v:.0}"))
        .draw()?;

    chart.draw_series(bars.iter().enumerate().map(|(i, (_, v))| {
        let i = i as u32;
        let mut bar = Rectangle::new(
            [(SegmentValue::Exact(i), 0.0), (SegmentValue::Exact(i + 1), *v)],
            color.filled(),
        );
        bar.set_margin(0, 0, 4, 4);
        bar
    }))?;

    root.present()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_labels_for_every_bar() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bars.svg");
        let bars = vec![
            ("California".to_string(), 450.0),
            ("Texas".to_string(), 300.0),
            ("Washington".to_string(), 120.5),
        ];
        draw_bars(&path, "Sales by State", &bars, RGBColor(70, 130, 180)).unwrap();

        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.contains("Sales by State"));
        assert!(svg.contains("California"));
        assert!(svg.contains("Washington"));
    }
}
