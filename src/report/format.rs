//! Formatted terminal output for the profile, the insights and the charts.
//!
//! We keep formatting code in one place so:
//! - the aggregation code stays clean and testable
//! - output changes are localized

use chrono::NaiveDate;

use crate::app::pipeline::InsightRun;
use crate::chart::ChartOutcome;
use crate::domain::{InsightConfig, PREMIUM_DISCOUNT, STANDARD_DISCOUNT};
use crate::error::InsightError;
use crate::insights::{MonthlySegmentStats, SubcategoryRollup, YearSegmentTotal};
use crate::math::Describe;
use crate::profile::{DatasetProfile, SampleRow};

/// Longest time series printed in full; longer ones show head and tail.
const SERIES_EDGE: usize = 5;

/// Format the dataset profile.
pub fn format_profile(profile: &DatasetProfile) -> String {
    let mut out = String::new();

    out.push_str("=== Dataset profile ===\n");
    out.push_str(&format!(
        "Shape: {} rows x {} columns\n",
        profile.rows,
        profile.columns.len()
    ));

    out.push_str(&format!("\nFirst {} rows:\n", profile.head.len()));
    out.push_str(&format_samples(&profile.columns, &profile.head));
    out.push_str(&format!("\nLast {} rows:\n", profile.tail.len()));
    out.push_str(&format_samples(&profile.columns, &profile.tail));

    out.push_str("\nColumns:\n");
    out.push_str(&rule_header(&format!("{:<24} {:<8} {:>6}", "column", "dtype", "nulls")));
    out.push_str(&rule_line(&[24, 8, 6]));
    for (idx, name) in profile.columns.iter().enumerate() {
        let dtype = profile.dtypes.get(idx).map(|d| d.label()).unwrap_or("");
        let nulls = profile.null_counts.get(idx).copied().unwrap_or(0);
        push_row(&mut out, format!("{:<24} {:<8} {:>6}", truncate(name, 24), dtype, nulls));
    }

    out.push_str("\nSales_Value summary:\n");
    match &profile.sales_summary {
        Some(summary) => out.push_str(&format_describe(summary)),
        None => out.push_str("  (column `Sales_Value` not present)\n"),
    }

    out.push_str(&format!("\nDuplicate rows: {}", profile.duplicate_lines.len()));
    if !profile.duplicate_lines.is_empty() {
        let lines: Vec<String> = profile.duplicate_lines.iter().map(|l| l.to_string()).collect();
        out.push_str(&format!(" (lines {})", lines.join(", ")));
    }
    out.push('\n');

    out
}

fn format_samples(columns: &[String], rows: &[SampleRow]) -> String {
    let mut out = String::new();
    let header: Vec<String> = columns.iter().map(|c| format!("{:<16}", truncate(c, 16))).collect();
    out.push_str(&rule_header(&format!("{:>6} {}", "line", header.join(" "))));

    let mut widths = vec![6];
    widths.extend(std::iter::repeat_n(16, columns.len()));
    out.push_str(&rule_line(&widths));

    for row in rows {
        let cells: Vec<String> = row.cells.iter().map(|c| format!("{:<16}", truncate(c, 16))).collect();
        push_row(&mut out, format!("{:>6} {}", row.line, cells.join(" ")));
    }
    out
}

fn format_describe(d: &Describe) -> String {
    let mut out = String::new();
    out.push_str(&format!("  {:<6} {:>14}\n", "count", d.count));
    for (label, value) in [
        ("mean", d.mean),
        ("std", d.std),
        ("min", d.min),
        ("25%", d.q25),
        ("50%", d.q50),
        ("75%", d.q75),
        ("max", d.max),
    ] {
        out.push_str(&format!("  {label:<6} {:>14}\n", fmt_opt(value)));
    }
    out
}

/// Format the ten insight answers in order.
pub fn format_insights(run: &InsightRun, config: &InsightConfig) -> String {
    let mut out = String::new();
    out.push_str("=== Insights ===\n");

    section(&mut out, 1, &format!("Best-selling city for '{}'", config.category));
    match &run.category_leader {
        Ok(leader) => {
            out.push_str(&format!("{} ({})\n", leader.city, money(leader.total)));
            out.push_str(&format_totals("city", &leader.ranking));
        }
        Err(e) => push_error(&mut out, e),
    }

    section(&mut out, 2, "Total sales by order date");
    match &run.daily_sales {
        Ok(daily) => out.push_str(&format_daily(daily)),
        Err(e) => push_error(&mut out, e),
    }

    section(&mut out, 3, "Total sales by state");
    match &run.state_sales {
        Ok(states) => out.push_str(&format_totals("state", states)),
        Err(e) => push_error(&mut out, e),
    }

    section(&mut out, 4, &format!("Top {} cities by total sales", config.top_cities));
    match &run.top_cities {
        Ok(cities) => out.push_str(&format_totals("city", cities)),
        Err(e) => push_error(&mut out, e),
    }

    section(&mut out, 5, "Total sales by segment");
    match &run.segment_sales {
        Ok(totals) => {
            out.push_str(&format_totals("segment", &totals.segments));
            out.push_str(&format!("Sales Total: $ {}\n", totals.total.trunc() as i64));
        }
        Err(e) => push_error(&mut out, e),
    }

    section(&mut out, 6, "Total sales per segment and year");
    match &run.yearly_segments {
        Ok(rows) => out.push_str(&format_yearly(rows)),
        Err(e) => push_error(&mut out, e),
    }

    section(&mut out, 7, "Discount simulation");
    match &run.discount_tally {
        Ok(tally) => {
            out.push_str(&format!(
                "{:.0}% discount (sales <= {}): {} rows\n",
                STANDARD_DISCOUNT * 100.0,
                tally.threshold,
                tally.standard
            ));
            out.push_str(&format!(
                "{:.0}% discount (sales >  {}): {} rows\n",
                PREMIUM_DISCOUNT * 100.0,
                tally.threshold,
                tally.premium
            ));
        }
        Err(e) => push_error(&mut out, e),
    }

    section(&mut out, 8, "Average sales before/after the 15% discount");
    match &run.discount_averages {
        Ok(avg) => {
            out.push_str(&format!("Rows: {}\n", avg.rows));
            out.push_str(&format!("Before: {:.2}\n", avg.before));
            out.push_str(&format!("After : {:.2}\n", avg.after));
        }
        Err(e) => push_error(&mut out, e),
    }

    section(&mut out, 9, "Sum, mean and median per segment, year and month");
    match &run.monthly_stats {
        Ok(stats) => out.push_str(&format_monthly(stats)),
        Err(e) => push_error(&mut out, e),
    }

    section(
        &mut out,
        10,
        &format!("Top {} subcategories with category totals", config.top_subcategories),
    );
    match &run.subcategories {
        Ok(rollup) => out.push_str(&format_rollup(rollup)),
        Err(e) => push_error(&mut out, e),
    }

    out.trim_end().to_string()
}

/// Format where each chart was written (or why it was not).
pub fn format_charts(outcomes: &[ChartOutcome]) -> String {
    let mut out = String::from("\n=== Charts ===\n");
    for outcome in outcomes {
        match &outcome.result {
            Ok(path) => out.push_str(&format!("[{:>2}] {}\n", outcome.insight, path.display())),
            Err(e) => out.push_str(&format!("[{:>2}] failed: {e}\n", outcome.insight)),
        }
    }
    out.trim_end().to_string()
}

fn format_totals(key: &str, rows: &[(String, f64)]) -> String {
    let mut out = rule_header(&format!("{key:<24} {:>16}", "Sales_Value"));
    out.push_str(&rule_line(&[24, 16]));
    for (name, total) in rows {
        push_row(&mut out, format!("{:<24} {:>16.2}", truncate(name, 24), total));
    }
    out
}

fn format_daily(daily: &[(NaiveDate, f64)]) -> String {
    let mut out = rule_header(&format!("{:<12} {:>16}", "Data_Order", "Sales_Value"));
    out.push_str(&rule_line(&[12, 16]));

    let elided = daily.len() > 2 * SERIES_EDGE;
    for (idx, (date, total)) in daily.iter().enumerate() {
        if elided && idx >= SERIES_EDGE && idx < daily.len() - SERIES_EDGE {
            if idx == SERIES_EDGE {
                out.push_str(&format!("... ({} dates)\n", daily.len() - 2 * SERIES_EDGE));
            }
            continue;
        }
        push_row(&mut out, format!("{:<12} {:>16.2}", date.format("%Y-%m-%d"), total));
    }
    out
}

fn format_yearly(rows: &[YearSegmentTotal]) -> String {
    let mut out = rule_header(&format!("{:<6} {:<16} {:>16}", "Year", "Segment", "Sales_Value"));
    out.push_str(&rule_line(&[6, 16, 16]));
    for r in rows {
        push_row(
            &mut out,
            format!("{:<6} {:<16} {:>16.2}", r.year, truncate(&r.segment, 16), r.total),
        );
    }
    out
}

fn format_monthly(stats: &[MonthlySegmentStats]) -> String {
    let mut out = rule_header(&format!(
        "{:<6} {:>5} {:<16} {:>14} {:>12} {:>12}",
        "Year", "Month", "Segment", "sum", "mean", "median"
    ));
    out.push_str(&rule_line(&[6, 5, 16, 14, 12, 12]));
    for s in stats {
        push_row(
            &mut out,
            format!(
                "{:<6} {:>5} {:<16} {:>14.2} {:>12.2} {:>12.2}",
                s.year,
                s.month,
                truncate(&s.segment, 16),
                s.sum,
                s.mean,
                s.median
            ),
        );
    }
    out
}

fn format_rollup(rollup: &SubcategoryRollup) -> String {
    let mut out = rule_header(&format!("{:<20} {:<20} {:>12}", "Category", "Subcategory", "Sales_Value"));
    out.push_str(&rule_line(&[20, 20, 12]));
    for s in &rollup.subcategories {
        push_row(
            &mut out,
            format!(
                "{:<20} {:<20} {:>12}",
                truncate(&s.category, 20),
                truncate(&s.subcategory, 20),
                s.total
            ),
        );
    }

    out.push_str("\nCategory totals:\n");
    for (category, total) in &rollup.categories {
        push_row(&mut out, format!("{:<20} {:>12}", truncate(category, 20), total));
    }
    out.push_str(&format!("Sales Total: $ {}\n", rollup.grand_total));
    out
}

fn section(out: &mut String, insight: u8, title: &str) {
    out.push_str(&format!("\n[{insight}] {title}\n"));
}

fn push_error(out: &mut String, err: &InsightError) {
    out.push_str(&format!("error: {err}\n"));
}

fn push_row(out: &mut String, row: String) {
    out.push_str(row.trim_end());
    out.push('\n');
}

fn rule_header(header: &str) -> String {
    let mut out = String::new();
    push_row(&mut out, header.to_string());
    out
}

fn rule_line(widths: &[usize]) -> String {
    let parts: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    let mut out = parts.join(" ");
    out.push('\n');
    out
}

fn money(v: f64) -> String {
    format!("$ {v:.2}")
}

fn fmt_opt(v: Option<f64>) -> String {
    v.map(|x| format!("{x:.2}")).unwrap_or_else(|| "NaN".to_string())
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for (i, ch) in s.chars().enumerate() {
        if i + 1 >= max {
            break;
        }
        out.push(ch);
    }
    out.push('.');
    out
}
