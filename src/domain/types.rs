//! Shared domain types.
//!
//! These types are intentionally kept lightweight so they can be:
//!
//! - built once by the CSV loader
//! - mutated in place as derived columns are added
//! - consumed by the insight, report, and chart layers without conversions

use std::path::PathBuf;

use chrono::NaiveDate;
use serde::Deserialize;

/// Discount rate applied to sales at or below the threshold.
pub const STANDARD_DISCOUNT: f64 = 0.10;

/// Discount rate applied to sales strictly above the threshold.
pub const PREMIUM_DISCOUNT: f64 = 0.15;

/// Cell texts read as a missing value (besides the empty cell).
pub const NULL_TOKENS: [&str; 7] = ["NA", "N/A", "NaN", "nan", "null", "NULL", "<NA>"];

/// Whether a (trimmed) CSV cell holds a missing value.
pub fn is_null_token(cell: &str) -> bool {
    cell.is_empty() || NULL_TOKENS.contains(&cell)
}

/// Columns the pipeline knows how to use, by their dataset header names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Column {
    Category,
    Subcategory,
    City,
    State,
    Segment,
    SalesValue,
    DataOrder,
}

impl Column {
    pub const ALL: [Column; 7] = [
        Column::Category,
        Column::Subcategory,
        Column::City,
        Column::State,
        Column::Segment,
        Column::SalesValue,
        Column::DataOrder,
    ];

    /// Header name as it appears in the CSV.
    pub fn header(self) -> &'static str {
        match self {
            Column::Category => "Category",
            Column::Subcategory => "Subcategory",
            Column::City => "City",
            Column::State => "State",
            Column::Segment => "Segment",
            Column::SalesValue => "Sales_Value",
            Column::DataOrder => "Data_Order",
        }
    }
}

/// Typed view of one CSV record, deserialized by header name.
///
/// Every field is optional: an empty cell or an absent column both map to
/// `None`, and schema checks happen per insight via [`SalesTable::require`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSalesRow {
    #[serde(rename = "Category", default)]
    pub category: Option<String>,
    #[serde(rename = "Subcategory", default)]
    pub subcategory: Option<String>,
    #[serde(rename = "City", default)]
    pub city: Option<String>,
    #[serde(rename = "State", default)]
    pub state: Option<String>,
    #[serde(rename = "Segment", default)]
    pub segment: Option<String>,
    #[serde(rename = "Sales_Value", default)]
    pub sales_value: Option<f64>,
    #[serde(rename = "Data_Order", default)]
    pub data_order: Option<String>,
}

/// One row of the sales table, including derived columns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SalesRecord {
    /// 1-based CSV line number (header is line 1).
    pub line: usize,

    pub category: Option<String>,
    pub subcategory: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub segment: Option<String>,
    pub sales_value: Option<f64>,
    /// Raw `Data_Order` text, day-first.
    pub data_order: Option<String>,

    /// Parsed `Data_Order` (set by [`crate::insights::derive::ensure_order_dates`]).
    pub order_date: Option<NaiveDate>,
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub discount: Option<f64>,
    pub sales_value_discount: Option<f64>,
}

impl SalesRecord {
    pub fn from_raw(line: usize, raw: RawSalesRow) -> Self {
        Self {
            line,
            category: raw.category,
            subcategory: raw.subcategory,
            city: raw.city,
            state: raw.state,
            segment: raw.segment,
            sales_value: raw.sales_value,
            data_order: raw.data_order,
            ..Self::default()
        }
    }

    /// Grouping key for a string column (ignores the derived columns).
    pub fn text(&self, column: Column) -> Option<&str> {
        match column {
            Column::Category => self.category.as_deref(),
            Column::Subcategory => self.subcategory.as_deref(),
            Column::City => self.city.as_deref(),
            Column::State => self.state.as_deref(),
            Column::Segment => self.segment.as_deref(),
            Column::DataOrder => self.data_order.as_deref(),
            Column::SalesValue => None,
        }
    }
}

/// Which derived columns have been materialized on the table so far.
///
/// The discount columns record the threshold they were derived with, so a
/// different threshold re-derives them.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DerivedColumns {
    pub order_date: bool,
    pub year: bool,
    pub month: bool,
    pub discount: Option<f64>,
    pub sales_value_discount: Option<f64>,
}

/// The in-memory sales dataset.
///
/// `cells` keeps the raw text of every CSV column (including ones the
/// pipeline never reads) for profiling; `records` is the typed view.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SalesTable {
    pub columns: Vec<String>,
    pub cells: Vec<Vec<String>>,
    pub records: Vec<SalesRecord>,
    pub derived: DerivedColumns,
}

impl SalesTable {
    pub fn row_count(&self) -> usize {
        self.records.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn has_column(&self, column: Column) -> bool {
        self.columns.iter().any(|c| c == column.header())
    }

    /// Fail with the first of `columns` missing from the header.
    pub fn require(&self, columns: &[Column]) -> Result<(), crate::error::InsightError> {
        match columns.iter().find(|c| !self.has_column(**c)) {
            Some(missing) => Err(crate::error::InsightError::MissingColumn(missing.header())),
            None => Ok(()),
        }
    }
}

/// Discount tier assigned by the simulation rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiscountTier {
    Standard,
    Premium,
}

impl DiscountTier {
    /// `Premium` iff `sales_value > threshold`; a null sale compares false.
    pub fn for_sale(sales_value: Option<f64>, threshold: f64) -> Self {
        match sales_value {
            Some(v) if v > threshold => DiscountTier::Premium,
            _ => DiscountTier::Standard,
        }
    }

    pub fn rate(self) -> f64 {
        match self {
            DiscountTier::Standard => STANDARD_DISCOUNT,
            DiscountTier::Premium => PREMIUM_DISCOUNT,
        }
    }
}

/// A full run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus environment and defaults).
#[derive(Debug, Clone, PartialEq)]
pub struct InsightConfig {
    pub csv_path: PathBuf,
    /// Category filtered by insight 1.
    pub category: String,
    pub top_cities: usize,
    pub top_subcategories: usize,
    /// Sales strictly above this get the premium discount.
    pub discount_threshold: f64,
    /// Rows shown in the head/tail samples.
    pub sample_rows: usize,
    pub charts: bool,
    pub charts_dir: PathBuf,
}

impl Default for InsightConfig {
    fn default() -> Self {
        Self {
            csv_path: PathBuf::from(crate::DEFAULT_DATASET_PATH),
            category: "Office Supplies".to_string(),
            top_cities: 10,
            top_subcategories: 12,
            discount_threshold: 1000.0,
            sample_rows: 5,
            charts: true,
            charts_dir: PathBuf::from("charts"),
        }
    }
}
