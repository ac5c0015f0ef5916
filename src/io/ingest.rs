//! CSV ingest.
//!
//! This module is responsible for turning the sales CSV into a `SalesTable`:
//! the raw cells of every column (for profiling) plus a typed row view (for
//! the insights).
//!
//! Design goals:
//! - **Lenient schema** at load time: absent known columns are tolerated and
//!   reported later by the insight that needs them
//! - **Null markers**: empty cells and `NA`/`NaN`/`null`-style tokens are
//!   missing values
//! - **Strict values**: a malformed record or `Sales_Value` aborts the load
//!   (exit code 2) with the offending line
//! - **Separation of concerns**: no aggregation logic here

use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use csv::StringRecord;
use tracing::{debug, info};

use crate::domain::{Column, RawSalesRow, SalesRecord, SalesTable, is_null_token};
use crate::error::AppError;

/// Load the sales CSV at `path`.
pub fn load_sales_table(path: &Path) -> Result<SalesTable, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open CSV '{}': {e}", path.display())))?;
    let table = read_sales_table(file)?;

    info!(
        path = %path.display(),
        rows = table.row_count(),
        columns = table.column_count(),
        "loaded sales dataset"
    );
    Ok(table)
}

/// Parse a sales CSV from any reader (header row required).
pub fn read_sales_table<R: Read>(input: R) -> Result<SalesTable, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(input);

    let headers = reader
        .headers()
        .map_err(|e| AppError::new(2, format!("Failed to read CSV headers: {e}")))?;
    let headers = normalize_headers(headers);

    if headers.is_empty() {
        return Err(AppError::new(2, "CSV has no header row."));
    }

    let missing: Vec<&str> = Column::ALL
        .iter()
        .filter(|c| !headers.iter().any(|h| h == c.header()))
        .map(|c| c.header())
        .collect();
    if !missing.is_empty() {
        debug!(?missing, "known columns absent from header");
    }

    let mut cells = Vec::new();
    let mut records = Vec::new();

    for (idx, result) in reader.records().enumerate() {
        // +2 because:
        // - records() starts at line 1 after headers
        // - CSV is 1-based line numbers
        let line = idx + 2;

        let record = result.map_err(|e| AppError::new(2, format!("line {line}: CSV parse error: {e}")))?;
        // Null markers become empty cells, which deserialize to `None`.
        let typed: StringRecord = record
            .iter()
            .map(|cell| if is_null_token(cell) { "" } else { cell })
            .collect();
        let raw: RawSalesRow = typed.deserialize(Some(&headers)).map_err(|e| {
            AppError::new(2, format!("line {line}: invalid value: {e}"))
        })?;

        if let Some(v) = raw.sales_value {
            if !v.is_finite() {
                return Err(AppError::new(
                    2,
                    format!("line {line}: non-finite `Sales_Value` ({v})"),
                ));
            }
        }

        cells.push(record.iter().map(str::to_string).collect());
        records.push(SalesRecord::from_raw(line, raw));
    }

    Ok(SalesTable {
        columns: headers.iter().map(str::to_string).collect(),
        cells,
        records,
        derived: Default::default(),
    })
}

fn normalize_headers(headers: &StringRecord) -> StringRecord {
    // Excel and other tools sometimes emit UTF-8 CSVs with a BOM prefix on the
    // first header. If we don't strip it, `Category` would never match.
    headers
        .iter()
        .map(|name| name.trim().trim_start_matches('\u{feff}'))
        .collect()
}

/// Parse an order date, day-first.
///
/// `DD/MM/YYYY` is the dataset format; `DD-MM-YYYY` and ISO dates are also
/// accepted. Month-first input is never tried, so `03/04/2020` is 3 April.
pub fn parse_order_date(s: &str) -> Option<NaiveDate> {
    const FMTS: [&str; 3] = ["%d/%m/%Y", "%d-%m-%Y", "%Y-%m-%d"];
    FMTS.iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s.trim(), fmt).ok())
}
