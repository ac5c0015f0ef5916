//! Dataset profiling: shape, samples, column types, `Sales_Value` summary,
//! duplicate rows, and null counts.
//!
//! Profiling is read-only; it works on the raw cells so it also covers columns
//! the insights never touch.

use std::collections::HashSet;

use crate::domain::{Column, SalesTable, is_null_token};
use crate::math::{Describe, describe};

/// Inferred storage type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DType {
    Int64,
    Float64,
    Object,
}

impl DType {
    pub fn label(self) -> &'static str {
        match self {
            DType::Int64 => "int64",
            DType::Float64 => "float64",
            DType::Object => "object",
        }
    }
}

/// A sampled row, tagged with its CSV line number.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleRow {
    pub line: usize,
    pub cells: Vec<String>,
}

/// Everything the loader/profiler step reports.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetProfile {
    pub rows: usize,
    pub columns: Vec<String>,
    pub head: Vec<SampleRow>,
    pub tail: Vec<SampleRow>,
    pub dtypes: Vec<DType>,
    /// `None` when the dataset has no `Sales_Value` column.
    pub sales_summary: Option<Describe>,
    /// Lines of rows identical to an earlier row.
    pub duplicate_lines: Vec<usize>,
    pub null_counts: Vec<usize>,
}

/// Profile `table`, sampling `sample_rows` rows at each end.
pub fn profile_table(table: &SalesTable, sample_rows: usize) -> DatasetProfile {
    let rows = table.row_count();
    let sample = |idx: usize| SampleRow {
        line: table.records[idx].line,
        cells: table.cells[idx].clone(),
    };

    let head = (0..rows.min(sample_rows)).map(sample).collect();
    let tail = (rows.saturating_sub(sample_rows)..rows).map(sample).collect();

    let dtypes = (0..table.column_count())
        .map(|col| infer_dtype(table.cells.iter().map(|row| cell(row, col))))
        .collect();

    let null_counts = (0..table.column_count())
        .map(|col| table.cells.iter().filter(|row| is_null_token(cell(row, col))).count())
        .collect();

    let sales_summary = table.has_column(Column::SalesValue).then(|| {
        let values: Vec<f64> = table.records.iter().filter_map(|r| r.sales_value).collect();
        describe(&values)
    });

    DatasetProfile {
        rows,
        columns: table.columns.clone(),
        head,
        tail,
        dtypes,
        sales_summary,
        duplicate_lines: duplicate_lines(table),
        null_counts,
    }
}

/// Lines of exact-duplicate rows (every occurrence after the first).
pub fn duplicate_lines(table: &SalesTable) -> Vec<usize> {
    let mut seen: HashSet<&[String]> = HashSet::with_capacity(table.row_count());
    table
        .cells
        .iter()
        .zip(&table.records)
        .filter(|(cells, _)| !seen.insert(cells.as_slice()))
        .map(|(_, record)| record.line)
        .collect()
}

/// Infer a column type from its cells; null cells are ignored.
///
/// An integer column with any null is `float64`, since the missing values
/// can only be represented as NaN.
pub fn infer_dtype<'a>(cells: impl Iterator<Item = &'a str>) -> DType {
    let mut dtype = None;
    let mut has_null = false;
    for value in cells {
        if is_null_token(value) {
            has_null = true;
            continue;
        }
        let this = if value.parse::<i64>().is_ok() {
            DType::Int64
        } else if value.parse::<f64>().is_ok() {
            DType::Float64
        } else {
            return DType::Object;
        };
        dtype = Some(match (dtype, this) {
            (Some(DType::Float64), _) | (_, DType::Float64) => DType::Float64,
            _ => DType::Int64,
        });
    }
    match dtype {
        Some(DType::Int64) if has_null => DType::Float64,
        Some(dtype) => dtype,
        None => DType::Object,
    }
}

fn cell(row: &[String], col: usize) -> &str {
    row.get(col).map(String::as_str).unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::read_sales_table;

    const SAMPLE: &str = "\
Row_ID,City,Segment,Sales_Value
1,Austin,Consumer,10
2,Dallas,,20.5
3,Austin,Consumer,10
1,Austin,Consumer,10
5,Houston,Corporate,
";

    #[test]
    fn reports_shape_and_samples() {
        let table = read_sales_table(SAMPLE.as_bytes()).unwrap();
        let profile = profile_table(&table, 2);
        assert_eq!(profile.rows, 5);
        assert_eq!(profile.columns.len(), 4);
        assert_eq!(profile.head.len(), 2);
        assert_eq!(profile.head[0].line, 2);
        assert_eq!(profile.tail.len(), 2);
        assert_eq!(profile.tail[1].cells[1], "Houston");
    }

    #[test]
    fn infers_column_types() {
        let table = read_sales_table(SAMPLE.as_bytes()).unwrap();
        let profile = profile_table(&table, 5);
        assert_eq!(
            profile.dtypes,
            vec![DType::Int64, DType::Object, DType::Object, DType::Float64]
        );
    }

    #[test]
    fn counts_duplicates_and_nulls() {
        let table = read_sales_table(SAMPLE.as_bytes()).unwrap();
        let profile = profile_table(&table, 5);
        assert_eq!(profile.duplicate_lines, vec![5]);
        assert_eq!(profile.null_counts, vec![0, 0, 1, 1]);
    }

    #[test]
    fn summarizes_non_null_sales() {
        let table = read_sales_table(SAMPLE.as_bytes()).unwrap();
        let summary = profile_table(&table, 5).sales_summary.unwrap();
        assert_eq!(summary.count, 4);
        assert_eq!(summary.max, Some(20.5));
    }

    #[test]
    fn all_null_column_is_object() {
        assert_eq!(infer_dtype(["", ""].into_iter()), DType::Object);
        assert_eq!(infer_dtype(["1", "2.5"].into_iter()), DType::Float64);
    }

    #[test]
    fn integers_with_nulls_are_float() {
        assert_eq!(infer_dtype(["1", "", "2"].into_iter()), DType::Float64);
        assert_eq!(infer_dtype(["1", "NA"].into_iter()), DType::Float64);
        assert_eq!(infer_dtype(["1", "2"].into_iter()), DType::Int64);
        assert_eq!(infer_dtype(["a", "NaN"].into_iter()), DType::Object);
    }

    #[test]
    fn null_markers_count_as_nulls() {
        let csv = "City,Sales_Value\nAustin,NA\nN/A,NaN\nDallas,3\n";
        let table = read_sales_table(csv.as_bytes()).unwrap();
        let profile = profile_table(&table, 5);
        assert_eq!(profile.null_counts, vec![1, 2]);
        assert_eq!(profile.dtypes, vec![DType::Object, DType::Float64]);
        assert_eq!(profile.sales_summary.unwrap().count, 1);
    }
}
