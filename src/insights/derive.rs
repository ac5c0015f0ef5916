//! Derived columns, added to the table in place.
//!
//! Each `ensure_*` call is a no-op once its column exists, so insights can ask
//! for what they need without caring about execution order.

use chrono::Datelike;
use tracing::debug;

use crate::domain::{Column, DiscountTier, SalesTable};
use crate::error::InsightError;
use crate::io::parse_order_date;

/// Parse `Data_Order` into `order_date` for every row.
///
/// All-or-nothing: the first missing or malformed date fails the call and no
/// row is updated.
pub fn ensure_order_dates(table: &mut SalesTable) -> Result<(), InsightError> {
    if table.derived.order_date {
        return Ok(());
    }
    table.require(&[Column::DataOrder])?;

    let parsed = table
        .records
        .iter()
        .map(|r| {
            let raw = r
                .data_order
                .as_deref()
                .ok_or(InsightError::MissingDate { line: r.line })?;
            parse_order_date(raw).ok_or_else(|| InsightError::DateParse {
                line: r.line,
                value: raw.to_string(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    for (record, date) in table.records.iter_mut().zip(parsed) {
        record.order_date = Some(date);
    }
    table.derived.order_date = true;
    debug!(rows = table.row_count(), "derived column Data_Order (date)");
    Ok(())
}

/// Derive `Year` from the parsed order date.
pub fn ensure_year(table: &mut SalesTable) -> Result<(), InsightError> {
    if table.derived.year {
        return Ok(());
    }
    ensure_order_dates(table)?;
    for record in &mut table.records {
        record.year = record.order_date.map(|d| d.year());
    }
    table.derived.year = true;
    debug!("derived column Year");
    Ok(())
}

/// Derive `Month` (1-12) from the parsed order date.
pub fn ensure_month(table: &mut SalesTable) -> Result<(), InsightError> {
    if table.derived.month {
        return Ok(());
    }
    ensure_order_dates(table)?;
    for record in &mut table.records {
        record.month = record.order_date.map(|d| d.month());
    }
    table.derived.month = true;
    debug!("derived column Month");
    Ok(())
}

/// Derive `Discount`: 0.15 when `Sales_Value > threshold`, else 0.10.
///
/// Re-derived when called with a threshold other than the last one.
pub fn ensure_discount(table: &mut SalesTable, threshold: f64) -> Result<(), InsightError> {
    if table.derived.discount == Some(threshold) {
        return Ok(());
    }
    table.require(&[Column::SalesValue])?;
    for record in &mut table.records {
        record.discount = Some(DiscountTier::for_sale(record.sales_value, threshold).rate());
    }
    table.derived.discount = Some(threshold);
    debug!(threshold, "derived column Discount");
    Ok(())
}

/// Derive `Sales_Value_Discount = Sales_Value * (1 - Discount)`.
pub fn ensure_discounted_value(table: &mut SalesTable, threshold: f64) -> Result<(), InsightError> {
    if table.derived.sales_value_discount == Some(threshold) {
        return Ok(());
    }
    ensure_discount(table, threshold)?;
    for record in &mut table.records {
        record.sales_value_discount = match (record.sales_value, record.discount) {
            (Some(v), Some(d)) => Some(discounted(v, d)),
            _ => None,
        };
    }
    table.derived.sales_value_discount = Some(threshold);
    debug!("derived column Sales_Value_Discount");
    Ok(())
}

/// Sale value after applying `discount`.
pub fn discounted(sales_value: f64, discount: f64) -> f64 {
    sales_value * (1.0 - discount)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::read_sales_table;

    #[test]
    fn dates_yield_year_and_month() {
        let mut table =
            read_sales_table("Data_Order,Sales_Value\n08/11/2017,1\n12/06/2016,2\n".as_bytes()).unwrap();
        ensure_month(&mut table).unwrap();
        ensure_year(&mut table).unwrap();
        assert_eq!(table.records[0].year, Some(2017));
        assert_eq!(table.records[0].month, Some(11));
        assert_eq!(table.records[1].month, Some(6));
    }

    #[test]
    fn bad_date_names_the_row_and_leaves_table_untouched() {
        let mut table =
            read_sales_table("Data_Order,Sales_Value\n08/11/2017,1\n2017-13-45,2\n".as_bytes()).unwrap();
        let err = ensure_order_dates(&mut table).unwrap_err();
        assert_eq!(
            err,
            InsightError::DateParse { line: 3, value: "2017-13-45".to_string() }
        );
        assert!(!table.derived.order_date);
        assert_eq!(table.records[0].order_date, None);
    }

    #[test]
    fn missing_date_column_is_a_schema_error() {
        let mut table = read_sales_table("Sales_Value\n1\n".as_bytes()).unwrap();
        assert_eq!(ensure_year(&mut table), Err(InsightError::MissingColumn("Data_Order")));
    }

    #[test]
    fn empty_date_cell_is_reported() {
        let mut table = read_sales_table("Data_Order,Sales_Value\n,1\n".as_bytes()).unwrap();
        assert_eq!(ensure_order_dates(&mut table), Err(InsightError::MissingDate { line: 2 }));
    }

    #[test]
    fn discount_rule_examples() {
        let mut table = read_sales_table("Sales_Value\n1200\n800\n1000\n".as_bytes()).unwrap();
        ensure_discounted_value(&mut table, 1000.0).unwrap();

        let r = &table.records;
        assert_eq!(r[0].discount, Some(0.15));
        assert!((r[0].sales_value_discount.unwrap() - 1020.0).abs() < 1e-9);
        assert_eq!(r[1].discount, Some(0.10));
        assert!((r[1].sales_value_discount.unwrap() - 720.0).abs() < 1e-9);
        // Strictly greater than the threshold.
        assert_eq!(r[2].discount, Some(0.10));
    }

    #[test]
    fn new_threshold_rederives_discounts() {
        let mut table = read_sales_table("Sales_Value\n1200\n800\n".as_bytes()).unwrap();
        ensure_discounted_value(&mut table, 500.0).unwrap();
        assert_eq!(table.records[1].discount, Some(0.15));

        ensure_discounted_value(&mut table, 1000.0).unwrap();
        assert_eq!(table.records[1].discount, Some(0.10));
        assert!((table.records[1].sales_value_discount.unwrap() - 720.0).abs() < 1e-9);
        assert_eq!(table.derived.discount, Some(1000.0));
        assert_eq!(table.derived.sales_value_discount, Some(1000.0));
    }
}
