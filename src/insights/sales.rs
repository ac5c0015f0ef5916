//! Sales totals by location, date, and segment (insights 1 to 5).

use chrono::NaiveDate;

use crate::domain::{Column, SalesTable};
use crate::error::InsightError;
use crate::insights::derive::ensure_order_dates;
use crate::insights::group::{sort_desc, sum_by};

/// Best-selling city within one category.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryLeader {
    pub category: String,
    pub city: String,
    pub total: f64,
    /// Every city of the category, largest total first.
    pub ranking: Vec<(String, f64)>,
}

/// Insight 1: which city sells the most within `category`?
///
/// Ties go to the first city in name order.
pub fn top_city_for_category(table: &SalesTable, category: &str) -> Result<CategoryLeader, InsightError> {
    table.require(&[Column::Category, Column::City, Column::SalesValue])?;

    let in_category = table
        .records
        .iter()
        .filter(|r| r.category.as_deref() == Some(category));
    let totals = sum_by(in_category, |r| r.city.clone());

    let ranking = sort_desc(totals.into_iter().collect());
    let Some((city, total)) = ranking.first().cloned() else {
        return Err(InsightError::NoMatchingRows(format!(
            "no sales with Category == '{category}'"
        )));
    };

    Ok(CategoryLeader {
        category: category.to_string(),
        city,
        total,
        ranking,
    })
}

/// Insight 2: total sales per order date, oldest first.
pub fn sales_by_order_date(table: &mut SalesTable) -> Result<Vec<(NaiveDate, f64)>, InsightError> {
    table.require(&[Column::DataOrder, Column::SalesValue])?;
    ensure_order_dates(table)?;
    Ok(sum_by(&table.records, |r| r.order_date).into_iter().collect())
}

/// Insight 3: total sales per state, in state name order.
pub fn sales_by_state(table: &SalesTable) -> Result<Vec<(String, f64)>, InsightError> {
    table.require(&[Column::State, Column::SalesValue])?;
    Ok(sum_by(&table.records, |r| r.state.clone()).into_iter().collect())
}

/// Insight 4: the `n` cities with the highest total sales.
///
/// Returns exactly `min(n, distinct cities)` entries, largest first.
pub fn top_cities(table: &SalesTable, n: usize) -> Result<Vec<(String, f64)>, InsightError> {
    table.require(&[Column::City, Column::SalesValue])?;
    let totals = sum_by(&table.records, |r| r.city.clone());
    let mut ranking = sort_desc(totals.into_iter().collect());
    ranking.truncate(n);
    Ok(ranking)
}

/// Total sales per segment, largest first, with the grand total.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentTotals {
    pub segments: Vec<(String, f64)>,
    pub total: f64,
}

/// Insight 5: which segment had the highest total sales?
pub fn sales_by_segment(table: &SalesTable) -> Result<SegmentTotals, InsightError> {
    table.require(&[Column::Segment, Column::SalesValue])?;
    let totals = sum_by(&table.records, |r| r.segment.clone());
    let segments = sort_desc(totals.into_iter().collect());
    let total = segments.iter().map(|(_, v)| v).sum();
    Ok(SegmentTotals { segments, total })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::read_sales_table;

    const SALES: &str = "\
Category,City,State,Segment,Sales_Value,Data_Order
Office Supplies,Austin,Texas,Consumer,500,02/01/2020
Office Supplies,Dallas,Texas,Corporate,700,01/01/2020
Furniture,Austin,Texas,Consumer,900,02/01/2020
Technology,Seattle,Washington,Home Office,50,15/12/2019
Furniture,Boston,Massachusetts,Consumer,900,01/01/2020
";

    fn table() -> SalesTable {
        read_sales_table(SALES.as_bytes()).unwrap()
    }

    #[test]
    fn office_supplies_leader_is_dallas() {
        let leader = top_city_for_category(&table(), "Office Supplies").unwrap();
        assert_eq!(leader.city, "Dallas");
        assert_eq!(leader.total, 700.0);
        assert_eq!(
            leader.ranking,
            vec![("Dallas".to_string(), 700.0), ("Austin".to_string(), 500.0)]
        );
    }

    #[test]
    fn category_totals_match_filtered_subset() {
        let t = table();
        let leader = top_city_for_category(&t, "Furniture").unwrap();
        let ranked: f64 = leader.ranking.iter().map(|(_, v)| v).sum();
        let subset: f64 = t
            .records
            .iter()
            .filter(|r| r.category.as_deref() == Some("Furniture"))
            .filter_map(|r| r.sales_value)
            .sum();
        assert!((ranked - subset).abs() < 1e-9);
        // Austin and Boston tie at 900; name order decides.
        assert_eq!(leader.city, "Austin");
    }

    #[test]
    fn unknown_category_reports_no_rows() {
        let err = top_city_for_category(&table(), "Toys").unwrap_err();
        assert!(matches!(err, InsightError::NoMatchingRows(_)));
    }

    #[test]
    fn daily_totals_are_date_ordered() {
        let mut t = table();
        let daily = sales_by_order_date(&mut t).unwrap();
        let dates: Vec<_> = daily.iter().map(|(d, _)| d.to_string()).collect();
        assert_eq!(dates, vec!["2019-12-15", "2020-01-01", "2020-01-02"]);
        assert_eq!(daily[1].1, 1600.0);
        assert!(t.derived.order_date);
    }

    #[test]
    fn state_totals_in_name_order() {
        let states = sales_by_state(&table()).unwrap();
        let names: Vec<_> = states.iter().map(|(s, _)| s.as_str()).collect();
        assert_eq!(names, vec!["Massachusetts", "Texas", "Washington"]);
        assert_eq!(states[1].1, 2100.0);
    }

    #[test]
    fn top_cities_bounded_and_non_increasing() {
        let t = table();
        let top = top_cities(&t, 10).unwrap();
        assert_eq!(top.len(), 4);
        assert!(top.windows(2).all(|w| w[0].1 >= w[1].1));
        assert_eq!(top[0], ("Austin".to_string(), 1400.0));

        let top2 = top_cities(&t, 2).unwrap();
        assert_eq!(top2.len(), 2);
        assert_eq!(top2[1].0, "Boston");
    }

    #[test]
    fn segment_totals_and_grand_total() {
        let seg = sales_by_segment(&table()).unwrap();
        assert_eq!(seg.segments[0], ("Consumer".to_string(), 2300.0));
        assert_eq!(seg.segments.last().unwrap().0, "Home Office");
        assert_eq!(seg.total, 3050.0);
    }

    #[test]
    fn missing_column_fails_only_that_insight() {
        let t = read_sales_table("City,Sales_Value\nAustin,1\n".as_bytes()).unwrap();
        assert_eq!(sales_by_state(&t), Err(InsightError::MissingColumn("State")));
        assert!(top_cities(&t, 10).is_ok());
    }
}
