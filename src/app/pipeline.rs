//! Shared "insight pipeline" logic used by every subcommand.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! load -> profile -> insights 1..10 (in order) -> charts
//!
//! Front-ends then only decide what to print.

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::domain::{InsightConfig, SalesTable};
use crate::error::{AppError, InsightError};
use crate::insights::{
    CategoryLeader, DiscountAverages, DiscountTally, MonthlySegmentStats, SegmentTotals, SubcategoryRollup,
    YearSegmentTotal,
};
use crate::profile::{DatasetProfile, profile_table};

/// Results of the ten insights, in execution order.
///
/// Each slot holds its own outcome: a failed insight does not stop the rest.
#[derive(Debug, Clone, PartialEq)]
pub struct InsightRun {
    pub category_leader: Result<CategoryLeader, InsightError>,
    pub daily_sales: Result<Vec<(NaiveDate, f64)>, InsightError>,
    pub state_sales: Result<Vec<(String, f64)>, InsightError>,
    pub top_cities: Result<Vec<(String, f64)>, InsightError>,
    pub segment_sales: Result<SegmentTotals, InsightError>,
    pub yearly_segments: Result<Vec<YearSegmentTotal>, InsightError>,
    pub discount_tally: Result<DiscountTally, InsightError>,
    pub discount_averages: Result<DiscountAverages, InsightError>,
    pub monthly_stats: Result<Vec<MonthlySegmentStats>, InsightError>,
    pub subcategories: Result<SubcategoryRollup, InsightError>,
}

impl InsightRun {
    /// Number of insights that failed.
    pub fn failures(&self) -> usize {
        [
            self.category_leader.is_err(),
            self.daily_sales.is_err(),
            self.state_sales.is_err(),
            self.top_cities.is_err(),
            self.segment_sales.is_err(),
            self.yearly_segments.is_err(),
            self.discount_tally.is_err(),
            self.discount_averages.is_err(),
            self.monthly_stats.is_err(),
            self.subcategories.is_err(),
        ]
        .into_iter()
        .filter(|failed| *failed)
        .count()
    }
}

/// Load and (optionally) profile the dataset named by `config`.
pub fn load(config: &InsightConfig, profile: bool) -> Result<(SalesTable, Option<DatasetProfile>), AppError> {
    let table = crate::io::load_sales_table(&config.csv_path)?;
    let profile = profile.then(|| profile_table(&table, config.sample_rows));
    Ok((table, profile))
}

/// Run insights 1 to 10 in order, adding derived columns to `table` as needed.
pub fn run_insights(table: &mut SalesTable, config: &InsightConfig) -> InsightRun {
    use crate::insights as q;

    let threshold = config.discount_threshold;
    InsightRun {
        category_leader: logged(1, q::top_city_for_category(table, &config.category)),
        daily_sales: logged(2, q::sales_by_order_date(table)),
        state_sales: logged(3, q::sales_by_state(table)),
        top_cities: logged(4, q::top_cities(table, config.top_cities)),
        segment_sales: logged(5, q::sales_by_segment(table)),
        yearly_segments: logged(6, q::sales_by_year_segment(table)),
        discount_tally: logged(7, q::simulate_discount(table, threshold)),
        discount_averages: logged(8, q::discount_averages(table, threshold)),
        monthly_stats: logged(9, q::monthly_segment_stats(table)),
        subcategories: logged(10, q::top_subcategories(table, config.top_subcategories)),
    }
}

fn logged<T>(insight: u8, result: Result<T, InsightError>) -> Result<T, InsightError> {
    match &result {
        Ok(_) => info!(insight, "insight computed"),
        Err(e) => warn!(insight, error = %e, "insight failed"),
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::read_sales_table;

    const SALES: &str = "\
Category,Subcategory,City,State,Segment,Sales_Value,Data_Order
Office Supplies,Paper,Austin,Texas,Consumer,500,02/01/2020
Office Supplies,Binders,Dallas,Texas,Corporate,700,01/01/2020
Furniture,Chairs,Austin,Texas,Consumer,1200,02/01/2020
Technology,Phones,Seattle,Washington,Home Office,1500.5,15/12/2019
";

    #[test]
    fn all_insights_succeed_on_complete_data() {
        let mut table = read_sales_table(SALES.as_bytes()).unwrap();
        let run = run_insights(&mut table, &InsightConfig::default());
        assert_eq!(run.failures(), 0);
        assert_eq!(run.category_leader.as_ref().unwrap().city, "Dallas");
        assert_eq!(run.discount_tally.as_ref().unwrap().premium, 2);
        assert_eq!(table.derived.sales_value_discount, Some(1000.0));
        assert!(table.derived.month);
    }

    #[test]
    fn rerun_on_fresh_copy_is_identical() {
        let loaded = read_sales_table(SALES.as_bytes()).unwrap();
        let config = InsightConfig::default();

        let first = run_insights(&mut loaded.clone(), &config);
        let second = run_insights(&mut loaded.clone(), &config);
        assert_eq!(first, second);
    }

    #[test]
    fn bad_date_only_fails_date_insights() {
        let csv = SALES.replace("15/12/2019", "15/13/2019");
        let mut table = read_sales_table(csv.as_bytes()).unwrap();
        let run = run_insights(&mut table, &InsightConfig::default());

        assert_eq!(run.failures(), 3);
        assert!(matches!(run.daily_sales, Err(InsightError::DateParse { line: 5, .. })));
        assert!(run.yearly_segments.is_err());
        assert!(run.monthly_stats.is_err());
        assert!(run.subcategories.is_ok());
    }

    #[test]
    fn missing_category_reports_no_rows() {
        let mut table = read_sales_table(SALES.as_bytes()).unwrap();
        let config = InsightConfig {
            category: "Toys".to_string(),
            ..InsightConfig::default()
        };
        let run = run_insights(&mut table, &config);
        assert!(matches!(run.category_leader, Err(InsightError::NoMatchingRows(_))));
        assert_eq!(run.failures(), 1);
    }
}
