//! Top subcategories with their category rollup (insight 10).

use std::collections::BTreeMap;

use crate::domain::{Column, SalesTable};
use crate::error::InsightError;
use crate::insights::group::{sort_desc, sum_by};

/// Whole-dollar total of one subcategory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubcategoryTotal {
    pub category: String,
    pub subcategory: String,
    pub total: i64,
}

/// The selected subcategories plus totals rolled up to their categories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubcategoryRollup {
    /// Ordered by category; within a category, largest total first.
    pub subcategories: Vec<SubcategoryTotal>,
    /// Sum of the selected subcategories per category, in category order.
    pub categories: Vec<(String, i64)>,
    pub grand_total: i64,
}

/// Insight 10: total sales of the `n` best subcategories, rolled up by category.
///
/// Totals are truncated to whole units before the rollup, so category totals
/// cover the selected subcategories only, not the full dataset.
pub fn top_subcategories(table: &SalesTable, n: usize) -> Result<SubcategoryRollup, InsightError> {
    table.require(&[Column::Category, Column::Subcategory, Column::SalesValue])?;

    let totals = sum_by(&table.records, |r| Some((r.category.clone()?, r.subcategory.clone()?)));
    let mut ranked = sort_desc(totals.into_iter().collect());
    ranked.truncate(n);

    let mut subcategories: Vec<SubcategoryTotal> = ranked
        .into_iter()
        .map(|((category, subcategory), total)| SubcategoryTotal {
            category,
            subcategory,
            total: total.trunc() as i64,
        })
        .collect();
    subcategories.sort_by(|a, b| a.category.cmp(&b.category));

    Ok(rollup(subcategories))
}

/// Roll subcategory totals up to their categories.
pub fn rollup(subcategories: Vec<SubcategoryTotal>) -> SubcategoryRollup {
    let mut by_category: BTreeMap<String, i64> = BTreeMap::new();
    for s in &subcategories {
        *by_category.entry(s.category.clone()).or_insert(0) += s.total;
    }
    let grand_total = by_category.values().sum();

    SubcategoryRollup {
        subcategories,
        categories: by_category.into_iter().collect(),
        grand_total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::read_sales_table;

    fn sub(category: &str, subcategory: &str, total: i64) -> SubcategoryTotal {
        SubcategoryTotal {
            category: category.to_string(),
            subcategory: subcategory.to_string(),
            total,
        }
    }

    #[test]
    fn rollup_sums_selected_subcategories() {
        let r = rollup(vec![sub("Cat1", "A1", 300), sub("Cat1", "A2", 100), sub("Cat2", "B1", 200)]);
        assert_eq!(
            r.categories,
            vec![("Cat1".to_string(), 400), ("Cat2".to_string(), 200)]
        );
        assert_eq!(r.grand_total, 600);
    }

    #[test]
    fn top_n_truncates_and_groups_by_category() {
        let csv = "\
Category,Subcategory,Sales_Value
Technology,Phones,300.9
Furniture,Chairs,250.5
Technology,Copiers,120.2
Furniture,Tables,400.7
Office Supplies,Paper,10
Technology,Phones,0.5
";
        let t = read_sales_table(csv.as_bytes()).unwrap();
        let r = top_subcategories(&t, 3).unwrap();

        assert_eq!(
            r.subcategories,
            vec![
                sub("Furniture", "Tables", 400),
                sub("Furniture", "Chairs", 250),
                sub("Technology", "Phones", 301),
            ]
        );
        assert_eq!(
            r.categories,
            vec![("Furniture".to_string(), 650), ("Technology".to_string(), 301)]
        );
        assert_eq!(r.grand_total, 951);
    }

    #[test]
    fn fewer_subcategories_than_requested() {
        let t = read_sales_table("Category,Subcategory,Sales_Value\nA,a,1\n".as_bytes()).unwrap();
        let r = top_subcategories(&t, 12).unwrap();
        assert_eq!(r.subcategories.len(), 1);
        assert_eq!(r.grand_total, 1);
    }
}
