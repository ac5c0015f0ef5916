//! Group-by primitives shared by the insights.
//!
//! Groups are keyed in a `BTreeMap`, so they come out in ascending key order.
//! Every ranking built on top sorts stably, which makes ties resolve to the
//! first group in key order.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::domain::SalesRecord;

/// Sum `Sales_Value` per key.
///
/// Rows whose key or `Sales_Value` is null are skipped.
pub fn sum_by<'a, K, F>(records: impl IntoIterator<Item = &'a SalesRecord>, key: F) -> BTreeMap<K, f64>
where
    K: Ord,
    F: Fn(&'a SalesRecord) -> Option<K>,
{
    let mut groups = BTreeMap::new();
    for record in records {
        let (Some(k), Some(v)) = (key(record), record.sales_value) else {
            continue;
        };
        *groups.entry(k).or_insert(0.0) += v;
    }
    groups
}

/// Collect `Sales_Value` samples per key (same skipping rules as [`sum_by`]).
pub fn values_by<'a, K, F>(
    records: impl IntoIterator<Item = &'a SalesRecord>,
    key: F,
) -> BTreeMap<K, Vec<f64>>
where
    K: Ord,
    F: Fn(&'a SalesRecord) -> Option<K>,
{
    let mut groups: BTreeMap<K, Vec<f64>> = BTreeMap::new();
    for record in records {
        let (Some(k), Some(v)) = (key(record), record.sales_value) else {
            continue;
        };
        groups.entry(k).or_default().push(v);
    }
    groups
}

/// Stable sort by value, largest first.
pub fn sort_desc<K>(mut pairs: Vec<(K, f64)>) -> Vec<(K, f64)> {
    pairs.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
    pairs
}
