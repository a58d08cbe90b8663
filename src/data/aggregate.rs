use std::collections::{BTreeMap, BTreeSet};
use std::ops::AddAssign;

use super::filter::FilteredView;
use super::model::{Dimension, Record};

// ---------------------------------------------------------------------------
// Summary – the KPIs and grouped sums of one filtered view
// ---------------------------------------------------------------------------

/// Scalar KPIs and grouped sums over a filtered view. A pure function of the
/// view; recomputed on every filter change and never cached.
///
/// Mean-based KPIs are `None` when the view is empty, so the presentation
/// layer can show a "no data" state instead of a division-by-zero artefact.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub row_count: usize,
    pub total_sale_amount: f64,
    pub average_sale_amount: Option<f64>,
    pub total_units: i64,
    pub average_units: Option<f64>,
    pub distinct_manager_count: usize,
    pub distinct_sales_man_count: usize,
    /// Who sold the most, by amount.
    pub sale_amount_by_sales_man: BTreeMap<String, f64>,
    /// Which item moved the most units.
    pub units_by_item: BTreeMap<String, i64>,
    pub sale_amount_by_region: BTreeMap<String, f64>,
    pub sale_amount_by_manager: BTreeMap<String, f64>,
}

/// Sum a numeric field partitioned by a dimension's distinct values.
/// Keys are sorted ascending for deterministic chart and report output.
pub fn group_sum<T, F>(view: &FilteredView, dimension: Dimension, value: F) -> BTreeMap<String, T>
where
    T: Default + AddAssign + Copy,
    F: Fn(&Record) -> T,
{
    let mut groups: BTreeMap<String, T> = BTreeMap::new();
    for record in view.records() {
        *groups
            .entry(dimension.value_of(record).to_string())
            .or_default() += value(record);
    }
    groups
}

fn distinct_count(view: &FilteredView, dimension: Dimension) -> usize {
    view.records()
        .map(|r| dimension.value_of(r))
        .collect::<BTreeSet<_>>()
        .len()
}

/// Compute all KPIs and grouped sums for a view.
pub fn summarize(view: &FilteredView) -> Summary {
    let row_count = view.len();
    let total_sale_amount: f64 = view.records().map(|r| r.sale_amount).sum();
    let total_units: i64 = view.records().map(|r| r.units).sum();

    // Guard the means: an all-deselected filter is a normal state.
    let (average_sale_amount, average_units) = if row_count == 0 {
        (None, None)
    } else {
        (
            Some(total_sale_amount / row_count as f64),
            Some(total_units as f64 / row_count as f64),
        )
    };

    Summary {
        row_count,
        total_sale_amount,
        average_sale_amount,
        total_units,
        average_units,
        distinct_manager_count: distinct_count(view, Dimension::Manager),
        distinct_sales_man_count: distinct_count(view, Dimension::SalesMan),
        sale_amount_by_sales_man: group_sum(view, Dimension::SalesMan, |r| r.sale_amount),
        units_by_item: group_sum(view, Dimension::Item, |r| r.units),
        sale_amount_by_region: group_sum(view, Dimension::Region, |r| r.sale_amount),
        sale_amount_by_manager: group_sum(view, Dimension::Manager, |r| r.sale_amount),
    }
}
