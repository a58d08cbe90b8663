use std::collections::{BTreeMap, BTreeSet};

use super::model::{Dataset, Dimension, Record};

// ---------------------------------------------------------------------------
// FilterSelection: which category values are allowed per dimension
// ---------------------------------------------------------------------------

/// Per-dimension selection state: maps dimension → set of allowed values.
///
/// A dimension absent from the map is unconstrained (all values pass). A
/// dimension mapped to an empty set matches nothing: the user deselected
/// every value, so the view is explicitly empty rather than unfiltered.
pub type FilterSelection = BTreeMap<Dimension, BTreeSet<String>>;

/// All unique values of a dimension, sorted. Always computed against the
/// full dataset so the options offered to the user never shrink based on
/// prior selections.
pub fn distinct_values(dataset: &Dataset, dimension: Dimension) -> BTreeSet<String> {
    dataset
        .records
        .iter()
        .map(|r| dimension.value_of(r).to_string())
        .collect()
}

/// A [`FilterSelection`] with every value of every filterable dimension
/// selected, i.e. the "show everything" starting state.
pub fn select_all(dataset: &Dataset) -> FilterSelection {
    Dimension::FILTERABLE
        .into_iter()
        .map(|dim| (dim, distinct_values(dataset, dim)))
        .collect()
}

// ---------------------------------------------------------------------------
// FilteredView: the records passing the current selection
// ---------------------------------------------------------------------------

/// The subsequence of a dataset matching a [`FilterSelection`]. Borrows the
/// dataset; holds only the indices of matching rows, in dataset order.
#[derive(Debug, Clone, PartialEq)]
pub struct FilteredView<'a> {
    dataset: &'a Dataset,
    indices: Vec<usize>,
}

impl<'a> FilteredView<'a> {
    /// Matching records, in dataset order.
    pub fn records(&self) -> impl Iterator<Item = &'a Record> + '_ {
        self.indices.iter().map(|&i| &self.dataset.records[i])
    }

    /// Indices of matching rows within the dataset.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Number of matching records.
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Whether no record matched (a valid, expected state — the caller
    /// should show a "no data" message rather than zeros).
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// Return the view of records that pass all constrained dimensions.
///
/// A record passes a dimension when:
/// * The dimension is not present in `selection` → passes (no constraint)
/// * The selection set for that dimension is empty → nothing selected → fails
/// * The record's value for that dimension is in the selected set → passes
pub fn apply<'a>(dataset: &'a Dataset, selection: &FilterSelection) -> FilteredView<'a> {
    let indices = dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, record)| {
            selection
                .iter()
                .all(|(dim, allowed)| allowed.contains(dim.value_of(record)))
        })
        .map(|(i, _)| i)
        .collect();

    FilteredView { dataset, indices }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(item: &str, sales_man: &str, manager: &str, region: &str) -> Record {
        Record {
            item: item.into(),
            sales_man: sales_man.into(),
            manager: manager.into(),
            region: region.into(),
            sale_amount: 100.0,
            units: 1,
        }
    }

    fn sample_dataset() -> Dataset {
        Dataset::new(vec![
            record("Desk", "Alex", "Martha", "East"),
            record("Chair", "Bala", "Martha", "West"),
            record("Desk", "Chen", "Douglas", "Central"),
        ])
    }

    fn values(vals: &[&str]) -> BTreeSet<String> {
        vals.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn no_constraints_returns_full_dataset() {
        let dataset = sample_dataset();
        let view = apply(&dataset, &FilterSelection::new());
        assert_eq!(view.len(), dataset.len());
        assert_eq!(view.indices(), &[0, 1, 2]);
    }

    #[test]
    fn view_is_always_a_subsequence_of_the_dataset() {
        let dataset = sample_dataset();
        let selections = [
            FilterSelection::new(),
            FilterSelection::from([(Dimension::Item, values(&["Desk"]))]),
            FilterSelection::from([
                (Dimension::Item, values(&["Desk", "Chair"])),
                (Dimension::Manager, values(&["Martha"])),
            ]),
            select_all(&dataset),
        ];

        for selection in selections {
            let view = apply(&dataset, &selection);
            assert!(view.len() <= dataset.len());
            assert!(view.indices().windows(2).all(|w| w[0] < w[1]));
            for record in view.records() {
                assert!(dataset.records.contains(record));
            }
        }
    }

    #[test]
    fn dimensions_combine_conjunctively() {
        let dataset = sample_dataset();
        let selection = FilterSelection::from([
            (Dimension::Item, values(&["Desk"])),
            (Dimension::Manager, values(&["Martha"])),
        ]);

        let view = apply(&dataset, &selection);
        assert_eq!(view.indices(), &[0]);
    }

    #[test]
    fn values_within_a_dimension_combine_disjunctively() {
        let dataset = sample_dataset();
        let selection =
            FilterSelection::from([(Dimension::SalesMan, values(&["Alex", "Chen"]))]);

        let view = apply(&dataset, &selection);
        assert_eq!(view.indices(), &[0, 2]);
    }

    #[test]
    fn empty_value_set_matches_nothing() {
        let dataset = sample_dataset();
        let selection = FilterSelection::from([(Dimension::Item, BTreeSet::new())]);

        let view = apply(&dataset, &selection);
        assert!(view.is_empty());
    }

    #[test]
    fn select_all_passes_every_record() {
        let dataset = sample_dataset();
        let view = apply(&dataset, &select_all(&dataset));
        assert_eq!(view.len(), dataset.len());
    }

    #[test]
    fn distinct_values_come_from_the_full_dataset_sorted() {
        let dataset = sample_dataset();
        assert_eq!(
            distinct_values(&dataset, Dimension::Item),
            values(&["Chair", "Desk"])
        );
        assert_eq!(
            distinct_values(&dataset, Dimension::Region),
            values(&["Central", "East", "West"])
        );
    }
}
