mod data;
mod report;

use std::collections::BTreeSet;
use std::path::Path;

use anyhow::{Context, Result};

use data::filter::{self, FilterSelection};
use data::model::Dimension;

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some((path, selection_args)) = args.split_first() else {
        eprintln!("usage: salesdash <data-file> [Dimension=value1,value2 ...]");
        eprintln!("       e.g.  salesdash SaleData.csv Item=Desk,Chair SalesMan=Alex");
        std::process::exit(2);
    };

    let dataset =
        data::loader::load_file(Path::new(path)).with_context(|| format!("loading {path}"))?;

    let selection = parse_selection(selection_args, &dataset)?;
    let view = filter::apply(&dataset, &selection);
    let summary = data::aggregate::summarize(&view);

    print!("{}", report::render(&summary));
    if !view.is_empty() {
        println!("{}", report::render_table(&view));
    }
    Ok(())
}

/// Parse `Dimension=value1,value2` arguments into a [`FilterSelection`].
///
/// A bare `Dimension=` is an explicit empty set (nothing selected), not an
/// unconstrained dimension; omit the argument entirely to leave an axis
/// unfiltered.
fn parse_selection(args: &[String], dataset: &data::model::Dataset) -> Result<FilterSelection> {
    let mut selection = FilterSelection::new();

    for arg in args {
        let (name, values) = arg
            .split_once('=')
            .with_context(|| format!("expected Dimension=values, got '{arg}'"))?;
        let dimension: Dimension = name
            .parse()
            .map_err(|e: String| anyhow::anyhow!(e))
            .with_context(|| format!("in argument '{arg}'"))?;

        let allowed: BTreeSet<String> = values
            .split(',')
            .filter(|v| !v.is_empty())
            .map(str::to_string)
            .collect();

        // Selected values that never occur in the data usually mean a typo.
        let known = filter::distinct_values(dataset, dimension);
        for value in allowed.difference(&known) {
            log::warn!("'{value}' does not occur in column {dimension}");
        }

        selection.insert(dimension, allowed);
    }

    Ok(selection)
}
