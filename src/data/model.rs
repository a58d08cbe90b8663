use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

// ---------------------------------------------------------------------------
// Record – one sales transaction (one row of the source table)
// ---------------------------------------------------------------------------

/// A single sales transaction. Field names follow the source spreadsheet's
/// column headers (`Item`, `SalesMan`, `Manager`, `Region`, `Sale_amt`,
/// `Units`) via serde renames so CSV/JSON rows deserialize directly.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Record {
    #[serde(rename = "Item")]
    pub item: String,
    #[serde(rename = "SalesMan")]
    pub sales_man: String,
    #[serde(rename = "Manager")]
    pub manager: String,
    #[serde(rename = "Region")]
    pub region: String,
    #[serde(rename = "Sale_amt")]
    pub sale_amount: f64,
    #[serde(rename = "Units")]
    pub units: i64,
}

// ---------------------------------------------------------------------------
// Dimension – a categorical column usable as a filter or group-by axis
// ---------------------------------------------------------------------------

/// A categorical column of the dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Dimension {
    Item,
    SalesMan,
    Manager,
    Region,
}

impl Dimension {
    /// All categorical columns, in source-table order.
    pub const ALL: [Dimension; 4] = [
        Dimension::Item,
        Dimension::SalesMan,
        Dimension::Manager,
        Dimension::Region,
    ];

    /// The axes offered to the user as filters. Region is group-by only.
    pub const FILTERABLE: [Dimension; 3] =
        [Dimension::Item, Dimension::SalesMan, Dimension::Manager];

    /// The column header this dimension maps to in the source table.
    pub fn column_name(self) -> &'static str {
        match self {
            Dimension::Item => "Item",
            Dimension::SalesMan => "SalesMan",
            Dimension::Manager => "Manager",
            Dimension::Region => "Region",
        }
    }

    /// The record's value on this axis.
    pub fn value_of(self, record: &Record) -> &str {
        match self {
            Dimension::Item => &record.item,
            Dimension::SalesMan => &record.sales_man,
            Dimension::Manager => &record.manager,
            Dimension::Region => &record.region,
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

impl FromStr for Dimension {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Dimension::ALL
            .into_iter()
            .find(|d| d.column_name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown dimension '{s}'"))
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full loaded dataset. Immutable after load; filtering and aggregation
/// borrow it rather than copying rows.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    /// All transactions (rows), in file order.
    pub records: Vec<Record>,
}

impl Dataset {
    pub fn new(records: Vec<Record>) -> Self {
        Dataset { records }
    }

    /// Number of transactions.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
