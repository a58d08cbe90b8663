/// Data layer: core types, loading, filtering, and aggregation.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Dataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ Dataset   │  Vec<Record>, immutable after load
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  apply per-dimension selections → FilteredView
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ aggregate │  KPIs + group-by sums → Summary
///   └──────────┘
/// ```
///
/// The whole pipeline is pure: each user interaction re-runs
/// `apply` + `summarize` against the immutable dataset.

pub mod aggregate;
pub mod filter;
pub mod loader;
pub mod model;
