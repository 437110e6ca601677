/// Data layer: core types, loading, normalization and aggregation.
///
/// Architecture:
/// ```text
///  .csv / .json / published URL
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse table → TransactionDataset
///   └──────────┘
///        │
///        ▼
///   ┌────────────────────┐
///   │ TransactionDataset │  Vec<Record>, raw cells by column name
///   └────────────────────┘
///        │
///        ▼
///   ┌───────────┐     ┌───────────┐
///   │ normalize │ ──▶ │ aggregate │  count / sum / top-N / bucket → View
///   └───────────┘     └───────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  views    │  chart catalog: View + kind + display options
///   └──────────┘
/// ```
pub mod aggregate;
pub mod buckets;
pub mod loader;
pub mod model;
pub mod normalize;
pub mod views;
