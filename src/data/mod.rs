/// Data layer: core types, loading, caching, filtering and aggregation.
///
/// Architecture:
/// ```text
///  .xlsx / .csv / .parquet / .json
///        │
///        ▼
///   ┌──────────┐      ┌────────────┐
///   │  loader   │ ◄─── │   source    │  load once, refresh on demand
///   └──────────┘      └────────────┘
///        │
///        ▼
///   ┌─────────────────┐
///   │ EngagementTable  │  Vec<Engagement>, option lists per column
///   └─────────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  apply Selection → FilteredTable
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate  │  group by column → (key, count) pairs
///   └───────────┘
/// ```

pub mod aggregate;
pub mod filter;
pub mod loader;
pub mod model;
pub mod source;
