/// Data layer: core types, loading, and aggregation.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → GenreDataset (required columns checked)
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │ GenreDataset  │  Vec<GenreRecord>, file order
///   └──────────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate  │  group / sum / sort / filter → DashboardData
///   └───────────┘
/// ```

pub mod aggregate;
pub mod loader;
pub mod model;
