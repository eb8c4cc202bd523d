/// Data layer: loading, filtering, aggregation and chart shaping.
///
/// Architecture:
/// ```text
///  .csv / .parquet / .json
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → PriceDataset (year, month, period, display sector)
///   └──────────┘
///        │  cached once per path (cache)
///        ▼
///   ┌──────────┐
///   │  filter   │  sector set + year interval → &PriceRecord subset
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate │  yearly means per sector → mean of yearly means per sector
///   └───────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  shape    │  shares, ordering, chart series → DashboardView (view)
///   └──────────┘
/// ```

pub mod aggregate;
pub mod cache;
pub mod filter;
pub mod loader;
pub mod model;
pub mod sector;
pub mod shape;
pub mod view;
