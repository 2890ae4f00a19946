/// Data layer: core types, loading, filtering and reshaping.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐   ┌──────────┐
///   │  loader   │◀──│  cache    │  one Arc<Table> per canonical path
///   └──────────┘   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Table    │  rows + distinct values per column, roles resolved once
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  genre set ∧ year range  /  artist ∧ album lists
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  reshape  │  pivot (sum, zero-fill, year desc) → WideTable
///   └──────────┘  melt → LongTable
/// ```

pub mod cache;
pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
pub mod pipeline;
pub mod reshape;
pub mod roles;

pub use error::{DataError, DataResult};
