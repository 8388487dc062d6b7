//! Data layer: core types, loading, filtering, aggregation, presentation.
//!
//! Architecture:
//! ```text
//!  .csv / .json / .parquet
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  parse + clean → CrimeDataset (once, at startup)
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────────┐
//!   │ CrimeDataset  │  immutable records, min/max year, neighbourhoods
//!   └──────────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  filter   │  year range + neighbourhood selection → indices
//!   └──────────┘
//!        │
//!        ▼
//!   ┌───────────┐   ┌──────────┐
//!   │ aggregate  │ → │ present   │  four counts → 2 charts + 2 tables
//!   └───────────┘   └──────────┘
//! ```

pub mod aggregate;
pub mod filter;
pub mod loader;
pub mod model;
pub mod present;
