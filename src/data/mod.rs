//! Data layer: core types, loading, and filtering.
//!
//! Architecture:
//! ```text
//!   x,y,value  (.csv)
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  parse file → PointDataset
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────────┐
//!   │ PointDataset  │  BTreeMap<(x, y), value>, last write wins
//!   └──────────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  filter   │  strict QueryRect test → matching points
//!   └──────────┘
//! ```

pub mod filter;
pub mod loader;
pub mod model;
