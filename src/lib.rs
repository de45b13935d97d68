//! Bounding-box range queries over point/value datasets.
//!
//! Pipeline:
//! ```text
//!   config ──► data::loader ──► data::filter ──► sink
//!              (PointDataset)   (strict rect)    (one flushed line per match)
//! ```
//! [`app::run`] wires the stages together for a single run.

pub mod app;
pub mod config;
pub mod data;
pub mod error;
pub mod sink;

pub use app::{RunSummary, run};
pub use config::QueryConfig;
pub use data::model::{PointDataset, PointValue, QueryRect};
pub use error::QueryError;
