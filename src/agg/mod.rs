//! The aggregation pipeline: range filtering and rollups.
//!
//! Responsibilities:
//!
//! - restrict the dataset to the selected date range (`filter`)
//! - derive the four summary tables and the scalar metrics (`rollup`)
//!
//! Everything here is a pure function over an immutable dataset; outputs are
//! recomputed from scratch on every range change and never cached.

pub mod filter;
pub mod rollup;

pub use filter::*;
pub use rollup::*;
