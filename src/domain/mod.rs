//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the categorical dimensions of a rental day (`Season`, `Weather`, `DayKind`)
//! - the dataset types (`RentalRecord`, `RentalDataset`, `DateRange`)
//! - rollup outputs (`DailyRow`, `CategoryRow`, `Metrics`)
//! - the resolved run configuration (`DashConfig`)

pub mod types;

pub use types::*;
