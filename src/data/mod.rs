//! Data sources other than the CSV file.

pub mod sample;

pub use sample::*;
