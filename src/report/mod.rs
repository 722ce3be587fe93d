//! Reporting utilities: formatted terminal output for the `summary` command.

pub mod format;

pub use format::*;
