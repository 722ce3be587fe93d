//! Command-line parsing for the bike-rental dashboard.
//!
//! The goal of this module is to keep **argument parsing** and **command
//! dispatch** separate from the aggregation code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "bikedash", version, about = "Bike rental dashboard (CSV-based)")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Launch the interactive TUI dashboard.
    ///
    /// This uses the same underlying aggregation pipeline as `summary`, but
    /// renders results in a terminal UI using Ratatui.
    Tui(DashArgs),
    /// Print the metrics and rollup tables, optionally with an ASCII chart.
    Summary(DashArgs),
}

/// Common options for both front-ends.
#[derive(Debug, Parser, Clone)]
pub struct DashArgs {
    /// Path to the rental-history CSV.
    #[arg(short = 'f', long, default_value = "main_data.csv")]
    pub file: PathBuf,

    /// Range start (YYYY-MM-DD); defaults to the first date in the data.
    #[arg(long)]
    pub start: Option<String>,

    /// Range end (YYYY-MM-DD); defaults to the last date in the data.
    #[arg(long)]
    pub end: Option<String>,

    /// Use a built-in synthetic dataset instead of reading the CSV.
    #[arg(long)]
    pub sample: bool,

    /// Number of days generated by --sample.
    #[arg(long, default_value_t = 731)]
    pub sample_days: usize,

    /// Random seed for --sample.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Render an ASCII chart of daily totals in `summary` (enabled by default).
    #[arg(long, default_value_t = true)]
    pub plot: bool,

    /// Disable the terminal chart.
    #[arg(long)]
    pub no_plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 20)]
    pub height: usize,

    /// Number of trailing daily rows shown in the summary table.
    #[arg(long, default_value_t = 14)]
    pub tail: usize,
}
