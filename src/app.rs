//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - loads the dataset (CSV or synthetic sample)
//! - resolves the initial date range
//! - dispatches to the TUI or the text summary

use clap::Parser;

use crate::cli::{Command, DashArgs};
use crate::domain::{DashConfig, DateRange, RentalDataset};
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `bikedash` binary.
pub fn run() -> Result<(), AppError> {
    // We want `bikedash` and `bikedash --sample` to behave like
    // `bikedash tui ...`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of
    // the argv list before parsing. This preserves a clean clap structure
    // while retaining the requested UX.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Tui(args) => handle_tui(args),
        Command::Summary(args) => handle_summary(args),
    }
}

fn handle_tui(args: DashArgs) -> Result<(), AppError> {
    let config = dash_config_from_args(&args)?;
    let dataset = load_source(&config)?;
    crate::tui::run(&config, dataset)
}

fn handle_summary(args: DashArgs) -> Result<(), AppError> {
    let config = dash_config_from_args(&args)?;
    let dataset = load_source(&config)?;
    let stats = dataset
        .stats()
        .ok_or_else(|| AppError::data("Dataset is empty."))?;

    let span = DateRange::new(stats.date_min, stats.date_max);
    let range = resolve_range(&config, span);
    let data = pipeline::run_dashboard(&dataset, range);

    print!(
        "{}",
        crate::report::format_summary(&source_label(&config), &stats, &data, config.daily_tail)
    );

    if config.plot {
        let plot = crate::plot::render_daily_ascii(&data.daily, config.plot_width, config.plot_height);
        println!("\n{plot}");
    }

    Ok(())
}

/// Load the configured data source: the CSV file, or the synthetic sample.
pub fn load_source(config: &DashConfig) -> Result<RentalDataset, AppError> {
    if config.sample {
        crate::data::generate_sample(config.sample_days, config.sample_seed)
    } else {
        crate::io::load_dataset(&config.csv_path)
    }
}

/// Human-readable description of the data source for headers.
pub fn source_label(config: &DashConfig) -> String {
    if config.sample {
        format!(
            "synthetic sample (days={}, seed={})",
            config.sample_days, config.sample_seed
        )
    } else {
        config.csv_path.display().to_string()
    }
}

/// Resolve the selected range: explicit bounds win, the dataset span fills in
/// the rest.
pub fn resolve_range(config: &DashConfig, span: DateRange) -> DateRange {
    DateRange::new(
        config.start.unwrap_or(span.start),
        config.end.unwrap_or(span.end),
    )
}

pub fn dash_config_from_args(args: &DashArgs) -> Result<DashConfig, AppError> {
    let start = parse_bound(args.start.as_deref(), "--start")?;
    let end = parse_bound(args.end.as_deref(), "--end")?;

    Ok(DashConfig {
        csv_path: args.file.clone(),
        start,
        end,
        sample: args.sample,
        sample_days: args.sample_days,
        sample_seed: args.seed,
        plot: args.plot && !args.no_plot,
        plot_width: args.width,
        plot_height: args.height,
        daily_tail: args.tail,
    })
}

/// Parse an optional range bound into a calendar date up front, so the filter
/// only ever compares dates with dates.
fn parse_bound(
    value: Option<&str>,
    flag: &str,
) -> Result<Option<chrono::NaiveDate>, AppError> {
    match value {
        None => Ok(None),
        Some(s) => crate::io::parse_date(s)
            .map(Some)
            .map_err(|msg| AppError::usage(format!("{flag}: {msg}"))),
    }
}

/// Rewrite argv so `bikedash` defaults to `bikedash tui`.
///
/// Rules:
/// - `bikedash`                     -> `bikedash tui`
/// - `bikedash --sample ...`        -> `bikedash tui --sample ...`
/// - `bikedash --help/--version/-h` -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "tui" | "summary");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "tui flags".
    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_defaults_to_tui() {
        assert_eq!(rewrite_args(args(&["bikedash"])), args(&["bikedash", "tui"]));
    }

    #[test]
    fn leading_flag_defaults_to_tui() {
        assert_eq!(
            rewrite_args(args(&["bikedash", "--sample"])),
            args(&["bikedash", "tui", "--sample"])
        );
    }

    #[test]
    fn explicit_subcommands_and_help_pass_through() {
        assert_eq!(
            rewrite_args(args(&["bikedash", "summary", "--no-plot"])),
            args(&["bikedash", "summary", "--no-plot"])
        );
        assert_eq!(rewrite_args(args(&["bikedash", "--help"])), args(&["bikedash", "--help"]));
    }

    #[test]
    fn config_parses_range_bounds() {
        let cli_args = crate::cli::DashArgs::parse_from([
            "x", "--start", "2011-01-05", "--end", "2011-02-01", "--no-plot",
        ]);
        let config = dash_config_from_args(&cli_args).unwrap();
        assert_eq!(
            config.start,
            Some(chrono::NaiveDate::from_ymd_opt(2011, 1, 5).unwrap())
        );
        assert!(!config.plot);
    }

    #[test]
    fn bad_bound_is_a_usage_error() {
        let cli_args = crate::cli::DashArgs::parse_from(["x", "--start", "soon"]);
        let err = dash_config_from_args(&cli_args).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("--start"));
    }
}
