//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the aggregation code stays clean and testable
//! - output changes are localized (important for golden tests)

use crate::app::pipeline::DashboardData;
use crate::domain::{CategoryRow, DatasetStats};

/// Format the full summary: source/span header, metrics, daily tail, and the
/// three categorical tables.
pub fn format_summary(
    source: &str,
    stats: &DatasetStats,
    data: &DashboardData,
    daily_tail: usize,
) -> String {
    let mut out = String::new();

    out.push_str("=== bikedash - Bike Rental Summary ===\n");
    out.push_str(&format!("Source: {source}\n"));
    out.push_str(&format!(
        "Loaded: {} records | {} .. {}\n",
        stats.n_records, stats.date_min, stats.date_max
    ));
    out.push_str(&format!(
        "Range : {} .. {} ({} records)\n",
        data.range.start, data.range.end, data.n_filtered
    ));

    if data.is_empty() {
        out.push_str("\nNo records in the selected range.\n");
        return out;
    }

    out.push_str("\nTotals:\n");
    out.push_str(&format!("- rides     : {}\n", data.metrics.total_rides));
    out.push_str(&format!("- registered: {}\n", data.metrics.registered_rides));
    out.push_str(&format!("- casual    : {}\n", data.metrics.casual_rides));

    out.push('\n');
    out.push_str(&format_daily_tail(data, daily_tail));

    out.push('\n');
    out.push_str(&format_category_table(
        "By working day:",
        &data.by_workingday,
        |k| k.display_name(),
    ));
    out.push('\n');
    out.push_str(&format_category_table(
        "By weather:",
        &data.by_weather,
        |k| k.display_name(),
    ));
    out.push('\n');
    out.push_str(&format_category_table("By season:", &data.by_season, |k| {
        k.display_name()
    }));

    out
}

/// Format the trailing `tail` rows of the daily rollup.
fn format_daily_tail(data: &DashboardData, tail: usize) -> String {
    let mut out = String::new();

    let n_days = data.daily.len();
    let shown = tail.max(1).min(n_days);
    out.push_str(&format!("Daily totals (last {shown} of {n_days} days):\n"));
    out.push_str("  date        casual  registered  total\n");

    if n_days > shown {
        out.push_str(&format!("  ({} earlier days elided)\n", n_days - shown));
    }
    for row in &data.daily[n_days - shown..] {
        out.push_str(&format!(
            "  {}  {:>6}  {:>10}  {:>5}\n",
            row.date, row.casual, row.registered, row.total
        ));
    }

    out
}

/// Format one grouped-mean table with human-readable category labels.
fn format_category_table<K: Copy>(
    title: &str,
    rows: &[CategoryRow<K>],
    label: impl Fn(K) -> &'static str,
) -> String {
    let mut out = String::new();
    out.push_str(title);
    out.push('\n');

    for row in rows {
        out.push_str(&format!(
            "  {:<16} n={:<4} mean={:.1}\n",
            label(row.key),
            row.days,
            row.mean_total
        ));
    }

    out
}
