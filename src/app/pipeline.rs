//! Shared dashboard pipeline used by both the CLI and TUI front-ends.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! filter -> daily/workingday/weather/season rollups -> metrics
//!
//! The CLI and the TUI can then focus on presentation (printing vs widgets).

use crate::agg;
use crate::domain::{
    CategoryRow, DailyRow, DateRange, DayKind, Metrics, RentalDataset, Season, Weather,
};

/// All computed outputs for one date-range selection.
///
/// Ephemeral by design: rebuilt from scratch on every range change and
/// discarded after rendering; nothing is cached across recomputations.
#[derive(Debug, Clone)]
pub struct DashboardData {
    pub range: DateRange,
    pub n_filtered: usize,
    pub daily: Vec<DailyRow>,
    pub by_workingday: Vec<CategoryRow<DayKind>>,
    pub by_weather: Vec<CategoryRow<Weather>>,
    pub by_season: Vec<CategoryRow<Season>>,
    pub metrics: Metrics,
}

impl DashboardData {
    pub fn is_empty(&self) -> bool {
        self.n_filtered == 0
    }
}

/// Execute the full aggregation pipeline for `range`.
///
/// Infallible: an empty selection produces empty rollups and zero metrics,
/// which both front-ends render as explicit no-data states.
pub fn run_dashboard(dataset: &RentalDataset, range: DateRange) -> DashboardData {
    let filtered = agg::filter_by_range(dataset, range);

    let daily = agg::daily_rollup(&filtered);
    let by_workingday = agg::workingday_rollup(&filtered);
    let by_weather = agg::weather_rollup(&filtered);
    let by_season = agg::season_rollup(&filtered);
    let metrics = agg::compute_metrics(&daily);

    DashboardData {
        range,
        n_filtered: filtered.len(),
        daily,
        by_workingday,
        by_weather,
        by_season,
        metrics,
    }
}
