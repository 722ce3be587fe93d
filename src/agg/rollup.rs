//! Summary rollups over a (filtered) dataset.
//!
//! Four independent rollups feed the dashboard:
//!
//! - [`daily_rollup`]: per-day sums of casual/registered/total riders
//! - [`workingday_rollup`], [`weather_rollup`], [`season_rollup`]: mean total
//!   riders per category
//!
//! All of them accept an empty dataset and return an empty result. Categories
//! with no records produce no row (a mean over zero days is undefined).

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::domain::{
    CategoryRow, DailyRow, DayKind, Metrics, RentalDataset, RentalRecord, Season, Weather,
};

/// Bucket records by calendar day and sum each rider column.
///
/// This is a resample-by-day, not row-identity grouping: rows sharing a date
/// are summed, and the grouping does not rely on the dataset's sort order even
/// though datasets arrive sorted. Output is ordered by date ascending with no
/// gap-filling for absent dates.
pub fn daily_rollup(dataset: &RentalDataset) -> Vec<DailyRow> {
    let mut buckets: BTreeMap<NaiveDate, (u64, u64, u64)> = BTreeMap::new();
    for r in dataset.records() {
        let bucket = buckets.entry(r.date).or_default();
        bucket.0 += u64::from(r.casual);
        bucket.1 += u64::from(r.registered);
        bucket.2 += u64::from(r.total);
    }

    buckets
        .into_iter()
        .map(|(date, (casual, registered, total))| DailyRow {
            date,
            casual,
            registered,
            total,
        })
        .collect()
}

/// Mean total riders per working-day category present in the data.
pub fn workingday_rollup(dataset: &RentalDataset) -> Vec<CategoryRow<DayKind>> {
    grouped_mean(dataset, |r| r.day_kind)
}

/// Mean total riders per weather situation present in the data.
pub fn weather_rollup(dataset: &RentalDataset) -> Vec<CategoryRow<Weather>> {
    grouped_mean(dataset, |r| r.weather)
}

/// Mean total riders per season present in the data.
pub fn season_rollup(dataset: &RentalDataset) -> Vec<CategoryRow<Season>> {
    grouped_mean(dataset, |r| r.season)
}

/// The headline metrics: column-wise sums of the daily rollup.
pub fn compute_metrics(daily: &[DailyRow]) -> Metrics {
    let mut m = Metrics::default();
    for row in daily {
        m.total_rides += row.total;
        m.registered_rides += row.registered;
        m.casual_rides += row.casual;
    }
    m
}

/// Group records by `key_fn` and average `total` within each group.
///
/// Keys are collected into a `BTreeMap`, so the output is ordered by the key's
/// `Ord` (category code order for the domain enums). Groups that never occur
/// simply never get an entry.
fn grouped_mean<K: Ord + Copy>(
    dataset: &RentalDataset,
    key_fn: impl Fn(&RentalRecord) -> K,
) -> Vec<CategoryRow<K>> {
    let mut groups: BTreeMap<K, (u64, usize)> = BTreeMap::new();
    for r in dataset.records() {
        let group = groups.entry(key_fn(r)).or_default();
        group.0 += u64::from(r.total);
        group.1 += 1;
    }

    groups
        .into_iter()
        .map(|(key, (sum, days))| CategoryRow {
            key,
            days,
            mean_total: sum as f64 / days as f64,
        })
        .collect()
}
