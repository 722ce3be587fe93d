//! Shared domain types.
//!
//! These types are intentionally lightweight value objects: the dataset is
//! loaded once, held immutably, and everything downstream is recomputed from
//! scratch on each interaction.

use std::path::PathBuf;

use chrono::NaiveDate;

/// Season of a rental day.
///
/// The source dataset encodes seasons as `1..=4`. The mapping is total over
/// that set; any other code is rejected at load time rather than rendered
/// under a wrong label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Season {
    Spring,
    Summer,
    Fall,
    Winter,
}

impl Season {
    pub const ALL: [Season; 4] = [Season::Spring, Season::Summer, Season::Fall, Season::Winter];

    /// Decode the dataset's `season` column.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Season::Spring),
            2 => Some(Season::Summer),
            3 => Some(Season::Fall),
            4 => Some(Season::Winter),
            _ => None,
        }
    }

    pub fn code(self) -> u8 {
        match self {
            Season::Spring => 1,
            Season::Summer => 2,
            Season::Fall => 3,
            Season::Winter => 4,
        }
    }

    /// Human-readable chart label.
    pub fn display_name(self) -> &'static str {
        match self {
            Season::Spring => "Spring",
            Season::Summer => "Summer",
            Season::Fall => "Fall",
            Season::Winter => "Winter",
        }
    }

    /// Meteorological season for a calendar month (used by the sample generator).
    pub fn from_month(month: u32) -> Self {
        match month {
            3..=5 => Season::Spring,
            6..=8 => Season::Summer,
            9..=11 => Season::Fall,
            _ => Season::Winter,
        }
    }
}

/// Weather situation of a rental day.
///
/// Same code discipline as [`Season`]: the source encodes `1..=4`, and the
/// mapping is total over that set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Weather {
    Clear,
    Cloudy,
    LightPrecip,
    HeavyPrecip,
}

impl Weather {
    pub const ALL: [Weather; 4] = [
        Weather::Clear,
        Weather::Cloudy,
        Weather::LightPrecip,
        Weather::HeavyPrecip,
    ];

    /// Decode the dataset's `weathersit` column.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Weather::Clear),
            2 => Some(Weather::Cloudy),
            3 => Some(Weather::LightPrecip),
            4 => Some(Weather::HeavyPrecip),
            _ => None,
        }
    }

    pub fn code(self) -> u8 {
        match self {
            Weather::Clear => 1,
            Weather::Cloudy => 2,
            Weather::LightPrecip => 3,
            Weather::HeavyPrecip => 4,
        }
    }

    /// Human-readable chart label.
    pub fn display_name(self) -> &'static str {
        match self {
            Weather::Clear => "Clear",
            Weather::Cloudy => "Cloudy",
            Weather::LightPrecip => "Light rain/snow",
            Weather::HeavyPrecip => "Heavy rain/storm",
        }
    }
}

/// Whether a calendar day is a working day (non-holiday weekday) or not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DayKind {
    NonWorking,
    Working,
}

impl DayKind {
    pub const ALL: [DayKind; 2] = [DayKind::NonWorking, DayKind::Working];

    /// Decode the dataset's `workingday` column (`0`/`1`).
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(DayKind::NonWorking),
            1 => Some(DayKind::Working),
            _ => None,
        }
    }

    pub fn code(self) -> u8 {
        match self {
            DayKind::NonWorking => 0,
            DayKind::Working => 1,
        }
    }

    /// Human-readable chart label.
    pub fn display_name(self) -> &'static str {
        match self {
            DayKind::NonWorking => "Holiday/weekend",
            DayKind::Working => "Working day",
        }
    }
}

/// One row of the source dataset, fully normalized.
///
/// Invariant (checked at load time): `total == casual + registered`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RentalRecord {
    pub date: NaiveDate,
    pub day_kind: DayKind,
    pub weather: Weather,
    pub season: Season,
    pub casual: u32,
    pub registered: u32,
    pub total: u32,
}

/// An inclusive calendar-date interval.
///
/// `start > end` is representable; such a range simply matches no dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Summary stats about the loaded dataset, shown in headers and reports.
#[derive(Debug, Clone, Copy)]
pub struct DatasetStats {
    pub n_records: usize,
    pub date_min: NaiveDate,
    pub date_max: NaiveDate,
}

/// An ordered sequence of rental records.
///
/// Invariant: records are sorted ascending by date. The constructor sorts
/// (stably) so the invariant holds regardless of input order, and filtering
/// preserves it by selecting a subsequence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RentalDataset {
    records: Vec<RentalRecord>,
}

impl RentalDataset {
    pub fn new(mut records: Vec<RentalRecord>) -> Self {
        records.sort_by_key(|r| r.date);
        Self { records }
    }

    pub fn records(&self) -> &[RentalRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Full `[min(date), max(date)]` span, or `None` for an empty dataset.
    pub fn date_span(&self) -> Option<DateRange> {
        let first = self.records.first()?;
        let last = self.records.last()?;
        Some(DateRange::new(first.date, last.date))
    }

    pub fn stats(&self) -> Option<DatasetStats> {
        let span = self.date_span()?;
        Some(DatasetStats {
            n_records: self.records.len(),
            date_min: span.start,
            date_max: span.end,
        })
    }
}

/// One day of the Daily Rollup: column-wise sums over all records sharing
/// that date. Sums widen to `u64` so a multi-year dataset cannot overflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyRow {
    pub date: NaiveDate,
    pub casual: u64,
    pub registered: u64,
    pub total: u64,
}

/// One category of a grouped-mean rollup.
///
/// `days` counts the contributing records; categories with no records in the
/// filtered data produce no row at all.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategoryRow<K> {
    pub key: K,
    pub days: usize,
    pub mean_total: f64,
}

/// The three scalar metrics shown at the top of the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Metrics {
    pub total_rides: u64,
    pub registered_rides: u64,
    pub casual_rides: u64,
}

/// A full run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus defaults).
#[derive(Debug, Clone)]
pub struct DashConfig {
    pub csv_path: PathBuf,

    /// Optional initial range bounds; `None` falls back to the dataset span.
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,

    /// Use the built-in synthetic dataset instead of reading a CSV.
    pub sample: bool,
    pub sample_days: usize,
    pub sample_seed: u64,

    pub plot: bool,
    pub plot_width: usize,
    pub plot_height: usize,

    /// Number of trailing rows shown in the summary's daily table.
    pub daily_tail: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn record(d: NaiveDate) -> RentalRecord {
        RentalRecord {
            date: d,
            day_kind: DayKind::Working,
            weather: Weather::Clear,
            season: Season::Spring,
            casual: 1,
            registered: 2,
            total: 3,
        }
    }

    #[test]
    fn category_codes_round_trip() {
        for s in Season::ALL {
            assert_eq!(Season::from_code(s.code()), Some(s));
        }
        for w in Weather::ALL {
            assert_eq!(Weather::from_code(w.code()), Some(w));
        }
        for k in DayKind::ALL {
            assert_eq!(DayKind::from_code(k.code()), Some(k));
        }
    }

    #[test]
    fn out_of_range_codes_are_rejected() {
        assert_eq!(Season::from_code(0), None);
        assert_eq!(Season::from_code(5), None);
        assert_eq!(Weather::from_code(7), None);
        assert_eq!(DayKind::from_code(2), None);
    }

    #[test]
    fn season_from_month_covers_the_year() {
        assert_eq!(Season::from_month(1), Season::Winter);
        assert_eq!(Season::from_month(4), Season::Spring);
        assert_eq!(Season::from_month(7), Season::Summer);
        assert_eq!(Season::from_month(10), Season::Fall);
        assert_eq!(Season::from_month(12), Season::Winter);
    }

    #[test]
    fn range_contains_is_inclusive() {
        let r = DateRange::new(date(2011, 1, 2), date(2011, 1, 4));
        assert!(!r.contains(date(2011, 1, 1)));
        assert!(r.contains(date(2011, 1, 2)));
        assert!(r.contains(date(2011, 1, 3)));
        assert!(r.contains(date(2011, 1, 4)));
        assert!(!r.contains(date(2011, 1, 5)));
    }

    #[test]
    fn inverted_range_contains_nothing() {
        let r = DateRange::new(date(2011, 1, 4), date(2011, 1, 2));
        assert!(!r.contains(date(2011, 1, 3)));
        assert!(!r.contains(date(2011, 1, 2)));
        assert!(!r.contains(date(2011, 1, 4)));
    }

    #[test]
    fn dataset_sorts_on_construction() {
        let ds = RentalDataset::new(vec![
            record(date(2011, 1, 3)),
            record(date(2011, 1, 1)),
            record(date(2011, 1, 2)),
        ]);
        let dates: Vec<NaiveDate> = ds.records().iter().map(|r| r.date).collect();
        assert_eq!(
            dates,
            vec![date(2011, 1, 1), date(2011, 1, 2), date(2011, 1, 3)]
        );
        let span = ds.date_span().unwrap();
        assert_eq!(span.start, date(2011, 1, 1));
        assert_eq!(span.end, date(2011, 1, 3));
    }

    #[test]
    fn empty_dataset_has_no_span() {
        let ds = RentalDataset::default();
        assert!(ds.is_empty());
        assert!(ds.date_span().is_none());
        assert!(ds.stats().is_none());
    }
}
