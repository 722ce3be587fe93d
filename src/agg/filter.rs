//! Date-range filtering.

use crate::domain::{DateRange, RentalDataset};

/// Select every record whose date falls within `range` (inclusive both ends).
///
/// The comparison is `NaiveDate` against `NaiveDate`: range bounds are parsed
/// into calendar dates at the program edges, so no text/date comparison can
/// occur here. Selection is a stable subsequence: order is preserved and the
/// source dataset is untouched.
///
/// An inverted range (`start > end`) or one that overlaps no records yields an
/// empty dataset, not an error; every downstream rollup tolerates empty input.
pub fn filter_by_range(dataset: &RentalDataset, range: DateRange) -> RentalDataset {
    let records = dataset
        .records()
        .iter()
        .filter(|r| range.contains(r.date))
        .cloned()
        .collect();
    RentalDataset::new(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DayKind, RentalRecord, Season, Weather};
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn dataset(days: &[u32]) -> RentalDataset {
        RentalDataset::new(
            days.iter()
                .map(|&d| RentalRecord {
                    date: date(2011, 1, d),
                    day_kind: DayKind::Working,
                    weather: Weather::Clear,
                    season: Season::Spring,
                    casual: 1,
                    registered: 2,
                    total: 3,
                })
                .collect(),
        )
    }

    #[test]
    fn bounds_are_inclusive() {
        let ds = dataset(&[1, 2, 3, 4, 5]);
        let out = filter_by_range(&ds, DateRange::new(date(2011, 1, 2), date(2011, 1, 4)));
        let dates: Vec<u32> = out
            .records()
            .iter()
            .map(|r| chrono::Datelike::day(&r.date))
            .collect();
        assert_eq!(dates, vec![2, 3, 4]);
    }

    #[test]
    fn one_day_outside_either_bound_is_excluded() {
        let ds = dataset(&[1, 2, 3]);
        let out = filter_by_range(&ds, DateRange::new(date(2011, 1, 2), date(2011, 1, 2)));
        assert_eq!(out.len(), 1);
        assert_eq!(out.records()[0].date, date(2011, 1, 2));
    }

    #[test]
    fn inverted_range_yields_empty_not_error() {
        let ds = dataset(&[1, 2, 3]);
        let out = filter_by_range(&ds, DateRange::new(date(2011, 1, 3), date(2011, 1, 2)));
        assert!(out.is_empty());
    }

    #[test]
    fn non_overlapping_range_yields_empty() {
        let ds = dataset(&[1, 2, 3]);
        let out = filter_by_range(&ds, DateRange::new(date(2012, 6, 1), date(2012, 6, 30)));
        assert!(out.is_empty());
    }

    #[test]
    fn filtering_twice_with_same_range_is_idempotent() {
        let ds = dataset(&[1, 2, 3, 4, 5]);
        let range = DateRange::new(date(2011, 1, 2), date(2011, 1, 4));
        let once = filter_by_range(&ds, range);
        let twice = filter_by_range(&once, range);
        assert_eq!(once, twice);
    }

    #[test]
    fn source_dataset_is_not_mutated() {
        let ds = dataset(&[1, 2, 3]);
        let before = ds.clone();
        let _ = filter_by_range(&ds, DateRange::new(date(2011, 1, 2), date(2011, 1, 2)));
        assert_eq!(ds, before);
    }
}
