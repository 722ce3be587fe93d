//! CSV ingest and normalization.
//!
//! This module turns the rental-history CSV into a clean [`RentalDataset`]
//! that is safe to aggregate.
//!
//! Design goals:
//! - **Strict schema** for required fields (clear errors + exit code 2)
//! - **Fail-fast rows**: a single unparseable row aborts the load; the
//!   dashboard never starts on a partial dataset
//! - **Deterministic behavior** (no hidden randomness)
//! - **Separation of concerns**: no aggregation logic here
//!
//! The loader is tolerant about *naming*: headers are matched
//! case-insensitively, a UTF-8 BOM on the first header is stripped, and the
//! common column aliases (`dteday`/`date`, `cnt`/`count`, ...) are accepted.
//! Extra columns (temperature, humidity, ...) are ignored.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use csv::StringRecord;
use serde::Deserialize;

use crate::domain::{DayKind, RentalDataset, RentalRecord, Season, Weather};
use crate::error::AppError;

/// Required columns and the header spellings accepted for each.
const REQUIRED_COLUMNS: &[(&str, &[&str])] = &[
    ("date", &["dteday", "date"]),
    ("season", &["season"]),
    ("working day", &["workingday", "working_day"]),
    ("weather", &["weathersit", "weather"]),
    ("casual", &["casual"]),
    ("registered", &["registered"]),
    ("total", &["cnt", "count"]),
];

/// A raw CSV row before normalization.
///
/// The date stays a string here; parsing it into a calendar date (and the
/// category codes into enums) happens in `normalize_row` so every failure can
/// be reported with its CSV line number.
#[derive(Debug, Deserialize)]
struct RawRow {
    #[serde(rename = "dteday", alias = "date")]
    date: String,
    season: u8,
    #[serde(alias = "working_day")]
    workingday: u8,
    #[serde(alias = "weather")]
    weathersit: u8,
    casual: u32,
    registered: u32,
    #[serde(rename = "cnt", alias = "count")]
    total: u32,
}

/// Load the dataset from a CSV file on disk.
pub fn load_dataset(path: &Path) -> Result<RentalDataset, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::usage(format!("Failed to open CSV '{}': {e}", path.display()))
    })?;
    read_dataset(file)
}

/// Load the dataset from any reader (the file-less entry point used in tests).
pub fn read_dataset<R: Read>(source: R) -> Result<RentalDataset, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(source);

    let headers = reader
        .headers()
        .map_err(|e| AppError::usage(format!("Failed to read CSV headers: {e}")))?
        .clone();
    let headers = normalize_headers(&headers);

    ensure_required_columns(&headers)?;

    let mut records = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        // +2 because:
        // - records() starts at line 1 after headers
        // - CSV is 1-based line numbers
        let line = idx + 2;

        let record =
            result.map_err(|e| AppError::data(format!("Line {line}: CSV parse error: {e}")))?;
        let raw: RawRow = record
            .deserialize(Some(&headers))
            .map_err(|e| AppError::data(format!("Line {line}: {e}")))?;
        let rec =
            normalize_row(&raw).map_err(|msg| AppError::data(format!("Line {line}: {msg}")))?;
        records.push(rec);
    }

    if records.is_empty() {
        return Err(AppError::data("CSV contains no data rows."));
    }

    // `RentalDataset::new` sorts ascending by date, establishing the ordering
    // invariant the filter and rollups rely on.
    Ok(RentalDataset::new(records))
}

fn normalize_headers(headers: &StringRecord) -> StringRecord {
    headers.iter().map(normalize_header_name).collect()
}

fn normalize_header_name(name: &str) -> String {
    // Excel and other tools sometimes emit UTF-8 CSVs with a BOM prefix on the
    // first header (e.g. "﻿dteday"). If we don't strip it, schema validation
    // will incorrectly report missing columns.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_ascii_lowercase()
}

fn ensure_required_columns(headers: &StringRecord) -> Result<(), AppError> {
    for (label, aliases) in REQUIRED_COLUMNS {
        let present = headers
            .iter()
            .any(|h| aliases.contains(&h));
        if !present {
            return Err(AppError::usage(format!(
                "Missing required {label} column (expected one of: {}).",
                aliases.join(", ")
            )));
        }
    }
    Ok(())
}

fn normalize_row(raw: &RawRow) -> Result<RentalRecord, String> {
    let date = parse_date(&raw.date)?;

    let season = Season::from_code(raw.season)
        .ok_or_else(|| format!("unknown season code {} (expected 1-4)", raw.season))?;
    let day_kind = DayKind::from_code(raw.workingday)
        .ok_or_else(|| format!("unknown workingday code {} (expected 0/1)", raw.workingday))?;
    let weather = Weather::from_code(raw.weathersit)
        .ok_or_else(|| format!("unknown weathersit code {} (expected 1-4)", raw.weathersit))?;

    // Precondition on the source data, checked here instead of assumed: the
    // rollups read `total` and would silently disagree with `casual` +
    // `registered` downstream if a row violated it.
    if u64::from(raw.casual) + u64::from(raw.registered) != u64::from(raw.total) {
        return Err(format!(
            "count mismatch: casual {} + registered {} != cnt {}",
            raw.casual, raw.registered, raw.total
        ));
    }

    Ok(RentalRecord {
        date,
        day_kind,
        weather,
        season,
        casual: raw.casual,
        registered: raw.registered,
        total: raw.total,
    })
}

/// Parse a calendar date in any of the formats seen in the wild for this data.
pub fn parse_date(s: &str) -> Result<NaiveDate, String> {
    const FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y", "%d-%m-%Y", "%Y/%m/%d"];

    let s = s.trim();
    for fmt in FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Ok(d);
        }
    }
    Err(format!(
        "Invalid date '{s}'. Expected one of: YYYY-MM-DD, DD/MM/YYYY, DD-MM-YYYY, YYYY/MM/DD."
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn loads_a_minimal_csv() {
        let csv = "\
dteday,season,workingday,weathersit,casual,registered,cnt
2011-01-01,1,0,1,10,20,30
2011-01-02,1,1,2,5,15,20
";
        let ds = read_dataset(csv.as_bytes()).unwrap();
        assert_eq!(ds.len(), 2);

        let first = &ds.records()[0];
        assert_eq!(first.date, date(2011, 1, 1));
        assert_eq!(first.day_kind, DayKind::NonWorking);
        assert_eq!(first.weather, Weather::Clear);
        assert_eq!(first.season, Season::Spring);
        assert_eq!((first.casual, first.registered, first.total), (10, 20, 30));
    }

    #[test]
    fn ignores_extra_columns_and_sorts_by_date() {
        // Out-of-order rows plus the extra columns the real export carries.
        let csv = "\
instant,dteday,season,yr,workingday,weathersit,temp,casual,registered,cnt
2,2011-01-02,1,0,1,2,0.36,5,15,20
1,2011-01-01,1,0,0,1,0.34,10,20,30
";
        let ds = read_dataset(csv.as_bytes()).unwrap();
        assert_eq!(ds.records()[0].date, date(2011, 1, 1));
        assert_eq!(ds.records()[1].date, date(2011, 1, 2));
    }

    #[test]
    fn accepts_aliased_headers_and_bom() {
        let csv = "\
\u{feff}Date,Season,working_day,Weather,casual,registered,count
01/02/2011,2,1,3,1,2,3
";
        let ds = read_dataset(csv.as_bytes()).unwrap();
        assert_eq!(ds.len(), 1);
        // DD/MM/YYYY
        assert_eq!(ds.records()[0].date, date(2011, 2, 1));
        assert_eq!(ds.records()[0].weather, Weather::LightPrecip);
    }

    #[test]
    fn missing_column_is_a_usage_error() {
        let csv = "\
dteday,season,workingday,casual,registered,cnt
2011-01-01,1,0,10,20,30
";
        let err = read_dataset(csv.as_bytes()).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("weather"), "{err}");
    }

    #[test]
    fn bad_date_aborts_with_line_number() {
        let csv = "\
dteday,season,workingday,weathersit,casual,registered,cnt
2011-01-01,1,0,1,10,20,30
not-a-date,1,1,2,5,15,20
";
        let err = read_dataset(csv.as_bytes()).unwrap_err();
        assert_eq!(err.exit_code(), 3);
        assert!(err.to_string().starts_with("Line 3:"), "{err}");
    }

    #[test]
    fn unknown_category_code_is_fatal() {
        let csv = "\
dteday,season,workingday,weathersit,casual,registered,cnt
2011-01-01,9,0,1,10,20,30
";
        let err = read_dataset(csv.as_bytes()).unwrap_err();
        assert_eq!(err.exit_code(), 3);
        assert!(err.to_string().contains("season code 9"), "{err}");
    }

    #[test]
    fn count_mismatch_is_fatal() {
        let csv = "\
dteday,season,workingday,weathersit,casual,registered,cnt
2011-01-01,1,0,1,10,20,31
";
        let err = read_dataset(csv.as_bytes()).unwrap_err();
        assert_eq!(err.exit_code(), 3);
        assert!(err.to_string().contains("count mismatch"), "{err}");
    }

    #[test]
    fn empty_source_is_a_data_error() {
        let csv = "dteday,season,workingday,weathersit,casual,registered,cnt\n";
        let err = read_dataset(csv.as_bytes()).unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn parse_date_formats() {
        assert_eq!(parse_date("2011-01-02").unwrap(), date(2011, 1, 2));
        assert_eq!(parse_date("02/01/2011").unwrap(), date(2011, 1, 2));
        assert_eq!(parse_date("02-01-2011").unwrap(), date(2011, 1, 2));
        assert_eq!(parse_date("2011/01/02").unwrap(), date(2011, 1, 2));
        assert!(parse_date("01-2011-02").is_err());
    }
}
