//! Synthetic rental-history generation.
//!
//! `--sample` runs the dashboard without a CSV file: a seeded generator
//! produces a plausible daily history (seasonal demand swing, weekday
//! commuter peaks, weather drag). The same generator doubles as a fixture
//! factory in tests. Output is deterministic for a given `(days, seed)`.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;

use crate::domain::{DayKind, RentalDataset, RentalRecord, Season, Weather};
use crate::error::AppError;

/// Baseline riders per day before seasonal/weather scaling.
const BASE_DEMAND: f64 = 4500.0;

/// Relative std-dev of the day-to-day noise.
const NOISE_SIGMA: f64 = 0.12;

/// Probability that a weekday is a holiday.
const HOLIDAY_PROB: f64 = 0.03;

/// Weather frequencies, roughly matching the public bike-sharing dataset.
const WEATHER_WEIGHTS: [(Weather, f64); 4] = [
    (Weather::Clear, 0.62),
    (Weather::Cloudy, 0.26),
    (Weather::LightPrecip, 0.10),
    (Weather::HeavyPrecip, 0.02),
];

/// Generate `days` consecutive days of synthetic history starting 2011-01-01.
pub fn generate_sample(days: usize, seed: u64) -> Result<RentalDataset, AppError> {
    if days == 0 {
        return Err(AppError::usage("Sample day count must be > 0."));
    }

    let start = NaiveDate::from_ymd_opt(2011, 1, 1)
        .ok_or_else(|| AppError::runtime("Invalid sample start date."))?;

    let mut rng = StdRng::seed_from_u64(seed);
    let noise = Normal::new(0.0, NOISE_SIGMA)
        .map_err(|e| AppError::runtime(format!("Noise distribution error: {e}")))?;

    let mut records = Vec::with_capacity(days);
    for i in 0..days {
        let date = start + Duration::days(i as i64);
        let season = Season::from_month(date.month());

        let weekend = matches!(date.weekday(), Weekday::Sat | Weekday::Sun);
        let holiday = !weekend && rng.gen_bool(HOLIDAY_PROB);
        let day_kind = if weekend || holiday {
            DayKind::NonWorking
        } else {
            DayKind::Working
        };

        let weather = sample_weather(&mut rng);

        // Seasonal sinusoid peaking in mid-July (day ~196), bottoming in
        // mid-January, the usual northern-hemisphere ridership shape.
        let doy = date.ordinal() as f64;
        let seasonal = 1.0 + 0.55 * (std::f64::consts::TAU * (doy - 105.0) / 365.0).sin();
        let base = BASE_DEMAND * seasonal * weather_factor(weather);

        // Registered commuters dominate working days; casual riders pick up
        // the slack on weekends and holidays.
        let (casual_share, registered_share) = match day_kind {
            DayKind::Working => (0.17, 0.83),
            DayKind::NonWorking => (0.45, 0.55),
        };

        let casual = scaled_count(base * casual_share, &noise, &mut rng);
        let registered = scaled_count(base * registered_share, &noise, &mut rng);

        records.push(RentalRecord {
            date,
            day_kind,
            weather,
            season,
            casual,
            registered,
            // By construction, so the loader invariant holds for sample data too.
            total: casual + registered,
        });
    }

    Ok(RentalDataset::new(records))
}

fn scaled_count(mean: f64, noise: &Normal<f64>, rng: &mut StdRng) -> u32 {
    let wobble = (1.0 + noise.sample(rng)).max(0.0);
    (mean * wobble).round().max(0.0) as u32
}

fn weather_factor(weather: Weather) -> f64 {
    match weather {
        Weather::Clear => 1.0,
        Weather::Cloudy => 0.88,
        Weather::LightPrecip => 0.55,
        Weather::HeavyPrecip => 0.20,
    }
}

fn sample_weather(rng: &mut StdRng) -> Weather {
    let u: f64 = rng.r#gen();
    let mut acc = 0.0;
    for &(weather, p) in &WEATHER_WEIGHTS {
        acc += p;
        if u < acc {
            return weather;
        }
    }
    Weather::HeavyPrecip
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_is_deterministic() {
        let a = generate_sample(90, 42).unwrap();
        let b = generate_sample(90, 42).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn different_seeds_differ() {
        let a = generate_sample(90, 1).unwrap();
        let b = generate_sample(90, 2).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn generates_requested_span_sorted() {
        let ds = generate_sample(30, 7).unwrap();
        assert_eq!(ds.len(), 30);
        let span = ds.date_span().unwrap();
        assert_eq!(span.start, NaiveDate::from_ymd_opt(2011, 1, 1).unwrap());
        assert_eq!(span.end, NaiveDate::from_ymd_opt(2011, 1, 30).unwrap());
        let dates: Vec<NaiveDate> = ds.records().iter().map(|r| r.date).collect();
        let mut sorted = dates.clone();
        sorted.sort();
        assert_eq!(dates, sorted);
    }

    #[test]
    fn totals_hold_the_loader_invariant() {
        let ds = generate_sample(365, 42).unwrap();
        for r in ds.records() {
            assert_eq!(r.total, r.casual + r.registered, "at {}", r.date);
        }
    }

    #[test]
    fn weekends_are_never_working_days() {
        let ds = generate_sample(365, 42).unwrap();
        for r in ds.records() {
            if matches!(r.date.weekday(), Weekday::Sat | Weekday::Sun) {
                assert_eq!(r.day_kind, DayKind::NonWorking, "at {}", r.date);
            }
        }
    }

    #[test]
    fn zero_days_is_a_usage_error() {
        let err = generate_sample(0, 0).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
