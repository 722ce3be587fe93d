//! ASCII/Unicode plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - daily totals: `o`
//! - connecting polyline: `-`

use crate::domain::DailyRow;

/// Render the daily-totals time series as a fixed-grid line chart.
pub fn render_daily_ascii(daily: &[DailyRow], width: usize, height: usize) -> String {
    let Some((first, last)) = daily.first().zip(daily.last()) else {
        return "(no data to plot)\n".to_string();
    };

    let width = width.max(10);
    let height = height.max(5);

    let d0 = first.date;
    let d1 = last.date;
    let span_days = (d1 - d0).num_days().max(1) as f64;

    let (t_min, t_max) = totals_range(daily);
    let (y_min, y_max) = pad_range(t_min as f64, t_max as f64, 0.05);

    let mut grid = vec![vec![' '; width]; height];

    // Polyline first, so the point markers can overlay it.
    let mut prev = None;
    for row in daily {
        let x = map_x((row.date - d0).num_days() as f64, span_days, width);
        let y = map_y(row.total as f64, y_min, y_max, height);
        if let Some((x0, y0)) = prev {
            draw_line(&mut grid, x0, y0, x, y, '-');
        }
        prev = Some((x, y));
    }

    for row in daily {
        let x = map_x((row.date - d0).num_days() as f64, span_days, width);
        let y = map_y(row.total as f64, y_min, y_max, height);
        grid[y][x] = 'o';
    }

    // Build final string. We include a small header with ranges.
    let mut out = String::new();
    out.push_str(&format!("Plot: {d0} .. {d1} | daily total=[{t_min}, {t_max}]\n"));

    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }

    out
}

fn totals_range(daily: &[DailyRow]) -> (u64, u64) {
    let mut min_t = u64::MAX;
    let mut max_t = 0u64;
    for row in daily {
        min_t = min_t.min(row.total);
        max_t = max_t.max(row.total);
    }
    (min_t, max_t)
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = (max - min).abs();
    let pad = (span * frac).max(1e-12);
    (min - pad, max + pad)
}

fn map_x(offset_days: f64, span_days: f64, width: usize) -> usize {
    let u = (offset_days / span_days).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let u = ((y - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // y=top is max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

/// Integer line drawing (Bresenham-ish).
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0
            && (y0 as usize) < grid.len()
            && x0 >= 0
            && (x0 as usize) < grid[0].len()
            && grid[y0 as usize][x0 as usize] == ' '
        {
            grid[y0 as usize][x0 as usize] = ch;
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn plot_golden_snapshot_small() {
        let daily = vec![
            DailyRow {
                date: date(2011, 1, 1),
                casual: 10,
                registered: 20,
                total: 30,
            },
            DailyRow {
                date: date(2011, 1, 2),
                casual: 5,
                registered: 15,
                total: 20,
            },
        ];

        let txt = render_daily_ascii(&daily, 10, 5);
        let expected = concat!(
            "Plot: 2011-01-01 .. 2011-01-02 | daily total=[20, 30]\n",
            "o-        \n",
            "  --      \n",
            "    --    \n",
            "      --  \n",
            "        -o\n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn empty_input_renders_placeholder() {
        assert_eq!(render_daily_ascii(&[], 40, 10), "(no data to plot)\n");
    }

    #[test]
    fn single_day_does_not_divide_by_zero() {
        let daily = vec![DailyRow {
            date: date(2011, 1, 1),
            casual: 1,
            registered: 2,
            total: 3,
        }];
        let txt = render_daily_ascii(&daily, 12, 6);
        assert!(txt.contains('o'));
    }
}
