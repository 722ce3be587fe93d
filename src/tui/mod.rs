//! Ratatui-based terminal UI.
//!
//! The TUI owns the date-range control and renders the dashboard: a metrics
//! row, a Plotters line chart of daily totals, and three categorical bar
//! charts. Every accepted range change reruns the aggregation pipeline
//! synchronously before the next draw; nothing is cached between renders.

use std::io;
use std::time::Duration;

use chrono::NaiveDate;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{BarChart, Block, Borders, Clear, List, ListItem, Paragraph},
    Terminal,
};

use crate::app::pipeline::{self, DashboardData};
use crate::domain::{
    CategoryRow, DashConfig, DateRange, DatasetStats, DayKind, RentalDataset, Season, Weather,
};
use crate::error::AppError;

mod plotters_chart;

use plotters_chart::DailyRentalsChart;

/// Start the TUI over an already-loaded dataset.
pub fn run(config: &DashConfig, dataset: RentalDataset) -> Result<(), AppError> {
    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::runtime(format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(config, dataset)?;
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode()
            .map_err(|e| AppError::runtime(format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::runtime(format!(
                "Failed to enter alternate screen: {e}"
            )));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

/// Which settings-list row is selected.
const FIELD_START: usize = 0;
const FIELD_END: usize = 1;

struct App {
    source: String,
    dataset: RentalDataset,
    stats: DatasetStats,
    /// Full dataset span; arrow-key stepping is clamped to it.
    span: DateRange,
    /// Current selection.
    range: DateRange,
    data: DashboardData,
    selected_field: usize,
    editing_date: bool,
    date_input: String,
    status: String,
}

impl App {
    fn new(config: &DashConfig, dataset: RentalDataset) -> Result<Self, AppError> {
        let stats = dataset
            .stats()
            .ok_or_else(|| AppError::data("Dataset is empty."))?;
        let span = DateRange::new(stats.date_min, stats.date_max);
        let range = crate::app::resolve_range(config, span);
        let data = pipeline::run_dashboard(&dataset, range);

        Ok(Self {
            source: crate::app::source_label(config),
            dataset,
            stats,
            span,
            range,
            data,
            selected_field: FIELD_START,
            editing_date: false,
            date_input: String::new(),
            status: format!("Loaded {} records.", stats.n_records),
        })
    }

    fn event_loop<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
    ) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::runtime(format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::runtime(format!("Event poll error: {e}")))?
            {
                continue;
            }

            match event::read().map_err(|e| AppError::runtime(format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code) {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Returns `true` when the app should quit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        if self.editing_date {
            self.handle_date_edit(code);
            return false;
        }

        match code {
            KeyCode::Char('q') => return true,
            KeyCode::Up => {
                if self.selected_field > 0 {
                    self.selected_field -= 1;
                }
            }
            KeyCode::Down => {
                if self.selected_field < FIELD_END {
                    self.selected_field += 1;
                }
            }
            KeyCode::Left => self.step_selected(-1),
            KeyCode::Right => self.step_selected(1),
            KeyCode::Enter => {
                self.editing_date = true;
                self.date_input = self.selected_bound().to_string();
                let which = if self.selected_field == FIELD_START {
                    "start"
                } else {
                    "end"
                };
                self.status =
                    format!("Editing {which} date (YYYY-MM-DD). Enter to apply, Esc to cancel.");
            }
            KeyCode::Char('r') => {
                self.range = self.span;
                self.recompute();
                self.status = "Range reset to full span.".to_string();
            }
            _ => {}
        }

        false
    }

    fn handle_date_edit(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc => {
                self.editing_date = false;
                self.status = "Date edit canceled.".to_string();
            }
            KeyCode::Enter => {
                self.editing_date = false;
                self.apply_date_input();
            }
            KeyCode::Backspace => {
                self.date_input.pop();
            }
            KeyCode::Char(c) => {
                if c.is_ascii_digit() || c == '-' || c == '/' {
                    self.date_input.push(c);
                }
            }
            _ => {}
        }
    }

    fn selected_bound(&self) -> NaiveDate {
        if self.selected_field == FIELD_START {
            self.range.start
        } else {
            self.range.end
        }
    }

    /// Move the selected bound by `delta` days, clamped to the dataset span
    /// and to the opposite bound.
    fn step_selected(&mut self, delta: i64) {
        let step = chrono::Duration::days(delta);
        if self.selected_field == FIELD_START {
            self.range.start = clamp_date(self.range.start + step, self.span.start, self.range.end);
            self.status = format!("start: {}", self.range.start);
        } else {
            self.range.end = clamp_date(self.range.end + step, self.range.start, self.span.end);
            self.status = format!("end: {}", self.range.end);
        }
        self.recompute();
    }

    fn apply_date_input(&mut self) {
        let trimmed = self.date_input.trim();
        let date = match crate::io::parse_date(trimmed) {
            Ok(date) => date,
            Err(msg) => {
                self.status = msg;
                return;
            }
        };

        // Typed input is applied as-is: an inverted range is a legal selection
        // that matches nothing, and the dashboard renders its empty state.
        if self.selected_field == FIELD_START {
            self.range.start = date;
        } else {
            self.range.end = date;
        }
        self.recompute();
        self.status = format!("range: {} .. {}", self.range.start, self.range.end);
    }

    fn recompute(&mut self) {
        self.data = pipeline::run_dashboard(&self.dataset, self.range);
    }

    fn draw(&mut self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Min(0),
                Constraint::Length(3),
            ])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_body(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let mut lines: Vec<Line> = Vec::new();
        lines.push(Line::from(vec![
            Span::styled("bikedash", Style::default().fg(Color::Cyan)),
            Span::raw(" — bike sharing rentals"),
        ]));
        lines.push(Line::from(Span::styled(
            format!(
                "source: {} | loaded: {} records, {} .. {}",
                self.source, self.stats.n_records, self.stats.date_min, self.stats.date_max
            ),
            Style::default().fg(Color::Gray),
        )));
        lines.push(Line::from(Span::styled(
            format!(
                "range: {} .. {} | {} records selected",
                self.range.start, self.range.end, self.data.n_filtered
            ),
            Style::default().fg(Color::Gray),
        )));

        let p = Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_body(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(8),
                Constraint::Length(11),
                Constraint::Length(4),
            ])
            .split(area);

        self.draw_metrics(frame, chunks[0]);
        self.draw_daily_chart(frame, chunks[1]);
        self.draw_bar_charts(frame, chunks[2]);
        self.draw_settings(frame, chunks[3]);
    }

    fn draw_metrics(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
            ])
            .split(area);

        let metrics = [
            ("Total rides", self.data.metrics.total_rides),
            ("Registered", self.data.metrics.registered_rides),
            ("Casual", self.data.metrics.casual_rides),
        ];
        for (i, (title, value)) in metrics.iter().enumerate() {
            let p = Paragraph::new(Span::styled(
                value.to_string(),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ))
            .alignment(Alignment::Center)
            .block(Block::default().title(*title).borders(Borders::ALL));
            frame.render_widget(p, chunks[i]);
        }
    }

    fn draw_daily_chart(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default().title("Daily rentals").borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        let Some((series, x_bounds, y_bounds, start_date)) = daily_series(&self.data) else {
            let msg = Paragraph::new("No data in selected range.")
                .style(Style::default().fg(Color::Yellow))
                .block(Block::default());
            frame.render_widget(msg, inner);
            return;
        };

        let widget = DailyRentalsChart {
            series: &series,
            x_bounds,
            y_bounds,
            start_date,
        };
        frame.render_widget(widget, inner);
    }

    fn draw_bar_charts(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
            ])
            .split(area);

        draw_bar_panel(frame, chunks[0], "Avg by working day", &self.data.by_workingday, day_kind_label);
        draw_bar_panel(frame, chunks[1], "Avg by weather", &self.data.by_weather, weather_label);
        draw_bar_panel(frame, chunks[2], "Avg by season", &self.data.by_season, season_label);
    }

    fn draw_settings(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let items = vec![
            ListItem::new(format!("Start: {}", self.range.start)),
            ListItem::new(format!("End  : {}", self.range.end)),
        ];

        let list = List::new(items)
            .block(Block::default().title("Date range").borders(Borders::ALL))
            .highlight_style(Style::default().fg(Color::Black).bg(Color::White))
            .highlight_symbol("» ");

        let mut state = ratatui::widgets::ListState::default();
        state.select(Some(self.selected_field));
        frame.render_stateful_widget(list, area, &mut state);

        if self.editing_date {
            let hint = Paragraph::new(format!("date: {}_", self.date_input))
                .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));
            let rect = Rect {
                x: area.x + 2,
                y: area.y + area.height.saturating_sub(2),
                width: area.width.saturating_sub(4),
                height: 1,
            };
            frame.render_widget(hint, rect);
        }
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "↑/↓ select  ←/→ ±1 day  Enter edit date  r reset  q quit";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

fn clamp_date(date: NaiveDate, lo: NaiveDate, hi: NaiveDate) -> NaiveDate {
    date.max(lo).min(hi)
}

/// Build the Plotters series for the daily chart.
///
/// X is days since the first plotted date, so the axis formatter can map tick
/// values back to calendar dates.
fn daily_series(
    data: &DashboardData,
) -> Option<(Vec<(f64, f64)>, [f64; 2], [f64; 2], NaiveDate)> {
    let first = data.daily.first()?;
    let last = data.daily.last()?;

    let d0 = first.date;
    let span_days = ((last.date - d0).num_days()).max(1) as f64;

    let mut series = Vec::with_capacity(data.daily.len());
    let (mut y_min, mut y_max) = (f64::INFINITY, f64::NEG_INFINITY);
    for row in &data.daily {
        let x = (row.date - d0).num_days() as f64;
        let y = row.total as f64;
        y_min = y_min.min(y);
        y_max = y_max.max(y);
        series.push((x, y));
    }

    if !y_min.is_finite() || !y_max.is_finite() {
        return None;
    }

    let pad = ((y_max - y_min).abs() * 0.05).max(1.0);
    let y_bounds = [(y_min - pad).max(0.0), y_max + pad];

    Some((series, [0.0, span_days], y_bounds, d0))
}

fn draw_bar_panel<K: Copy>(
    frame: &mut ratatui::Frame<'_>,
    area: Rect,
    title: &str,
    rows: &[CategoryRow<K>],
    label: fn(K) -> &'static str,
) {
    let block = Block::default().title(title).borders(Borders::ALL);

    if rows.is_empty() {
        let msg = Paragraph::new("no data")
            .style(Style::default().fg(Color::Yellow))
            .block(block);
        frame.render_widget(msg, area);
        return;
    }

    let data: Vec<(&str, u64)> = rows
        .iter()
        .map(|r| (label(r.key), r.mean_total.round() as u64))
        .collect();

    let chart = BarChart::default()
        .block(block)
        .data(data.as_slice())
        .bar_width(8)
        .bar_gap(1)
        .bar_style(Style::default().fg(Color::Cyan))
        .value_style(Style::default().fg(Color::Black).bg(Color::Cyan));
    frame.render_widget(chart, area);
}

// Compact bar labels; the full names (`display_name`) are used where width is
// not at a premium, e.g. the summary tables.
fn day_kind_label(kind: DayKind) -> &'static str {
    match kind {
        DayKind::NonWorking => "Holiday",
        DayKind::Working => "Workday",
    }
}

fn weather_label(weather: Weather) -> &'static str {
    match weather {
        Weather::Clear => "Clear",
        Weather::Cloudy => "Cloudy",
        Weather::LightPrecip => "Lt.prec",
        Weather::HeavyPrecip => "Storm",
    }
}

fn season_label(season: Season) -> &'static str {
    season.display_name()
}
