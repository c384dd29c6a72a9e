//! Ratatui-based terminal UI.
//!
//! The TUI lets the user move the fit window over the observations and see the
//! straight line, T, S and the u diagnostics update on every key press.

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
};

use crate::app::pipeline::{Analysis, analyze};
use crate::domain::{ObservationSeries, Plausibility, TestGeometry};
use crate::error::AppError;
use crate::models::JACOB_U_LIMIT;
use crate::report::format_error;

mod plotters_chart;

use plotters_chart::JacobChart;

/// Start the TUI on an already-loaded series.
pub fn run(series: ObservationSeries, geometry: TestGeometry) -> Result<(), AppError> {
    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal =
        Terminal::new(backend).map_err(|e| AppError::new(4, format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(series, geometry);
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::new(4, format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::new(4, format!("Failed to enter alternate screen: {e}")));
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

/// Which window bound the arrow keys move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Bound {
    Start,
    End,
}

struct App {
    series: ObservationSeries,
    geometry: TestGeometry,
    start: usize,
    end: usize,
    selected: Bound,
    status: String,
    analysis: Option<Analysis>,
}

impl App {
    fn new(series: ObservationSeries, geometry: TestGeometry) -> Self {
        let end = series.len();
        let mut app = Self {
            series,
            geometry,
            start: 0,
            end,
            selected: Bound::Start,
            status: String::new(),
            analysis: None,
        };
        app.refit();
        app
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::new(4, format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::new(4, format!("Event poll error: {e}")))?
            {
                continue;
            }

            match event::read().map_err(|e| AppError::new(4, format!("Event read error: {e}")))? {
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

    /// Apply one key press. Returns `true` when the user asked to quit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Up => self.selected = Bound::Start,
            KeyCode::Down => self.selected = Bound::End,
            KeyCode::Tab => {
                self.selected = match self.selected {
                    Bound::Start => Bound::End,
                    Bound::End => Bound::Start,
                };
            }
            KeyCode::Left => self.nudge(-1),
            KeyCode::Right => self.nudge(1),
            KeyCode::Char('r') => {
                self.start = 0;
                self.end = self.series.len();
                self.refit();
            }
            KeyCode::Char('e') => self.export(),
            _ => {}
        }
        false
    }

    /// Move the selected bound by one observation.
    ///
    /// Bounds stay inside `[0, len]`; anything the fit rejects (e.g. a
    /// one-point window) is shown in the status line instead.
    fn nudge(&mut self, delta: isize) {
        let n = self.series.len();
        let bound = match self.selected {
            Bound::Start => &mut self.start,
            Bound::End => &mut self.end,
        };
        *bound = bound.saturating_add_signed(delta).min(n);
        self.refit();
    }

    fn refit(&mut self) {
        match analyze(&self.series, self.start, self.end, &self.geometry) {
            Ok(analysis) => {
                self.status = match &analysis.parameters.plausibility {
                    Plausibility::Plausible => format!("fit {}", analysis.window),
                    Plausibility::Implausible(reasons) => format!("implausible: {}", reasons.join("; ")),
                };
                self.analysis = Some(analysis);
            }
            Err(err) => {
                self.status = format_error(&err);
                self.analysis = None;
            }
        }
    }

    fn export(&mut self) {
        let Some(analysis) = &self.analysis else {
            self.status = "Nothing to export: no valid fit.".to_string();
            return;
        };
        let path = PathBuf::from(format!(
            "jacob-report-{}.json",
            chrono::Utc::now().format("%Y%m%d-%H%M%S")
        ));
        self.status = match crate::io::write_report_json(&path, analysis, &self.geometry) {
            Ok(()) => format!("Wrote report: {}", path.display()),
            Err(err) => format!("Export failed: {err}"),
        };
    }

    fn draw(&mut self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(5), Constraint::Min(0), Constraint::Length(3)])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_body(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let mut lines: Vec<Line> = Vec::new();
        lines.push(Line::from(vec![
            Span::styled("jacob", Style::default().fg(Color::Cyan)),
            Span::raw(" - Cooper-Jacob straight-line fit"),
        ]));
        lines.push(Line::from(Span::styled(
            format!(
                "Q={:.4} | r={:.4} | n={}",
                self.geometry.pumping_rate,
                self.geometry.distance,
                self.series.len()
            ),
            Style::default().fg(Color::Gray),
        )));

        if let Some(a) = &self.analysis {
            lines.push(Line::from(Span::styled(
                format!(
                    "T={:.4} | S={:.4e} | b1={:.4} | rmse={:.3e} | u<{JACOB_U_LIMIT}: {}/{}",
                    a.parameters.transmissivity,
                    a.parameters.storativity,
                    a.fit.slope,
                    a.fit.rmse,
                    a.parameters.count_below(JACOB_U_LIMIT),
                    a.parameters.u.len(),
                ),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            )));
        }

        let p = Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_body(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Length(24)])
            .split(area);

        self.draw_chart(frame, chunks[0]);
        self.draw_window_panel(frame, chunks[1]);
    }

    fn draw_chart(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default().title("Drawdown vs log10(t)").borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        let data = chart_series(&self.series, self.analysis.as_ref());
        let widget = JacobChart {
            line: &data.line,
            inside: &data.inside,
            outside: &data.outside,
            x_bounds: data.x_bounds,
            y_bounds: data.y_bounds,
            x_label: "time",
            y_label: "drawdown",
        };
        frame.render_widget(widget, inner);
    }

    fn draw_window_panel(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let n = self.series.len();
        let time_at = |idx: usize| {
            self.series
                .times()
                .get(idx)
                .map(|t| format!("{t:.2}"))
                .unwrap_or_else(|| "end".to_string())
        };

        let items = vec![
            ListItem::new(format!("Start: {} (t={})", self.start, time_at(self.start))),
            ListItem::new(format!("End:   {} of {n}", self.end)),
        ];
        let list = List::new(items)
            .block(Block::default().title("Window").borders(Borders::ALL))
            .highlight_style(Style::default().fg(Color::Black).bg(Color::White))
            .highlight_symbol("» ");

        let mut state = ratatui::widgets::ListState::default();
        state.select(Some(match self.selected {
            Bound::Start => 0,
            Bound::End => 1,
        }));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "↑/↓ bound  ←/→ move  r reset  e export  q quit";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

/// Series and bounds for one chart frame.
struct ChartData {
    line: Vec<(f64, f64)>,
    inside: Vec<(f64, f64)>,
    outside: Vec<(f64, f64)>,
    x_bounds: [f64; 2],
    y_bounds: [f64; 2],
}

fn chart_series(series: &ObservationSeries, analysis: Option<&Analysis>) -> ChartData {
    let mut inside = Vec::new();
    let mut outside = Vec::new();
    for (k, (&t, &s)) in series.times().iter().zip(series.drawdowns()).enumerate() {
        let point = (t.log10(), s);
        if analysis.is_some_and(|a| a.window.contains(k)) {
            inside.push(point);
        } else {
            outside.push(point);
        }
    }

    let (mut x0, mut x1) = (f64::INFINITY, f64::NEG_INFINITY);
    for &(x, _) in inside.iter().chain(&outside) {
        x0 = x0.min(x);
        x1 = x1.max(x);
    }
    if !x0.is_finite() || !x1.is_finite() || x1 <= x0 {
        x0 = 0.0;
        x1 = 1.0;
    }

    let line = analysis
        .map(|a| {
            [x0, x1]
                .into_iter()
                .map(|x| (x, a.fit.intercept + a.fit.slope * x))
                .collect()
        })
        .unwrap_or_default();

    let (mut y_min, mut y_max) = (f64::INFINITY, f64::NEG_INFINITY);
    for &(_, y) in inside.iter().chain(&outside).chain(&line) {
        y_min = y_min.min(y);
        y_max = y_max.max(y);
    }
    if !y_min.is_finite() || !y_max.is_finite() || y_max <= y_min {
        y_min = 0.0;
        y_max = 1.0;
    }
    let pad = ((y_max - y_min).abs() * 0.05).max(1e-12);

    ChartData {
        line,
        inside,
        outside,
        x_bounds: [x0, x1],
        y_bounds: [y_min - pad, y_max + pad],
    }
}
