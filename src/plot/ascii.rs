//! ASCII plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! The x-axis is log10(time), so a Jacob straight line draws as a straight line.
//!
//! Plot elements:
//! - observations inside the fit window: `*`
//! - observations outside the fit window: `.`
//! - fitted line: `-`

use crate::app::pipeline::Analysis;
use crate::domain::{DisplayConfig, ObservationSeries};

/// Render observations and (optionally) the fitted line.
pub fn render_ascii_plot(series: &ObservationSeries, analysis: Option<&Analysis>, display: &DisplayConfig) -> String {
    let width = display.plot_width.max(10);
    let height = display.plot_height.max(5);

    let log_t: Vec<f64> = series.times().iter().map(|t| t.log10()).collect();
    let (x_min, x_max) = x_range(&log_t);

    let curve: Vec<(f64, f64)> = analysis
        .map(|a| sample_line(a, x_min, x_max, width))
        .unwrap_or_default();

    let (y_min, y_max) = y_range(series.drawdowns(), &curve).unwrap_or((0.0, 1.0));
    let (y_min, y_max) = pad_range(y_min, y_max, 0.05);

    let mut grid = vec![vec![' '; width]; height];

    // Draw line first (so points can overlay).
    draw_curve(&mut grid, &curve, x_min, x_max, y_min, y_max);

    for (k, (&x, &s)) in log_t.iter().zip(series.drawdowns()).enumerate() {
        let col = map_x(x, x_min, x_max, width);
        let row = map_y(s, y_min, y_max, height);
        let in_window = analysis.is_none_or(|a| a.window.contains(k));
        grid[row][col] = if in_window { '*' } else { '.' };
    }

    let mut out = String::new();
    out.push_str(&format!(
        "Plot: log10(t)=[{x_min:.3}, {x_max:.3}] | s=[{y_min:.3}, {y_max:.3}]\n"
    ));
    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }

    out
}

fn x_range(log_t: &[f64]) -> (f64, f64) {
    let lo = log_t.iter().copied().fold(f64::INFINITY, f64::min);
    let hi = log_t.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if lo.is_finite() && hi.is_finite() && hi > lo {
        (lo, hi)
    } else if lo.is_finite() {
        (lo - 0.5, lo + 0.5)
    } else {
        (0.0, 1.0)
    }
}

fn sample_line(analysis: &Analysis, x_min: f64, x_max: f64, n: usize) -> Vec<(f64, f64)> {
    let n = n.max(2);
    (0..n)
        .map(|i| {
            let x = x_min + (x_max - x_min) * i as f64 / (n as f64 - 1.0);
            (x, analysis.fit.intercept + analysis.fit.slope * x)
        })
        .collect()
}

fn y_range(drawdowns: &[f64], curve: &[(f64, f64)]) -> Option<(f64, f64)> {
    let mut min_y = f64::INFINITY;
    let mut max_y = f64::NEG_INFINITY;
    for &y in drawdowns.iter().chain(curve.iter().map(|(_, y)| y)) {
        min_y = min_y.min(y);
        max_y = max_y.max(y);
    }
    if min_y.is_finite() && max_y.is_finite() && max_y > min_y {
        Some((min_y, max_y))
    } else {
        None
    }
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = (max - min).abs();
    let pad = (span * frac).max(1e-12);
    (min - pad, max + pad)
}

fn map_x(x: f64, x_min: f64, x_max: f64, width: usize) -> usize {
    let width = width.max(2);
    let u = ((x - x_min) / (x_max - x_min)).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = ((y - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // y=top is max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

fn draw_curve(grid: &mut [Vec<char>], curve: &[(f64, f64)], x_min: f64, x_max: f64, y_min: f64, y_max: f64) {
    if curve.len() < 2 {
        return;
    }
    let height = grid.len();
    let width = grid[0].len();

    let mut prev = None;
    for &(x, y) in curve {
        let col = map_x(x, x_min, x_max, width);
        let row = map_y(y, y_min, y_max, height);
        if let Some((c0, r0)) = prev {
            draw_line(grid, c0, r0, col, row, '-');
        } else {
            grid[row][col] = '-';
        }
        prev = Some((col, row));
    }
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
