//! Plotters-powered drawdown chart widget for Ratatui.
//!
//! Plotters gives nicer axes and tick labels than Ratatui's built-in `Chart`
//! widget. Output is rendered into the Ratatui buffer using
//! `plotters-ratatui-backend`.

use plotters::prelude::*;
use plotters_ratatui_backend::widget_fn;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

/// A render-only chart description.
///
/// All series and bounds are computed outside the render call, so `render()`
/// only draws.
pub struct JacobChart<'a> {
    /// Fitted straight line, in (log10 t, s) coordinates.
    pub line: &'a [(f64, f64)],
    /// Observations inside the fit window.
    pub inside: &'a [(f64, f64)],
    /// Observations outside the fit window.
    pub outside: &'a [(f64, f64)],
    /// X bounds (log10 time).
    pub x_bounds: [f64; 2],
    /// Y bounds (drawdown).
    pub y_bounds: [f64; 2],
    pub x_label: &'a str,
    pub y_label: &'a str,
}

impl<'a> Widget for JacobChart<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Plotters may fail to lay out a chart in a tiny area.
        if area.width < 20 || area.height < 8 {
            buf.set_string(
                area.x,
                area.y,
                "Chart area too small (resize terminal).",
                Style::default().fg(Color::Yellow),
            );
            return;
        }

        let [x0, x1] = self.x_bounds;
        let [y0, y1] = self.y_bounds;
        if !(x0.is_finite() && x1.is_finite() && y0.is_finite() && y1.is_finite()) || x1 <= x0 || y1 <= y0 {
            return;
        }

        let widget = widget_fn(move |root| {
            let mut chart = ChartBuilder::on(&root)
                .margin(1)
                // Terminal cells are low-res, so keep label areas compact.
                .set_label_area_size(LabelAreaPosition::Left, 6)
                .set_label_area_size(LabelAreaPosition::Bottom, 3)
                .build_cartesian_2d(x0..x1, y0..y1)?;

            chart
                .configure_mesh()
                .disable_x_mesh()
                .disable_y_mesh()
                .x_desc(self.x_label)
                .y_desc(self.y_label)
                .x_labels(5)
                .y_labels(5)
                // Ticks sit on the log axis but read in time units.
                .x_label_formatter(&|v| fmt_time(10f64.powf(*v)))
                .y_label_formatter(&|v| format!("{v:.2}"))
                .label_style(("sans-serif", 10).into_font().color(&WHITE))
                .axis_style(&WHITE)
                .bold_line_style(&WHITE)
                .draw()?;

            let line_color = RGBColor(0, 255, 255); // cyan
            let inside_color = RGBColor(0, 255, 0); // green
            let outside_color = RGBColor(128, 128, 128); // gray

            chart.draw_series(LineSeries::new(self.line.iter().copied(), &line_color))?;

            // `Circle` radii are mis-scaled by the ratatui backend; pixels render as clean dots.
            chart.draw_series(self.outside.iter().map(|&(x, y)| Pixel::new((x, y), outside_color)))?;
            chart.draw_series(self.inside.iter().map(|&(x, y)| Pixel::new((x, y), inside_color)))?;

            Ok(())
        });

        widget.render(area, buf);
    }
}

fn fmt_time(t: f64) -> String {
    if t >= 100.0 { format!("{t:.0}") } else { format!("{t:.1}") }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_ticks_drop_decimals_when_large() {
        assert_eq!(fmt_time(1.0), "1.0");
        assert_eq!(fmt_time(31.62), "31.6");
        assert_eq!(fmt_time(720.0), "720");
    }
}
