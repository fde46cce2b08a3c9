//! Plotters-powered trend chart widget for Ratatui.
//!
//! We render Plotters output into the Ratatui buffer using `plotters-ratatui-backend`.

use plotters::prelude::*;
use plotters_ratatui_backend::widget_fn;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

/// High-contrast palette shared by the chart lines and the legend.
pub const PALETTE: [(u8, u8, u8); 8] = [
    (0, 255, 255),
    (255, 200, 0),
    (0, 255, 0),
    (255, 80, 80),
    (180, 120, 255),
    (255, 140, 0),
    (80, 160, 255),
    (255, 105, 180),
];

/// Terminal color of the `idx`-th series.
pub fn series_color(idx: usize) -> Color {
    let (r, g, b) = PALETTE[idx % PALETTE.len()];
    Color::Rgb(r, g, b)
}

/// One named line: `(year, scaled value)` points.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendLine {
    pub name: String,
    pub points: Vec<(f64, f64)>,
}

/// A render-only chart description.
///
/// All series and bounds are computed outside the render call.
pub struct TrendChart<'a> {
    pub lines: &'a [TrendLine],
    /// Index into `lines` drawn in white on top of the others.
    pub highlight: Option<usize>,
    pub x_bounds: [f64; 2],
    pub y_bounds: [f64; 2],
    pub y_label: &'a str,
}

impl<'a> Widget for TrendChart<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Plotters may fail to build a chart in a tiny area.
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
                .set_label_area_size(LabelAreaPosition::Left, 6)
                .set_label_area_size(LabelAreaPosition::Bottom, 3)
                .build_cartesian_2d(x0..x1, y0..y1)?;

            // Mesh lines are noise at terminal resolution; axes + labels suffice.
            chart
                .configure_mesh()
                .disable_x_mesh()
                .disable_y_mesh()
                .x_desc("year")
                .y_desc(self.y_label)
                .x_labels(6)
                .y_labels(5)
                .x_label_formatter(&|v| format!("{v:.0}"))
                .y_label_formatter(&|v| format!("{v:.1}"))
                .label_style(("sans-serif", 10).into_font().color(&WHITE))
                .axis_style(&WHITE)
                .bold_line_style(&WHITE)
                .draw()?;

            for (idx, line) in self.lines.iter().enumerate() {
                if Some(idx) == self.highlight {
                    continue;
                }
                let (r, g, b) = PALETTE[idx % PALETTE.len()];
                chart.draw_series(LineSeries::new(line.points.iter().copied(), &RGBColor(r, g, b)))?;
            }

            // The selected segment goes last so it is never hidden.
            if let Some(line) = self.highlight.and_then(|idx| self.lines.get(idx)) {
                chart.draw_series(LineSeries::new(line.points.iter().copied(), &WHITE))?;
            }

            Ok(())
        });

        widget.render(area, buf);
    }
}

/// X/Y bounds covering every line, with a 5% vertical pad and a zero floor.
pub fn chart_bounds(lines: &[TrendLine]) -> ([f64; 2], [f64; 2]) {
    let (mut x_min, mut x_max) = (f64::INFINITY, f64::NEG_INFINITY);
    let (mut y_min, mut y_max) = (f64::INFINITY, f64::NEG_INFINITY);
    for &(x, y) in lines.iter().flat_map(|l| l.points.iter()) {
        x_min = x_min.min(x);
        x_max = x_max.max(x);
        y_min = y_min.min(y);
        y_max = y_max.max(y);
    }

    if !x_min.is_finite() || !x_max.is_finite() || x_max <= x_min {
        let center = if x_min.is_finite() { x_min } else { 0.0 };
        x_min = center - 1.0;
        x_max = center + 1.0;
    }
    if !y_min.is_finite() || !y_max.is_finite() || y_max <= y_min {
        y_min = 0.0;
        y_max = if y_max.is_finite() && y_max > 0.0 { y_max } else { 1.0 };
    }

    let pad = ((y_max - y_min).abs() * 0.05).max(1e-12);
    ([x_min, x_max], [(y_min - pad).max(0.0).min(y_min), y_max + pad])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_cover_all_lines() {
        let lines = vec![
            TrendLine { name: "a".into(), points: vec![(2024.0, 10.0), (2025.0, 20.0)] },
            TrendLine { name: "b".into(), points: vec![(2024.0, 5.0), (2034.0, 40.0)] },
        ];
        let (x, y) = chart_bounds(&lines);
        assert_eq!(x, [2024.0, 2034.0]);
        assert!(y[0] <= 5.0 && y[0] >= 0.0);
        assert!(y[1] > 40.0);
    }

    #[test]
    fn degenerate_bounds_are_widened() {
        let flat = vec![TrendLine { name: "z".into(), points: vec![(2025.0, 0.0)] }];
        let (x, y) = chart_bounds(&flat);
        assert!(x[1] > x[0]);
        assert!(y[1] > y[0]);

        let (x, y) = chart_bounds(&[]);
        assert!(x[1] > x[0]);
        assert!(y[1] > y[0]);
    }
}
