// File: crates/chart-core/src/view.rs
// Visible data ranges and autoscaling.

use crate::Chart;
use crate::series::SeriesType;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewState {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl ViewState {
    /// Data extents of every series in `chart`, with `margin` (a fraction of
    /// the Y span) added above and below. Bars and areas include their baseline.
    pub fn from_chart(chart: &Chart, margin: f64) -> Self {
        let mut x_min = f64::INFINITY;
        let mut x_max = f64::NEG_INFINITY;
        let mut y_min = f64::INFINITY;
        let mut y_max = f64::NEG_INFINITY;
        for s in &chart.series {
            for &(x, y) in s.data_xy.iter().filter(|(_, y)| y.is_finite()) {
                x_min = x_min.min(x);
                x_max = x_max.max(x);
                y_min = y_min.min(y);
                y_max = y_max.max(y);
            }
            if matches!(s.series_type, SeriesType::Area | SeriesType::Bar) && !s.is_empty() {
                let b = s.baseline_value();
                y_min = y_min.min(b);
                y_max = y_max.max(b);
            }
        }
        if !x_min.is_finite() || !x_max.is_finite() || !y_min.is_finite() || !y_max.is_finite() {
            return Self { x_min: 0.0, x_max: 1.0, y_min: 0.0, y_max: 1.0 };
        }
        if (x_max - x_min).abs() < 1e-9 { x_max = x_min + 1.0; }
        if (y_max - y_min).abs() < 1e-9 { y_max = y_min + 1.0; }
        let ym = (y_max - y_min) * margin;
        Self { x_min, x_max, y_min: y_min - ym, y_max: y_max + ym }
    }

    /// Copy the ranges onto axes that are not fixed.
    pub fn apply_to_chart(&self, chart: &mut Chart) {
        if !chart.x_axis.fixed {
            chart.x_axis.min = self.x_min;
            chart.x_axis.max = self.x_max;
        }
        if !chart.y_axis.fixed {
            chart.y_axis.min = self.y_min;
            chart.y_axis.max = self.y_max;
        }
    }
}
