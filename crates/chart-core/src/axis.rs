// File: crates/chart-core/src/axis.rs
// Summary: Axis model with labels, ranges, and tick label formatting.

use chrono::DateTime;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScaleKind {
    Linear,
    /// Values are milliseconds since the Unix epoch, labelled in UTC.
    Time,
    /// Values are category indices (bar charts).
    Category,
}

#[derive(Clone, Debug)]
pub struct Axis {
    pub label: String,
    pub min: f64,
    pub max: f64,
    pub kind: ScaleKind,
    /// A fixed range is kept as-is by autoscaling.
    pub fixed: bool,
    /// Tick labels for a [`ScaleKind::Category`] axis, by index.
    pub categories: Vec<String>,
}

impl Axis {
    pub fn new(label: impl Into<String>, min: f64, max: f64) -> Self {
        Self { label: label.into(), min, max, kind: ScaleKind::Linear, fixed: false, categories: Vec::new() }
    }

    pub fn time(label: impl Into<String>) -> Self {
        Self { kind: ScaleKind::Time, ..Self::new(label, 0.0, 1.0) }
    }

    /// Category axis spanning one slot per label.
    pub fn categories(label: impl Into<String>, categories: Vec<String>) -> Self {
        let max = categories.len() as f64 - 0.5;
        Self {
            kind: ScaleKind::Category,
            fixed: true,
            categories,
            ..Self::new(label, -0.5, max)
        }
    }

    pub fn default_x() -> Self {
        Self::time("Time")
    }

    pub fn default_y() -> Self {
        Self::new("", 0.0, 100.0)
    }

    pub fn with_range(mut self, min: f64, max: f64) -> Self {
        self.min = min;
        self.max = max;
        self.fixed = true;
        self
    }

    pub fn span(&self) -> f64 {
        (self.max - self.min).max(1e-9)
    }

    /// Values to label: every category, or `count` evenly spaced values.
    pub fn tick_values(&self, count: usize) -> Vec<f64> {
        match self.kind {
            ScaleKind::Category => (0..self.categories.len()).map(|i| i as f64).collect(),
            ScaleKind::Linear | ScaleKind::Time => evenly_spaced(self.min, self.max, count),
        }
    }

    /// Format a value on this axis for a tick label.
    pub fn format_tick(&self, value: f64) -> String {
        match self.kind {
            ScaleKind::Time => {
                let Some(ts) = DateTime::from_timestamp_millis(value as i64) else {
                    return String::new();
                };
                // Multi-day spans need the date to disambiguate ticks.
                if self.span() > 86_400_000.0 {
                    ts.format("%m-%d %H:%M").to_string()
                } else {
                    ts.format("%H:%M:%S").to_string()
                }
            }
            ScaleKind::Category => {
                let index = value.round();
                if index < 0.0 {
                    return String::new();
                }
                self.categories.get(index as usize).cloned().unwrap_or_default()
            }
            ScaleKind::Linear => {
                let magnitude = self.span();
                if magnitude >= 100.0 {
                    format!("{value:.0}")
                } else if magnitude >= 1.0 {
                    format!("{value:.1}")
                } else {
                    format!("{value:.3}")
                }
            }
        }
    }
}

/// `count` values from `start` to `end`, both included.
pub(crate) fn evenly_spaced(start: f64, end: f64, count: usize) -> Vec<f64> {
    if count < 2 {
        return vec![start, end];
    }
    let step = (end - start) / (count - 1) as f64;
    (0..count).map(|i| start + step * i as f64).collect()
}
