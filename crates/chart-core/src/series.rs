// File: crates/chart-core/src/series.rs
// Summary: Series model for line, area, and bar data.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SeriesType {
    Line,
    /// Line filled down to the baseline.
    Area,
    /// One bar per point, drawn from the baseline.
    Bar,
}

#[derive(Clone, Debug)]
pub struct Series {
    pub name: String,
    pub series_type: SeriesType,
    pub data_xy: Vec<(f64, f64)>,
    pub baseline: Option<f64>,
}

impl Series {
    pub fn new(series_type: SeriesType) -> Self {
        Self { name: String::new(), series_type, data_xy: Vec::new(), baseline: None }
    }

    pub fn with_data(series_type: SeriesType, data: Vec<(f64, f64)>) -> Self {
        Self { data_xy: data, ..Self::new(series_type) }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_baseline(mut self, baseline: f64) -> Self {
        self.baseline = Some(baseline);
        self
    }

    /// Get baseline value or default (0.0) when not set.
    pub fn baseline_value(&self) -> f64 { self.baseline.unwrap_or(0.0) }

    pub fn is_empty(&self) -> bool {
        self.data_xy.is_empty()
    }
}
