// File: crates/chart-report/src/render.rs
// Summary: Per-run render settings and the seam that turns a built chart into a PNG file.

use std::path::Path;

use chart_core::{Chart, RenderError, RenderOptions, Theme};

use crate::granularity::Granularity;
use crate::interval::Interval;

/// Interval and granularity used for one report run. The pipeline copies the
/// shared value once when a run starts.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RenderSettings {
    pub interval: Interval,
    pub granularity: Granularity,
}

pub trait ChartWriter: Send + Sync {
    /// Encode `chart` as PNG and write it to `path`, whose parent exists.
    fn write_png(&self, chart: &Chart, path: &Path) -> Result<(), RenderError>;
}

/// Writes charts through the Skia raster renderer at 960x540.
#[derive(Clone, Debug, Default)]
pub struct PngWriter {
    options: RenderOptions,
}

impl PngWriter {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    pub fn with_theme(theme: Theme) -> Self {
        Self::new(RenderOptions { theme, ..RenderOptions::default() })
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }
}

impl ChartWriter for PngWriter {
    fn write_png(&self, chart: &Chart, path: &Path) -> Result<(), RenderError> {
        chart.render_to_png(&self.options, path)
    }
}
