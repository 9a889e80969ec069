// File: crates/chart-core/src/lib.rs
// Summary: Core library entry point; exports the chart model and headless PNG rendering.

pub mod chart;
pub mod series;
pub mod axis;
pub mod types;
pub mod view;
pub mod theme;
pub mod downsample;
pub mod error;

pub use chart::{Chart, RenderOptions};
pub use series::{Series, SeriesType};
pub use axis::{Axis, ScaleKind};
pub use view::ViewState;
pub use theme::Theme;
pub use downsample::{aggregate_time_buckets, mean_y};
pub use error::RenderError;
