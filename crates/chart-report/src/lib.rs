// File: crates/chart-report/src/lib.rs
// Summary: Report pipeline entry point; chart definitions, datasets, interval handling, and PNG report runs.

pub mod builder;
pub mod data;
pub mod definition;
pub mod error;
pub mod granularity;
pub mod interval;
pub mod listener;
pub mod pipeline;
pub mod reactor;
pub mod render;
pub mod store;

pub use builder::ChartBuilder;
pub use data::{DataSet, DataSets, DataType};
pub use definition::{load_definitions, parse_definitions, ChartDefinition, ChartKind, FieldSelector, Pattern};
pub use error::{ReportError, Result};
pub use granularity::{Granularity, GranularityAdvisor};
pub use interval::{Interval, IntervalEvent, IntervalListener, IntervalManager, SubscriptionId};
pub use listener::{NoopListener, ReportEvent, ReportListener};
pub use pipeline::{DatasetGroup, ReportPipeline, RunSummary};
pub use reactor::IntervalReactor;
pub use render::{ChartWriter, PngWriter, RenderSettings};
pub use store::{DefinitionSet, DefinitionStore, DATASET_KEY, SUMMARY_KEY};
