// File: crates/chart-report/src/builder.rs
// Summary: Applicability filtering and chart construction from definitions and dataset groups.

use std::sync::Arc;

use chart_core::{aggregate_time_buckets, mean_y, Axis, Chart, Series, SeriesType};

use crate::data::{DataSet, DataType};
use crate::definition::{ChartDefinition, ChartKind};
use crate::render::RenderSettings;

const Y_MARGIN: f64 = 0.02;

/// Builds chart models from definitions. Holds no state; every method is a
/// pure function of its arguments.
#[derive(Clone, Copy, Debug, Default)]
pub struct ChartBuilder;

impl ChartBuilder {
    pub fn new() -> Self {
        Self
    }

    /// The definitions with at least one matching field in at least one of
    /// `datasets`, in their original order.
    pub fn applicable_definitions<'a>(
        &self,
        definitions: &'a [ChartDefinition],
        datasets: &[Arc<DataSet>],
    ) -> Vec<&'a ChartDefinition> {
        definitions
            .iter()
            .filter(|definition| datasets.iter().any(|data| definition.applies_to(data)))
            .collect()
    }

    pub fn build(&self, definition: &ChartDefinition, datasets: &[Arc<DataSet>], settings: &RenderSettings) -> Chart {
        let mut chart = Chart::new().with_title(definition.title());
        let with_host = datasets.len() > 1;

        match definition.kind() {
            ChartKind::Line | ChartKind::Area => {
                let series_type = match definition.kind() {
                    ChartKind::Area => SeriesType::Area,
                    _ => SeriesType::Line,
                };
                chart.x_axis = Axis::time(definition.x_label());
                for data in datasets {
                    for (data_type, field) in definition.matching_fields(data) {
                        let points = points_in_interval(data, data_type, field, settings);
                        let points = aggregate_time_buckets(&points, settings.granularity.as_millis() as f64);
                        if points.is_empty() {
                            continue;
                        }
                        chart.add_series(
                            Series::with_data(series_type, points)
                                .named(series_name(data, data_type, field, with_host)),
                        );
                    }
                }
            }
            ChartKind::Bar => {
                let mut categories = Vec::new();
                for data in datasets {
                    for (data_type, field) in definition.matching_fields(data) {
                        let points = points_in_interval(data, data_type, field, settings);
                        let Some(mean) = mean_y(&points) else {
                            continue;
                        };
                        let name = series_name(data, data_type, field, with_host);
                        let slot = categories.len() as f64;
                        chart.add_series(Series::with_data(SeriesType::Bar, vec![(slot, mean)]).named(name.clone()));
                        categories.push(name);
                    }
                }
                chart.x_axis = Axis::categories(definition.x_label(), categories);
            }
        }

        chart.y_axis = Axis::new(definition.y_label(), 0.0, 1.0);
        if let Some((min, max)) = definition.y_range() {
            chart.y_axis = chart.y_axis.with_range(min, max);
        }
        chart.autoscale_axes(Y_MARGIN);
        chart
    }
}

fn points_in_interval(data: &DataSet, data_type: &DataType, field: &str, settings: &RenderSettings) -> Vec<(f64, f64)> {
    data.series(data_type.id(), field)
        .into_iter()
        .flatten()
        .filter(|(t, _)| settings.interval.contains(*t))
        .map(|(t, v)| (t as f64, v))
        .collect()
}

fn series_name(data: &DataSet, data_type: &DataType, field: &str, with_host: bool) -> String {
    if with_host {
        format!("{} {} {}", data.hostname(), data_type.id(), field)
    } else {
        format!("{} {}", data_type.id(), field)
    }
}
