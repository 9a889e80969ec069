// File: crates/chart-report/src/pipeline.rs
// Summary: Report orchestration: definition lookup, applicability, chart building, and PNG output.

use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

use crate::builder::ChartBuilder;
use crate::data::{DataSet, DataSets};
use crate::definition::ChartDefinition;
use crate::listener::ReportListener;
use crate::render::{ChartWriter, PngWriter, RenderSettings};
use crate::store::DefinitionStore;

/// Which datasets one batch of charts is built from.
#[derive(Clone, Debug)]
pub enum DatasetGroup {
    All(Arc<[Arc<DataSet>]>),
    Single(Arc<DataSet>),
}

impl DatasetGroup {
    pub fn datasets(&self) -> &[Arc<DataSet>] {
        match self {
            DatasetGroup::All(sets) => sets,
            DatasetGroup::Single(data) => std::slice::from_ref(data),
        }
    }
}

/// Tally of one run. Failed charts were logged and skipped.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub charts_created: usize,
    pub charts_failed: usize,
}

impl std::ops::AddAssign for RunSummary {
    fn add_assign(&mut self, other: Self) {
        self.charts_created += other.charts_created;
        self.charts_failed += other.charts_failed;
    }
}

/// Turns a registered definition set plus the loaded datasets into PNG files.
///
/// A run never fails as a whole: unknown keys are logged and ignored, and a
/// chart that cannot be written is logged and skipped while the rest of the
/// batch carries on.
pub struct ReportPipeline {
    store: Arc<DefinitionStore>,
    datasets: Arc<DataSets>,
    builder: ChartBuilder,
    writer: Box<dyn ChartWriter>,
    settings: Arc<RwLock<RenderSettings>>,
}

impl ReportPipeline {
    pub fn new(store: Arc<DefinitionStore>, datasets: Arc<DataSets>) -> Self {
        Self {
            store,
            datasets,
            builder: ChartBuilder::new(),
            writer: Box::new(PngWriter::default()),
            settings: Arc::new(RwLock::new(RenderSettings::default())),
        }
    }

    pub fn with_writer(mut self, writer: impl ChartWriter + 'static) -> Self {
        self.writer = Box::new(writer);
        self
    }

    pub fn store(&self) -> &Arc<DefinitionStore> {
        &self.store
    }

    pub fn datasets(&self) -> &Arc<DataSets> {
        &self.datasets
    }

    /// The settings the next run will use.
    pub fn render_settings(&self) -> RenderSettings {
        self.settings.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub(crate) fn settings_handle(&self) -> Arc<RwLock<RenderSettings>> {
        Arc::clone(&self.settings)
    }

    /// Build every applicable chart of `key` from all loaded datasets together
    /// and write them to `output_dir`.
    pub fn run_across_all_datasets(
        &self,
        key: &str,
        output_dir: impl AsRef<Path>,
        listener: &dyn ReportListener,
    ) -> RunSummary {
        let Some(definitions) = self.store.get(key) else {
            tracing::debug!(key, "no chart definitions registered");
            return RunSummary::default();
        };
        let output_dir = output_dir.as_ref();
        create_output_dir(output_dir);

        let settings = self.render_settings();
        let group = DatasetGroup::All(self.datasets.snapshot());
        let callback_dir = absolute(output_dir);
        tracing::debug!(key, datasets = group.datasets().len(), interval = %settings.interval, "creating charts");

        listener.before_run(key, group.datasets(), &callback_dir);
        let summary = self.save_charts(&definitions, &group, output_dir, &settings, listener);
        listener.after_run(key, group.datasets(), &callback_dir);
        summary
    }

    /// Build the applicable charts of `key` once for each loaded dataset, into
    /// `output_dir/<hostname>/`. The run callbacks get `output_dir` itself.
    pub fn run_per_dataset(&self, key: &str, output_dir: impl AsRef<Path>, listener: &dyn ReportListener) -> RunSummary {
        let Some(definitions) = self.store.get(key) else {
            tracing::debug!(key, "no chart definitions registered");
            return RunSummary::default();
        };
        let output_dir = output_dir.as_ref();
        create_output_dir(output_dir);

        let settings = self.render_settings();
        let callback_dir = absolute(output_dir);
        let mut summary = RunSummary::default();
        for data in self.datasets.snapshot().iter() {
            tracing::debug!(key, host = data.hostname(), "creating charts");

            let dataset_dir = output_dir.join(data.hostname());
            if let Err(error) = std::fs::create_dir(&dataset_dir) {
                if error.kind() != std::io::ErrorKind::AlreadyExists {
                    tracing::debug!(path = %dataset_dir.display(), %error, "cannot create dataset directory");
                }
            }

            let group = DatasetGroup::Single(Arc::clone(data));
            listener.before_run(key, group.datasets(), &callback_dir);
            summary += self.save_charts(&definitions, &group, &dataset_dir, &settings, listener);
            listener.after_run(key, group.datasets(), &callback_dir);
        }
        summary
    }

    fn save_charts(
        &self,
        definitions: &[ChartDefinition],
        group: &DatasetGroup,
        dir: &Path,
        settings: &RenderSettings,
        listener: &dyn ReportListener,
    ) -> RunSummary {
        let datasets = group.datasets();
        let mut summary = RunSummary::default();

        for definition in self.builder.applicable_definitions(definitions, datasets) {
            let chart = self.builder.build(definition, datasets, settings);
            let path = dir.join(definition.file_name());

            if let Err(error) = self.writer.write_png(&chart, &path) {
                tracing::warn!(chart = %definition.file_name(), %error, "cannot create chart");
                summary.charts_failed += 1;
                continue;
            }
            summary.charts_created += 1;
            listener.on_chart_created(definition, &absolute(&path));
        }
        summary
    }
}

fn create_output_dir(dir: &Path) {
    if let Err(error) = std::fs::create_dir_all(dir) {
        tracing::warn!(path = %dir.display(), %error, "cannot create output directory");
    }
}

fn absolute(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}
