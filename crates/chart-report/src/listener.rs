// File: crates/chart-report/src/listener.rs
// Summary: Progress callbacks for definition registration and report runs.

use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use std::sync::Arc;

use crate::data::DataSet;
use crate::definition::ChartDefinition;
use crate::error::ReportError;

/// Observer of registration and report progress. Every method defaults to a
/// no-op. For one run the calls arrive as `before_run`, zero or more
/// `on_chart_created`, then `after_run`.
pub trait ReportListener {
    fn on_definition_registered(&self, _key: &str, _source: &Path) {}

    fn on_definition_registration_failed(&self, _key: &str, _source: &Path, _error: &ReportError) {}

    fn before_run(&self, _key: &str, _datasets: &[Arc<DataSet>], _output: &Path) {}

    /// `output` is the absolute path of the written PNG.
    fn on_chart_created(&self, _definition: &ChartDefinition, _output: &Path) {}

    fn after_run(&self, _key: &str, _datasets: &[Arc<DataSet>], _output: &Path) {}
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopListener;

impl ReportListener for NoopListener {}

/// Owned form of the listener callbacks, for channel delivery.
#[derive(Debug, Clone, PartialEq)]
pub enum ReportEvent {
    DefinitionRegistered { key: String, source: PathBuf },
    DefinitionRegistrationFailed { key: String, source: PathBuf, error: String },
    RunStarted { key: String, hostnames: Vec<String>, output: PathBuf },
    ChartCreated { chart: String, output: PathBuf },
    RunFinished { key: String, hostnames: Vec<String>, output: PathBuf },
}

fn hostnames(datasets: &[Arc<DataSet>]) -> Vec<String> {
    datasets.iter().map(|d| d.hostname().to_owned()).collect()
}

// A dropped receiver means nobody is watching; the report carries on.
impl ReportListener for Sender<ReportEvent> {
    fn on_definition_registered(&self, key: &str, source: &Path) {
        let _ = self.send(ReportEvent::DefinitionRegistered {
            key: key.to_owned(),
            source: source.to_path_buf(),
        });
    }

    fn on_definition_registration_failed(&self, key: &str, source: &Path, error: &ReportError) {
        let _ = self.send(ReportEvent::DefinitionRegistrationFailed {
            key: key.to_owned(),
            source: source.to_path_buf(),
            error: error.to_string(),
        });
    }

    fn before_run(&self, key: &str, datasets: &[Arc<DataSet>], output: &Path) {
        let _ = self.send(ReportEvent::RunStarted {
            key: key.to_owned(),
            hostnames: hostnames(datasets),
            output: output.to_path_buf(),
        });
    }

    fn on_chart_created(&self, definition: &ChartDefinition, output: &Path) {
        let _ = self.send(ReportEvent::ChartCreated {
            chart: definition.short_name().to_owned(),
            output: output.to_path_buf(),
        });
    }

    fn after_run(&self, key: &str, datasets: &[Arc<DataSet>], output: &Path) {
        let _ = self.send(ReportEvent::RunFinished {
            key: key.to_owned(),
            hostnames: hostnames(datasets),
            output: output.to_path_buf(),
        });
    }
}
