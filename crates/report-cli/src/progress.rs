// File: crates/report-cli/src/progress.rs
// Summary: Prints report progress to stdout.

use std::path::Path;
use std::sync::Arc;

use chart_report::{ChartDefinition, DataSet, ReportError, ReportListener};

pub(crate) struct ConsoleProgress;

impl ReportListener for ConsoleProgress {
    fn on_definition_registered(&self, key: &str, source: &Path) {
        println!("Registered '{}' charts from {}", key, source.display());
    }

    fn on_definition_registration_failed(&self, key: &str, source: &Path, error: &ReportError) {
        eprintln!("Cannot register '{}' charts from {}: {}", key, source.display(), error);
    }

    fn before_run(&self, key: &str, datasets: &[Arc<DataSet>], output: &Path) {
        let hosts: Vec<&str> = datasets.iter().map(|d| d.hostname()).collect();
        println!("Creating '{}' charts for [{}] in {}", key, hosts.join(", "), output.display());
    }

    fn on_chart_created(&self, _definition: &ChartDefinition, output: &Path) {
        println!("  Wrote {}", output.display());
    }
}
