// File: crates/report-cli/src/main.rs
// Summary: Loads CSV datasets, applies the requested interval, and writes summary and per-dataset chart reports.

mod cli;
mod load;
mod progress;

use std::sync::Arc;

use anyhow::{bail, Context, Result};
use chart_report::{
    DataSets, DefinitionStore, Granularity, Interval, IntervalManager, IntervalReactor, PngWriter, ReportPipeline,
    RunSummary,
};
use clap::Parser;
use tracing_subscriber::{prelude::*, EnvFilter};

use crate::cli::Cli;
use crate::progress::ConsoleProgress;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing("info");

    let theme = chart_core::theme::find(&cli.theme).with_context(|| {
        let names: Vec<_> = chart_core::theme::presets().iter().map(|t| t.name).collect();
        format!("unknown theme '{}', expected one of {}", cli.theme, names.join(", "))
    })?;
    if cli.host.is_some() && cli.data.len() > 1 {
        bail!("--host can only be used with a single --data file");
    }

    let datasets = Arc::new(DataSets::new());
    for path in &cli.data {
        let data = load::load_dataset(path, cli.host.as_deref())
            .with_context(|| format!("failed to load CSV '{}'", path.display()))?;
        datasets.add(data);
    }

    let store = Arc::new(DefinitionStore::with_builtins());
    for (key, path) in &cli.definitions {
        store
            .register(key, path, &ConsoleProgress)
            .with_context(|| format!("failed to register '{}' from '{}'", key, path.display()))?;
    }

    let pipeline = ReportPipeline::new(store, Arc::clone(&datasets)).with_writer(PngWriter::with_theme(theme));
    let reactor = Arc::new(IntervalReactor::new(&pipeline));
    if let Some(secs) = cli.granularity {
        reactor.set_fixed_granularity(Granularity::from_secs(secs));
    }

    let intervals = IntervalManager::new();
    intervals.subscribe(reactor.clone());
    if let Some(interval) = requested_interval(&cli, &datasets)? {
        intervals.add(interval.clone());
        intervals.set_current(interval);
    }

    let settings = pipeline.render_settings();
    tracing::info!(interval = %settings.interval, granularity = %settings.granularity, "rendering report");

    let mut total = RunSummary::default();
    if cli.mode.summary() {
        total += pipeline.run_across_all_datasets(&cli.summary_key, cli.output.join("summary"), &ConsoleProgress);
    }
    if cli.mode.per_dataset() {
        total += pipeline.run_per_dataset(&cli.dataset_key, cli.output.join("datasets"), &ConsoleProgress);
    }

    println!("Created {} charts in {}", total.charts_created, cli.output.display());
    if total.charts_failed > 0 {
        tracing::warn!(failed = total.charts_failed, "some charts could not be written");
    }
    Ok(())
}

/// The interval given by `--from`/`--to`, with a missing bound taken from the data.
fn requested_interval(cli: &Cli, datasets: &DataSets) -> Result<Option<Interval>> {
    if cli.from.is_none() && cli.to.is_none() {
        return Ok(None);
    }
    let (data_start, data_end) = datasets.time_range().unwrap_or((i64::MIN, i64::MAX));
    let start = cli.from.map_or(data_start, |t| t.timestamp_millis());
    let end = cli.to.map_or(data_end, |t| t.timestamp_millis());
    let interval = Interval::new(start, end)?.named("command line");
    Ok(Some(interval))
}

fn init_tracing(default_filter: &str) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(false);
    tracing_subscriber::registry().with(env_filter).with(fmt_layer).init();
}
