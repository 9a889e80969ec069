// File: crates/report-cli/src/cli.rs
// Summary: Command line arguments.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::{Parser, ValueEnum};

#[derive(Parser, Debug)]
#[command(author, version, about = "Render PNG chart reports from time-series CSV files", long_about = None)]
pub(crate) struct Cli {
    /// CSV file with a `time` column followed by `TYPE:field` columns.
    /// Repeat to load several hosts.
    #[arg(short, long = "data", value_name = "CSV", required = true)]
    pub(crate) data: Vec<PathBuf>,

    /// Hostname for the dataset. Defaults to the file stem; only valid with a single file.
    #[arg(long)]
    pub(crate) host: Option<String>,

    /// Directory the report is written to.
    #[arg(short, long, default_value = "report")]
    pub(crate) output: PathBuf,

    /// Register extra chart definitions from a YAML file, as KEY=PATH.
    /// A built-in key is replaced.
    #[arg(long = "definitions", value_name = "KEY=PATH", value_parser = parse_key_path)]
    pub(crate) definitions: Vec<(String, PathBuf)>,

    /// Definitions used for the summary across all datasets.
    #[arg(long, default_value = chart_report::SUMMARY_KEY)]
    pub(crate) summary_key: String,

    /// Definitions used for each dataset on its own.
    #[arg(long, default_value = chart_report::DATASET_KEY)]
    pub(crate) dataset_key: String,

    #[arg(short, long, value_enum, default_value_t = Mode::Both)]
    pub(crate) mode: Mode,

    /// Start of the reported interval (RFC 3339). Defaults to the start of the data.
    #[arg(long)]
    pub(crate) from: Option<DateTime<Utc>>,

    /// End of the reported interval (RFC 3339). Defaults to the end of the data.
    #[arg(long)]
    pub(crate) to: Option<DateTime<Utc>>,

    /// Fixed aggregation bucket in seconds. Chosen from the interval when omitted.
    #[arg(short, long, value_name = "SECONDS")]
    pub(crate) granularity: Option<u64>,

    /// Chart theme: light, dark, or solarized-light.
    #[arg(long, default_value = "light")]
    pub(crate) theme: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum Mode {
    /// Charts across all datasets, in `<output>/summary`.
    Summary,
    /// Charts per dataset, in `<output>/datasets/<host>`.
    Dataset,
    Both,
}

impl Mode {
    pub(crate) fn summary(self) -> bool {
        matches!(self, Mode::Summary | Mode::Both)
    }

    pub(crate) fn per_dataset(self) -> bool {
        matches!(self, Mode::Dataset | Mode::Both)
    }
}

fn parse_key_path(value: &str) -> Result<(String, PathBuf), String> {
    match value.split_once('=') {
        Some((key, path)) if !key.trim().is_empty() && !path.is_empty() => {
            Ok((key.trim().to_owned(), PathBuf::from(path)))
        }
        _ => Err(format!("expected KEY=PATH, got '{value}'")),
    }
}
