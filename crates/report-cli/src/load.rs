// File: crates/report-cli/src/load.rs
// Summary: Loads a dataset from CSV: a time column followed by TYPE:field value columns.

use std::path::Path;

use anyhow::{bail, Context, Result};
use chart_report::DataSet;
use chrono::DateTime;

const TIME_HEADERS: [&str; 4] = ["time", "timestamp", "date", "datetime"];

/// Read `path` into a [`DataSet`] named `hostname`, or the file stem when
/// `hostname` is `None`.
///
/// Rows are sorted by time. Rows whose time cannot be parsed are skipped;
/// empty or non-numeric values become NaN and are left out of charts.
pub(crate) fn load_dataset(path: &Path, hostname: Option<&str>) -> Result<DataSet> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;

    let headers = rdr.headers()?.clone();
    match headers.get(0) {
        Some(h) if TIME_HEADERS.iter().any(|t| h.eq_ignore_ascii_case(t)) => {}
        other => bail!("first column must be one of {:?}, found {:?}", TIME_HEADERS, other.unwrap_or("")),
    }

    // (type id, fields, CSV column index per field), in header order.
    let mut layout: Vec<(String, Vec<String>, Vec<usize>)> = Vec::new();
    for (index, header) in headers.iter().enumerate().skip(1) {
        let Some((data_type, field)) = header.split_once(':') else {
            tracing::warn!(file = %path.display(), column = header, "skipping column without a TYPE:field header");
            continue;
        };
        match layout.iter_mut().find(|(id, _, _)| id == data_type) {
            Some((_, fields, columns)) => {
                fields.push(field.to_owned());
                columns.push(index);
            }
            None => layout.push((data_type.to_owned(), vec![field.to_owned()], vec![index])),
        }
    }

    let mut rows: Vec<(i64, csv::StringRecord)> = Vec::new();
    let mut skipped = 0usize;
    for (line, record) in rdr.records().enumerate() {
        let record = record.with_context(|| format!("reading record {} of {}", line + 1, path.display()))?;
        match record.get(0).and_then(parse_time_millis) {
            Some(t) => rows.push((t, record)),
            None => skipped += 1,
        }
    }
    if skipped > 0 {
        tracing::warn!(file = %path.display(), skipped, "skipped rows without a valid time");
    }
    rows.sort_by_key(|(t, _)| *t);

    let hostname = match hostname {
        Some(name) => name.to_owned(),
        None => path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .with_context(|| format!("no file name in {}", path.display()))?,
    };

    let timestamps = rows.iter().map(|(t, _)| *t).collect();
    let mut data = DataSet::new(hostname, timestamps);
    for (data_type, fields, indices) in layout {
        let columns: Vec<Vec<f64>> = indices
            .iter()
            .map(|&ix| rows.iter().map(|(_, rec)| parse_value(rec.get(ix))).collect())
            .collect();
        data = data.with_type(data_type, fields, columns)?;
    }

    tracing::info!(
        file = %path.display(),
        host = data.hostname(),
        rows = data.timestamps().len(),
        types = data.types().count(),
        "loaded dataset"
    );
    Ok(data)
}

fn parse_value(value: Option<&str>) -> f64 {
    value.and_then(|v| v.parse::<f64>().ok()).unwrap_or(f64::NAN)
}

/// Epoch milliseconds (values above 10^12), epoch seconds, or RFC 3339.
fn parse_time_millis(s: &str) -> Option<i64> {
    if s.is_empty() {
        return None;
    }
    if let Ok(n) = s.parse::<i64>() {
        return Some(if n > 10_i64.pow(12) { n } else { n.saturating_mul(1_000) });
    }
    DateTime::parse_from_rfc3339(s).ok().map(|t| t.timestamp_millis())
}
