// File: crates/chart-report/src/definition.rs
// Summary: Chart definitions, field selectors, and the YAML definition format.

use std::fmt::Display;
use std::path::Path;

use serde::Deserialize;

use crate::data::{DataSet, DataType};
use crate::error::{ReportError, Result};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    /// One line per matching field over time.
    #[default]
    Line,
    /// Like `Line`, filled down to zero.
    Area,
    /// One bar per matching field: its mean over the interval.
    Bar,
}

/// A name pattern where `*` matches any run of characters.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub struct Pattern(String);

impl Pattern {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self(pattern.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn matches(&self, candidate: &str) -> bool {
        let mut parts = self.0.split('*');
        let Some(first) = parts.next() else {
            return candidate.is_empty();
        };
        let Some(mut rest) = candidate.strip_prefix(first) else {
            return false;
        };

        let parts: Vec<&str> = parts.collect();
        let Some((last, middle)) = parts.split_last() else {
            // No `*` at all: exact match.
            return rest.is_empty();
        };

        for part in middle {
            match rest.find(part) {
                Some(index) => rest = &rest[index + part.len()..],
                None => return false,
            }
        }
        rest.ends_with(last)
    }
}

impl From<String> for Pattern {
    fn from(pattern: String) -> Self {
        Self(pattern)
    }
}

impl From<&str> for Pattern {
    fn from(pattern: &str) -> Self {
        Self(pattern.to_owned())
    }
}

impl Display for Pattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Selects fields of the data types whose id matches `data_type`.
/// No field patterns selects every field of a matching type.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldSelector {
    #[serde(rename = "type")]
    pub data_type: Pattern,
    #[serde(default)]
    pub fields: Vec<Pattern>,
}

impl FieldSelector {
    pub fn new(data_type: impl Into<Pattern>, fields: Vec<Pattern>) -> Self {
        Self { data_type: data_type.into(), fields }
    }

    pub fn selects(&self, data_type: &DataType, field: &str) -> bool {
        self.data_type.matches(data_type.id())
            && (self.fields.is_empty() || self.fields.iter().any(|p| p.matches(field)))
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChartDefinition {
    #[serde(rename = "name")]
    short_name: String,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    kind: ChartKind,
    #[serde(default = "default_x_label")]
    x_label: String,
    #[serde(default)]
    y_label: String,
    #[serde(default)]
    y_range: Option<[f64; 2]>,
    data: Vec<FieldSelector>,
}

fn default_x_label() -> String {
    String::from("Time")
}

impl ChartDefinition {
    pub fn new(short_name: impl Into<String>, kind: ChartKind, data: Vec<FieldSelector>) -> Self {
        Self {
            short_name: short_name.into(),
            title: None,
            kind,
            x_label: default_x_label(),
            y_label: String::new(),
            y_range: None,
            data,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_y_axis(mut self, label: impl Into<String>, range: Option<(f64, f64)>) -> Self {
        self.y_label = label.into();
        self.y_range = range.map(|(min, max)| [min, max]);
        self
    }

    pub fn short_name(&self) -> &str {
        &self.short_name
    }

    /// The explicit title, or the short name on one line.
    pub fn title(&self) -> String {
        self.title.clone().unwrap_or_else(|| self.sanitized_name())
    }

    pub fn kind(&self) -> ChartKind {
        self.kind
    }

    pub fn x_label(&self) -> &str {
        &self.x_label
    }

    pub fn y_label(&self) -> &str {
        &self.y_label
    }

    pub fn y_range(&self) -> Option<(f64, f64)> {
        self.y_range.map(|[min, max]| (min, max))
    }

    pub fn data(&self) -> &[FieldSelector] {
        &self.data
    }

    /// The short name with line breaks turned into spaces, usable as a file name.
    pub fn sanitized_name(&self) -> String {
        self.short_name.replace(['\n', '\r'], " ")
    }

    pub fn file_name(&self) -> String {
        format!("{}.png", self.sanitized_name())
    }

    /// Whether `data` has at least one field this chart would plot.
    pub fn applies_to(&self, data: &DataSet) -> bool {
        self.matching_fields(data).next().is_some()
    }

    /// `(data type, field)` pairs of `data` selected by this chart, in selector
    /// order and then dataset order, without repeats.
    pub fn matching_fields<'a>(&'a self, data: &'a DataSet) -> impl Iterator<Item = (&'a DataType, &'a str)> + 'a {
        let mut seen: Vec<(&str, &str)> = Vec::new();
        self.data
            .iter()
            .flat_map(move |selector| {
                data.types().flat_map(move |data_type| {
                    data_type
                        .fields()
                        .filter(move |field| selector.selects(data_type, field))
                        .map(move |field| (data_type, field))
                })
            })
            .filter(move |&(data_type, field)| {
                let key = (data_type.id(), field);
                if seen.contains(&key) {
                    false
                } else {
                    seen.push(key);
                    true
                }
            })
    }

    fn validate(&self) -> Result<()> {
        let invalid = |reason: &str| ReportError::InvalidDefinition {
            name: self.sanitized_name(),
            reason: reason.to_owned(),
        };

        if self.short_name.trim().is_empty() {
            return Err(invalid("name must not be empty"));
        }
        if let Some([min, max]) = self.y_range {
            if !(min < max) {
                return Err(invalid("y_range minimum must be below its maximum"));
            }
        }
        Ok(())
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct DefinitionFile {
    charts: Vec<ChartDefinition>,
}

/// Parse a YAML document with a top-level `charts:` list.
pub fn parse_definitions(text: &str) -> Result<Vec<ChartDefinition>> {
    let file: DefinitionFile = serde_yaml::from_str(text)?;
    for definition in &file.charts {
        definition.validate()?;
    }
    Ok(file.charts)
}

pub fn load_definitions(path: &Path) -> Result<Vec<ChartDefinition>> {
    let text = std::fs::read_to_string(path).map_err(|source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_definitions(&text)
}
