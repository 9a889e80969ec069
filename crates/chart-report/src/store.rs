// File: crates/chart-report/src/store.rs
// Summary: Keyed cache of chart definition sets with built-in summary and per-dataset sets.

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};

use crate::definition::{load_definitions, parse_definitions, ChartDefinition};
use crate::error::Result;
use crate::listener::ReportListener;

/// Key of the built-in charts summarising all datasets together.
pub const SUMMARY_KEY: &str = "summary";
/// Key of the built-in charts rendered once per dataset.
pub const DATASET_KEY: &str = "dataset";

const BUILTIN_SUMMARY: &str = include_str!("../definitions/summary.yaml");
const BUILTIN_DATASET: &str = include_str!("../definitions/dataset.yaml");

/// An immutable, ordered set of definitions. Holding one keeps it alive even
/// if its key is registered again.
pub type DefinitionSet = Arc<[ChartDefinition]>;

#[derive(Debug, Default)]
pub struct DefinitionStore {
    sets: RwLock<HashMap<String, DefinitionSet>>,
}

impl DefinitionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store holding the built-in `summary` and `dataset` sets. A built-in
    /// that fails to parse is logged and left out.
    pub fn with_builtins() -> Self {
        let store = Self::new();
        for (key, text) in [(SUMMARY_KEY, BUILTIN_SUMMARY), (DATASET_KEY, BUILTIN_DATASET)] {
            match parse_definitions(text) {
                Ok(definitions) => store.insert(key, definitions),
                Err(error) => tracing::error!(key, %error, "cannot parse built-in chart definitions"),
            }
        }
        store
    }

    /// Replace the set under `key`.
    pub fn insert(&self, key: impl Into<String>, definitions: Vec<ChartDefinition>) {
        let key = key.into();
        tracing::debug!(key = %key, count = definitions.len(), "storing chart definitions");
        self.sets
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key, definitions.into());
    }

    /// Load definitions from `path` and store them under `key`, reporting the
    /// outcome to `listener`. On failure the previous set under `key` stays.
    /// Returns the number of definitions loaded.
    pub fn register(&self, key: &str, path: impl AsRef<Path>, listener: &dyn ReportListener) -> Result<usize> {
        let path = path.as_ref();
        match load_definitions(path) {
            Ok(definitions) => {
                let count = definitions.len();
                self.insert(key, definitions);
                tracing::debug!(key, path = %path.display(), count, "loaded chart definitions");
                listener.on_definition_registered(key, path);
                Ok(count)
            }
            Err(error) => {
                tracing::error!(key, path = %path.display(), %error, "cannot load chart definitions");
                listener.on_definition_registration_failed(key, path, &error);
                Err(error)
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<DefinitionSet> {
        self.sets.read().unwrap_or_else(PoisonError::into_inner).get(key).cloned()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.sets.read().unwrap_or_else(PoisonError::into_inner).contains_key(key)
    }

    /// Registered keys, sorted.
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self
            .sets
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();
        keys.sort();
        keys
    }
}
