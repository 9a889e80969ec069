// File: crates/chart-report/tests/store.rs
// Purpose: Definition store lookups, built-ins, and registration callbacks.

use std::sync::mpsc;

use chart_report::{
    ChartDefinition, ChartKind, DefinitionStore, FieldSelector, ReportError, ReportEvent, DATASET_KEY, SUMMARY_KEY,
};

const MEMORY_ONLY: &str = "charts:\n  - name: Memory\n    data:\n      - type: MEM\n";

#[test]
fn builtins_are_registered() {
    let store = DefinitionStore::with_builtins();
    assert_eq!(store.keys(), vec![DATASET_KEY.to_string(), SUMMARY_KEY.to_string()]);

    let summary = store.get(SUMMARY_KEY).expect("summary set");
    assert!(!summary.is_empty());
    assert_eq!(summary[0].file_name(), "CPU Utilization.png");
    assert!(store.get(DATASET_KEY).is_some_and(|set| !set.is_empty()));
}

#[test]
fn unknown_key_is_absent() {
    let store = DefinitionStore::new();
    assert!(store.get("nope").is_none());
    assert!(!store.contains("nope"));
    assert!(store.keys().is_empty());
}

#[test]
fn register_replaces_set_and_notifies() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("memory.yaml");
    std::fs::write(&path, MEMORY_ONLY).expect("write definitions");

    let store = DefinitionStore::with_builtins();
    let (tx, rx) = mpsc::channel();
    let count = store.register(SUMMARY_KEY, &path, &tx).expect("valid definitions");

    assert_eq!(count, 1);
    let set = store.get(SUMMARY_KEY).expect("summary set");
    assert_eq!(set.len(), 1);
    assert_eq!(set[0].short_name(), "Memory");
    assert_eq!(
        rx.try_iter().collect::<Vec<_>>(),
        vec![ReportEvent::DefinitionRegistered { key: SUMMARY_KEY.into(), source: path }]
    );
}

#[test]
fn failed_registration_keeps_previous_set() {
    let dir = tempfile::tempdir().expect("tempdir");
    let bad = dir.path().join("bad.yaml");
    std::fs::write(&bad, "charts: [name: {").expect("write definitions");
    let missing = dir.path().join("missing.yaml");

    let store = DefinitionStore::new();
    store.insert("custom", vec![ChartDefinition::new("Kept", ChartKind::Line, vec![FieldSelector::new("MEM", vec![])])]);
    let before = store.get("custom").expect("custom set");

    let (tx, rx) = mpsc::channel();
    let err = store.register("custom", &bad, &tx).expect_err("malformed yaml");
    assert!(matches!(err, ReportError::Parse(_)));
    let err = store.register("custom", &missing, &tx).expect_err("missing file");
    assert!(matches!(err, ReportError::Io { ref path, .. } if path == &missing));

    let after = store.get("custom").expect("custom set");
    assert_eq!(after[0].short_name(), "Kept");
    assert_eq!(before[0], after[0]);

    let events: Vec<_> = rx.try_iter().collect();
    assert_eq!(events.len(), 2);
    assert!(matches!(
        &events[0],
        ReportEvent::DefinitionRegistrationFailed { key, source, .. } if key == "custom" && source == &bad
    ));
    assert!(matches!(
        &events[1],
        ReportEvent::DefinitionRegistrationFailed { source, .. } if source == &missing
    ));
}

#[test]
fn held_sets_survive_replacement() {
    let store = DefinitionStore::new();
    store.insert("k", vec![ChartDefinition::new("Old", ChartKind::Line, vec![])]);
    let held = store.get("k").expect("set");
    store.insert("k", vec![ChartDefinition::new("New", ChartKind::Bar, vec![])]);

    assert_eq!(held[0].short_name(), "Old");
    assert_eq!(store.get("k").expect("set")[0].short_name(), "New");
}
