// File: crates/chart-report/tests/interval.rs
// Purpose: Interval events and the reactor that feeds them into render settings.

mod common;

use std::sync::{Arc, Mutex};

use chart_report::{
    DataSets, DefinitionStore, Granularity, Interval, IntervalEvent, IntervalListener, IntervalManager,
    IntervalReactor, ReportPipeline,
};
use common::{cpu_host, MINUTE, T0};

#[derive(Default)]
struct Recorder(Mutex<Vec<IntervalEvent>>);

impl IntervalListener for Recorder {
    fn on_interval_event(&self, event: &IntervalEvent) {
        self.0.lock().expect("recorder lock").push(event.clone());
    }
}

impl Recorder {
    fn take(&self) -> Vec<IntervalEvent> {
        std::mem::take(&mut *self.0.lock().expect("recorder lock"))
    }
}

fn hour() -> Interval {
    Interval::new(T0, T0 + 60 * MINUTE).expect("valid").named("first hour")
}

fn one_day_pipeline() -> ReportPipeline {
    let datasets = Arc::new(DataSets::new());
    datasets.add(cpu_host("alpha", 24 * 60 + 1));
    ReportPipeline::new(Arc::new(DefinitionStore::new()), datasets)
}

#[test]
fn manager_publishes_changes_in_order() {
    let manager = IntervalManager::new();
    let recorder = Arc::new(Recorder::default());
    manager.subscribe(recorder.clone());

    assert!(manager.add(hour()));
    assert!(!manager.add(hour()), "duplicate add is ignored");
    assert!(manager.rename(&hour(), "warmup"));
    manager.set_current(hour());
    manager.set_current(hour());

    let events = recorder.take();
    assert_eq!(
        events,
        vec![IntervalEvent::Added(hour()), IntervalEvent::Renamed(hour()), IntervalEvent::CurrentChanged(hour())]
    );
    assert!(matches!(&events[1], IntervalEvent::Renamed(i) if i.name() == "warmup"));
    assert_eq!(manager.intervals().len(), 1);
}

#[test]
fn removing_the_current_interval_resets_to_all() {
    let manager = IntervalManager::new();
    let recorder = Arc::new(Recorder::default());
    manager.add(hour());
    manager.set_current(hour());
    manager.subscribe(recorder.clone());

    assert!(manager.remove(&hour()));
    assert!(!manager.remove(&hour()));
    assert_eq!(
        recorder.take(),
        vec![IntervalEvent::Removed(hour()), IntervalEvent::CurrentChanged(Interval::all())]
    );
    assert!(manager.current().is_all());
}

#[test]
fn clear_resets_current() {
    let manager = IntervalManager::new();
    let recorder = Arc::new(Recorder::default());
    manager.subscribe(recorder.clone());
    manager.add(hour());
    manager.set_current(hour());
    recorder.take();

    manager.clear();
    assert_eq!(recorder.take(), vec![IntervalEvent::Cleared, IntervalEvent::CurrentChanged(Interval::all())]);
    assert!(manager.intervals().is_empty());
}

#[test]
fn reactor_updates_render_settings() {
    let pipeline = one_day_pipeline();
    let reactor = Arc::new(IntervalReactor::new(&pipeline));
    // One day over 240 buckets.
    assert_eq!(pipeline.render_settings().granularity.as_millis(), 360_000);

    let manager = IntervalManager::new();
    manager.subscribe(reactor.clone());
    manager.add(hour());
    assert!(pipeline.render_settings().interval.is_all(), "only the current interval matters");

    manager.set_current(hour());
    let settings = pipeline.render_settings();
    assert_eq!(settings.interval, hour());
    assert_eq!(settings.granularity.as_millis(), 15_000);
}

#[test]
fn fixed_granularity_ignores_interval_changes() {
    let pipeline = one_day_pipeline();
    let reactor = Arc::new(IntervalReactor::new(&pipeline));
    reactor.set_fixed_granularity(Granularity::from_secs(5));

    let manager = IntervalManager::new();
    manager.subscribe(reactor.clone());
    manager.set_current(hour());

    let settings = pipeline.render_settings();
    assert_eq!(settings.interval, hour());
    assert_eq!(settings.granularity, Granularity::from_secs(5));

    reactor.set_automatic(true);
    assert_eq!(pipeline.render_settings().granularity.as_millis(), 15_000);
}

#[test]
fn unsubscribed_reactor_no_longer_reacts() {
    let pipeline = one_day_pipeline();
    let reactor = Arc::new(IntervalReactor::new(&pipeline));
    let manager = IntervalManager::new();
    let id = manager.subscribe(reactor.clone());

    assert!(manager.unsubscribe(id));
    assert!(!manager.unsubscribe(id));
    manager.set_current(hour());

    assert!(pipeline.render_settings().interval.is_all());
    assert_eq!(reactor.granularity().as_millis(), 360_000);
}

#[test]
fn other_interval_events_leave_settings_alone() {
    let pipeline = one_day_pipeline();
    let reactor = IntervalReactor::new(&pipeline);
    let before = pipeline.render_settings();

    for event in [
        IntervalEvent::Added(hour()),
        IntervalEvent::Renamed(hour()),
        IntervalEvent::Removed(hour()),
        IntervalEvent::Cleared,
    ] {
        reactor.on_interval_event(&event);
        assert_eq!(pipeline.render_settings(), before, "{event:?} changed render settings");
    }

    reactor.on_interval_event(&IntervalEvent::CurrentChanged(hour()));
    assert_ne!(pipeline.render_settings().granularity, before.granularity);
}
