// File: crates/chart-report/src/interval.rs
// Summary: Time intervals and an in-process publisher of interval change events.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use chrono::DateTime;

use crate::error::{ReportError, Result};

/// A closed time range in milliseconds since the Unix epoch, with an optional
/// display name. Two intervals are equal when their bounds are equal.
#[derive(Clone, Debug)]
pub struct Interval {
    start: i64,
    end: i64,
    name: String,
}

impl Interval {
    pub fn new(start: i64, end: i64) -> Result<Self> {
        if end < start {
            return Err(ReportError::InvalidInterval { start, end });
        }
        Ok(Self { start, end, name: String::new() })
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// The unbounded interval covering every timestamp.
    pub fn all() -> Self {
        Self { start: i64::MIN, end: i64::MAX, name: String::new() }
    }

    pub fn is_all(&self) -> bool {
        self.start == i64::MIN && self.end == i64::MAX
    }

    pub fn start(&self) -> i64 {
        self.start
    }

    pub fn end(&self) -> i64 {
        self.end
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn contains(&self, timestamp: i64) -> bool {
        (self.start..=self.end).contains(&timestamp)
    }

    /// The span of this interval clipped to `[start, end]`, if they overlap.
    pub fn clip(&self, start: i64, end: i64) -> Option<(i64, i64)> {
        let (s, e) = (self.start.max(start), self.end.min(end));
        (s <= e).then_some((s, e))
    }
}

impl Default for Interval {
    fn default() -> Self {
        Self::all()
    }
}

impl PartialEq for Interval {
    fn eq(&self, other: &Self) -> bool {
        self.start == other.start && self.end == other.end
    }
}

impl Eq for Interval {}

fn format_millis(ms: i64) -> String {
    DateTime::from_timestamp_millis(ms)
        .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| ms.to_string())
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_all() {
            return f.write_str("All Data");
        }
        if !self.name.is_empty() {
            write!(f, "{}: ", self.name)?;
        }
        write!(f, "{} - {} UTC", format_millis(self.start), format_millis(self.end))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum IntervalEvent {
    Added(Interval),
    Removed(Interval),
    Renamed(Interval),
    Cleared,
    CurrentChanged(Interval),
}

pub trait IntervalListener: Send + Sync {
    fn on_interval_event(&self, event: &IntervalEvent);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

#[derive(Debug, Default)]
struct IntervalState {
    intervals: Vec<Interval>,
    current: Interval,
}

/// Holds the known intervals and the current one, and tells subscribers
/// about every change before the changing call returns.
#[derive(Default)]
pub struct IntervalManager {
    state: RwLock<IntervalState>,
    listeners: RwLock<Vec<(SubscriptionId, Arc<dyn IntervalListener>)>>,
    next_id: AtomicU64,
}

impl IntervalManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, listener: Arc<dyn IntervalListener>) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.listeners
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id, listener));
        id
    }

    /// Returns false if `id` was not subscribed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut listeners = self.listeners.write().unwrap_or_else(PoisonError::into_inner);
        let before = listeners.len();
        listeners.retain(|(sid, _)| *sid != id);
        listeners.len() != before
    }

    pub fn intervals(&self) -> Vec<Interval> {
        self.state.read().unwrap_or_else(PoisonError::into_inner).intervals.clone()
    }

    pub fn current(&self) -> Interval {
        self.state.read().unwrap_or_else(PoisonError::into_inner).current.clone()
    }

    /// Returns false, publishing nothing, if the interval is already known.
    pub fn add(&self, interval: Interval) -> bool {
        {
            let mut state = self.write_state();
            if state.intervals.contains(&interval) {
                return false;
            }
            state.intervals.push(interval.clone());
        }
        self.publish(&IntervalEvent::Added(interval));
        true
    }

    /// Remove a known interval. If it was current, current falls back to
    /// [`Interval::all`] and `CurrentChanged` follows `Removed`.
    pub fn remove(&self, interval: &Interval) -> bool {
        let (removed, was_current) = {
            let mut state = self.write_state();
            let Some(index) = state.intervals.iter().position(|i| i == interval) else {
                return false;
            };
            let removed = state.intervals.remove(index);
            let was_current = state.current == removed;
            if was_current {
                state.current = Interval::all();
            }
            (removed, was_current)
        };

        self.publish(&IntervalEvent::Removed(removed));
        if was_current {
            self.publish(&IntervalEvent::CurrentChanged(Interval::all()));
        }
        true
    }

    pub fn rename(&self, interval: &Interval, name: impl Into<String>) -> bool {
        let renamed = {
            let mut state = self.write_state();
            let Some(index) = state.intervals.iter().position(|i| i == interval) else {
                return false;
            };
            let name = name.into();
            if state.current == *interval {
                state.current.name = name.clone();
            }
            state.intervals[index].name = name;
            state.intervals[index].clone()
        };
        self.publish(&IntervalEvent::Renamed(renamed));
        true
    }

    pub fn clear(&self) {
        let reset = {
            let mut state = self.write_state();
            state.intervals.clear();
            let reset = !state.current.is_all();
            state.current = Interval::all();
            reset
        };
        self.publish(&IntervalEvent::Cleared);
        if reset {
            self.publish(&IntervalEvent::CurrentChanged(Interval::all()));
        }
    }

    /// Make `interval` current. Setting the interval that is already current
    /// publishes nothing.
    pub fn set_current(&self, interval: Interval) {
        {
            let mut state = self.write_state();
            if state.current == interval {
                return;
            }
            state.current = interval.clone();
        }
        self.publish(&IntervalEvent::CurrentChanged(interval));
    }

    fn write_state(&self) -> std::sync::RwLockWriteGuard<'_, IntervalState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    // Listeners are called without holding any lock, so they may query or
    // even change the manager.
    fn publish(&self, event: &IntervalEvent) {
        let listeners: Vec<Arc<dyn IntervalListener>> = self
            .listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();
        tracing::trace!(?event, listeners = listeners.len(), "publishing interval event");
        for listener in listeners {
            listener.on_interval_event(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_reversed_bounds() {
        assert!(matches!(
            Interval::new(10, 5),
            Err(ReportError::InvalidInterval { start: 10, end: 5 })
        ));
        assert!(Interval::new(5, 5).is_ok());
    }

    #[test]
    fn equality_ignores_name() {
        let a = Interval::new(0, 1000).expect("valid").named("warmup");
        let b = Interval::new(0, 1000).expect("valid");
        assert_eq!(a, b);
        assert!(a.contains(0) && a.contains(1000) && !a.contains(1001));
    }

    #[test]
    fn displays_utc_bounds() {
        let i = Interval::new(0, 90_000).expect("valid").named("boot");
        assert_eq!(i.to_string(), "boot: 1970-01-01 00:00:00 - 1970-01-01 00:01:30 UTC");
        assert_eq!(Interval::all().to_string(), "All Data");
    }

    #[test]
    fn clips_to_data_range() {
        assert_eq!(Interval::all().clip(5, 50), Some((5, 50)));
        let i = Interval::new(10, 20).expect("valid");
        assert_eq!(i.clip(0, 15), Some((10, 15)));
        assert_eq!(i.clip(30, 40), None);
    }
}
