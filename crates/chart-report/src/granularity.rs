// File: crates/chart-report/src/granularity.rs
// Summary: Bucket size for time aggregation, derived from the active interval and loaded data.

use std::fmt;
use std::sync::Arc;

use crate::data::DataSets;
use crate::interval::Interval;

/// Width of a time aggregation bucket, in milliseconds. Never below one second.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Granularity(i64);

impl Granularity {
    pub const MIN: Granularity = Granularity(1_000);
    pub const DEFAULT: Granularity = Granularity(60_000);

    /// Values below [`Granularity::MIN`] are raised to it.
    pub fn from_millis(ms: i64) -> Self {
        Self(ms.max(Self::MIN.0))
    }

    pub fn from_secs(secs: u64) -> Self {
        Self::from_millis(i64::try_from(secs.saturating_mul(1_000)).unwrap_or(i64::MAX))
    }

    pub fn as_millis(self) -> i64 {
        self.0
    }
}

impl Default for Granularity {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let secs = self.0 / 1_000;
        if secs % 3_600 == 0 {
            write!(f, "{}h", secs / 3_600)
        } else if secs % 60 == 0 {
            write!(f, "{}m", secs / 60)
        } else {
            write!(f, "{}s", secs)
        }
    }
}

/// Number of buckets an automatic granularity aims to split the span into.
const TARGET_BUCKETS: i64 = 240;

/// Chooses the granularity for the current interval. In automatic mode the
/// value follows the span of loaded data inside the interval; in fixed mode it
/// only changes through [`GranularityAdvisor::set_granularity`].
#[derive(Debug)]
pub struct GranularityAdvisor {
    datasets: Arc<DataSets>,
    interval: Interval,
    automatic: bool,
    granularity: Granularity,
}

impl GranularityAdvisor {
    /// Starts in automatic mode over [`Interval::all`].
    pub fn new(datasets: Arc<DataSets>) -> Self {
        let mut advisor = Self {
            datasets,
            interval: Interval::all(),
            automatic: true,
            granularity: Granularity::DEFAULT,
        };
        advisor.recalculate();
        advisor
    }

    pub fn interval(&self) -> &Interval {
        &self.interval
    }

    /// Does not recalculate; call [`GranularityAdvisor::recalculate`] after.
    pub fn set_interval(&mut self, interval: Interval) {
        self.interval = interval;
    }

    pub fn is_automatic(&self) -> bool {
        self.automatic
    }

    pub fn set_automatic(&mut self, automatic: bool) {
        self.automatic = automatic;
        if automatic {
            self.recalculate();
        }
    }

    /// Switch to fixed mode with `granularity`.
    pub fn set_granularity(&mut self, granularity: Granularity) {
        self.automatic = false;
        self.granularity = granularity;
    }

    pub fn granularity(&self) -> Granularity {
        self.granularity
    }

    pub fn recalculate(&mut self) -> Granularity {
        if self.automatic {
            self.granularity = self
                .datasets
                .time_range()
                .and_then(|(start, end)| self.interval.clip(start, end))
                .map(|(start, end)| end.saturating_sub(start))
                .filter(|span| *span > 0)
                .map(automatic_granularity)
                .unwrap_or(Granularity::DEFAULT);
        }
        self.granularity
    }
}

fn automatic_granularity(span_ms: i64) -> Granularity {
    let per_bucket = ceil_div(span_ms, TARGET_BUCKETS);
    Granularity::from_millis(ceil_div(per_bucket, 1_000).saturating_mul(1_000))
}

// Rounds up for non-negative `n` without overflowing near `i64::MAX`.
fn ceil_div(n: i64, d: i64) -> i64 {
    n / d + i64::from(n % d != 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::DataSet;

    fn datasets(start: i64, end: i64) -> Arc<DataSets> {
        let sets = Arc::new(DataSets::new());
        sets.add(DataSet::new("host", vec![start, end]));
        sets
    }

    #[test]
    fn defaults_without_data() {
        let advisor = GranularityAdvisor::new(Arc::new(DataSets::new()));
        assert!(advisor.is_automatic());
        assert_eq!(advisor.granularity(), Granularity::DEFAULT);
    }

    #[test]
    fn automatic_follows_the_interval_span() {
        // One day of data: 86_400_000 / 240 = 360 s.
        let mut advisor = GranularityAdvisor::new(datasets(0, 86_400_000));
        assert_eq!(advisor.granularity().as_millis(), 360_000);

        advisor.set_interval(Interval::new(0, 3_600_000).expect("valid"));
        // 3_600_000 / 240 = 15 s.
        assert_eq!(advisor.recalculate().as_millis(), 15_000);

        // Short spans never go below a second.
        advisor.set_interval(Interval::new(0, 10_000).expect("valid"));
        assert_eq!(advisor.recalculate(), Granularity::MIN);
    }

    #[test]
    fn rounds_up_to_whole_seconds() {
        assert_eq!(automatic_granularity(240_001).as_millis(), 2_000);
        assert_eq!(automatic_granularity(480_000).as_millis(), 2_000);
    }

    #[test]
    fn extreme_spans_do_not_overflow() {
        let expected = ceil_div(ceil_div(i64::MAX, TARGET_BUCKETS), 1_000) * 1_000;
        assert_eq!(automatic_granularity(i64::MAX).as_millis(), expected);

        let advisor = GranularityAdvisor::new(datasets(i64::MIN, i64::MAX));
        assert_eq!(advisor.granularity().as_millis(), expected);
    }

    #[test]
    fn interval_outside_data_falls_back_to_default() {
        let mut advisor = GranularityAdvisor::new(datasets(0, 1_000_000));
        advisor.set_interval(Interval::new(5_000_000, 6_000_000).expect("valid"));
        assert_eq!(advisor.recalculate(), Granularity::DEFAULT);
    }

    #[test]
    fn fixed_mode_ignores_recalculation() {
        let mut advisor = GranularityAdvisor::new(datasets(0, 86_400_000));
        advisor.set_granularity(Granularity::from_secs(5));
        advisor.set_interval(Interval::new(0, 3_600_000).expect("valid"));
        assert_eq!(advisor.recalculate().as_millis(), 5_000);

        advisor.set_automatic(true);
        assert_eq!(advisor.granularity().as_millis(), 15_000);
    }

    #[test]
    fn display_uses_the_largest_whole_unit() {
        assert_eq!(Granularity::from_secs(90).to_string(), "90s");
        assert_eq!(Granularity::from_secs(120).to_string(), "2m");
        assert_eq!(Granularity::from_secs(7_200).to_string(), "2h");
        assert_eq!(Granularity::from_millis(10).to_string(), "1s");
    }
}
