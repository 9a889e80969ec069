// File: crates/chart-report/src/reactor.rs
// Summary: Keeps the pipeline's render settings in step with the current interval.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};

use crate::granularity::{Granularity, GranularityAdvisor};
use crate::interval::{IntervalEvent, IntervalListener};
use crate::pipeline::ReportPipeline;
use crate::render::RenderSettings;

/// Subscribe this to an [`IntervalManager`](crate::IntervalManager). When the
/// current interval changes it sets the advisor's interval, recalculates the
/// granularity, and stores both in the pipeline's render settings.
pub struct IntervalReactor {
    settings: Arc<RwLock<RenderSettings>>,
    advisor: Mutex<GranularityAdvisor>,
}

impl IntervalReactor {
    /// Starts in automatic granularity mode over the pipeline's current interval.
    pub fn new(pipeline: &ReportPipeline) -> Self {
        let mut advisor = GranularityAdvisor::new(Arc::clone(pipeline.datasets()));
        advisor.set_interval(pipeline.render_settings().interval);
        advisor.recalculate();

        let reactor = Self { settings: pipeline.settings_handle(), advisor: Mutex::new(advisor) };
        reactor.publish(&reactor.advisor());
        reactor
    }

    /// Recalculate after datasets were added or removed.
    pub fn refresh(&self) -> Granularity {
        let mut advisor = self.advisor();
        advisor.recalculate();
        self.publish(&advisor);
        advisor.granularity()
    }

    pub fn set_fixed_granularity(&self, granularity: Granularity) {
        let mut advisor = self.advisor();
        advisor.set_granularity(granularity);
        self.publish(&advisor);
    }

    pub fn set_automatic(&self, automatic: bool) {
        let mut advisor = self.advisor();
        advisor.set_automatic(automatic);
        self.publish(&advisor);
    }

    pub fn granularity(&self) -> Granularity {
        self.advisor().granularity()
    }

    fn advisor(&self) -> MutexGuard<'_, GranularityAdvisor> {
        self.advisor.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn publish(&self, advisor: &GranularityAdvisor) {
        let mut settings = self.settings.write().unwrap_or_else(PoisonError::into_inner);
        settings.interval = advisor.interval().clone();
        settings.granularity = advisor.granularity();
        tracing::debug!(interval = %settings.interval, granularity = %settings.granularity, "render settings updated");
    }
}

impl IntervalListener for IntervalReactor {
    fn on_interval_event(&self, event: &IntervalEvent) {
        match event {
            IntervalEvent::CurrentChanged(interval) => {
                let mut advisor = self.advisor();
                advisor.set_interval(interval.clone());
                advisor.recalculate();
                self.publish(&advisor);
            }
            IntervalEvent::Added(_)
            | IntervalEvent::Removed(_)
            | IntervalEvent::Renamed(_)
            | IntervalEvent::Cleared => {}
        }
    }
}
