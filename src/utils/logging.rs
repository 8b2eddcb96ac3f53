//! Trace-level section timing and frame budget warnings.

use log::{log_enabled, trace, warn, Level};
use std::time::{Duration, Instant};

/// Traces how long a labelled section took once it goes out of scope.
pub struct TraceSpan {
    label: &'static str,
    start: Instant,
}

impl TraceSpan {
    pub fn enter(label: &'static str) -> Self {
        Self {
            label,
            start: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

impl Drop for TraceSpan {
    fn drop(&mut self) {
        if log_enabled!(Level::Trace) {
            trace!("{}: {} µs", self.label, self.elapsed().as_micros());
        }
    }
}

/// Warns when a frame ran past its budget and reports whether it did.
pub fn frame_over_budget(frame: Duration, budget: Duration) -> bool {
    if frame <= budget {
        return false;
    }
    warn!(
        "frame took {:.2} ms, budget is {:.2} ms",
        frame.as_secs_f32() * 1000.0,
        budget.as_secs_f32() * 1000.0
    );
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn budget_check_reports_overruns() {
        let budget = Duration::from_secs_f32(1.0 / 30.0);
        assert!(frame_over_budget(Duration::from_millis(40), budget));
        assert!(!frame_over_budget(Duration::from_millis(10), budget));
    }

    #[test]
    fn span_measures_its_lifetime() {
        let span = TraceSpan::enter("test");
        std::thread::sleep(Duration::from_millis(1));
        assert!(span.elapsed() >= Duration::from_millis(1));
    }
}
