use std::time::{Duration, Instant};

/// Per-frame timing of the three world container phases.
#[derive(Debug, Default, Clone, Copy)]
pub struct FrameProfile {
    pub draw_time: Duration,
    pub step_time: Duration,
    pub present_time: Duration,

    pub entity_count: usize,
    pub frames: u64,
}

impl FrameProfile {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn total(&self) -> Duration {
        self.draw_time + self.step_time + self.present_time
    }

    /// Logs the accumulated averages at debug level.
    pub fn report(&self) {
        if self.frames == 0 {
            return;
        }
        let per_frame = |d: Duration| d.as_secs_f32() * 1000.0 / self.frames as f32;

        log::debug!(
            "frame profile over {} frames, {} entities: draw {:.2} ms, step {:.2} ms, present {:.2} ms",
            self.frames,
            self.entity_count,
            per_frame(self.draw_time),
            per_frame(self.step_time),
            per_frame(self.present_time),
        );
    }
}

/// Adds the lifetime of the guard to the referenced duration.
pub struct PhaseTimer<'a> {
    start: Instant,
    output: &'a mut Duration,
}

impl<'a> PhaseTimer<'a> {
    pub fn new(output: &'a mut Duration) -> Self {
        Self {
            start: Instant::now(),
            output,
        }
    }
}

impl<'a> Drop for PhaseTimer<'a> {
    fn drop(&mut self) {
        *self.output += self.start.elapsed();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scoped_timer_accumulates() {
        let mut profile = FrameProfile::default();
        {
            let _timer = PhaseTimer::new(&mut profile.step_time);
            std::thread::sleep(Duration::from_millis(2));
        }
        assert!(profile.step_time >= Duration::from_millis(2));
        assert_eq!(profile.total(), profile.step_time);

        profile.reset();
        assert_eq!(profile.total(), Duration::ZERO);
    }
}
