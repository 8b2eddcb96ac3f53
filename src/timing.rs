//! Frame pacing and frame-rate counters used by the demo loops.

use std::time::{Duration, Instant};

use log::debug;

use crate::utils::logging::frame_over_budget;

/// Sleeps the loop until the next tick of a fixed schedule.
#[derive(Debug, Clone)]
pub struct FrameLimiter {
    interval: Duration,
    deadline: Instant,
}

impl FrameLimiter {
    pub fn new(target_fps: u32) -> Self {
        Self::starting_at(target_fps, Instant::now())
    }

    pub fn starting_at(target_fps: u32, now: Instant) -> Self {
        let interval = Duration::from_secs_f64(1.0 / target_fps.max(1) as f64);
        Self {
            interval,
            deadline: now + interval,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn deadline(&self) -> Instant {
        self.deadline
    }

    /// How long to sleep at `now`, scheduling the following tick.
    ///
    /// A loop more than one interval late is re-anchored at `now` rather than
    /// allowed to run a burst of back-to-back frames.
    pub fn sleep_for(&mut self, now: Instant) -> Duration {
        let sleep = self.deadline.saturating_duration_since(now);
        let late = now.saturating_duration_since(self.deadline);
        if late > self.interval {
            frame_over_budget(late + self.interval, self.interval);
            self.deadline = now + self.interval;
        } else {
            self.deadline += self.interval;
        }
        sleep
    }

    /// Blocks the thread until the scheduled tick.
    pub fn wait(&mut self) {
        let sleep = self.sleep_for(Instant::now());
        if !sleep.is_zero() {
            std::thread::sleep(sleep);
        }
    }
}

/// Counts frames per wall-clock second.
#[derive(Debug, Clone)]
pub struct FpsCounter {
    window_start: Instant,
    frames: u32,
    last: u32,
}

impl FpsCounter {
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    pub fn starting_at(now: Instant) -> Self {
        Self {
            window_start: now,
            frames: 0,
            last: 0,
        }
    }

    /// Records a frame at `now` and returns the count of the last full second.
    pub fn tick(&mut self, now: Instant) -> u32 {
        self.frames += 1;
        if now.saturating_duration_since(self.window_start) >= Duration::from_secs(1) {
            self.last = self.frames;
            self.frames = 0;
            self.window_start = now;
            debug!("fps: {}", self.last);
        }
        self.last
    }

    pub fn fps(&self) -> u32 {
        self.last
    }
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self::new()
    }
}

/// Average frame rate since the counter started.
#[derive(Debug, Clone)]
pub struct AverageFps {
    start: Instant,
    frames: u64,
}

impl AverageFps {
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    pub fn starting_at(now: Instant) -> Self {
        Self {
            start: now,
            frames: 0,
        }
    }

    pub fn tick(&mut self, now: Instant) -> u32 {
        self.frames += 1;
        self.fps_at(now)
    }

    pub fn fps_at(&self, now: Instant) -> u32 {
        let elapsed_ms = now.saturating_duration_since(self.start).as_millis();
        if elapsed_ms == 0 {
            return 0;
        }
        (self.frames as u128 * 1000 / elapsed_ms) as u32
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Default for AverageFps {
    fn default() -> Self {
        Self::new()
    }
}
