use std::time::{Duration, Instant};

/// Longest delta time handed to the frame loop. A window that was dragged or stalled
/// otherwise produces one huge step.
pub const MAX_DELTA_TIME: Duration = Duration::from_millis(100);

/// Best-effort fixed frame rate, paced by waiting on the event loop.
#[derive(Debug)]
pub struct FramePacer {
    interval: Duration,
    last_frame: Instant,
}

impl FramePacer {
    pub fn new(fps: u32, now: Instant) -> Self {
        Self {
            interval: Duration::from_secs(1) / fps.max(1),
            last_frame: now,
        }
    }

    pub fn deadline(&self) -> Instant {
        self.last_frame + self.interval
    }

    pub fn is_due(&self, now: Instant) -> bool {
        now >= self.deadline()
    }

    /// Start a frame at `now` and return seconds since the previous one.
    pub fn tick(&mut self, now: Instant) -> f32 {
        let elapsed = now.saturating_duration_since(self.last_frame);
        self.last_frame = now;
        elapsed.min(MAX_DELTA_TIME).as_secs_f32()
    }
}
