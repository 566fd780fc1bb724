//! Time-based tween for animated programmatic scrolling

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct SmoothScroll {
    active: bool,
    from: f32,
    to: f32,
    started_at: Instant,
    duration: Duration,
    last: f32,
}

impl Default for SmoothScroll {
    fn default() -> Self {
        Self {
            active: false,
            from: 0.0,
            to: 0.0,
            started_at: Instant::now(),
            duration: Duration::from_millis(450),
            last: 0.0,
        }
    }
}

impl SmoothScroll {
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn start(&mut self, from: f32, to: f32, now: Instant, duration: Duration) {
        self.active = true;
        self.from = from;
        self.to = to;
        self.last = from;
        self.started_at = now;
        self.duration = duration;
    }

    /// Returns Some(next_offset) while animating, None when finished/inactive
    pub fn step(&mut self, now: Instant) -> Option<f32> {
        if !self.active {
            return None;
        }

        let elapsed = now.saturating_duration_since(self.started_at);
        if elapsed >= self.duration || self.duration.is_zero() {
            self.active = false;
            self.last = self.to;
            return Some(self.to);
        }

        let t = (elapsed.as_secs_f32() / self.duration.as_secs_f32()).clamp(0.0, 1.0);
        self.last = self.from + (self.to - self.from) * ease_in_out(t);
        Some(self.last)
    }

    /// Whether a reported offset is one we produced, as opposed to the user
    /// grabbing the scrollbar mid-animation
    pub fn is_own_offset(&self, offset: f32) -> bool {
        (offset - self.last).abs() <= 1.0
    }

    pub fn cancel(&mut self) {
        self.active = false;
    }
}

/// Cubic ease-in-out
fn ease_in_out(t: f32) -> f32 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}
