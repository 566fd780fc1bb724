//! Injectable clock and cancelable timers
//!
//! Timers here never spawn anything. They only remember a deadline and are
//! polled from the runtime tick, which makes them deterministic under a
//! manual clock in tests.

use std::time::{Duration, Instant};

/// Source of "now" for timers
pub trait Clock {
    fn now(&self) -> Instant;
}

/// Wall clock used by the running application
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    /// Fires every period until cancelled
    Repeating,
    /// Fires once, then disarms itself
    Once,
}

/// A single timer slot. Starting it again replaces the pending deadline,
/// so at most one instance is ever live.
#[derive(Debug, Clone)]
pub struct Timer {
    mode: Mode,
    period: Duration,
    /// Deadline of the live instance
    armed: Option<Instant>,
}

impl Timer {
    pub fn repeating(period: Duration) -> Self {
        Self::new(Mode::Repeating, period)
    }

    pub fn once(delay: Duration) -> Self {
        Self::new(Mode::Once, delay)
    }

    fn new(mode: Mode, period: Duration) -> Self {
        Self {
            mode,
            period,
            armed: None,
        }
    }

    /// Cancel any pending instance and schedule a fresh one from `now`
    pub fn start(&mut self, now: Instant) {
        self.armed = Some(now + self.period);
    }

    pub fn cancel(&mut self) {
        self.armed = None;
    }

    pub fn is_armed(&self) -> bool {
        self.armed.is_some()
    }

    /// Returns true when the deadline has passed.
    ///
    /// A repeating timer that fell behind by several periods fires once and
    /// re-bases on `now` instead of bursting.
    pub fn poll(&mut self, now: Instant) -> bool {
        let Some(deadline) = self.armed else {
            return false;
        };

        if now < deadline {
            return false;
        }

        match self.mode {
            Mode::Once => self.armed = None,
            Mode::Repeating => {
                let mut next = deadline + self.period;
                if next <= now {
                    next = now + self.period;
                }
                self.armed = Some(next);
            }
        }

        true
    }
}


#[cfg(test)]
mod tests {
    use super::testing::ManualClock;
    use super::*;

    #[test]
    fn test_once_fires_a_single_time() {
        let clock = ManualClock::new();
        let mut timer = Timer::once(Duration::from_millis(100));
        timer.start(clock.now());

        clock.advance(Duration::from_millis(99));
        assert!(!timer.poll(clock.now()));

        clock.advance(Duration::from_millis(1));
        assert!(timer.poll(clock.now()));
        assert!(!timer.is_armed());

        clock.advance(Duration::from_secs(1));
        assert!(!timer.poll(clock.now()));
    }

    #[test]
    fn test_repeating_keeps_its_cadence() {
        let clock = ManualClock::new();
        let mut timer = Timer::repeating(Duration::from_secs(5));
        timer.start(clock.now());

        clock.advance(Duration::from_secs(5));
        assert!(timer.poll(clock.now()));
        clock.advance(Duration::from_secs(4));
        assert!(!timer.poll(clock.now()));
        clock.advance(Duration::from_secs(1));
        assert!(timer.poll(clock.now()));
    }

    #[test]
    fn test_repeating_does_not_burst_after_a_stall() {
        let clock = ManualClock::new();
        let mut timer = Timer::repeating(Duration::from_secs(5));
        timer.start(clock.now());

        clock.advance(Duration::from_secs(23));
        assert!(timer.poll(clock.now()));
        assert!(!timer.poll(clock.now()));
    }

    #[test]
    fn test_restart_replaces_pending_instance() {
        let clock = ManualClock::new();
        let mut timer = Timer::repeating(Duration::from_secs(5));
        timer.start(clock.now());

        clock.advance(Duration::from_secs(3));
        timer.start(clock.now());

        // Only the second deadline is live
        clock.advance(Duration::from_secs(3));
        assert!(!timer.poll(clock.now()));
        clock.advance(Duration::from_secs(2));
        assert!(timer.poll(clock.now()));
    }

    #[test]
    fn test_cancel_disarms() {
        let clock = ManualClock::new();
        let mut timer = Timer::repeating(Duration::from_secs(5));
        timer.start(clock.now());
        timer.cancel();

        clock.advance(Duration::from_secs(10));
        assert!(!timer.poll(clock.now()));
        assert!(!timer.is_armed());
    }
}
