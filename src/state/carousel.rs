//! Auto-advancing carousel over the rendered gallery
//!
//! Two timers drive the carousel:
//! - the advance timer, repeating every few seconds, moves to the next item
//! - the settle timer, one-shot, re-reads the scroll position once scrolling
//!   has been quiet for a moment
//!
//! Any scroll event restarts both, so manual scrolling postpones the next
//! advance instead of disabling it.

use std::time::Duration;

use super::layout::{GalleryLayout, ScrollPosition};
use super::scheduler::{Clock, SystemClock, Timer};
use crate::config::Config;

/// Timing and alignment knobs
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CarouselSettings {
    pub interval: Duration,
    pub settle_delay: Duration,
    pub tolerance: f32,
}

impl CarouselSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            interval: config.advance_interval(),
            settle_delay: config.settle_delay(),
            tolerance: config.align_tolerance_px,
        }
    }
}

impl Default for CarouselSettings {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

#[derive(Debug)]
pub struct Carousel<C: Clock = SystemClock> {
    clock: C,
    settings: CarouselSettings,
    layout: GalleryLayout,
    current_index: usize,
    position: ScrollPosition,
    advance: Timer,
    settle: Timer,
}

impl<C: Clock> Carousel<C> {
    /// Create a stopped carousel; nothing happens until `reset`
    pub fn new(clock: C, settings: CarouselSettings, layout: GalleryLayout) -> Self {
        Self {
            clock,
            settings,
            layout,
            current_index: 0,
            position: ScrollPosition::default(),
            advance: Timer::repeating(settings.interval),
            settle: Timer::once(settings.settle_delay),
        }
    }

    #[cfg(test)]
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// True while the advance timer is live
    #[cfg(test)]
    pub fn is_running(&self) -> bool {
        self.advance.is_armed()
    }

    /// Last known scroll position
    pub fn position(&self) -> ScrollPosition {
        self.position
    }

    /// The gallery was rebuilt: old positions are meaningless
    pub fn reset(&mut self) {
        self.current_index = 0;
        self.position.offset = 0.0;
        self.settle.cancel();
        self.advance.start(self.clock.now());
    }

    /// Lightbox opened: stop advancing entirely
    pub fn stop(&mut self) {
        self.advance.cancel();
        self.settle.cancel();
    }

    /// Lightbox closed: start a fresh countdown from where the gallery rests
    ///
    /// Scrolling may have finished while stopped without the settle timer
    /// ever firing, so the cursor is re-read from the last known position.
    pub fn resume(&mut self, len: usize) {
        self.settle_position(len);
        self.advance.start(self.clock.now());
    }

    /// Record a scroll event, manual or programmatic
    pub fn on_scroll(&mut self, position: ScrollPosition) {
        self.position = position;

        let now = self.clock.now();
        self.settle.start(now);

        // A stopped carousel stays stopped
        if self.advance.is_armed() {
            self.advance.start(now);
        }
    }

    /// Track viewport size changes that are not scrolls
    pub fn set_viewport(&mut self, viewport_height: f32, content_height: f32) {
        self.position.viewport_height = viewport_height;
        self.position.content_height = content_height;
    }

    /// Poll both timers
    ///
    /// Returns the index to scroll into view when the carousel advances.
    pub fn poll(&mut self, len: usize, lightbox_open: bool) -> Option<usize> {
        let now = self.clock.now();

        if self.settle.poll(now) {
            self.settle_position(len);
        }

        if !self.advance.poll(now) {
            return None;
        }

        if lightbox_open || len < 2 {
            return None;
        }

        // Settled at the last item, so this wraps to the first
        self.current_index = (self.current_index.min(len - 1) + 1) % len;
        tracing::debug!("🎠 Advancing carousel to item {}", self.current_index);
        Some(self.current_index)
    }

    /// Reconcile the cursor with wherever scrolling came to rest
    fn settle_position(&mut self, len: usize) {
        if let Some(index) = self.layout.aligned_index(&self.position, len, self.settings.tolerance) {
            self.current_index = index;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::scheduler::testing::ManualClock;

    const SECOND: Duration = Duration::from_secs(1);
    const SETTLE: Duration = Duration::from_millis(100);

    fn layout() -> GalleryLayout {
        GalleryLayout {
            item_height: 500.0,
            item_spacing: 20.0,
        }
    }

    fn carousel() -> (ManualClock, Carousel<ManualClock>) {
        let clock = ManualClock::new();
        let carousel = Carousel::new(clock.clone(), CarouselSettings::default(), layout());
        (clock, carousel)
    }

    fn scrolled_to(offset: f32, len: usize) -> ScrollPosition {
        ScrollPosition {
            offset,
            viewport_height: 800.0,
            content_height: layout().content_height(len),
        }
    }

    #[test]
    fn test_stopped_until_reset() {
        let (clock, mut carousel) = carousel();
        clock.advance(10 * SECOND);
        assert_eq!(carousel.poll(5, false), None);
        assert!(!carousel.is_running());
    }

    #[test]
    fn test_advances_every_interval_and_loops() {
        let (clock, mut carousel) = carousel();
        carousel.reset();

        let mut visited = Vec::new();
        for _ in 0..4 {
            clock.advance(5 * SECOND);
            visited.push(carousel.poll(3, false));
        }

        assert_eq!(visited, vec![Some(1), Some(2), Some(0), Some(1)]);
    }

    #[test]
    fn test_single_item_never_scrolls() {
        let (clock, mut carousel) = carousel();
        carousel.reset();

        for _ in 0..3 {
            clock.advance(5 * SECOND);
            assert_eq!(carousel.poll(1, false), None);
        }
        assert_eq!(carousel.current_index(), 0);
    }

    #[test]
    fn test_empty_list_is_noop() {
        let (clock, mut carousel) = carousel();
        carousel.reset();
        clock.advance(5 * SECOND);
        assert_eq!(carousel.poll(0, false), None);
    }

    #[test]
    fn test_tick_while_lightbox_open_does_nothing() {
        let (clock, mut carousel) = carousel();
        carousel.reset();
        clock.advance(5 * SECOND);
        assert_eq!(carousel.poll(4, true), None);
        assert_eq!(carousel.current_index(), 0);
    }

    #[test]
    fn test_stop_and_resume() {
        let (clock, mut carousel) = carousel();
        carousel.reset();

        carousel.stop();
        assert!(!carousel.is_running());
        clock.advance(20 * SECOND);
        assert_eq!(carousel.poll(4, false), None);

        carousel.resume(4);
        assert!(carousel.is_running());
        clock.advance(4 * SECOND);
        assert_eq!(carousel.poll(4, false), None);
        clock.advance(SECOND);
        assert_eq!(carousel.poll(4, false), Some(1));
    }

    #[test]
    fn test_resume_picks_up_scroll_finished_while_stopped() {
        let (clock, mut carousel) = carousel();
        carousel.reset();
        clock.advance(5 * SECOND);
        assert_eq!(carousel.poll(4, false), Some(1));

        // The smooth scroll to item 1 lands after the lightbox opened
        carousel.on_scroll(scrolled_to(260.0, 4));
        carousel.stop();
        carousel.on_scroll(scrolled_to(520.0, 4));
        clock.advance(20 * SECOND);
        assert_eq!(carousel.poll(4, true), None);

        carousel.resume(4);
        assert_eq!(carousel.current_index(), 1);
        clock.advance(5 * SECOND);
        assert_eq!(carousel.poll(4, false), Some(2));
    }

    #[test]
    fn test_resume_after_mid_scroll_stop_does_not_skip() {
        let (clock, mut carousel) = carousel();
        carousel.reset();
        clock.advance(5 * SECOND);
        assert_eq!(carousel.poll(4, false), Some(1));

        // Stopped halfway; the gallery is left between items 0 and 1
        carousel.on_scroll(scrolled_to(260.0, 4));
        carousel.stop();

        carousel.resume(4);
        clock.advance(5 * SECOND);
        assert_eq!(carousel.poll(4, false), Some(2));
    }

    #[test]
    fn test_scroll_restarts_countdown() {
        let (clock, mut carousel) = carousel();
        carousel.reset();

        clock.advance(3 * SECOND);
        carousel.on_scroll(scrolled_to(0.0, 4));

        // The original deadline passes without an advance
        clock.advance(2 * SECOND + Duration::from_millis(500));
        assert_eq!(carousel.poll(4, false), None);

        clock.advance(2 * SECOND + Duration::from_millis(500));
        assert_eq!(carousel.poll(4, false), Some(1));
    }

    #[test]
    fn test_scroll_does_not_start_a_stopped_carousel() {
        let (clock, mut carousel) = carousel();
        carousel.on_scroll(scrolled_to(520.0, 4));
        clock.advance(10 * SECOND);
        assert_eq!(carousel.poll(4, false), None);
        assert!(!carousel.is_running());
    }

    #[test]
    fn test_settle_tracks_manual_position() {
        let (clock, mut carousel) = carousel();
        carousel.reset();

        carousel.on_scroll(scrolled_to(1045.0, 10));
        clock.advance(SETTLE);
        assert_eq!(carousel.poll(10, false), None);
        assert_eq!(carousel.current_index(), 2);

        clock.advance(5 * SECOND);
        assert_eq!(carousel.poll(10, false), Some(3));
    }

    #[test]
    fn test_settle_waits_for_quiet() {
        let (clock, mut carousel) = carousel();
        carousel.reset();

        carousel.on_scroll(scrolled_to(520.0, 10));
        clock.advance(Duration::from_millis(60));
        carousel.on_scroll(scrolled_to(1040.0, 10));
        clock.advance(Duration::from_millis(60));
        carousel.poll(10, false);
        assert_eq!(carousel.current_index(), 0);

        clock.advance(Duration::from_millis(40));
        carousel.poll(10, false);
        assert_eq!(carousel.current_index(), 2);
    }

    #[test]
    fn test_unaligned_settle_keeps_cursor() {
        let (clock, mut carousel) = carousel();
        carousel.reset();

        carousel.on_scroll(scrolled_to(1040.0, 10));
        clock.advance(SETTLE);
        carousel.poll(10, false);
        assert_eq!(carousel.current_index(), 2);

        carousel.on_scroll(scrolled_to(1300.0, 10));
        clock.advance(SETTLE);
        carousel.poll(10, false);
        assert_eq!(carousel.current_index(), 2);
    }

    #[test]
    fn test_settled_at_end_wraps_to_first() {
        let (clock, mut carousel) = carousel();
        carousel.reset();

        let bottom = scrolled_to(0.0, 4);
        carousel.on_scroll(ScrollPosition {
            offset: bottom.max_offset(),
            ..bottom
        });
        clock.advance(SETTLE);
        carousel.poll(4, false);
        assert_eq!(carousel.current_index(), 3);

        clock.advance(5 * SECOND);
        assert_eq!(carousel.poll(4, false), Some(0));
    }

    #[test]
    fn test_reset_returns_to_start() {
        let (clock, mut carousel) = carousel();
        carousel.reset();
        clock.advance(5 * SECOND);
        carousel.poll(4, false);
        assert_eq!(carousel.current_index(), 1);

        carousel.reset();
        assert_eq!(carousel.current_index(), 0);
        assert_eq!(carousel.position().offset, 0.0);
        assert!(carousel.is_running());
    }
}
