use std::sync::Arc;

use super::data::Photo;

/// Modal single-photo viewer state
///
/// The index is relative to the active list at the time of opening and
/// only exists while the lightbox is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lightbox {
    #[default]
    Closed,
    Open(usize),
}

/// Keys the lightbox reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightboxKey {
    Escape,
    ArrowLeft,
    ArrowRight,
}

/// What a lightbox operation actually did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Closed → Open
    Opened(usize),
    /// Open → Closed
    Closed,
    /// Stayed open, now showing another index
    Moved(usize),
    /// Not valid in the current state; nothing changed
    Ignored,
}

impl Lightbox {
    pub fn is_open(&self) -> bool {
        matches!(self, Lightbox::Open(_))
    }

    pub fn index(&self) -> Option<usize> {
        match self {
            Lightbox::Open(index) => Some(*index),
            Lightbox::Closed => None,
        }
    }

    /// Open at `index`; out-of-range indices (including any index into an
    /// empty list) are ignored
    pub fn open(&mut self, index: usize, len: usize) -> Transition {
        if self.is_open() || index >= len {
            return Transition::Ignored;
        }
        *self = Lightbox::Open(index);
        Transition::Opened(index)
    }

    pub fn close(&mut self) -> Transition {
        match self {
            Lightbox::Open(_) => {
                *self = Lightbox::Closed;
                Transition::Closed
            }
            Lightbox::Closed => Transition::Ignored,
        }
    }

    /// Previous photo, wrapping from the first to the last
    pub fn prev(&mut self, len: usize) -> Transition {
        self.step(len, |index, len| (index + len - 1) % len)
    }

    /// Next photo, wrapping from the last to the first
    pub fn next(&mut self, len: usize) -> Transition {
        self.step(len, |index, len| (index + 1) % len)
    }

    fn step(&mut self, len: usize, advance: impl Fn(usize, usize) -> usize) -> Transition {
        let Lightbox::Open(index) = *self else {
            return Transition::Ignored;
        };
        if len == 0 {
            return Transition::Ignored;
        }

        // The active list may have shrunk since opening
        let next = advance(index.min(len - 1), len);
        *self = Lightbox::Open(next);
        Transition::Moved(next)
    }

    /// Keyboard navigation; every key is ignored while closed
    pub fn handle_key(&mut self, key: LightboxKey, len: usize) -> Transition {
        if !self.is_open() {
            return Transition::Ignored;
        }
        match key {
            LightboxKey::Escape => self.close(),
            LightboxKey::ArrowLeft => self.prev(len),
            LightboxKey::ArrowRight => self.next(len),
        }
    }

    /// The photo on display, clamped into the active list
    pub fn current<'a>(&self, active: &'a [Arc<Photo>]) -> Option<&'a Arc<Photo>> {
        let index = self.index()?;
        let last = active.len().checked_sub(1)?;
        active.get(index.min(last))
    }
}
