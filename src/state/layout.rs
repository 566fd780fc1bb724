//! Gallery geometry
//!
//! Gallery items are laid out in a single column with a fixed stride, so
//! item positions can be computed instead of queried from the widget tree.

use std::ops::Range;

use crate::config::Config;

/// Fixed vertical layout of the gallery column
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GalleryLayout {
    pub item_height: f32,
    pub item_spacing: f32,
}

/// Where the gallery viewport currently sits
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollPosition {
    /// Distance scrolled from the top of the content
    pub offset: f32,
    /// Visible height of the scroll container
    pub viewport_height: f32,
    /// Total height of the scrolled content
    pub content_height: f32,
}

impl ScrollPosition {
    /// Largest offset the container can actually scroll to
    pub fn max_offset(&self) -> f32 {
        (self.content_height - self.viewport_height).max(0.0)
    }
}

impl GalleryLayout {
    pub fn from_config(config: &Config) -> Self {
        Self {
            item_height: config.item_height,
            item_spacing: config.item_spacing,
        }
    }

    /// Distance between the top edges of two consecutive items
    pub fn stride(&self) -> f32 {
        self.item_height + self.item_spacing
    }

    /// Top edge of item `index`, relative to the top of the content
    pub fn item_top(&self, index: usize) -> f32 {
        index as f32 * self.stride()
    }

    /// Height of the whole column for `len` items
    pub fn content_height(&self, len: usize) -> f32 {
        if len == 0 {
            0.0
        } else {
            len as f32 * self.item_height + (len - 1) as f32 * self.item_spacing
        }
    }

    /// Items that intersect the viewport
    pub fn visible_range(&self, offset: f32, viewport_height: f32, len: usize) -> Range<usize> {
        if len == 0 || self.stride() <= 0.0 {
            return 0..0;
        }

        let top = offset.max(0.0);
        let bottom = top + viewport_height.max(0.0);

        let first = ((top / self.stride()).floor() as usize).min(len);
        let mut last = (bottom / self.stride()).ceil() as usize;
        last = last.clamp(first, len);

        // Always include the item under the top edge
        first..last.max((first + 1).min(len))
    }

    /// Offset that brings item `index` to the top, clamped to what the
    /// container can scroll to
    pub fn scroll_target(&self, index: usize, position: &ScrollPosition) -> f32 {
        let max = if position.content_height > 0.0 {
            position.max_offset()
        } else {
            f32::MAX
        };
        self.item_top(index).min(max)
    }

    /// Index of the item whose top edge lines up with the viewport top
    ///
    /// When the container is scrolled to its end, the last item counts as
    /// aligned even if it is too short to reach the top.
    pub fn aligned_index(&self, position: &ScrollPosition, len: usize, tolerance: f32) -> Option<usize> {
        if len == 0 {
            return None;
        }

        let nearest = ((position.offset / self.stride()).round().max(0.0) as usize).min(len - 1);
        if (self.item_top(nearest) - position.offset).abs() <= tolerance {
            return Some(nearest);
        }

        if position.content_height > 0.0 && position.offset >= position.max_offset() - tolerance {
            return Some(len - 1);
        }

        None
    }
}
