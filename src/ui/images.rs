use iced::widget::image::Handle;
use std::collections::HashMap;

/// Which rendition of a photo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rendition {
    /// Downscaled image shown in the gallery
    Thumbnail,
    /// Original bytes shown in the lightbox
    Full,
}

/// Load state of one image
#[derive(Debug, Clone)]
pub enum ImageState {
    Loading,
    Ready(Handle),
    Failed(String),
}

/// Session-scoped image handles, keyed by file name
///
/// Images are only requested once the gallery or lightbox needs them, and
/// each file is requested at most once per rendition while it is cached.
/// Callers evict what they no longer show with `retain`.
#[derive(Debug, Default)]
pub struct ImageCache {
    entries: HashMap<(Rendition, String), ImageState>,
}

impl ImageCache {
    /// Mark `file` as loading. Returns false if there is nothing to fetch
    /// (already requested, or no file name at all).
    pub fn request(&mut self, rendition: Rendition, file: &str) -> bool {
        if file.is_empty() {
            return false;
        }

        let key = (rendition, file.to_string());
        if self.entries.contains_key(&key) {
            return false;
        }

        self.entries.insert(key, ImageState::Loading);
        true
    }

    /// Store a finished load. Results for entries evicted meanwhile are
    /// dropped so they cannot bring the image back.
    pub fn finish(&mut self, rendition: Rendition, file: String, result: Result<Handle, String>) {
        let Some(entry) = self.entries.get_mut(&(rendition, file.clone())) else {
            tracing::debug!("Dropping late {:?} image for {}", rendition, file);
            return;
        };

        *entry = match result {
            Ok(handle) => ImageState::Ready(handle),
            Err(e) => {
                tracing::warn!("⚠️  Failed to load {}: {}", file, e);
                ImageState::Failed(e)
            }
        };
    }

    /// Evict every `rendition` entry whose file `keep` rejects
    pub fn retain(&mut self, rendition: Rendition, mut keep: impl FnMut(&str) -> bool) {
        let before = self.entries.len();
        self.entries
            .retain(|(r, file), _| *r != rendition || keep(file));

        let evicted = before - self.entries.len();
        if evicted > 0 {
            tracing::debug!("🧹 Evicted {} {:?} images", evicted, rendition);
        }
    }

    pub fn get(&self, rendition: Rendition, file: &str) -> Option<&ImageState> {
        self.entries.get(&(rendition, file.to_string()))
    }
}
