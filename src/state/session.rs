use std::sync::Arc;

use super::carousel::Carousel;
use super::data::Photo;
use super::layout::ScrollPosition;
use super::lightbox::{Lightbox, LightboxKey, Transition};
use super::scheduler::{Clock, SystemClock};
use super::store::PhotoStore;

/// Ties the photo store, the lightbox and the carousel together.
///
/// All interaction funnels through here so that the cross-component rules
/// live in one place:
/// - opening the lightbox stops the carousel, closing it restarts it
/// - every re-render resets the carousel to the first item
/// - nothing is rendered, and no timer runs, before the manifest is loaded
#[derive(Debug)]
pub struct Session<C: Clock = SystemClock> {
    store: PhotoStore,
    lightbox: Lightbox,
    carousel: Carousel<C>,
    loaded: bool,
}

impl<C: Clock> Session<C> {
    pub fn new(carousel: Carousel<C>) -> Self {
        Self {
            store: PhotoStore::new(),
            lightbox: Lightbox::default(),
            carousel,
            loaded: false,
        }
    }

    /// Manifest arrived: populate the store and render for the first time,
    /// honouring anything typed into the search box meanwhile
    pub fn load(&mut self, photos: Vec<Photo>) {
        tracing::info!("🖼️  Loaded manifest with {} photos", photos.len());
        self.store.set_all(photos);
        self.store.reapply();
        self.loaded = true;
        self.rendered();
    }

    /// Search box changed. Every keystroke re-renders.
    pub fn search(&mut self, query: &str) {
        let matches = self.store.apply_query(query).len();
        tracing::debug!("🔍 Query {:?} matches {} photos", query.trim(), matches);

        if self.loaded {
            self.rendered();
        }
    }

    fn rendered(&mut self) {
        self.carousel.reset();
        if self.lightbox.is_open() {
            self.carousel.stop();
        }
    }

    /// Returns true if the lightbox actually opened
    pub fn open(&mut self, index: usize) -> bool {
        let transition = self.lightbox.open(index, self.store.active().len());
        self.apply(transition)
    }

    pub fn close(&mut self) -> bool {
        let transition = self.lightbox.close();
        self.apply(transition)
    }

    pub fn prev(&mut self) -> bool {
        let transition = self.lightbox.prev(self.store.active().len());
        self.apply(transition)
    }

    pub fn next(&mut self) -> bool {
        let transition = self.lightbox.next(self.store.active().len());
        self.apply(transition)
    }

    pub fn handle_key(&mut self, key: LightboxKey) -> bool {
        let transition = self.lightbox.handle_key(key, self.store.active().len());
        self.apply(transition)
    }

    fn apply(&mut self, transition: Transition) -> bool {
        match transition {
            Transition::Opened(index) => {
                tracing::debug!("🔎 Lightbox opened at item {}", index);
                self.carousel.stop();
            }
            Transition::Closed => self.carousel.resume(self.store.active().len()),
            Transition::Moved(index) => tracing::debug!("🔎 Lightbox moved to item {}", index),
            Transition::Ignored => return false,
        }
        true
    }

    pub fn scrolled(&mut self, position: ScrollPosition) {
        self.carousel.on_scroll(position);
    }

    /// Runtime tick; returns the item the carousel wants scrolled into view
    pub fn tick(&mut self) -> Option<usize> {
        let len = self.store.active().len();
        self.carousel.poll(len, self.lightbox.is_open())
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn active(&self) -> &[Arc<Photo>] {
        self.store.active()
    }

    /// Number of photos in the manifest, regardless of the search
    pub fn total_count(&self) -> usize {
        self.store.all().len()
    }

    pub fn query(&self) -> &str {
        self.store.query()
    }

    pub fn lightbox(&self) -> Lightbox {
        self.lightbox
    }

    /// Photo currently shown in the lightbox
    pub fn lightbox_photo(&self) -> Option<&Arc<Photo>> {
        self.lightbox.current(self.store.active())
    }

    pub fn carousel(&self) -> &Carousel<C> {
        &self.carousel
    }

    pub fn carousel_mut(&mut self) -> &mut Carousel<C> {
        &mut self.carousel
    }
}
