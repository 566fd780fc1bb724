//! Application configuration
//!
//! Every field has a built-in default, so the gallery runs without any
//! config file at all. A `config.toml` in the user's config directory can
//! override individual values:
//! - Linux: ~/.config/festival-gallery/config.toml
//! - macOS: ~/Library/Application Support/festival-gallery/config.toml
//! - Windows: %APPDATA%\festival-gallery\config.toml

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::Result;

/// Tunables for data sources, carousel timing and gallery layout
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where the photo manifest is fetched from
    pub manifest_url: String,
    /// Host that serves the image files (and `imprint.json`)
    pub image_base_url: String,

    /// Carousel auto-advance period
    pub advance_interval_ms: u64,
    /// Quiet period after the last scroll event before the position is re-read
    pub settle_delay_ms: u64,
    /// How close an item's top edge must be to the viewport top to count as aligned
    pub align_tolerance_px: f32,
    /// Duration of the animated scroll to the next item
    pub smooth_scroll_ms: u64,
    /// Resolution of the runtime tick that drives timers and animation
    pub tick_ms: u64,

    /// Height of one gallery item (image + caption)
    pub item_height: f32,
    /// Vertical gap between gallery items
    pub item_spacing: f32,
    /// Gallery images are downscaled to this width before display
    pub thumbnail_width: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            manifest_url: "https://festivalshot.com/photos.json".to_string(),
            image_base_url: "https://photos.festivalshot.com".to_string(),
            advance_interval_ms: 5_000,
            settle_delay_ms: 100,
            align_tolerance_px: 10.0,
            smooth_scroll_ms: 450,
            tick_ms: 50,
            item_height: 560.0,
            item_spacing: 24.0,
            thumbnail_width: 960,
        }
    }
}

impl Config {
    /// Load the user config, falling back to defaults when the file is
    /// missing or broken. A broken file is logged, never fatal.
    pub fn load() -> Self {
        let Some(path) = Self::path() else {
            return Self::default();
        };

        if !path.exists() {
            return Self::default();
        }

        match Self::load_from(&path) {
            Ok(config) => {
                tracing::info!("⚙️  Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                tracing::warn!("⚠️  Ignoring {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Parse a specific config file
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Location of the user config file, if a config directory exists
    pub fn path() -> Option<PathBuf> {
        let mut path = dirs::config_dir()?;
        path.push("festival-gallery");
        path.push("config.toml");
        Some(path)
    }

    /// URL of the secondary imprint document on the image host
    pub fn imprint_url(&self) -> String {
        format!("{}/imprint.json", self.image_base_url.trim_end_matches('/'))
    }

    pub fn advance_interval(&self) -> Duration {
        Duration::from_millis(self.advance_interval_ms)
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    pub fn smooth_scroll(&self) -> Duration {
        Duration::from_millis(self.smooth_scroll_ms)
    }

    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms.max(1))
    }
}
