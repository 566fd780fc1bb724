use image::imageops::FilterType;

use crate::error::{GalleryError, Result};

/// Tallest thumbnail we will produce, relative to its width
const MAX_ASPECT: u32 = 3;

/// A decoded, display-ready gallery image
#[derive(Debug, Clone)]
pub struct Thumbnail {
    pub width: u32,
    pub height: u32,
    /// RGBA8 pixels, row-major
    pub pixels: Vec<u8>,
}

/// Decode downloaded image bytes and downscale them for the gallery
///
/// Decoding and Lanczos resizing are CPU-heavy, so they run on the
/// blocking pool instead of the UI runtime.
pub async fn generate_thumbnail(bytes: Vec<u8>, max_width: u32) -> Result<Thumbnail> {
    tokio::task::spawn_blocking(move || generate_thumbnail_blocking(&bytes, max_width))
        .await
        .map_err(|e| GalleryError::Task(e.to_string()))?
}

/// Blocking implementation of thumbnail generation
fn generate_thumbnail_blocking(bytes: &[u8], max_width: u32) -> Result<Thumbnail> {
    let img = image::load_from_memory(bytes)?;

    // Only ever shrink; small images are shown as they are
    let img = if img.width() > max_width {
        img.resize(max_width, max_width.saturating_mul(MAX_ASPECT), FilterType::Lanczos3)
    } else {
        img
    };

    let rgba = img.to_rgba8();
    Ok(Thumbnail {
        width: rgba.width(),
        height: rgba.height(),
        pixels: rgba.into_raw(),
    })
}
