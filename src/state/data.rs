/// Shared data structures for the application state
///
/// These structs represent the data model that flows between
/// the remote host and the UI layer.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::Result;

/// Represents a single photo listed in the manifest
///
/// Photos are immutable once loaded. Every field is parsed leniently:
/// a missing or mistyped value becomes an empty string (or no date)
/// so one bad record cannot break the whole gallery.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct Photo {
    /// File name on the image host (e.g., "jane-doe-park.jpg")
    #[serde(default, deserialize_with = "lenient_string")]
    pub file: String,
    /// Performing artist
    #[serde(default, deserialize_with = "lenient_string")]
    pub artist: String,
    /// Venue or stage
    #[serde(default, deserialize_with = "lenient_string")]
    pub location: String,
    /// Year and month the photo was taken ("YYYY-MM")
    #[serde(default, deserialize_with = "lenient_date")]
    pub date: Option<String>,
}

impl Photo {
    /// Full URL of the image on the host
    pub fn image_url(&self, base_url: &str) -> String {
        format!("{}/{}", base_url.trim_end_matches('/'), self.file)
    }

    /// Placeholder/alt label, e.g. "Jane Doe at Park"
    pub fn alt_text(&self) -> String {
        format!("{} at {}", self.artist, self.location)
    }

    /// "March 2024" for a date of "2024-03"; None when absent or unparseable
    pub fn formatted_date(&self) -> Option<String> {
        self.date.as_deref().and_then(format_month)
    }

    /// Gallery caption, one entry per line
    pub fn caption_lines(&self) -> Vec<String> {
        let mut lines = vec![self.artist.clone(), self.location.clone()];
        if let Some(date) = self.formatted_date() {
            lines.push(date);
        }
        lines
    }

    /// Single-line lightbox caption
    pub fn lightbox_caption(&self) -> String {
        self.caption_lines().join(" — ")
    }
}

/// Contact details shown in the page footer
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct Imprint {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub street: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub city: String,
}

impl Imprint {
    /// Non-empty lines of the imprint, in display order
    pub fn lines(&self) -> Vec<&str> {
        [self.name.as_str(), self.street.as_str(), self.city.as_str()]
            .into_iter()
            .filter(|line| !line.trim().is_empty())
            .collect()
    }
}

/// Parse a manifest body into photos, preserving manifest order
///
/// The body must be a JSON array. Entries that are not objects are
/// skipped with a warning; object entries always produce a photo.
pub fn parse_manifest(body: &[u8]) -> Result<Vec<Photo>> {
    let entries: Vec<Value> = serde_json::from_slice(body)?;
    let total = entries.len();

    let photos: Vec<Photo> = entries
        .into_iter()
        .enumerate()
        .filter_map(|(position, entry)| {
            if !entry.is_object() {
                tracing::warn!("⚠️  Skipping manifest entry {}: not an object", position);
                return None;
            }
            match Photo::deserialize(entry) {
                Ok(photo) => Some(photo),
                Err(e) => {
                    tracing::warn!("⚠️  Skipping manifest entry {}: {}", position, e);
                    None
                }
            }
        })
        .collect();

    if photos.len() < total {
        tracing::warn!("⚠️  {} of {} manifest entries were unusable", total - photos.len(), total);
    }

    Ok(photos)
}

/// Format a "YYYY-MM" string as "Month YYYY"
///
/// Anything after the month (e.g. a day) is ignored.
pub fn format_month(iso: &str) -> Option<String> {
    let mut parts = iso.trim().split('-');
    let year: i32 = parts.next()?.trim().parse().ok()?;
    let month: u32 = parts.next()?.trim().parse().ok()?;
    let date = NaiveDate::from_ymd_opt(year, month, 1)?;
    Some(date.format("%B %Y").to_string())
}

/// Accept any JSON scalar as a string; null, arrays and objects become ""
fn lenient_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => s,
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    })
}

/// Dates are optional: empty or non-string values mean "no date"
fn lenient_date<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = lenient_string(deserializer)?;
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Ok(None)
    } else {
        Ok(Some(trimmed.to_string()))
    }
}
