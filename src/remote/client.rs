use reqwest::Client;
use std::time::Duration;

use crate::config::Config;
use crate::error::{GalleryError, Result};
use crate::state::data::{parse_manifest, Imprint, Photo};

/// HTTP access to the manifest and the image host
#[derive(Debug, Clone)]
pub struct RemoteClient {
    client: Client,
    manifest_url: String,
    image_base_url: String,
    imprint_url: String,
}

impl RemoteClient {
    pub fn new(config: &Config) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!("⚠️  Falling back to default HTTP client: {}", e);
                Client::new()
            });

        Self {
            client,
            manifest_url: config.manifest_url.clone(),
            image_base_url: config.image_base_url.clone(),
            imprint_url: config.imprint_url(),
        }
    }

    /// Fetch and parse the whole manifest in one request
    pub async fn fetch_manifest(&self) -> Result<Vec<Photo>> {
        tracing::info!("📥 Fetching manifest from {}", self.manifest_url);
        let body = self.get_bytes(&self.manifest_url).await?;
        parse_manifest(&body)
    }

    /// Best-effort imprint for the footer
    pub async fn fetch_imprint(&self) -> Result<Imprint> {
        let body = self.get_bytes(&self.imprint_url).await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// Raw bytes of one photo
    pub async fn fetch_image(&self, photo: &Photo) -> Result<Vec<u8>> {
        let url = photo.image_url(&self.image_base_url);
        self.get_bytes(&url).await
    }

    async fn get_bytes(&self, url: &str) -> Result<Vec<u8>> {
        let http_error = |source| GalleryError::Http {
            url: url.to_string(),
            source,
        };

        let response = self.client.get(url).send().await.map_err(http_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(GalleryError::Status {
                url: url.to_string(),
                status,
            });
        }

        let body = response.bytes().await.map_err(http_error)?;
        Ok(body.to_vec())
    }
}
