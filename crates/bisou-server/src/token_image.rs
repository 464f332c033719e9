//! Remote token image for the initial frame step.
//!
//! When a `token_image_url` is configured the initial image route proxies it.
//! Any failure (timeout, non-success status, oversized body) is logged and
//! the caller falls back to the inline SVG.

use axum::body::Bytes;
use std::time::Duration;
use tracing::{debug, warn};

/// Bodies larger than this are not proxied.
const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// A fetched image and its content type.
#[derive(Debug, Clone)]
pub struct RemoteImage {
    pub content_type: String,
    pub bytes: Bytes,
}

/// Fetches the configured token image with a bounded timeout.
pub struct TokenImage {
    client: reqwest::Client,
    url: Option<String>,
}

impl TokenImage {
    pub fn new(url: Option<String>, timeout: Duration) -> reqwest::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .build()?;
        Ok(Self { client, url })
    }

    /// Whether a remote image is configured at all.
    pub fn is_remote(&self) -> bool {
        self.url.is_some()
    }

    /// Fetch the remote image. `None` means "use the inline SVG".
    pub async fn fetch(&self) -> Option<RemoteImage> {
        let url = self.url.as_deref()?;
        match self.try_fetch(url).await {
            Ok(image) => {
                debug!(target: "bisou::image", "Fetched token image ({} bytes)", image.bytes.len());
                Some(image)
            }
            Err(e) => {
                warn!(target: "bisou::image", "Error fetching token image from {}: {}", url, e);
                None
            }
        }
    }

    async fn try_fetch(&self, url: &str) -> Result<RemoteImage, String> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| e.to_string())?;

        let status = response.status();
        if !status.is_success() {
            return Err(format!("upstream returned {status}"));
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("image/png")
            .to_string();

        let bytes = response.bytes().await.map_err(|e| e.to_string())?;
        if bytes.len() > MAX_IMAGE_BYTES {
            return Err(format!("image too large ({} bytes)", bytes.len()));
        }

        Ok(RemoteImage {
            content_type,
            bytes,
        })
    }
}
