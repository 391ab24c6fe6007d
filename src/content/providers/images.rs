//! HTTP image loader.
//!
//! The terminal can't draw bitmaps, so "loading" an image means fetching it
//! and reporting what came back. Failures surface as errors; the lesson
//! screen swaps in a placeholder.

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, warn};

use crate::content::{ContentError, ImageInfo, ImageLoader};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

pub struct HttpImageLoader {
    client: reqwest::Client,
}

impl Default for HttpImageLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpImageLoader {
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|e| {
                warn!("Falling back to default HTTP client: {}", e);
                reqwest::Client::new()
            });
        Self { client }
    }
}

#[async_trait]
impl ImageLoader for HttpImageLoader {
    async fn load(&self, url: &str) -> Result<ImageInfo, ContentError> {
        if url.is_empty() {
            return Err(ContentError::NotFound("Image".to_string()));
        }

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ContentError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ContentError::Api {
                status: status.as_u16(),
                message: format!("failed to load image {url}"),
            });
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());

        let body = response
            .bytes()
            .await
            .map_err(|e| ContentError::Network(e.to_string()))?;

        debug!("Loaded image {} ({} bytes)", url, body.len());

        Ok(ImageInfo {
            url: url.to_string(),
            content_type,
            bytes: body.len(),
        })
    }
}
