//! Upload collaborators: send a card image somewhere and get a URL back.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{ExportError, ExportResult};

/// URL returned by [`MockUploader`] unless configured otherwise.
pub const MOCK_UPLOAD_URL: &str = "https://example.com/path/to/your/uploaded/image.png";

/// Delay [`MockUploader`] waits before answering.
pub const MOCK_UPLOAD_DELAY: Duration = Duration::from_secs(1);

/// Uploads an image data URI and returns where it can be fetched.
#[async_trait]
pub trait Uploader: Send + Sync {
    /// Upload `image_data_uri`.
    ///
    /// # Errors
    ///
    /// Returns an error if the upload fails.
    async fn upload(&self, image_data_uri: &str) -> ExportResult<Url>;
}

/// Stand-in uploader answering with a fixed URL after a fixed delay.
#[derive(Debug, Clone)]
pub struct MockUploader {
    url: String,
    delay: Duration,
}

impl MockUploader {
    /// Create a mock answering `url` after `delay`.
    #[must_use]
    pub fn new(url: impl Into<String>, delay: Duration) -> Self {
        Self {
            url: url.into(),
            delay,
        }
    }

    /// Answer `url` with no delay, for scripted runs.
    #[must_use]
    pub fn immediate(url: impl Into<String>) -> Self {
        Self::new(url, Duration::ZERO)
    }
}

impl Default for MockUploader {
    fn default() -> Self {
        Self::new(MOCK_UPLOAD_URL, MOCK_UPLOAD_DELAY)
    }
}

#[async_trait]
impl Uploader for MockUploader {
    async fn upload(&self, image_data_uri: &str) -> ExportResult<Url> {
        tracing::debug!(
            "Mock upload of {} bytes, answering in {:?}",
            image_data_uri.len(),
            self.delay
        );
        tokio::time::sleep(self.delay).await;
        Ok(Url::parse(&self.url)?)
    }
}

#[derive(Serialize)]
struct UploadRequest<'a> {
    image: &'a str,
}

#[derive(Deserialize)]
struct UploadResponse {
    url: String,
}

/// Uploads to an HTTP endpoint.
///
/// Sends `POST {"image": "<data uri>"}` and expects `{"url": "..."}` back.
#[derive(Debug, Clone)]
pub struct HttpUploader {
    http: Client,
    endpoint: Url,
}

impl HttpUploader {
    /// Create an uploader posting to `endpoint`.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::InvalidUrl`] if the URL is malformed.
    /// Returns [`ExportError::Http`] if the HTTP client fails to build.
    pub fn new(endpoint: &str) -> ExportResult<Self> {
        let endpoint = Url::parse(endpoint)?;
        let http = Client::builder()
            .user_agent(concat!("card-export/", env!("CARGO_PKG_VERSION")))
            .no_proxy()
            .build()?;
        Ok(Self { http, endpoint })
    }

    /// Endpoint uploads are posted to.
    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl Uploader for HttpUploader {
    async fn upload(&self, image_data_uri: &str) -> ExportResult<Url> {
        tracing::debug!("Uploading card image to {}", self.endpoint);
        let response = self
            .http
            .post(self.endpoint.clone())
            .json(&UploadRequest {
                image: image_data_uri,
            })
            .send()
            .await?
            .error_for_status()?;

        let body: UploadResponse = response.json().await?;
        Url::parse(&body.url).map_err(|e| {
            ExportError::UnexpectedResponse(format!("invalid url {:?}: {e}", body.url))
        })
    }
}
