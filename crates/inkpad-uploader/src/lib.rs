//! inkpad-uploader: reqwest-backed implementation of the editor core's
//! `ImageUploader` capability.
//!
//! Submits the image as multipart form data (a single `image` file field) to
//! the upload endpoint and decodes its JSON envelope:
//!
//! ```json
//! { "success": true,  "url": "/files/abc.png", "id": "abc" }
//! { "success": false, "error": "images only" }
//! ```
//!
//! Transport failures, non-success envelopes, and responses missing a
//! success indication all map onto the core's `UploadError` taxonomy; the
//! coordinator treats them identically (placeholder rollback, user notice).

use std::time::Duration;

use reqwest::multipart::{Form, Part};
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;

use inkpad_editor_core::{ImageFile, ImageUploader, UploadError, UploadedImage};

/// Name of the multipart file field the endpoint expects.
const UPLOAD_FIELD: &str = "image";

/// Whole-request timeout, matching the endpoint's own upstream budget.
const UPLOAD_TIMEOUT: Duration = Duration::from_secs(30);

/// Structured payload returned by the upload endpoint.
#[derive(Debug, Deserialize)]
struct UploadEnvelope {
    #[serde(default)]
    success: bool,
    url: Option<String>,
    id: Option<String>,
    error: Option<String>,
}

/// HTTP client for the image upload endpoint.
#[derive(Clone, Debug)]
pub struct HttpUploader {
    client: Client,
    endpoint: Url,
}

impl HttpUploader {
    /// Create an uploader posting to `endpoint`, with the default 30s
    /// request timeout.
    pub fn new(endpoint: Url) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(UPLOAD_TIMEOUT).build()?;
        Ok(Self { client, endpoint })
    }

    /// Create an uploader around an existing client (shared pools, custom
    /// middleware, test configuration).
    pub fn with_client(client: Client, endpoint: Url) -> Self {
        Self { client, endpoint }
    }

    /// The configured endpoint.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    fn decode(status: StatusCode, body: &[u8]) -> Result<UploadedImage, UploadError> {
        let envelope: UploadEnvelope = match serde_json::from_slice(body) {
            Ok(envelope) => envelope,
            Err(err) if status.is_success() => {
                return Err(UploadError::MalformedResponse {
                    message: err.to_string(),
                });
            }
            // Unparseable error page (gateway HTML and the like): report the
            // status instead of the serde error.
            Err(_) => {
                return Err(UploadError::Upstream {
                    message: format!("endpoint returned {status}"),
                });
            }
        };

        if !envelope.success {
            return Err(UploadError::Upstream {
                message: envelope
                    .error
                    .unwrap_or_else(|| format!("endpoint returned {status}")),
            });
        }

        let url = envelope.url.ok_or_else(|| UploadError::MalformedResponse {
            message: "success response missing url".to_string(),
        })?;

        Ok(UploadedImage {
            url,
            id: envelope.id,
        })
    }
}

impl ImageUploader for HttpUploader {
    async fn upload(&self, file: &ImageFile) -> Result<UploadedImage, UploadError> {
        tracing::debug!(file = %file.name, size = file.size(), "uploading image");

        let part = Part::bytes(file.data.to_vec())
            .file_name(file.name.clone())
            .mime_str(&file.mime_type)
            .map_err(|_| UploadError::UnsupportedFileType {
                mime: file.mime_type.clone(),
            })?;
        let form = Form::new().part(UPLOAD_FIELD, part);

        let response = self
            .client
            .post(self.endpoint.clone())
            .multipart(form)
            .send()
            .await
            .map_err(|err| UploadError::Transport {
                message: err.to_string(),
            })?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|err| UploadError::Transport {
                message: err.to_string(),
            })?;

        match Self::decode(status, &body) {
            Ok(image) => {
                tracing::info!(file = %file.name, url = %image.url, "image uploaded");
                Ok(image)
            }
            Err(err) => {
                tracing::warn!(file = %file.name, %status, "image upload failed: {err}");
                Err(err)
            }
        }
    }
}
