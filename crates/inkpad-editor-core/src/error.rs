//! Error types for editor operations.

use crate::types::UPLOAD_SIZE_LIMIT;

/// Errors raised by the upload coordinator.
///
/// Validation variants are produced before any buffer mutation; `Upstream`
/// and `Transport` come back from the uploader capability after the
/// placeholder has already been inserted.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum UploadError {
    /// The attached file is not an image.
    #[error("unsupported file type: {mime}")]
    UnsupportedFileType { mime: String },

    /// The attached file exceeds the upload size limit.
    #[error("file too large: {size} bytes (limit {} bytes)", UPLOAD_SIZE_LIMIT)]
    FileTooLarge { size: usize },

    /// Another upload is still pending; the new request is dropped.
    #[error("an upload is already in flight")]
    InFlight,

    /// The endpoint answered, but rejected the upload.
    #[error("upload rejected: {message}")]
    Upstream { message: String },

    /// The request never completed (timeout, connection error).
    #[error("transport error: {message}")]
    Transport { message: String },

    /// The endpoint answered with a body we could not interpret.
    #[error("malformed upload response: {message}")]
    MalformedResponse { message: String },
}

impl UploadError {
    /// Whether this error was raised before any state mutation.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedFileType { .. } | Self::FileTooLarge { .. }
        )
    }
}

/// Error type for the markup render collaborator.
///
/// Never escapes the widget: rendering failures degrade to raw-text display.
#[derive(thiserror::Error, Debug, Clone)]
#[error("{0}")]
pub struct RenderError(pub String);

impl From<&str> for RenderError {
    fn from(s: &str) -> Self {
        RenderError(s.to_string())
    }
}

impl From<String> for RenderError {
    fn from(s: String) -> Self {
        RenderError(s)
    }
}
