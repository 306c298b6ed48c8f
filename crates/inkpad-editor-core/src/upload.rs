//! Upload protocol types: placeholder markup, the uploader capability, and
//! clipboard paste interception.
//!
//! The coordinator itself lives on [`crate::widget::MarkdownEditor`]
//! (`begin_upload` / `finish_upload` / `upload_and_insert`); this module
//! holds everything the coordinator shares with the host and the boundary
//! uploader crate.

use web_time::{SystemTime, UNIX_EPOCH};

use crate::error::UploadError;
use crate::types::{ImageFile, UPLOAD_SIZE_LIMIT};

/// Reference to a stored asset, as returned by the upload endpoint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UploadedImage {
    /// Locator for the stored asset, used as the markdown image target.
    pub url: String,
    /// Endpoint-assigned asset id, when provided.
    pub id: Option<String>,
}

/// The network boundary: submit an image, receive a reference.
///
/// Any transport failure must surface as `UploadError::Transport`; it is
/// treated identically to an explicit failure response by the coordinator.
pub trait ImageUploader {
    fn upload(
        &self,
        file: &ImageFile,
    ) -> impl Future<Output = Result<UploadedImage, UploadError>>;
}

impl<T: ImageUploader> ImageUploader for &T {
    fn upload(
        &self,
        file: &ImageFile,
    ) -> impl Future<Output = Result<UploadedImage, UploadError>> {
        (*self).upload(file)
    }
}

/// A single in-flight upload attempt.
///
/// Created synchronously when the placeholder is spliced into the buffer,
/// resolved exactly once by `finish_upload`. The in-flight guard on the
/// widget guarantees no two unresolved attempts coexist.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingUpload {
    /// Unique token for this attempt, embedded in the placeholder label.
    pub token: String,
    /// The exact placeholder fragment spliced into the buffer.
    pub placeholder: String,
    /// Char offset in the buffer at insertion time.
    pub insert_offset: usize,
    /// Original filename, used as the final reference label.
    pub file_name: String,
}

/// Build the attempt token: epoch milliseconds plus a per-widget sequence
/// number. The sequence keeps serialized attempts inside one millisecond
/// from colliding; uploads are never concurrent, so no stronger id is needed.
pub(crate) fn attempt_token(seq: u64) -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);
    format!("{millis}-{seq}")
}

/// The optimistic placeholder: a link construct with an empty target and an
/// "uploading" label carrying the token.
pub(crate) fn placeholder_markup(token: &str) -> String {
    format!("[uploading-{token}...]()")
}

/// The final markup image reference.
pub(crate) fn image_reference(file_name: &str, url: &str) -> String {
    format!("![{file_name}]({url})")
}

/// Validate an attachment before any state mutation or network call.
pub(crate) fn validate_image(file: &ImageFile) -> Result<(), UploadError> {
    if !file.is_image() {
        return Err(UploadError::UnsupportedFileType {
            mime: file.mime_type.clone(),
        });
    }
    if file.size() > UPLOAD_SIZE_LIMIT {
        return Err(UploadError::FileTooLarge { size: file.size() });
    }
    Ok(())
}

/// One item of a paste event's clipboard list, as seen by the host.
#[derive(Clone, Debug)]
pub struct ClipboardItem {
    /// MIME type reported for the item.
    pub mime_type: String,
    /// Binary payload, present for file-like items.
    pub file: Option<ImageFile>,
}

impl ClipboardItem {
    pub fn text() -> Self {
        Self {
            mime_type: "text/plain".to_string(),
            file: None,
        }
    }

    pub fn image(file: ImageFile) -> Self {
        Self {
            mime_type: file.mime_type.clone(),
            file: Some(file),
        }
    }
}

/// What the host should do with a paste event.
#[derive(Clone, Debug)]
pub enum PasteAction {
    /// Suppress the default paste and upload this image instead.
    UploadImage(ImageFile),
    /// No image item present: let the default (text) paste proceed.
    Default,
}

/// Scan a paste event's item list and decide how to handle it.
///
/// The first item whose type indicates image content wins, even if several
/// are present; without one, default paste behavior is left untouched.
pub fn paste_action(items: Vec<ClipboardItem>) -> PasteAction {
    for item in items {
        if item.mime_type.starts_with("image/") {
            if let Some(file) = item.file {
                return PasteAction::UploadImage(file);
            }
        }
    }
    PasteAction::Default
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    fn png(name: &str) -> ImageFile {
        ImageFile::new(name, "image/png", Bytes::from_static(b"\x89PNG"))
    }

    #[test]
    fn test_tokens_distinct_within_a_millisecond() {
        let a = attempt_token(0);
        let b = attempt_token(1);
        assert_ne!(a, b);
    }

    #[test]
    fn test_placeholder_carries_token() {
        let fragment = placeholder_markup("1700000000-3");
        assert_eq!(fragment, "[uploading-1700000000-3...]()");
        assert!(fragment.ends_with("]()"), "empty link target");
    }

    #[test]
    fn test_image_reference() {
        assert_eq!(
            image_reference("cat.png", "/files/abc.png"),
            "![cat.png](/files/abc.png)"
        );
    }

    #[test]
    fn test_validate_rejects_non_image() {
        let file = ImageFile::new("notes.txt", "text/plain", Bytes::from_static(b"hi"));
        assert_eq!(
            validate_image(&file),
            Err(UploadError::UnsupportedFileType {
                mime: "text/plain".to_string()
            })
        );
    }

    #[test]
    fn test_validate_rejects_oversized() {
        let big = ImageFile::new(
            "big.png",
            "image/png",
            Bytes::from(vec![0u8; 11 * 1024 * 1024]),
        );
        assert!(matches!(
            validate_image(&big),
            Err(UploadError::FileTooLarge { .. })
        ));
    }

    #[test]
    fn test_validate_accepts_image_at_limit() {
        let file = ImageFile::new(
            "ok.png",
            "image/png",
            Bytes::from(vec![0u8; UPLOAD_SIZE_LIMIT]),
        );
        assert_eq!(validate_image(&file), Ok(()));
    }

    #[test]
    fn test_paste_prefers_first_image_item() {
        let action = paste_action(vec![
            ClipboardItem::text(),
            ClipboardItem::image(png("first.png")),
            ClipboardItem::image(png("second.png")),
        ]);
        match action {
            PasteAction::UploadImage(file) => assert_eq!(file.name, "first.png"),
            PasteAction::Default => panic!("expected image upload"),
        }
    }

    #[test]
    fn test_paste_without_image_is_default() {
        assert!(matches!(
            paste_action(vec![ClipboardItem::text()]),
            PasteAction::Default
        ));
        assert!(matches!(paste_action(Vec::new()), PasteAction::Default));
    }
}
