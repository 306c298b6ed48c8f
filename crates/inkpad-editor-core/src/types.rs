//! Core widget types: selection, attachments, and notification severity.
//!
//! These types are framework-agnostic and shared between the view-mode
//! controller and the upload coordinator.

use std::ops::Range;

use bytes::Bytes;

/// Maximum accepted upload size: 10 MiB.
pub const UPLOAD_SIZE_LIMIT: usize = 10 * 1024 * 1024;

/// Text selection with anchor and head positions, in char offsets.
///
/// The anchor is where the selection started, the head is where the cursor is
/// now. They may be in any order - use `start()` and `end()` for ordered
/// bounds.
#[derive(Clone, Debug, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    /// Where selection started
    pub anchor: usize,
    /// Where cursor is now
    pub head: usize,
}

impl Selection {
    /// Create a new selection.
    pub fn new(anchor: usize, head: usize) -> Self {
        Self { anchor, head }
    }

    /// Create a collapsed selection (cursor position).
    pub fn collapsed(offset: usize) -> Self {
        Self {
            anchor: offset,
            head: offset,
        }
    }

    /// Get the start (lower bound) of the selection.
    pub fn start(&self) -> usize {
        self.anchor.min(self.head)
    }

    /// Get the end (upper bound) of the selection.
    pub fn end(&self) -> usize {
        self.anchor.max(self.head)
    }

    /// Check if the selection is collapsed (empty, cursor only).
    pub fn is_collapsed(&self) -> bool {
        self.anchor == self.head
    }

    /// Get the selection length in chars.
    pub fn len(&self) -> usize {
        self.end() - self.start()
    }

    /// Check if empty (same as is_collapsed).
    pub fn is_empty(&self) -> bool {
        self.is_collapsed()
    }

    /// Convert to a Range<usize> (ordered).
    pub fn to_range(&self) -> Range<usize> {
        self.start()..self.end()
    }
}

/// Severity for user-facing notifications.
#[derive(Clone, Debug, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

/// An image attachment handed to the upload coordinator.
///
/// Produced by the host from a file-picker selection or a clipboard paste.
/// The payload is `Bytes` so clones are cheap while an upload is pending.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageFile {
    /// Original filename (used as the markdown reference label).
    pub name: String,
    /// MIME type as reported by the host.
    pub mime_type: String,
    /// Raw file bytes.
    pub data: Bytes,
}

impl ImageFile {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, data: Bytes) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            data,
        }
    }

    /// Size in bytes.
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Whether the declared MIME type indicates image content.
    pub fn is_image(&self) -> bool {
        self.mime_type.starts_with("image/")
    }
}
