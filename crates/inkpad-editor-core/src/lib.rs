//! inkpad-editor-core: Pure Rust markdown editor widget logic without
//! framework dependencies.
//!
//! This crate provides:
//! - `TextBuffer` trait for text storage abstraction, with a ropey-backed
//!   `EditorRope` implementation
//! - `ViewModeState` - the edit/preview/split/fullscreen display state machine
//! - `MarkdownEditor<T>` - the widget state owner: buffer, cursor, view mode,
//!   and the image upload coordinator
//! - Collaborator traits (`TextSurface`, `MarkupRenderer`, `Notifier`,
//!   `IconRefresher`, `ImageUploader`) implemented by the embedding host

pub mod error;
pub mod format;
pub mod observable;
pub mod render;
pub mod surface;
pub mod text;
pub mod types;
pub mod upload;
pub mod view_mode;
pub mod widget;

pub use error::{RenderError, UploadError};
pub use format::{Format, wrap_span};
pub use observable::Observable;
pub use render::{EMPTY_PREVIEW, IconRefresher, MarkupRenderer, Notifier, render_preview};
pub use smol_str::SmolStr;
pub use surface::{FakeSurface, FrameQueue, PostRender, TextSurface};
pub use text::{EditorRope, TextBuffer};
pub use types::{ImageFile, Selection, Severity, UPLOAD_SIZE_LIMIT};
pub use upload::{
    ClipboardItem, ImageUploader, PasteAction, PendingUpload, UploadedImage, paste_action,
};
pub use view_mode::{MIN_SURFACE_HEIGHT, ViewMode, ViewModeState};
pub use widget::{MarkdownEditor, PickerReset};
