//! The widget state owner: buffer, cursor, view mode, and the upload
//! coordinator.
//!
//! All state transitions run to completion inside one synchronous callback
//! turn; the only suspension point is the uploader await inside
//! [`MarkdownEditor::upload_and_insert`]. Layout side effects (selection
//! restore, focus, resize, icon refresh) are queued on the frame queue and
//! applied by the host after its render pass via [`MarkdownEditor::run_post_render`].

use crate::error::UploadError;
use crate::format::{Format, wrap_span};
use crate::observable::Observable;
use crate::render::{IconRefresher, MarkupRenderer, Notifier, render_preview};
use crate::surface::{FrameQueue, PostRender, TextSurface};
use crate::text::{EditorRope, TextBuffer};
use crate::types::{ImageFile, Severity};
use crate::upload::{
    ClipboardItem, ImageUploader, PasteAction, PendingUpload, UploadedImage, attempt_token,
    image_reference, paste_action, placeholder_markup, validate_image,
};
use crate::view_mode::ViewModeState;

/// Marker telling the host to clear the file picker's selected-file state,
/// so the same file can be re-selected immediately.
#[must_use = "the host must reset the file picker so the same file can be re-picked"]
#[derive(Debug)]
pub struct PickerReset;

/// The markdown editor widget.
///
/// Owns the authoritative text buffer for its whole lifetime. The buffer is
/// the single source of truth shared by the view-mode controller's resize
/// logic and the upload coordinator's patch logic; both mutate it only
/// within one synchronous turn (mutate, then resize, then yield).
pub struct MarkdownEditor<B: TextBuffer = EditorRope> {
    buffer: B,
    cursor: usize,
    view: ViewModeState,
    upload_in_flight: bool,
    token_seq: u64,
    revision: Observable<u64>,
    frame: FrameQueue,
}

impl Default for MarkdownEditor<EditorRope> {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkdownEditor<EditorRope> {
    /// Create an empty editor with the default rope buffer.
    pub fn new() -> Self {
        Self::with_buffer(EditorRope::new())
    }

    /// Create an editor seeded with content.
    pub fn with_content(content: &str) -> Self {
        Self::with_buffer(EditorRope::from_str(content))
    }
}

impl<B: TextBuffer> MarkdownEditor<B> {
    /// Create an editor around an existing buffer.
    pub fn with_buffer(buffer: B) -> Self {
        Self {
            buffer,
            cursor: 0,
            view: ViewModeState::default(),
            upload_in_flight: false,
            token_seq: 0,
            revision: Observable::new(0),
            frame: FrameQueue::new(),
        }
    }

    // === State access ===

    /// The authoritative buffer content.
    pub fn content(&self) -> String {
        self.buffer.to_string()
    }

    pub fn buffer(&self) -> &B {
        &self.buffer
    }

    /// Current cursor offset (chars).
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Move the cursor, clamped to the buffer length.
    pub fn set_cursor(&mut self, offset: usize) {
        self.cursor = offset.min(self.buffer.len_chars());
    }

    pub fn view(&self) -> ViewModeState {
        self.view
    }

    pub fn upload_in_flight(&self) -> bool {
        self.upload_in_flight
    }

    /// Change counter bumped on every buffer or mode mutation.
    pub fn revision(&self) -> u64 {
        self.revision.value()
    }

    /// Subscribe to revision changes (host re-render scheduling).
    pub fn subscribe(&mut self, f: impl Fn(&u64) + 'static) {
        self.revision.subscribe(f);
    }

    fn bump(&mut self) {
        self.revision.update(|r| *r += 1);
    }

    // === Host integration ===

    /// Adopt the surface's current value and selection as the initial state,
    /// and size the surface to fit. Called once when the widget is mounted.
    pub fn sync_from_surface(&mut self, surface: &mut dyn TextSurface) {
        self.buffer.reset(&surface.value());
        self.cursor = surface.selection().head.min(self.buffer.len_chars());
        self.view.auto_resize(surface);
        self.bump();
    }

    /// Drain post-render callbacks. The host calls this once after every
    /// render pass.
    pub fn run_post_render(&mut self, surface: &mut dyn TextSurface, icons: &dyn IconRefresher) {
        let mut pass = PostRender { surface, icons };
        self.frame.drain(&mut pass);
    }

    /// Immediate resize (see [`ViewModeState::auto_resize`]).
    pub fn auto_resize(&self, surface: &mut dyn TextSurface) {
        self.view.auto_resize(surface);
    }

    fn queue_resize(&mut self) {
        let view = self.view;
        self.frame.push(move |pass| view.auto_resize(pass.surface));
    }

    // === View-mode controller ===

    /// Flip preview mode. Enabling preview disables split view.
    pub fn toggle_preview(&mut self) {
        self.view.toggle_preview();
        self.bump();
    }

    /// Flip split view. Enabling split disables preview and schedules a
    /// resize for the next render pass, since the layout change may alter
    /// the intrinsic content height.
    pub fn toggle_split_view(&mut self) {
        if self.view.toggle_split_view() {
            self.queue_resize();
        }
        self.bump();
    }

    /// Flip fullscreen. Exiting forces split view off. After the layout
    /// change renders, mode-dependent icons are refreshed and focus returns
    /// to the edit surface when it is visible.
    pub fn toggle_full_screen(&mut self) {
        self.view.toggle_full_screen();
        let visible_editor = !self.view.is_fullscreen() && self.view.shows_editor();
        self.frame.push(move |pass| {
            pass.icons.refresh_icons();
            if visible_editor {
                pass.surface.focus();
            }
        });
        self.bump();
    }

    /// Render the buffer for the preview pane (never fails; see
    /// [`render_preview`]).
    pub fn preview(&self, renderer: &impl MarkupRenderer) -> String {
        render_preview(renderer, &self.content())
    }

    // === Text-manipulation helpers ===

    /// Wrap the current surface selection with `before`/`after`.
    ///
    /// Reads the live surface value and selection rather than the cached
    /// buffer, so out-of-band surface edits cannot be lost. After the
    /// repaint, the selection is restored around the originally selected
    /// span and the surface is resized.
    pub fn wrap_selection(&mut self, surface: &dyn TextSurface, before: &str, after: &str) {
        let (new_text, restored) = wrap_span(&surface.value(), surface.selection(), before, after);
        self.buffer.reset(&new_text);
        self.cursor = restored.end();
        self.bump();

        let (start, end) = (restored.start(), restored.end());
        let view = self.view;
        self.frame.push(move |pass| {
            pass.surface.focus();
            pass.surface.set_selection(start, end);
            view.auto_resize(pass.surface);
        });
    }

    /// Apply a toolbar formatting preset to the surface selection.
    pub fn apply_format(&mut self, surface: &dyn TextSurface, format: Format) {
        let (before, after) = format.tokens();
        self.wrap_selection(surface, before, after);
    }

    /// Splice `text` at the cached cursor offset.
    ///
    /// Uses the cached buffer as the source of truth: this path runs
    /// mid-upload-flow, when the surface's own selection bookkeeping is not
    /// trusted to be current. After the repaint the cursor lands immediately
    /// after the inserted text.
    pub fn insert_at_cursor(&mut self, text: &str) {
        let offset = self.cursor.min(self.buffer.len_chars());
        self.buffer.insert(offset, text);
        self.cursor = offset + text.chars().count();
        self.bump();

        let cursor = self.cursor;
        let view = self.view;
        self.frame.push(move |pass| {
            pass.surface.set_selection(cursor, cursor);
            view.auto_resize(pass.surface);
        });
    }

    // === Upload coordinator ===

    /// Optimistic phase: guard, validate, splice the placeholder, raise the
    /// in-flight flag.
    ///
    /// Fails fast before any buffer mutation: a validation error leaves the
    /// widget exactly as it was.
    pub fn begin_upload(&mut self, file: &ImageFile) -> Result<PendingUpload, UploadError> {
        if self.upload_in_flight {
            return Err(UploadError::InFlight);
        }
        validate_image(file)?;

        let token = attempt_token(self.token_seq);
        self.token_seq += 1;
        let placeholder = placeholder_markup(&token);
        let insert_offset = self.cursor.min(self.buffer.len_chars());

        self.insert_at_cursor(&placeholder);
        self.upload_in_flight = true;

        tracing::debug!(%token, file = %file.name, "upload started");
        Ok(PendingUpload {
            token,
            placeholder,
            insert_offset,
            file_name: file.name.clone(),
        })
    }

    /// Resolution phase: patch the buffer and release the in-flight flag.
    ///
    /// Success replaces the exact placeholder substring with the final image
    /// reference; failure removes it and surfaces the reason. Either way the
    /// flag is cleared and a resize is queued before returning, so one
    /// failed upload can never lock out the next.
    ///
    /// If the user edited the placeholder away while the upload was pending,
    /// the patch is a no-op (the orphaned text stays as-is).
    pub fn finish_upload(
        &mut self,
        pending: PendingUpload,
        outcome: Result<UploadedImage, UploadError>,
        notifier: &impl Notifier,
    ) -> bool {
        let ok = match outcome {
            Ok(image) => {
                let reference = image_reference(&pending.file_name, &image.url);
                if self.buffer.replace_first(&pending.placeholder, &reference) {
                    tracing::debug!(token = %pending.token, url = %image.url, "upload resolved");
                } else {
                    tracing::warn!(token = %pending.token, "placeholder edited away; skipping patch");
                }
                true
            }
            Err(err) => {
                if !self.buffer.remove_first(&pending.placeholder) {
                    tracing::warn!(token = %pending.token, "placeholder edited away; nothing to roll back");
                }
                notifier.notify(
                    &format!("Image upload failed: {err}. Please try again."),
                    Severity::Error,
                );
                false
            }
        };

        self.upload_in_flight = false;
        self.bump();
        self.queue_resize();
        ok
    }

    /// The single upload routine both entry points funnel into.
    ///
    /// Returns true when the buffer now holds a final image reference. A
    /// request while another upload is in flight is silently dropped;
    /// validation failures notify the user and mutate nothing.
    pub async fn upload_and_insert(
        &mut self,
        uploader: &impl ImageUploader,
        notifier: &impl Notifier,
        file: ImageFile,
    ) -> bool {
        let pending = match self.begin_upload(&file) {
            Ok(pending) => pending,
            Err(UploadError::InFlight) => {
                tracing::debug!(file = %file.name, "upload already in flight, dropping request");
                return false;
            }
            Err(err) => {
                notifier.notify(&err.to_string(), Severity::Error);
                return false;
            }
        };

        let outcome = uploader.upload(&file).await;
        self.finish_upload(pending, outcome, notifier)
    }

    /// File-picker entry point. The returned marker obliges the host to
    /// clear the picker's selection afterwards.
    pub async fn handle_file_pick(
        &mut self,
        uploader: &impl ImageUploader,
        notifier: &impl Notifier,
        file: ImageFile,
    ) -> PickerReset {
        self.upload_and_insert(uploader, notifier, file).await;
        PickerReset
    }

    /// Clipboard-paste entry point. Returns true when the default paste was
    /// suppressed in favor of an image upload.
    pub async fn handle_paste(
        &mut self,
        uploader: &impl ImageUploader,
        notifier: &impl Notifier,
        items: Vec<ClipboardItem>,
    ) -> bool {
        match paste_action(items) {
            PasteAction::UploadImage(file) => {
                self.upload_and_insert(uploader, notifier, file).await;
                true
            }
            PasteAction::Default => false,
        }
    }
}
