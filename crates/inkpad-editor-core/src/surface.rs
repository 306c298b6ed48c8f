//! Platform abstraction for the text-input surface.
//!
//! `TextSurface` is the interface between the widget logic and whatever
//! hosts the actual text input (a DOM textarea, a native text view, a test
//! double). The widget never touches platform handles directly.
//!
//! `FrameQueue` models the deferred-continuation pattern: buffer mutations
//! happen synchronously, then selection/focus restoration runs as a plain
//! callback after the host's render pass completes. The host drains the
//! queue once per render via [`crate::widget::MarkdownEditor::run_post_render`].

use crate::types::Selection;

/// Operations the widget needs from the host's text input.
///
/// Selection offsets are char offsets into the surface's current value.
pub trait TextSurface {
    /// Current text value of the input, read live.
    fn value(&self) -> String;

    /// Current selection bounds.
    fn selection(&self) -> Selection;

    /// Set the selection (collapsed when start == end).
    fn set_selection(&mut self, start: usize, end: usize);

    /// Give the input keyboard focus.
    fn focus(&mut self);

    /// Set the visible height, in pixels.
    fn set_height(&mut self, px: u32);

    /// Intrinsic height of the current content, in pixels.
    fn content_height(&self) -> u32;
}

/// Collaborators available to post-render callbacks.
pub struct PostRender<'a> {
    pub surface: &'a mut dyn TextSurface,
    pub icons: &'a dyn crate::render::IconRefresher,
}

type PostRenderFn = Box<dyn FnOnce(&mut PostRender<'_>)>;

/// Callbacks queued to run after the next render pass.
#[derive(Default)]
pub struct FrameQueue {
    queue: Vec<PostRenderFn>,
}

impl FrameQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a callback for the next render pass.
    pub fn push(&mut self, f: impl FnOnce(&mut PostRender<'_>) + 'static) {
        self.queue.push(Box::new(f));
    }

    /// Number of pending callbacks.
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Run and discard all pending callbacks, in queue order.
    pub fn drain(&mut self, pass: &mut PostRender<'_>) {
        for f in std::mem::take(&mut self.queue) {
            f(pass);
        }
    }
}

/// Line height used by [`FakeSurface`] to derive content height.
const FAKE_LINE_HEIGHT: u32 = 24;

/// In-memory `TextSurface` for tests and headless hosts.
///
/// Content height is derived as 24px per line, so resize behavior is
/// deterministic without a layout engine.
#[derive(Clone, Debug, Default)]
pub struct FakeSurface {
    value: String,
    selection: Selection,
    height: u32,
    focus_count: u32,
}

impl FakeSurface {
    pub fn new(value: &str) -> Self {
        Self {
            value: value.to_string(),
            ..Self::default()
        }
    }

    /// Replace the value, simulating host-side (out-of-band) edits.
    pub fn set_value(&mut self, value: &str) {
        self.value = value.to_string();
    }

    /// Height last applied via `set_height` (0 before any resize).
    pub fn height(&self) -> u32 {
        self.height
    }

    /// How many times `focus` was called.
    pub fn focus_count(&self) -> u32 {
        self.focus_count
    }
}

impl TextSurface for FakeSurface {
    fn value(&self) -> String {
        self.value.clone()
    }

    fn selection(&self) -> Selection {
        self.selection
    }

    fn set_selection(&mut self, start: usize, end: usize) {
        self.selection = Selection::new(start, end);
    }

    fn focus(&mut self) {
        self.focus_count += 1;
    }

    fn set_height(&mut self, px: u32) {
        self.height = px;
    }

    fn content_height(&self) -> u32 {
        let lines = self.value.split('\n').count() as u32;
        lines * FAKE_LINE_HEIGHT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_queue_runs_in_order() {
        let mut queue = FrameQueue::new();
        queue.push(|pass| pass.surface.set_selection(1, 2));
        queue.push(|pass| pass.surface.focus());
        assert_eq!(queue.len(), 2);

        let mut surface = FakeSurface::new("abc");
        let mut pass = PostRender {
            surface: &mut surface,
            icons: &(),
        };
        queue.drain(&mut pass);

        assert!(queue.is_empty());
        assert_eq!(surface.selection(), Selection::new(1, 2));
        assert_eq!(surface.focus_count(), 1);
    }

    #[test]
    fn test_fake_surface_content_height() {
        let surface = FakeSurface::new("a\nb\nc");
        assert_eq!(surface.content_height(), 3 * FAKE_LINE_HEIGHT);
    }
}
