//! Collaborator traits for rendering, notification, and iconography.
//!
//! These traits abstract over external concerns the widget cannot own:
//! - Turning markup source into display markup (the render collaborator)
//! - Reporting errors to the user (the notify capability)
//! - Materializing icon-bearing elements after layout changes
//!
//! Implementations are provided by the consuming application.

use crate::error::RenderError;
use crate::types::Severity;

/// Fixed fragment shown by the preview pane when the buffer is empty.
pub const EMPTY_PREVIEW: &str =
    r#"<p class="preview-empty">Preview area - start typing to see rendered output...</p>"#;

/// Renders markup source to display markup.
///
/// Treated as a pure function by the widget. Failures are recovered in
/// [`render_preview`] and never reach the user.
pub trait MarkupRenderer {
    fn render(&self, text: &str) -> Result<String, RenderError>;
}

/// Unit type implementation - raw passthrough, for hosts without a renderer.
impl MarkupRenderer for () {
    fn render(&self, text: &str) -> Result<String, RenderError> {
        Ok(text.to_string())
    }
}

/// Reports a user-facing message. Decoupled from the presentation mechanism
/// (alert dialog, toast, status line).
pub trait Notifier {
    fn notify(&self, message: &str, severity: Severity);
}

/// Unit type implementation - discards notifications.
impl Notifier for () {
    fn notify(&self, _message: &str, _severity: Severity) {}
}

/// Materializes icon-bearing elements introduced by a layout change.
pub trait IconRefresher {
    fn refresh_icons(&self);
}

/// Unit type implementation - no iconography.
impl IconRefresher for () {
    fn refresh_icons(&self) {}
}

impl<T: MarkupRenderer> MarkupRenderer for &T {
    fn render(&self, text: &str) -> Result<String, RenderError> {
        (*self).render(text)
    }
}

impl<T: Notifier> Notifier for &T {
    fn notify(&self, message: &str, severity: Severity) {
        (*self).notify(message, severity)
    }
}

impl<T: IconRefresher> IconRefresher for &T {
    fn refresh_icons(&self) {
        (*self).refresh_icons()
    }
}

/// Render `text` for the preview pane, recovering from every failure.
///
/// Empty input yields the fixed [`EMPTY_PREVIEW`] fragment. A renderer error
/// is logged for the operator and degrades to the raw input text unchanged;
/// it never propagates.
pub fn render_preview<R: MarkupRenderer>(renderer: &R, text: &str) -> String {
    if text.is_empty() {
        return EMPTY_PREVIEW.to_string();
    }
    match renderer.render(text) {
        Ok(markup) => markup,
        Err(err) => {
            tracing::error!("markup render failed: {err}");
            text.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct UpcaseRenderer;

    impl MarkupRenderer for UpcaseRenderer {
        fn render(&self, text: &str) -> Result<String, RenderError> {
            Ok(text.to_uppercase())
        }
    }

    struct FailingRenderer;

    impl MarkupRenderer for FailingRenderer {
        fn render(&self, _text: &str) -> Result<String, RenderError> {
            Err("parser exploded".into())
        }
    }

    #[test]
    fn test_empty_input_yields_placeholder() {
        assert_eq!(render_preview(&UpcaseRenderer, ""), EMPTY_PREVIEW);
        assert_eq!(render_preview(&FailingRenderer, ""), EMPTY_PREVIEW);
    }

    #[test]
    fn test_render_passthrough() {
        assert_eq!(render_preview(&UpcaseRenderer, "hi"), "HI");
        assert_eq!(render_preview(&(), "# raw"), "# raw");
    }

    #[test]
    fn test_failure_degrades_to_raw_text() {
        // The error never escapes; caller sees the input unchanged.
        assert_eq!(render_preview(&FailingRenderer, "# title"), "# title");
    }
}
