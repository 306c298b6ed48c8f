//! View-mode state machine: edit, preview, split, fullscreen.
//!
//! Four coupled booleans collapse to four reachable composite states.
//! Invariants:
//! - preview and split are never both true (enabling one disables the other)
//! - exiting fullscreen forces split off
//!
//! All transitions are total: toggles never fail and have no I/O side
//! effects of their own. Layout side effects (resize, focus, icon refresh)
//! are queued by the widget as post-render callbacks.

use crate::surface::TextSurface;

/// Minimum text surface height, in pixels.
pub const MIN_SURFACE_HEIGHT: u32 = 200;

/// Composite readout of the mutually-constrained flags.
#[derive(Clone, Debug, Copy, PartialEq, Eq)]
pub enum ViewMode {
    /// Raw edit surface only.
    Edit,
    /// Rendered preview only.
    Preview,
    /// Edit surface and preview side by side.
    Split,
}

/// The display-mode flags owned by the widget.
#[derive(Clone, Debug, Copy, PartialEq, Eq, Default)]
pub struct ViewModeState {
    preview: bool,
    split: bool,
    fullscreen: bool,
}

impl ViewModeState {
    pub fn is_preview(&self) -> bool {
        self.preview
    }

    pub fn is_split(&self) -> bool {
        self.split
    }

    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    /// The composite mode, ignoring the orthogonal fullscreen flag.
    pub fn mode(&self) -> ViewMode {
        if self.preview {
            ViewMode::Preview
        } else if self.split {
            ViewMode::Split
        } else {
            ViewMode::Edit
        }
    }

    /// Whether the raw edit surface is currently visible.
    pub fn shows_editor(&self) -> bool {
        !self.preview
    }

    /// Flip preview. Enabling preview disables split view.
    pub fn toggle_preview(&mut self) {
        self.preview = !self.preview;
        if self.preview {
            self.split = false;
        }
    }

    /// Flip split view. Enabling split disables full preview.
    ///
    /// Returns true when split was just enabled, in which case the surface
    /// height must be recalculated on the next render pass (the layout
    /// change can alter the intrinsic content height).
    pub fn toggle_split_view(&mut self) -> bool {
        self.split = !self.split;
        if self.split {
            self.preview = false;
        }
        self.split
    }

    /// Flip fullscreen. Exiting fullscreen forces split view off.
    ///
    /// Returns true when fullscreen was just exited.
    pub fn toggle_full_screen(&mut self) -> bool {
        self.fullscreen = !self.fullscreen;
        if !self.fullscreen {
            self.split = false;
            return true;
        }
        false
    }

    /// Recompute the surface height to fit its content, floored at
    /// [`MIN_SURFACE_HEIGHT`].
    ///
    /// Skipped entirely in fullscreen: that layout pins the surface with
    /// fixed positioning instead of intrinsic sizing.
    pub fn auto_resize(&self, surface: &mut dyn TextSurface) {
        if self.fullscreen {
            return;
        }
        surface.set_height(surface.content_height().max(MIN_SURFACE_HEIGHT));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::FakeSurface;

    #[test]
    fn test_preview_and_split_mutually_exclusive() {
        let mut view = ViewModeState::default();

        view.toggle_split_view();
        assert!(view.is_split());

        view.toggle_preview();
        assert!(view.is_preview());
        assert!(!view.is_split());

        view.toggle_split_view();
        assert!(view.is_split());
        assert!(!view.is_preview());
    }

    #[test]
    fn test_exhaustive_toggle_sequences_hold_invariant() {
        // Every toggle sequence of length <= 8 over the three operations.
        fn step(view: &mut ViewModeState, op: u8) {
            match op {
                0 => view.toggle_preview(),
                1 => {
                    view.toggle_split_view();
                }
                _ => {
                    view.toggle_full_screen();
                }
            }
        }

        let mut stack = vec![(ViewModeState::default(), 0u32)];
        while let Some((view, depth)) = stack.pop() {
            assert!(
                !(view.is_preview() && view.is_split()),
                "preview and split both true after some sequence"
            );
            if depth < 8 {
                for op in 0..3 {
                    let mut next = view;
                    step(&mut next, op);
                    stack.push((next, depth + 1));
                }
            }
        }
    }

    #[test]
    fn test_exit_fullscreen_clears_split() {
        let mut view = ViewModeState::default();
        view.toggle_full_screen();
        view.toggle_split_view();
        assert!(view.is_split());

        let exited = view.toggle_full_screen();
        assert!(exited);
        assert!(!view.is_fullscreen());
        assert!(!view.is_split());
    }

    #[test]
    fn test_mode_readout() {
        let mut view = ViewModeState::default();
        assert_eq!(view.mode(), ViewMode::Edit);
        assert!(view.shows_editor());

        view.toggle_preview();
        assert_eq!(view.mode(), ViewMode::Preview);
        assert!(!view.shows_editor());

        view.toggle_split_view();
        assert_eq!(view.mode(), ViewMode::Split);
        assert!(view.shows_editor());
    }

    #[test]
    fn test_auto_resize_floors_at_minimum() {
        let mut surface = FakeSurface::new("one line");
        let view = ViewModeState::default();
        view.auto_resize(&mut surface);
        assert_eq!(surface.height(), MIN_SURFACE_HEIGHT);
    }

    #[test]
    fn test_auto_resize_tracks_content() {
        let tall = "line\n".repeat(40);
        let mut surface = FakeSurface::new(&tall);
        let view = ViewModeState::default();
        view.auto_resize(&mut surface);
        assert!(surface.height() > MIN_SURFACE_HEIGHT);
        assert_eq!(surface.height(), surface.content_height());
    }

    #[test]
    fn test_auto_resize_skipped_in_fullscreen() {
        let mut surface = FakeSurface::new("text");
        let mut view = ViewModeState::default();
        view.toggle_full_screen();
        view.auto_resize(&mut surface);
        // Height untouched: fullscreen layout is fixed-position.
        assert_eq!(surface.height(), 0);
    }
}
