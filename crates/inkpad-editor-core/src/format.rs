//! Selection-wrapping helpers for toolbar formatting.
//!
//! The pure splice computation lives here; the widget layers the live
//! surface read and the post-render selection restore on top.

use crate::types::Selection;

/// Toolbar formatting presets. Each funnels into `wrap_selection` with its
/// markdown token pair.
#[derive(Clone, Debug, Copy, PartialEq, Eq)]
pub enum Format {
    Bold,
    Italic,
    Code,
    Strikethrough,
    Link,
}

impl Format {
    /// The `(before, after)` token pair spliced around the selection.
    pub fn tokens(&self) -> (&'static str, &'static str) {
        match self {
            Self::Bold => ("**", "**"),
            Self::Italic => ("*", "*"),
            Self::Code => ("`", "`"),
            Self::Strikethrough => ("~~", "~~"),
            Self::Link => ("[", "](url)"),
        }
    }
}

/// Splice `before + selected + after` into `text` at the selection bounds.
///
/// Returns the new full text and the restored selection: the originally
/// selected span, shifted past `before`. Offsets are char offsets; the
/// selection is clamped to the text length so a stale selection from an
/// out-of-band edit cannot slice out of bounds.
///
/// A collapsed selection degenerates to inserting `before + after` with the
/// restored (collapsed) selection landing between them.
pub fn wrap_span(text: &str, selection: Selection, before: &str, after: &str) -> (String, Selection) {
    let len_chars = text.chars().count();
    let start = selection.start().min(len_chars);
    let end = selection.end().min(len_chars);

    let start_byte = char_to_byte(text, start);
    let end_byte = char_to_byte(text, end);
    let selected = &text[start_byte..end_byte];

    let mut out = String::with_capacity(text.len() + before.len() + after.len());
    out.push_str(&text[..start_byte]);
    out.push_str(before);
    out.push_str(selected);
    out.push_str(after);
    out.push_str(&text[end_byte..]);

    let new_start = start + before.chars().count();
    let new_end = new_start + (end - start);
    (out, Selection::new(new_start, new_end))
}

fn char_to_byte(text: &str, char_offset: usize) -> usize {
    text.char_indices()
        .nth(char_offset)
        .map(|(b, _)| b)
        .unwrap_or(text.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_word() {
        let (text, sel) = wrap_span("hello world", Selection::new(0, 5), "**", "**");
        assert_eq!(text, "**hello** world");
        assert_eq!(sel, Selection::new(2, 7));
    }

    #[test]
    fn test_wrap_empty_selection_in_empty_buffer() {
        let (text, sel) = wrap_span("", Selection::collapsed(0), "*", "*");
        assert_eq!(text, "**");
        assert_eq!(sel, Selection::collapsed(1));
    }

    #[test]
    fn test_wrap_collapsed_cursor_lands_between_tokens() {
        let (text, sel) = wrap_span("ab", Selection::collapsed(1), "`", "`");
        assert_eq!(text, "a``b");
        assert_eq!(sel, Selection::collapsed(2));
    }

    #[test]
    fn test_wrap_backward_selection_normalized() {
        let (text, sel) = wrap_span("hello world", Selection::new(11, 6), "~~", "~~");
        assert_eq!(text, "hello ~~world~~");
        assert_eq!(sel, Selection::new(8, 13));
    }

    #[test]
    fn test_wrap_multibyte() {
        // "héllo": selection [1,2) covers the two-byte 'é'.
        let (text, sel) = wrap_span("héllo", Selection::new(1, 2), "*", "*");
        assert_eq!(text, "h*é*llo");
        assert_eq!(sel, Selection::new(2, 3));
    }

    #[test]
    fn test_stale_selection_clamped() {
        let (text, sel) = wrap_span("ab", Selection::new(1, 10), "*", "*");
        assert_eq!(text, "a*b*");
        assert_eq!(sel, Selection::new(2, 3));
    }

    #[test]
    fn test_format_tokens() {
        assert_eq!(Format::Bold.tokens(), ("**", "**"));
        assert_eq!(Format::Link.tokens(), ("[", "](url)"));
    }
}
