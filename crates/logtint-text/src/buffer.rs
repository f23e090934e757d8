#![forbid(unsafe_code)]

//! The text buffer a log view displays.
//!
//! The buffer is replaced wholesale on every refresh and otherwise only gains
//! style assignments. Each replacement bumps the generation, which
//! invalidates every outstanding [`Cursor`].

use std::ops::Range;

use logtint_style::Style;
use tracing::trace;

use crate::cursor::{Cursor, Match};
use crate::lines::LineIndex;
use crate::pattern::Pattern;
use crate::runs::StyleRuns;
use crate::search::{LineMatches, search_backward};

/// Owned log text plus its style runs.
#[derive(Debug, Clone, Default)]
pub struct TextBuffer {
    text: String,
    lines: LineIndex,
    styles: StyleRuns,
    generation: u64,
}

impl TextBuffer {
    /// Create an empty buffer at generation 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Install new text, dropping all styles and invalidating cursors.
    ///
    /// Returns the new generation.
    pub fn replace(&mut self, text: impl Into<String>) -> u64 {
        self.text = text.into();
        self.lines = LineIndex::build(&self.text);
        self.styles.clear();
        self.generation = self.generation.wrapping_add(1);
        trace!(
            generation = self.generation,
            bytes = self.text.len(),
            lines = self.lines.line_count(),
            "text buffer replaced"
        );
        self.generation
    }

    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.text.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[inline]
    pub fn line_count(&self) -> usize {
        self.lines.line_count()
    }

    #[inline]
    pub fn styles(&self) -> &StyleRuns {
        &self.styles
    }

    /// Style applied at `offset`, if any.
    pub fn style_at(&self, offset: usize) -> Option<Style> {
        self.styles.style_at(offset)
    }

    /// Whether `cursor` was produced from the current text.
    #[inline]
    pub fn is_current(&self, cursor: &Cursor) -> bool {
        cursor.generation() == self.generation
    }

    /// A bare cursor at the final position.
    pub fn cursor_at_end(&self) -> Cursor {
        Cursor::at(self.generation, self.text.len())
    }

    /// Nearest match of `pattern` strictly before `cursor`.
    ///
    /// Returns a cursor selecting the match, or a null cursor if there is none
    /// or `cursor` is null or stale.
    pub fn find_previous(&self, cursor: &Cursor, pattern: &Pattern) -> Cursor {
        if !self.is_current(cursor) {
            return Cursor::null(cursor.generation());
        }
        let Some(limit) = cursor.position() else {
            return Cursor::null(self.generation);
        };
        match search_backward(&self.text, &self.lines, pattern, limit) {
            Some(found) => Cursor::selection(self.generation, found.range),
            None => Cursor::null(self.generation),
        }
    }

    /// [`find_previous`](Self::find_previous) for a scan that keeps stepping
    /// back with one pattern.
    ///
    /// `cache` holds the matches of the line the scan is in, so each line is
    /// searched once. It is cleared whenever the text or pattern changes.
    pub fn find_previous_cached(
        &self,
        cursor: &Cursor,
        pattern: &Pattern,
        cache: &mut LineMatches,
    ) -> Cursor {
        if !self.is_current(cursor) {
            return Cursor::null(cursor.generation());
        }
        let Some(limit) = cursor.position() else {
            return Cursor::null(self.generation);
        };
        cache.bind(self.generation, pattern);
        match cache.previous(&self.text, &self.lines, pattern, limit) {
            Some(found) => Cursor::selection(self.generation, found.range),
            None => Cursor::null(self.generation),
        }
    }

    /// Text spanned by a current, non-null cursor.
    pub fn selected_text(&self, cursor: &Cursor) -> Option<&str> {
        self.selection(cursor).map(|m| m.text)
    }

    /// Span and text selected by a current, non-null cursor.
    pub fn selection(&self, cursor: &Cursor) -> Option<Match<'_>> {
        if !self.is_current(cursor) {
            return None;
        }
        let range = cursor.selection_range()?;
        let text = self.text.get(range.clone())?;
        Some(Match { range, text })
    }

    /// Overwrite the style of the span selected by `cursor`.
    ///
    /// Returns `false` without touching the buffer when the cursor is stale,
    /// null, or has no selection.
    pub fn apply_style(&mut self, cursor: &Cursor, style: Style) -> bool {
        if !self.is_current(cursor) {
            return false;
        }
        let Some(range) = cursor.selection_range() else {
            return false;
        };
        self.styles.apply(range, style);
        true
    }

    /// Pieces of text with the style each carries, covering the whole buffer.
    pub fn segments(&self) -> impl Iterator<Item = (&str, Option<Style>)> + '_ {
        let mut runs = self.styles.iter().peekable();
        let mut pos = 0;
        std::iter::from_fn(move || {
            if pos >= self.text.len() {
                return None;
            }
            let piece: (Range<usize>, Option<Style>) = match runs.peek() {
                Some((range, style)) if range.start <= pos => {
                    let piece = (pos..range.end.min(self.text.len()), Some(*style));
                    runs.next();
                    piece
                }
                Some((range, _)) => (pos..range.start, None),
                None => (pos..self.text.len(), None),
            };
            pos = piece.0.end;
            Some((&self.text[piece.0], piece.1))
        })
    }
}

impl From<&str> for TextBuffer {
    fn from(text: &str) -> Self {
        let mut buffer = Self::new();
        buffer.replace(text);
        buffer
    }
}

impl From<String> for TextBuffer {
    fn from(text: String) -> Self {
        let mut buffer = Self::new();
        buffer.replace(text);
        buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use logtint_style::Rgb;
    use proptest::prelude::*;
    use tracing_test::traced_test;

    fn severity() -> Pattern {
        Pattern::new(r"^.*?: ").unwrap()
    }

    fn literal() -> Pattern {
        Pattern::new(r#""[^"]*"|'[^']*'"#).unwrap()
    }

    #[test]
    fn replace_bumps_generation_and_clears_styles() {
        let mut buffer = TextBuffer::from("Note: x");
        let first = buffer.generation();
        let cursor = buffer.find_previous(&buffer.cursor_at_end(), &severity());
        assert!(buffer.apply_style(&cursor, Style::new().bold()));
        assert!(!buffer.styles().is_empty());

        let second = buffer.replace("Error: y");
        assert_eq!(second, first + 1);
        assert!(buffer.styles().is_empty());
    }

    #[traced_test]
    #[test]
    fn replace_is_traced() {
        let mut buffer = TextBuffer::new();
        buffer.replace("Note: a\nError: b\n");
        assert!(logs_contain("text buffer replaced"));
        assert!(logs_contain("lines=3"));
    }

    #[test]
    fn stale_cursor_is_inert() {
        let mut buffer = TextBuffer::from("Note: x");
        let cursor = buffer.find_previous(&buffer.cursor_at_end(), &severity());
        assert_eq!(buffer.selected_text(&cursor), Some("Note: "));

        buffer.replace("Note: x");
        assert_eq!(buffer.selected_text(&cursor), None);
        assert!(!buffer.apply_style(&cursor, Style::new().bold()));
        assert!(buffer.styles().is_empty());
        assert!(buffer.find_previous(&cursor, &severity()).is_null());
    }

    #[test]
    fn cached_scan_follows_replacement() {
        let mut buffer = TextBuffer::from("'a' 'b'");
        let mut cache = LineMatches::new();
        let first = buffer.find_previous_cached(&buffer.cursor_at_end(), &literal(), &mut cache);
        assert_eq!(buffer.selected_text(&first), Some("'b'"));

        buffer.replace("'c' 'd' 'e'");
        assert!(buffer
            .find_previous_cached(&first, &literal(), &mut cache)
            .is_null());
        let fresh = buffer.find_previous_cached(&buffer.cursor_at_end(), &literal(), &mut cache);
        assert_eq!(buffer.selected_text(&fresh), Some("'e'"));
        let next = buffer.find_previous_cached(&fresh, &literal(), &mut cache);
        assert_eq!(buffer.selected_text(&next), Some("'d'"));
    }

    #[test]
    fn cursor_at_end_selects_nothing() {
        let mut buffer = TextBuffer::from("abc");
        let cursor = buffer.cursor_at_end();
        assert_eq!(cursor.position(), Some(3));
        assert_eq!(buffer.selected_text(&cursor), None);
        assert!(!buffer.apply_style(&cursor, Style::new()));
    }

    #[test]
    fn empty_buffer_goes_null_immediately() {
        let buffer = TextBuffer::new();
        let cursor = buffer.find_previous(&buffer.cursor_at_end(), &literal());
        assert!(cursor.is_null());
        assert!(buffer.find_previous(&cursor, &literal()).is_null());
    }

    #[test]
    fn selection_reports_span_and_text() {
        let buffer = TextBuffer::from("Note: saw \"hi\"\n");
        let cursor = buffer.find_previous(&buffer.cursor_at_end(), &literal());
        let found = buffer.selection(&cursor).unwrap();
        assert_eq!(found.range, 10..14);
        assert_eq!(found.text, "\"hi\"");
    }

    #[test]
    fn segments_cover_text_in_order() {
        let mut buffer = TextBuffer::from("Note: saw \"hi\"\n");
        let red = Style::new().fg(Rgb::RED);
        let green = Style::new().fg(Rgb::DARK_GREEN);
        let c = buffer.find_previous(&buffer.cursor_at_end(), &severity());
        buffer.apply_style(&c, red);
        let c = buffer.find_previous(&buffer.cursor_at_end(), &literal());
        buffer.apply_style(&c, green);

        let segments: Vec<_> = buffer.segments().collect();
        assert_eq!(
            segments,
            vec![
                ("Note: ", Some(red)),
                ("saw ", None),
                ("\"hi\"", Some(green)),
                ("\n", None),
            ]
        );
    }

    #[test]
    fn segments_of_empty_buffer() {
        assert_eq!(TextBuffer::new().segments().count(), 0);
    }

    proptest! {
        #[test]
        fn backward_scan_terminates_with_strictly_decreasing_positions(
            text in "[a-zA-Z:\"' \n]{0,200}"
        ) {
            let buffer = TextBuffer::from(text.as_str());
            for pattern in [severity(), literal()] {
                let mut cursor = buffer.cursor_at_end();
                let mut last = cursor.position().unwrap_or(0);
                let mut steps = 0usize;
                loop {
                    cursor = buffer.find_previous(&cursor, &pattern);
                    let Some(pos) = cursor.position() else { break };
                    prop_assert!(pos < last);
                    last = pos;
                    steps += 1;
                    prop_assert!(steps <= buffer.len());
                }
            }
        }

        #[test]
        fn segments_concatenate_to_text(text in "[a-z\"' \n:]{0,120}") {
            let mut buffer = TextBuffer::from(text.as_str());
            let mut cursor = buffer.cursor_at_end();
            loop {
                cursor = buffer.find_previous(&cursor, &literal());
                if cursor.is_null() { break; }
                buffer.apply_style(&cursor, Style::new().bold());
            }
            let joined: String = buffer.segments().map(|(s, _)| s).collect();
            prop_assert_eq!(joined, text);
        }
    }
}
