#![forbid(unsafe_code)]

//! Ownership-free cursors over a [`TextBuffer`](crate::TextBuffer).
//!
//! A cursor is plain data: it remembers a position or selection and the buffer
//! generation it was produced from. It never borrows the buffer, so a
//! scheduler can keep one across event-loop turns. Once the buffer is
//! replaced the cursor is stale and every buffer operation treats it as null.

use std::ops::Range;

#[derive(Debug, Clone, PartialEq, Eq)]
enum CursorState {
    /// Bare position with no selection.
    At(usize),
    /// A selected match.
    Selection(Range<usize>),
    /// No more matches.
    Null,
}

/// A movable position or selection within one buffer generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cursor {
    generation: u64,
    state: CursorState,
}

impl Cursor {
    pub(crate) fn at(generation: u64, offset: usize) -> Self {
        Self {
            generation,
            state: CursorState::At(offset),
        }
    }

    pub(crate) fn selection(generation: u64, range: Range<usize>) -> Self {
        Self {
            generation,
            state: CursorState::Selection(range),
        }
    }

    /// A cursor that has run out of matches.
    pub fn null(generation: u64) -> Self {
        Self {
            generation,
            state: CursorState::Null,
        }
    }

    /// Whether the cursor has run out of matches.
    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self.state, CursorState::Null)
    }

    /// Buffer generation this cursor belongs to.
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Offset the next backward search starts from (exclusive).
    ///
    /// For a selection this is the selection start.
    pub fn position(&self) -> Option<usize> {
        match &self.state {
            CursorState::At(offset) => Some(*offset),
            CursorState::Selection(range) => Some(range.start),
            CursorState::Null => None,
        }
    }

    /// The selected span, if the cursor is over a match.
    pub fn selection_range(&self) -> Option<Range<usize>> {
        match &self.state {
            CursorState::Selection(range) => Some(range.clone()),
            _ => None,
        }
    }
}

/// A located span and its text, valid until the buffer is replaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match<'a> {
    /// Byte range of the match.
    pub range: Range<usize>,
    /// Matched text.
    pub text: &'a str,
}
