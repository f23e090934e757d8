#![forbid(unsafe_code)]

//! Byte offsets of line starts.

use std::ops::Range;

/// Line-start offsets for a text, rebuilt whenever the text is replaced.
///
/// A text of `n` newlines has `n + 1` lines; the last one may be empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex {
    starts: Vec<usize>,
    len: usize,
}

impl LineIndex {
    /// Index the line starts of `text`.
    pub fn build(text: &str) -> Self {
        let mut starts = Vec::with_capacity(text.len() / 64 + 1);
        starts.push(0);
        starts.extend(memchr::memchr_iter(b'\n', text.as_bytes()).map(|nl| nl + 1));
        Self {
            starts,
            len: text.len(),
        }
    }

    /// Number of lines.
    #[inline]
    pub fn line_count(&self) -> usize {
        self.starts.len()
    }

    /// Line containing `offset`. Offsets past the end clamp to the last line.
    pub fn line_of(&self, offset: usize) -> usize {
        let offset = offset.min(self.len);
        self.starts.partition_point(|&start| start <= offset) - 1
    }

    /// Byte range of line `idx`, excluding its line break.
    pub fn line_range(&self, idx: usize) -> Option<Range<usize>> {
        let start = *self.starts.get(idx)?;
        let end = match self.starts.get(idx + 1) {
            Some(next) => next - 1,
            None => self.len,
        };
        Some(start..end)
    }
}

impl Default for LineIndex {
    fn default() -> Self {
        Self::build("")
    }
}
