#![forbid(unsafe_code)]

//! Line-scoped pattern search in both directions.
//!
//! # Example
//! ```
//! use logtint_text::{LineIndex, Pattern, search_backward, search_forward};
//!
//! let text = "say \"hi\"\nsay 'bye'";
//! let lines = LineIndex::build(text);
//! let literal = Pattern::new(r#""[^"]*"|'[^']*'"#).unwrap();
//!
//! let all = search_forward(text, &lines, &literal);
//! assert_eq!(all.len(), 2);
//!
//! let last = search_backward(text, &lines, &literal, text.len()).unwrap();
//! assert_eq!(last.text(text), "'bye'");
//! ```

use std::ops::Range;

use crate::lines::LineIndex;
use crate::pattern::Pattern;

/// A single search match with its byte range in the source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    /// Byte offset range of the match in the source string.
    pub range: Range<usize>,
}

impl SearchResult {
    /// Create a new search result.
    #[must_use]
    pub fn new(start: usize, end: usize) -> Self {
        Self { range: start..end }
    }

    /// Extract the matched text from the source.
    #[must_use]
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        &source[self.range.clone()]
    }
}

/// Nearest non-empty match ending at or before `limit`.
///
/// Lines are searched from the one containing `limit` toward the start of the
/// text. The candidates of a line are its leftmost-first matches, the same ones
/// [`search_forward`] reports, and the last one ending at or before `limit`
/// wins. Because the match is non-empty, its start is strictly less than
/// `limit`. `limit` need not sit on a char boundary.
///
/// Each call searches a whole line. Use [`LineMatches`] to scan a long line
/// match by match.
#[must_use]
pub fn search_backward(
    text: &str,
    lines: &LineIndex,
    pattern: &Pattern,
    limit: usize,
) -> Option<SearchResult> {
    if text.is_empty() {
        return None;
    }
    let limit = limit.min(text.len());
    let mut line = lines.line_of(limit);
    loop {
        let range = lines.line_range(line)?;
        if range.start < limit {
            let found = pattern
                .all_in_line(&text[range.clone()])
                .take_while(|m| range.start + m.end <= limit)
                .last();
            if let Some(found) = found {
                return Some(SearchResult::new(
                    range.start + found.start,
                    range.start + found.end,
                ));
            }
        }
        if line == 0 {
            return None;
        }
        line -= 1;
    }
}

/// Matches of the line a backward scan is currently in.
///
/// [`LineMatches::previous`] returns what [`search_backward`] returns, but
/// searches each line once and hands its matches out from the back while
/// the limit keeps moving toward the start of the text. A full backward scan
/// then costs one forward pass per line, however many matches a line holds.
///
/// The cached matches belong to one text and one pattern. Call
/// [`LineMatches::clear`] when either changes;
/// [`TextBuffer::find_previous_cached`](crate::TextBuffer::find_previous_cached)
/// does that on its own.
#[derive(Debug, Clone, Default)]
pub struct LineMatches {
    line: Option<usize>,
    /// Every cached match ends at or before this offset.
    limit: usize,
    matches: Vec<Range<usize>>,
    generation: u64,
    source: String,
    lines_searched: u64,
}

impl LineMatches {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop the cached line.
    pub fn clear(&mut self) {
        self.line = None;
        self.matches.clear();
    }

    /// Lines searched since this cache was created.
    #[inline]
    pub fn lines_searched(&self) -> u64 {
        self.lines_searched
    }

    /// Clear unless the cache already belongs to `generation` and `pattern`.
    pub(crate) fn bind(&mut self, generation: u64, pattern: &Pattern) {
        if self.generation != generation || self.source != pattern.as_str() {
            self.clear();
            self.generation = generation;
            self.source.clear();
            self.source.push_str(pattern.as_str());
        }
    }

    /// Nearest non-empty match ending at or before `limit`.
    pub fn previous(
        &mut self,
        text: &str,
        lines: &LineIndex,
        pattern: &Pattern,
        limit: usize,
    ) -> Option<SearchResult> {
        let limit = limit.min(text.len());
        if limit > self.limit {
            self.clear();
        }
        self.limit = limit;

        let mut line = lines.line_of(limit);
        loop {
            if self.line != Some(line) {
                let range = lines.line_range(line)?;
                self.matches.clear();
                self.matches.extend(
                    pattern
                        .all_in_line(&text[range.clone()])
                        .map(|m| range.start + m.start..range.start + m.end),
                );
                self.line = Some(line);
                self.lines_searched += 1;
            }
            while self.matches.last().is_some_and(|m| m.end > limit) {
                self.matches.pop();
            }
            if let Some(found) = self.matches.pop() {
                self.limit = found.start;
                return Some(SearchResult { range: found });
            }
            if line == 0 {
                return None;
            }
            line -= 1;
        }
    }
}

/// All non-empty matches, line by line, left to right.
#[must_use]
pub fn search_forward(text: &str, lines: &LineIndex, pattern: &Pattern) -> Vec<SearchResult> {
    let mut results = Vec::new();
    for line in 0..lines.line_count() {
        let Some(range) = lines.line_range(line) else {
            break;
        };
        let haystack = &text[range.clone()];
        results.extend(
            pattern
                .all_in_line(haystack)
                .map(|m| SearchResult::new(range.start + m.start, range.start + m.end)),
        );
    }
    results
}

#[cfg(test)]
mod tests {
    use super::*;

    fn severity() -> Pattern {
        Pattern::new(r"^.*?: ").unwrap()
    }

    fn literal() -> Pattern {
        Pattern::new(r#""[^"]*"|'[^']*'"#).unwrap()
    }

    fn backward_all(text: &str, pattern: &Pattern) -> Vec<Range<usize>> {
        let lines = LineIndex::build(text);
        let mut limit = text.len();
        let mut out = Vec::new();
        while let Some(found) = search_backward(text, &lines, pattern, limit) {
            assert!(found.range.start < limit);
            limit = found.range.start;
            out.push(found.range);
        }
        out
    }

    #[test]
    fn empty_text_never_matches() {
        let lines = LineIndex::build("");
        assert_eq!(search_backward("", &lines, &severity(), 0), None);
        assert!(search_forward("", &lines, &severity()).is_empty());
    }

    #[test]
    fn backward_visits_lines_in_reverse() {
        let text = "Error: a\nplain\nNote: b\n";
        assert_eq!(backward_all(text, &severity()), vec![15..21, 0..7]);
    }

    #[test]
    fn severity_stops_at_first_colon_space() {
        let text = "Warning: x: y";
        assert_eq!(backward_all(text, &severity()), vec![0..9]);
    }

    #[test]
    fn literals_within_a_line_in_reverse() {
        let text = r#"a "b" c 'd' "e""#;
        let found = backward_all(text, &literal());
        let texts: Vec<_> = found.iter().map(|r| &text[r.clone()]).collect();
        assert_eq!(texts, ["\"e\"", "'d'", "\"b\""]);
    }

    #[test]
    fn literal_does_not_cross_lines() {
        let text = "open \"quote\nclosed\" here";
        assert!(backward_all(text, &literal()).is_empty());
    }

    #[test]
    fn limit_inside_match_excludes_it() {
        let text = "x \"abc\"";
        let lines = LineIndex::build(text);
        assert_eq!(search_backward(text, &lines, &literal(), 5), None);
        assert_eq!(
            search_backward(text, &lines, &literal(), 7),
            Some(SearchResult::new(2, 7))
        );
    }

    #[test]
    fn forward_and_backward_agree() {
        let text = "Note: \"a\" and 'b'\nError: 'c'\n\nDebug: \"\"";
        let lines = LineIndex::build(text);
        let mut forward: Vec<_> = search_forward(text, &lines, &literal())
            .into_iter()
            .map(|r| r.range)
            .collect();
        forward.reverse();
        assert_eq!(forward, backward_all(text, &literal()));
    }

    fn cached_all(text: &str, pattern: &Pattern, cache: &mut LineMatches) -> Vec<Range<usize>> {
        let lines = LineIndex::build(text);
        let mut limit = text.len();
        let mut out = Vec::new();
        while let Some(found) = cache.previous(text, &lines, pattern, limit) {
            limit = found.range.start;
            out.push(found.range);
        }
        out
    }

    #[test]
    fn limit_inside_a_char_does_not_panic() {
        let text = "'a' «ü» 'b'";
        let lines = LineIndex::build(text);
        // Offset 5 is the second byte of '«'.
        assert!(!text.is_char_boundary(5));
        assert_eq!(
            search_backward(text, &lines, &literal(), 5),
            Some(SearchResult::new(0, 3))
        );
        let mut cache = LineMatches::new();
        assert_eq!(
            cache.previous(text, &lines, &literal(), 5),
            Some(SearchResult::new(0, 3))
        );
    }

    #[test]
    fn long_line_is_searched_once() {
        let text = "'x' ".repeat(2_000);
        let mut cache = LineMatches::new();
        let found = cached_all(&text, &literal(), &mut cache);
        assert_eq!(found.len(), 2_000);
        assert_eq!(found.first(), Some(&(7_996..7_999)));
        assert_eq!(found.last(), Some(&(0..3)));
        assert_eq!(cache.lines_searched(), 1);
    }

    #[test]
    fn cache_visits_each_line_once() {
        let text = "Note: 'a' 'b'\n\nError: \"c\"\n";
        let mut cache = LineMatches::new();
        assert_eq!(cached_all(text, &literal(), &mut cache), backward_all(text, &literal()));
        assert_eq!(cache.lines_searched(), 4);
    }

    #[test]
    fn cache_answers_a_raised_limit() {
        let text = "'a' 'b' 'c'";
        let lines = LineIndex::build(text);
        let mut cache = LineMatches::new();
        assert_eq!(cache.previous(text, &lines, &literal(), 11), Some(SearchResult::new(8, 11)));
        assert_eq!(cache.previous(text, &lines, &literal(), 8), Some(SearchResult::new(4, 7)));
        // Asking again past a handed-out match finds it again.
        assert_eq!(cache.previous(text, &lines, &literal(), 11), Some(SearchResult::new(8, 11)));
        assert_eq!(cache.previous(text, &lines, &literal(), 11), Some(SearchResult::new(8, 11)));
    }

    #[test]
    fn bind_clears_on_new_pattern_or_generation() {
        let text = "Note: 'a'";
        let lines = LineIndex::build(text);
        let mut cache = LineMatches::new();
        cache.bind(1, &literal());
        assert_eq!(cache.previous(text, &lines, &literal(), 9), Some(SearchResult::new(6, 9)));

        cache.bind(1, &severity());
        assert_eq!(cache.previous(text, &lines, &severity(), 6), Some(SearchResult::new(0, 6)));

        cache.bind(2, &severity());
        assert_eq!(cache.previous(text, &lines, &severity(), 6), Some(SearchResult::new(0, 6)));
        assert_eq!(cache.lines_searched(), 3);
    }

    #[test]
    fn multibyte_text_keeps_char_boundaries() {
        let text = "Note: «ü» 'ß'";
        let found = backward_all(text, &literal());
        assert_eq!(found.len(), 1);
        assert_eq!(&text[found[0].clone()], "'ß'");
    }
}
