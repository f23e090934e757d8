#![forbid(unsafe_code)]

//! Text handling for logtint.
//!
//! This crate provides the scanning primitives the decorators run on:
//! - [`TextBuffer`] - owned log text with a generation counter and style runs
//! - [`Cursor`] - ownership-free position/selection over a buffer generation
//! - [`Pattern`] - compiled, line-scoped search pattern
//! - [`StyleRuns`] - non-overlapping style assignment over byte ranges
//! - [`LineMatches`] - per-line match cache for long backward scans
//!
//! # Example
//! ```
//! use logtint_style::Style;
//! use logtint_text::{Pattern, TextBuffer};
//!
//! let mut buffer = TextBuffer::from("Note: a\nError: b\n");
//! let pattern = Pattern::new(r"^.*?: ").unwrap();
//!
//! // Walk matches from the end toward the start.
//! let mut cursor = buffer.cursor_at_end();
//! let mut seen = Vec::new();
//! loop {
//!     cursor = buffer.find_previous(&cursor, &pattern);
//!     let Some(text) = buffer.selected_text(&cursor) else { break };
//!     seen.push(text.to_string());
//!     buffer.apply_style(&cursor, Style::new().bold());
//! }
//! assert_eq!(seen, ["Error: ", "Note: "]);
//! assert_eq!(buffer.styles().len(), 2);
//! ```

pub mod buffer;
pub mod cursor;
pub mod lines;
pub mod pattern;
pub mod runs;
pub mod search;

pub use buffer::TextBuffer;
pub use cursor::{Cursor, Match};
pub use lines::LineIndex;
pub use pattern::{Pattern, PatternError};
pub use runs::StyleRuns;
pub use search::{LineMatches, SearchResult, search_backward, search_forward};
