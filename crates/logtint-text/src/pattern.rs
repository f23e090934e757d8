#![forbid(unsafe_code)]

//! Compiled search patterns.
//!
//! Matching itself is delegated to the `regex` crate. Patterns are applied to
//! one line at a time, so `^` anchors at every line start and no match can
//! cross a line break.

use std::fmt;
use std::ops::Range;
use std::str::FromStr;

use regex::Regex;

/// Error returned when a pattern fails to compile.
#[derive(Debug, Clone)]
pub struct PatternError {
    source: regex::Error,
}

impl fmt::Display for PatternError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid search pattern: {}", self.source)
    }
}

impl std::error::Error for PatternError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

/// A compiled, line-scoped search pattern.
#[derive(Debug, Clone)]
pub struct Pattern {
    regex: Regex,
}

impl Pattern {
    /// Compile a pattern.
    pub fn new(source: &str) -> Result<Self, PatternError> {
        Regex::new(source)
            .map(|regex| Self { regex })
            .map_err(|source| PatternError { source })
    }

    /// The pattern source.
    #[inline]
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    /// All non-empty matches in `line`, left to right, relative to `line`.
    pub(crate) fn all_in_line<'a>(
        &'a self,
        line: &'a str,
    ) -> impl Iterator<Item = Range<usize>> + 'a {
        self.regex
            .find_iter(line)
            .filter(|m| !m.is_empty())
            .map(|m| m.range())
    }
}

impl FromStr for Pattern {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl From<Regex> for Pattern {
    fn from(regex: Regex) -> Self {
        Self { regex }
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for Pattern {}
