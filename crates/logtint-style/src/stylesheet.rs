#![forbid(unsafe_code)]

//! StyleSheet registry for named styles.
//!
//! Decoration palettes are looked up by name, so a host can restyle severity
//! labels or string literals without touching the decoration rules.
//!
//! # Example
//! ```
//! use logtint_style::{Rgb, Style, StyleSheet};
//!
//! let mut sheet = StyleSheet::new();
//! sheet.define("severity.error", Style::new().fg(Rgb::RED).bold());
//!
//! assert_eq!(sheet.get("severity.error").and_then(|s| s.fg), Some(Rgb::RED));
//! assert!(sheet.get("severity.fatal").is_none());
//! ```

use std::collections::BTreeMap;

use crate::color::Rgb;
use crate::style::Style;

/// Style name for error labels.
pub const SEVERITY_ERROR: &str = "severity.error";
/// Style name for warning labels.
pub const SEVERITY_WARNING: &str = "severity.warning";
/// Style name for note labels.
pub const SEVERITY_NOTE: &str = "severity.note";
/// Style name for debug labels.
pub const SEVERITY_DEBUG: &str = "severity.debug";
/// Style name for trace labels.
pub const SEVERITY_TRACE: &str = "severity.trace";
/// Style name for quoted string literals.
pub const LITERAL_STRING: &str = "literal.string";

/// A registry of named styles.
///
/// Names are kept sorted so iteration order is stable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleSheet {
    styles: BTreeMap<String, Style>,
}

impl StyleSheet {
    /// Create a new empty StyleSheet.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// The log dialog palette.
    ///
    /// Severity labels are bold on a white background:
    /// - `severity.error`: red
    /// - `severity.warning`: dark red
    /// - `severity.note`: black
    /// - `severity.debug`: blue-ish (100, 100, 200)
    /// - `severity.trace`: tan (200, 150, 100)
    ///
    /// Quoted literals (`literal.string`) are dark green.
    #[must_use]
    pub fn with_defaults() -> Self {
        let label = Style::new().bold().bg(Rgb::WHITE).fg(Rgb::BLACK);

        let mut sheet = Self::new();
        sheet.define(SEVERITY_ERROR, label.fg(Rgb::RED));
        sheet.define(SEVERITY_WARNING, label.fg(Rgb::DARK_RED));
        sheet.define(SEVERITY_NOTE, label);
        sheet.define(SEVERITY_DEBUG, label.fg(Rgb::new(100, 100, 200)));
        sheet.define(SEVERITY_TRACE, label.fg(Rgb::new(200, 150, 100)));
        sheet.define(LITERAL_STRING, Style::new().fg(Rgb::DARK_GREEN));
        sheet
    }

    /// Define a named style.
    ///
    /// If a style with this name already exists, it is replaced.
    pub fn define(&mut self, name: impl Into<String>, style: Style) {
        self.styles.insert(name.into(), style);
    }

    /// Remove a named style.
    pub fn remove(&mut self, name: &str) -> Option<Style> {
        self.styles.remove(name)
    }

    /// Get a named style.
    pub fn get(&self, name: &str) -> Option<Style> {
        self.styles.get(name).copied()
    }

    /// Get a named style, returning an empty style if not found.
    pub fn get_or_default(&self, name: &str) -> Style {
        self.get(name).unwrap_or_default()
    }

    /// Check if a style with the given name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.styles.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    /// All style names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.styles.keys().map(String::as_str)
    }
}
