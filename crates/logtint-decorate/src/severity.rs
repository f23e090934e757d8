#![forbid(unsafe_code)]

//! Log severities and the labels that introduce them.

use std::fmt;
use std::str::FromStr;

use logtint_style::stylesheet;

/// Severity of a log line.
///
/// Variants are declared in classification priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Error,
    Warning,
    Note,
    Debug,
    Trace,
}

impl Severity {
    /// Every severity, highest priority first.
    pub const ALL: [Severity; 5] = [
        Severity::Error,
        Severity::Warning,
        Severity::Note,
        Severity::Debug,
        Severity::Trace,
    ];

    /// Lowercase name, as accepted by [`FromStr`].
    pub const fn name(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Note => "note",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }

    /// Name of this severity's entry in a [`StyleSheet`](logtint_style::StyleSheet).
    pub const fn style_name(self) -> &'static str {
        match self {
            Self::Error => stylesheet::SEVERITY_ERROR,
            Self::Warning => stylesheet::SEVERITY_WARNING,
            Self::Note => stylesheet::SEVERITY_NOTE,
            Self::Debug => stylesheet::SEVERITY_DEBUG,
            Self::Trace => stylesheet::SEVERITY_TRACE,
        }
    }

    const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a string names no severity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseSeverityError {
    input: String,
}

impl ParseSeverityError {
    /// The rejected input.
    pub fn input(&self) -> &str {
        &self.input
    }
}

impl fmt::Display for ParseSeverityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown severity {:?} (expected error, warning, note, debug or trace)",
            self.input
        )
    }
}

impl std::error::Error for ParseSeverityError {}

impl FromStr for Severity {
    type Err = ParseSeverityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|sev| sev.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ParseSeverityError {
                input: s.to_string(),
            })
    }
}

/// Provides the text that introduces each severity in the log.
pub trait SeverityLabels {
    /// Label a line of this severity starts with, e.g. `"Error"`.
    fn label_of(&self, severity: Severity) -> &str;
}

impl<T: SeverityLabels + ?Sized> SeverityLabels for &T {
    fn label_of(&self, severity: Severity) -> &str {
        (**self).label_of(severity)
    }
}

/// The untranslated labels: `Error`, `Warning`, `Note`, `Debug`, `Trace`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DefaultLabels;

impl SeverityLabels for DefaultLabels {
    fn label_of(&self, severity: Severity) -> &str {
        match severity {
            Severity::Error => "Error",
            Severity::Warning => "Warning",
            Severity::Note => "Note",
            Severity::Debug => "Debug",
            Severity::Trace => "Trace",
        }
    }
}

/// Owned labels with per-severity overrides, e.g. for a translated log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelTable {
    labels: [String; 5],
}

impl LabelTable {
    /// A table seeded from another provider.
    pub fn from_labels(labels: &impl SeverityLabels) -> Self {
        Self {
            labels: Severity::ALL.map(|sev| labels.label_of(sev).to_string()),
        }
    }

    /// Replace the label of one severity.
    pub fn set(&mut self, severity: Severity, label: impl Into<String>) {
        self.labels[severity.index()] = label.into();
    }

    /// Builder form of [`set`](Self::set).
    #[must_use]
    pub fn with(mut self, severity: Severity, label: impl Into<String>) -> Self {
        self.set(severity, label);
        self
    }
}

impl Default for LabelTable {
    fn default() -> Self {
        Self::from_labels(&DefaultLabels)
    }
}

impl SeverityLabels for LabelTable {
    fn label_of(&self, severity: Severity) -> &str {
        &self.labels[severity.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_is_in_priority_order() {
        let mut sorted = Severity::ALL;
        sorted.sort();
        assert_eq!(sorted, Severity::ALL);
        assert_eq!(Severity::ALL[0], Severity::Error);
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("Warning".parse::<Severity>(), Ok(Severity::Warning));
        assert_eq!(" TRACE ".parse::<Severity>(), Ok(Severity::Trace));
        for sev in Severity::ALL {
            assert_eq!(sev.to_string().parse::<Severity>(), Ok(sev));
        }
    }

    #[test]
    fn parse_error_names_input() {
        let err = "fatal".parse::<Severity>().unwrap_err();
        assert_eq!(err.input(), "fatal");
        assert!(err.to_string().contains("\"fatal\""));
    }

    #[test]
    fn style_names_match_default_sheet() {
        let sheet = logtint_style::StyleSheet::with_defaults();
        for sev in Severity::ALL {
            assert!(sheet.contains(sev.style_name()), "{sev}");
        }
    }

    #[test]
    fn label_table_overrides_one_label() {
        let table = LabelTable::default().with(Severity::Error, "Fehler");
        assert_eq!(table.label_of(Severity::Error), "Fehler");
        assert_eq!(table.label_of(Severity::Note), "Note");
        assert_eq!(DefaultLabels.label_of(Severity::Debug), "Debug");
    }
}
