#![forbid(unsafe_code)]

//! Decoration rules: what to look for and how to style it.

use std::sync::LazyLock;

use logtint_style::{Style, StyleSheet, stylesheet};
use logtint_text::Pattern;
use regex::Regex;

use crate::severity::{Severity, SeverityLabels};

/// Line start through the first `": "`.
static SEVERITY_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^.*?: ").expect("severity pattern is valid"));

/// A double-quoted run without embedded `"`, or a single-quoted run without embedded `'`.
static LITERAL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""[^"]*"|'[^']*'"#).expect("literal pattern is valid"));

/// Which decoration a rule performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleKind {
    Severity,
    Literal,
}

impl RuleKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Severity => "severity",
            Self::Literal => "literal",
        }
    }
}

/// Styles the label that opens a line according to its severity.
#[derive(Debug, Clone)]
pub struct SeverityRule {
    pattern: Pattern,
    /// Highest priority first; empty labels are never stored.
    entries: Vec<(Severity, String, Style)>,
}

impl SeverityRule {
    /// Build from label text and the `severity.*` entries of `sheet`.
    ///
    /// Severities without a sheet entry are left undecorated.
    pub fn new(labels: &impl SeverityLabels, sheet: &StyleSheet) -> Self {
        Self::from_entries(Severity::ALL.into_iter().filter_map(|sev| {
            sheet
                .get(sev.style_name())
                .map(|style| (sev, labels.label_of(sev).to_string(), style))
        }))
    }

    /// Build from explicit `(severity, label, style)` entries in any order.
    pub fn from_entries(entries: impl IntoIterator<Item = (Severity, String, Style)>) -> Self {
        let mut entries: Vec<_> = entries
            .into_iter()
            .filter(|(_, label, _)| !label.is_empty())
            .collect();
        entries.sort_by_key(|(sev, _, _)| *sev);
        Self {
            pattern: Pattern::from(SEVERITY_REGEX.clone()),
            entries,
        }
    }

    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    /// First severity, in priority order, whose label `text` starts with.
    pub fn severity_of(&self, text: &str) -> Option<Severity> {
        self.entry_for(text).map(|(sev, _, _)| *sev)
    }

    /// Style for a matched label, or `None` to leave it unchanged.
    pub fn classify(&self, text: &str) -> Option<Style> {
        self.entry_for(text).map(|(_, _, style)| *style)
    }

    fn entry_for(&self, text: &str) -> Option<&(Severity, String, Style)> {
        self.entries
            .iter()
            .find(|(_, label, _)| text.starts_with(label.as_str()))
    }
}

/// Styles quoted string literals with one fixed style.
#[derive(Debug, Clone)]
pub struct LiteralRule {
    pattern: Pattern,
    style: Style,
}

impl LiteralRule {
    pub fn new(style: Style) -> Self {
        Self {
            pattern: Pattern::from(LITERAL_REGEX.clone()),
            style,
        }
    }

    /// Use the `literal.string` entry of `sheet` (empty style if absent).
    pub fn from_sheet(sheet: &StyleSheet) -> Self {
        Self::new(sheet.get_or_default(stylesheet::LITERAL_STRING))
    }

    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    #[inline]
    pub fn classify(&self, _text: &str) -> Option<Style> {
        Some(self.style)
    }
}

/// A pattern plus a classifier for the spans it finds.
#[derive(Debug, Clone)]
pub enum DecorationRule {
    Severity(SeverityRule),
    Literal(LiteralRule),
}

impl DecorationRule {
    pub fn pattern(&self) -> &Pattern {
        match self {
            Self::Severity(rule) => rule.pattern(),
            Self::Literal(rule) => rule.pattern(),
        }
    }

    /// Style for the matched `text`, or `None` to leave it unchanged.
    pub fn classify(&self, text: &str) -> Option<Style> {
        match self {
            Self::Severity(rule) => rule.classify(text),
            Self::Literal(rule) => rule.classify(text),
        }
    }

    pub fn kind(&self) -> RuleKind {
        match self {
            Self::Severity(_) => RuleKind::Severity,
            Self::Literal(_) => RuleKind::Literal,
        }
    }
}

impl From<SeverityRule> for DecorationRule {
    fn from(rule: SeverityRule) -> Self {
        Self::Severity(rule)
    }
}

impl From<LiteralRule> for DecorationRule {
    fn from(rule: LiteralRule) -> Self {
        Self::Literal(rule)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::severity::{DefaultLabels, LabelTable};
    use logtint_style::Rgb;

    fn severity_rule() -> SeverityRule {
        SeverityRule::new(&DefaultLabels, &StyleSheet::with_defaults())
    }

    #[test]
    fn severity_rule_picks_style_by_label() {
        let rule = severity_rule();
        let sheet = StyleSheet::with_defaults();
        assert_eq!(rule.classify("Error: "), sheet.get("severity.error"));
        assert_eq!(rule.classify("Trace: "), sheet.get("severity.trace"));
        assert_eq!(rule.severity_of("Warning: "), Some(Severity::Warning));
    }

    #[test]
    fn unknown_label_is_left_alone() {
        assert_eq!(severity_rule().classify("Info: "), None);
        assert_eq!(severity_rule().classify("note: "), None);
    }

    #[test]
    fn priority_order_breaks_ties() {
        // A higher-priority label that prefixes a lower one still wins.
        let labels = LabelTable::default().with(Severity::Error, "War");
        let rule = SeverityRule::new(&labels, &StyleSheet::with_defaults());
        assert_eq!(rule.severity_of("Warning: "), Some(Severity::Error));

        let rule = SeverityRule::from_entries([
            (Severity::Trace, "E".to_string(), Style::new().dim()),
            (Severity::Error, "Error".to_string(), Style::new().bold()),
        ]);
        assert_eq!(rule.severity_of("Error: "), Some(Severity::Error));
        assert_eq!(rule.severity_of("Eh: "), Some(Severity::Trace));
    }

    #[test]
    fn empty_labels_never_match() {
        let labels = LabelTable::default().with(Severity::Error, "");
        let rule = SeverityRule::new(&labels, &StyleSheet::with_defaults());
        assert_eq!(rule.severity_of("anything: "), None);
    }

    #[test]
    fn missing_sheet_entry_skips_severity() {
        let mut sheet = StyleSheet::with_defaults();
        sheet.remove("severity.note");
        let rule = SeverityRule::new(&DefaultLabels, &sheet);
        assert_eq!(rule.classify("Note: "), None);
        assert!(rule.classify("Error: ").is_some());
    }

    #[test]
    fn literal_rule_is_constant() {
        let rule = DecorationRule::from(LiteralRule::from_sheet(&StyleSheet::with_defaults()));
        let expected = Some(Style::new().fg(Rgb::DARK_GREEN));
        assert_eq!(rule.classify("\"x\""), expected);
        assert_eq!(rule.classify("'y'"), expected);
        assert_eq!(rule.kind(), RuleKind::Literal);
    }

    #[test]
    fn built_in_patterns() {
        assert_eq!(severity_rule().pattern().as_str(), r"^.*?: ");
        assert_eq!(
            LiteralRule::new(Style::new()).pattern().as_str(),
            r#""[^"]*"|'[^']*'"#
        );
    }
}
