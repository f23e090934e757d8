#![forbid(unsafe_code)]

//! Line-level transforms applied to the raw log before display.
//!
//! A line is the text between two `\n`, and includes its terminating `\n`
//! when it has one. Both transforms borrow the input when nothing changes.

use std::borrow::Cow;

use logtint_decorate::{Severity, SeverityLabels};

/// Remove `tag` from the start of every line that begins with it.
///
/// An empty tag leaves the text untouched.
pub fn strip_app_tag<'a>(text: &'a str, tag: &str) -> Cow<'a, str> {
    if tag.is_empty() || !text.contains(tag) {
        return Cow::Borrowed(text);
    }
    let mut changed = false;
    let mut out = String::with_capacity(text.len());
    for line in text.split_inclusive('\n') {
        match line.strip_prefix(tag) {
            Some(rest) => {
                changed = true;
                out.push_str(rest);
            }
            None => out.push_str(line),
        }
    }
    if changed {
        Cow::Owned(out)
    } else {
        Cow::Borrowed(text)
    }
}

/// Drop every line that starts with the label of a hidden severity.
pub fn hide_severity_lines<'a>(
    text: &'a str,
    hidden: impl IntoIterator<Item = Severity>,
    labels: &impl SeverityLabels,
) -> Cow<'a, str> {
    let prefixes: Vec<&str> = hidden
        .into_iter()
        .map(|sev| labels.label_of(sev))
        .filter(|label| !label.is_empty())
        .collect();
    if prefixes.is_empty() {
        return Cow::Borrowed(text);
    }

    let mut dropped = 0usize;
    let mut out = String::with_capacity(text.len());
    for line in text.split_inclusive('\n') {
        if prefixes.iter().any(|label| line.starts_with(label)) {
            dropped += 1;
        } else {
            out.push_str(line);
        }
    }
    if dropped == 0 {
        Cow::Borrowed(text)
    } else {
        Cow::Owned(out)
    }
}
