#![forbid(unsafe_code)]

//! Log view configuration.
//!
//! Environment variables (read by [`LogViewConfig::from_env`]):
//!
//! | Variable | Meaning | Default |
//! |----------|---------|---------|
//! | `LOGTINT_BATCH_BUDGET_MS` | time one decoration quantum may take | `20` |
//! | `LOGTINT_APP_TAG` | tag stripped from the start of each line | none |
//! | `LOGTINT_HIDE` | comma-separated severities to hide | none |
//!
//! Tag stripping is off by default, so lines keep any application prefix
//! (for example `CopyQ `) until a tag is configured. Invalid values are
//! ignored and the default is kept.

use std::collections::BTreeSet;
use std::time::Duration;

use logtint_decorate::{DEFAULT_BATCH_BUDGET, LabelTable, Severity};
use logtint_style::StyleSheet;
use tracing::warn;

pub const ENV_BATCH_BUDGET_MS: &str = "LOGTINT_BATCH_BUDGET_MS";
pub const ENV_APP_TAG: &str = "LOGTINT_APP_TAG";
pub const ENV_HIDE: &str = "LOGTINT_HIDE";

/// Settings for a [`LogView`](crate::LogView).
#[derive(Debug, Clone, PartialEq)]
pub struct LogViewConfig {
    /// Time one decoration quantum may take before yielding.
    pub batch_budget: Duration,
    /// Tag stripped from the start of each line. `None` strips nothing.
    pub app_tag: Option<String>,
    /// Severities whose lines are dropped on refresh.
    pub hidden: BTreeSet<Severity>,
    /// Label text for each severity.
    pub labels: LabelTable,
    /// Decoration palette.
    pub styles: StyleSheet,
}

impl Default for LogViewConfig {
    fn default() -> Self {
        Self {
            batch_budget: DEFAULT_BATCH_BUDGET,
            app_tag: None,
            hidden: BTreeSet::new(),
            labels: LabelTable::default(),
            styles: StyleSheet::with_defaults(),
        }
    }
}

impl LogViewConfig {
    /// Defaults overridden by the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Defaults overridden by `lookup`, which maps a variable name to its value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        let string = |name: &str| {
            lookup(name).and_then(|value| {
                let trimmed = value.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            })
        };

        if let Some(ms) = string(ENV_BATCH_BUDGET_MS) {
            match ms.parse::<u64>() {
                Ok(ms) => config.batch_budget = Duration::from_millis(ms),
                Err(_) => warn!(variable = ENV_BATCH_BUDGET_MS, value = %ms, "ignoring invalid budget"),
            }
        }
        // Not trimmed: a tag usually ends with a space.
        if let Some(tag) = lookup(ENV_APP_TAG).filter(|tag| !tag.trim().is_empty()) {
            config.app_tag = Some(tag);
        }
        if let Some(list) = string(ENV_HIDE) {
            for item in list.split(',').map(str::trim).filter(|s| !s.is_empty()) {
                match item.parse::<Severity>() {
                    Ok(sev) => {
                        config.hidden.insert(sev);
                    }
                    Err(err) => warn!(variable = ENV_HIDE, %err, "ignoring severity"),
                }
            }
        }
        config
    }

    #[must_use]
    pub fn with_batch_budget(mut self, budget: Duration) -> Self {
        self.batch_budget = budget;
        self
    }

    #[must_use]
    pub fn with_app_tag(mut self, tag: impl Into<String>) -> Self {
        self.app_tag = Some(tag.into());
        self
    }

    #[must_use]
    pub fn with_hidden(mut self, severity: Severity) -> Self {
        self.hidden.insert(severity);
        self
    }

    #[must_use]
    pub fn with_labels(mut self, labels: LabelTable) -> Self {
        self.labels = labels;
        self
    }

    #[must_use]
    pub fn with_styles(mut self, styles: StyleSheet) -> Self {
        self.styles = styles;
        self
    }
}
