#![forbid(unsafe_code)]

//! Incremental decoration of log text.
//!
//! A [`DecorationRule`] pairs a search pattern with a classifier that maps a
//! matched span to a [`Style`](logtint_style::Style). A [`BatchScheduler`]
//! walks one rule backward over a [`TextBuffer`](logtint_text::TextBuffer) in
//! time-bounded quanta, and a [`DecorationPipeline`] runs several schedulers
//! one after another so their writes never interleave.
//!
//! Nothing here blocks or spawns. The host calls
//! [`DecorationPipeline::resume`] whenever it has a spare turn, typically from
//! a deferred event-loop message.

pub mod pipeline;
pub mod rule;
pub mod scheduler;
pub mod severity;

pub use pipeline::{DecorationPipeline, PipelineStatus};
pub use rule::{DecorationRule, LiteralRule, RuleKind, SeverityRule};
pub use scheduler::{
    BatchScheduler, DEFAULT_BATCH_BUDGET, QuantumOutcome, SchedulerState, SchedulerStats,
};
pub use severity::{DefaultLabels, LabelTable, ParseSeverityError, Severity, SeverityLabels};
