#![forbid(unsafe_code)]

//! Ordered decoration passes over one buffer generation.
//!
//! Passes run strictly one after another: the next pass starts only after
//! the previous one reports [`QuantumOutcome::Done`]. Where two passes style
//! the same characters, the later pass wins. The standard pipeline runs the
//! severity pass first and the literal pass second, so a quoted literal
//! inside a severity label keeps the literal style.
//!
//! Each call to [`start`](DecorationPipeline::start) or
//! [`resume`](DecorationPipeline::resume) runs at most one quantum.

use std::time::Duration;

use logtint_style::StyleSheet;
use logtint_text::TextBuffer;
use tracing::debug;

use crate::rule::{DecorationRule, LiteralRule, RuleKind, SeverityRule};
use crate::scheduler::{BatchScheduler, QuantumOutcome, SchedulerState, SchedulerStats};
use crate::severity::SeverityLabels;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStatus {
    /// More quanta are needed; call `resume` on a later turn.
    Pending,
    /// Every pass is done, or the buffer was replaced.
    Finished,
}

#[derive(Debug, Clone)]
pub struct DecorationPipeline {
    passes: Vec<BatchScheduler>,
    current: usize,
    generation: u64,
    finished: bool,
}

impl DecorationPipeline {
    /// Passes run in the order given, each with the same budget.
    pub fn new(rules: impl IntoIterator<Item = DecorationRule>, budget: Duration) -> Self {
        Self {
            passes: rules
                .into_iter()
                .map(|rule| BatchScheduler::new(rule).with_budget(budget))
                .collect(),
            current: 0,
            generation: 0,
            finished: false,
        }
    }

    /// Severity labels, then quoted literals.
    pub fn standard(labels: &impl SeverityLabels, sheet: &StyleSheet, budget: Duration) -> Self {
        Self::new(
            [
                DecorationRule::from(SeverityRule::new(labels, sheet)),
                DecorationRule::from(LiteralRule::from_sheet(sheet)),
            ],
            budget,
        )
    }

    /// Begin decorating `buffer` from scratch and run the first quantum.
    pub fn start(&mut self, buffer: &mut TextBuffer) -> PipelineStatus {
        self.generation = buffer.generation();
        self.current = 0;
        self.finished = false;
        for pass in &mut self.passes {
            pass.reset();
        }
        let Some(first) = self.passes.first_mut() else {
            self.finished = true;
            return PipelineStatus::Finished;
        };
        let outcome = first.decorate(buffer);
        self.advance(outcome)
    }

    /// Run one more quantum of the current pass, or start the next pass.
    pub fn resume(&mut self, buffer: &mut TextBuffer) -> PipelineStatus {
        if self.finished {
            return PipelineStatus::Finished;
        }
        let Some(pass) = self.passes.get_mut(self.current) else {
            self.finished = true;
            return PipelineStatus::Finished;
        };
        let outcome = if pass.state() == SchedulerState::Idle {
            if buffer.generation() != self.generation {
                QuantumOutcome::Stale
            } else {
                pass.decorate(buffer)
            }
        } else {
            pass.run_quantum(buffer)
        };
        self.advance(outcome)
    }

    fn advance(&mut self, outcome: QuantumOutcome) -> PipelineStatus {
        match outcome {
            QuantumOutcome::Yielded => PipelineStatus::Pending,
            QuantumOutcome::Stale => {
                self.finished = true;
                PipelineStatus::Finished
            }
            QuantumOutcome::Done => {
                self.current += 1;
                if self.current < self.passes.len() {
                    return PipelineStatus::Pending;
                }
                self.finished = true;
                let totals = self.stats();
                debug!(
                    generation = self.generation,
                    quanta = totals.quanta,
                    matches = totals.matches,
                    styled = totals.styled,
                    "decoration finished"
                );
                PipelineStatus::Finished
            }
        }
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Buffer generation this pipeline decorates.
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Kind of the pass that runs next, if any.
    pub fn current_kind(&self) -> Option<RuleKind> {
        if self.finished {
            return None;
        }
        self.passes.get(self.current).map(|pass| pass.rule().kind())
    }

    pub fn passes(&self) -> &[BatchScheduler] {
        &self.passes
    }

    /// Counters summed over all passes.
    pub fn stats(&self) -> SchedulerStats {
        let mut totals = SchedulerStats::default();
        for pass in &self.passes {
            totals += pass.stats();
        }
        totals
    }
}
