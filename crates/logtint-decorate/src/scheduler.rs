#![forbid(unsafe_code)]

//! Time-sliced backward scanning for one decoration rule.
//!
//! A scheduler owns a cursor into a [`TextBuffer`] generation. Each quantum
//! repeatedly finds the previous match, classifies it, and applies the
//! resulting style, checking the clock only after a match has been
//! processed. A quantum therefore always advances by at least one match,
//! even with a zero budget. When the budget runs out the quantum returns
//! [`QuantumOutcome::Yielded`] and the caller decides when to resume.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//!
//! use logtint_decorate::{BatchScheduler, LiteralRule, QuantumOutcome};
//! use logtint_style::Style;
//! use logtint_text::TextBuffer;
//!
//! let mut buffer = TextBuffer::from("say 'a' 'b'\n");
//! let mut scheduler = BatchScheduler::new(LiteralRule::new(Style::new().bold()).into())
//!     .with_budget(Duration::ZERO);
//!
//! assert_eq!(scheduler.decorate(&mut buffer), QuantumOutcome::Yielded);
//! assert_eq!(scheduler.run_quantum(&mut buffer), QuantumOutcome::Yielded);
//! assert_eq!(scheduler.run_quantum(&mut buffer), QuantumOutcome::Done);
//! assert_eq!(scheduler.stats().styled, 2);
//! ```

use std::ops::AddAssign;
use std::time::{Duration, Instant};

use logtint_text::{Cursor, LineMatches, TextBuffer};
use tracing::debug;

use crate::rule::DecorationRule;

/// Budget of one quantum unless configured otherwise.
pub const DEFAULT_BATCH_BUDGET: Duration = Duration::from_millis(20);

/// Lifecycle of a [`BatchScheduler`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    /// Never started.
    Idle,
    /// Started and waiting for its next quantum.
    Scanning,
    /// Ran out of matches or lost its buffer. Terminal until restarted.
    Done,
}

/// Result of one quantum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantumOutcome {
    /// Budget spent with matches possibly left; resume later.
    Yielded,
    /// No more matches.
    Done,
    /// The buffer was replaced since the scan started; nothing was styled.
    Stale,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SchedulerStats {
    /// Quanta that scanned at least once.
    pub quanta: u64,
    /// Matches found.
    pub matches: u64,
    /// Matches that received a style.
    pub styled: u64,
}

impl AddAssign for SchedulerStats {
    fn add_assign(&mut self, rhs: Self) {
        self.quanta += rhs.quanta;
        self.matches += rhs.matches;
        self.styled += rhs.styled;
    }
}

/// Scans one [`TextBuffer`] generation backward with one rule.
#[derive(Debug, Clone)]
pub struct BatchScheduler {
    rule: DecorationRule,
    cursor: Cursor,
    line_matches: LineMatches,
    budget: Duration,
    state: SchedulerState,
    generation: u64,
    stats: SchedulerStats,
}

impl BatchScheduler {
    pub fn new(rule: DecorationRule) -> Self {
        Self {
            rule,
            cursor: Cursor::null(0),
            line_matches: LineMatches::new(),
            budget: DEFAULT_BATCH_BUDGET,
            state: SchedulerState::Idle,
            generation: 0,
            stats: SchedulerStats::default(),
        }
    }

    /// Set the time a quantum may spend before yielding.
    #[must_use]
    pub fn with_budget(mut self, budget: Duration) -> Self {
        self.budget = budget;
        self
    }

    #[inline]
    pub fn rule(&self) -> &DecorationRule {
        &self.rule
    }

    #[inline]
    pub fn budget(&self) -> Duration {
        self.budget
    }

    #[inline]
    pub fn state(&self) -> SchedulerState {
        self.state
    }

    #[inline]
    pub fn is_done(&self) -> bool {
        self.state == SchedulerState::Done
    }

    /// Buffer generation of the current scan.
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Lines searched by this scheduler so far, across scans.
    #[inline]
    pub fn lines_searched(&self) -> u64 {
        self.line_matches.lines_searched()
    }

    /// Counters for the current scan.
    #[inline]
    pub fn stats(&self) -> SchedulerStats {
        self.stats
    }

    /// Forget the current scan and return to [`SchedulerState::Idle`].
    pub fn reset(&mut self) {
        self.cursor = Cursor::null(self.generation);
        self.line_matches.clear();
        self.state = SchedulerState::Idle;
        self.stats = SchedulerStats::default();
    }

    /// Restart at the end of `buffer` and run the first quantum.
    pub fn decorate(&mut self, buffer: &mut TextBuffer) -> QuantumOutcome {
        self.cursor = buffer.cursor_at_end();
        self.line_matches.clear();
        self.generation = buffer.generation();
        self.state = SchedulerState::Scanning;
        self.stats = SchedulerStats::default();
        self.run_quantum(buffer)
    }

    /// Continue the scan for one quantum.
    pub fn run_quantum(&mut self, buffer: &mut TextBuffer) -> QuantumOutcome {
        if self.state != SchedulerState::Scanning {
            self.state = SchedulerState::Done;
            return QuantumOutcome::Done;
        }
        if buffer.generation() != self.generation {
            debug!(
                rule = self.rule.kind().as_str(),
                scan_generation = self.generation,
                buffer_generation = buffer.generation(),
                "decoration scan abandoned"
            );
            self.state = SchedulerState::Done;
            self.cursor = Cursor::null(self.generation);
            self.line_matches.clear();
            return QuantumOutcome::Stale;
        }
        if self.cursor.is_null() {
            self.state = SchedulerState::Done;
            return QuantumOutcome::Done;
        }

        let start = Instant::now();
        let mut matches = 0u64;
        let mut styled = 0u64;
        let outcome = loop {
            self.cursor = buffer.find_previous_cached(
                &self.cursor,
                self.rule.pattern(),
                &mut self.line_matches,
            );
            let Some(text) = buffer.selected_text(&self.cursor) else {
                break QuantumOutcome::Done;
            };
            matches += 1;
            if let Some(style) = self.rule.classify(text) {
                if buffer.apply_style(&self.cursor, style) {
                    styled += 1;
                }
            }
            if start.elapsed() >= self.budget {
                break QuantumOutcome::Yielded;
            }
        };

        if outcome == QuantumOutcome::Done {
            self.state = SchedulerState::Done;
        }
        self.stats += SchedulerStats {
            quanta: 1,
            matches,
            styled,
        };
        debug!(
            rule = self.rule.kind().as_str(),
            matches,
            styled,
            elapsed_us = start.elapsed().as_micros() as u64,
            done = self.is_done(),
            "decoration quantum"
        );
        outcome
    }
}
