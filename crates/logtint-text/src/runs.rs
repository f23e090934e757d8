#![forbid(unsafe_code)]

//! Style assignment over byte ranges.
//!
//! [`StyleRuns`] is an interval map from non-overlapping byte ranges to
//! [`Style`]. Applying a style to a range overwrites every character in that
//! range, splitting any runs that straddle its boundaries. Adjacent runs with
//! equal styles are merged, so two maps that style every byte the same way
//! are also structurally equal.

use std::collections::BTreeMap;
use std::ops::Range;

use logtint_style::Style;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Run {
    end: usize,
    style: Style,
}

/// Non-overlapping, canonical style runs keyed by start offset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleRuns {
    runs: BTreeMap<usize, Run>,
}

impl StyleRuns {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite the style of `range`. Empty ranges are ignored.
    pub fn apply(&mut self, range: Range<usize>, style: Style) {
        if range.start >= range.end {
            return;
        }

        let mut overlapping: Vec<usize> = Vec::new();
        if let Some((&start, run)) = self.runs.range(..range.start).next_back()
            && run.end > range.start
        {
            overlapping.push(start);
        }
        overlapping.extend(self.runs.range(range.clone()).map(|(&start, _)| start));

        for start in overlapping {
            let Some(run) = self.runs.remove(&start) else {
                continue;
            };
            if start < range.start {
                self.runs.insert(
                    start,
                    Run {
                        end: range.start,
                        style: run.style,
                    },
                );
            }
            if run.end > range.end {
                self.runs.insert(
                    range.end,
                    Run {
                        end: run.end,
                        style: run.style,
                    },
                );
            }
        }

        let mut start = range.start;
        let mut end = range.end;
        if let Some((&prev_start, prev)) = self.runs.range(..start).next_back()
            && prev.end == start
            && prev.style == style
        {
            self.runs.remove(&prev_start);
            start = prev_start;
        }
        if let Some(next) = self.runs.get(&end).copied()
            && next.style == style
        {
            self.runs.remove(&end);
            end = next.end;
        }
        self.runs.insert(start, Run { end, style });
    }

    /// Style covering `offset`, if any.
    pub fn style_at(&self, offset: usize) -> Option<Style> {
        self.runs
            .range(..=offset)
            .next_back()
            .filter(|(_, run)| run.end > offset)
            .map(|(_, run)| run.style)
    }

    /// Runs in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = (Range<usize>, Style)> + '_ {
        self.runs
            .iter()
            .map(|(&start, run)| (start..run.end, run.style))
    }

    pub fn len(&self) -> usize {
        self.runs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    pub fn clear(&mut self) {
        self.runs.clear();
    }
}
