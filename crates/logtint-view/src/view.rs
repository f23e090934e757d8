#![forbid(unsafe_code)]

//! The log view controller.
//!
//! # Refresh
//!
//! On start-up and on every severity toggle the view:
//! 1. reads the log from its [`LogSource`] (a failed read shows an empty log),
//! 2. strips the configured application tag from each line,
//! 3. drops the lines of hidden severities,
//! 4. replaces the buffer text, which invalidates every outstanding cursor,
//! 5. moves focus to the end of the buffer,
//! 6. starts a fresh [`DecorationPipeline`] on the new text.
//!
//! # Decoration
//!
//! The pipeline's first quantum runs inside the refresh. Each further quantum
//! is a [`LogViewMsg::Decorate`] message deferred through the event loop, so
//! it queues behind whatever the host sent in the meantime. Every decorate
//! message carries the buffer generation it was issued for; messages that
//! outlive a refresh are dropped and counted in [`LogViewStats::stale_ticks`].

use std::borrow::Cow;
use std::collections::BTreeSet;

use logtint_decorate::{DecorationPipeline, PipelineStatus, Severity};
use logtint_runtime::{Cmd, Model};
use logtint_text::TextBuffer;
use tracing::{debug_span, info, trace, warn};

use crate::config::LogViewConfig;
use crate::filter::{hide_severity_lines, strip_app_tag};
use crate::source::LogSource;

/// Messages understood by [`LogView`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogViewMsg {
    /// Reload the log and restart decoration.
    Refresh,
    /// Show or hide the lines of one severity, then refresh.
    SetSeverityVisible(Severity, bool),
    /// Run one decoration quantum for the given buffer generation.
    Decorate { generation: u64 },
    Quit,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LogViewStats {
    /// Completed refreshes.
    pub refreshes: u64,
    /// Decorate messages dropped because the buffer had been replaced.
    pub stale_ticks: u64,
    /// Refreshes whose source read failed.
    pub source_errors: u64,
}

/// Displays one log source with severity filtering and decoration.
#[derive(Debug)]
pub struct LogView<S> {
    source: S,
    config: LogViewConfig,
    buffer: TextBuffer,
    focus: usize,
    pipeline: DecorationPipeline,
    decorating: bool,
    stats: LogViewStats,
}

impl<S: LogSource> LogView<S> {
    /// Create a view. Nothing is read until the first refresh.
    pub fn new(source: S, config: LogViewConfig) -> Self {
        let pipeline =
            DecorationPipeline::standard(&config.labels, &config.styles, config.batch_budget);
        Self {
            source,
            config,
            buffer: TextBuffer::new(),
            focus: 0,
            pipeline,
            decorating: false,
            stats: LogViewStats::default(),
        }
    }

    /// Reload the log, re-filter, and restart decoration.
    ///
    /// Returns the command that continues decoration, if any is left.
    pub fn refresh(&mut self) -> Cmd<LogViewMsg> {
        let _span = debug_span!("logtint.view.refresh").entered();
        let raw = match self.source.read_log() {
            Ok(text) => text,
            Err(err) => {
                warn!(%err, "failed to read log; showing empty log");
                self.stats.source_errors += 1;
                String::new()
            }
        };
        let raw_len = raw.len();

        let untagged = match self.config.app_tag.as_deref() {
            Some(tag) => strip_app_tag(&raw, tag),
            None => Cow::Borrowed(raw.as_str()),
        };
        let visible = hide_severity_lines(
            &untagged,
            self.config.hidden.iter().copied(),
            &self.config.labels,
        )
        .into_owned();

        let generation = self.buffer.replace(visible);
        self.focus = self.buffer.len();
        self.stats.refreshes += 1;
        info!(
            generation,
            raw_bytes = raw_len,
            shown_bytes = self.buffer.len(),
            lines = self.buffer.line_count(),
            hidden = self.config.hidden.len(),
            "log refreshed"
        );

        let status = self.pipeline.start(&mut self.buffer);
        self.continue_decoration(status, generation)
    }

    /// Show or hide one severity and refresh.
    pub fn set_severity_visible(&mut self, severity: Severity, visible: bool) -> Cmd<LogViewMsg> {
        if visible {
            self.config.hidden.remove(&severity);
        } else {
            self.config.hidden.insert(severity);
        }
        self.refresh()
    }

    fn decorate(&mut self, generation: u64) -> Cmd<LogViewMsg> {
        if !self.decorating || generation != self.buffer.generation() {
            self.stats.stale_ticks += 1;
            trace!(
                generation,
                current = self.buffer.generation(),
                "dropping stale decorate message"
            );
            return Cmd::none();
        }
        let status = self.pipeline.resume(&mut self.buffer);
        self.continue_decoration(status, generation)
    }

    fn continue_decoration(&mut self, status: PipelineStatus, generation: u64) -> Cmd<LogViewMsg> {
        match status {
            PipelineStatus::Pending => {
                self.decorating = true;
                Cmd::defer(LogViewMsg::Decorate { generation })
            }
            PipelineStatus::Finished => {
                self.decorating = false;
                Cmd::none()
            }
        }
    }

    #[inline]
    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    /// Byte offset the display should keep in view.
    #[inline]
    pub fn focus(&self) -> usize {
        self.focus
    }

    pub fn is_visible(&self, severity: Severity) -> bool {
        !self.config.hidden.contains(&severity)
    }

    pub fn hidden(&self) -> &BTreeSet<Severity> {
        &self.config.hidden
    }

    /// Whether decoration of the current text is still in progress.
    #[inline]
    pub fn decorating(&self) -> bool {
        self.decorating
    }

    #[inline]
    pub fn stats(&self) -> LogViewStats {
        self.stats
    }

    pub fn pipeline(&self) -> &DecorationPipeline {
        &self.pipeline
    }

    pub fn config(&self) -> &LogViewConfig {
        &self.config
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }
}

impl<S: LogSource> Model for LogView<S> {
    type Message = LogViewMsg;

    fn init(&mut self) -> Cmd<LogViewMsg> {
        self.refresh()
    }

    fn update(&mut self, msg: LogViewMsg) -> Cmd<LogViewMsg> {
        match msg {
            LogViewMsg::Refresh => self.refresh(),
            LogViewMsg::SetSeverityVisible(severity, visible) => {
                self.set_severity_visible(severity, visible)
            }
            LogViewMsg::Decorate { generation } => self.decorate(generation),
            LogViewMsg::Quit => Cmd::quit(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::StaticLogSource;
    use std::io;
    use std::time::Duration;
    use tracing_test::traced_test;

    struct BrokenSource;

    impl LogSource for BrokenSource {
        fn read_log(&mut self) -> io::Result<String> {
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "locked"))
        }
    }

    fn view(text: &str) -> LogView<StaticLogSource> {
        LogView::new(
            StaticLogSource::new(text),
            LogViewConfig::default().with_batch_budget(Duration::ZERO),
        )
    }

    #[test]
    fn nothing_is_read_before_refresh() {
        let view = view("Note: a\n");
        assert_eq!(view.source().reads(), 0);
        assert!(view.buffer().is_empty());
        assert!(!view.decorating());
    }

    #[test]
    fn refresh_installs_text_and_focuses_end() {
        let mut view = view("Note: a\nError: b\n");
        let cmd = view.refresh();
        assert!(matches!(cmd, Cmd::Defer(LogViewMsg::Decorate { generation: 1 })));
        assert_eq!(view.buffer().text(), "Note: a\nError: b\n");
        assert_eq!(view.focus(), view.buffer().len());
        assert!(view.decorating());
        assert_eq!(view.stats().refreshes, 1);
    }

    #[test]
    fn stale_decorate_is_dropped() {
        let mut view = view("'a' 'b'\n");
        view.refresh();
        view.refresh();
        let cmd = view.update(LogViewMsg::Decorate { generation: 1 });
        assert!(matches!(cmd, Cmd::None));
        assert_eq!(view.stats().stale_ticks, 1);
    }

    #[test]
    fn decorate_after_finish_is_dropped() {
        let mut view = LogView::new(StaticLogSource::new(""), LogViewConfig::default());
        // The severity pass finishes at once; the literal pass needs one more turn.
        assert!(matches!(view.refresh(), Cmd::Defer(_)));
        assert!(matches!(view.update(LogViewMsg::Decorate { generation: 1 }), Cmd::None));
        assert!(!view.decorating());
        assert_eq!(view.stats().stale_ticks, 0);

        view.update(LogViewMsg::Decorate { generation: 1 });
        assert_eq!(view.stats().stale_ticks, 1);
    }

    #[test]
    fn toggle_hides_and_shows() {
        let mut view = view("Note: a\nDebug: b\n");
        view.refresh();
        view.set_severity_visible(Severity::Debug, false);
        assert!(!view.is_visible(Severity::Debug));
        assert_eq!(view.buffer().text(), "Note: a\n");

        view.update(LogViewMsg::SetSeverityVisible(Severity::Debug, true));
        assert!(view.is_visible(Severity::Debug));
        assert_eq!(view.buffer().text(), "Note: a\nDebug: b\n");
        assert_eq!(view.stats().refreshes, 3);
    }

    #[test]
    fn app_tag_is_stripped_before_filtering() {
        let mut view = LogView::new(
            StaticLogSource::new("CopyQ Note: a\nCopyQ Trace: b\n"),
            LogViewConfig::default()
                .with_app_tag("CopyQ ")
                .with_hidden(Severity::Trace),
        );
        view.refresh();
        assert_eq!(view.buffer().text(), "Note: a\n");
    }

    #[test]
    fn default_config_keeps_app_tags() {
        let mut view = LogView::new(
            StaticLogSource::new("CopyQ Note: a\nCopyQ Trace: b\n"),
            LogViewConfig::default().with_hidden(Severity::Trace),
        );
        view.refresh();
        // Without a tag the labels are not at line start, so nothing is hidden.
        assert_eq!(view.buffer().text(), "CopyQ Note: a\nCopyQ Trace: b\n");
        assert_eq!(view.config().app_tag, None);
    }

    #[traced_test]
    #[test]
    fn failed_read_shows_empty_log() {
        let mut view = LogView::new(BrokenSource, LogViewConfig::default());
        view.refresh();
        assert!(view.buffer().is_empty());
        assert_eq!(view.stats().source_errors, 1);
        assert!(logs_contain("failed to read log"));
        assert!(logs_contain("locked"));
    }

    #[test]
    fn quit_message_quits() {
        let mut view = view("");
        assert!(matches!(view.update(LogViewMsg::Quit), Cmd::Quit));
    }
}
