#![forbid(unsafe_code)]

//! Log view controller for logtint.
//!
//! [`LogView`] is a [`Model`](logtint_runtime::Model): it reads the log from a
//! [`LogSource`], drops the lines of hidden severities, installs the result in
//! a [`TextBuffer`](logtint_text::TextBuffer) and decorates it in small
//! deferred slices so toggles and other interface events stay responsive.
//!
//! # Example
//! ```
//! use logtint_runtime::Program;
//! use logtint_view::{LogView, LogViewConfig, LogViewMsg, StaticLogSource};
//!
//! let source = StaticLogSource::new("Note: started\nError: \"disk\" full\n");
//! let mut program = Program::new(LogView::new(source, LogViewConfig::default()));
//! program.init();
//! program.run_until_idle();
//!
//! let view = program.model();
//! assert!(!view.decorating());
//! assert_eq!(view.focus(), view.buffer().len());
//! assert!(view.buffer().style_at(0).is_some());
//! ```

pub mod config;
pub mod filter;
pub mod source;
pub mod view;

pub use config::LogViewConfig;
pub use source::{FileLogSource, LogSource, StaticLogSource};
pub use view::{LogView, LogViewMsg, LogViewStats};
