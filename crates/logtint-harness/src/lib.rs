#![forbid(unsafe_code)]

//! Host application for logtint.
//!
//! The `logtint` binary plays the part of a log dialog: it reads a log file
//! through a [`LogView`](logtint_view::LogView), applies one visibility toggle
//! per `--hide` flag, lets the event loop finish decoration, and prints the
//! decorated text with ANSI styling.
//!
//! The pieces live here so they can be tested without a terminal:
//! - [`cli`] parses arguments and the harness environment variables
//! - [`render`] turns a decorated buffer into styled terminal output

pub mod cli;
pub mod render;
