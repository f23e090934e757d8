#![forbid(unsafe_code)]

//! logtint runtime
//!
//! A single-threaded, cooperative event loop in the Elm/Bubbletea style.
//!
//! # Key Components
//!
//! - [`Model`] - Trait for application state and behavior
//! - [`Cmd`] - Commands for side effects, including deferred messages
//! - [`Program`] - FIFO message queue that drives a [`Model`]
//!
//! # Cooperative scheduling
//! Long-running work splits itself into bounded slices. A slice that still has
//! work left returns [`Cmd::Defer`] with a continuation message; the program
//! queues it behind everything already pending, so interface events sent in
//! the meantime are handled first. Nothing runs in parallel and nothing needs
//! a lock.

pub mod program;

pub use program::{Cmd, Model, Program, ProgramStats};
