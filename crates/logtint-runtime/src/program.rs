#![forbid(unsafe_code)]

//! Elm-style runtime for cooperative, single-threaded applications.
//!
//! The program owns a [`Model`] and a FIFO queue of messages. Messages sent by
//! the host (interface events) and messages deferred by the model itself
//! share that queue, so a deferred continuation only runs after everything
//! that was already waiting.
//!
//! # Example
//!
//! ```
//! use logtint_runtime::{Cmd, Model, Program};
//!
//! struct Countdown {
//!     left: u32,
//! }
//!
//! enum Msg {
//!     Tick,
//! }
//!
//! impl Model for Countdown {
//!     type Message = Msg;
//!
//!     fn init(&mut self) -> Cmd<Msg> {
//!         Cmd::defer(Msg::Tick)
//!     }
//!
//!     fn update(&mut self, msg: Msg) -> Cmd<Msg> {
//!         match msg {
//!             Msg::Tick if self.left > 1 => {
//!                 self.left -= 1;
//!                 Cmd::defer(Msg::Tick)
//!             }
//!             Msg::Tick => {
//!                 self.left = 0;
//!                 Cmd::none()
//!             }
//!         }
//!     }
//! }
//!
//! let mut program = Program::new(Countdown { left: 3 });
//! program.init();
//! assert_eq!(program.pending(), 1);
//! assert_eq!(program.run_until_idle(), 3);
//! assert_eq!(program.model().left, 0);
//! ```

use std::collections::VecDeque;
use std::time::Instant;

use tracing::{debug, debug_span, trace};

/// The Model trait defines application state and behavior.
pub trait Model: Sized {
    /// The message type for this model.
    type Message;

    /// Initialize the model with startup commands.
    ///
    /// Called once by [`Program::init`].
    fn init(&mut self) -> Cmd<Self::Message> {
        Cmd::none()
    }

    /// Update the model in response to a message.
    ///
    /// This is the core state transition function. Returns commands
    /// for any side effects that should be executed.
    fn update(&mut self, msg: Self::Message) -> Cmd<Self::Message>;
}

/// Commands represent side effects to be executed by the runtime.
pub enum Cmd<M> {
    /// No operation.
    None,
    /// Stop the program. Pending messages are dropped.
    Quit,
    /// Execute multiple commands as a batch (currently sequential).
    Batch(Vec<Cmd<M>>),
    /// Execute commands sequentially.
    Sequence(Vec<Cmd<M>>),
    /// Send a message to the model immediately, on the same call stack.
    Msg(M),
    /// Queue a message behind everything already pending.
    ///
    /// This is the yield primitive: the message is never delivered from
    /// within the update that produced it.
    Defer(M),
}

impl<M> Default for Cmd<M> {
    fn default() -> Self {
        Self::None
    }
}

impl<M: std::fmt::Debug> std::fmt::Debug for Cmd<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "None"),
            Self::Quit => write!(f, "Quit"),
            Self::Batch(cmds) => f.debug_tuple("Batch").field(cmds).finish(),
            Self::Sequence(cmds) => f.debug_tuple("Sequence").field(cmds).finish(),
            Self::Msg(m) => f.debug_tuple("Msg").field(m).finish(),
            Self::Defer(m) => f.debug_tuple("Defer").field(m).finish(),
        }
    }
}

impl<M> Cmd<M> {
    /// Create a no-op command.
    #[inline]
    pub fn none() -> Self {
        Self::None
    }

    /// Create a quit command.
    #[inline]
    pub fn quit() -> Self {
        Self::Quit
    }

    /// Create a message command.
    #[inline]
    pub fn msg(m: M) -> Self {
        Self::Msg(m)
    }

    /// Create a deferred message command.
    #[inline]
    pub fn defer(m: M) -> Self {
        Self::Defer(m)
    }

    /// Create a batch of commands.
    pub fn batch(mut cmds: Vec<Self>) -> Self {
        match cmds.len() {
            0 => Self::None,
            1 => cmds.pop().unwrap_or_default(),
            _ => Self::Batch(cmds),
        }
    }

    /// Create a sequence of commands.
    pub fn sequence(mut cmds: Vec<Self>) -> Self {
        match cmds.len() {
            0 => Self::None,
            1 => cmds.pop().unwrap_or_default(),
            _ => Self::Sequence(cmds),
        }
    }

    /// Return a stable name for telemetry and tracing.
    #[inline]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Quit => "Quit",
            Self::Batch(_) => "Batch",
            Self::Sequence(_) => "Sequence",
            Self::Msg(_) => "Msg",
            Self::Defer(_) => "Defer",
        }
    }

    /// Count the number of atomic commands in this command.
    ///
    /// Returns 0 for None, 1 for atomic commands, and recursively counts for Batch/Sequence.
    pub fn count(&self) -> usize {
        match self {
            Self::None => 0,
            Self::Batch(cmds) | Self::Sequence(cmds) => cmds.iter().map(Self::count).sum(),
            _ => 1,
        }
    }
}

/// Where a queued message came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Origin {
    Sent,
    Deferred,
}

impl Origin {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Sent => "sent",
            Self::Deferred => "deferred",
        }
    }
}

/// Counters for a [`Program`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProgramStats {
    /// Calls to `Model::update`.
    pub updates: u64,
    /// Messages queued by the host via [`Program::send`].
    pub sent: u64,
    /// Messages queued by the model via [`Cmd::Defer`].
    pub deferred: u64,
}

/// Drives a [`Model`] from a FIFO message queue.
pub struct Program<M: Model> {
    model: M,
    queue: VecDeque<(Origin, M::Message)>,
    running: bool,
    stats: ProgramStats,
}

impl<M: Model> Program<M> {
    /// Create a program. The model is not initialized until [`init`](Self::init).
    pub fn new(model: M) -> Self {
        Self {
            model,
            queue: VecDeque::new(),
            running: true,
            stats: ProgramStats::default(),
        }
    }

    /// Call `Model::init()` and execute the returned commands.
    pub fn init(&mut self) {
        let cmd = self.model.init();
        self.execute_cmd(cmd);
    }

    /// Queue an interface event for the model.
    pub fn send(&mut self, msg: M::Message) {
        if !self.running {
            return;
        }
        self.stats.sent += 1;
        self.queue.push_back((Origin::Sent, msg));
    }

    /// Deliver a message right away, bypassing the queue.
    pub fn dispatch(&mut self, msg: M::Message) {
        if !self.running {
            return;
        }
        self.update(msg, "dispatched");
    }

    /// Process one queued message. Returns `false` if nothing was processed.
    pub fn step(&mut self) -> bool {
        if !self.running {
            return false;
        }
        let Some((origin, msg)) = self.queue.pop_front() else {
            return false;
        };
        self.update(msg, origin.as_str());
        true
    }

    /// Process queued messages until the queue is empty or the program quits.
    ///
    /// Returns the number of messages processed.
    pub fn run_until_idle(&mut self) -> usize {
        let mut processed = 0;
        while self.step() {
            processed += 1;
        }
        debug!(processed, running = self.running, "program idle");
        processed
    }

    /// Process at most `max_steps` queued messages.
    pub fn run_for(&mut self, max_steps: usize) -> usize {
        let mut processed = 0;
        while processed < max_steps && self.step() {
            processed += 1;
        }
        processed
    }

    /// Number of messages waiting in the queue.
    #[inline]
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Whether the program has not quit.
    #[inline]
    pub fn is_running(&self) -> bool {
        self.running
    }

    #[inline]
    pub fn stats(&self) -> ProgramStats {
        self.stats
    }

    /// Get a reference to the model.
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Get a mutable reference to the model.
    pub fn model_mut(&mut self) -> &mut M {
        &mut self.model
    }

    /// Consume the program and return the model.
    pub fn into_model(self) -> M {
        self.model
    }

    fn update(&mut self, msg: M::Message, msg_type: &'static str) {
        let span = debug_span!(
            "logtint.program.update",
            msg_type,
            duration_us = tracing::field::Empty,
            cmd_type = tracing::field::Empty
        );
        let cmd = {
            let _guard = span.enter();
            let start = Instant::now();
            let cmd = self.model.update(msg);
            span.record("duration_us", start.elapsed().as_micros() as u64);
            span.record("cmd_type", cmd.type_name());
            cmd
        };
        self.stats.updates += 1;
        self.execute_cmd(cmd);
    }

    /// Execute a command.
    fn execute_cmd(&mut self, cmd: Cmd<M::Message>) {
        match cmd {
            Cmd::None => {}
            Cmd::Quit => {
                self.running = false;
                let dropped = self.queue.len();
                self.queue.clear();
                debug!(dropped, "program quit");
            }
            Cmd::Msg(m) => self.update(m, "immediate"),
            Cmd::Defer(m) => {
                self.stats.deferred += 1;
                self.queue.push_back((Origin::Deferred, m));
                trace!(pending = self.queue.len(), "message deferred");
            }
            Cmd::Batch(cmds) | Cmd::Sequence(cmds) => {
                for c in cmds {
                    self.execute_cmd(c);
                    if !self.running {
                        break;
                    }
                }
            }
        }
    }
}
