//! Command step engine for cooperative, non-blocking command execution.
//!
//! The engine advances the currently-active command by exactly one bounded
//! unit of work per tick. A command is a plain function over a persistent
//! [`Context`], the per-tick I/O view ([`TickIo`]), and the application's
//! platform value; it either stays active ([`Step::Continue`]) or signals
//! completion ([`Step::Complete`]). The engine itself cannot fail: errors
//! inside a command are absorbed into that command's own states and never
//! escape.
//!
//! # Command contract
//!
//! Every command function must satisfy the following rules:
//!
//! 1. Each call does a small, bounded amount of work. Looping internally
//!    until a task is fully done re-introduces blocking and is forbidden.
//! 2. All state that must survive between calls lives in the [`Context`]
//!    (or on the platform); nothing on the call stack does.
//! 3. Output goes into the shared buffer via [`TickIo::print`]; it may
//!    complete asynchronously, so a command that must wait for the
//!    transmitter encodes a "wait until not busy" state polling
//!    [`TickIo::tx_busy`].
//! 4. Argument text is read from [`TickIo::input`] at invocation time;
//!    parse failures are a normal transition to the exit state, not an
//!    error.
//! 5. Completion is signalled exactly once; after that the command is not
//!    advanced again until re-selected.
//!
//! # State machine shape
//!
//! Commands are written as a `match` over the context's state tag. State 0
//! is always the entry state on fresh selection, exactly one state performs
//! the [`Step::Complete`] transition, and a state transitioning to itself is
//! the mechanism for waiting without blocking (decrementing a counter once
//! per tick, or polling a readiness flag once per tick).
//!
//! ```rust
//! use tickshell::engine::{Context, Engine, Step, Tick, TickIo, OUTPUT_CAPACITY};
//!
//! // Counts down for three ticks, then completes.
//! fn countdown(ctx: &mut Context, _io: &mut TickIo<'_>, _platform: &mut ()) -> Step {
//!     match ctx.state() {
//!         0 => {
//!             ctx.vars[0] = 3;
//!             ctx.goto(1);
//!             Step::Continue
//!         }
//!         1 => {
//!             ctx.vars[0] -= 1;
//!             if ctx.vars[0] == 0 {
//!                 ctx.goto(2);
//!             }
//!             Step::Continue
//!         }
//!         _ => Step::Complete,
//!     }
//! }
//!
//! let mut engine: Engine<()> = Engine::new();
//! engine.select(countdown).unwrap();
//!
//! let mut output: heapless::String<OUTPUT_CAPACITY> = heapless::String::new();
//! let mut ticks = 0;
//! loop {
//!     let mut io = TickIo::new("", &mut output, false);
//!     ticks += 1;
//!     if engine.tick(&mut io, &mut ()) == Tick::Finished {
//!         break;
//!     }
//! }
//! assert_eq!(ticks, 5);
//! assert!(!engine.is_active());
//! ```

use core::fmt;
use core::fmt::Write as _;

/// Capacity of the shared output buffer commands print into.
pub const OUTPUT_CAPACITY: usize = 256;

/// Number of scratch variables carried by a [`Context`].
///
/// Commands use these for counters, timers, and parsed arguments; four is
/// enough for the template payloads and keeps the context trivially cheap
/// to reset.
pub const CONTEXT_VARS: usize = 4;

/// The outcome of one advance call on a command.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Step {
    /// The command performed one unit of work and stays active.
    Continue,
    /// The command is done; the engine clears it and it is not advanced
    /// again until re-selected.
    Complete,
}

/// The outcome of one engine poll.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Tick {
    /// No command is active.
    Idle,
    /// The active command advanced and stays active.
    Running,
    /// The active command signalled completion on this tick.
    Finished,
}

/// Errors surfaced when handing a command to the engine.
///
/// Selecting a new command while one is still active is rejected rather
/// than queued or preempted: the running command keeps exclusive ownership
/// of its context until it completes or is explicitly cancelled.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Error {
    /// A command is already active; the selection was rejected.
    Busy,
}

#[cfg(feature = "defmt")]
impl defmt::Format for Error {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Error::Busy => defmt::write!(f, "Busy"),
        }
    }
}

/// Per-command persistent state surviving across ticks.
///
/// Semantically a small tagged state value plus command-specific working
/// variables. Owned by the engine on behalf of the one running command;
/// reset to its initial state only when a command is (re-)selected, never
/// mid-run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Context {
    state: u16,
    /// Scratch registers for counters, timers, and parsed arguments.
    pub vars: [i32; CONTEXT_VARS],
}

impl Context {
    /// Create a fresh context in the entry state (state 0).
    pub const fn new() -> Self {
        Self {
            state: 0,
            vars: [0; CONTEXT_VARS],
        }
    }

    /// The current state tag.
    pub fn state(&self) -> u16 {
        self.state
    }

    /// Transition to another state on the next tick.
    pub fn goto(&mut self, state: u16) {
        self.state = state;
    }

    /// Return to the entry state and clear all scratch variables.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

/// The per-tick view of the shared input/output buffers.
///
/// Built by the caller once per tick and handed to the active command. The
/// input line is the most recently submitted command line, stable for the
/// whole run; the output buffer and transmit-busy flag implement the
/// write-then-poll discipline towards an asynchronous transmitter.
pub struct TickIo<'a> {
    input: &'a str,
    output: &'a mut heapless::String<OUTPUT_CAPACITY>,
    tx_busy: bool,
    output_requested: bool,
}

impl<'a> TickIo<'a> {
    /// Assemble the I/O view for one tick.
    pub fn new(
        input: &'a str,
        output: &'a mut heapless::String<OUTPUT_CAPACITY>,
        tx_busy: bool,
    ) -> Self {
        Self {
            input,
            output,
            tx_busy,
            output_requested: false,
        }
    }

    /// The captured command line, including the command name itself.
    pub fn input(&self) -> &str {
        self.input
    }

    /// Whether the transmitter is still draining a previous output.
    ///
    /// A command that must not overwrite in-flight output polls this once
    /// per tick in a self-loop state before printing again.
    pub fn tx_busy(&self) -> bool {
        self.tx_busy
    }

    /// Write formatted text into the shared output buffer and request the
    /// produce-output phase.
    ///
    /// Text that does not fit the remaining buffer capacity is dropped.
    /// The output is not transmitted synchronously; it is handed to the
    /// transport when the shell reaches the produce-output phase.
    pub fn print(&mut self, args: fmt::Arguments<'_>) {
        let _ = self.output.write_fmt(args);
        self.output_requested = true;
    }

    /// Request the produce-output phase without writing anything.
    pub fn request_output(&mut self) {
        self.output_requested = true;
    }

    /// Whether this tick's command asked for the produce-output phase.
    pub fn output_requested(&self) -> bool {
        self.output_requested
    }
}

impl fmt::Debug for TickIo<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TickIo")
            .field("input", &self.input)
            .field("tx_busy", &self.tx_busy)
            .field("output_requested", &self.output_requested)
            .finish()
    }
}

/// Function signature for command advance functions.
///
/// `P` is the application's platform/board type, opaque to the engine; it
/// carries whatever hardware handles or long-lived application state the
/// commands need (GPIO pins, persistent counters, driver handles).
pub type CommandFn<P> = fn(&mut Context, &mut TickIo<'_>, &mut P) -> Step;

/// The command step engine.
///
/// Holds at most one active command at a time together with its persistent
/// [`Context`]. The outer loop polls [`tick`](Engine::tick) once per
/// scheduling tick; while no command is active the engine is inert.
pub struct Engine<P> {
    active: Option<CommandFn<P>>,
    context: Context,
}

impl<P> Engine<P> {
    /// Create an idle engine.
    pub const fn new() -> Self {
        Self {
            active: None,
            context: Context::new(),
        }
    }

    /// Whether a command is currently active.
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// The context of the active (or most recently run) command.
    pub fn context(&self) -> &Context {
        &self.context
    }

    /// Arm a command for execution.
    ///
    /// Resets the context to the entry state so the command starts fresh.
    /// Fails with [`Error::Busy`] if a command is already active; the
    /// caller decides whether to report that or retry after completion.
    pub fn select(&mut self, command: CommandFn<P>) -> Result<(), Error> {
        if self.active.is_some() {
            return Err(Error::Busy);
        }
        self.context.reset();
        self.active = Some(command);
        Ok(())
    }

    /// Disarm the active command, if any, without advancing it.
    ///
    /// The command gets no notification; a payload that must release
    /// hardware on abort should expose that as part of its own states
    /// instead of relying on cancellation.
    pub fn cancel(&mut self) {
        self.active = None;
    }

    /// Advance the active command by one bounded step.
    ///
    /// Returns [`Tick::Idle`] when nothing is active. On
    /// [`Step::Complete`] the active command is cleared and
    /// [`Tick::Finished`] is returned; the command will not be advanced
    /// again until re-selected.
    pub fn tick(&mut self, io: &mut TickIo<'_>, platform: &mut P) -> Tick {
        let Some(command) = self.active else {
            return Tick::Idle;
        };
        match command(&mut self.context, io, platform) {
            Step::Continue => Tick::Running,
            Step::Complete => {
                self.active = None;
                Tick::Finished
            }
        }
    }
}

impl<P> Default for Engine<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> fmt::Debug for Engine<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("active", &self.active.is_some())
            .field("context", &self.context)
            .finish()
    }
}
