//! Shell phase dispatcher tying the step engine and the command tree together.
//!
//! Exactly one macro-phase of interaction is active at any instant:
//! collecting input, producing output, or executing the active command. The
//! [`Shell`] tracks that phase and hands the shared buffers between the
//! collaborators; ownership transfer *is* the phase transition, so no
//! synchronization primitives exist. The outer runtime drives everything by
//! polling [`Shell::tick`] once per scheduling tick and reacting to the
//! phase it reports.
//!
//! # Division of labour
//!
//! The outer runtime (line editor, prompt renderer, UART/DMA driver) stays
//! outside this crate. It:
//!
//! - collects a command line and hands it to [`Shell::submit`];
//! - polls [`Shell::tick`] every tick;
//! - when the phase is [`Phase::ProduceOutput`], takes the buffered text
//!   with [`Shell::take_output`], starts transmission, and calls
//!   [`Shell::tx_complete`] when the transfer is done (write-then-poll,
//!   never write-while-busy).
//!
//! # Examples
//!
//! ```rust
//! use tickshell::commands::{self, SimBoard};
//! use tickshell::shell::{Phase, Resolution, Shell};
//!
//! let mut shell = Shell::new(commands::demo_tree(), SimBoard::default());
//!
//! // Menu navigation with an explicit stack.
//! assert_eq!(shell.submit("sm1"), Ok(Resolution::Descended));
//! assert_eq!(shell.current_block().title(), "Submenu 1");
//! assert_eq!(shell.submit("up"), Ok(Resolution::Ascended));
//!
//! // A leaf entry arms the engine.
//! assert_eq!(shell.submit("cnt"), Ok(Resolution::Started));
//! assert_eq!(shell.phase(), Phase::RunCommand);
//!
//! shell.tick();
//! assert_eq!(shell.phase(), Phase::ProduceOutput);
//! let text = shell.take_output().unwrap();
//! assert_eq!(text.as_str(), "\r\nCalled 0 times");
//! shell.tx_complete();
//!
//! shell.tick();
//! assert_eq!(shell.phase(), Phase::AwaitInput);
//! ```

use core::fmt;

use crate::engine::{Engine, OUTPUT_CAPACITY, Tick, TickIo};
use crate::tree::{self, Block, Navigator};

/// Capacity of the captured input line buffer.
pub const INPUT_CAPACITY: usize = 128;

/// Built-in token returning to the parent menu level.
pub const PARENT_TOKEN: &str = "up";

/// The macro-phase of interaction currently owning the shared buffers.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Phase {
    /// The input collaborator owns the buffers; the shell waits for a
    /// submitted line.
    AwaitInput,
    /// Buffered output is ready for the transport to take and transmit.
    ProduceOutput,
    /// The engine owns the buffers and advances the active command.
    RunCommand,
}

#[cfg(feature = "defmt")]
impl defmt::Format for Phase {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Phase::AwaitInput => defmt::write!(f, "AwaitInput"),
            Phase::ProduceOutput => defmt::write!(f, "ProduceOutput"),
            Phase::RunCommand => defmt::write!(f, "RunCommand"),
        }
    }
}

/// What a submitted line resolved to.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Resolution {
    /// The line was empty; nothing happened.
    Ignored,
    /// Returned towards the parent menu level (a no-op at the root).
    Ascended,
    /// Entered a submenu.
    Descended,
    /// A leaf matched; its command is now active.
    Started,
}

/// A common error type for shell operations.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Error {
    /// A command is active (or output is pending); the line was rejected.
    CommandActive,
    /// No entry in the current block matches the submitted name.
    UnknownCommand,
    /// The submitted line exceeds [`INPUT_CAPACITY`].
    LineTooLong,
    /// An entry index beyond the current block's declared count.
    IndexOutOfRange,
    /// The entry at the given index carries no command.
    NotInvocable,
    /// Menu nesting exceeds the navigation stack capacity.
    MenuTooDeep,
}

#[cfg(feature = "defmt")]
impl defmt::Format for Error {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Error::CommandActive => defmt::write!(f, "CommandActive"),
            Error::UnknownCommand => defmt::write!(f, "UnknownCommand"),
            Error::LineTooLong => defmt::write!(f, "LineTooLong"),
            Error::IndexOutOfRange => defmt::write!(f, "IndexOutOfRange"),
            Error::NotInvocable => defmt::write!(f, "NotInvocable"),
            Error::MenuTooDeep => defmt::write!(f, "MenuTooDeep"),
        }
    }
}

/// The shell core: engine, navigator, platform, buffers, and phase.
///
/// `P` is the application's platform/board type; the shell owns it and
/// passes it to the active command on every tick.
pub struct Shell<P: 'static> {
    engine: Engine<P>,
    nav: Navigator<P>,
    platform: P,
    phase: Phase,
    input: heapless::String<INPUT_CAPACITY>,
    output: heapless::String<OUTPUT_CAPACITY>,
    tx_busy: bool,
}

impl<P> Shell<P> {
    /// Create a shell seeded with the root block and the platform value.
    pub fn new(root: &'static Block<P>, platform: P) -> Self {
        Self {
            engine: Engine::new(),
            nav: Navigator::new(root),
            platform,
            phase: Phase::AwaitInput,
            input: heapless::String::new(),
            output: heapless::String::new(),
            tx_busy: false,
        }
    }

    /// The currently active phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The root block this shell was seeded with.
    pub fn root(&self) -> &'static Block<P> {
        self.nav.root()
    }

    /// The root block's title label, shown at the start of the prompt.
    pub fn device_name(&self) -> &'static str {
        self.nav.root().title()
    }

    /// The menu level the user is currently looking at.
    pub fn current_block(&self) -> &'static Block<P> {
        self.nav.current()
    }

    /// How many levels below the root the current block sits.
    pub fn menu_depth(&self) -> usize {
        self.nav.depth()
    }

    /// Shared access to the platform value.
    pub fn platform(&self) -> &P {
        &self.platform
    }

    /// Exclusive access to the platform value.
    pub fn platform_mut(&mut self) -> &mut P {
        &mut self.platform
    }

    /// Resolve a submitted command line.
    ///
    /// Only valid while awaiting input; in any other phase the line is
    /// rejected with [`Error::CommandActive`] (re-selection while a
    /// command runs is rejected, never queued or preempted). The line is
    /// captured into the input buffer first, so an armed command can parse
    /// its arguments from [`TickIo::input`] during its entry state.
    ///
    /// Resolution order: an empty line is [`Resolution::Ignored`]; the
    /// [`PARENT_TOKEN`] ascends; otherwise the first token is matched
    /// against the invocation names of the current block's entries, where
    /// a submenu descends and a leaf arms the engine.
    pub fn submit(&mut self, line: &str) -> Result<Resolution, Error> {
        if self.phase != Phase::AwaitInput {
            return Err(Error::CommandActive);
        }
        self.input.clear();
        self.input.push_str(line).map_err(|_| Error::LineTooLong)?;

        let Some(token) = line.split_ascii_whitespace().next() else {
            return Ok(Resolution::Ignored);
        };
        if token == PARENT_TOKEN {
            self.nav.ascend();
            return Ok(Resolution::Ascended);
        }

        let block = self.nav.current();
        for index in 1..block.entry_count() {
            let Ok(entry) = block.child(index) else {
                break;
            };
            if entry.name() != token {
                continue;
            }
            if entry.descend().is_some() {
                self.nav.descend(index).map_err(|e| match e {
                    tree::Error::DepthExceeded => Error::MenuTooDeep,
                    _ => Error::UnknownCommand,
                })?;
                return Ok(Resolution::Descended);
            }
            if let Some(command) = entry.select() {
                self.engine
                    .select(command)
                    .map_err(|_| Error::CommandActive)?;
                self.phase = Phase::RunCommand;
                return Ok(Resolution::Started);
            }
        }
        Err(Error::UnknownCommand)
    }

    /// Arm the leaf at `index` in the current block directly.
    ///
    /// For index-driven UIs that list entries instead of matching typed
    /// names. The input buffer is left untouched, so leaves that parse
    /// arguments should be started through [`submit`](Shell::submit)
    /// instead.
    pub fn invoke(&mut self, index: usize) -> Result<(), Error> {
        if self.phase != Phase::AwaitInput {
            return Err(Error::CommandActive);
        }
        let entry = self
            .nav
            .current()
            .child(index)
            .map_err(|_| Error::IndexOutOfRange)?;
        let command = entry.select().ok_or(Error::NotInvocable)?;
        self.engine
            .select(command)
            .map_err(|_| Error::CommandActive)?;
        self.phase = Phase::RunCommand;
        Ok(())
    }

    /// Enter the submenu at `index` in the current block.
    pub fn descend(&mut self, index: usize) -> Result<&'static Block<P>, tree::Error> {
        self.nav.descend(index)
    }

    /// Return to the parent menu level; `false` when already at the root.
    pub fn ascend(&mut self) -> bool {
        self.nav.ascend()
    }

    /// Advance the shell by one tick.
    ///
    /// In [`Phase::RunCommand`] this advances the active command one
    /// bounded step; if the command printed (or explicitly requested
    /// output) the phase moves to [`Phase::ProduceOutput`], and on
    /// completion with nothing left to transmit it returns straight to
    /// [`Phase::AwaitInput`]. In the other phases a tick is a no-op: the
    /// shell is waiting on the input or output collaborator.
    pub fn tick(&mut self) -> Phase {
        if self.phase == Phase::RunCommand {
            let mut io = TickIo::new(self.input.as_str(), &mut self.output, self.tx_busy);
            let outcome = self.engine.tick(&mut io, &mut self.platform);
            let wants_output = io.output_requested();
            self.phase = match outcome {
                Tick::Running => {
                    if wants_output {
                        Phase::ProduceOutput
                    } else {
                        Phase::RunCommand
                    }
                }
                Tick::Finished | Tick::Idle => {
                    if wants_output {
                        Phase::ProduceOutput
                    } else {
                        Phase::AwaitInput
                    }
                }
            };
        }
        self.phase
    }

    /// Take the buffered output for transmission.
    ///
    /// Only yields text in [`Phase::ProduceOutput`]. Taking the output
    /// marks the transmitter busy until [`tx_complete`](Shell::tx_complete)
    /// is called, and moves the phase back to the command (if one is still
    /// active) or to the prompt.
    pub fn take_output(&mut self) -> Option<heapless::String<OUTPUT_CAPACITY>> {
        if self.phase != Phase::ProduceOutput {
            return None;
        }
        let text = core::mem::take(&mut self.output);
        if !text.is_empty() {
            self.tx_busy = true;
        }
        self.phase = if self.engine.is_active() {
            Phase::RunCommand
        } else {
            Phase::AwaitInput
        };
        Some(text)
    }

    /// Transport completion callback: the previous output has drained.
    ///
    /// Clears the busy flag commands may poll via [`TickIo::tx_busy`].
    pub fn tx_complete(&mut self) {
        self.tx_busy = false;
    }

    /// Whether the transmitter is still draining a previous output.
    pub fn tx_busy(&self) -> bool {
        self.tx_busy
    }

    /// Abort the active command, if any, and return to the prompt.
    ///
    /// The command gets no notification (there is no built-in cancellation
    /// protocol); pending output is discarded.
    pub fn cancel(&mut self) {
        self.engine.cancel();
        self.output.clear();
        self.phase = Phase::AwaitInput;
    }
}

impl<P> fmt::Debug for Shell<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Shell")
            .field("phase", &self.phase)
            .field("input", &self.input.as_str())
            .field("menu_depth", &self.nav.depth())
            .field("tx_busy", &self.tx_busy)
            .field("engine", &self.engine)
            .finish()
    }
}
