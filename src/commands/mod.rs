#![allow(missing_docs)]
#![deny(unsafe_code)]

//! # Template command payloads
//!
//! Example commands the shell core ships with, plus a compiled-in demo tree
//! and a pure-software [`SimBoard`] for host-side tests and documentation.
//! Applications typically replace all of this with their own payloads; the
//! value here is the shape: every command is a `match` over its context
//! state, does one bounded unit of work per tick, and routes argument
//! errors to its exit state instead of failing.
//!
//! Hardware access goes through the [`Board`] trait so the same payloads
//! run against real GPIO on target and against [`SimBoard`] on the host.
//! The command functions are generic over `B: Board` and monomorphise to
//! [`CommandFn<B>`](crate::engine::CommandFn) for the application's board
//! type.

use crate::engine::{Context, Step, TickIo};
use crate::tree::{Block, Entry};

/// Ticks spent in each delay state of [`flash`], per LED phase.
pub const FLASH_DELAY_TICKS: i32 = 100;

/// Number of output rounds [`load`] produces before completing.
pub const LOAD_ROUNDS: i32 = 500;

/// Platform hooks the template commands drive.
pub trait Board {
    /// Drive the LED pin to the given level.
    fn led(&mut self, on: bool);

    /// Toggle the LED pin.
    fn toggle_led(&mut self);

    /// Persistent completed-run counter reported by [`call_count`].
    ///
    /// Lives on the board rather than in the command context so it
    /// survives re-selection.
    fn run_count(&mut self) -> &mut u32;
}

/// A software board for examples and host-side tests.
///
/// Records every interaction so tests can assert both totals and per-tick
/// bounds.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SimBoard {
    /// Current LED level.
    pub led_on: bool,
    /// Number of `led(true)` calls.
    pub on_count: u32,
    /// Number of `led(false)` calls.
    pub off_count: u32,
    /// Number of toggle calls.
    pub toggles: u32,
    /// Completed runs of [`call_count`].
    pub runs: u32,
    /// Total board interactions, for bounded-step instrumentation.
    pub io_ops: u32,
}

impl Board for SimBoard {
    fn led(&mut self, on: bool) {
        self.io_ops += 1;
        self.led_on = on;
        if on {
            self.on_count += 1;
        } else {
            self.off_count += 1;
        }
    }

    fn toggle_led(&mut self) {
        self.io_ops += 1;
        self.led_on = !self.led_on;
        self.toggles += 1;
    }

    fn run_count(&mut self) -> &mut u32 {
        self.io_ops += 1;
        &mut self.runs
    }
}

/// `cnt` - reports how many runs have completed, then increments.
///
/// The value is printed before the increment, so the first run reports 0
/// and each following run reports one more. Demonstrates state that must
/// survive across whole runs (it lives on the board, not in the context).
pub fn call_count<B: Board>(ctx: &mut Context, io: &mut TickIo<'_>, board: &mut B) -> Step {
    match ctx.state() {
        0 => {
            let runs = *board.run_count();
            io.print(format_args!("\r\nCalled {} times", runs));
            ctx.goto(1);
            Step::Continue
        }
        _ => {
            *board.run_count() += 1;
            Step::Complete
        }
    }
}

/// `led` - toggles the LED.
///
/// Simple enough to execute in one call; no state machine needed.
pub fn led_toggle<B: Board>(_ctx: &mut Context, _io: &mut TickIo<'_>, board: &mut B) -> Step {
    board.toggle_led();
    Step::Complete
}

/// `flash N` - flash the LED `N` times, with `N` taken from the command line.
///
/// Demonstrates argument parsing and delay-by-self-loop. A missing,
/// malformed, or non-positive argument transitions straight to the exit
/// state without ever touching the LED. With delay `D` ticks per phase the
/// whole run takes `N * (2 * D + 3) + 2` ticks.
pub fn flash<B: Board>(ctx: &mut Context, io: &mut TickIo<'_>, board: &mut B) -> Step {
    const EXIT: u16 = 6;
    match ctx.state() {
        0 => {
            // vars[0]: flashes remaining, vars[1]: delay countdown
            match parse_count(io.input()) {
                Some(n) if n > 0 => {
                    ctx.vars[0] = n;
                    ctx.goto(1);
                }
                _ => ctx.goto(EXIT),
            }
            Step::Continue
        }
        1 => {
            board.led(true);
            ctx.vars[1] = FLASH_DELAY_TICKS;
            ctx.goto(2);
            Step::Continue
        }
        2 => {
            ctx.vars[1] -= 1;
            if ctx.vars[1] <= 0 {
                ctx.goto(3);
            }
            Step::Continue
        }
        3 => {
            board.led(false);
            ctx.vars[1] = FLASH_DELAY_TICKS;
            ctx.goto(4);
            Step::Continue
        }
        4 => {
            ctx.vars[1] -= 1;
            if ctx.vars[1] <= 0 {
                ctx.goto(5);
            }
            Step::Continue
        }
        5 => {
            ctx.vars[0] -= 1;
            ctx.goto(if ctx.vars[0] == 0 { EXIT } else { 1 });
            Step::Continue
        }
        _ => Step::Complete,
    }
}

/// `load` - soak payload printing a running value for [`LOAD_ROUNDS`] rounds.
///
/// Demonstrates the write-then-poll output discipline: each round starts
/// with a self-loop waiting for the previous transfer to drain before
/// printing again.
pub fn load<B: Board>(ctx: &mut Context, io: &mut TickIo<'_>, _board: &mut B) -> Step {
    match ctx.state() {
        0 => {
            // vars[0]: round, vars[1]: accumulator
            if !io.tx_busy() {
                ctx.goto(1);
            }
            Step::Continue
        }
        1 => {
            io.print(format_args!("\r\nValues : {} {}", ctx.vars[0], ctx.vars[1]));
            ctx.goto(2);
            Step::Continue
        }
        2 => {
            ctx.vars[0] += 1;
            if ctx.vars[0] == LOAD_ROUNDS {
                ctx.goto(3);
            } else {
                ctx.vars[1] = ctx.vars[1].wrapping_add(ctx.vars[0]);
                ctx.goto(0);
            }
            Step::Continue
        }
        _ => Step::Complete,
    }
}

fn parse_count(input: &str) -> Option<i32> {
    let mut tokens = input.split_ascii_whitespace();
    tokens.next()?;
    tokens.next()?.parse().ok()
}

static LEVEL_2_ENTRIES: [Entry<SimBoard>; 2] = [
    Entry::title("Submenu 2", 2),
    Entry::command("load - performance test", load::<SimBoard>),
];
static LEVEL_2: Block<SimBoard> = Block::new(&LEVEL_2_ENTRIES);

static LEVEL_1_ENTRIES: [Entry<SimBoard>; 3] = [
    Entry::title("Submenu 1", 3),
    Entry::command("load - performance test", load::<SimBoard>),
    Entry::submenu("sm2 - nested submenu example", &LEVEL_2),
];
static LEVEL_1: Block<SimBoard> = Block::new(&LEVEL_1_ENTRIES);

static ROOT_ENTRIES: [Entry<SimBoard>; 5] = [
    Entry::title("demo", 5),
    Entry::submenu("sm1 - submenu example", &LEVEL_1),
    Entry::command("led - toggles the LED", led_toggle::<SimBoard>),
    Entry::command("flash N - flash the LED 'N' times", flash::<SimBoard>),
    Entry::command("cnt - displays its own call count", call_count::<SimBoard>),
];
static ROOT: Block<SimBoard> = Block::new(&ROOT_ENTRIES);

/// The compiled-in demo tree: a root block named `demo` with a nested
/// submenu level, wired to the template commands over [`SimBoard`].
pub fn demo_tree() -> &'static Block<SimBoard> {
    &ROOT
}
