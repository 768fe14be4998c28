//! # tickshell - Cooperative shell core for embedded systems
//!
//! The execution core of an embedded interactive command shell: a command
//! step engine that lets long-running or I/O-bound operations (LED flashing
//! sequences, soak loops, argument-driven actions) run to completion without
//! ever blocking the hosting device's main loop, plus a static hierarchical
//! menu tree the shell's user interface traverses to locate and invoke those
//! operations. Designed for `no_std` targets: no heap, no threads, no
//! blocking primitives.
//!
//! ## Features
//!
//! - **Zero-allocation**: Fixed-size `heapless` buffers for predictable memory usage
//! - **Non-blocking**: Every operation advances one bounded step per tick
//! - **Static command tree**: Compiled-in, read-only menu hierarchy with
//!   validated block counts
//! - **Explicit phases**: Input, output, and command execution phases with
//!   single-owner buffer handoff
//! - **Write-then-poll output**: Commands cooperate with asynchronous
//!   (DMA-backed) transmitters through a busy flag
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │   Outer Loop    │───▶│   Shell Phase   │───▶│   Step Engine   │
//! │   (main / ISR   │    │   Dispatcher    │    │   (one command  │
//! │    driven tick) │    │                 │    │    at a time)   │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//!          │                       │                       │
//!          ▼                       ▼                       ▼
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │   Input Line    │    │   Command Tree  │    │   Command       │
//! │   (captured)    │    │   (navigation)  │    │   Context       │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! The outer loop polls [`shell::Shell::tick`] once per scheduling tick.
//! While idle, submitted input lines are resolved against the current
//! [`tree::Block`] into either a navigation action or a bound command; once
//! bound, the [`engine::Engine`] owns the command until it signals
//! completion, then control returns to the prompt.
//!
//! ## Usage
//!
//! ```rust
//! use tickshell::commands::{self, SimBoard};
//! use tickshell::shell::{Phase, Shell};
//!
//! let mut shell = Shell::new(commands::demo_tree(), SimBoard::default());
//! assert_eq!(shell.device_name(), "demo");
//!
//! // Resolve a captured line into a running command.
//! shell.submit("flash 2").unwrap();
//!
//! // Drive the shell from the main loop, one bounded step per tick.
//! while shell.phase() != Phase::AwaitInput {
//!     shell.tick();
//!     if let Some(_text) = shell.take_output() {
//!         // Hand `_text` to the UART/DMA driver here.
//!         shell.tx_complete();
//!     }
//! }
//!
//! assert_eq!(shell.platform().on_count, 2);
//! ```
//!
//! ## Platform Support
//!
//! This library is designed to work on:
//! - Embedded microcontrollers (ARM Cortex-M, RISC-V, etc.)
//! - Linux-based devices for host-side testing (via the `std` feature)
//! - Any platform supporting Rust's `core` library
//!
//! ## Optional Features
//!
//! - `std`: Enable standard library support (default: disabled)
//! - `defmt`: Enable defmt logging support for embedded debugging

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(missing_docs)]
#![warn(missing_debug_implementations)]

/// Command step engine advancing the active command one bounded step per tick.
///
/// Holds the single active command and its persistent [`engine::Context`],
/// and mediates the shared input/output buffers through [`engine::TickIo`].
pub mod engine;

/// Static, read-only hierarchical command tree.
///
/// Blocks of labelled entries headed by a count-declaring title, with
/// bounds-checked lookup, submenu descent, and an explicit navigation stack.
pub mod tree;

/// Shell phase dispatcher tying the engine and tree together.
///
/// Tracks which collaborator (input, output, or the running command) owns
/// the shared buffers and hands control between them one tick at a time.
pub mod shell;

/// Template command payloads and a software board for tests and examples.
pub mod commands;
