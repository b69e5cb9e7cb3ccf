//! # CLI Behavior
//!
//! The interactive front end. It is the only place that reads the terminal,
//! prints, handles signals, and decides exit codes.
//!
//! ## Session
//!
//! `todo [COMMAND]` runs the optional command first and then reads one command
//! per line until `exit`, end of input, or SIGINT/SIGTERM. All three paths end
//! in the same place: both collections are flushed exactly once.
//!
//! Commands missing an argument prompt for it. Required answers are asked
//! again when empty or malformed, up to `max-attempts` times.
//!
//! ## Module Structure
//!
//! - `commands`: the loop and per-command handlers
//! - `input`: input worker thread and the `Prompter` trait
//! - `render`: terminal output (colors, columns, relative dates)
//! - `setup`: argument and command-line parsing via clap
//! - `signals`: turns termination signals into loop events

mod commands;
mod input;
mod render;
pub mod setup;
mod signals;

pub use commands::run;
