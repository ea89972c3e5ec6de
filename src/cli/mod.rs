//! Command-line interface for keysweep
//!
//! clap parses the arguments; each subcommand lives in [`commands`] and
//! prints through the shared [`Output`] helper.

pub mod commands;
pub mod output;

pub use commands::Cli;
pub use output::Output;
