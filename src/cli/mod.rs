//! Command-line interface for depverify.
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`commands`] - Command implementations

pub mod args;
pub mod commands;

pub use args::{CheckArgs, Cli, Commands, LintArgs, ListArgs};
pub use commands::{Command, CommandDispatcher, CommandResult};
