//! Routing from parsed arguments to commands, and exit outcomes.

use crate::cli::args::{Cli, Commands};
use crate::error::Result;
use crate::ui::UserInterface;

use super::{check::CheckCommand, lint::LintCommand, list::ListCommand, schema::SchemaCommand};

/// Everything checked out.
pub const EXIT_FULFILLED: i32 = 0;
/// A required dependency is missing, or the manifest has problems.
pub const EXIT_UNFULFILLED: i32 = 1;
/// The manifest could not be loaded or nothing matched the filters.
pub const EXIT_MANIFEST_ERROR: i32 = 2;

/// A CLI subcommand.
pub trait Command {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Process exit outcome of a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandResult {
    pub exit_code: i32,
}

impl CommandResult {
    pub fn success() -> Self {
        Self {
            exit_code: EXIT_FULFILLED,
        }
    }

    pub fn unfulfilled() -> Self {
        Self {
            exit_code: EXIT_UNFULFILLED,
        }
    }

    pub fn manifest_error() -> Self {
        Self {
            exit_code: EXIT_MANIFEST_ERROR,
        }
    }

    /// Map a reduced fulfillment answer to an exit outcome.
    pub fn from_fulfilled(fulfilled: bool) -> Self {
        if fulfilled {
            Self::success()
        } else {
            Self::unfulfilled()
        }
    }

    pub fn is_success(&self) -> bool {
        self.exit_code == EXIT_FULFILLED
    }
}

/// Builds the command for a parsed invocation and runs it.
#[derive(Debug, Default)]
pub struct CommandDispatcher;

impl CommandDispatcher {
    pub fn new() -> Self {
        Self
    }

    fn command(&self, cli: &Cli) -> Box<dyn Command> {
        match &cli.command {
            Commands::Check(args) => Box::new(CheckCommand::new(args.clone())),
            Commands::List(args) => Box::new(ListCommand::new(args.clone())),
            Commands::Lint(args) => Box::new(LintCommand::new(args.clone())),
            Commands::Schema => Box::new(SchemaCommand::new()),
        }
    }

    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        tracing::debug!("dispatching {:?}", cli.command);
        self.command(cli).execute(ui)
    }
}
