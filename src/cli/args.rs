//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// depverify - Check whether components' declared prerequisites are met.
#[derive(Debug, Parser)]
#[command(name = "depverify")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Check whether dependencies are fulfilled
    Check(CheckArgs),

    /// List registered handlers and their declarations
    List(ListArgs),

    /// Validate a manifest
    Lint(LintArgs),

    /// Print the manifest JSON schema
    Schema,
}

/// Arguments for the `check` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CheckArgs {
    /// Path to the manifest
    #[arg(value_name = "MANIFEST")]
    pub manifest: PathBuf,

    /// Check only this component
    #[arg(long)]
    pub component: Option<String>,

    /// Check only this context (e.g. active, disabled)
    #[arg(long)]
    pub context: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `list` command.
#[derive(Debug, Clone, clap::Args)]
pub struct ListArgs {
    /// Path to the manifest
    #[arg(value_name = "MANIFEST")]
    pub manifest: PathBuf,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `lint` command.
#[derive(Debug, Clone, clap::Args)]
pub struct LintArgs {
    /// Path to the manifest
    #[arg(value_name = "MANIFEST")]
    pub manifest: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_check_with_filters() {
        let cli = Cli::parse_from([
            "depverify",
            "check",
            "deps.yml",
            "--component",
            "plugin",
            "--context",
            "active",
            "--json",
        ]);
        let Commands::Check(args) = cli.command else {
            panic!("expected check command");
        };
        assert_eq!(args.manifest, PathBuf::from("deps.yml"));
        assert_eq!(args.component.as_deref(), Some("plugin"));
        assert_eq!(args.context.as_deref(), Some("active"));
        assert!(args.json);
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::parse_from(["depverify", "lint", "deps.yml", "--debug", "--no-color"]);
        assert!(cli.debug);
        assert!(cli.no_color);
        assert!(matches!(cli.command, Commands::Lint(_)));
    }

    #[test]
    fn schema_needs_no_manifest() {
        let cli = Cli::parse_from(["depverify", "schema"]);
        assert!(matches!(cli.command, Commands::Schema));
    }

    #[test]
    fn check_requires_manifest() {
        assert!(Cli::try_parse_from(["depverify", "check"]).is_err());
    }
}
