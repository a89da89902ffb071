//! depverify CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use depverify::cli::commands::EXIT_UNFULFILLED;
use depverify::cli::{Cli, CommandDispatcher};
use depverify::ui::{TerminalUI, UserInterface};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Logs go to stderr so `check --json` output on stdout stays parseable.
///
/// `--debug` wins over `RUST_LOG`; the default level is info.
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("depverify=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("depverify=info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    tracing::debug!(?cli, "depverify starting");

    if cli.no_color {
        std::env::set_var("NO_COLOR", "1");
    }

    let mut ui = TerminalUI::new();
    let dispatcher = CommandDispatcher::new();

    match dispatcher.dispatch(&cli, &mut ui) {
        Ok(result) => ExitCode::from(u8::try_from(result.exit_code).unwrap_or(u8::MAX)),
        Err(e) => {
            tracing::debug!(error = ?e, "command failed");
            ui.error(&format!("Error: {}", e));
            ExitCode::from(EXIT_UNFULFILLED as u8)
        }
    }
}
