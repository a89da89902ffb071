//! List command implementation.
//!
//! The `depverify list` command shows every handler a manifest registers
//! and the declarations of each of its checkers. Nothing is probed.

use std::collections::BTreeMap;

use crate::cli::args::ListArgs;
use crate::config::register_manifest;
use crate::error::Result;
use crate::service::VerificationService;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::load_for_command;

/// The list command implementation.
pub struct ListCommand {
    args: ListArgs,
}

impl ListCommand {
    /// Create a new list command.
    pub fn new(args: ListArgs) -> Self {
        Self { args }
    }
}

impl Command for ListCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let Some(manifest) = load_for_command(&self.args.manifest, ui)? else {
            return Ok(CommandResult::manifest_error());
        };

        let service = VerificationService::new();
        let ids = register_manifest(&manifest, &service);

        if self.args.json {
            let listing: BTreeMap<_, _> = ids
                .iter()
                .map(|id| (id.as_str(), service.get_dependencies(id)))
                .collect();
            let json = serde_json::to_string_pretty(&listing).map_err(anyhow::Error::from)?;
            ui.raw(&json);
            return Ok(CommandResult::success());
        }

        if ids.is_empty() {
            ui.message("No components declared");
            return Ok(CommandResult::success());
        }

        for id in &ids {
            let handler = service.get_handler(id);
            if handler.is_optional() {
                ui.show_header(&format!("{} (optional)", id));
            } else {
                ui.show_header(id);
            }
            for (kind, checker_id, declarations) in handler.dependencies().entries() {
                ui.message(&format!("  {} [{}]", checker_id, kind));
                for declaration in declarations {
                    ui.message(&format!("    - {}", declaration));
                }
            }
        }

        Ok(CommandResult::success())
    }
}
