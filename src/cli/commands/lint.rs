//! Lint command implementation.
//!
//! The `depverify lint` command validates a manifest and prints every
//! problem found.

use crate::cli::args::LintArgs;
use crate::config::validate_manifest;
use crate::error::Result;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::load_for_command;

/// The lint command implementation.
pub struct LintCommand {
    args: LintArgs,
}

impl LintCommand {
    /// Create a new lint command.
    pub fn new(args: LintArgs) -> Self {
        Self { args }
    }
}

impl Command for LintCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let Some(manifest) = load_for_command(&self.args.manifest, ui)? else {
            return Ok(CommandResult::manifest_error());
        };

        let errors = validate_manifest(&manifest);
        if errors.is_empty() {
            ui.success("Manifest is valid");
            return Ok(CommandResult::success());
        }

        for error in &errors {
            let location = match (&error.component, &error.context) {
                (Some(component), Some(context)) => format!(" ({}/{})", component, context),
                _ => String::new(),
            };
            ui.error(&format!("[{}] {}{}", error.rule, error.message, location));
        }
        ui.message(&format!("{} problem(s) found", errors.len()));

        Ok(CommandResult::unfulfilled())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockUI;
    use std::fs;
    use tempfile::TempDir;

    fn run(yaml: &str) -> (CommandResult, MockUI) {
        let temp = TempDir::new().unwrap();
        let manifest = temp.path().join("deps.yml");
        fs::write(&manifest, yaml).unwrap();
        let mut ui = MockUI::new();
        let result = LintCommand::new(LintArgs { manifest })
            .execute(&mut ui)
            .unwrap();
        (result, ui)
    }

    #[test]
    fn valid_manifest_passes() {
        let (result, ui) = run(
            "components:\n  plugin:\n    contexts:\n      active:\n        checkers:\n          - kind: capability\n            declarations:\n              - name: curl\n",
        );
        assert!(result.is_success());
        assert!(ui.has_success("valid"));
    }

    #[test]
    fn problems_fail_with_location() {
        let (result, ui) = run(
            "components:\n  plugin:\n    contexts:\n      active:\n        checkers:\n          - kind: nonsense\n",
        );
        assert_eq!(result.exit_code, 1);
        assert!(ui.has_error("[unknown-kind]"));
        assert!(ui.has_error("(plugin/active)"));
        assert!(ui.has_message("1 problem(s) found"));
    }

    #[test]
    fn unparseable_manifest_exits_two() {
        let (result, ui) = run("components: [");
        assert_eq!(result, CommandResult::manifest_error());
        assert!(ui.has_error("Parse error"));
    }
}
