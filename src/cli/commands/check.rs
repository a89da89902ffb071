//! Check command implementation.
//!
//! The `depverify check` command registers every component context of a
//! manifest, reduces each handler to a verdict, and reports what is
//! missing. It exits 0 when every selected handler is fulfilled and 1
//! otherwise.

use serde::Serialize;

use crate::cli::args::CheckArgs;
use crate::config::{register_manifest, validate_manifest, Manifest};
use crate::declaration::MissingDependency;
use crate::error::Result;
use crate::gate::handler_identifier;
use crate::handler::Grouping;
use crate::report::{report_missing, ReportEntry, TextReporter};
use crate::service::VerificationService;
use crate::status::FulfillmentStatus;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::load_for_command;

/// The check command implementation.
pub struct CheckCommand {
    args: CheckArgs,
}

/// Outcome of one handler, as printed with `--json`.
#[derive(Debug, Serialize)]
struct HandlerReport {
    identifier: String,
    fulfilled: bool,
    optional: bool,
    status: FulfillmentStatus,
    missing: Grouping<Vec<MissingDependency>>,
    report: Vec<ReportEntry>,
}

impl CheckCommand {
    /// Create a new check command.
    pub fn new(args: CheckArgs) -> Self {
        Self { args }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &CheckArgs {
        &self.args
    }

    /// Handler identifiers selected by the component and context filters.
    fn selected(&self, manifest: &Manifest) -> Vec<String> {
        let mut ids = Vec::new();
        for (component, config) in &manifest.components {
            if self
                .args
                .component
                .as_ref()
                .is_some_and(|wanted| wanted != component)
            {
                continue;
            }
            for context in config.contexts.keys() {
                if self
                    .args
                    .context
                    .as_ref()
                    .is_some_and(|wanted| wanted != context)
                {
                    continue;
                }
                ids.push(handler_identifier(component, context));
            }
        }
        ids
    }

    fn evaluate(&self, service: &VerificationService, id: &str) -> Result<HandlerReport> {
        let handler = service.get_handler(id);
        let mut reporter = TextReporter::with_defaults();
        report_missing(handler.as_ref(), &mut reporter)?;

        Ok(HandlerReport {
            identifier: id.to_string(),
            fulfilled: handler.are_dependencies_fulfilled(),
            optional: handler.is_optional(),
            status: handler.fulfillment(),
            missing: handler.missing_dependencies(),
            report: reporter.entries().to_vec(),
        })
    }

    fn show(&self, report: &HandlerReport, ui: &mut dyn UserInterface) {
        ui.show_header(&report.identifier);

        for entry in &report.report {
            let heading = format!("{}:", entry.heading);
            if entry.optional {
                ui.warning(&heading);
            } else {
                ui.error(&heading);
            }
            for item in &entry.items {
                ui.message(&format!("    - {}", item));
            }
        }

        match (report.fulfilled, report.report.is_empty()) {
            (true, true) => ui.success("All dependencies are fulfilled"),
            (true, false) => ui.success("Fulfilled (only optional dependencies are missing)"),
            (false, _) => ui.error("Required dependencies are missing"),
        }
    }
}

impl Command for CheckCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let Some(manifest) = load_for_command(&self.args.manifest, ui)? else {
            return Ok(CommandResult::manifest_error());
        };

        let problems = validate_manifest(&manifest);
        if !self.args.json {
            for problem in &problems {
                ui.warning(&format!("[{}] {}", problem.rule, problem.message));
            }
        }

        let service = VerificationService::new();
        register_manifest(&manifest, &service);

        let selected = self.selected(&manifest);
        if selected.is_empty() {
            ui.error("No component contexts match the given filters");
            return Ok(CommandResult::manifest_error());
        }

        let reports = selected
            .iter()
            .map(|id| self.evaluate(&service, id))
            .collect::<Result<Vec<_>>>()?;
        let all_fulfilled = reports.iter().all(|report| report.fulfilled);

        if self.args.json {
            let json = serde_json::to_string_pretty(&reports).map_err(anyhow::Error::from)?;
            ui.raw(&json);
        } else {
            for report in &reports {
                self.show(report, ui);
            }
        }

        Ok(CommandResult::from_fulfilled(all_fulfilled))
    }
}
