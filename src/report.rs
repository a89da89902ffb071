//! Reporting boundary.
//!
//! The engine hands unmet dependencies to a [`Reporter`] one failing
//! checker at a time, already grouped by kind. All user-facing wording
//! lives on the reporter side.

use serde::Serialize;
use std::collections::HashMap;

use crate::declaration::{DeclarationKind, MissingDependency, Observed};
use crate::error::{DepVerifyError, Result};
use crate::handler::Handler;

/// Receives the unmet dependencies of one failing checker.
pub trait Reporter {
    /// Report the missing dependencies of one checker.
    ///
    /// Returns [`DepVerifyError::UnsupportedKind`] when the reporter cannot
    /// render `kind`.
    fn report(
        &mut self,
        kind: DeclarationKind,
        missing: &[MissingDependency],
        is_optional: bool,
    ) -> Result<()>;
}

/// Headings used for one declaration kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KindMessages {
    /// Heading when the failure blocks activation.
    pub required: String,
    /// Heading when the failure may be ignored.
    pub optional: String,
}

impl KindMessages {
    /// Headings for the required and optional variants of one kind.
    pub fn new(required: impl Into<String>, optional: impl Into<String>) -> Self {
        Self {
            required: required.into(),
            optional: optional.into(),
        }
    }
}

/// One rendered group of missing dependencies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportEntry {
    /// Declaration kind of the failing checker.
    pub kind: DeclarationKind,
    /// Whether the group does not block activation.
    pub optional: bool,
    /// Catalogue heading chosen for `kind` and `optional`.
    pub heading: String,
    /// One description per missing dependency.
    pub items: Vec<String>,
}

/// Reporter that turns missing dependencies into plain text.
#[derive(Debug, Clone, Default)]
pub struct TextReporter {
    messages: HashMap<DeclarationKind, KindMessages>,
    entries: Vec<ReportEntry>,
}

impl TextReporter {
    /// A reporter that knows no kinds.
    pub fn new() -> Self {
        Self::default()
    }

    /// A reporter with headings for every declaration kind.
    pub fn with_defaults() -> Self {
        Self::new()
            .with_messages(
                DeclarationKind::Capability,
                KindMessages::new(
                    "Required capabilities are missing",
                    "Optional capabilities are missing",
                ),
            )
            .with_messages(
                DeclarationKind::Callable,
                KindMessages::new(
                    "Required functions are not available",
                    "Optional functions are not available",
                ),
            )
            .with_messages(
                DeclarationKind::ConfigurationValue,
                KindMessages::new(
                    "Configuration values are incompatible",
                    "Recommended configuration values are not met",
                ),
            )
            .with_messages(
                DeclarationKind::SiblingComponent,
                KindMessages::new(
                    "Required components are missing or outdated",
                    "Optional components are missing or outdated",
                ),
            )
    }

    /// Register headings for a kind.
    pub fn with_messages(mut self, kind: DeclarationKind, messages: KindMessages) -> Self {
        self.messages.insert(kind, messages);
        self
    }

    /// Entries reported so far.
    pub fn entries(&self) -> &[ReportEntry] {
        &self.entries
    }

    /// Whether any reported group blocks activation.
    pub fn has_required(&self) -> bool {
        self.entries.iter().any(|entry| !entry.optional)
    }

    /// Entries as indented text lines.
    pub fn lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        for entry in &self.entries {
            lines.push(format!("{}:", entry.heading));
            lines.extend(entry.items.iter().map(|item| format!("  - {}", item)));
        }
        lines
    }

    /// Entries as one block of text.
    pub fn render(&self) -> String {
        self.lines().join("\n")
    }
}

impl Reporter for TextReporter {
    fn report(
        &mut self,
        kind: DeclarationKind,
        missing: &[MissingDependency],
        is_optional: bool,
    ) -> Result<()> {
        let messages = self
            .messages
            .get(&kind)
            .ok_or(DepVerifyError::UnsupportedKind { kind })?;
        let heading = if is_optional {
            messages.optional.clone()
        } else {
            messages.required.clone()
        };
        self.entries.push(ReportEntry {
            kind,
            optional: is_optional,
            heading,
            items: missing.iter().map(describe).collect(),
        });
        Ok(())
    }
}

/// One-line description of a missing dependency.
pub fn describe(missing: &MissingDependency) -> String {
    match &missing.observed {
        Observed::Absent => missing.declaration.to_string(),
        Observed::ConfigValue { raw, .. } => {
            format!("{} (currently {})", missing.declaration, raw)
        }
        Observed::Version {
            required,
            installed,
        } => format!(
            "{} requires version {} (installed: {})",
            missing.name(),
            required,
            installed
        ),
    }
}

/// Send every failing checker of `handler` to `reporter`.
///
/// Whether a group is optional comes from the handler's verdict for that
/// checker, the same verdict the reducer reads. Returns the number of
/// groups reported.
pub fn report_missing(handler: &dyn Handler, reporter: &mut dyn Reporter) -> Result<usize> {
    let status = handler.fulfillment();
    let missing = handler.missing_dependencies();
    let mut reported = 0;

    for (kind, checker_id, items) in missing.entries() {
        if items.is_empty() {
            continue;
        }
        let optional = status
            .verdict(kind, checker_id)
            .map_or(handler.is_optional(), |verdict| verdict.optional);
        reporter.report(kind, items, optional)?;
        reported += 1;
    }

    Ok(reported)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checker::{CapabilityChecker, ComponentChecker, ConfigValueChecker};
    use crate::declaration::{ComponentRequirement, DependencyDeclaration};
    use crate::environment::{HostEnvironment, StaticEnvironment};
    use crate::handler::{MultiCheckerHandler, NullHandler, SingleCheckerHandler};
    use std::sync::Arc;

    fn env() -> Arc<dyn HostEnvironment> {
        Arc::new(
            StaticEnvironment::new()
                .with_config("memory_limit", "64M")
                .with_component("shop", Some("1.9.9")),
        )
    }

    #[test]
    fn describes_each_observation() {
        assert_eq!(
            describe(&MissingDependency::absent(DependencyDeclaration::capability(
                "curl"
            ))),
            "curl"
        );
        let version = MissingDependency::new(
            DependencyDeclaration::component(ComponentRequirement::new("shop").at_least("2.0.0")),
            Observed::Version {
                required: "2.0.0".to_string(),
                installed: "1.9.9".to_string(),
            },
        );
        assert_eq!(
            describe(&version),
            "shop requires version 2.0.0 (installed: 1.9.9)"
        );
        let config = MissingDependency::new(
            DependencyDeclaration::config_minimum("memory_limit", 134217728),
            Observed::ConfigValue {
                raw: "64M".to_string(),
                normalized: Some(67108864),
            },
        );
        assert_eq!(
            describe(&config),
            "memory_limit >= 134217728 (currently 64M)"
        );
    }

    #[test]
    fn unknown_kind_is_unsupported() {
        let mut reporter = TextReporter::new();
        let err = reporter
            .report(DeclarationKind::Callable, &[], false)
            .unwrap_err();
        assert!(matches!(
            err,
            DepVerifyError::UnsupportedKind {
                kind: DeclarationKind::Callable
            }
        ));
    }

    #[test]
    fn reports_each_failing_checker() {
        let env = env();
        let handler = MultiCheckerHandler::new("plugin_active")
            .with_checker(Box::new(
                ConfigValueChecker::new("plugin_config", env.clone()).with_declaration(
                    DependencyDeclaration::config_minimum("memory_limit", 134217728),
                ),
            ))
            .with_checker(Box::new(
                ComponentChecker::new("plugin_optional_components", env.clone())
                    .with_requirement(ComponentRequirement::new("shop").at_least("2.0.0")),
            ))
            .with_checker(Box::new(
                CapabilityChecker::new("plugin_caps", env).with_names(Vec::<String>::new()),
            ));

        let mut reporter = TextReporter::with_defaults();
        let reported = report_missing(&handler, &mut reporter).unwrap();
        assert_eq!(reported, 2);

        let entries = reporter.entries();
        assert_eq!(entries[0].kind, DeclarationKind::ConfigurationValue);
        assert!(!entries[0].optional);
        assert_eq!(entries[1].kind, DeclarationKind::SiblingComponent);
        assert!(entries[1].optional);
        assert!(reporter.has_required());

        let text = reporter.render();
        assert!(text.contains("Configuration values are incompatible:"));
        assert!(text.contains("  - shop requires version 2.0.0 (installed: 1.9.9)"));
    }

    #[test]
    fn optional_handler_marks_every_group_optional() {
        let checker = CapabilityChecker::new("caps", env()).with_names(["imagick"]);
        let handler = SingleCheckerHandler::new("plugin_active", Box::new(checker)).optional(true);
        let mut reporter = TextReporter::with_defaults();
        assert_eq!(report_missing(&handler, &mut reporter).unwrap(), 1);
        assert!(!reporter.has_required());
        assert_eq!(reporter.lines()[0], "Optional capabilities are missing:");
        assert!(handler.are_dependencies_fulfilled());
    }

    #[test]
    fn unsupported_kind_propagates() {
        let checker = CapabilityChecker::new("caps", env()).with_names(["imagick"]);
        let handler = SingleCheckerHandler::new("plugin_active", Box::new(checker));
        let mut reporter = TextReporter::new();
        assert!(report_missing(&handler, &mut reporter).is_err());
    }

    #[test]
    fn null_handler_reports_nothing() {
        let mut reporter = TextReporter::new();
        assert_eq!(report_missing(&NullHandler, &mut reporter).unwrap(), 0);
        assert!(reporter.render().is_empty());
    }
}
