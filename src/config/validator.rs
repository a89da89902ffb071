//! Manifest validation rules.
//!
//! This module checks a manifest for problems that would otherwise only
//! show up as skipped declarations at runtime:
//! - Checker kinds must be known
//! - Declarations must be accepted by their checker
//! - Checker identities must be unique within a context
//! - Static-only environment fields must not be used with the system source

use std::collections::HashSet;
use std::sync::Arc;

use crate::config::builder::new_checker;
use crate::config::schema::{EnvironmentSource, Manifest};
use crate::declaration::{DeclarationKind, DependencyDeclaration};
use crate::environment::StaticEnvironment;
use crate::error::{DepVerifyError, Result};

/// Validation error with context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Rule identifier
    pub rule: String,
    /// Human-readable error message
    pub message: String,
    /// Component name if error is component-specific
    pub component: Option<String>,
    /// Context name if error is context-specific
    pub context: Option<String>,
}

impl ValidationError {
    fn new(rule: &str, message: String) -> Self {
        Self {
            rule: rule.to_string(),
            message,
            component: None,
            context: None,
        }
    }

    fn at(mut self, component: &str, context: &str) -> Self {
        self.component = Some(component.to_string());
        self.context = Some(context.to_string());
        self
    }
}

/// Validate a manifest and return all errors.
pub fn validate_manifest(manifest: &Manifest) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    errors.extend(validate_environment(manifest));
    errors.extend(validate_components(manifest));

    errors
}

fn validate_environment(manifest: &Manifest) -> Vec<ValidationError> {
    let env = &manifest.environment;
    if env.source != EnvironmentSource::System {
        return Vec::new();
    }

    let mut errors = Vec::new();
    let static_fields = [
        ("capabilities", env.capabilities.is_empty()),
        ("callables", env.callables.is_empty()),
        ("config", env.config.is_empty()),
    ];
    for (field, empty) in static_fields {
        if !empty {
            errors.push(ValidationError::new(
                "static-only-field",
                format!(
                    "Environment field '{}' is only used with 'source: static'",
                    field
                ),
            ));
        }
    }
    errors
}

fn validate_components(manifest: &Manifest) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    // Validation never probes the host.
    let env = Arc::new(StaticEnvironment::new());

    for (component, component_config) in &manifest.components {
        if component_config.contexts.is_empty() {
            errors.push(ValidationError::new(
                "no-contexts",
                format!("Component '{}' declares no contexts", component),
            ));
        }

        for (context, context_config) in &component_config.contexts {
            if context_config.checkers.is_empty() {
                errors.push(
                    ValidationError::new(
                        "empty-context",
                        format!("Context '{}' of '{}' has no checkers", context, component),
                    )
                    .at(component, context),
                );
            }

            let mut seen = HashSet::new();
            for checker_config in &context_config.checkers {
                let id = checker_config.resolved_id(component);
                if !seen.insert(id.clone()) {
                    errors.push(
                        ValidationError::new(
                            "duplicate-checker",
                            format!("Checker '{}' appears more than once in '{}'", id, context),
                        )
                        .at(component, context),
                    );
                }

                let kind: DeclarationKind = match checker_config.kind.parse() {
                    Ok(kind) => kind,
                    Err(message) => {
                        let message = format!("Checker '{}': {}", id, message);
                        errors.push(
                            ValidationError::new("unknown-kind", message).at(component, context),
                        );
                        continue;
                    }
                };

                let checker = new_checker(kind, id.clone(), env.clone());
                for (index, raw) in checker_config.declarations.iter().enumerate() {
                    let accepted = DependencyDeclaration::from_raw(kind, raw)
                        .is_some_and(|declaration| checker.is_dependency_valid(&declaration));
                    if !accepted {
                        errors.push(
                            ValidationError::new(
                                "invalid-declaration",
                                format!(
                                    "Declaration #{} of checker '{}' is not a valid {} declaration",
                                    index + 1,
                                    id,
                                    kind
                                ),
                            )
                            .at(component, context),
                        );
                    }
                }
            }
        }
    }

    errors
}

/// Validate and return Result (for convenience).
///
/// # Errors
///
/// Returns `ManifestValidationError` if any validation rules fail.
pub fn validate(manifest: &Manifest) -> Result<()> {
    let errors = validate_manifest(manifest);

    if errors.is_empty() {
        Ok(())
    } else {
        let messages: Vec<_> = errors.iter().map(|e| e.message.clone()).collect();
        Err(DepVerifyError::ManifestValidationError {
            message: messages.join("; "),
        })
    }
}
