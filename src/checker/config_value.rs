//! Configuration value checker.
//!
//! Reads the live value of each declared key and compares it with the
//! expectation. A key with no live value cannot be checked and is never
//! reported missing.

use std::sync::Arc;

use super::{is_usable_name, Checker, CheckerBase};
use crate::declaration::{
    size, version, Comparison, DeclarationKind, DependencyDeclaration, ExpectedValue,
    MissingDependency, Observed,
};
use crate::environment::HostEnvironment;

/// Live integer value meaning "no limit".
const UNLIMITED: i64 = -1;

/// Checks configuration values against expectations.
#[derive(Debug)]
pub struct ConfigValueChecker {
    base: CheckerBase,
}

impl ConfigValueChecker {
    /// Create an empty configuration checker.
    pub fn new(id: impl Into<String>, env: Arc<dyn HostEnvironment>) -> Self {
        Self {
            base: CheckerBase::new(id, env),
        }
    }

    /// Override whether failures are optional.
    pub fn optional(mut self, optional: bool) -> Self {
        self.base.set_optional(optional);
        self
    }

    /// Register a declaration, ignoring it if rejected.
    pub fn with_declaration(mut self, declaration: DependencyDeclaration) -> Self {
        self.register_dependency(declaration);
        self
    }

    /// Evaluate one declaration; `Some` when it is unmet.
    fn evaluate(
        &self,
        key: &str,
        expected: &ExpectedValue,
        comparison: Comparison,
    ) -> Option<Observed> {
        let Some(raw) = self.base.env().config_value(key) else {
            tracing::trace!("Configuration '{}' is not set; skipping", key);
            return None;
        };

        if let Some(want) = expected.as_integer() {
            let live = size::parse_size(&raw);
            let satisfied = match (live, comparison) {
                (None, _) => false,
                (Some(value), Comparison::Exact) => value == want,
                (Some(UNLIMITED), Comparison::Minimum) => true,
                (Some(value), Comparison::Minimum) => value >= want,
            };
            tracing::trace!("Configuration '{}' = '{}' satisfied: {}", key, raw, satisfied);
            return (!satisfied).then_some(Observed::ConfigValue {
                raw,
                normalized: live,
            });
        }

        // Integer expectations were handled above.
        let ExpectedValue::Text(want) = expected else {
            return None;
        };
        let satisfied = match comparison {
            Comparison::Exact => raw.trim() == want,
            Comparison::Minimum => version::satisfies_minimum(&raw, want),
        };
        tracing::trace!("Configuration '{}' = '{}' satisfied: {}", key, raw, satisfied);
        (!satisfied).then_some(Observed::ConfigValue {
            raw,
            normalized: None,
        })
    }
}

impl Checker for ConfigValueChecker {
    fn base(&self) -> &CheckerBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut CheckerBase {
        &mut self.base
    }

    fn kind(&self) -> DeclarationKind {
        DeclarationKind::ConfigurationValue
    }

    fn is_dependency_valid(&self, declaration: &DependencyDeclaration) -> bool {
        match declaration {
            DependencyDeclaration::ConfigurationValue {
                key,
                expected,
                comparison,
            } => {
                if !is_usable_name(key) {
                    return false;
                }
                match (expected, comparison) {
                    (ExpectedValue::Text(text), Comparison::Minimum) => {
                        expected.as_integer().is_some() || version::is_valid_version(text)
                    }
                    _ => true,
                }
            }
            DependencyDeclaration::Capability { .. }
            | DependencyDeclaration::Callable { .. }
            | DependencyDeclaration::SiblingComponent(_) => false,
        }
    }

    fn missing(&self) -> Vec<MissingDependency> {
        self.base
            .declarations()
            .iter()
            .filter_map(|declaration| match declaration {
                DependencyDeclaration::ConfigurationValue {
                    key,
                    expected,
                    comparison,
                } => self
                    .evaluate(key, expected, *comparison)
                    .map(|observed| MissingDependency::new(declaration.clone(), observed)),
                _ => None,
            })
            .collect()
    }
}
