//! Sibling component checker.
//!
//! Presence comes from the declaration's presence probe when it has one,
//! otherwise from the host's active set. When a minimum version is declared
//! and the component is present, the installed version comes from the
//! version probe, otherwise from host metadata, falling back to
//! [`DEFAULT_VERSION`].

use std::sync::Arc;

use super::{is_usable_name, Checker, CheckerBase};
use crate::declaration::version::{self, DEFAULT_VERSION};
use crate::declaration::{
    ComponentRequirement, DeclarationKind, DependencyDeclaration, MissingDependency, Observed,
};
use crate::environment::HostEnvironment;

/// Checks that sibling components are present and recent enough.
#[derive(Debug)]
pub struct ComponentChecker {
    base: CheckerBase,
}

impl ComponentChecker {
    /// Create an empty component checker.
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

    /// Register a requirement, ignoring it if rejected.
    pub fn with_requirement(mut self, requirement: ComponentRequirement) -> Self {
        self.register_dependency(DependencyDeclaration::component(requirement));
        self
    }

    fn is_present(&self, requirement: &ComponentRequirement) -> bool {
        match &requirement.presence_probe {
            Some(probe) => probe(),
            None => self.base.env().is_component_active(&requirement.identifier),
        }
    }

    fn installed_version(&self, requirement: &ComponentRequirement) -> String {
        let version = match &requirement.version_probe {
            Some(probe) => probe(),
            None => self.base.env().component_version(&requirement.identifier),
        };
        version.unwrap_or_else(|| DEFAULT_VERSION.to_string())
    }

    fn evaluate(&self, requirement: &ComponentRequirement) -> Option<Observed> {
        if !self.is_present(requirement) {
            return Some(Observed::Absent);
        }

        let minimum = requirement.minimum_version.as_ref()?;
        let installed = self.installed_version(requirement);
        if version::satisfies_minimum(&installed, minimum) {
            None
        } else {
            tracing::trace!(
                "Component '{}' at {} is older than {}",
                requirement.identifier,
                installed,
                minimum
            );
            Some(Observed::Version {
                required: minimum.clone(),
                installed,
            })
        }
    }
}

impl Checker for ComponentChecker {
    fn base(&self) -> &CheckerBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut CheckerBase {
        &mut self.base
    }

    fn kind(&self) -> DeclarationKind {
        DeclarationKind::SiblingComponent
    }

    fn is_dependency_valid(&self, declaration: &DependencyDeclaration) -> bool {
        match declaration {
            DependencyDeclaration::SiblingComponent(requirement) => {
                is_usable_name(&requirement.identifier)
                    && requirement
                        .minimum_version
                        .as_deref()
                        .is_none_or(version::is_valid_version)
            }
            DependencyDeclaration::Capability { .. }
            | DependencyDeclaration::Callable { .. }
            | DependencyDeclaration::ConfigurationValue { .. } => false,
        }
    }

    fn missing(&self) -> Vec<MissingDependency> {
        self.base
            .declarations()
            .iter()
            .filter_map(|declaration| match declaration {
                DependencyDeclaration::SiblingComponent(requirement) => self
                    .evaluate(requirement)
                    .map(|observed| MissingDependency::new(declaration.clone(), observed)),
                _ => None,
            })
            .collect()
    }
}
