//! Presence checkers for capabilities and callables.
//!
//! A declaration is missing iff the environment's presence test for the
//! exact name fails. There is no partial matching and no version awareness.

use std::sync::Arc;

use super::{is_usable_name, Checker, CheckerBase};
use crate::declaration::{DeclarationKind, DependencyDeclaration, MissingDependency};
use crate::environment::HostEnvironment;

/// Checks that named capabilities are available.
#[derive(Debug)]
pub struct CapabilityChecker {
    base: CheckerBase,
}

impl CapabilityChecker {
    /// Create an empty capability checker.
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

    /// Register one capability per name, ignoring rejected names.
    pub fn with_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for name in names {
            self.register_dependency(DependencyDeclaration::capability(name));
        }
        self
    }
}

impl Checker for CapabilityChecker {
    fn base(&self) -> &CheckerBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut CheckerBase {
        &mut self.base
    }

    fn kind(&self) -> DeclarationKind {
        DeclarationKind::Capability
    }

    fn is_dependency_valid(&self, declaration: &DependencyDeclaration) -> bool {
        match declaration {
            DependencyDeclaration::Capability { name } => is_usable_name(name),
            DependencyDeclaration::Callable { .. }
            | DependencyDeclaration::ConfigurationValue { .. }
            | DependencyDeclaration::SiblingComponent(_) => false,
        }
    }

    fn missing(&self) -> Vec<MissingDependency> {
        let env = self.base.env();
        self.base
            .declarations()
            .iter()
            .filter(|declaration| match declaration {
                DependencyDeclaration::Capability { name } => !env.has_capability(name),
                _ => false,
            })
            .cloned()
            .map(MissingDependency::absent)
            .collect()
    }
}

/// Checks that named callables are defined.
#[derive(Debug)]
pub struct CallableChecker {
    base: CheckerBase,
}

impl CallableChecker {
    /// Create an empty callable checker.
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

    /// Register one callable per name, ignoring rejected names.
    pub fn with_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for name in names {
            self.register_dependency(DependencyDeclaration::callable(name));
        }
        self
    }
}

impl Checker for CallableChecker {
    fn base(&self) -> &CheckerBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut CheckerBase {
        &mut self.base
    }

    fn kind(&self) -> DeclarationKind {
        DeclarationKind::Callable
    }

    fn is_dependency_valid(&self, declaration: &DependencyDeclaration) -> bool {
        match declaration {
            DependencyDeclaration::Callable { name } => is_usable_name(name),
            DependencyDeclaration::Capability { .. }
            | DependencyDeclaration::ConfigurationValue { .. }
            | DependencyDeclaration::SiblingComponent(_) => false,
        }
    }

    fn missing(&self) -> Vec<MissingDependency> {
        let env = self.base.env();
        self.base
            .declarations()
            .iter()
            .filter(|declaration| match declaration {
                DependencyDeclaration::Callable { name } => !env.has_callable(name),
                _ => false,
            })
            .cloned()
            .map(MissingDependency::absent)
            .collect()
    }
}
