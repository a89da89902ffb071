//! Missing dependency records.

use serde::Serialize;

use super::{DeclarationKind, DependencyDeclaration};

/// What the environment actually looked like for an unmet declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Observed {
    /// The capability, callable, or component is not present at all.
    Absent,
    /// The configuration value was read but does not satisfy the expectation.
    ConfigValue {
        /// The value as read from the environment.
        raw: String,
        /// The value as a byte count / integer, when it could be normalized.
        normalized: Option<i64>,
    },
    /// The component is present but older than required.
    Version {
        /// Minimum version that was declared.
        required: String,
        /// Version that was observed.
        installed: String,
    },
}

/// An unmet declaration plus the observed environment state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MissingDependency {
    /// The declaration that is not satisfied.
    pub declaration: DependencyDeclaration,
    /// What was observed instead.
    pub observed: Observed,
}

impl MissingDependency {
    /// Create a missing-dependency record.
    pub fn new(declaration: DependencyDeclaration, observed: Observed) -> Self {
        Self {
            declaration,
            observed,
        }
    }

    /// A declaration whose subject is absent.
    pub fn absent(declaration: DependencyDeclaration) -> Self {
        Self::new(declaration, Observed::Absent)
    }

    /// Kind of the unmet declaration.
    pub fn kind(&self) -> DeclarationKind {
        self.declaration.kind()
    }

    /// Natural key of the unmet declaration.
    pub fn name(&self) -> &str {
        self.declaration.natural_key()
    }
}
