//! Dependency checkers.
//!
//! A [`Checker`] owns the declarations of exactly one
//! [`DeclarationKind`] and reports which of them the environment does not
//! currently satisfy. Checkers are evaluated on demand and keep no state
//! between queries; declarations may only be appended.
//!
//! # Modules
//!
//! - [`presence`] - [`CapabilityChecker`] and [`CallableChecker`]
//! - [`config_value`] - [`ConfigValueChecker`]
//! - [`component`] - [`ComponentChecker`]

pub mod component;
pub mod config_value;
pub mod presence;

pub use component::ComponentChecker;
pub use config_value::ConfigValueChecker;
pub use presence::{CallableChecker, CapabilityChecker};

use std::sync::Arc;

use crate::declaration::{DeclarationKind, DependencyDeclaration, MissingDependency, RawDeclaration};
use crate::environment::HostEnvironment;
use crate::status::has_optional_marker;

/// Declarations kept in registration order, unique by natural key.
#[derive(Debug, Clone, Default)]
pub struct DeclarationSet {
    entries: Vec<DependencyDeclaration>,
}

impl DeclarationSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a declaration, replacing one with the same natural key in place.
    ///
    /// Returns `true` when an existing entry was replaced.
    pub fn insert(&mut self, declaration: DependencyDeclaration) -> bool {
        match self
            .entries
            .iter_mut()
            .find(|existing| existing.natural_key() == declaration.natural_key())
        {
            Some(existing) => {
                *existing = declaration;
                true
            }
            None => {
                self.entries.push(declaration);
                false
            }
        }
    }

    /// Iterate in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &DependencyDeclaration> {
        self.entries.iter()
    }

    /// Number of declarations.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Copy the declarations out.
    pub fn to_vec(&self) -> Vec<DependencyDeclaration> {
        self.entries.clone()
    }
}

/// State shared by every checker variant.
pub struct CheckerBase {
    id: String,
    optional: bool,
    declarations: DeclarationSet,
    env: Arc<dyn HostEnvironment>,
}

impl CheckerBase {
    /// Create a base. Optionality defaults to the legacy identity marker.
    pub fn new(id: impl Into<String>, env: Arc<dyn HostEnvironment>) -> Self {
        let id = id.into();
        Self {
            optional: has_optional_marker(&id),
            id,
            declarations: DeclarationSet::new(),
            env,
        }
    }

    /// The environment this checker probes.
    pub fn env(&self) -> &dyn HostEnvironment {
        self.env.as_ref()
    }

    /// The declarations registered so far.
    pub fn declarations(&self) -> &DeclarationSet {
        &self.declarations
    }

    pub(crate) fn set_optional(&mut self, optional: bool) {
        self.optional = optional;
    }
}

impl std::fmt::Debug for CheckerBase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CheckerBase")
            .field("id", &self.id)
            .field("optional", &self.optional)
            .field("declarations", &self.declarations)
            .finish_non_exhaustive()
    }
}

/// Evaluates all declarations of one kind.
pub trait Checker: Send + Sync {
    /// Shared checker state.
    fn base(&self) -> &CheckerBase;

    /// Mutable shared checker state.
    fn base_mut(&mut self) -> &mut CheckerBase;

    /// The kind of declaration this checker accepts.
    fn kind(&self) -> DeclarationKind;

    /// Whether a declaration may be registered with this checker.
    fn is_dependency_valid(&self, declaration: &DependencyDeclaration) -> bool;

    /// Declarations the environment does not currently satisfy.
    fn missing(&self) -> Vec<MissingDependency>;

    /// Identity used to group results.
    fn id(&self) -> &str {
        &self.base().id
    }

    /// Whether failures of this checker must not block activation.
    fn is_optional(&self) -> bool {
        self.base().optional
    }

    /// All registered declarations, in registration order.
    fn declarations(&self) -> Vec<DependencyDeclaration> {
        self.base().declarations.to_vec()
    }

    /// Whether nothing is missing.
    fn is_fulfilled(&self) -> bool {
        self.missing().is_empty()
    }

    /// Register a declaration. Invalid declarations are dropped and `false`
    /// is returned.
    fn register_dependency(&mut self, declaration: DependencyDeclaration) -> bool {
        if !self.is_dependency_valid(&declaration) {
            tracing::warn!(
                "Checker '{}' rejected {} declaration '{}'",
                self.id(),
                declaration.kind(),
                declaration.natural_key()
            );
            return false;
        }

        let replaced = self.base_mut().declarations.insert(declaration);
        if replaced {
            tracing::debug!("Checker '{}' replaced an existing declaration", self.id());
        }
        true
    }

    /// Register a loosely-typed declaration as this checker's kind.
    fn register_raw(&mut self, raw: &RawDeclaration) -> bool {
        match DependencyDeclaration::from_raw(self.kind(), raw) {
            Some(declaration) => self.register_dependency(declaration),
            None => {
                tracing::warn!(
                    "Checker '{}' could not read a {} declaration from {:?}",
                    self.id(),
                    self.kind(),
                    raw
                );
                false
            }
        }
    }
}

/// Whether a name-like field is usable.
pub(crate) fn is_usable_name(name: &str) -> bool {
    !name.trim().is_empty()
}
