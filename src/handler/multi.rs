//! Handler wrapping many checkers, possibly of different kinds.

use std::collections::BTreeMap;

use super::{CheckerMap, Grouping, Handler};
use crate::checker::Checker;
use crate::declaration::{DeclarationKind, DependencyDeclaration, MissingDependency};
use crate::status::{has_optional_marker, FulfillmentStatus, Verdict};

/// Handler grouping its checkers' results by kind, then by checker identity.
pub struct MultiCheckerHandler {
    identifier: String,
    optional: bool,
    checkers: Vec<Box<dyn Checker>>,
}

impl MultiCheckerHandler {
    /// Create a handler with no checkers.
    pub fn new(identifier: impl Into<String>) -> Self {
        let identifier = identifier.into();
        Self {
            optional: has_optional_marker(&identifier),
            identifier,
            checkers: Vec::new(),
        }
    }

    /// Override whether the handler is optional.
    ///
    /// An optional handler marks every verdict it produces as optional.
    pub fn optional(mut self, optional: bool) -> Self {
        self.optional = optional;
        self
    }

    /// Append a checker and return `self`.
    pub fn with_checker(mut self, checker: Box<dyn Checker>) -> Self {
        self.add_checker(checker);
        self
    }

    /// Append a checker.
    ///
    /// Checker identities must be unique within a handler; a duplicate is
    /// dropped and `false` is returned.
    pub fn add_checker(&mut self, checker: Box<dyn Checker>) -> bool {
        if self.checker(checker.id()).is_some() {
            tracing::warn!(
                "Handler '{}' already has a checker named '{}'",
                self.identifier,
                checker.id()
            );
            return false;
        }
        tracing::debug!(
            "Handler '{}' added {} checker '{}'",
            self.identifier,
            checker.kind(),
            checker.id()
        );
        self.checkers.push(checker);
        true
    }

    /// Register a declaration with the checker named `checker_id`.
    ///
    /// Returns `false` when no such checker exists or it rejects the
    /// declaration.
    pub fn register_dependency(
        &mut self,
        checker_id: &str,
        declaration: DependencyDeclaration,
    ) -> bool {
        match self.checkers.iter_mut().find(|c| c.id() == checker_id) {
            Some(checker) => checker.register_dependency(declaration),
            None => {
                tracing::warn!(
                    "Handler '{}' has no checker named '{}'",
                    self.identifier,
                    checker_id
                );
                false
            }
        }
    }

    /// Look up a checker by identity.
    pub fn checker(&self, id: &str) -> Option<&dyn Checker> {
        self.checkers
            .iter()
            .find(|c| c.id() == id)
            .map(|c| c.as_ref())
    }

    /// Number of checkers.
    pub fn len(&self) -> usize {
        self.checkers.len()
    }

    /// Whether the handler has no checkers.
    pub fn is_empty(&self) -> bool {
        self.checkers.is_empty()
    }

    fn group<T>(
        &self,
        query: impl Fn(&dyn Checker) -> T,
    ) -> BTreeMap<DeclarationKind, CheckerMap<T>> {
        let mut groups: BTreeMap<DeclarationKind, CheckerMap<T>> = BTreeMap::new();
        for checker in &self.checkers {
            groups
                .entry(checker.kind())
                .or_default()
                .insert(checker.id().to_string(), query(checker.as_ref()));
        }
        groups
    }
}

impl Handler for MultiCheckerHandler {
    fn identifier(&self) -> &str {
        &self.identifier
    }

    fn is_optional(&self) -> bool {
        self.optional
    }

    fn dependencies(&self) -> Grouping<Vec<DependencyDeclaration>> {
        Grouping::Grouped(self.group(|c| c.declarations()))
    }

    fn missing_dependencies(&self) -> Grouping<Vec<MissingDependency>> {
        Grouping::Grouped(self.group(|c| c.missing()))
    }

    fn fulfillment(&self) -> FulfillmentStatus {
        FulfillmentStatus::Grouped(
            self.group(|c| Verdict::new(c.is_fulfilled(), self.optional || c.is_optional())),
        )
    }
}
