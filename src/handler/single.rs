//! Handler wrapping exactly one checker.

use super::{CheckerMap, Grouping, Handler};
use crate::checker::Checker;
use crate::declaration::{DependencyDeclaration, MissingDependency, RawDeclaration};
use crate::status::{has_optional_marker, FulfillmentStatus, Verdict};

/// Handler for a component with one homogeneous dependency group.
///
/// Results are keyed by the checker's identity so callers can treat single
/// and multi handlers alike.
pub struct SingleCheckerHandler {
    identifier: String,
    optional: bool,
    checker: Box<dyn Checker>,
}

impl SingleCheckerHandler {
    /// Wrap a checker. Optionality defaults to the identifier marker.
    pub fn new(identifier: impl Into<String>, checker: Box<dyn Checker>) -> Self {
        let identifier = identifier.into();
        Self {
            optional: has_optional_marker(&identifier),
            identifier,
            checker,
        }
    }

    /// Override whether the handler is optional.
    ///
    /// An optional handler marks every verdict it produces as optional, so
    /// its failures never block activation.
    pub fn optional(mut self, optional: bool) -> Self {
        self.optional = optional;
        self
    }

    /// The wrapped checker.
    pub fn checker(&self) -> &dyn Checker {
        self.checker.as_ref()
    }

    /// Append a declaration to the wrapped checker.
    pub fn register_dependency(&mut self, declaration: DependencyDeclaration) -> bool {
        self.checker.register_dependency(declaration)
    }

    /// Append a loosely-typed declaration to the wrapped checker.
    pub fn register_raw(&mut self, raw: &RawDeclaration) -> bool {
        self.checker.register_raw(raw)
    }

    fn one<T>(&self, value: T) -> Grouping<T> {
        Grouping::Flat {
            kind: self.checker.kind(),
            entries: CheckerMap::from([(self.checker.id().to_string(), value)]),
        }
    }
}

impl Handler for SingleCheckerHandler {
    fn identifier(&self) -> &str {
        &self.identifier
    }

    fn is_optional(&self) -> bool {
        self.optional
    }

    fn dependencies(&self) -> Grouping<Vec<DependencyDeclaration>> {
        self.one(self.checker.declarations())
    }

    fn missing_dependencies(&self) -> Grouping<Vec<MissingDependency>> {
        self.one(self.checker.missing())
    }

    fn fulfillment(&self) -> FulfillmentStatus {
        let verdict = Verdict::new(
            self.checker.is_fulfilled(),
            self.optional || self.checker.is_optional(),
        );
        FulfillmentStatus::Flat(CheckerMap::from([(self.checker.id().to_string(), verdict)]))
    }
}
