//! Dependency handlers.
//!
//! A [`Handler`] is what callers actually query. It aggregates checkers
//! under one identifier and answers three questions: which dependencies
//! are declared, which are missing, and whether they are fulfilled.
//!
//! - [`SingleCheckerHandler`] wraps exactly one checker
//! - [`MultiCheckerHandler`] wraps many checkers, grouping results by kind
//! - [`NullHandler`] declares nothing and is always fulfilled

pub mod multi;
pub mod null;
pub mod single;

pub use multi::MultiCheckerHandler;
pub use null::NullHandler;
pub use single::SingleCheckerHandler;

use serde::Serialize;
use std::collections::BTreeMap;

use crate::declaration::{DeclarationKind, DependencyDeclaration, MissingDependency};
use crate::status::{reduce, FulfillmentStatus};

/// Checker identity to per-checker result.
pub type CheckerMap<T> = BTreeMap<String, T>;

/// Per-checker results, shaped like the handler that produced them.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Grouping<T> {
    /// Results of a single checker of a known kind.
    Flat {
        kind: DeclarationKind,
        entries: CheckerMap<T>,
    },
    /// Results grouped by kind, then by checker identity.
    Grouped(BTreeMap<DeclarationKind, CheckerMap<T>>),
}

impl<T> Grouping<T> {
    /// A grouping with no checkers.
    pub fn empty() -> Self {
        Grouping::Grouped(BTreeMap::new())
    }

    /// Every `(kind, checker identity, result)` triple, in key order.
    pub fn entries(&self) -> Vec<(DeclarationKind, &str, &T)> {
        match self {
            Grouping::Flat { kind, entries } => entries
                .iter()
                .map(|(id, value)| (*kind, id.as_str(), value))
                .collect(),
            Grouping::Grouped(groups) => groups
                .iter()
                .flat_map(|(kind, entries)| {
                    entries
                        .iter()
                        .map(move |(id, value)| (*kind, id.as_str(), value))
                })
                .collect(),
        }
    }

    /// The result of one checker.
    pub fn get(&self, kind: DeclarationKind, identity: &str) -> Option<&T> {
        match self {
            Grouping::Flat {
                kind: flat_kind,
                entries,
            } if *flat_kind == kind => entries.get(identity),
            Grouping::Flat { .. } => None,
            Grouping::Grouped(groups) => groups.get(&kind).and_then(|e| e.get(identity)),
        }
    }

    /// Number of distinct kinds present.
    pub fn kind_count(&self) -> usize {
        match self {
            Grouping::Flat { .. } => 1,
            Grouping::Grouped(groups) => groups.len(),
        }
    }

    /// Whether no checker contributed a result.
    pub fn is_empty(&self) -> bool {
        match self {
            Grouping::Flat { entries, .. } => entries.is_empty(),
            Grouping::Grouped(groups) => groups.values().all(|e| e.is_empty()),
        }
    }
}

impl<T> Grouping<Vec<T>> {
    /// Total number of items across all checkers.
    pub fn item_count(&self) -> usize {
        self.entries().iter().map(|(_, _, items)| items.len()).sum()
    }
}

/// Aggregation unit registered with the verification service.
pub trait Handler: Send + Sync {
    /// Identifier this handler answers for.
    fn identifier(&self) -> &str;

    /// Whether the handler as a whole is marked optional.
    fn is_optional(&self) -> bool;

    /// Declared dependencies, per checker.
    fn dependencies(&self) -> Grouping<Vec<DependencyDeclaration>>;

    /// Unmet dependencies, per checker.
    fn missing_dependencies(&self) -> Grouping<Vec<MissingDependency>>;

    /// Shape-preserving fulfillment status.
    fn fulfillment(&self) -> FulfillmentStatus;

    /// Fulfillment reduced to one boolean.
    fn are_dependencies_fulfilled(&self) -> bool {
        reduce(&self.fulfillment())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grouped() -> Grouping<u8> {
        let mut groups = BTreeMap::new();
        groups.insert(
            DeclarationKind::Callable,
            CheckerMap::from([("fns".to_string(), 2)]),
        );
        groups.insert(
            DeclarationKind::Capability,
            CheckerMap::from([("caps".to_string(), 1)]),
        );
        Grouping::Grouped(groups)
    }

    #[test]
    fn entries_are_in_kind_order() {
        let grouping = grouped();
        let entries = grouping.entries();
        assert_eq!(
            entries,
            vec![
                (DeclarationKind::Capability, "caps", &1),
                (DeclarationKind::Callable, "fns", &2),
            ]
        );
    }

    #[test]
    fn get_respects_kind() {
        let grouping = grouped();
        assert_eq!(grouping.get(DeclarationKind::Capability, "caps"), Some(&1));
        assert_eq!(grouping.get(DeclarationKind::Callable, "caps"), None);

        let flat = Grouping::Flat {
            kind: DeclarationKind::Capability,
            entries: CheckerMap::from([("caps".to_string(), 1)]),
        };
        assert_eq!(flat.get(DeclarationKind::Capability, "caps"), Some(&1));
        assert_eq!(flat.get(DeclarationKind::Callable, "caps"), None);
    }

    #[test]
    fn empty_grouping() {
        let grouping: Grouping<u8> = Grouping::empty();
        assert!(grouping.is_empty());
        assert_eq!(grouping.kind_count(), 0);
        assert!(grouping.entries().is_empty());
    }

    #[test]
    fn item_count_sums_every_checker() {
        let mut groups = BTreeMap::new();
        groups.insert(
            DeclarationKind::Capability,
            CheckerMap::from([("a".to_string(), vec![1, 2]), ("b".to_string(), vec![])]),
        );
        groups.insert(
            DeclarationKind::Callable,
            CheckerMap::from([("c".to_string(), vec![3])]),
        );
        let grouping = Grouping::Grouped(groups);
        assert!(!grouping.is_empty());
        assert_eq!(grouping.item_count(), 3);
    }
}
