//! Fulfillment status and reduction.
//!
//! A handler answers "are my dependencies fulfilled?" with a
//! [`FulfillmentStatus`] whose shape mirrors the handler: a single boolean,
//! a flat map of checker verdicts, or verdicts grouped by declaration kind.
//! [`reduce`] collapses any of these shapes into one go/no-go boolean.
//!
//! # Reduction rules
//!
//! - `Single(b)` reduces to `b`
//! - a flat group is fulfilled iff every failing verdict is optional
//!   (an empty group is fulfilled)
//! - grouped input is fulfilled iff every group is fulfilled (an empty
//!   grouping is fulfilled)
//!
//! # Example
//!
//! ```
//! use depverify::status::{reduce, FulfillmentStatus};
//!
//! let status = FulfillmentStatus::flat_from_legacy([
//!     ("required_a", true),
//!     ("optional_b", false),
//! ]);
//! assert!(reduce(&status));
//! ```

use serde::Serialize;
use std::collections::BTreeMap;

use crate::declaration::DeclarationKind;

/// Identity substring that marks a checker or handler optional by default.
pub const OPTIONAL_MARKER: &str = "optional";

/// Whether an identity carries the legacy optional marker.
pub fn has_optional_marker(identity: &str) -> bool {
    identity.contains(OPTIONAL_MARKER)
}

/// Outcome of one checker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Verdict {
    /// Whether every declaration of the checker is satisfied.
    pub fulfilled: bool,
    /// Whether a failure may be ignored for activation.
    pub optional: bool,
}

impl Verdict {
    /// Create a verdict.
    pub fn new(fulfilled: bool, optional: bool) -> Self {
        Self {
            fulfilled,
            optional,
        }
    }

    /// Build a verdict whose optionality comes from the identity marker.
    pub fn from_legacy_key(identity: &str, fulfilled: bool) -> Self {
        Self::new(fulfilled, has_optional_marker(identity))
    }

    /// Whether this verdict prevents activation.
    pub fn is_blocking(&self) -> bool {
        !self.fulfilled && !self.optional
    }
}

/// Checker identity to verdict.
pub type VerdictMap = BTreeMap<String, Verdict>;

/// Shape-preserving fulfillment result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FulfillmentStatus {
    /// A single answer.
    Single(bool),
    /// One verdict per checker.
    Flat(VerdictMap),
    /// Verdicts grouped by declaration kind, then by checker.
    Grouped(BTreeMap<DeclarationKind, VerdictMap>),
}

impl FulfillmentStatus {
    /// Flat status from `(identity, fulfilled)` pairs using the identity marker.
    pub fn flat_from_legacy<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, bool)>,
        S: AsRef<str>,
    {
        FulfillmentStatus::Flat(legacy_map(entries))
    }

    /// Grouped status from per-kind `(identity, fulfilled)` pairs.
    pub fn grouped_from_legacy<G, I, S>(groups: G) -> Self
    where
        G: IntoIterator<Item = (DeclarationKind, I)>,
        I: IntoIterator<Item = (S, bool)>,
        S: AsRef<str>,
    {
        FulfillmentStatus::Grouped(
            groups
                .into_iter()
                .map(|(kind, entries)| (kind, legacy_map(entries)))
                .collect(),
        )
    }

    /// Look up the verdict of one checker.
    ///
    /// Flat statuses ignore `kind`; single statuses have no per-checker verdicts.
    pub fn verdict(&self, kind: DeclarationKind, identity: &str) -> Option<Verdict> {
        match self {
            FulfillmentStatus::Single(_) => None,
            FulfillmentStatus::Flat(verdicts) => verdicts.get(identity).copied(),
            FulfillmentStatus::Grouped(groups) => {
                groups.get(&kind).and_then(|v| v.get(identity)).copied()
            }
        }
    }
}

fn legacy_map<I, S>(entries: I) -> VerdictMap
where
    I: IntoIterator<Item = (S, bool)>,
    S: AsRef<str>,
{
    entries
        .into_iter()
        .map(|(identity, fulfilled)| {
            let identity = identity.as_ref();
            (
                identity.to_string(),
                Verdict::from_legacy_key(identity, fulfilled),
            )
        })
        .collect()
}

/// One unit of input handed to a custom reduction policy.
#[derive(Debug, Clone, Copy)]
pub enum Group<'a> {
    /// A single boolean status.
    Single(bool),
    /// A map of verdicts; `kind` is set when it came from a grouped status.
    Entries {
        kind: Option<DeclarationKind>,
        verdicts: &'a VerdictMap,
    },
}

/// Default rule for one flat group.
///
/// Fulfilled iff no verdict failed, or every failed verdict is optional.
pub fn reduce_group(verdicts: &VerdictMap) -> bool {
    let mut failing = verdicts.values().filter(|v| !v.fulfilled).peekable();
    if failing.peek().is_none() {
        return true;
    }
    failing.all(|v| v.optional)
}

fn default_policy(group: Group<'_>) -> bool {
    match group {
        Group::Single(fulfilled) => fulfilled,
        Group::Entries { verdicts, .. } => reduce_group(verdicts),
    }
}

/// Collapse a status into one boolean with the default rules.
pub fn reduce(status: &FulfillmentStatus) -> bool {
    reduce_with(status, default_policy)
}

/// Collapse a status into one boolean, deciding each group with `policy`.
///
/// Grouped input is the logical AND of the policy's per-group answers.
pub fn reduce_with<F>(status: &FulfillmentStatus, policy: F) -> bool
where
    F: Fn(Group<'_>) -> bool,
{
    match status {
        FulfillmentStatus::Single(fulfilled) => policy(Group::Single(*fulfilled)),
        FulfillmentStatus::Flat(verdicts) => policy(Group::Entries {
            kind: None,
            verdicts,
        }),
        FulfillmentStatus::Grouped(groups) => groups.iter().all(|(kind, verdicts)| {
            policy(Group::Entries {
                kind: Some(*kind),
                verdicts,
            })
        }),
    }
}
