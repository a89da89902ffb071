//! Loose key/value declarations.
//!
//! Manifests describe declarations as flat maps whose meaningful fields
//! depend on the kind of the checker they are handed to. A
//! [`RawDeclaration`] carries every possible field; the target checker
//! decides which kind it becomes via [`DependencyDeclaration::from_raw`].

use serde::{Deserialize, Serialize};

use super::{
    ComponentRequirement, Comparison, DeclarationKind, DependencyDeclaration, ExpectedValue,
};
use crate::environment::command;

/// Declaration fields as written in a manifest.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawDeclaration {
    /// Capability or callable name (also accepted as a component identifier).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Configuration key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,

    /// Expected configuration value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected: Option<ExpectedValue>,

    /// Comparison for configuration values (default: exact).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comparison: Option<Comparison>,

    /// Sibling component identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,

    /// Minimum sibling component version.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum_version: Option<String>,

    /// Shell command whose success means the component is present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub presence_command: Option<String>,

    /// Shell command whose output is the component's version.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version_command: Option<String>,
}

impl RawDeclaration {
    /// Raw declaration naming a capability or callable.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }
}

impl DependencyDeclaration {
    /// Build a typed declaration of `kind` from loose fields.
    ///
    /// Returns `None` when a field the kind needs is absent. Whether the
    /// result is acceptable is still up to the checker's validation.
    pub fn from_raw(kind: DeclarationKind, raw: &RawDeclaration) -> Option<Self> {
        match kind {
            DeclarationKind::Capability => raw.name.clone().map(DependencyDeclaration::capability),
            DeclarationKind::Callable => raw.name.clone().map(DependencyDeclaration::callable),
            DeclarationKind::ConfigurationValue => Some(DependencyDeclaration::config_value(
                raw.key.clone()?,
                raw.expected.clone()?,
                raw.comparison.unwrap_or_default(),
            )),
            DeclarationKind::SiblingComponent => {
                let identifier = raw.identifier.clone().or_else(|| raw.name.clone())?;
                let mut requirement = ComponentRequirement::new(identifier);
                requirement.minimum_version = raw.minimum_version.clone();
                if let Some(cmd) = raw.presence_command.clone() {
                    requirement = requirement.with_presence_probe(move || command::succeeds(&cmd));
                }
                if let Some(cmd) = raw.version_command.clone() {
                    requirement = requirement.with_version_probe(move || command::output(&cmd));
                }
                Some(DependencyDeclaration::component(requirement))
            }
        }
    }
}
