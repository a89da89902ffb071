//! Dependency declarations.
//!
//! A [`DependencyDeclaration`] describes one prerequisite of a component:
//! a runtime capability, a callable primitive, a configuration value, or a
//! sibling component with an optional minimum version.
//!
//! # Modules
//!
//! - [`missing`] - Unmet declarations with observed-environment context
//! - [`raw`] - Loose key/value declarations accepted from manifests
//! - [`size`] - Size shorthand parsing (`"128M"` to bytes)
//! - [`version`] - Dotted-version ordering

pub mod missing;
pub mod raw;
pub mod size;
pub mod version;

pub use missing::{MissingDependency, Observed};
pub use raw::RawDeclaration;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Probe deciding whether a sibling component is present.
pub type PresenceProbe = Arc<dyn Fn() -> bool + Send + Sync>;

/// Probe reporting the installed version of a sibling component.
pub type VersionProbe = Arc<dyn Fn() -> Option<String> + Send + Sync>;

/// The kind of a declaration. Also the top-level grouping key of results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeclarationKind {
    /// A named runtime capability (extension, module, tool).
    Capability,
    /// A named callable primitive.
    Callable,
    /// A configuration key with an expected value.
    ConfigurationValue,
    /// Another component, optionally at a minimum version.
    SiblingComponent,
}

impl DeclarationKind {
    /// All kinds, in grouping order.
    pub const ALL: [DeclarationKind; 4] = [
        DeclarationKind::Capability,
        DeclarationKind::Callable,
        DeclarationKind::ConfigurationValue,
        DeclarationKind::SiblingComponent,
    ];

    /// Stable snake-case name.
    pub fn as_str(&self) -> &'static str {
        match self {
            DeclarationKind::Capability => "capability",
            DeclarationKind::Callable => "callable",
            DeclarationKind::ConfigurationValue => "configuration_value",
            DeclarationKind::SiblingComponent => "sibling_component",
        }
    }
}

impl fmt::Display for DeclarationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DeclarationKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DeclarationKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| format!("unknown dependency kind '{}'", s))
    }
}

/// Expected value of a configuration declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExpectedValue {
    /// Integer value (sizes are expressed in bytes).
    Int(i64),
    /// Text value.
    Text(String),
}

impl ExpectedValue {
    /// Integer form of the expected value.
    ///
    /// Size shorthand text such as `"128M"` counts as an integer; plain text
    /// (including digit-only text) does not.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            ExpectedValue::Int(value) => Some(*value),
            ExpectedValue::Text(text) if size::has_unit_suffix(text) => size::parse_size(text),
            ExpectedValue::Text(_) => None,
        }
    }
}

impl fmt::Display for ExpectedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpectedValue::Int(value) => write!(f, "{}", value),
            ExpectedValue::Text(text) => write!(f, "{}", text),
        }
    }
}

/// How a live configuration value is compared with the expected one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Comparison {
    /// Live value must equal the expected value.
    #[default]
    Exact,
    /// Live value must be at least the expected value.
    Minimum,
}

/// A sibling component prerequisite.
#[derive(Clone, Serialize)]
pub struct ComponentRequirement {
    /// Identifier of the sibling component.
    pub identifier: String,
    /// Minimum acceptable version, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum_version: Option<String>,
    /// Overrides the host's active-set membership test.
    #[serde(skip)]
    pub presence_probe: Option<PresenceProbe>,
    /// Overrides the host's metadata version read.
    #[serde(skip)]
    pub version_probe: Option<VersionProbe>,
}

impl ComponentRequirement {
    /// Require a component to be present, at any version.
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            minimum_version: None,
            presence_probe: None,
            version_probe: None,
        }
    }

    /// Require at least the given version.
    pub fn at_least(mut self, version: impl Into<String>) -> Self {
        self.minimum_version = Some(version.into());
        self
    }

    /// Use a custom presence probe.
    pub fn with_presence_probe<F>(mut self, probe: F) -> Self
    where
        F: Fn() -> bool + Send + Sync + 'static,
    {
        self.presence_probe = Some(Arc::new(probe));
        self
    }

    /// Use a custom version probe.
    pub fn with_version_probe<F>(mut self, probe: F) -> Self
    where
        F: Fn() -> Option<String> + Send + Sync + 'static,
    {
        self.version_probe = Some(Arc::new(probe));
        self
    }
}

impl fmt::Debug for ComponentRequirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentRequirement")
            .field("identifier", &self.identifier)
            .field("minimum_version", &self.minimum_version)
            .field("presence_probe", &self.presence_probe.is_some())
            .field("version_probe", &self.version_probe.is_some())
            .finish()
    }
}

impl PartialEq for ComponentRequirement {
    // Probes are closures; only their presence takes part in equality.
    fn eq(&self, other: &Self) -> bool {
        self.identifier == other.identifier
            && self.minimum_version == other.minimum_version
            && self.presence_probe.is_some() == other.presence_probe.is_some()
            && self.version_probe.is_some() == other.version_probe.is_some()
    }
}

/// One prerequisite of a known kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DependencyDeclaration {
    /// A runtime capability must be available.
    Capability { name: String },
    /// A callable primitive must be defined.
    Callable { name: String },
    /// A configuration value must match or exceed the expectation.
    ConfigurationValue {
        key: String,
        expected: ExpectedValue,
        comparison: Comparison,
    },
    /// A sibling component must be present (and recent enough).
    SiblingComponent(ComponentRequirement),
}

impl DependencyDeclaration {
    /// Declare a required capability.
    pub fn capability(name: impl Into<String>) -> Self {
        DependencyDeclaration::Capability { name: name.into() }
    }

    /// Declare a required callable.
    pub fn callable(name: impl Into<String>) -> Self {
        DependencyDeclaration::Callable { name: name.into() }
    }

    /// Declare a configuration value expectation.
    pub fn config_value(
        key: impl Into<String>,
        expected: ExpectedValue,
        comparison: Comparison,
    ) -> Self {
        DependencyDeclaration::ConfigurationValue {
            key: key.into(),
            expected,
            comparison,
        }
    }

    /// Declare a minimum integer configuration value.
    pub fn config_minimum(key: impl Into<String>, expected: i64) -> Self {
        Self::config_value(key, ExpectedValue::Int(expected), Comparison::Minimum)
    }

    /// Declare a sibling component prerequisite.
    pub fn component(requirement: ComponentRequirement) -> Self {
        DependencyDeclaration::SiblingComponent(requirement)
    }

    /// The kind of this declaration.
    pub fn kind(&self) -> DeclarationKind {
        match self {
            DependencyDeclaration::Capability { .. } => DeclarationKind::Capability,
            DependencyDeclaration::Callable { .. } => DeclarationKind::Callable,
            DependencyDeclaration::ConfigurationValue { .. } => {
                DeclarationKind::ConfigurationValue
            }
            DependencyDeclaration::SiblingComponent(_) => DeclarationKind::SiblingComponent,
        }
    }

    /// The key that makes this declaration unique within a checker.
    pub fn natural_key(&self) -> &str {
        match self {
            DependencyDeclaration::Capability { name }
            | DependencyDeclaration::Callable { name } => {
                name
            }
            DependencyDeclaration::ConfigurationValue { key, .. } => key,
            DependencyDeclaration::SiblingComponent(requirement) => &requirement.identifier,
        }
    }
}

impl fmt::Display for DependencyDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DependencyDeclaration::Capability { name }
            | DependencyDeclaration::Callable { name } => {
                write!(f, "{}", name)
            }
            DependencyDeclaration::ConfigurationValue {
                key,
                expected,
                comparison: Comparison::Exact,
            } => write!(f, "{} = {}", key, expected),
            DependencyDeclaration::ConfigurationValue {
                key,
                expected,
                comparison: Comparison::Minimum,
            } => write!(f, "{} >= {}", key, expected),
            DependencyDeclaration::SiblingComponent(requirement) => {
                match &requirement.minimum_version {
                    Some(version) => write!(f, "{} >= {}", requirement.identifier, version),
                    None => write!(f, "{}", requirement.identifier),
                }
            }
        }
    }
}
