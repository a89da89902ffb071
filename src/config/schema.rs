//! Manifest schema definitions.
//!
//! These structs map one-to-one onto the YAML manifest format.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::declaration::RawDeclaration;

/// Root manifest structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Manifest {
    /// How the host environment is described.
    pub environment: EnvironmentConfig,

    /// Components and the prerequisites of each of their contexts.
    pub components: BTreeMap<String, ComponentConfig>,
}

/// Where host facts come from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnvironmentSource {
    /// Probe the running process (PATH, shell, environment variables).
    #[default]
    System,
    /// Use only the facts listed in the manifest.
    Static,
}

/// Host environment description.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvironmentConfig {
    pub source: EnvironmentSource,

    /// Available capabilities (static source only).
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub capabilities: Vec<String>,

    /// Defined callables (static source only).
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub callables: Vec<String>,

    /// Configuration values (static source only).
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub config: BTreeMap<String, ScalarValue>,

    /// Active sibling components and their versions.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub components: BTreeMap<String, Option<ScalarValue>>,
}

/// A YAML scalar that is used as text.
///
/// Lets `memory_limit: 256` and `shop: 8` be written without quotes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScalarValue {
    Int(i64),
    Float(f64),
    Bool(bool),
    Text(String),
}

impl fmt::Display for ScalarValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScalarValue::Int(value) => write!(f, "{}", value),
            ScalarValue::Float(value) => write!(f, "{}", value),
            ScalarValue::Bool(value) => write!(f, "{}", value),
            ScalarValue::Text(value) => write!(f, "{}", value),
        }
    }
}

/// Per-component prerequisites, keyed by context (`active`, `disabled`, ...).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComponentConfig {
    pub contexts: BTreeMap<String, ContextConfig>,
}

/// Prerequisites of one component in one context.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContextConfig {
    /// Whether failures only degrade the component (default: from identifier).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub optional: Option<bool>,

    /// One entry per checker; a single entry builds a single-checker handler.
    pub checkers: Vec<CheckerConfig>,
}

/// One checker and its declarations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckerConfig {
    /// Checker identity (default: `<component>_<kind>`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Declaration kind, e.g. `capability` or `sibling_component`.
    pub kind: String,

    /// Whether failures are optional (default: from identity).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub optional: Option<bool>,

    pub declarations: Vec<RawDeclaration>,
}

impl CheckerConfig {
    /// Identity of this checker within `component`.
    pub fn resolved_id(&self, component: &str) -> String {
        self.id
            .clone()
            .unwrap_or_else(|| format!("{}_{}", component, self.kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_manifest() {
        let yaml = r#"
environment:
  source: static
  capabilities: [curl]
  config:
    memory_limit: 256M
    max_children: 8
  components:
    shop: 8.2.1
    forum: ~
components:
  plugin:
    contexts:
      active:
        checkers:
          - kind: capability
            declarations:
              - name: curl
"#;
        let manifest: Manifest = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(manifest.environment.source, EnvironmentSource::Static);
        assert_eq!(
            manifest.environment.config["memory_limit"].to_string(),
            "256M"
        );
        assert_eq!(manifest.environment.config["max_children"].to_string(), "8");
        assert_eq!(manifest.environment.components["forum"], None);

        let context = &manifest.components["plugin"].contexts["active"];
        assert_eq!(context.checkers.len(), 1);
        assert_eq!(context.checkers[0].kind, "capability");
        assert_eq!(context.checkers[0].resolved_id("plugin"), "plugin_capability");
    }

    #[test]
    fn empty_manifest_uses_defaults() {
        let manifest: Manifest = serde_yaml::from_str("{}").unwrap();
        assert_eq!(manifest.environment.source, EnvironmentSource::System);
        assert!(manifest.components.is_empty());
    }

    #[test]
    fn explicit_checker_id_wins() {
        let checker = CheckerConfig {
            id: Some("plugin_extensions".to_string()),
            kind: "capability".to_string(),
            ..Default::default()
        };
        assert_eq!(checker.resolved_id("plugin"), "plugin_extensions");
    }
}
