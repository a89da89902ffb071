//! Host environment introspection.
//!
//! Checkers never look at the process directly; they ask a
//! [`HostEnvironment`]. This keeps every check cheap and local, and lets
//! tests describe an environment declaratively with [`StaticEnvironment`].
//!
//! # Modules
//!
//! - [`command`] - Shell command probes
//! - [`path`] - PATH parsing and executable lookup
//! - [`system`] - [`SystemEnvironment`], backed by the running process

pub mod command;
pub mod path;
pub mod system;

pub use system::SystemEnvironment;

use std::collections::{HashMap, HashSet};

/// Read-only view of the environment a component is about to run in.
pub trait HostEnvironment: Send + Sync {
    /// Whether a named capability (extension, module, tool) is available.
    fn has_capability(&self, name: &str) -> bool;

    /// Whether a named callable primitive is defined.
    fn has_callable(&self, name: &str) -> bool;

    /// Live value of a configuration setting, `None` when it is not set.
    fn config_value(&self, key: &str) -> Option<String>;

    /// Whether a sibling component is in the host's active set.
    fn is_component_active(&self, identifier: &str) -> bool;

    /// Best-effort read of a sibling component's installed version.
    fn component_version(&self, identifier: &str) -> Option<String>;
}

/// An environment described up front.
///
/// # Example
///
/// ```
/// use depverify::environment::{HostEnvironment, StaticEnvironment};
///
/// let env = StaticEnvironment::new()
///     .with_capability("curl")
///     .with_config("memory_limit", "256M")
///     .with_component("shop", Some("8.2.1"));
///
/// assert!(env.has_capability("curl"));
/// assert_eq!(env.config_value("memory_limit").as_deref(), Some("256M"));
/// assert_eq!(env.component_version("shop").as_deref(), Some("8.2.1"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct StaticEnvironment {
    capabilities: HashSet<String>,
    callables: HashSet<String>,
    config: HashMap<String, String>,
    components: HashMap<String, Option<String>>,
}

impl StaticEnvironment {
    /// Create an empty environment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an available capability.
    pub fn with_capability(mut self, name: impl Into<String>) -> Self {
        self.capabilities.insert(name.into());
        self
    }

    /// Add a defined callable.
    pub fn with_callable(mut self, name: impl Into<String>) -> Self {
        self.callables.insert(name.into());
        self
    }

    /// Set a configuration value.
    pub fn with_config(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.insert(key.into(), value.into());
        self
    }

    /// Mark a component active, with an optional installed version.
    pub fn with_component(mut self, identifier: impl Into<String>, version: Option<&str>) -> Self {
        self.components
            .insert(identifier.into(), version.map(str::to_string));
        self
    }
}

impl HostEnvironment for StaticEnvironment {
    fn has_capability(&self, name: &str) -> bool {
        self.capabilities.contains(name)
    }

    fn has_callable(&self, name: &str) -> bool {
        self.callables.contains(name)
    }

    fn config_value(&self, key: &str) -> Option<String> {
        self.config.get(key).cloned()
    }

    fn is_component_active(&self, identifier: &str) -> bool {
        self.components.contains_key(identifier)
    }

    fn component_version(&self, identifier: &str) -> Option<String> {
        self.components.get(identifier).cloned().flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_environment_has_nothing() {
        let env = StaticEnvironment::new();
        assert!(!env.has_capability("curl"));
        assert!(!env.has_callable("gzip"));
        assert!(env.config_value("memory_limit").is_none());
        assert!(!env.is_component_active("shop"));
        assert!(env.component_version("shop").is_none());
    }

    #[test]
    fn capabilities_and_callables_are_separate() {
        let env = StaticEnvironment::new()
            .with_capability("curl")
            .with_callable("gzip");
        assert!(env.has_capability("curl"));
        assert!(!env.has_callable("curl"));
        assert!(env.has_callable("gzip"));
        assert!(!env.has_capability("gzip"));
    }

    #[test]
    fn component_without_version_is_active() {
        let env = StaticEnvironment::new().with_component("shop", None);
        assert!(env.is_component_active("shop"));
        assert!(env.component_version("shop").is_none());
    }

    #[test]
    fn usable_as_trait_object() {
        let env: Box<dyn HostEnvironment> =
            Box::new(StaticEnvironment::new().with_config("k", "v"));
        assert_eq!(env.config_value("k").as_deref(), Some("v"));
    }
}
