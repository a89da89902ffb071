//! Environment backed by the running process.
//!
//! - capabilities are executables on `PATH`
//! - callables are anything the shell resolves with `command -v`
//! - configuration values are environment variables
//! - the component active set is supplied by the embedding host

use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;

use super::{command, path, HostEnvironment};

type Lookup = Box<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// The real process environment.
pub struct SystemEnvironment {
    path_entries: Vec<PathBuf>,
    lookup: Lookup,
    components: HashMap<String, Option<String>>,
}

impl SystemEnvironment {
    /// Probe using the actual `PATH` and environment variables.
    pub fn new() -> Self {
        Self::with_lookup(path::search_dirs(), |key| std::env::var(key).ok())
    }

    /// Probe with explicit PATH entries and a custom variable lookup.
    ///
    /// This allows testing without modifying actual environment variables.
    pub fn with_lookup<F>(path_entries: Vec<PathBuf>, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        Self {
            path_entries,
            lookup: Box::new(lookup),
            components: HashMap::new(),
        }
    }

    /// Mark a component active, with an optional installed version.
    pub fn with_component(mut self, identifier: impl Into<String>, version: Option<&str>) -> Self {
        self.components
            .insert(identifier.into(), version.map(str::to_string));
        self
    }
}

impl Default for SystemEnvironment {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SystemEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SystemEnvironment")
            .field("path_entries", &self.path_entries)
            .field("components", &self.components)
            .finish_non_exhaustive()
    }
}

impl HostEnvironment for SystemEnvironment {
    fn has_capability(&self, name: &str) -> bool {
        path::locate(name, &self.path_entries).is_some()
    }

    fn has_callable(&self, name: &str) -> bool {
        command::shell_knows(name)
    }

    fn config_value(&self, key: &str) -> Option<String> {
        (self.lookup)(key)
    }

    fn is_component_active(&self, identifier: &str) -> bool {
        self.components.contains_key(identifier)
    }

    fn component_version(&self, identifier: &str) -> Option<String> {
        self.components.get(identifier).cloned().flatten()
    }
}
