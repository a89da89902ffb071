//! JSON Schema generation for manifests.
//!
//! Generates a JSON Schema (Draft-07) for the manifest format, enabling
//! IDE autocomplete and validation.

use serde_json::{json, Value};

use crate::declaration::DeclarationKind;

/// Generates JSON Schema for manifests.
#[derive(Debug, Default)]
pub struct SchemaGenerator;

impl SchemaGenerator {
    /// Create a new schema generator.
    pub fn new() -> Self {
        Self
    }

    /// Generate the complete JSON Schema for a manifest.
    pub fn generate(&self) -> Value {
        json!({
            "$schema": "http://json-schema.org/draft-07/schema#",
            "title": "depverify manifest",
            "description": "Prerequisites of components and the environment they are checked against",
            "type": "object",
            "properties": {
                "environment": self.environment_schema(),
                "components": self.components_schema()
            },
            "additionalProperties": false
        })
    }

    /// Generate as a pretty-printed JSON string.
    pub fn generate_string(&self) -> String {
        serde_json::to_string_pretty(&self.generate()).unwrap_or_default()
    }

    fn environment_schema(&self) -> Value {
        let scalar = json!({ "type": ["string", "integer", "number", "boolean"] });
        json!({
            "type": "object",
            "description": "Host environment description",
            "properties": {
                "source": {
                    "type": "string",
                    "enum": ["system", "static"],
                    "default": "system",
                    "description": "Probe the running process, or use only the listed facts"
                },
                "capabilities": {
                    "type": "array",
                    "items": { "type": "string" },
                    "description": "Available capabilities (static source only)"
                },
                "callables": {
                    "type": "array",
                    "items": { "type": "string" },
                    "description": "Defined callables (static source only)"
                },
                "config": {
                    "type": "object",
                    "additionalProperties": scalar,
                    "description": "Configuration values (static source only)"
                },
                "components": {
                    "type": "object",
                    "additionalProperties": {
                        "anyOf": [scalar, { "type": "null" }]
                    },
                    "description": "Active sibling components and their versions"
                }
            },
            "additionalProperties": false
        })
    }

    fn components_schema(&self) -> Value {
        json!({
            "type": "object",
            "description": "Components keyed by identifier",
            "additionalProperties": {
                "type": "object",
                "properties": {
                    "contexts": {
                        "type": "object",
                        "description": "Prerequisites per context (active, disabled, ...)",
                        "additionalProperties": self.context_schema()
                    }
                },
                "additionalProperties": false
            }
        })
    }

    fn context_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "optional": {
                    "type": "boolean",
                    "description": "Failures only degrade the component"
                },
                "checkers": {
                    "type": "array",
                    "items": self.checker_schema()
                }
            },
            "additionalProperties": false
        })
    }

    fn checker_schema(&self) -> Value {
        let kinds: Vec<&str> = DeclarationKind::ALL.iter().map(|k| k.as_str()).collect();
        json!({
            "type": "object",
            "required": ["kind"],
            "properties": {
                "id": {
                    "type": "string",
                    "description": "Checker identity (default: <component>_<kind>)"
                },
                "kind": {
                    "type": "string",
                    "enum": kinds
                },
                "optional": { "type": "boolean" },
                "declarations": {
                    "type": "array",
                    "items": self.declaration_schema()
                }
            },
            "additionalProperties": false
        })
    }

    fn declaration_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "name": { "type": "string", "description": "Capability or callable name" },
                "key": { "type": "string", "description": "Configuration key" },
                "expected": {
                    "type": ["string", "integer"],
                    "description": "Expected configuration value, sizes like 128M allowed"
                },
                "comparison": {
                    "type": "string",
                    "enum": ["exact", "minimum"],
                    "default": "exact"
                },
                "identifier": { "type": "string", "description": "Sibling component identifier" },
                "minimum_version": { "type": "string" },
                "presence_command": {
                    "type": "string",
                    "description": "Shell command whose success means the component is present"
                },
                "version_command": {
                    "type": "string",
                    "description": "Shell command printing the component's version"
                }
            },
            "additionalProperties": false
        })
    }
}
