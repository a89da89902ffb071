//! Manifest loading, validation, and service wiring.
//!
//! - Schema definitions in [`schema`]
//! - File loading in [`loader`]
//! - Validation in [`validator`]
//! - JSON Schema generation in [`json_schema`]
//! - Handler construction and registration in [`builder`]
//!
//! # Example
//!
//! ```
//! use depverify::config::{parse_manifest, register_manifest, validate};
//! use depverify::service::VerificationService;
//! use std::path::Path;
//!
//! let yaml = r#"
//! environment:
//!   source: static
//!   capabilities: [curl]
//! components:
//!   plugin:
//!     contexts:
//!       active:
//!         checkers:
//!           - kind: capability
//!             declarations:
//!               - name: curl
//! "#;
//!
//! let manifest = parse_manifest(yaml, Path::new("deps.yml")).unwrap();
//! validate(&manifest).unwrap();
//!
//! let service = VerificationService::new();
//! register_manifest(&manifest, &service);
//! assert!(service.is_fulfilled("plugin_active"));
//! ```

pub mod builder;
pub mod json_schema;
pub mod loader;
pub mod schema;
pub mod validator;

pub use builder::{build_checker, build_environment, build_handler, new_checker, register_manifest};
pub use json_schema::SchemaGenerator;
pub use loader::{load_manifest, parse_manifest};
pub use schema::{
    CheckerConfig, ComponentConfig, ContextConfig, EnvironmentConfig, EnvironmentSource, Manifest,
    ScalarValue,
};
pub use validator::{validate, validate_manifest, ValidationError};
