//! depverify - Dependency verification engine.
//!
//! Decides whether a component's declared prerequisites are satisfied in
//! the current environment: runtime capabilities, callable primitives,
//! configuration values, and sibling components with optional minimum
//! versions. Answers come back both as a single go/no-go boolean and as
//! per-checker detail for reporting.
//!
//! # Modules
//!
//! - [`declaration`] - Dependency declarations and missing-dependency records
//! - [`environment`] - Host environment introspection
//! - [`checker`] - Per-kind checkers
//! - [`handler`] - Single, multi, and null handlers
//! - [`status`] - Fulfillment status and its reduction to one boolean
//! - [`service`] - Handler registry with lazy, compute-once factories
//! - [`gate`] - Activation gating for consuming components
//! - [`report`] - Reporter boundary and a plain-text reporter
//! - [`config`] - YAML manifests and service wiring
//! - [`cli`] - Command-line interface
//! - [`ui`] - Terminal output
//! - [`error`] - Error types and result aliases
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use depverify::checker::{CapabilityChecker, ComponentChecker};
//! use depverify::declaration::ComponentRequirement;
//! use depverify::environment::StaticEnvironment;
//! use depverify::gate::ActivationGate;
//! use depverify::handler::MultiCheckerHandler;
//! use depverify::service::VerificationService;
//!
//! let env = Arc::new(
//!     StaticEnvironment::new()
//!         .with_capability("curl")
//!         .with_component("shop", Some("1.9.9")),
//! );
//!
//! let handler = MultiCheckerHandler::new("plugin_active")
//!     .with_checker(Box::new(
//!         CapabilityChecker::new("plugin_capabilities", env.clone()).with_names(["curl"]),
//!     ))
//!     .with_checker(Box::new(
//!         ComponentChecker::new("plugin_optional_components", env)
//!             .with_requirement(ComponentRequirement::new("shop").at_least("2.0.0")),
//!     ));
//!
//! let service = Arc::new(VerificationService::new());
//! service.register_handler("plugin_active", Box::new(handler));
//!
//! // The outdated component is optional, so activation may proceed.
//! let gate = ActivationGate::new(service.clone(), "plugin");
//! assert!(gate.may_activate(true));
//! assert_eq!(service.get_missing_dependencies("plugin_active").item_count(), 1);
//! ```

pub mod checker;
pub mod cli;
pub mod config;
pub mod declaration;
pub mod environment;
pub mod error;
pub mod gate;
pub mod handler;
pub mod report;
pub mod service;
pub mod status;
pub mod ui;

pub use error::{DepVerifyError, Result};
