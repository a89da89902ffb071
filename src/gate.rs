//! Activation gating.
//!
//! A component asks its [`ActivationGate`] whether it may run. The gate
//! only ever answers with a boolean; missing-dependency detail is left to
//! the reporting side (see [`crate::report`]).

use std::fmt;
use std::sync::Arc;

use crate::service::VerificationService;

/// The decision a handler is registered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GateContext {
    /// May the component activate?
    Active,
    /// Should an already-active component be force-disabled?
    Disabled,
}

impl GateContext {
    /// Context tag used in handler identifiers.
    pub fn as_str(&self) -> &'static str {
        match self {
            GateContext::Active => "active",
            GateContext::Disabled => "disabled",
        }
    }
}

impl fmt::Display for GateContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Conventional handler identifier: `<component>_<context>`.
pub fn handler_identifier(component: &str, context: &str) -> String {
    format!("{}_{}", component, context)
}

/// A component's view of the verification service.
#[derive(Debug, Clone)]
pub struct ActivationGate {
    service: Arc<VerificationService>,
    component: String,
}

impl ActivationGate {
    /// Create a gate for `component`.
    pub fn new(service: Arc<VerificationService>, component: impl Into<String>) -> Self {
        Self {
            service,
            component: component.into(),
        }
    }

    /// Identifier of the handler consulted for `context`.
    pub fn identifier(&self, context: GateContext) -> String {
        handler_identifier(&self.component, context.as_str())
    }

    /// Whether the component may activate, given its other preconditions.
    pub fn may_activate(&self, other_preconditions: bool) -> bool {
        other_preconditions && self.service.is_fulfilled(&self.identifier(GateContext::Active))
    }

    /// Whether the component should be force-disabled.
    pub fn should_disable(&self) -> bool {
        !self
            .service
            .is_fulfilled(&self.identifier(GateContext::Disabled))
    }
}
