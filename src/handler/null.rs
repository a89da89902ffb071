//! The fallback handler.

use super::{Grouping, Handler};
use crate::declaration::{DependencyDeclaration, MissingDependency};
use crate::status::FulfillmentStatus;

/// Identifier reported by [`NullHandler`].
pub const NULL_HANDLER_ID: &str = "null";

/// Declares nothing and is always fulfilled.
///
/// Returned for identifiers nobody registered and for factories that fail.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullHandler;

impl Handler for NullHandler {
    fn identifier(&self) -> &str {
        NULL_HANDLER_ID
    }

    fn is_optional(&self) -> bool {
        false
    }

    fn dependencies(&self) -> Grouping<Vec<DependencyDeclaration>> {
        Grouping::empty()
    }

    fn missing_dependencies(&self) -> Grouping<Vec<MissingDependency>> {
        Grouping::empty()
    }

    fn fulfillment(&self) -> FulfillmentStatus {
        FulfillmentStatus::Single(true)
    }
}
