//! Verification service.
//!
//! The registry callers query by identifier. Entries are either handlers
//! registered eagerly or factories resolved on first lookup. Resolution is
//! compute-once: each slot holds a [`OnceLock`], so a factory runs at most
//! once even under concurrent first access.
//!
//! Unknown identifiers and failing factories resolve to the shared
//! [`NullHandler`]; a misconfigured check never surfaces as an error to the
//! caller asking whether dependencies are fulfilled.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use depverify::checker::CapabilityChecker;
//! use depverify::environment::StaticEnvironment;
//! use depverify::handler::{Handler, SingleCheckerHandler};
//! use depverify::service::VerificationService;
//!
//! let env = Arc::new(StaticEnvironment::new().with_capability("curl"));
//! let service = VerificationService::new();
//! service.register_factory("shop_active", move || {
//!     let checker = CapabilityChecker::new("shop_capabilities", env).with_names(["curl"]);
//!     let handler: Box<dyn Handler> =
//!         Box::new(SingleCheckerHandler::new("shop_active", Box::new(checker)));
//!     Ok(handler)
//! });
//!
//! assert!(service.is_fulfilled("shop_active"));
//! assert!(service.is_fulfilled("never_registered"));
//! ```

use std::collections::HashMap;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::{Arc, Mutex, OnceLock, PoisonError, RwLock};
use std::thread::{self, ThreadId};

use tracing::{debug, warn};

use crate::declaration::{DependencyDeclaration, MissingDependency};
use crate::handler::{Grouping, Handler, NullHandler};
use crate::status::FulfillmentStatus;

/// Deferred handler construction.
pub type HandlerFactory = Box<dyn FnOnce() -> anyhow::Result<Box<dyn Handler>> + Send>;

struct Slot {
    handler: OnceLock<Arc<dyn Handler>>,
    factory: Mutex<Option<HandlerFactory>>,
    /// Thread currently running the factory.
    resolving: Mutex<Option<ThreadId>>,
}

impl Slot {
    fn ready(handler: Arc<dyn Handler>) -> Self {
        Self {
            handler: OnceLock::from(handler),
            factory: Mutex::new(None),
            resolving: Mutex::new(None),
        }
    }

    fn deferred(factory: HandlerFactory) -> Self {
        Self {
            handler: OnceLock::new(),
            factory: Mutex::new(Some(factory)),
            resolving: Mutex::new(None),
        }
    }
}

/// Registry of handlers keyed by caller-chosen identifier.
pub struct VerificationService {
    slots: RwLock<HashMap<String, Arc<Slot>>>,
    null: Arc<dyn Handler>,
}

impl VerificationService {
    /// Create an empty service.
    pub fn new() -> Self {
        Self {
            slots: RwLock::new(HashMap::new()),
            null: Arc::new(NullHandler),
        }
    }

    /// Register a ready handler, replacing any earlier entry for `id`.
    pub fn register_handler(&self, id: impl Into<String>, handler: Box<dyn Handler>) {
        self.insert(id.into(), Slot::ready(Arc::from(handler)));
    }

    /// Register a factory invoked at most once, on first lookup of `id`.
    ///
    /// A factory that looks up its own `id` while running gets the null
    /// handler for that nested lookup; the result is not cached.
    pub fn register_factory<F>(&self, id: impl Into<String>, factory: F)
    where
        F: FnOnce() -> anyhow::Result<Box<dyn Handler>> + Send + 'static,
    {
        self.insert(id.into(), Slot::deferred(Box::new(factory)));
    }

    fn insert(&self, id: String, slot: Slot) {
        let mut slots = self.slots.write().unwrap_or_else(PoisonError::into_inner);
        if slots.insert(id.clone(), Arc::new(slot)).is_some() {
            debug!("Replaced handler registration '{}'", id);
        } else {
            debug!("Registered handler '{}'", id);
        }
    }

    /// Resolve the handler for `id`.
    ///
    /// Unknown identifiers and failed factories yield the null handler.
    pub fn get_handler(&self, id: &str) -> Arc<dyn Handler> {
        let slot = {
            let slots = self.slots.read().unwrap_or_else(PoisonError::into_inner);
            slots.get(id).cloned()
        };
        let Some(slot) = slot else {
            debug!("No handler registered for '{}', using null handler", id);
            return self.null.clone();
        };
        if let Some(handler) = slot.handler.get() {
            return handler.clone();
        }

        let current = thread::current().id();
        if *slot.resolving.lock().unwrap_or_else(PoisonError::into_inner) == Some(current) {
            warn!("Handler factory for '{}' looked up its own identifier", id);
            return self.null.clone();
        }

        slot.handler
            .get_or_init(|| {
                *slot.resolving.lock().unwrap_or_else(PoisonError::into_inner) = Some(current);
                let handler = self.resolve(id, &slot);
                *slot.resolving.lock().unwrap_or_else(PoisonError::into_inner) = None;
                handler
            })
            .clone()
    }

    fn resolve(&self, id: &str, slot: &Slot) -> Arc<dyn Handler> {
        let factory = slot
            .factory
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        let Some(factory) = factory else {
            warn!("Handler factory for '{}' was already consumed", id);
            return self.null.clone();
        };

        debug!("Resolving handler factory for '{}'", id);
        match catch_unwind(AssertUnwindSafe(factory)) {
            Ok(Ok(handler)) => Arc::from(handler),
            Ok(Err(e)) => {
                warn!("Handler factory for '{}' failed: {:#}", id, e);
                self.null.clone()
            }
            Err(_) => {
                warn!("Handler factory for '{}' panicked", id);
                self.null.clone()
            }
        }
    }

    /// Declared dependencies of the handler for `id`.
    pub fn get_dependencies(&self, id: &str) -> Grouping<Vec<DependencyDeclaration>> {
        self.get_handler(id).dependencies()
    }

    /// Unmet dependencies of the handler for `id`.
    pub fn get_missing_dependencies(&self, id: &str) -> Grouping<Vec<MissingDependency>> {
        self.get_handler(id).missing_dependencies()
    }

    /// Shape-preserving fulfillment status of the handler for `id`.
    pub fn are_dependencies_fulfilled(&self, id: &str) -> FulfillmentStatus {
        self.get_handler(id).fulfillment()
    }

    /// Fulfillment of the handler for `id`, reduced to one boolean.
    pub fn is_fulfilled(&self, id: &str) -> bool {
        self.get_handler(id).are_dependencies_fulfilled()
    }

    /// Whether anything is registered under `id`.
    pub fn has_handler(&self, id: &str) -> bool {
        self.slots
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(id)
    }

    /// Registered identifiers, sorted.
    pub fn identifiers(&self) -> Vec<String> {
        let slots = self.slots.read().unwrap_or_else(PoisonError::into_inner);
        let mut ids: Vec<String> = slots.keys().cloned().collect();
        ids.sort();
        ids
    }

    /// Number of entries whose handler has been materialised.
    pub fn resolved_count(&self) -> usize {
        self.slots
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .filter(|slot| slot.handler.get().is_some())
            .count()
    }

    /// Number of registered identifiers.
    pub fn len(&self) -> usize {
        self.slots
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for VerificationService {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for VerificationService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VerificationService")
            .field("identifiers", &self.identifiers())
            .field("resolved", &self.resolved_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checker::CapabilityChecker;
    use crate::declaration::DeclarationKind;
    use crate::environment::{HostEnvironment, StaticEnvironment};
    use crate::handler::null::NULL_HANDLER_ID;
    use crate::handler::SingleCheckerHandler;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;

    fn env() -> Arc<dyn HostEnvironment> {
        Arc::new(StaticEnvironment::new().with_capability("curl"))
    }

    fn capability_handler(id: &str, names: &[&str]) -> Box<dyn Handler> {
        let checker =
            CapabilityChecker::new(format!("{id}_caps"), env()).with_names(names.to_vec());
        Box::new(SingleCheckerHandler::new(id, Box::new(checker)))
    }

    #[test]
    fn unknown_identifier_yields_null_handler() {
        let service = VerificationService::new();
        let handler = service.get_handler("missing_active");
        assert_eq!(handler.identifier(), "null");
        assert!(handler.are_dependencies_fulfilled());
        assert!(service.get_missing_dependencies("missing_active").is_empty());
        assert!(service.is_fulfilled("missing_active"));
        assert!(!service.has_handler("missing_active"));
    }

    #[test]
    fn eager_registration_resolves_immediately() {
        let service = VerificationService::new();
        service.register_handler("shop_active", capability_handler("shop_active", &["imagick"]));
        assert_eq!(service.resolved_count(), 1);
        assert!(!service.is_fulfilled("shop_active"));

        let missing = service.get_missing_dependencies("shop_active");
        let entries = missing
            .get(DeclarationKind::Capability, "shop_active_caps")
            .unwrap();
        assert_eq!(entries[0].name(), "imagick");
    }

    #[test]
    fn factory_runs_once_on_first_lookup() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let service = VerificationService::new();
        service.register_factory("shop_active", move || {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(capability_handler("shop_active", &["curl"]))
        });

        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(service.resolved_count(), 0);

        assert!(service.is_fulfilled("shop_active"));
        assert!(service.is_fulfilled("shop_active"));
        service.get_dependencies("shop_active");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(service.resolved_count(), 1);
    }

    #[test]
    fn factory_runs_once_under_concurrent_lookup() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let service = Arc::new(VerificationService::new());
        service.register_factory("shop_active", move || {
            counter.fetch_add(1, Ordering::SeqCst);
            thread::sleep(std::time::Duration::from_millis(10));
            Ok(capability_handler("shop_active", &["curl"]))
        });

        let workers: Vec<_> = (0..8)
            .map(|_| {
                let service = service.clone();
                thread::spawn(move || service.is_fulfilled("shop_active"))
            })
            .collect();
        for worker in workers {
            assert!(worker.join().unwrap());
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn failing_factory_yields_null_handler() {
        let service = VerificationService::new();
        service.register_factory("broken_active", || Err(anyhow::anyhow!("bad manifest")));
        let handler = service.get_handler("broken_active");
        assert_eq!(handler.identifier(), "null");
        assert!(service.is_fulfilled("broken_active"));
        assert!(service.has_handler("broken_active"));
    }

    #[test]
    fn panicking_factory_yields_null_handler() {
        let service = VerificationService::new();
        service.register_factory("broken_active", || panic!("factory bug"));
        assert!(service.is_fulfilled("broken_active"));
        assert_eq!(service.get_handler("broken_active").identifier(), "null");
    }

    #[test]
    fn factory_looking_up_itself_does_not_hang() {
        let service = Arc::new(VerificationService::new());
        let weak = Arc::downgrade(&service);
        let nested = Arc::new(Mutex::new(None));
        let seen = nested.clone();
        service.register_factory("shop_active", move || {
            if let Some(service) = weak.upgrade() {
                let inner = service.get_handler("shop_active");
                *seen.lock().unwrap() = Some(inner.identifier().to_string());
            }
            Ok(capability_handler("shop_active", &["curl"]))
        });

        assert_eq!(service.get_handler("shop_active").identifier(), "shop_active");
        assert_eq!(nested.lock().unwrap().as_deref(), Some(NULL_HANDLER_ID));
        assert_eq!(service.get_handler("shop_active").identifier(), "shop_active");
    }

    #[test]
    fn reregistration_replaces_entry() {
        let service = VerificationService::new();
        service.register_handler("shop_active", capability_handler("shop_active", &["imagick"]));
        service.register_handler("shop_active", capability_handler("shop_active", &["curl"]));
        assert_eq!(service.len(), 1);
        assert!(service.is_fulfilled("shop_active"));
    }

    #[test]
    fn fulfillment_query_is_idempotent() {
        let service = VerificationService::new();
        service.register_handler("shop_active", capability_handler("shop_active", &["imagick"]));
        let first = service.are_dependencies_fulfilled("shop_active");
        let second = service.are_dependencies_fulfilled("shop_active");
        assert_eq!(first, second);
        assert_eq!(service.is_fulfilled("shop_active"), service.is_fulfilled("shop_active"));
    }

    #[test]
    fn identifiers_are_sorted() {
        let service = VerificationService::new();
        service.register_factory("b_active", || Ok(Box::new(NullHandler) as Box<dyn Handler>));
        service.register_handler("a_active", Box::new(NullHandler));
        assert_eq!(service.identifiers(), vec!["a_active", "b_active"]);
        assert!(!service.is_empty());
    }
}
