//! Turning a manifest into registered handlers.

use std::sync::Arc;

use anyhow::anyhow;

use crate::checker::{
    CallableChecker, CapabilityChecker, Checker, ComponentChecker, ConfigValueChecker,
};
use crate::config::schema::{
    CheckerConfig, ContextConfig, EnvironmentConfig, EnvironmentSource, Manifest,
};
use crate::declaration::DeclarationKind;
use crate::environment::{HostEnvironment, StaticEnvironment, SystemEnvironment};
use crate::gate::handler_identifier;
use crate::handler::{Handler, MultiCheckerHandler, SingleCheckerHandler};
use crate::service::VerificationService;

/// Build the host environment a manifest describes.
pub fn build_environment(config: &EnvironmentConfig) -> Arc<dyn HostEnvironment> {
    match config.source {
        EnvironmentSource::Static => {
            let mut env = StaticEnvironment::new();
            for name in &config.capabilities {
                env = env.with_capability(name.as_str());
            }
            for name in &config.callables {
                env = env.with_callable(name.as_str());
            }
            for (key, value) in &config.config {
                env = env.with_config(key.as_str(), value.to_string());
            }
            for (identifier, version) in &config.components {
                let version = version.as_ref().map(|v| v.to_string());
                env = env.with_component(identifier.as_str(), version.as_deref());
            }
            Arc::new(env)
        }
        EnvironmentSource::System => {
            let mut env = SystemEnvironment::new();
            for (identifier, version) in &config.components {
                let version = version.as_ref().map(|v| v.to_string());
                env = env.with_component(identifier.as_str(), version.as_deref());
            }
            Arc::new(env)
        }
    }
}

/// Create an empty checker of `kind`.
pub fn new_checker(
    kind: DeclarationKind,
    id: String,
    env: Arc<dyn HostEnvironment>,
) -> Box<dyn Checker> {
    match kind {
        DeclarationKind::Capability => Box::new(CapabilityChecker::new(id, env)),
        DeclarationKind::Callable => Box::new(CallableChecker::new(id, env)),
        DeclarationKind::ConfigurationValue => Box::new(ConfigValueChecker::new(id, env)),
        DeclarationKind::SiblingComponent => Box::new(ComponentChecker::new(id, env)),
    }
}

/// Build a checker and register its declarations.
///
/// Rejected declarations are skipped; the checker is still returned.
///
/// # Errors
///
/// Fails only when `config.kind` names no known kind.
pub fn build_checker(
    component: &str,
    config: &CheckerConfig,
    env: Arc<dyn HostEnvironment>,
) -> anyhow::Result<Box<dyn Checker>> {
    let kind: DeclarationKind = config.kind.parse().map_err(|e: String| anyhow!(e))?;
    let mut checker = new_checker(kind, config.resolved_id(component), env);
    if let Some(optional) = config.optional {
        checker.base_mut().set_optional(optional);
    }

    let rejected = config
        .declarations
        .iter()
        .filter(|raw| !checker.register_raw(raw))
        .count();
    if rejected > 0 {
        tracing::warn!(
            "Checker '{}' skipped {} of {} declarations",
            checker.id(),
            rejected,
            config.declarations.len()
        );
    }

    Ok(checker)
}

/// Build the handler for one component context.
///
/// One checker yields a [`SingleCheckerHandler`], anything else a
/// [`MultiCheckerHandler`].
pub fn build_handler(
    component: &str,
    context: &str,
    config: &ContextConfig,
    env: Arc<dyn HostEnvironment>,
) -> anyhow::Result<Box<dyn Handler>> {
    let identifier = handler_identifier(component, context);

    if let [only] = config.checkers.as_slice() {
        let checker = build_checker(component, only, env)?;
        let mut handler = SingleCheckerHandler::new(identifier, checker);
        if let Some(optional) = config.optional {
            handler = handler.optional(optional);
        }
        return Ok(Box::new(handler));
    }

    let mut handler = MultiCheckerHandler::new(identifier);
    if let Some(optional) = config.optional {
        handler = handler.optional(optional);
    }
    for checker_config in &config.checkers {
        handler.add_checker(build_checker(component, checker_config, env.clone())?);
    }
    Ok(Box::new(handler))
}

/// Register a lazy factory for every component context in `manifest`.
///
/// Returns the registered identifiers in manifest order.
pub fn register_manifest(manifest: &Manifest, service: &VerificationService) -> Vec<String> {
    let env = build_environment(&manifest.environment);
    let mut registered = Vec::new();

    for (component, component_config) in &manifest.components {
        for (context, context_config) in &component_config.contexts {
            let identifier = handler_identifier(component, context);
            let env = env.clone();
            let component = component.clone();
            let context = context.clone();
            let context_config = context_config.clone();
            service.register_factory(identifier.clone(), move || {
                build_handler(&component, &context, &context_config, env)
            });
            registered.push(identifier);
        }
    }

    tracing::debug!("Registered {} handlers from manifest", registered.len());
    registered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::loader::parse_manifest;
    use crate::declaration::RawDeclaration;
    use crate::handler::Grouping;
    use std::path::Path;

    const MANIFEST: &str = r#"
environment:
  source: static
  capabilities: [curl]
  callables: [gzip]
  config:
    memory_limit: 64M
  components:
    shop: "1.9.9"
components:
  plugin:
    contexts:
      active:
        checkers:
          - kind: capability
            declarations:
              - name: curl
          - id: plugin_optional_shop
            kind: sibling_component
            declarations:
              - identifier: shop
                minimum_version: "2.0.0"
      disabled:
        checkers:
          - kind: configuration_value
            declarations:
              - key: memory_limit
                expected: 128M
                comparison: minimum
"#;

    fn manifest() -> Manifest {
        parse_manifest(MANIFEST, Path::new("deps.yml")).unwrap()
    }

    #[test]
    fn static_environment_from_manifest() {
        let env = build_environment(&manifest().environment);
        assert!(env.has_capability("curl"));
        assert!(env.has_callable("gzip"));
        assert_eq!(env.config_value("memory_limit").as_deref(), Some("64M"));
        assert_eq!(env.component_version("shop").as_deref(), Some("1.9.9"));
    }

    #[test]
    fn checker_id_and_optional_defaults() {
        let env = build_environment(&manifest().environment);
        let config = CheckerConfig {
            kind: "callable".to_string(),
            declarations: vec![RawDeclaration::named("gzip"), RawDeclaration::default()],
            ..Default::default()
        };
        let checker = build_checker("plugin", &config, env.clone()).unwrap();
        assert_eq!(checker.id(), "plugin_callable");
        assert!(!checker.is_optional());
        assert_eq!(checker.declarations().len(), 1);

        let config = CheckerConfig {
            optional: Some(true),
            ..config
        };
        assert!(build_checker("plugin", &config, env).unwrap().is_optional());
    }

    #[test]
    fn unknown_kind_fails() {
        let env = build_environment(&manifest().environment);
        let config = CheckerConfig {
            kind: "php_extension".to_string(),
            ..Default::default()
        };
        let err = build_checker("plugin", &config, env).err().unwrap();
        assert!(err.to_string().contains("php_extension"));
    }

    #[test]
    fn handler_shape_follows_checker_count() {
        let manifest = manifest();
        let env = build_environment(&manifest.environment);
        let contexts = &manifest.components["plugin"].contexts;

        let single =
            build_handler("plugin", "disabled", &contexts["disabled"], env.clone()).unwrap();
        assert!(matches!(single.dependencies(), Grouping::Flat { .. }));

        let multi = build_handler("plugin", "active", &contexts["active"], env).unwrap();
        assert_eq!(multi.identifier(), "plugin_active");
        assert_eq!(multi.dependencies().kind_count(), 2);
    }

    #[test]
    fn registered_manifest_resolves_lazily() {
        let service = VerificationService::new();
        let ids = register_manifest(&manifest(), &service);
        assert_eq!(ids, vec!["plugin_active", "plugin_disabled"]);
        assert_eq!(service.resolved_count(), 0);

        // shop is too old, but that checker is optional
        assert!(service.is_fulfilled("plugin_active"));
        // 64M is below 128M
        assert!(!service.is_fulfilled("plugin_disabled"));
        assert_eq!(service.resolved_count(), 2);
    }

    #[test]
    fn optional_context_does_not_block() {
        let mut manifest = manifest();
        manifest
            .components
            .get_mut("plugin")
            .unwrap()
            .contexts
            .get_mut("disabled")
            .unwrap()
            .optional = Some(true);

        let service = VerificationService::new();
        register_manifest(&manifest, &service);
        assert!(service.get_handler("plugin_disabled").is_optional());
        assert!(service.is_fulfilled("plugin_disabled"));
        assert_eq!(service.get_missing_dependencies("plugin_disabled").item_count(), 1);
    }

    #[test]
    fn broken_context_falls_back_to_null_handler() {
        let mut manifest = manifest();
        manifest
            .components
            .get_mut("plugin")
            .unwrap()
            .contexts
            .get_mut("active")
            .unwrap()
            .checkers[0]
            .kind = "bogus".to_string();

        let service = VerificationService::new();
        register_manifest(&manifest, &service);
        assert_eq!(service.get_handler("plugin_active").identifier(), "null");
    }
}
