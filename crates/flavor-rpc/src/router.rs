//! Registry mapping type tags to flavor plugins.

use flavor_spi::{Error, FlavorPlugin, FlavorResolver, Result};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Routes a request's type tag to a concrete flavor plugin.
///
/// A router is built either around a single default plugin (no type
/// multiplexing, every tag routes to it) or around a typed registry, in
/// which case the empty tag is invalid and unregistered tags fail with
/// [`Error::UnknownPluginType`]. The registry is read-only after
/// construction; resolution is a pure mapping read.
pub struct FlavorRouter {
    default_plugin: Option<Arc<dyn FlavorPlugin>>,
    typed: HashMap<String, Arc<dyn FlavorPlugin>>,
}

impl FlavorRouter {
    /// Create a router serving a single plugin for every type tag
    pub fn new(plugin: Arc<dyn FlavorPlugin>) -> Self {
        Self {
            default_plugin: Some(plugin),
            typed: HashMap::new(),
        }
    }

    /// Create a router multiplexing over the given typed registry
    pub fn with_types(typed: HashMap<String, Arc<dyn FlavorPlugin>>) -> Self {
        Self {
            default_plugin: None,
            typed,
        }
    }

    /// List the registered type tags, for introspection
    pub fn list_types(&self) -> Vec<String> {
        self.typed.keys().cloned().collect()
    }

    /// Resolve `type_tag` to its plugin
    pub fn resolve(&self, type_tag: &str) -> Result<Arc<dyn FlavorPlugin>> {
        if self.typed.is_empty() {
            if let Some(plugin) = &self.default_plugin {
                return Ok(plugin.clone());
            }
        } else if !type_tag.is_empty() {
            if let Some(plugin) = self.typed.get(type_tag) {
                return Ok(plugin.clone());
            }
        }

        debug!("no plugin registered for type tag '{}'", type_tag);
        Err(Error::UnknownPluginType(type_tag.to_string()))
    }
}

impl FlavorResolver for FlavorRouter {
    fn resolve(&self, type_tag: &str) -> Result<Arc<dyn FlavorPlugin>> {
        FlavorRouter::resolve(self, type_tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use flavor_spi::{AllocationMethod, Health, InstanceDescription, InstanceSpec};
    use serde_json::Value;

    struct NoopFlavor;

    #[async_trait]
    impl FlavorPlugin for NoopFlavor {
        async fn validate(&self, _: &Value, _: &AllocationMethod) -> Result<()> {
            Ok(())
        }

        async fn prepare(
            &self,
            _: &Value,
            spec: InstanceSpec,
            _: &AllocationMethod,
        ) -> Result<InstanceSpec> {
            Ok(spec)
        }

        async fn healthy(&self, _: &Value, _: &InstanceDescription) -> Result<Health> {
            Ok(Health::Healthy)
        }

        async fn drain(&self, _: &Value, _: &InstanceDescription) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_default_mode_routes_any_tag() {
        let router = FlavorRouter::new(Arc::new(NoopFlavor));
        assert!(router.resolve("").is_ok());
        assert!(router.resolve("anything").is_ok());
        assert!(router.resolve("nonexistent").is_ok());
    }

    #[test]
    fn test_registry_mode_resolves_registered_tags() {
        let mut typed: HashMap<String, Arc<dyn FlavorPlugin>> = HashMap::new();
        typed.insert("zookeeper".to_string(), Arc::new(NoopFlavor));
        let router = FlavorRouter::with_types(typed);

        assert!(router.resolve("zookeeper").is_ok());
    }

    #[test]
    fn test_registry_mode_rejects_unknown_tag() {
        let mut typed: HashMap<String, Arc<dyn FlavorPlugin>> = HashMap::new();
        typed.insert("zookeeper".to_string(), Arc::new(NoopFlavor));
        let router = FlavorRouter::with_types(typed);

        let result = router.resolve("nonexistent");
        assert!(matches!(result, Err(Error::UnknownPluginType(tag)) if tag == "nonexistent"));
    }

    #[test]
    fn test_registry_mode_rejects_empty_tag() {
        let mut typed: HashMap<String, Arc<dyn FlavorPlugin>> = HashMap::new();
        typed.insert("zookeeper".to_string(), Arc::new(NoopFlavor));
        let router = FlavorRouter::with_types(typed);

        assert!(matches!(
            router.resolve(""),
            Err(Error::UnknownPluginType(_))
        ));
    }

    #[test]
    fn test_list_types() {
        let mut typed: HashMap<String, Arc<dyn FlavorPlugin>> = HashMap::new();
        typed.insert("a".to_string(), Arc::new(NoopFlavor));
        typed.insert("b".to_string(), Arc::new(NoopFlavor));
        let router = FlavorRouter::with_types(typed);

        let mut types = router.list_types();
        types.sort();
        assert_eq!(types, vec!["a", "b"]);
    }
}
