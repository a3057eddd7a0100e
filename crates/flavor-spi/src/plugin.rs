//! Capability traits implemented by flavor and instance plugins.

use crate::models::{AllocationMethod, Health, InstanceDescription, InstanceId, InstanceSpec};
use crate::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// A policy component governing how instances are validated, customized
/// before provisioning, health-checked, and drained before teardown.
///
/// Every operation receives the plugin's opaque `properties` payload; plugins
/// decode it fresh on each call and hold no state between calls.
#[async_trait]
pub trait FlavorPlugin: Send + Sync {
    /// Check whether this plugin can support the given configuration
    async fn validate(&self, properties: &Value, allocation: &AllocationMethod) -> Result<()>;

    /// Modify the provisioning instructions for an instance, e.g. by placing
    /// additional tags or generating a specialized init script.
    ///
    /// The spec is passed by value; the caller keeps ownership of its own
    /// copy and must not observe mutations.
    async fn prepare(
        &self,
        properties: &Value,
        spec: InstanceSpec,
        allocation: &AllocationMethod,
    ) -> Result<InstanceSpec>;

    /// Determine whether an instance satisfies this plugin's health policy
    async fn healthy(&self, properties: &Value, instance: &InstanceDescription) -> Result<Health>;

    /// Release this plugin's resources on an instance before it is destroyed.
    /// Inverse of prepare; runs before destructive teardown.
    async fn drain(&self, properties: &Value, instance: &InstanceDescription) -> Result<()>;
}

/// Resolves a type tag to a concrete flavor plugin.
///
/// Resolution is a pure read; implementations are immutable after
/// construction and safe to share across calls.
pub trait FlavorResolver: Send + Sync {
    /// Resolve `type_tag` to a plugin, or fail with
    /// [`Error::UnknownPluginType`](crate::Error::UnknownPluginType).
    fn resolve(&self, type_tag: &str) -> Result<Arc<dyn FlavorPlugin>>;
}

/// A provisioning backend that creates, destroys and describes instances
#[async_trait]
pub trait InstancePlugin: Send + Sync {
    /// Create a new instance from the given spec, returning its identifier
    async fn provision(&self, spec: InstanceSpec) -> Result<InstanceId>;

    /// Terminate an existing instance
    async fn destroy(&self, id: &InstanceId) -> Result<()>;

    /// Describe all instances matching every one of the provided tags
    async fn describe_instances(
        &self,
        tags: &HashMap<String, String>,
    ) -> Result<Vec<InstanceDescription>>;
}
