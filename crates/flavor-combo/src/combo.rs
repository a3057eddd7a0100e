//! The combo flavor plugin itself.

use crate::aggregate::DrainFailures;
use crate::config::ComboSpec;
use crate::merge::{clone_spec, merge_specs};
use async_trait::async_trait;
use flavor_spi::{
    AllocationMethod, FlavorPlugin, FlavorResolver, Health, InstanceDescription, InstanceSpec,
    Result,
};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

/// A flavor plugin whose behavior is the ordered aggregation of other flavor
/// plugins.
///
/// Members are listed in the combo's own properties and resolved through the
/// supplied [`FlavorResolver`] on every call. All four operations process the
/// member list strictly sequentially: healthy's short-circuit must return the
/// first failing member and prepare's last-writer-wins merge is
/// order-dependent.
pub struct ComboFlavor {
    resolver: Arc<dyn FlavorResolver>,
}

impl ComboFlavor {
    /// Create a combo flavor resolving its members through `resolver`
    pub fn new(resolver: Arc<dyn FlavorResolver>) -> Self {
        Self { resolver }
    }
}

#[async_trait]
impl FlavorPlugin for ComboFlavor {
    async fn validate(&self, properties: &Value, _allocation: &AllocationMethod) -> Result<()> {
        // Decode-level check only; member configurations are not validated
        // here.
        let spec = ComboSpec::from_properties(properties)?;
        debug!("validated combo configuration with {} members", spec.flavors.len());
        Ok(())
    }

    async fn prepare(
        &self,
        properties: &Value,
        spec: InstanceSpec,
        allocation: &AllocationMethod,
    ) -> Result<InstanceSpec> {
        let combo = ComboSpec::from_properties(properties)?;

        let mut outputs = Vec::with_capacity(combo.flavors.len());
        for member in &combo.flavors {
            // Every member starts from the same base spec; the clone keeps
            // members from observing each other's changes.
            let base = clone_spec(&spec);
            let plugin = self.resolver.resolve(&member.plugin)?;
            let prepared = plugin.prepare(&member.properties, base, allocation).await?;
            outputs.push(prepared);
        }

        Ok(merge_specs(&spec, &outputs))
    }

    async fn healthy(&self, properties: &Value, instance: &InstanceDescription) -> Result<Health> {
        // Overall health is the lowest common denominator of the members:
        // the first value other than Healthy is returned as-is and later
        // members are not consulted.
        let spec = ComboSpec::from_properties(properties)?;

        for member in &spec.flavors {
            let plugin = self.resolver.resolve(&member.plugin)?;
            let health = plugin.healthy(&member.properties, instance).await?;
            if health != Health::Healthy {
                debug!(
                    "member '{}' reported {:?} for instance {}, stopping",
                    member.plugin, health, instance.id
                );
                return Ok(health);
            }
        }

        Ok(Health::Healthy)
    }

    async fn drain(&self, properties: &Value, instance: &InstanceDescription) -> Result<()> {
        // Drain runs before destructive teardown, so one member's failure
        // must not keep the others from releasing their resources. Every
        // member is attempted and all failures are reported together.
        let spec = ComboSpec::from_properties(properties)?;

        let mut failures = DrainFailures::new();
        for member in &spec.flavors {
            match self.resolver.resolve(&member.plugin) {
                Ok(plugin) => {
                    if let Err(err) = plugin.drain(&member.properties, instance).await {
                        warn!("member '{}' failed to drain {}: {}", member.plugin, instance.id, err);
                        failures.record(err);
                    }
                }
                Err(err) => {
                    // An unresolvable member has nothing to drain; record the
                    // failure and move on.
                    warn!("skipping drain for unresolvable member '{}'", member.plugin);
                    failures.record(err);
                }
            }
        }

        failures.into_result()
    }
}
