//! Request and response envelopes for the four flavor operations.
//!
//! Every response echoes the request's `type` tag so a caller routing across
//! multiple composed services can correlate results. The outer `type` field
//! selects which registered plugin handles the call; it is orthogonal to the
//! tags nested inside a combo's member list.

use flavor_spi::{AllocationMethod, Health, InstanceDescription, InstanceSpec};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Request to check whether a plugin supports a configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateRequest {
    /// Type tag selecting the handling plugin
    #[serde(rename = "type", default)]
    pub plugin_type: String,

    /// Opaque plugin configuration
    #[serde(default)]
    pub properties: Value,

    /// Allocation the configuration applies to
    #[serde(default)]
    pub allocation: AllocationMethod,
}

/// Response to [`ValidateRequest`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateResponse {
    /// Echo of the request's type tag
    #[serde(rename = "type")]
    pub plugin_type: String,

    /// Whether the configuration was accepted
    pub ok: bool,
}

/// Request to customize an instance spec before provisioning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrepareRequest {
    /// Type tag selecting the handling plugin
    #[serde(rename = "type", default)]
    pub plugin_type: String,

    /// Opaque plugin configuration
    #[serde(default)]
    pub properties: Value,

    /// The provisioning template to customize
    pub spec: InstanceSpec,

    /// Allocation the spec applies to
    #[serde(default)]
    pub allocation: AllocationMethod,
}

/// Response to [`PrepareRequest`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrepareResponse {
    /// Echo of the request's type tag
    #[serde(rename = "type")]
    pub plugin_type: String,

    /// The customized spec
    pub spec: InstanceSpec,
}

/// Request to health-check one instance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthyRequest {
    /// Type tag selecting the handling plugin
    #[serde(rename = "type", default)]
    pub plugin_type: String,

    /// Opaque plugin configuration
    #[serde(default)]
    pub properties: Value,

    /// The instance to check
    pub instance: InstanceDescription,
}

/// Response to [`HealthyRequest`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthyResponse {
    /// Echo of the request's type tag
    #[serde(rename = "type")]
    pub plugin_type: String,

    /// Reported health state
    pub health: Health,
}

/// Request to drain one instance before teardown
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrainRequest {
    /// Type tag selecting the handling plugin
    #[serde(rename = "type", default)]
    pub plugin_type: String,

    /// Opaque plugin configuration
    #[serde(default)]
    pub properties: Value,

    /// The instance to drain
    pub instance: InstanceDescription,
}

/// Response to [`DrainRequest`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrainResponse {
    /// Echo of the request's type tag
    #[serde(rename = "type")]
    pub plugin_type: String,

    /// Whether the drain completed without failures
    pub ok: bool,
}
