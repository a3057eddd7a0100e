//! Data models handed between flavor and instance plugins.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Unique identifier of a provisioned instance
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstanceId(pub String);

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for InstanceId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Stable logical identity of an instance, e.g. a fixed IP address.
///
/// Logical ids survive the physical instance they are currently assigned to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LogicalId(pub String);

impl fmt::Display for LogicalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LogicalId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Health state reported by a flavor plugin for one instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Health {
    /// The plugin cannot determine the instance's health
    Unknown,
    /// The instance passes the plugin's health policy
    Healthy,
    /// The instance fails the plugin's health policy
    Unhealthy,
}

/// Describes how many or which logical instances a flavor decision applies to.
///
/// Passed through to every plugin unmodified; the composition layer never
/// inspects it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AllocationMethod {
    /// Number of instances to maintain, for cattle-style groups
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,

    /// Fixed logical ids to maintain, for pet-style groups
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logical_ids: Option<Vec<LogicalId>>,
}

/// A storage or device attachment requested for an instance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    /// Identifier of the attached resource
    pub id: String,

    /// Kind of attachment, interpreted by the instance plugin
    #[serde(rename = "type")]
    pub attachment_type: String,
}

/// The provisioning template handed to an instance plugin.
///
/// `tags`, `init` and `attachments` are mutated by flavor plugins during
/// prepare; `properties` and `logical_id` are immutable inputs that identify
/// the ultimate provisioning target.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InstanceSpec {
    /// Opaque configuration for the instance plugin
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<serde_json::Value>,

    /// Labels applied to the provisioned instance
    #[serde(default)]
    pub tags: HashMap<String, String>,

    /// Shell script run when the instance boots
    #[serde(default)]
    pub init: String,

    /// Stable logical identity, if this is a pet-style instance
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logical_id: Option<LogicalId>,

    /// Attachments to associate with the instance, in definition order
    #[serde(default)]
    pub attachments: Vec<Attachment>,
}

/// Read-only view of a provisioned instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstanceDescription {
    /// Physical instance identifier
    pub id: InstanceId,

    /// Logical identity, if the instance was provisioned with one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logical_id: Option<LogicalId>,

    /// Labels on the instance
    #[serde(default)]
    pub tags: HashMap<String, String>,
}
