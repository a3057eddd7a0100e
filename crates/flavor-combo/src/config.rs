//! Configuration model for the combo flavor.

use flavor_spi::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One member of a combo: the type tag of the plugin to invoke and the
/// opaque configuration handed to it.
///
/// Position in the containing list is significant: it defines both execution
/// sequence and merge precedence, and is preserved verbatim from input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlavorReference {
    /// Type tag resolving to the member plugin
    pub plugin: String,

    /// Opaque configuration for the member plugin
    #[serde(default)]
    pub properties: Value,
}

/// The combo flavor's own configuration: an ordered list of members.
///
/// Decoded fresh from the request properties on every call and discarded at
/// the end of it, so stale configuration cannot leak between calls.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComboSpec {
    /// Member flavors, in execution and merge-precedence order
    #[serde(default)]
    pub flavors: Vec<FlavorReference>,
}

impl ComboSpec {
    /// Decode a combo spec from the opaque request properties
    pub fn from_properties(properties: &Value) -> Result<Self> {
        Ok(serde_json::from_value(properties.clone())?)
    }
}
