//! Error types shared by all flavor harness plugins.

use thiserror::Error;

/// Result type alias for plugin operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors reported by flavor and instance plugin operations.
///
/// Fail-fast operations (validate, prepare, healthy) return the first error
/// unchanged so callers can always distinguish the kinds below. Drain is the
/// one aggregating operation and reports [`Error::Aggregate`].
#[derive(Error, Debug)]
pub enum Error {
    /// A type tag has no registered plugin
    #[error("no plugin registered for type: {0:?}")]
    UnknownPluginType(String),

    /// Opaque plugin properties failed to decode into the expected shape
    #[error("malformed plugin configuration: {0}")]
    MalformedConfiguration(#[from] serde_json::Error),

    /// A resolved plugin reported a failure of its own
    #[error("{0}")]
    Plugin(String),

    /// Combined failures from a best-effort operation, in encounter order
    #[error("{}", .0.join(", "))]
    Aggregate(Vec<String>),

    /// A provisioning command exited unsuccessfully
    #[error("command failed: {0}")]
    Command(String),

    /// No instance exists with the given identifier
    #[error("instance does not exist: {0}")]
    InstanceNotFound(String),

    /// Template rendering error
    #[error("template error: {0}")]
    Render(String),

    /// YAML configuration error
    #[error("YAML configuration error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a plugin failure from a free-form message
    pub fn plugin(message: impl Into<String>) -> Self {
        Self::Plugin(message.into())
    }

    /// Create a command failure from a free-form message
    pub fn command(message: impl Into<String>) -> Self {
        Self::Command(message.into())
    }

    /// Create a template rendering failure from a free-form message
    pub fn render(message: impl Into<String>) -> Self {
        Self::Render(message.into())
    }
}
