//! Shell-driven instance plugin.
//!
//! Provisions machine instances by rendering a machine template, writing the
//! instance's boot script and metadata into a per-instance directory, and
//! shelling out to configurable provision/destroy commands with that
//! directory exported in their environment. The on-disk directory doubles as
//! the instance record that `describe_instances` reads back.

#![warn(missing_docs)]

mod config;
mod plugin;

pub use config::ShellInstanceConfig;
pub use plugin::ShellInstancePlugin;
