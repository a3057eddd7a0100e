//! Configuration for the shell instance plugin.

use flavor_spi::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration for a [`ShellInstancePlugin`](crate::ShellInstancePlugin)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShellInstanceConfig {
    /// Directory holding one subdirectory per provisioned instance
    pub instances_dir: PathBuf,

    /// Command (program plus arguments) that brings an instance up; runs
    /// with `INSTANCE_DIR` pointing at the instance directory
    pub provision_command: Vec<String>,

    /// Command that tears an instance down, same environment contract
    pub destroy_command: Vec<String>,

    /// Template for the machine definition file, rendered with the
    /// instance's properties and logical id as bindings
    #[serde(default)]
    pub machine_template: String,
}

impl ShellInstanceConfig {
    /// Load a configuration from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&contents)?)
    }
}
