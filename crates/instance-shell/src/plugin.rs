//! The shell-backed instance plugin.

use crate::config::ShellInstanceConfig;
use async_trait::async_trait;
use flavor_spi::{
    Error, InstanceDescription, InstanceId, InstancePlugin, InstanceSpec, LogicalId, Renderer,
    Result,
};
use futures::TryStreamExt;
use serde_json::json;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Instance plugin provisioning machines through shell commands.
///
/// Each instance lives in its own subdirectory of the configured state
/// directory: `boot.sh` (the spec's init script), `machine` (the rendered
/// machine template), `tags` (JSON) and, for instances with a logical id,
/// `ip`. The provision and destroy commands find their instance through the
/// `INSTANCE_DIR` environment variable.
pub struct ShellInstancePlugin {
    config: ShellInstanceConfig,
    renderer: Arc<dyn Renderer>,
}

impl ShellInstancePlugin {
    /// Create a plugin over the given configuration, creating the state
    /// directory if it does not exist yet.
    pub fn new(config: ShellInstanceConfig, renderer: Arc<dyn Renderer>) -> Result<Self> {
        std::fs::create_dir_all(&config.instances_dir)?;
        Ok(Self { config, renderer })
    }

    async fn run(&self, command: &[String], instance_dir: &Path) -> Result<()> {
        let Some((program, args)) = command.split_first() else {
            return Err(Error::command("empty command"));
        };

        debug!("running {} {:?} for {:?}", program, args, instance_dir);
        let output = async_process::Command::new(program)
            .args(args)
            .env("INSTANCE_DIR", instance_dir)
            .output()
            .await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::command(format!(
                "{} exited with {}: {}",
                program,
                output.status,
                stderr.trim()
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl InstancePlugin for ShellInstancePlugin {
    async fn provision(&self, spec: InstanceSpec) -> Result<InstanceId> {
        let bindings = json!({
            "properties": spec.properties.clone().unwrap_or(serde_json::Value::Null),
            "logical_id": spec.logical_id.as_ref().map(|id| id.to_string()),
        });
        let machine = self
            .renderer
            .render(&self.config.machine_template, &bindings)?;

        let id = InstanceId(format!("shell-{}", Uuid::new_v4()));
        let instance_dir = self.config.instances_dir.join(&id.0);
        async_fs::create_dir_all(&instance_dir).await?;

        async_fs::write(instance_dir.join("boot.sh"), spec.init.as_bytes()).await?;
        async_fs::write(instance_dir.join("machine"), machine.as_bytes()).await?;

        if let Err(err) = self.run(&self.config.provision_command, &instance_dir).await {
            warn!("provision command failed for {}: {}", id, err);
            let _ = self.destroy(&id).await;
            return Err(err);
        }

        // Metadata is written only once the instance is actually up, so a
        // half-provisioned directory never shows up in describe_instances.
        let tag_data = serde_json::to_vec(&spec.tags)?;
        async_fs::write(instance_dir.join("tags"), tag_data).await?;
        if let Some(logical_id) = &spec.logical_id {
            async_fs::write(instance_dir.join("ip"), logical_id.to_string().as_bytes()).await?;
        }

        info!("provisioned instance {}", id);
        Ok(id)
    }

    async fn destroy(&self, id: &InstanceId) -> Result<()> {
        let instance_dir = self.config.instances_dir.join(&id.0);
        if async_fs::metadata(&instance_dir).await.is_err() {
            return Err(Error::InstanceNotFound(id.to_string()));
        }

        info!("destroying instance {}", id);
        if let Err(err) = self.run(&self.config.destroy_command, &instance_dir).await {
            // The directory is removed regardless so a wedged teardown
            // command cannot leave an undeletable instance behind.
            warn!("destroy command failed for {}: {}", id, err);
        }

        async_fs::remove_dir_all(&instance_dir).await?;
        Ok(())
    }

    async fn describe_instances(
        &self,
        tags: &HashMap<String, String>,
    ) -> Result<Vec<InstanceDescription>> {
        let mut entries = async_fs::read_dir(&self.config.instances_dir).await?;
        let mut descriptions = Vec::new();

        while let Some(entry) = entries.try_next().await? {
            if !entry.file_type().await?.is_dir() {
                continue;
            }
            let instance_dir = entry.path();

            let tag_data = match async_fs::read(instance_dir.join("tags")).await {
                Ok(data) => data,
                Err(err) if err.kind() == std::io::ErrorKind::NotFound => continue,
                Err(err) => return Err(err.into()),
            };
            let instance_tags: HashMap<String, String> = serde_json::from_slice(&tag_data)?;

            let all_matched = tags
                .iter()
                .all(|(key, value)| instance_tags.get(key) == Some(value));
            if !all_matched {
                continue;
            }

            let logical_id = match async_fs::read_to_string(instance_dir.join("ip")).await {
                Ok(ip) => Some(LogicalId(ip)),
                Err(err) if err.kind() == std::io::ErrorKind::NotFound => None,
                Err(err) => return Err(err.into()),
            };

            descriptions.push(InstanceDescription {
                id: InstanceId(entry.file_name().to_string_lossy().into_owned()),
                logical_id,
                tags: instance_tags,
            });
        }

        Ok(descriptions)
    }
}
