//! Dispatch surface converting request envelopes into plugin calls.

use crate::protocol::{
    DrainRequest, DrainResponse, HealthyRequest, HealthyResponse, PrepareRequest, PrepareResponse,
    ValidateRequest, ValidateResponse,
};
use crate::router::FlavorRouter;
use flavor_spi::Result;
use std::sync::Arc;
use tracing::debug;

/// Serves the four flavor operations over a [`FlavorRouter`].
///
/// One method per operation; each resolves the request's type tag, invokes
/// the plugin, and echoes the tag into the response. Plugin failures
/// propagate unchanged so the transport can surface them as RPC-level
/// errors.
pub struct FlavorServer {
    router: Arc<FlavorRouter>,
}

impl FlavorServer {
    /// Create a server dispatching through `router`
    pub fn new(router: Arc<FlavorRouter>) -> Self {
        Self { router }
    }

    /// Check whether the selected plugin supports a configuration
    pub async fn validate(&self, request: ValidateRequest) -> Result<ValidateResponse> {
        debug!("dispatching validate for type '{}'", request.plugin_type);
        let plugin = self.router.resolve(&request.plugin_type)?;
        plugin
            .validate(&request.properties, &request.allocation)
            .await?;
        Ok(ValidateResponse {
            plugin_type: request.plugin_type,
            ok: true,
        })
    }

    /// Let the selected plugin customize the provisioning spec
    pub async fn prepare(&self, request: PrepareRequest) -> Result<PrepareResponse> {
        debug!("dispatching prepare for type '{}'", request.plugin_type);
        let plugin = self.router.resolve(&request.plugin_type)?;
        let spec = plugin
            .prepare(&request.properties, request.spec, &request.allocation)
            .await?;
        Ok(PrepareResponse {
            plugin_type: request.plugin_type,
            spec,
        })
    }

    /// Ask the selected plugin for the instance's health
    pub async fn healthy(&self, request: HealthyRequest) -> Result<HealthyResponse> {
        debug!("dispatching healthy for type '{}'", request.plugin_type);
        let plugin = self.router.resolve(&request.plugin_type)?;
        let health = plugin
            .healthy(&request.properties, &request.instance)
            .await?;
        Ok(HealthyResponse {
            plugin_type: request.plugin_type,
            health,
        })
    }

    /// Let the selected plugin drain the instance before teardown
    pub async fn drain(&self, request: DrainRequest) -> Result<DrainResponse> {
        debug!("dispatching drain for type '{}'", request.plugin_type);
        let plugin = self.router.resolve(&request.plugin_type)?;
        plugin.drain(&request.properties, &request.instance).await?;
        Ok(DrainResponse {
            plugin_type: request.plugin_type,
            ok: true,
        })
    }
}
