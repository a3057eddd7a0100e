//! Plugin interfaces shared across the flavor harness.
//!
//! This crate defines the data model handed between plugins (instance specs,
//! instance descriptions, health states, allocation methods), the capability
//! traits implemented by flavor and instance plugins, and the error taxonomy
//! every plugin operation reports through.

#![warn(missing_docs)]

mod error;
mod models;
mod plugin;
mod render;

pub use error::{Error, Result};
pub use models::{
    AllocationMethod, Attachment, Health, InstanceDescription, InstanceId, InstanceSpec, LogicalId,
};
pub use plugin::{FlavorPlugin, FlavorResolver, InstancePlugin};
pub use render::{BindingRenderer, Renderer};
