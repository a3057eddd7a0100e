//! Type-tag routing and request dispatch for flavor plugins.
//!
//! This crate is the transport-facing surface of the flavor harness: it
//! resolves an inbound request's type tag to a concrete plugin and converts
//! typed request envelopes into plugin calls. The wire transport itself
//! (sockets, marshalling) lives outside this workspace; a server embeds
//! [`FlavorServer`] and hands it already-decoded requests.

#![warn(missing_docs)]

mod protocol;
mod router;
mod server;

pub use protocol::{
    DrainRequest, DrainResponse, HealthyRequest, HealthyResponse, PrepareRequest, PrepareResponse,
    ValidateRequest, ValidateResponse,
};
pub use router::FlavorRouter;
pub use server::FlavorServer;
