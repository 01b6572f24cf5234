//! REST adapters for the reading-log backend.
//!
//! [`RestGateway`] owns transport details only: request construction, the
//! verbatim `Authorization` header, timeout and HTTP error mapping, and JSON
//! decoding. [`RestClient`] layers the port semantics on top, including the
//! credential gate that turns "not signed in" into `Ok(None)` without a
//! request.

mod dto;
mod gateway;
mod members;
mod posts;

pub use gateway::{DEFAULT_USER_AGENT, GatewayError, GatewayIdentity, RestGateway};

/// Port implementations backed by one [`RestGateway`].
#[derive(Debug, Clone)]
pub struct RestClient {
    gateway: RestGateway,
}

impl RestClient {
    /// Wrap a configured gateway.
    #[must_use]
    pub const fn new(gateway: RestGateway) -> Self {
        Self { gateway }
    }

    /// The underlying gateway.
    #[must_use]
    pub const fn gateway(&self) -> &RestGateway {
        &self.gateway
    }
}

/// Log a gateway failure and reduce it to a cause string for a port error.
pub(super) fn log_failure(error: &GatewayError) -> String {
    tracing::error!(operation = error.operation(), %error, "gateway request failed");
    error.to_string()
}
