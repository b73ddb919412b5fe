// Shared transport configuration for building reqwest::Client instances.
//
// Both the SSO handshake and the authenticated API channel go through a
// client built here, so timeout and user-agent policy live in one place.

use std::time::Duration;

use crate::error::Error;

const USER_AGENT: &str = concat!("gconnect/", env!("CARGO_PKG_VERSION"));

/// Transport configuration for the HTTP client.
///
/// No retry or backoff policy is applied at this layer; the client
/// surfaces rate limits and expiry as errors for the caller to handle.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
        }
    }
}

impl TransportConfig {
    /// Build a `reqwest::Client` from this config.
    ///
    /// Cookies are enabled because the SSO signin flow is cookie-bound;
    /// API calls themselves authenticate per-request with a bearer token.
    pub fn build_client(&self) -> Result<reqwest::Client, Error> {
        reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(USER_AGENT)
            .cookie_store(true)
            .build()
            .map_err(Error::Transport)
    }
}
