//! Gateway endpoint and shared-secret configuration

use std::time::Duration;
use url::Url;

/// Configuration for the payout gateway.
///
/// The signing secret is injected here rather than read from a global, so
/// one process can talk to several gateways with different key material.
/// Read-only after construction; the client never mutates it between calls.
#[derive(Clone)]
pub struct GatewayConfig {
    /// Payout endpoint URL
    pub url: String,
    /// Shared signing secret
    pub secret: String,
    /// Request timeout
    pub timeout: Option<Duration>,
}

impl std::fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("url", &self.url)
            .field("secret", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl GatewayConfig {
    /// Create a new gateway config
    pub fn new(url: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            secret: secret.into(),
            timeout: None,
        }
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> crate::Result<()> {
        if self.url.is_empty() {
            return Err(crate::PayoutError::config("gateway URL cannot be empty"));
        }

        let url = Url::parse(&self.url)
            .map_err(|e| crate::PayoutError::config(format!("invalid gateway URL: {e}")))?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(crate::PayoutError::config(
                "gateway URL must use http or https",
            ));
        }

        if self.secret.is_empty() {
            return Err(crate::PayoutError::config("signing secret cannot be empty"));
        }

        Ok(())
    }
}
