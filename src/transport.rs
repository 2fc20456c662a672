//! HTTP transport seam for the payout client
//!
//! The client treats HTTP as an injected capability so tests can substitute
//! a fake transport without real network calls. [`HttpTransport`] is the
//! reqwest-backed implementation used in production.

use crate::types::GatewayResponse;
use async_trait::async_trait;
use http::HeaderMap;
use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;

/// Network-level failure: the exchange never produced a gateway response.
///
/// A non-2xx HTTP status is not a transport error; the gateway returns a
/// signed JSON body even on failure, so those responses flow back normally.
#[derive(Error, Debug)]
pub enum TransportError {
    /// Connection could not be established
    #[error("connection failed: {0}")]
    Connect(String),

    /// The request timed out
    #[error("request timed out")]
    Timeout,

    /// Any other client-side failure (TLS, request construction, body
    /// streaming)
    #[error("request failed: {0}")]
    Other(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_connect() {
            Self::Connect(err.to_string())
        } else {
            Self::Other(err.to_string())
        }
    }
}

/// Injected HTTP capability: one POST, whatever the status
#[async_trait]
pub trait Transport: Send + Sync {
    /// Issue a POST and hand back whatever the gateway answered, including
    /// non-2xx statuses
    async fn post(
        &self,
        url: &str,
        headers: HeaderMap,
        body: Vec<u8>,
    ) -> Result<GatewayResponse, TransportError>;
}

/// reqwest-backed transport
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Build a transport, applying the request timeout when given
    pub fn new(timeout: Option<Duration>) -> crate::Result<Self> {
        let mut builder = reqwest::Client::builder();

        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|e| crate::PayoutError::config(format!("failed to create HTTP client: {e}")))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post(
        &self,
        url: &str,
        headers: HeaderMap,
        body: Vec<u8>,
    ) -> Result<GatewayResponse, TransportError> {
        let response = self
            .client
            .post(url)
            .headers(headers)
            .body(body)
            .send()
            .await?;

        let status = response.status().as_u16();
        let headers: HashMap<String, String> = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_ascii_lowercase(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();
        let body = response.bytes().await?.to_vec();

        Ok(GatewayResponse::new(status, headers, body))
    }
}
