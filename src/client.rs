//! Payout client: one signed request/response exchange per call
//!
//! The client holds only read-only configuration and a shared transport,
//! so clones can issue concurrent submissions, one task per request. Retry
//! policy stays with the caller, driven by the [`Action`] each exchange
//! yields; the client itself never loops.

use crate::config::GatewayConfig;
use crate::signature::{self, SIGNATURE_HEADER};
use crate::transport::{HttpTransport, Transport};
use crate::types::{GatewayResponse, PayoutAck, PayoutRequest, SignedEnvelope};
use crate::{PayoutError, Result};
use http::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Caller action dictated by the gateway status code.
///
/// Every code maps to exactly one action; executing retries is the
/// caller's responsibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// 200: request accepted for processing; the final payout result
    /// arrives later via the signed callback
    Accepted,
    /// 400: this exact payload is malformed, do not retry it unmodified
    RejectedInput,
    /// 500: gateway-side failure, safe to retry with backoff
    GatewayInternalError,
    /// 503: retry later, honoring any server-provided delay
    Unavailable,
    /// Any other code (409 among them): ambiguous, surface for manual
    /// handling, no automatic retry
    Escalate,
}

impl Action {
    /// Whether the same payload may be resubmitted
    pub fn is_retriable(self) -> bool {
        matches!(self, Self::GatewayInternalError | Self::Unavailable)
    }
}

/// Map a gateway status code to the action the caller should take
pub fn classify(status: u16) -> Action {
    match status {
        200 => Action::Accepted,
        400 => Action::RejectedInput,
        500 => Action::GatewayInternalError,
        503 => Action::Unavailable,
        _ => Action::Escalate,
    }
}

/// Outcome of one payout exchange whose response passed signature
/// verification and decoded cleanly
#[derive(Debug, Clone)]
pub struct PayoutOutcome {
    /// HTTP status the gateway answered with
    pub status: u16,
    /// Action the status maps to
    pub action: Action,
    /// Decoded response payload
    pub ack: PayoutAck,
    /// Server-suggested retry delay, when the gateway provided one
    pub retry_after: Option<Duration>,
}

/// Client for the signed payout exchange
#[derive(Clone)]
pub struct PayoutClient {
    config: GatewayConfig,
    transport: Arc<dyn Transport>,
}

impl std::fmt::Debug for PayoutClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PayoutClient")
            .field("config", &self.config)
            .field("transport", &"<transport>")
            .finish()
    }
}

impl PayoutClient {
    /// Create a client with the reqwest-backed transport
    pub fn new(config: GatewayConfig) -> Result<Self> {
        config.validate()?;
        let transport = HttpTransport::new(config.timeout)?;
        Ok(Self {
            config,
            transport: Arc::new(transport),
        })
    }

    /// Create a client with a caller-provided transport
    pub fn with_transport(config: GatewayConfig, transport: Arc<dyn Transport>) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, transport })
    }

    /// Serialize and sign a request into the envelope that goes on the wire
    pub fn seal(&self, request: &PayoutRequest) -> Result<SignedEnvelope> {
        SignedEnvelope::seal(request, &self.config.secret)
    }

    /// Perform one payout exchange: serialize, sign, POST, classify the
    /// status, verify the response signature, decode the payload.
    ///
    /// A signature mismatch aborts before any decode; the body of an
    /// unverified response is never acted upon.
    pub async fn submit(&self, request: &PayoutRequest) -> Result<PayoutOutcome> {
        let envelope = self.seal(request)?;
        let response = self.send(envelope).await?;
        self.handle_response(&response)
    }

    /// POST a sealed envelope to the payout endpoint
    pub async fn send(&self, envelope: SignedEnvelope) -> Result<GatewayResponse> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let signature = HeaderValue::from_str(&envelope.signature)
            .map_err(|e| PayoutError::config(format!("signature is not a valid header value: {e}")))?;
        headers.insert(SIGNATURE_HEADER, signature);

        debug!(url = %self.config.url, bytes = envelope.body.len(), "submitting payout request");
        let response = self
            .transport
            .post(&self.config.url, headers, envelope.body)
            .await?;
        debug!(status = response.status, "gateway answered");
        Ok(response)
    }

    /// Classify, verify and decode a gateway response
    pub fn handle_response(&self, response: &GatewayResponse) -> Result<PayoutOutcome> {
        let action = classify(response.status);
        if action != Action::Accepted {
            warn!(status = response.status, ?action, "gateway returned a non-success status");
        }

        if !self.verify_response_signature(response) {
            return Err(match response.signature() {
                Some(presented) => {
                    warn!("response signature mismatch, discarding body");
                    PayoutError::signature_mismatch(
                        signature::sign(&response.body, &self.config.secret),
                        presented,
                    )
                }
                None => PayoutError::MissingSignature,
            });
        }

        let ack = self.decode(response)?;
        Ok(PayoutOutcome {
            status: response.status,
            action,
            ack,
            retry_after: response.retry_after(),
        })
    }

    /// Recompute the signature over the received body and compare it to the
    /// signature header. Fails closed: a missing header is a failure.
    pub fn verify_response_signature(&self, response: &GatewayResponse) -> bool {
        match response.signature() {
            Some(presented) => signature::verify(&response.body, &self.config.secret, presented),
            None => false,
        }
    }

    /// Decode the response payload. Call only after
    /// [`verify_response_signature`](Self::verify_response_signature)
    /// succeeded.
    pub fn decode(&self, response: &GatewayResponse) -> Result<PayoutAck> {
        serde_json::from_slice(&response.body).map_err(PayoutError::Decode)
    }

    /// Verify and decode an asynchronous callback.
    ///
    /// The gateway signs callbacks the same way it signs synchronous
    /// responses, so this is the same verify-then-decode pair applied to an
    /// inbound body and its `X-Signature` value.
    pub fn handle_callback(&self, body: &[u8], presented: &str) -> Result<PayoutAck> {
        if !signature::verify(body, &self.config.secret, presented) {
            warn!("callback signature mismatch, discarding body");
            return Err(PayoutError::signature_mismatch(
                signature::sign(body, &self.config.secret),
                presented,
            ));
        }
        serde_json::from_slice(body).map_err(PayoutError::Decode)
    }

    /// Get the gateway configuration
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::TransportError;
    use async_trait::async_trait;
    use std::collections::HashMap;

    const SECRET: &str = "1234567890";

    fn client() -> PayoutClient {
        PayoutClient::new(GatewayConfig::new("https://gate.example.com/payout", SECRET)).unwrap()
    }

    fn signed_response(status: u16, body: &str) -> GatewayResponse {
        let mut headers = HashMap::new();
        headers.insert(
            SIGNATURE_HEADER.to_string(),
            signature::sign(body.as_bytes(), SECRET),
        );
        GatewayResponse::new(status, headers, body.as_bytes().to_vec())
    }

    #[test]
    fn test_classification_table() {
        assert_eq!(classify(200), Action::Accepted);
        assert_eq!(classify(400), Action::RejectedInput);
        assert_eq!(classify(500), Action::GatewayInternalError);
        assert_eq!(classify(503), Action::Unavailable);
        assert_eq!(classify(409), Action::Escalate);
        assert_eq!(classify(201), Action::Escalate);
    }

    #[test]
    fn test_retry_policy() {
        assert!(!Action::Accepted.is_retriable());
        assert!(!Action::RejectedInput.is_retriable());
        assert!(Action::GatewayInternalError.is_retriable());
        assert!(Action::Unavailable.is_retriable());
        assert!(!Action::Escalate.is_retriable());
    }

    #[test]
    fn test_handle_response_verifies_and_decodes() {
        let outcome = client()
            .handle_response(&signed_response(200, r#"{"order_id":"42","status":"accepted"}"#))
            .unwrap();
        assert_eq!(outcome.action, Action::Accepted);
        assert_eq!(outcome.ack.order_id.as_deref(), Some("42"));
        assert_eq!(outcome.retry_after, None);
    }

    #[test]
    fn test_error_statuses_still_decode() {
        let outcome = client()
            .handle_response(&signed_response(400, r#"{"status":"invalid_params"}"#))
            .unwrap();
        assert_eq!(outcome.action, Action::RejectedInput);
        assert_eq!(outcome.ack.status.as_deref(), Some("invalid_params"));
    }

    #[test]
    fn test_tampered_body_is_rejected_before_decode() {
        let mut response = signed_response(200, r#"{"status":"accepted"}"#);
        // One changed character; original signature header kept.
        response.body = br#"{"status":"rejected"}"#.to_vec();

        let err = client().handle_response(&response).unwrap_err();
        assert!(matches!(err, PayoutError::SignatureMismatch { .. }));
    }

    #[test]
    fn test_missing_signature_fails_closed() {
        let response =
            GatewayResponse::new(200, HashMap::new(), br#"{"status":"accepted"}"#.to_vec());
        let err = client().handle_response(&response).unwrap_err();
        assert!(matches!(err, PayoutError::MissingSignature));
    }

    #[test]
    fn test_garbage_body_with_valid_signature_is_decode_error() {
        let err = client()
            .handle_response(&signed_response(200, "not json at all"))
            .unwrap_err();
        assert!(matches!(err, PayoutError::Decode(_)));
    }

    #[test]
    fn test_callback_round_trip() {
        let c = client();
        let body = br#"{"order_id":"42","status":"paid"}"#;
        let sig = signature::sign(body, SECRET);

        let ack = c.handle_callback(body, &sig).unwrap();
        assert_eq!(ack.status.as_deref(), Some("paid"));

        let err = c.handle_callback(body, "bm90LXRoZS1zaWduYXR1cmU=").unwrap_err();
        assert!(matches!(err, PayoutError::SignatureMismatch { .. }));
    }

    struct RefusingTransport;

    #[async_trait]
    impl Transport for RefusingTransport {
        async fn post(
            &self,
            _url: &str,
            _headers: HeaderMap,
            _body: Vec<u8>,
        ) -> std::result::Result<GatewayResponse, TransportError> {
            Err(TransportError::Connect("connection refused".to_string()))
        }
    }

    #[tokio::test]
    async fn test_transport_failure_skips_verification() {
        let client = PayoutClient::with_transport(
            GatewayConfig::new("https://gate.example.com/payout", SECRET),
            Arc::new(RefusingTransport),
        )
        .unwrap();

        let request = PayoutRequest::new(
            crate::types::PayoutOrder::new("t-1", 100, "USD"),
            vec![],
            sample_customer(),
        );
        let err = client.submit(&request).await.unwrap_err();
        assert!(matches!(err, PayoutError::Transport(_)));
        assert!(err.is_retriable());
    }

    fn sample_customer() -> crate::types::Customer {
        use chrono::NaiveDate;
        crate::types::Customer::new(
            "79001001010",
            NaiveDate::from_ymd_opt(1950, 1, 1).unwrap(),
            crate::types::Address::new("Red Square, 1", "Moscow", "123456"),
            crate::types::CustomerName::new("Ivan", "Ivanov"),
            crate::types::IdentityDocument::new(
                1,
                "4500111111",
                NaiveDate::from_ymd_opt(2007, 3, 1).unwrap(),
                "MVD",
            ),
        )
    }
}
