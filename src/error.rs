//! Error types for the payout gateway client

use thiserror::Error;

/// Result type alias for payout gateway operations
pub type Result<T> = std::result::Result<T, PayoutError>;

/// Main error type for payout gateway operations
///
/// Status-level rejections (400, 500, 503, ...) are not errors: the gateway
/// answers them with a signed JSON body, so they surface as an
/// [`Action`](crate::client::Action) inside a successful exchange. Only
/// failures that leave the caller without a trustworthy response live here.
#[derive(Error, Debug)]
pub enum PayoutError {
    /// Network-level failure before a gateway response existed
    #[error("transport error: {0}")]
    Transport(#[from] crate::transport::TransportError),

    /// Response signature did not match the recomputed value.
    /// The body is untrusted and must not be acted upon.
    #[error("signature mismatch: expected {expected}, got {presented}")]
    SignatureMismatch {
        /// Signature recomputed over the received body
        expected: String,
        /// Signature the gateway presented
        presented: String,
    },

    /// Response carried no signature header at all
    #[error("response is missing the X-Signature header")]
    MissingSignature,

    /// Request body serialization failure
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Response body failed to parse after its signature was verified;
    /// indicates drift from the documented gateway contract
    #[error("decode error: {0}")]
    Decode(#[source] serde_json::Error),

    /// Configuration error
    #[error("configuration error: {message}")]
    Config { message: String },
}

impl PayoutError {
    /// Create a signature mismatch error
    pub fn signature_mismatch(
        expected: impl Into<String>,
        presented: impl Into<String>,
    ) -> Self {
        Self::SignatureMismatch {
            expected: expected.into(),
            presented: presented.into(),
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Whether the caller may retry the same payload.
    ///
    /// Only transport failures qualify; a signature mismatch or decode
    /// failure will not heal on its own.
    pub fn is_retriable(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}
