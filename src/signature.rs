//! Shared-secret signing for payout gateway traffic
//!
//! Requests, synchronous responses and asynchronous callbacks all carry the
//! same signature in the `X-Signature` header: the SHA-1 digest of the
//! payload bytes concatenated with the secret, rendered as its 40-character
//! lowercase hex form, then base64-encoded. The digest covers the literal
//! transmitted bytes, so re-encoding the JSON invalidates the signature.

use base64::{engine::general_purpose, Engine as _};
use sha1::{Digest, Sha1};

/// Header carrying the signature on both requests and responses
pub const SIGNATURE_HEADER: &str = "X-Signature";

/// Compute the signature for a payload
pub fn sign(body: &[u8], secret: &str) -> String {
    let mut hasher = Sha1::new();
    hasher.update(body);
    hasher.update(secret.as_bytes());
    let digest = hex::encode(hasher.finalize());
    general_purpose::STANDARD.encode(digest.as_bytes())
}

/// Check a presented signature against the recomputed value
pub fn verify(body: &[u8], secret: &str, presented: &str) -> bool {
    sign(body, secret) == presented
}
