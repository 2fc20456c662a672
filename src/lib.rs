//! # payout-gate - signed payout gateway client
//!
//! A client core for a payout gateway that authenticates every exchange
//! with a shared-secret signature: the payout request is canonically
//! serialized, signed, POSTed over HTTPS, and the response (or a later
//! asynchronous callback) is verified against the same scheme before its
//! payload is trusted.

pub mod client;
pub mod config;
pub mod error;
pub mod signature;
pub mod transport;
pub mod types;

// Re-exports for convenience
pub use client::{classify, Action, PayoutClient, PayoutOutcome};
pub use config::GatewayConfig;
pub use error::{PayoutError, Result};
pub use signature::SIGNATURE_HEADER;
pub use transport::{HttpTransport, Transport, TransportError};
pub use types::*;

/// Current version of the payout-gate library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
