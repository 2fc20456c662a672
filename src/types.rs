//! Core types for the payout gateway exchange

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;
use uuid::Uuid;

/// A payout order as the merchant submits it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayoutOrder {
    /// Merchant-assigned identifier, unique per payout attempt
    pub external_id: String,
    /// Amount in minor currency units (cents, kopecks)
    pub amount: u64,
    /// ISO 4217 currency code
    pub currency: String,
    /// Free-form comment passed through to the gateway
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl PayoutOrder {
    /// Create a new payout order
    pub fn new(external_id: impl Into<String>, amount: u64, currency: impl Into<String>) -> Self {
        Self {
            external_id: external_id.into(),
            amount,
            currency: currency.into(),
            comment: None,
        }
    }

    /// Create an order with a random UUID v4 external id, for callers that
    /// do not track their own attempt identifiers
    pub fn with_generated_id(amount: u64, currency: impl Into<String>) -> Self {
        Self::new(Uuid::new_v4().to_string(), amount, currency)
    }

    /// Attach a comment
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Amount in major units, e.g. 100 minor units of a two-decimal
    /// currency is 1.00
    pub fn amount_in_major_units(&self, decimals: u8) -> Decimal {
        let divisor = Decimal::from(10u64.pow(decimals as u32));
        Decimal::from(self.amount) / divisor
    }
}

/// Card details for a payout destination.
///
/// Fields are passed through as strings; format validation is the
/// gateway's responsibility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    /// Primary account number
    pub number: String,
    /// Cardholder name as printed
    pub holder: String,
    pub expiry_month: String,
    pub expiry_year: String,
}

impl Card {
    /// Create new card details
    pub fn new(
        number: impl Into<String>,
        holder: impl Into<String>,
        expiry_month: impl Into<String>,
        expiry_year: impl Into<String>,
    ) -> Self {
        Self {
            number: number.into(),
            holder: holder.into(),
            expiry_month: expiry_month.into(),
            expiry_year: expiry_year.into(),
        }
    }
}

/// Destination instrument for a payout, serialized with the instrument
/// kind as the wrapping key (`{"card": {...}}`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentInstrument {
    Card(Card),
}

/// Customer postal address
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Address {
    /// Street address line
    pub address: String,
    pub city: String,
    /// Postal index
    pub index: String,
}

impl Address {
    pub fn new(
        address: impl Into<String>,
        city: impl Into<String>,
        index: impl Into<String>,
    ) -> Self {
        Self {
            address: address.into(),
            city: city.into(),
            index: index.into(),
        }
    }
}

/// Customer name split the way the gateway expects it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerName {
    pub first: String,
    pub last: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub middle: Option<String>,
}

impl CustomerName {
    pub fn new(first: impl Into<String>, last: impl Into<String>) -> Self {
        Self {
            first: first.into(),
            last: last.into(),
            middle: None,
        }
    }

    pub fn with_middle(mut self, middle: impl Into<String>) -> Self {
        self.middle = Some(middle.into());
        self
    }
}

/// Identity document on file for the customer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdentityDocument {
    /// Gateway-defined document type code
    #[serde(rename = "type")]
    pub doc_type: u32,
    /// Document number
    pub id: String,
    pub issue_date: NaiveDate,
    /// Issuing authority
    pub issued_by: String,
}

impl IdentityDocument {
    pub fn new(
        doc_type: u32,
        id: impl Into<String>,
        issue_date: NaiveDate,
        issued_by: impl Into<String>,
    ) -> Self {
        Self {
            doc_type,
            id: id.into(),
            issue_date,
            issued_by: issued_by.into(),
        }
    }
}

/// Recipient of the payout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub phone: String,
    pub birthdate: NaiveDate,
    pub address: Address,
    pub name: CustomerName,
    pub document: IdentityDocument,
}

impl Customer {
    pub fn new(
        phone: impl Into<String>,
        birthdate: NaiveDate,
        address: Address,
        name: CustomerName,
        document: IdentityDocument,
    ) -> Self {
        Self {
            phone: phone.into(),
            birthdate,
            address,
            name,
            document,
        }
    }
}

/// Aggregate payout request, immutable once constructed.
///
/// Serialization is deterministic: keys appear in declaration order and
/// the encoding is compact, so the same logical value always produces
/// identical bytes and a reproducible signature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayoutRequest {
    pub order: PayoutOrder,
    pub payment_instruments: Vec<PaymentInstrument>,
    pub customer: Customer,
}

impl PayoutRequest {
    /// Assemble a payout request. Pure construction: no network I/O and no
    /// validation beyond field presence.
    pub fn new(
        order: PayoutOrder,
        payment_instruments: Vec<PaymentInstrument>,
        customer: Customer,
    ) -> Self {
        Self {
            order,
            payment_instruments,
            customer,
        }
    }

    /// The exact byte sequence that is signed and transmitted
    pub fn canonical_bytes(&self) -> crate::Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }
}

/// A serialized request body together with its signature, alive only for
/// the duration of one exchange
#[derive(Debug, Clone)]
pub struct SignedEnvelope {
    /// Literal payload bytes that go on the wire
    pub body: Vec<u8>,
    /// Signature computed over `body` and the shared secret
    pub signature: String,
}

impl SignedEnvelope {
    /// Serialize and sign a request with the given secret
    pub fn seal(request: &PayoutRequest, secret: &str) -> crate::Result<Self> {
        let body = request.canonical_bytes()?;
        let signature = crate::signature::sign(&body, secret);
        Ok(Self { body, signature })
    }
}

/// Raw gateway response, created per call and discarded once classified
/// and decoded
#[derive(Debug, Clone)]
pub struct GatewayResponse {
    /// HTTP status code
    pub status: u16,
    /// Response headers, names lowercased
    pub headers: HashMap<String, String>,
    /// Literal response body bytes
    pub body: Vec<u8>,
}

impl GatewayResponse {
    /// Create a response, normalizing header names to lowercase
    pub fn new(status: u16, headers: HashMap<String, String>, body: Vec<u8>) -> Self {
        let headers = headers
            .into_iter()
            .map(|(name, value)| (name.to_ascii_lowercase(), value))
            .collect();
        Self {
            status,
            headers,
            body,
        }
    }

    /// Look up a header by name, case-insensitively
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Value of the signature header, if present
    pub fn signature(&self) -> Option<&str> {
        self.header(crate::signature::SIGNATURE_HEADER)
    }

    /// Server-suggested delay before retrying, from a delay-seconds
    /// `Retry-After` header
    pub fn retry_after(&self) -> Option<Duration> {
        self.header("retry-after")
            .and_then(|value| value.trim().parse::<u64>().ok())
            .map(Duration::from_secs)
    }
}

/// Decoded response payload.
///
/// The schema is opaque beyond the signed envelope; the fields the gateway
/// commonly returns are surfaced and everything else is kept in `extra`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayoutAck {
    /// Gateway-side order identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
    /// Gateway-reported order status
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Remaining payload fields
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}
