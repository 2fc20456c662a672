//! Shared fixtures for the integration tests

#![allow(dead_code)]

use chrono::NaiveDate;
use payout_gate::{
    Address, Card, Customer, CustomerName, IdentityDocument, PaymentInstrument, PayoutOrder,
    PayoutRequest,
};

/// Shared secret used by the documented gateway test environment
pub const SECRET: &str = "1234567890";

/// Signature of the canonical sample request body under [`SECRET`],
/// computed independently of the library
pub const SAMPLE_REQUEST_SIGNATURE: &str =
    "OGQ1MzRlN2E3MDViNGI1Yjg1NzBiNjdlNzI2ZjllMjA1YTlkYjkwNg==";

pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// The documented sample payout request
pub fn sample_request() -> PayoutRequest {
    PayoutRequest::new(
        PayoutOrder::new("test_order_1", 100, "USD").with_comment("test order"),
        vec![PaymentInstrument::Card(Card::new(
            "4000000000000002",
            "Ivanov Ivan",
            "11",
            "2018",
        ))],
        Customer::new(
            "79001001010",
            NaiveDate::from_ymd_opt(1950, 1, 1).unwrap(),
            Address::new("Red Square, 1", "Moscow", "123456"),
            CustomerName::new("Ivan", "Ivanov").with_middle("Ivanovich"),
            IdentityDocument::new(
                1,
                "4500111111",
                NaiveDate::from_ymd_opt(2007, 3, 1).unwrap(),
                "MVD",
            ),
        ),
    )
}
