//! Shapes exchanged with the external payment gateway.

use rust_decimal::Decimal;
use thiserror::Error;

/// Status string the gateway reports for a settled charge or refund.
pub const STATUS_SUCCEEDED: &str = "succeeded";

#[derive(Debug, Clone, PartialEq)]
pub struct ChargeRequest {
    pub amount: Decimal,
    pub currency: String,
    pub source: String,
    pub description: String,
}

/// A charge or refund as acknowledged by the gateway.
#[derive(Debug, Clone, PartialEq)]
pub struct GatewayReceipt {
    pub id: String,
    pub status: String,
    pub amount: Decimal,
}

impl GatewayReceipt {
    pub fn succeeded(&self) -> bool {
        self.status == STATUS_SUCCEEDED
    }
}

/// Failure kinds a gateway call can end with.
///
/// `Declined` is an expected business outcome and is turned into a failed
/// `PaymentResult`. `Unavailable` means the gateway could not be reached or
/// answered with a server error, and propagates to the caller.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GatewayError {
    #[error("{0}")]
    Declined(String),
    #[error("{0}")]
    Unavailable(String),
}
