use crate::error::PaymentError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Represents a positive monetary amount for a payment.
///
/// Construction and deserialization both reject zero and negative values, so
/// a `PaymentRequest` can never carry a non-positive amount.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Amount(Decimal);

impl Amount {
    pub fn new(value: Decimal) -> Result<Self, PaymentError> {
        if value > Decimal::ZERO {
            Ok(Self(value))
        } else {
            Err(PaymentError::ValidationError(
                "Amount must be positive".to_string(),
            ))
        }
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = PaymentError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}

/// How a payment is meant to be settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", rename_all = "lowercase")]
pub enum PaymentType {
    /// Settled outside any gateway; always accepted locally.
    Offline,
    /// Charged through the external payment gateway.
    Gateway,
}

impl FromStr for PaymentType {
    type Err = PaymentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "offline" => Ok(Self::Offline),
            "gateway" | "online" => Ok(Self::Gateway),
            other => Err(PaymentError::UnsupportedConfiguration(format!(
                "unsupported payment type '{other}'"
            ))),
        }
    }
}

impl TryFrom<String> for PaymentType {
    type Error = PaymentError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for PaymentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Offline => f.write_str("offline"),
            Self::Gateway => f.write_str("gateway"),
        }
    }
}

/// The immutable input to a single pipeline invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRequest {
    pub amount: Amount,
    pub currency: String,
    /// Opaque token identifying the funding instrument (e.g. `tok_mastercard`).
    pub source: String,
    #[serde(rename = "type")]
    pub payment_type: PaymentType,
}

impl PaymentRequest {
    pub fn new(
        amount: Amount,
        currency: impl Into<String>,
        source: impl Into<String>,
        payment_type: PaymentType,
    ) -> Self {
        Self {
            amount,
            currency: currency.into(),
            source: source.into(),
            payment_type,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Success,
    Failed,
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => f.write_str("success"),
            Self::Failed => f.write_str("failed"),
        }
    }
}

/// Outcome of a payment, refund or recurring setup.
///
/// Only the two constructors can build one: a `Success` always carries a
/// transaction identifier and a `Failed` never does.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaymentResult {
    status: PaymentStatus,
    amount: Decimal,
    transaction_id: Option<String>,
    message: String,
}

impl PaymentResult {
    /// Builds a successful result. An empty `transaction_id` is rejected
    /// with a validation error.
    pub fn success(
        amount: Decimal,
        transaction_id: impl Into<String>,
        message: impl Into<String>,
    ) -> Result<Self, PaymentError> {
        let transaction_id = transaction_id.into();
        if transaction_id.trim().is_empty() {
            return Err(PaymentError::ValidationError(
                "a successful payment requires a transaction id".to_string(),
            ));
        }
        Ok(Self {
            status: PaymentStatus::Success,
            amount,
            transaction_id: Some(transaction_id),
            message: message.into(),
        })
    }

    pub fn failed(amount: Decimal, message: impl Into<String>) -> Self {
        Self {
            status: PaymentStatus::Failed,
            amount,
            transaction_id: None,
            message: message.into(),
        }
    }

    pub fn status(&self) -> PaymentStatus {
        self.status
    }

    pub fn is_success(&self) -> bool {
        self.status == PaymentStatus::Success
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn transaction_id(&self) -> Option<&str> {
        self.transaction_id.as_deref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_amount_validation() {
        assert!(Amount::new(dec!(1.0)).is_ok());
        assert!(matches!(
            Amount::new(dec!(0.0)),
            Err(PaymentError::ValidationError(_))
        ));
        assert!(matches!(
            Amount::new(dec!(-1.0)),
            Err(PaymentError::ValidationError(_))
        ));
    }

    #[test]
    fn test_amount_deserialization_rejects_non_positive() {
        assert!(serde_json::from_str::<Amount>("\"0\"").is_err());
        let amount: Amount = serde_json::from_str("\"100.50\"").unwrap();
        assert_eq!(amount.value(), dec!(100.50));
    }

    #[test]
    fn test_payment_type_parsing() {
        assert_eq!("offline".parse::<PaymentType>().unwrap(), PaymentType::Offline);
        assert_eq!("Gateway".parse::<PaymentType>().unwrap(), PaymentType::Gateway);
        assert_eq!(" ONLINE ".parse::<PaymentType>().unwrap(), PaymentType::Gateway);
        assert!(matches!(
            "crypto".parse::<PaymentType>(),
            Err(PaymentError::UnsupportedConfiguration(_))
        ));
    }

    #[test]
    fn test_success_requires_transaction_id() {
        let result = PaymentResult::success(dec!(100), "ch_1", "Payment successful").unwrap();
        assert!(result.is_success());
        assert_eq!(result.transaction_id(), Some("ch_1"));

        assert!(matches!(
            PaymentResult::success(dec!(100), "  ", "Payment successful"),
            Err(PaymentError::ValidationError(_))
        ));
    }

    #[test]
    fn test_failed_has_no_transaction_id() {
        let result = PaymentResult::failed(dec!(100), "Your card was declined.");
        assert_eq!(result.status(), PaymentStatus::Failed);
        assert_eq!(result.transaction_id(), None);
        assert_eq!(result.message(), "Your card was declined.");
    }
}
