//! Presence checks run before any payment is dispatched.
//!
//! Both validators are pure: they inspect the record and either return
//! `Ok(())` or a `PaymentError::ValidationError`, with no other side effects.

use super::customer::CustomerRecord;
use super::payment::PaymentRequest;
use crate::error::{PaymentError, Result};

/// Requires a non-blank name and at least one reachable contact channel.
pub fn validate_customer(customer: &CustomerRecord) -> Result<()> {
    if customer.name.trim().is_empty() {
        return Err(PaymentError::ValidationError(
            "Invalid customer data: missing name".to_string(),
        ));
    }
    if customer.contact.email_address().is_none() && customer.contact.phone_number().is_none() {
        return Err(PaymentError::ValidationError(
            "Invalid customer data: missing email or phone".to_string(),
        ));
    }
    Ok(())
}

/// Requires a non-blank source token. Amount positivity is already
/// guaranteed by `Amount`.
pub fn validate_payment(payment: &PaymentRequest) -> Result<()> {
    if payment.source.trim().is_empty() {
        return Err(PaymentError::ValidationError(
            "Invalid payment data: missing source".to_string(),
        ));
    }
    Ok(())
}
