use crate::config::GatewayConfig;
use crate::domain::gateway::{ChargeRequest, GatewayError, GatewayReceipt};
use crate::domain::ports::PaymentGateway;
use crate::error::{PaymentError, Result};
use async_trait::async_trait;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Deserialize;

/// HTTP client for a Stripe-compatible charges API.
///
/// Amounts are sent in minor units (cents) and currencies in lowercase.
/// Client errors (4xx) are declines; server errors, timeouts and transport
/// failures make the gateway unavailable.
pub struct StripeGateway {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl StripeGateway {
    pub fn new(config: &GatewayConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                PaymentError::UnsupportedConfiguration(format!("cannot build HTTP client: {e}"))
            })?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    async fn post(
        &self,
        path: &str,
        form: &[(&str, String)],
    ) -> std::result::Result<GatewayReceipt, GatewayError> {
        let response = self
            .client
            .post(format!("{}{}", self.base_url, path))
            .bearer_auth(&self.api_key)
            .form(form)
            .send()
            .await
            .map_err(|e| GatewayError::Unavailable(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| GatewayError::Unavailable(e.to_string()))?;
        interpret_response(status, &body)
    }
}

#[derive(Deserialize)]
struct WireReceipt {
    id: String,
    status: String,
    amount: i64,
}

#[derive(Deserialize)]
struct WireErrorBody {
    error: WireError,
}

#[derive(Deserialize)]
struct WireError {
    message: Option<String>,
}

/// Converts a major-unit amount to whole cents, rounding half a cent away
/// from zero. Returns `None` when the result does not fit.
pub fn to_minor_units(amount: Decimal) -> Option<i64> {
    amount
        .checked_mul(Decimal::ONE_HUNDRED)
        .map(|cents| cents.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|cents| cents.to_i64())
}

fn error_message(body: &str) -> Option<String> {
    serde_json::from_str::<WireErrorBody>(body)
        .ok()
        .and_then(|b| b.error.message)
}

/// Maps an HTTP status and body returned by the gateway to a receipt or a
/// classified failure.
pub fn interpret_response(
    status: u16,
    body: &str,
) -> std::result::Result<GatewayReceipt, GatewayError> {
    match status {
        200..=299 => {
            let wire: WireReceipt = serde_json::from_str(body).map_err(|e| {
                GatewayError::Unavailable(format!("malformed gateway response: {e}"))
            })?;
            Ok(GatewayReceipt {
                id: wire.id,
                status: wire.status,
                amount: Decimal::new(wire.amount, 2),
            })
        }
        400..=499 => Err(GatewayError::Declined(error_message(body).unwrap_or_else(
            || format!("gateway rejected the request with status {status}"),
        ))),
        _ => Err(GatewayError::Unavailable(error_message(body).unwrap_or_else(
            || format!("gateway responded with status {status}"),
        ))),
    }
}

#[async_trait]
impl PaymentGateway for StripeGateway {
    async fn create_charge(
        &self,
        request: ChargeRequest,
    ) -> std::result::Result<GatewayReceipt, GatewayError> {
        let amount = to_minor_units(request.amount).ok_or_else(|| {
            GatewayError::Declined(format!("amount {} is out of range", request.amount))
        })?;
        let form = [
            ("amount", amount.to_string()),
            ("currency", request.currency.trim().to_ascii_lowercase()),
            ("source", request.source),
            ("description", request.description),
        ];
        self.post("/v1/charges", &form).await
    }

    async fn create_refund(
        &self,
        charge_id: &str,
    ) -> std::result::Result<GatewayReceipt, GatewayError> {
        self.post("/v1/refunds", &[("charge", charge_id.to_string())])
            .await
    }
}
