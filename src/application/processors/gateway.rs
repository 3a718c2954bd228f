use crate::domain::customer::CustomerRecord;
use crate::domain::gateway::{ChargeRequest, GatewayError, GatewayReceipt};
use crate::domain::payment::{PaymentRequest, PaymentResult};
use crate::domain::ports::{
    PaymentProcessor, RecurringPaymentProcessor, RefundProcessor, SharedGateway,
};
use crate::error::{PaymentError, Result};
use async_trait::async_trait;
use rust_decimal::Decimal;
use uuid::Uuid;

pub const PAYMENT_SUCCESS_MESSAGE: &str = "Payment successful";
pub const REFUND_SUCCESS_MESSAGE: &str = "Refund successful";

/// Charges through the external payment gateway.
///
/// Also exposes the refund and recurring-payment capabilities.
#[derive(Clone)]
pub struct GatewayProcessor {
    gateway: SharedGateway,
}

impl GatewayProcessor {
    pub fn new(gateway: SharedGateway) -> Self {
        Self { gateway }
    }
}

/// Maps a gateway acknowledgment into a result. Anything other than a
/// `succeeded` receipt with an id is reported as failed.
fn settle(receipt: GatewayReceipt, fallback_amount: Decimal, message: &str) -> Result<PaymentResult> {
    if !receipt.succeeded() {
        return Ok(PaymentResult::failed(
            fallback_amount,
            format!("gateway reported status '{}'", receipt.status),
        ));
    }
    if receipt.id.trim().is_empty() {
        return Ok(PaymentResult::failed(
            fallback_amount,
            "gateway returned no transaction id",
        ));
    }
    PaymentResult::success(receipt.amount, receipt.id, message)
}

fn decline_or_raise(error: GatewayError, amount: Decimal) -> Result<PaymentResult> {
    match error {
        GatewayError::Declined(message) => {
            tracing::warn!(%message, "gateway declined request");
            Ok(PaymentResult::failed(amount, message))
        }
        GatewayError::Unavailable(message) => Err(PaymentError::GatewayUnavailable(message)),
    }
}

#[async_trait]
impl PaymentProcessor for GatewayProcessor {
    async fn process(
        &self,
        customer: &CustomerRecord,
        payment: &PaymentRequest,
    ) -> Result<PaymentResult> {
        let amount = payment.amount.value();
        let request = ChargeRequest {
            amount,
            currency: payment.currency.clone(),
            source: payment.source.clone(),
            description: format!("Charge for {}", customer.name),
        };

        match self.gateway.create_charge(request).await {
            Ok(receipt) => {
                tracing::info!(
                    customer = %customer.name,
                    charge_id = %receipt.id,
                    status = %receipt.status,
                    "gateway charge completed"
                );
                settle(receipt, amount, PAYMENT_SUCCESS_MESSAGE)
            }
            Err(error) => decline_or_raise(error, amount),
        }
    }

    fn refunds(&self) -> Option<&dyn RefundProcessor> {
        Some(self)
    }

    fn recurring(&self) -> Option<&dyn RecurringPaymentProcessor> {
        Some(self)
    }
}

#[async_trait]
impl RefundProcessor for GatewayProcessor {
    async fn refund(&self, transaction_id: &str) -> Result<PaymentResult> {
        match self.gateway.create_refund(transaction_id).await {
            Ok(receipt) => {
                tracing::info!(%transaction_id, refund_id = %receipt.id, "gateway refund completed");
                settle(receipt, Decimal::ZERO, REFUND_SUCCESS_MESSAGE)
            }
            Err(error) => decline_or_raise(error, Decimal::ZERO),
        }
    }
}

#[async_trait]
impl RecurringPaymentProcessor for GatewayProcessor {
    // Acknowledgment only: no schedule is registered with the gateway.
    async fn create_recurring(
        &self,
        customer: &CustomerRecord,
        payment: &PaymentRequest,
    ) -> Result<PaymentResult> {
        let subscription_id = format!("sub_{}", Uuid::new_v4().simple());
        tracing::info!(customer = %customer.name, %subscription_id, "recurring payment acknowledged");
        PaymentResult::success(
            payment.amount.value(),
            subscription_id,
            format!("Recurring payment created for {}", customer.name),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::customer::ContactInfo;
    use crate::domain::payment::{Amount, PaymentStatus, PaymentType};
    use crate::domain::ports::PaymentGateway;
    use crate::infrastructure::in_memory::InMemoryGateway;
    use rust_decimal_macros::dec;
    use std::sync::Arc;

    fn customer() -> CustomerRecord {
        CustomerRecord::new("John Doe", ContactInfo::email("j@x.com"))
    }

    fn payment() -> PaymentRequest {
        PaymentRequest::new(
            Amount::new(dec!(100)).unwrap(),
            "USD",
            "tok_mastercard",
            PaymentType::Gateway,
        )
    }

    /// Acknowledges every call with a fixed receipt.
    struct FixedReceiptGateway(GatewayReceipt);

    #[async_trait]
    impl PaymentGateway for FixedReceiptGateway {
        async fn create_charge(
            &self,
            _request: ChargeRequest,
        ) -> std::result::Result<GatewayReceipt, GatewayError> {
            Ok(self.0.clone())
        }

        async fn create_refund(
            &self,
            _charge_id: &str,
        ) -> std::result::Result<GatewayReceipt, GatewayError> {
            Ok(self.0.clone())
        }
    }

    #[tokio::test]
    async fn test_gateway_success_maps_charge_id() {
        let gateway = InMemoryGateway::new();
        let processor = GatewayProcessor::new(Arc::new(gateway.clone()));

        let result = processor.process(&customer(), &payment()).await.unwrap();
        assert_eq!(result.status(), PaymentStatus::Success);
        assert_eq!(result.transaction_id(), Some("ch_1"));
        assert_eq!(result.amount(), dec!(100));
        assert_eq!(result.message(), PAYMENT_SUCCESS_MESSAGE);

        let charges = gateway.charges().await;
        assert_eq!(charges.len(), 1);
        assert_eq!(charges[0].source, "tok_mastercard");
        assert_eq!(charges[0].currency, "USD");
        assert_eq!(charges[0].description, "Charge for John Doe");
    }

    #[tokio::test]
    async fn test_gateway_decline_becomes_failed_result() {
        let processor = GatewayProcessor::new(Arc::new(InMemoryGateway::declining(
            "Your card was declined.",
        )));

        let result = processor.process(&customer(), &payment()).await.unwrap();
        assert_eq!(result.status(), PaymentStatus::Failed);
        assert_eq!(result.transaction_id(), None);
        assert_eq!(result.message(), "Your card was declined.");
        assert_eq!(result.amount(), dec!(100));
    }

    #[tokio::test]
    async fn test_gateway_unreachable_propagates() {
        let processor = GatewayProcessor::new(Arc::new(InMemoryGateway::unreachable(
            "connection refused",
        )));

        let result = processor.process(&customer(), &payment()).await;
        assert!(matches!(result, Err(PaymentError::GatewayUnavailable(msg)) if msg == "connection refused"));
    }

    #[tokio::test]
    async fn test_non_succeeded_status_is_failed() {
        let processor = GatewayProcessor::new(Arc::new(FixedReceiptGateway(GatewayReceipt {
            id: "ch_pending".to_string(),
            status: "pending".to_string(),
            amount: dec!(100),
        })));

        let result = processor.process(&customer(), &payment()).await.unwrap();
        assert_eq!(result.status(), PaymentStatus::Failed);
        assert_eq!(result.transaction_id(), None);
        assert_eq!(result.message(), "gateway reported status 'pending'");
    }

    #[tokio::test]
    async fn test_empty_charge_id_is_failed() {
        let processor = GatewayProcessor::new(Arc::new(FixedReceiptGateway(GatewayReceipt {
            id: String::new(),
            status: "succeeded".to_string(),
            amount: dec!(100),
        })));

        let result = processor.process(&customer(), &payment()).await.unwrap();
        assert_eq!(result.status(), PaymentStatus::Failed);
        assert_eq!(result.transaction_id(), None);
    }

    #[tokio::test]
    async fn test_refund_known_and_unknown_charge() {
        let processor = GatewayProcessor::new(Arc::new(InMemoryGateway::new()));
        let charge = processor.process(&customer(), &payment()).await.unwrap();
        let refunds = processor.refunds().unwrap();

        let refund = refunds.refund(charge.transaction_id().unwrap()).await.unwrap();
        assert!(refund.is_success());
        assert_eq!(refund.transaction_id(), Some("re_1"));
        assert_eq!(refund.amount(), dec!(100));
        assert_eq!(refund.message(), REFUND_SUCCESS_MESSAGE);

        let missing = refunds.refund("ch_404").await.unwrap();
        assert_eq!(missing.status(), PaymentStatus::Failed);
        assert_eq!(missing.amount(), Decimal::ZERO);
        assert!(missing.message().contains("ch_404"));
    }

    #[tokio::test]
    async fn test_recurring_acknowledgment() {
        let gateway = InMemoryGateway::new();
        let processor = GatewayProcessor::new(Arc::new(gateway.clone()));

        let result = processor
            .recurring()
            .unwrap()
            .create_recurring(&customer(), &payment())
            .await
            .unwrap();
        assert!(result.is_success());
        assert!(result.transaction_id().unwrap().starts_with("sub_"));
        assert_eq!(result.message(), "Recurring payment created for John Doe");
        assert!(gateway.charges().await.is_empty());
    }
}
