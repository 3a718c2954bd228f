use crate::domain::customer::CustomerRecord;
use crate::domain::payment::{PaymentRequest, PaymentResult};
use crate::domain::ports::PaymentProcessor;
use crate::error::Result;
use async_trait::async_trait;
use uuid::Uuid;

pub const OFFLINE_SUCCESS_MESSAGE: &str = "Offline payment successful";

/// Accepts every payment locally without contacting any gateway.
///
/// Has neither the refund nor the recurring capability.
#[derive(Debug, Default, Clone, Copy)]
pub struct OfflineProcessor;

impl OfflineProcessor {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl PaymentProcessor for OfflineProcessor {
    async fn process(
        &self,
        customer: &CustomerRecord,
        payment: &PaymentRequest,
    ) -> Result<PaymentResult> {
        let transaction_id = Uuid::new_v4().to_string();
        tracing::info!(
            customer = %customer.name,
            amount = %payment.amount,
            transaction_id = %transaction_id,
            "offline payment accepted"
        );
        PaymentResult::success(
            payment.amount.value(),
            transaction_id,
            OFFLINE_SUCCESS_MESSAGE,
        )
    }
}
