use super::customer::CustomerRecord;
use super::gateway::{ChargeRequest, GatewayError, GatewayReceipt};
use super::payment::{PaymentRequest, PaymentResult};
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Executes payments. Every processor variant implements this.
///
/// Gateway declines come back as a failed `PaymentResult`; only
/// infrastructure failures are returned as `Err`.
#[async_trait]
pub trait PaymentProcessor: Send + Sync {
    async fn process(
        &self,
        customer: &CustomerRecord,
        payment: &PaymentRequest,
    ) -> Result<PaymentResult>;

    /// The refund capability, if this processor has one.
    fn refunds(&self) -> Option<&dyn RefundProcessor> {
        None
    }

    /// The recurring-payment capability, if this processor has one.
    fn recurring(&self) -> Option<&dyn RecurringPaymentProcessor> {
        None
    }
}

#[async_trait]
pub trait RefundProcessor: Send + Sync {
    async fn refund(&self, transaction_id: &str) -> Result<PaymentResult>;
}

#[async_trait]
pub trait RecurringPaymentProcessor: Send + Sync {
    async fn create_recurring(
        &self,
        customer: &CustomerRecord,
        payment: &PaymentRequest,
    ) -> Result<PaymentResult>;
}

/// Tells the customer about the outcome of a payment. Never fails.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(
        &self,
        customer: &CustomerRecord,
        payment: &PaymentRequest,
        transaction_id: Option<&str>,
    );
}

/// Append-only record of every completed pipeline invocation.
#[async_trait]
pub trait TransactionLog: Send + Sync {
    async fn log(
        &self,
        customer: &CustomerRecord,
        payment: &PaymentRequest,
        result: &PaymentResult,
    ) -> Result<()>;
}

/// Client side of the external payment gateway.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn create_charge(
        &self,
        request: ChargeRequest,
    ) -> std::result::Result<GatewayReceipt, GatewayError>;

    async fn create_refund(
        &self,
        charge_id: &str,
    ) -> std::result::Result<GatewayReceipt, GatewayError>;
}

pub type PaymentProcessorBox = Box<dyn PaymentProcessor>;
pub type NotifierBox = Box<dyn Notifier>;
pub type TransactionLogBox = Box<dyn TransactionLog>;
pub type SharedGateway = Arc<dyn PaymentGateway>;

#[async_trait]
impl<T: TransactionLog + ?Sized> TransactionLog for Arc<T> {
    async fn log(
        &self,
        customer: &CustomerRecord,
        payment: &PaymentRequest,
        result: &PaymentResult,
    ) -> Result<()> {
        (**self).log(customer, payment, result).await
    }
}
