use super::factory::ProcessorFactory;
use crate::domain::customer::CustomerRecord;
use crate::domain::payment::{PaymentRequest, PaymentResult};
use crate::domain::ports::{NotifierBox, PaymentProcessorBox, TransactionLogBox};
use crate::domain::validation::{validate_customer, validate_payment};
use crate::error::{PaymentError, Result};

/// The request-processing pipeline.
///
/// `PaymentService` validates the customer and payment, dispatches to its
/// processor, notifies the customer and appends to the transaction log, in
/// that order. Each call is independent; the only state it keeps is its
/// configured collaborators, of which just the notifier can be swapped.
pub struct PaymentService {
    processor: PaymentProcessorBox,
    notifier: NotifierBox,
    logger: TransactionLogBox,
}

impl PaymentService {
    /// Creates a new `PaymentService` instance.
    ///
    /// # Arguments
    ///
    /// * `processor` - Executes the payments.
    /// * `notifier` - Tells the customer about each outcome.
    /// * `logger` - Durable record of every processed transaction.
    pub fn new(
        processor: PaymentProcessorBox,
        notifier: NotifierBox,
        logger: TransactionLogBox,
    ) -> Self {
        Self {
            processor,
            notifier,
            logger,
        }
    }

    /// Builds a service whose processor is chosen by `factory` for `payment`.
    pub fn for_payment(
        factory: &ProcessorFactory,
        payment: &PaymentRequest,
        notifier: NotifierBox,
        logger: TransactionLogBox,
    ) -> Result<Self> {
        let processor = factory.create(payment)?;
        Ok(Self::new(processor, notifier, logger))
    }

    /// Replaces the notification strategy used by subsequent calls.
    pub fn set_notifier(&mut self, notifier: NotifierBox) {
        tracing::info!("notifier strategy replaced");
        self.notifier = notifier;
    }

    /// Runs one pipeline invocation.
    ///
    /// Validation failures abort before anything else happens. A declined
    /// payment is still notified and logged and comes back as a failed
    /// result; an unreachable gateway or a log write failure is an error.
    pub async fn process_transaction(
        &self,
        customer: &CustomerRecord,
        payment: &PaymentRequest,
    ) -> Result<PaymentResult> {
        validate_customer(customer)?;
        validate_payment(payment)?;

        let result = self.processor.process(customer, payment).await?;
        tracing::info!(
            customer = %customer.name,
            status = %result.status(),
            transaction_id = result.transaction_id().unwrap_or("-"),
            "payment dispatched"
        );

        self.notifier
            .notify(customer, payment, result.transaction_id())
            .await;
        self.logger.log(customer, payment, &result).await?;

        Ok(result)
    }

    /// Refunds a previous charge through the processor's refund capability.
    pub async fn refund_transaction(&self, transaction_id: &str) -> Result<PaymentResult> {
        let refunds = self.processor.refunds().ok_or_else(|| {
            PaymentError::CapabilityUnsupported(
                "refunds are not supported by the current payment processor".to_string(),
            )
        })?;
        refunds.refund(transaction_id).await
    }

    /// Sets up a recurring payment through the processor's recurring capability.
    pub async fn create_recurring_payment(
        &self,
        customer: &CustomerRecord,
        payment: &PaymentRequest,
    ) -> Result<PaymentResult> {
        let recurring = self.processor.recurring().ok_or_else(|| {
            PaymentError::CapabilityUnsupported(
                "recurring payments are not supported by the current payment processor"
                    .to_string(),
            )
        })?;
        validate_customer(customer)?;
        validate_payment(payment)?;
        recurring.create_recurring(customer, payment).await
    }
}
