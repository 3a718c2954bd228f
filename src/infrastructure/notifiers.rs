//! Console notifiers.
//!
//! Neither variant delivers anything: each renders the message it would send
//! and writes it to an output stream (stdout unless told otherwise).

use crate::domain::customer::CustomerRecord;
use crate::domain::payment::PaymentRequest;
use crate::domain::ports::{Notifier, NotifierBox};
use async_trait::async_trait;
use std::io::{self, Write};
use tokio::sync::Mutex;

pub const EMAIL_SENDER: &str = "no-reply@example.com";
pub const EMAIL_SUBJECT: &str = "Payment Confirmation";
pub const DEFAULT_SMS_GATEWAY: &str = "Twilio";

type Outbox = Mutex<Box<dyn Write + Send>>;

async fn deliver(outbox: &Outbox, line: &str) {
    let mut out = outbox.lock().await;
    if let Err(error) = writeln!(out, "{line}").and_then(|_| out.flush()) {
        tracing::warn!(%error, "failed to write notification");
    }
}

fn body(payment: &PaymentRequest, transaction_id: Option<&str>) -> String {
    match transaction_id {
        Some(id) => format!(
            "Thank you for your payment! Amount processed: {} {}. Transaction ID: {}.",
            payment.currency, payment.amount, id
        ),
        None => format!(
            "Your payment of {} {} could not be processed.",
            payment.currency, payment.amount
        ),
    }
}

pub struct EmailNotifier {
    outbox: Outbox,
}

impl EmailNotifier {
    pub fn new() -> Self {
        Self::with_writer(io::stdout())
    }

    pub fn with_writer(writer: impl Write + Send + 'static) -> Self {
        Self {
            outbox: Mutex::new(Box::new(writer)),
        }
    }
}

impl Default for EmailNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Notifier for EmailNotifier {
    async fn notify(
        &self,
        customer: &CustomerRecord,
        payment: &PaymentRequest,
        transaction_id: Option<&str>,
    ) {
        let Some(email) = customer.contact.email_address() else {
            tracing::debug!(customer = %customer.name, "no email address, skipping notification");
            return;
        };
        let line = format!(
            "Email sent to {email} (from {EMAIL_SENDER}, subject \"{EMAIL_SUBJECT}\"): {}",
            body(payment, transaction_id)
        );
        deliver(&self.outbox, &line).await;
    }
}

pub struct SmsNotifier {
    gateway: String,
    outbox: Outbox,
}

impl SmsNotifier {
    pub fn new(gateway: impl Into<String>) -> Self {
        Self::with_writer(gateway, io::stdout())
    }

    pub fn with_writer(gateway: impl Into<String>, writer: impl Write + Send + 'static) -> Self {
        Self {
            gateway: gateway.into(),
            outbox: Mutex::new(Box::new(writer)),
        }
    }

    pub fn gateway(&self) -> &str {
        &self.gateway
    }
}

#[async_trait]
impl Notifier for SmsNotifier {
    async fn notify(
        &self,
        customer: &CustomerRecord,
        payment: &PaymentRequest,
        transaction_id: Option<&str>,
    ) {
        let Some(phone) = customer.contact.phone_number() else {
            tracing::debug!(customer = %customer.name, "no phone number, skipping notification");
            return;
        };
        let line = format!(
            "SMS sent to {phone} via {}: {}",
            self.gateway,
            body(payment, transaction_id)
        );
        deliver(&self.outbox, &line).await;
    }
}

/// Which notifier strategy fits a customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifierKind {
    Email,
    Sms,
}

impl NotifierKind {
    /// Email wins when both channels are present.
    pub fn for_customer(customer: &CustomerRecord) -> Option<Self> {
        if customer.contact.email_address().is_some() {
            Some(Self::Email)
        } else if customer.contact.phone_number().is_some() {
            Some(Self::Sms)
        } else {
            None
        }
    }

    pub fn build(self, sms_gateway: &str, writer: impl Write + Send + 'static) -> NotifierBox {
        match self {
            Self::Email => Box::new(EmailNotifier::with_writer(writer)),
            Self::Sms => Box::new(SmsNotifier::with_writer(sms_gateway, writer)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::customer::ContactInfo;
    use crate::domain::payment::{Amount, PaymentType};
    use rust_decimal_macros::dec;
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<std::sync::Mutex<Vec<u8>>>);

    impl SharedBuffer {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().write(buf)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn payment() -> PaymentRequest {
        PaymentRequest::new(
            Amount::new(dec!(100)).unwrap(),
            "USD",
            "tok_mastercard",
            PaymentType::Gateway,
        )
    }

    #[tokio::test]
    async fn test_email_notification() {
        let buffer = SharedBuffer::default();
        let notifier = EmailNotifier::with_writer(buffer.clone());
        let customer = CustomerRecord::new("John Doe", ContactInfo::email("j@x.com"));

        notifier.notify(&customer, &payment(), Some("ch_1")).await;

        let out = buffer.contents();
        assert!(out.starts_with("Email sent to j@x.com"));
        assert!(out.contains(EMAIL_SUBJECT));
        assert!(out.contains("USD 100"));
        assert!(out.contains("Transaction ID: ch_1"));
    }

    #[tokio::test]
    async fn test_sms_notification_for_failed_payment() {
        let buffer = SharedBuffer::default();
        let notifier = SmsNotifier::with_writer("Twilio", buffer.clone());
        let customer = CustomerRecord::new("John Doe", ContactInfo::phone("+1234567890"));

        notifier.notify(&customer, &payment(), None).await;

        let out = buffer.contents();
        assert!(out.starts_with("SMS sent to +1234567890 via Twilio"));
        assert!(out.contains("could not be processed"));
    }

    #[tokio::test]
    async fn test_missing_channel_is_a_no_op() {
        let buffer = SharedBuffer::default();
        let email = EmailNotifier::with_writer(buffer.clone());
        let sms = SmsNotifier::with_writer("Twilio", buffer.clone());

        let phone_only = CustomerRecord::new("John Doe", ContactInfo::phone("+1234567890"));
        let email_only = CustomerRecord::new("John Doe", ContactInfo::email("j@x.com"));
        email.notify(&phone_only, &payment(), Some("ch_1")).await;
        sms.notify(&email_only, &payment(), Some("ch_1")).await;

        assert!(buffer.contents().is_empty());
    }

    #[test]
    fn test_notifier_selection_prefers_email() {
        let both = CustomerRecord::new("A", ContactInfo::email("a@x.com").with_phone("+1"));
        let phone = CustomerRecord::new("A", ContactInfo::phone("+1"));
        let none = CustomerRecord::new("A", ContactInfo::default());

        assert_eq!(NotifierKind::for_customer(&both), Some(NotifierKind::Email));
        assert_eq!(NotifierKind::for_customer(&phone), Some(NotifierKind::Sms));
        assert_eq!(NotifierKind::for_customer(&none), None);
    }
}
