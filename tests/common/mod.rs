#![allow(dead_code)]

use async_trait::async_trait;
use payment_service::domain::customer::{ContactInfo, CustomerRecord};
use payment_service::domain::payment::{Amount, PaymentRequest, PaymentType};
use payment_service::domain::ports::Notifier;
use rust_decimal::Decimal;
use std::io::{Error, Write};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A notification captured by `RecordingNotifier`.
#[derive(Debug, Clone, PartialEq)]
pub struct Sent {
    pub customer: String,
    pub transaction_id: Option<String>,
}

#[derive(Clone, Default)]
pub struct RecordingNotifier {
    sent: Arc<RwLock<Vec<Sent>>>,
}

impl RecordingNotifier {
    pub async fn sent(&self) -> Vec<Sent> {
        self.sent.read().await.clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(
        &self,
        customer: &CustomerRecord,
        _payment: &PaymentRequest,
        transaction_id: Option<&str>,
    ) {
        self.sent.write().await.push(Sent {
            customer: customer.name.clone(),
            transaction_id: transaction_id.map(str::to_string),
        });
    }
}

pub fn john_doe() -> CustomerRecord {
    CustomerRecord::new("John Doe", ContactInfo::email("j@x.com"))
}

pub fn payment(amount: Decimal, payment_type: PaymentType) -> PaymentRequest {
    PaymentRequest::new(
        Amount::new(amount).unwrap(),
        "USD",
        "tok_mastercard",
        payment_type,
    )
}

pub const CSV_HEADER: &str = "name,email,phone,amount,currency,source,type";

/// Writes a payments CSV with the given data rows.
pub fn write_payments_csv(path: &Path, rows: &[&str]) -> Result<(), Error> {
    let mut file = std::fs::File::create(path)?;
    writeln!(file, "{CSV_HEADER}")?;
    for row in rows {
        writeln!(file, "{row}")?;
    }
    file.flush()
}
