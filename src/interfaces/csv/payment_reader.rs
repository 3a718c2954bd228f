use crate::domain::customer::{ContactInfo, CustomerRecord};
use crate::domain::payment::{Amount, PaymentRequest, PaymentType};
use crate::error::{PaymentError, Result};
use serde::Deserialize;
use std::io::Read;

/// One input line: a customer and the payment they are making.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct PaymentRow {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub amount: Amount,
    pub currency: String,
    pub source: String,
    #[serde(rename = "type")]
    pub payment_type: PaymentType,
}

impl PaymentRow {
    pub fn into_records(self) -> (CustomerRecord, PaymentRequest) {
        let customer = CustomerRecord::new(
            self.name,
            ContactInfo {
                email: self.email,
                phone: self.phone,
            },
        );
        let payment = PaymentRequest::new(
            self.amount,
            self.currency,
            self.source,
            self.payment_type,
        );
        (customer, payment)
    }
}

/// Reads payment rows from a CSV source.
///
/// This reader wraps `csv::Reader` and provides an iterator over `Result<PaymentRow>`.
/// It handles whitespace trimming and flexible record lengths automatically.
pub struct PaymentReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> PaymentReader<R> {
    /// Creates a new `PaymentReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Returns an iterator that lazily reads and deserializes rows, so large
    /// batches are streamed rather than loaded up front.
    pub fn payments(self) -> impl Iterator<Item = Result<PaymentRow>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(PaymentError::from))
    }
}
