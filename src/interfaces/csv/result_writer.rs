use crate::domain::customer::CustomerRecord;
use crate::domain::payment::{PaymentResult, PaymentStatus};
use rust_decimal::Decimal;
use serde::Serialize;
use std::io::{self, Write};

#[derive(Serialize)]
struct ResultRow<'a> {
    name: &'a str,
    status: PaymentStatus,
    amount: Decimal,
    transaction_id: Option<&'a str>,
    message: &'a str,
}

/// Writes one CSV row per processed payment.
pub struct ResultWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> ResultWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    pub fn write_result(&mut self, customer: &CustomerRecord, result: &PaymentResult) -> io::Result<()> {
        self.writer.serialize(ResultRow {
            name: &customer.name,
            status: result.status(),
            amount: result.amount().normalize(),
            transaction_id: result.transaction_id(),
            message: result.message(),
        })?;
        self.writer.flush()
    }
}
