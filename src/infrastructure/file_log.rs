use crate::domain::customer::CustomerRecord;
use crate::domain::payment::{PaymentRequest, PaymentResult};
use crate::domain::ports::TransactionLog;
use crate::error::Result;
use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use std::path::Path;
use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

pub const DEFAULT_LOG_PATH: &str = "transactions.log";

/// Appends one human-readable line per transaction to a text file.
///
/// The file is opened in append mode and never truncated. Each record is
/// written with a single call and flushed before `log` returns. Separate
/// processes appending to the same file may still interleave.
pub struct FileTransactionLog {
    file: Mutex<File>,
}

impl FileTransactionLog {
    /// Opens or creates the log file at `path`.
    pub async fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .await?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }
}

/// Renders the line written for a single transaction, newline included.
pub fn format_record(
    customer: &CustomerRecord,
    payment: &PaymentRequest,
    result: &PaymentResult,
) -> String {
    format!(
        "{} | {} paid {} {} | status={} | transaction_id={} | {}\n",
        Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        customer.name,
        payment.amount,
        payment.currency.to_ascii_uppercase(),
        result.status(),
        result.transaction_id().unwrap_or("-"),
        result.message().replace('\n', " "),
    )
}

#[async_trait]
impl TransactionLog for FileTransactionLog {
    async fn log(
        &self,
        customer: &CustomerRecord,
        payment: &PaymentRequest,
        result: &PaymentResult,
    ) -> Result<()> {
        let record = format_record(customer, payment, result);
        let mut file = self.file.lock().await;
        file.write_all(record.as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::customer::ContactInfo;
    use crate::domain::payment::{Amount, PaymentType};
    use rust_decimal_macros::dec;
    use tempfile::tempdir;

    fn records() -> (CustomerRecord, PaymentRequest) {
        (
            CustomerRecord::new("John Doe", ContactInfo::email("j@x.com")),
            PaymentRequest::new(
                Amount::new(dec!(100)).unwrap(),
                "usd",
                "tok_mastercard",
                PaymentType::Gateway,
            ),
        )
    }

    #[test]
    fn test_format_record() {
        let (customer, payment) = records();
        let result = PaymentResult::success(dec!(100), "ch_1", "Payment successful").unwrap();
        let line = format_record(&customer, &payment, &result);

        assert!(line.ends_with('\n'));
        assert_eq!(line.lines().count(), 1);
        assert!(line.contains("| John Doe paid 100 USD | status=success | transaction_id=ch_1 | Payment successful"));
    }

    #[test]
    fn test_format_failed_record() {
        let (customer, payment) = records();
        let result = PaymentResult::failed(dec!(100), "Your card\nwas declined.");
        let line = format_record(&customer, &payment, &result);

        assert_eq!(line.lines().count(), 1);
        assert!(line.contains("status=failed | transaction_id=- | Your card was declined."));
    }

    #[tokio::test]
    async fn test_file_log_appends() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("transactions.log");
        std::fs::write(&path, "existing entry\n").unwrap();

        let (customer, payment) = records();
        let result = PaymentResult::failed(dec!(100), "declined");

        let log = FileTransactionLog::open(&path).await.unwrap();
        log.log(&customer, &payment, &result).await.unwrap();
        log.log(&customer, &payment, &result).await.unwrap();
        drop(log);

        // Reopening must not truncate.
        let log = FileTransactionLog::open(&path).await.unwrap();
        log.log(&customer, &payment, &result).await.unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "existing entry");
        assert!(lines[1..].iter().all(|l| l.contains("John Doe paid 100 USD")));
    }

    #[tokio::test]
    async fn test_open_fails_for_missing_directory() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("transactions.log");
        assert!(FileTransactionLog::open(path).await.is_err());
    }
}
