use crate::domain::customer::CustomerRecord;
use crate::domain::gateway::{ChargeRequest, GatewayError, GatewayReceipt, STATUS_SUCCEEDED};
use crate::domain::payment::{PaymentRequest, PaymentResult};
use crate::domain::ports::{PaymentGateway, TransactionLog};
use crate::error::Result;
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::RwLock;

/// How the in-memory gateway answers every call.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum GatewayBehavior {
    #[default]
    Approve,
    /// Rejects with a gateway-reported failure carrying this message.
    Decline(String),
    /// Fails as if the gateway could not be reached.
    Unreachable(String),
}

#[derive(Default)]
struct GatewayLedger {
    charges: Vec<ChargeRequest>,
    refunded: HashSet<String>,
    refund_count: usize,
}

/// A scripted stand-in for the external payment gateway.
///
/// Records every charge request it receives. Approved charges get sequential
/// ids (`ch_1`, `ch_2`, ...), refunds `re_1`, `re_2`, ...
///
/// `Clone` shares the underlying ledger, so a test can keep a handle while the
/// processor owns another.
#[derive(Default, Clone)]
pub struct InMemoryGateway {
    behavior: GatewayBehavior,
    ledger: Arc<RwLock<GatewayLedger>>,
}

impl InMemoryGateway {
    /// Creates a gateway that approves every charge.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn declining(message: impl Into<String>) -> Self {
        Self::with_behavior(GatewayBehavior::Decline(message.into()))
    }

    pub fn unreachable(message: impl Into<String>) -> Self {
        Self::with_behavior(GatewayBehavior::Unreachable(message.into()))
    }

    pub fn with_behavior(behavior: GatewayBehavior) -> Self {
        Self {
            behavior,
            ledger: Arc::default(),
        }
    }

    /// Every charge request received so far, approved or not.
    pub async fn charges(&self) -> Vec<ChargeRequest> {
        self.ledger.read().await.charges.clone()
    }

    fn refuse(&self) -> Option<GatewayError> {
        match &self.behavior {
            GatewayBehavior::Approve => None,
            GatewayBehavior::Decline(message) => Some(GatewayError::Declined(message.clone())),
            GatewayBehavior::Unreachable(message) => {
                Some(GatewayError::Unavailable(message.clone()))
            }
        }
    }
}

fn charge_id(index: usize) -> String {
    format!("ch_{}", index + 1)
}

#[async_trait]
impl PaymentGateway for InMemoryGateway {
    async fn create_charge(
        &self,
        request: ChargeRequest,
    ) -> std::result::Result<GatewayReceipt, GatewayError> {
        let mut ledger = self.ledger.write().await;
        let amount = request.amount;
        ledger.charges.push(request);
        if let Some(error) = self.refuse() {
            return Err(error);
        }
        Ok(GatewayReceipt {
            id: charge_id(ledger.charges.len() - 1),
            status: STATUS_SUCCEEDED.to_string(),
            amount,
        })
    }

    async fn create_refund(
        &self,
        charge_id_to_refund: &str,
    ) -> std::result::Result<GatewayReceipt, GatewayError> {
        if let Some(error) = self.refuse() {
            return Err(error);
        }
        let mut ledger = self.ledger.write().await;
        let amount = ledger
            .charges
            .iter()
            .enumerate()
            .find(|(index, _)| charge_id(*index) == charge_id_to_refund)
            .map(|(_, charge)| charge.amount)
            .ok_or_else(|| {
                GatewayError::Declined(format!("No such charge: '{charge_id_to_refund}'"))
            })?;
        if !ledger.refunded.insert(charge_id_to_refund.to_string()) {
            return Err(GatewayError::Declined(format!(
                "Charge {charge_id_to_refund} has already been refunded."
            )));
        }
        ledger.refund_count += 1;
        Ok(GatewayReceipt {
            id: format!("re_{}", ledger.refund_count),
            status: STATUS_SUCCEEDED.to_string(),
            amount,
        })
    }
}

/// One entry captured by `InMemoryTransactionLog`.
#[derive(Debug, Clone, PartialEq)]
pub struct LoggedTransaction {
    pub customer: CustomerRecord,
    pub payment: PaymentRequest,
    pub result: PaymentResult,
}

/// A thread-safe transaction log that keeps entries in memory.
///
/// Ideal for testing where inspecting what was logged matters more than
/// durability.
#[derive(Default, Clone)]
pub struct InMemoryTransactionLog {
    entries: Arc<RwLock<Vec<LoggedTransaction>>>,
}

impl InMemoryTransactionLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn entries(&self) -> Vec<LoggedTransaction> {
        self.entries.read().await.clone()
    }
}

#[async_trait]
impl TransactionLog for InMemoryTransactionLog {
    async fn log(
        &self,
        customer: &CustomerRecord,
        payment: &PaymentRequest,
        result: &PaymentResult,
    ) -> Result<()> {
        let mut entries = self.entries.write().await;
        entries.push(LoggedTransaction {
            customer: customer.clone(),
            payment: payment.clone(),
            result: result.clone(),
        });
        Ok(())
    }
}
