use super::processors::{GatewayProcessor, OfflineProcessor};
use crate::config::GatewayConfig;
use crate::domain::payment::{PaymentRequest, PaymentType};
use crate::domain::ports::{PaymentProcessorBox, SharedGateway};
use crate::error::{PaymentError, Result};

/// The processor variants the factory can hand out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessorKind {
    Offline,
    Gateway,
}

/// Picks a processor variant from a payment's type and currency.
///
/// Offline payments always get the offline processor. Gateway payments need
/// a configured gateway and a currency that gateway supports.
#[derive(Clone, Default)]
pub struct ProcessorFactory {
    gateway: Option<(SharedGateway, GatewayConfig)>,
}

impl ProcessorFactory {
    /// A factory that can only produce offline processors.
    pub fn offline_only() -> Self {
        Self::default()
    }

    pub fn new(gateway: SharedGateway, config: &GatewayConfig) -> Self {
        Self {
            gateway: Some((gateway, config.clone())),
        }
    }

    fn configured_gateway(&self) -> Result<&(SharedGateway, GatewayConfig)> {
        self.gateway.as_ref().ok_or_else(|| {
            PaymentError::UnsupportedConfiguration("no payment gateway is configured".to_string())
        })
    }

    pub fn select(&self, payment: &PaymentRequest) -> Result<ProcessorKind> {
        match payment.payment_type {
            PaymentType::Offline => Ok(ProcessorKind::Offline),
            PaymentType::Gateway => {
                let (_, config) = self.configured_gateway()?;
                if config.supports_currency(&payment.currency) {
                    Ok(ProcessorKind::Gateway)
                } else {
                    Err(PaymentError::UnsupportedConfiguration(format!(
                        "unsupported currency '{}' for gateway payments",
                        payment.currency
                    )))
                }
            }
        }
    }

    pub fn create(&self, payment: &PaymentRequest) -> Result<PaymentProcessorBox> {
        match self.select(payment)? {
            ProcessorKind::Offline => Ok(Box::new(OfflineProcessor::new())),
            ProcessorKind::Gateway => {
                let (gateway, _) = self.configured_gateway()?;
                Ok(Box::new(GatewayProcessor::new(gateway.clone())))
            }
        }
    }
}
