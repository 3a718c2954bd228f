//! Processor variants selectable by the `ProcessorFactory`.

pub mod gateway;
pub mod offline;

pub use gateway::GatewayProcessor;
pub use offline::OfflineProcessor;
