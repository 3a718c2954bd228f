//! CSV adapters used by the batch binary.

pub mod payment_reader;
pub mod result_writer;
