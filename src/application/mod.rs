//! Application layer containing the payment pipeline orchestration.
//!
//! `PaymentService` runs the validate, dispatch, notify, log sequence for one
//! request at a time. `ProcessorFactory` decides which processor variant
//! handles a given payment.

pub mod factory;
pub mod processors;
pub mod service;
