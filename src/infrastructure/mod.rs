//! Adapters implementing the domain ports.

pub mod file_log;
pub mod in_memory;
pub mod notifiers;
pub mod stripe;
