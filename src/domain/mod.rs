//! Domain layer: the records flowing through the pipeline, their validation
//! rules, and the ports every collaborator has to implement.

pub mod customer;
pub mod gateway;
pub mod payment;
pub mod ports;
pub mod validation;
