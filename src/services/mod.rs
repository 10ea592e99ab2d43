//! Domain logic as plain functions returning `Result<_, DomainFault>`.

pub mod monitor;
pub mod router1;
pub mod utils;
