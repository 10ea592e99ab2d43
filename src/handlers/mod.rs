//! HTTP handlers. Each endpoint is a `Result<Envelope<_>, DomainFault>` function plus an axum
//! entry point that runs it through [`crate::guard`].

pub mod docs;
pub mod monitor;
pub mod router1;
pub use monitor::*;
pub use router1::*;
