//! Request extractors and per-request checks.

pub mod headers;
pub mod json;

pub use headers::*;
pub use json::*;
