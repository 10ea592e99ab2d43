//! Web backend template: layered settings, uniform response envelopes and fault translation.

pub mod config;
pub mod db;
pub mod error;
pub mod extractors;
pub mod fault;
pub mod guard;
pub mod handlers;
pub mod logging;
pub mod response;
pub mod routes;
pub mod schemas;
pub mod services;
pub mod state;

pub use crate::config::{resolve, resolve_from, Settings};
pub use db::{Database, SqlDatabase};
pub use error::{AppError, ConfigError, DbError};
pub use fault::{DomainFault, FaultKind};
pub use guard::{guard, guard_async};
pub use response::{ApiVersion, Envelope, FailureEnvelope, Reply, ResultStatus};
pub use routes::app_router;
pub use state::AppState;
