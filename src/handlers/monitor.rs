//! Health check endpoint.

use crate::fault::DomainFault;
use crate::guard::guard;
use crate::response::{Envelope, Reply};
use crate::services::monitor::healthy_check;
use crate::state::AppState;
use axum::extract::State;
use serde_json::Value;

pub fn healthy(state: &AppState) -> Result<Envelope<Value>, DomainFault> {
    healthy_check(state)?;
    Ok(state.version.normal_end())
}

/// GET /healthy
pub async fn get_healthy(State(state): State<AppState>) -> Reply {
    guard(state.version.clone(), healthy)(&state)
}
