//! Example business endpoint.

use crate::fault::DomainFault;
use crate::guard::guard_async;
use crate::extractors::JsonBody;
use crate::response::{Envelope, Reply};
use crate::schemas::Router1Request;
use crate::services::router1::service_a;
use crate::services::utils::{enrich, normalize};
use crate::state::AppState;
use axum::extract::State;
use serde_json::{json, Value};

/// Run the service, record the configured component value, and acknowledge.
pub async fn process((state, request): (AppState, Router1Request)) -> Result<Envelope<Vec<Value>>, DomainFault> {
    let param2 = request.attribute3.as_ref().and_then(|s| s.attribute1.as_deref());
    let outcome = enrich(service_a(&request.attribute1, param2)?);
    let label = normalize(&request.attribute2.attribute1);
    tracing::debug!(%label, ?outcome, "router1 request processed");

    let value = &state.settings.component_a.comp_a_variable;
    let affected = state.db.insert(value, chrono::Utc::now().naive_utc()).await?;
    if state.db.is_placeholder() {
        tracing::debug!(affected, "database is a placeholder; insert result not meaningful");
    }

    Ok(state.version.success(vec![json!({"message": "success"})]))
}

/// POST /router1/posturl
pub async fn post_url(State(state): State<AppState>, JsonBody(request): JsonBody<Router1Request>) -> Reply {
    guard_async(state.version.clone(), process)((state, request)).await
}
