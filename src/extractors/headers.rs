//! Headers every route requires in production.

use crate::config::PRODUCTION_PROFILE;
use crate::response::Reply;
use crate::state::AppState;
use axum::{
    extract::{Request, State},
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

pub const HEADER_1: &str = "header-1";
pub const HEADER_2: &str = "header-2";

/// Names of required headers that are absent or blank.
pub fn missing_headers(headers: &HeaderMap) -> Vec<&'static str> {
    [HEADER_1, HEADER_2]
        .into_iter()
        .filter(|name| {
            headers
                .get(*name)
                .and_then(|v| v.to_str().ok())
                .map_or(true, |v| v.trim().is_empty())
        })
        .collect()
}

/// Middleware: in the production profile, reject requests lacking [`HEADER_1`] or [`HEADER_2`] with 400.
pub async fn require_headers(State(state): State<AppState>, request: Request, next: Next) -> Response {
    if state.settings.app_env == PRODUCTION_PROFILE {
        let missing = missing_headers(request.headers());
        if !missing.is_empty() {
            let msg = format!("Missing required header(s): {}", missing.join(", "));
            tracing::warn!(path = %request.uri().path(), %msg, "request rejected");
            return Reply::failure(&state.version.failure(msg), StatusCode::BAD_REQUEST).into_response();
        }
    }
    next.run(request).await
}
