//! Router assembly: route groups plus the layers every request passes through.

pub mod common;
pub mod router1;

pub use common::common_routes;
pub use router1::router1_routes;

use crate::extractors::require_headers;
use crate::fault::{take_panic_location, DomainFault, FaultKind};
use crate::response::{ApiVersion, Reply, EXCEPTION_MSG};
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    Router,
};
use std::any::Any;
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, trace::TraceLayer};

/// Full application: `/healthy`, `/openapi.json`, `/router1/posturl`.
///
/// Bodies over `server.max_body_bytes` are refused by the extractors, so the 413 carries a
/// failure envelope like any other rejection.
pub fn app_router(state: AppState) -> Router {
    let version = state.version.clone();
    let max_body = state.settings.server.max_body_bytes;
    Router::new()
        .merge(common_routes(state.clone()))
        .nest("/router1", router1_routes(state.clone()))
        .layer(middleware::from_fn_with_state(state, require_headers))
        .layer(DefaultBodyLimit::max(max_body))
        .layer(CorsLayer::very_permissive())
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::custom(panic_reply(version)))
}

/// Failure envelope for a handler that panicked instead of returning a fault. Carries the panic's
/// file and line when [`crate::fault::install_panic_hook`] is in place.
fn panic_reply(version: ApiVersion) -> impl Fn(Box<dyn Any + Send + 'static>) -> Response + Clone {
    move |payload: Box<dyn Any + Send + 'static>| -> Response {
        let detail = if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else if let Some(s) = payload.downcast_ref::<&str>() {
            (*s).to_string()
        } else {
            EXCEPTION_MSG.to_string()
        };
        let mut fault = DomainFault::bare(FaultKind::Panic).with_detail(detail);
        if let Some(location) = take_panic_location() {
            fault = fault.at(location);
        }
        tracing::error!(fault = %fault.describe(), "handler panicked");
        Reply::failure(&version.failure(fault.describe()), StatusCode::INTERNAL_SERVER_ERROR).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn panic_payload_becomes_failure_envelope() {
        let respond = panic_reply(ApiVersion::new("1.0.0"));
        let res = respond(Box::new("boom"));
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status_code"], "1");
        assert_eq!(body["msg"], "[Panic] boom");
    }

    #[tokio::test]
    async fn panic_reply_reports_where_the_panic_happened() {
        crate::fault::install_panic_hook();
        let line = line!() + 1;
        let payload = std::panic::catch_unwind(|| panic!("exploded {}", 7)).unwrap_err();
        let res = panic_reply(ApiVersion::new("1.0.0"))(payload);
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(
            body["msg"],
            format!("File \"{}\", line {}: [Panic] exploded 7", file!(), line)
        );
    }
}
