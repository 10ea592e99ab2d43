//! Common routes: health check and API document.

use crate::handlers::{docs::get_openapi, get_healthy};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn common_routes(state: AppState) -> Router {
    Router::new()
        .route("/healthy", get(get_healthy))
        .route("/openapi.json", get(get_openapi))
        .with_state(state)
}
