//! Business routes, mounted under `/router1`.

use crate::handlers::post_url;
use crate::state::AppState;
use axum::{routing::post, Router};

pub fn router1_routes(state: AppState) -> Router {
    Router::new()
        .route("/posturl", post(post_url))
        .with_state(state)
}
