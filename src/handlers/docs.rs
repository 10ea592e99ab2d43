//! OpenAPI document for the envelope and request models.

use crate::response::{FailureEnvelope, ResultStatus};
use crate::schemas::{Router1Request, SubModel1, SubModel2};
use crate::state::AppState;
use axum::{extract::State, Json};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(title = "WebTemplate"),
    components(schemas(ResultStatus, FailureEnvelope, Router1Request, SubModel1, SubModel2))
)]
pub struct ApiDoc;

pub fn openapi_document(version: &str) -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    doc.info.version = version.to_string();
    doc
}

/// GET /openapi.json
pub async fn get_openapi(State(state): State<AppState>) -> Json<utoipa::openapi::OpenApi> {
    Json(openapi_document(state.version.as_str()))
}
