//! JSON body extractor whose rejection is a failure envelope.

use crate::response::{ApiVersion, Reply};
use async_trait::async_trait;
use axum::extract::{FromRef, FromRequest, Request};
use axum::Json;
use serde::de::DeserializeOwned;

/// Like [`axum::Json`], but malformed or invalid bodies answer with a failure envelope
/// carrying the rejection's own status (400, 415 or 422).
#[derive(Clone, Debug)]
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
    ApiVersion: FromRef<S>,
{
    type Rejection = Reply;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(JsonBody(value)),
            Err(rejection) => {
                let status = rejection.status();
                let detail = rejection.body_text();
                tracing::warn!(%status, detail = %detail, "request body rejected");
                let version = ApiVersion::from_ref(state);
                Err(Reply::failure(
                    &version.failure(format!("[RequestValidationError] {}", detail)),
                    status,
                ))
            }
        }
    }
}
