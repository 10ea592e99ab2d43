//! Standard response envelope shared by every endpoint.

use crate::config::{Environment, Settings};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

pub const NORMAL_END: &str = "normal end";
pub const EXCEPTION_MSG: &str = "exception msg";
pub const FALLBACK_VERSION: &str = "1.0.0";
pub const VERSION_ENV: &str = "APP_VERSION";

/// Result discriminator: `"0"` ok, `"1"` failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum ResultStatus {
    #[serde(rename = "0")]
    Ok,
    #[serde(rename = "1")]
    Ng,
}

/// Success envelope. `data` is always serialized (`null` when absent).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub status_code: ResultStatus,
    pub version: String,
    pub msg: String,
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    pub fn with_msg(mut self, msg: impl Into<String>) -> Self {
        self.msg = msg.into();
        self
    }
}

/// Failure envelope. Carries no payload; `msg` holds the fault detail.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FailureEnvelope {
    pub status_code: ResultStatus,
    pub version: String,
    pub msg: String,
}

/// Version stamped into every envelope.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiVersion(Arc<str>);

impl ApiVersion {
    pub fn new(version: impl AsRef<str>) -> Self {
        ApiVersion(Arc::from(version.as_ref()))
    }

    /// Settings' declared version, else `APP_VERSION`, else `1.0.0`.
    pub fn resolve<E: Environment + ?Sized>(settings: &Settings, env: &E) -> Self {
        let version = settings
            .app_version
            .clone()
            .or_else(|| env.var(VERSION_ENV).filter(|v| !v.trim().is_empty()))
            .unwrap_or_else(|| FALLBACK_VERSION.to_string());
        Self::new(version)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn success<T>(&self, data: T) -> Envelope<T> {
        Envelope {
            status_code: ResultStatus::Ok,
            version: self.as_str().to_string(),
            msg: NORMAL_END.to_string(),
            data: Some(data),
        }
    }

    /// Success without payload (`data: null`).
    pub fn normal_end<T>(&self) -> Envelope<T> {
        Envelope {
            status_code: ResultStatus::Ok,
            version: self.as_str().to_string(),
            msg: NORMAL_END.to_string(),
            data: None,
        }
    }

    pub fn failure(&self, msg: impl Into<String>) -> FailureEnvelope {
        FailureEnvelope {
            status_code: ResultStatus::Ng,
            version: self.as_str().to_string(),
            msg: msg.into(),
        }
    }
}

impl Default for ApiVersion {
    fn default() -> Self {
        Self::new(FALLBACK_VERSION)
    }
}

impl std::fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// An envelope already turned into a JSON document, paired with its HTTP status.
#[derive(Clone, Debug, PartialEq)]
pub struct Reply {
    pub status: StatusCode,
    pub body: serde_json::Value,
}

impl Reply {
    pub fn new<M: Serialize>(model: &M, status: StatusCode) -> Result<Self, serde_json::Error> {
        Ok(Reply {
            status,
            body: serde_json::to_value(model)?,
        })
    }

    pub fn ok<M: Serialize>(model: &M) -> Result<Self, serde_json::Error> {
        Self::new(model, StatusCode::OK)
    }

    /// Failure envelopes hold only strings, so serialization cannot fail.
    pub fn failure(envelope: &FailureEnvelope, status: StatusCode) -> Self {
        Reply {
            status,
            body: serde_json::json!({
                "status_code": envelope.status_code,
                "version": envelope.version,
                "msg": envelope.msg,
            }),
        }
    }
}

impl IntoResponse for Reply {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{build_settings, RawConfigSource};
    use serde_json::json;

    fn settings(ini: &str, env: &[(&str, &str)]) -> Settings {
        let source = RawConfigSource::parse(ini).unwrap();
        build_settings(&source, env, "development".into(), None).unwrap()
    }

    #[test]
    fn health_envelope_document() {
        let v = ApiVersion::default();
        let reply = Reply::ok(&v.normal_end::<serde_json::Value>()).unwrap();
        assert_eq!(reply.status, StatusCode::OK);
        assert_eq!(
            reply.body,
            json!({"status_code": "0", "version": "1.0.0", "msg": "normal end", "data": null})
        );
    }

    #[test]
    fn list_payload_document() {
        let v = ApiVersion::new("1.0.0");
        let reply = Reply::ok(&v.success(vec![json!({"message": "success"})])).unwrap();
        assert_eq!(reply.body["data"], json!([{"message": "success"}]));
        assert_eq!(reply.body["status_code"], "0");
    }

    #[test]
    fn failure_document_has_no_data() {
        let v = ApiVersion::new("2.0.0");
        let reply = Reply::failure(&v.failure("[ValueError] x"), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(reply.body, json!({"status_code": "1", "version": "2.0.0", "msg": "[ValueError] x"}));
        let parsed: FailureEnvelope = serde_json::from_value(reply.body).unwrap();
        assert_eq!(parsed.status_code, ResultStatus::Ng);
    }

    #[test]
    fn version_precedence() {
        let env = [(VERSION_ENV, "9.9.9")];
        let declared = settings("[DEFAULT]\napp_version = 3.1.0\n", &env);
        assert_eq!(ApiVersion::resolve(&declared, &env).as_str(), "3.1.0");

        let undeclared = settings("[DEFAULT]\n", &env);
        assert_eq!(ApiVersion::resolve(&undeclared, &env).as_str(), "9.9.9");

        let blank = [(VERSION_ENV, " ")];
        let undeclared = settings("[DEFAULT]\n", &blank);
        assert_eq!(ApiVersion::resolve(&undeclared, &blank).as_str(), FALLBACK_VERSION);
    }
}
