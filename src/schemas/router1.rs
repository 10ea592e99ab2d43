//! Body of `POST /router1/posturl`.

use crate::schemas::{trimmed, trimmed_opt, trimmed_vec, trimmed_vec_opt};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SubModel1 {
    #[serde(deserialize_with = "trimmed")]
    pub attribute1: String,
    #[serde(deserialize_with = "trimmed")]
    pub attribute2: String,
    #[serde(deserialize_with = "trimmed")]
    pub attribute3: String,
    #[serde(deserialize_with = "trimmed")]
    pub attribute4: String,
    #[serde(default, deserialize_with = "trimmed_vec")]
    pub attribute5: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SubModel2 {
    #[serde(default, deserialize_with = "trimmed_opt")]
    pub attribute1: Option<String>,
    #[serde(default, deserialize_with = "trimmed_vec_opt")]
    pub attribute2: Option<Vec<String>>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Router1Request {
    #[serde(deserialize_with = "trimmed")]
    pub attribute1: String,
    pub attribute2: SubModel1,
    #[serde(default)]
    pub attribute3: Option<SubModel2>,
}
