//! Request models. Response models live in [`crate::response`].

pub mod router1;

pub use router1::*;

use serde::{Deserialize, Deserializer};

/// Strings in request bodies arrive with surrounding whitespace stripped.
pub(crate) fn trimmed<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(String::deserialize(d)?.trim().to_string())
}

pub(crate) fn trimmed_opt<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    Ok(Option::<String>::deserialize(d)?.map(|s| s.trim().to_string()))
}

pub(crate) fn trimmed_vec<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<String>, D::Error> {
    Ok(Vec::<String>::deserialize(d)?
        .into_iter()
        .map(|s| s.trim().to_string())
        .collect())
}

pub(crate) fn trimmed_vec_opt<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Vec<String>>, D::Error> {
    Ok(Option::<Vec<String>>::deserialize(d)?
        .map(|v| v.into_iter().map(|s| s.trim().to_string()).collect()))
}
