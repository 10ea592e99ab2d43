//! Stateless helpers for request processing.

use serde_json::{Map, Value};

/// Trimmed, lowercased copy of `arg`.
pub fn normalize(arg: &str) -> String {
    tracing::debug!(input = arg, "normalize");
    arg.trim().to_lowercase()
}

/// `payload` marked as processed.
pub fn enrich(mut payload: Map<String, Value>) -> Map<String, Value> {
    payload.insert("processed".into(), Value::Bool(true));
    tracing::debug!(?payload, "enrich");
    payload
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn normalize_trims_and_lowercases() {
        assert_eq!(normalize("  MiXeD Case "), "mixed case");
    }

    #[test]
    fn enrich_keeps_existing_keys() {
        let mut m = Map::new();
        m.insert("status".into(), json!("ok"));
        let out = enrich(m);
        assert_eq!(out["status"], "ok");
        assert_eq!(out["processed"], true);
    }
}
