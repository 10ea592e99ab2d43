//! Router1 business logic.

use crate::fault;
use crate::fault::{DomainFault, FaultKind};
use serde_json::{json, Map, Value};

/// Validate the request's leading attribute and echo what was processed.
pub fn function1(param1: &str, param2: Option<&str>) -> Result<Map<String, Value>, DomainFault> {
    tracing::info!("service_a.function1 called");
    let param1 = param1.trim();
    if param1.is_empty() {
        return Err(fault!(FaultKind::Value, "specific try error"));
    }
    let mut result = Map::new();
    result.insert("status".into(), json!("ok"));
    result.insert("param1".into(), json!(param1));
    result.insert("param2".into(), json!(param2));
    tracing::debug!(?result, "function1 result");
    Ok(result)
}

pub fn service_a(param1: &str, param2: Option<&str>) -> Result<Map<String, Value>, DomainFault> {
    function1(param1, param2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn echoes_parameters() {
        let out = service_a(" alice ", Some("x")).unwrap();
        assert_eq!(out["status"], "ok");
        assert_eq!(out["param1"], "alice");
        assert_eq!(out["param2"], "x");
        assert_eq!(service_a("bob", None).unwrap()["param2"], Value::Null);
    }

    #[test]
    fn blank_param_raises_value_fault_in_function1() {
        let fault = service_a("   ", None).unwrap_err();
        assert_eq!(fault.kind(), FaultKind::Value);
        assert_eq!(fault.detail(), Some("specific try error"));
        assert_eq!(fault.location().and_then(|l| l.function), Some("function1"));
        assert!(fault.describe().ends_with("in function1: [ValueError] specific try error"));
    }
}
