//! Fault translation at the HTTP boundary.
//!
//! `guard` and `guard_async` wrap a handler returning `Result<Envelope<T>, DomainFault>`
//! and always produce a [`Reply`]: the handler's envelope with 200, or a failure envelope
//! with 500 whose message is [`DomainFault::describe`]. A fault never escapes the wrapper.

use crate::fault::{DomainFault, FaultKind};
use crate::response::{ApiVersion, Envelope, Reply};
use axum::http::StatusCode;
use serde::Serialize;
use std::future::Future;
use std::pin::Pin;

pub type BoxFuture<T> = Pin<Box<dyn Future<Output = T> + Send + 'static>>;

/// Wrap a synchronous handler.
pub fn guard<A, T, F>(version: ApiVersion, handler: F) -> impl Fn(A) -> Reply + Clone
where
    F: Fn(A) -> Result<Envelope<T>, DomainFault> + Clone,
    T: Serialize,
{
    let name = std::any::type_name::<F>();
    move |args: A| -> Reply { settle(&version, name, handler(args)) }
}

/// Wrap an asynchronous handler. The returned future only awaits the handler itself.
pub fn guard_async<A, T, F, Fut>(version: ApiVersion, handler: F) -> impl Fn(A) -> BoxFuture<Reply> + Clone
where
    F: Fn(A) -> Fut + Clone,
    Fut: Future<Output = Result<Envelope<T>, DomainFault>> + Send + 'static,
    T: Serialize,
{
    let name = std::any::type_name::<F>();
    move |args: A| -> BoxFuture<Reply> {
        let pending = handler(args);
        let version = version.clone();
        Box::pin(async move { settle(&version, name, pending.await) })
    }
}

fn settle<T: Serialize>(version: &ApiVersion, handler: &str, outcome: Result<Envelope<T>, DomainFault>) -> Reply {
    let fault = match outcome {
        Ok(envelope) => match Reply::ok(&envelope) {
            Ok(reply) => return reply,
            Err(e) => DomainFault::bare(FaultKind::Serialization)
                .with_detail(e.to_string())
                .caused_by(e),
        },
        Err(fault) => fault,
    };
    translate(version, handler, &fault)
}

/// Log `fault` with full detail and build the client-facing 500 reply.
pub fn translate(version: &ApiVersion, handler: &str, fault: &DomainFault) -> Reply {
    let location = fault.location();
    tracing::error!(
        handler,
        kind = %fault.kind(),
        detail = fault.detail().unwrap_or(""),
        file = location.map(|l| l.file.as_ref()),
        line = location.map(|l| l.line),
        function = location.and_then(|l| l.function),
        causes = ?fault.chain(),
        "unhandled fault in handler"
    );
    Reply::failure(&version.failure(fault.describe()), StatusCode::INTERNAL_SERVER_ERROR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fault;
    use serde_json::{json, Value};
    use std::collections::HashMap;

    fn version() -> ApiVersion {
        ApiVersion::new("1.0.0")
    }

    fn lookup(key: &str) -> Result<Envelope<Vec<Value>>, DomainFault> {
        if key.is_empty() {
            return Err(fault!(FaultKind::Value, "specific try error"));
        }
        Ok(version().success(vec![json!({"message": key})]))
    }

    #[test]
    fn passes_success_through_unchanged() {
        let expected = Reply::ok(&lookup("success").unwrap()).unwrap();
        let wrapped = guard(version(), lookup);
        let reply = wrapped("success");
        assert_eq!(reply, expected);
        assert_eq!(reply.status, StatusCode::OK);
    }

    #[test]
    fn translates_fault_into_failure_envelope() {
        let reply = guard(version(), lookup)("");
        assert_eq!(reply.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(reply.body["status_code"], "1");
        assert_eq!(reply.body["version"], "1.0.0");
        assert!(reply.body.get("data").is_none());
        let msg = reply.body["msg"].as_str().unwrap();
        assert!(msg.starts_with(&format!("File \"{}\", line ", file!())), "{}", msg);
        assert!(msg.ends_with(", in lookup: [ValueError] specific try error"), "{}", msg);
    }

    #[test]
    fn fault_without_location_has_bare_message() {
        let wrapped = guard(version(), |_: ()| -> Result<Envelope<()>, DomainFault> {
            Err(DomainFault::bare(FaultKind::Runtime).with_detail("unexpected"))
        });
        assert_eq!(wrapped(()).body["msg"], "[RuntimeError] unexpected");
    }

    #[test]
    fn unserializable_payload_becomes_failure() {
        let wrapped = guard(version(), |_: ()| {
            let mut data = HashMap::new();
            data.insert(vec![1u8], 1);
            Ok(version().success(data))
        });
        let reply = wrapped(());
        assert_eq!(reply.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(reply.body["msg"].as_str().unwrap().starts_with("[SerializationError]"));
    }

    async fn fetch(id: u32) -> Result<Envelope<u32>, DomainFault> {
        tokio::task::yield_now().await;
        if id == 0 {
            return Err(fault!(FaultKind::Lookup, "no row for {}", id));
        }
        Ok(version().success(id))
    }

    #[tokio::test]
    async fn async_success_matches_sync_semantics() {
        let reply = guard_async(version(), fetch)(7).await;
        assert_eq!(reply, Reply::ok(&version().success(7u32)).unwrap());
    }

    #[tokio::test]
    async fn async_fault_is_translated() {
        let reply = guard_async(version(), fetch)(0).await;
        assert_eq!(reply.status, StatusCode::INTERNAL_SERVER_ERROR);
        let msg = reply.body["msg"].as_str().unwrap();
        assert!(msg.ends_with(", in fetch: [LookupError] no row for 0"), "{}", msg);
    }

    #[tokio::test]
    async fn wrapped_handler_is_reusable_across_tasks() {
        let wrapped = guard_async(version(), fetch);
        let handles: Vec<_> = (1..=4).map(|i| tokio::spawn(wrapped(i))).collect();
        for (i, h) in handles.into_iter().enumerate() {
            assert_eq!(h.await.unwrap().body["data"], json!(i + 1));
        }
    }
}
