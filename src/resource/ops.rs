//! Per-kind operation bindings.
//!
//! Dispatch over {get, list, put, post, delete} is a trait with one method
//! per operation; the registry hands out trait objects, so invoking an
//! operation is ordinary polymorphic dispatch. [`RestOps`] is the standard
//! implementation: one REST collection per kind, with the body coerced into
//! the kind's typed payload before the call.

use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::api::{ApiClient, ApiResponse};
use crate::error::Error;
use crate::resource::coerce::{coerce, coerce_options};

/// Flat key/value options collected from global CLI flags.
pub type OptionsMap = HashMap<String, String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Get,
    List,
    Put,
    Post,
    Delete,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::Get => "get",
            Operation::List => "list",
            Operation::Put => "put",
            Operation::Post => "post",
            Operation::Delete => "delete",
        };
        f.write_str(name)
    }
}

/// The operation bindings for one resource kind.
///
/// Every method performs at most one network round trip and returns the fully
/// drained response. HTTP error statuses are data for the caller to classify;
/// `Err` is reserved for unsupported operations, coercion failures, and
/// transport failures.
#[async_trait]
pub trait ResourceOps: Send + Sync {
    async fn get(&self, name: &str, options: &OptionsMap) -> Result<ApiResponse, Error>;
    async fn list(&self, options: &OptionsMap) -> Result<ApiResponse, Error>;
    async fn put(&self, name: &str, body: &Value) -> Result<ApiResponse, Error>;
    async fn post(&self, body: &Value) -> Result<ApiResponse, Error>;
    async fn delete(&self, name: &str) -> Result<ApiResponse, Error>;
}

/// Which of the five operations a kind binds.
#[derive(Debug, Clone, Copy)]
pub struct Capabilities {
    pub get: bool,
    pub list: bool,
    pub put: bool,
    pub post: bool,
    pub delete: bool,
}

impl Capabilities {
    /// Full CRUD surface.
    pub const fn crud() -> Self {
        Self { get: true, list: true, put: true, post: true, delete: true }
    }

    /// Get and list only.
    pub const fn read_only() -> Self {
        Self { get: true, list: true, put: false, post: false, delete: false }
    }
}

/// REST-backed operation bindings: one collection path, one payload shape
/// `T`, and optionally a query-parameter shape `P` for get/list.
pub struct RestOps<T, P = crate::resource::types::NoParams> {
    client: ApiClient,
    kind: &'static str,
    path: &'static str,
    caps: Capabilities,
    scoped: bool,
    _shapes: PhantomData<fn() -> (T, P)>,
}

impl<T, P> RestOps<T, P> {
    pub fn new(
        client: ApiClient,
        kind: &'static str,
        path: &'static str,
        caps: Capabilities,
    ) -> Self {
        Self { client, kind, path, caps, scoped: false, _shapes: PhantomData }
    }

    /// Declare that get and list accept the `P` query-parameter shape.
    pub fn scoped(mut self) -> Self {
        self.scoped = true;
        self
    }

    fn require(&self, enabled: bool, op: Operation) -> Result<(), Error> {
        if enabled {
            Ok(())
        } else {
            Err(Error::UnsupportedOperation { op, kind: self.kind })
        }
    }

    fn item_path(&self, name: &str) -> String {
        format!("{}/{}", self.path, name)
    }
}

/// Flatten a serialized params shape into query pairs; non-scalar fields are
/// not representable in a query string and are dropped.
fn query_pairs<P: Serialize>(params: &P) -> Vec<(String, String)> {
    match serde_json::to_value(params) {
        Ok(Value::Object(map)) => map
            .into_iter()
            .filter_map(|(key, value)| match value {
                Value::String(s) => Some((key, s)),
                Value::Bool(b) => Some((key, b.to_string())),
                Value::Number(n) => Some((key, n.to_string())),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    }
}

#[async_trait]
impl<T, P> ResourceOps for RestOps<T, P>
where
    T: Serialize + DeserializeOwned + Send + Sync,
    P: Serialize + DeserializeOwned + Send + Sync,
{
    async fn get(&self, name: &str, options: &OptionsMap) -> Result<ApiResponse, Error> {
        self.require(self.caps.get, Operation::Get)?;
        let query = if self.scoped {
            let params: P = coerce_options(options)?;
            query_pairs(&params)
        } else {
            Vec::new()
        };
        self.client.get(&self.item_path(name), &query).await
    }

    async fn list(&self, options: &OptionsMap) -> Result<ApiResponse, Error> {
        self.require(self.caps.list, Operation::List)?;
        let query = if self.scoped {
            let params: P = coerce_options(options)?;
            query_pairs(&params)
        } else {
            Vec::new()
        };
        self.client.get(self.path, &query).await
    }

    async fn put(&self, name: &str, body: &Value) -> Result<ApiResponse, Error> {
        self.require(self.caps.put, Operation::Put)?;
        let payload: T = coerce(body.clone())?;
        let wire = serde_json::to_value(&payload).map_err(|e| Error::ShapeMismatch {
            target: self.kind,
            detail: e.to_string(),
        })?;
        self.client.put(&self.item_path(name), &wire).await
    }

    async fn post(&self, body: &Value) -> Result<ApiResponse, Error> {
        self.require(self.caps.post, Operation::Post)?;
        let payload: T = coerce(body.clone())?;
        let wire = serde_json::to_value(&payload).map_err(|e| Error::ShapeMismatch {
            target: self.kind,
            detail: e.to_string(),
        })?;
        self.client.post(self.path, &wire).await
    }

    async fn delete(&self, name: &str) -> Result<ApiResponse, Error> {
        self.require(self.caps.delete, Operation::Delete)?;
        self.client.delete(&self.item_path(name)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::types::{EnvironmentScope, ModelSpec};

    fn rest_ops(caps: Capabilities) -> RestOps<ModelSpec, EnvironmentScope> {
        let client = ApiClient::new("http://localhost:9", None, None).unwrap();
        RestOps::new(client, "Model", "models", caps)
    }

    #[tokio::test]
    async fn missing_capability_is_unsupported() {
        let ops = rest_ops(Capabilities::read_only());
        let err = ops.delete("x").await.unwrap_err();
        match err {
            Error::UnsupportedOperation { op, kind } => {
                assert_eq!(op, Operation::Delete);
                assert_eq!(kind, "Model");
            }
            other => panic!("expected UnsupportedOperation, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn put_coercion_failure_precedes_network() {
        // Port 9 is unreachable; a ShapeMismatch here proves coercion runs first.
        let ops = rest_ops(Capabilities::crud());
        let body = serde_json::json!({"flavors": "not-a-list"});
        let err = ops.put("x", &body).await.unwrap_err();
        assert!(matches!(err, Error::ShapeMismatch { .. }));
    }

    #[test]
    fn query_pairs_keep_scalars_only() {
        let pairs = query_pairs(&serde_json::json!({
            "environment": "prod",
            "count": 3,
            "nested": {"x": 1}
        }));
        assert!(pairs.contains(&("environment".to_string(), "prod".to_string())));
        assert!(pairs.contains(&("count".to_string(), "3".to_string())));
        assert_eq!(pairs.len(), 2);
    }

    #[test]
    fn operation_display_is_lowercase() {
        assert_eq!(Operation::Put.to_string(), "put");
        assert_eq!(Operation::List.to_string(), "list");
    }
}
