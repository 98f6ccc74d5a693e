use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::Id;

/// Descriptor of an outbound call, owned by an action node.
///
/// Immutable once attached to a connection: dispatch reads it, nothing
/// rewrites it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    pub id: Id,
    /// HTTP method name (`GET`, `POST`, ...).
    pub method: String,
    /// Endpoint path, resolved against the configured server root.
    pub endpoint: String,
    #[serde(default)]
    pub headers: HashMap<String, String>,
    /// Opaque payload forwarded to the transport as-is.
    pub body: Option<serde_json::Value>,
}

impl Request {
    /// A request with a fresh identifier and no headers or body.
    pub fn new(method: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            id: Id::request(),
            method: method.into(),
            endpoint: endpoint.into(),
            headers: HashMap::new(),
            body: None,
        }
    }

    pub fn with_headers(mut self, headers: HashMap<String, String>) -> Self {
        self.headers = headers;
        self
    }

    pub fn with_body(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }
}
