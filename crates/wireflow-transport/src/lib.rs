// wireflow-transport: outbound HTTP dispatch for wireflow.
//
// Defines the wire-level request/response contract the orchestration core
// depends on, plus an HTTP implementation backed by reqwest. The core only
// ever sees the `Transport` trait -- tests drive it with stubs.

pub mod config;
pub mod error;
pub mod http;

use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub use config::{TlsMode, TransportConfig};
pub use error::TransportError;
pub use http::HttpTransport;

/// An outbound HTTP request, fully resolved by the caller (absolute URL).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransportRequest {
    /// HTTP method name (`GET`, `POST`, ...).
    pub method: String,
    /// Absolute request URL.
    pub url: String,
    /// Request headers.
    #[serde(default)]
    pub headers: HashMap<String, String>,
    /// Optional JSON payload.
    pub body: Option<serde_json::Value>,
}

/// The captured outcome of a successful dispatch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransportResponse {
    /// Numeric HTTP status code.
    pub status: u16,
    /// Reason phrase for the status line.
    pub status_text: String,
    /// Response headers.
    #[serde(default)]
    pub headers: HashMap<String, String>,
    /// Decoded response body, if any.
    pub body: Option<serde_json::Value>,
}

/// The dispatch seam between the orchestration core and the network.
///
/// One call, one outcome: a dispatch resolves with the server's answer or
/// rejects with a [`TransportError`]. Non-2xx statuses reject, and the
/// error carries the status -- callers that need the failure recorded as a
/// response build one from [`TransportError::status`] and the message.
/// No retries happen at this layer.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn dispatch(
        &self,
        request: TransportRequest,
    ) -> Result<TransportResponse, TransportError>;
}
