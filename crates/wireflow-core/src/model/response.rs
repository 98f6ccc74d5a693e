use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::Id;

/// Captured outcome of a single request attempt.
///
/// Created exactly once per completed or failed dispatch. The identifier
/// is globally unique; the response store treats a duplicate insert as a
/// no-op.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub id: Id,
    /// Numeric HTTP status; `0` when the server never answered.
    pub status: u16,
    pub status_text: String,
    /// Elapsed request time in milliseconds (`0` for failed dispatches).
    pub response_time_ms: u64,
    #[serde(default)]
    pub headers: HashMap<String, String>,
    pub body: Option<serde_json::Value>,
}

/// Partial response data handed to the response manager.
///
/// Missing fields are defaulted on insert: status `0`, status text
/// `"Unknown status"`, empty headers, null body, zero elapsed time.
#[derive(Debug, Clone, Default)]
pub struct ResponseDraft {
    pub id: Option<Id>,
    pub status: Option<u16>,
    pub status_text: Option<String>,
    pub response_time_ms: Option<u64>,
    pub headers: Option<HashMap<String, String>>,
    pub body: Option<serde_json::Value>,
}

impl ResponseDraft {
    /// Normalize into a full record under the resolved identifier.
    pub(crate) fn into_response(self, id: Id) -> Response {
        Response {
            id,
            status: self.status.unwrap_or(0),
            status_text: self
                .status_text
                .unwrap_or_else(|| "Unknown status".to_owned()),
            response_time_ms: self.response_time_ms.unwrap_or(0),
            headers: self.headers.unwrap_or_default(),
            body: self.body,
        }
    }
}
