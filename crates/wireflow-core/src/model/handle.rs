use serde::{Deserialize, Serialize};

/// Opaque payload owned by the rendering layer.
///
/// Connectors carry one for their on-screen element, connections for the
/// wire drawn between them. The core stores and forwards the value
/// without ever inspecting it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExternalHandle(serde_json::Value);

impl ExternalHandle {
    pub fn new(value: serde_json::Value) -> Self {
        Self(value)
    }

    /// Hand the payload back to its owner.
    pub fn into_inner(self) -> serde_json::Value {
        self.0
    }

    pub fn as_value(&self) -> &serde_json::Value {
        &self.0
    }
}

impl From<serde_json::Value> for ExternalHandle {
    fn from(value: serde_json::Value) -> Self {
        Self(value)
    }
}
