use serde::{Deserialize, Serialize};

use super::handle::ExternalHandle;
use super::node::Node;
use super::request::Request;
use super::response::Response;
use super::Id;

/// Lifecycle state of a connection.
///
/// Exactly one transition happens: `Pending` to either terminal state.
/// Nothing moves a connection back out of a terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ConnectionStatus {
    Pending,
    Completed,
    Failed,
}

impl ConnectionStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::Pending)
    }
}

/// A directed edge between two nodes, tracked through its request
/// lifecycle.
///
/// `source` and `target` are value snapshots taken when the connection
/// was created; the canonical node graph lives in the hub store. At most
/// one connection exists per `(source, target)` pair at a time -- the
/// connection store rejects a second insert for the same pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connection {
    pub id: Id,
    pub source: Node,
    pub target: Node,
    pub status: ConnectionStatus,
    pub request: Option<Request>,
    pub response: Option<Response>,
    /// Opaque drawing payload owned by the rendering layer.
    pub draw: Option<ExternalHandle>,
}

impl Connection {
    /// Whether either endpoint owns the given connector.
    pub fn owns_connector(&self, connector_id: &Id) -> bool {
        self.source.has_connector(connector_id) || self.target.has_connector(connector_id)
    }

    /// Exact match on both endpoint identifiers.
    pub fn links(&self, source_id: &Id, target_id: &Id) -> bool {
        self.source.id == *source_id && self.target.id == *target_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_terminality() {
        assert!(!ConnectionStatus::Pending.is_terminal());
        assert!(ConnectionStatus::Completed.is_terminal());
        assert!(ConnectionStatus::Failed.is_terminal());
    }

    #[test]
    fn status_serializes_screaming() {
        let json = serde_json::to_string(&ConnectionStatus::Pending).expect("serialize");
        assert_eq!(json, "\"PENDING\"");
        assert_eq!(ConnectionStatus::Completed.to_string(), "COMPLETED");
    }
}
