// ── Nodes and connectors ──
//
// A node is a graph vertex: a client-side action carrying a request
// descriptor, or a server-side endpoint with a target URL. Connectors
// are its attachment points for wiring connections.

use serde::{Deserialize, Serialize};

use super::connection::ConnectionStatus;
use super::handle::ExternalHandle;
use super::request::Request;
use super::Id;

/// Which side of the wire a connector represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ConnectorKind {
    Request,
    Response,
}

/// An attachment point on a node enabling wiring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connector {
    pub id: Id,
    /// Back-reference to the owning node (not ownership).
    pub parent_node: Id,
    pub kind: ConnectorKind,
    /// Opaque on-screen element handle, owned by the rendering layer.
    pub element: Option<ExternalHandle>,
    /// The node on the opposite end, once wired.
    pub connected_to: Option<Id>,
}

/// What a node is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum NodeKind {
    /// Client node: carries the request it fires when wired.
    Action { request: Request },
    /// Server node: the address requests are aimed at.
    Endpoint { url: String },
}

/// A graph vertex owned by a hub.
///
/// Nodes are created when a hub is populated and mutated as connectors
/// are attached or wired; they are only ever deleted through hub
/// removal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: Id,
    pub name: Option<String>,
    #[serde(flatten)]
    pub kind: NodeKind,
    /// Outcome of the node's latest connection attempt, if any.
    pub status: Option<ConnectionStatus>,
    #[serde(default)]
    pub connectors: Vec<Connector>,
}

impl Node {
    /// A fresh action node around `request`.
    pub fn action(request: Request) -> Self {
        Self {
            id: Id::node(),
            name: None,
            kind: NodeKind::Action { request },
            status: None,
            connectors: Vec::new(),
        }
    }

    /// A fresh endpoint node aimed at `url`.
    pub fn endpoint(url: impl Into<String>) -> Self {
        Self {
            id: Id::node(),
            name: None,
            kind: NodeKind::Endpoint { url: url.into() },
            status: None,
            connectors: Vec::new(),
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// The request descriptor, when this is an action node.
    pub fn request(&self) -> Option<&Request> {
        match &self.kind {
            NodeKind::Action { request } => Some(request),
            NodeKind::Endpoint { .. } => None,
        }
    }

    pub fn connector(&self, connector_id: &Id) -> Option<&Connector> {
        self.connectors.iter().find(|c| c.id == *connector_id)
    }

    pub fn has_connector(&self, connector_id: &Id) -> bool {
        self.connector(connector_id).is_some()
    }
}
