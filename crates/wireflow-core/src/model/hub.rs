use serde::{Deserialize, Serialize};

use super::node::Node;
use super::Id;

/// Which side of the board a hub lives on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum HubKind {
    /// Groups action nodes.
    Client,
    /// Groups endpoint nodes.
    Server,
}

/// A named group of nodes.
///
/// Hubs own their nodes; removing a hub is the only way nodes leave the
/// graph. What happens to connections wired to those nodes is left to
/// callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hub {
    pub id: Id,
    pub kind: HubKind,
    #[serde(default)]
    pub nodes: Vec<Node>,
    pub name: Option<String>,
}

impl Hub {
    /// A hub under a caller-chosen identifier.
    pub fn new(id: impl Into<Id>, kind: HubKind) -> Self {
        Self {
            id: id.into(),
            kind,
            nodes: Vec::new(),
            name: None,
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_nodes(mut self, nodes: Vec<Node>) -> Self {
        self.nodes = nodes;
        self
    }

    pub fn node(&self, node_id: &Id) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == *node_id)
    }
}
