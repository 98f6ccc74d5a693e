// ── Node manager ──
//
// Structural mutations on individual nodes: attaching connectors while
// holding the one-connector-per-identifier invariant.

use std::sync::Arc;

use tracing::debug;

use crate::error::CoreError;
use crate::model::{Connector, Id};
use crate::store::HubStore;

#[derive(Clone)]
pub struct NodeManager {
    hubs: Arc<HubStore>,
}

impl NodeManager {
    pub(crate) fn new(hubs: Arc<HubStore>) -> Self {
        Self { hubs }
    }

    /// Attach `connector` to the node and persist the node through the
    /// hub store.
    ///
    /// Fails with [`CoreError::ConnectorExists`] when the node already
    /// owns a connector with that identifier, and with
    /// [`CoreError::NodeNotFound`] when the node does not resolve.
    /// Either way nothing is mutated on failure.
    pub fn add_connector_to_node(
        &self,
        node_id: &Id,
        connector: Connector,
    ) -> Result<(), CoreError> {
        let node = self
            .hubs
            .node(node_id)
            .ok_or_else(|| CoreError::NodeNotFound {
                id: node_id.clone(),
            })?;

        if node.has_connector(&connector.id) {
            return Err(CoreError::ConnectorExists {
                connector: connector.id,
                node: node_id.clone(),
            });
        }

        debug!(node = %node_id, connector = %connector.id, kind = %connector.kind, "attaching connector");
        self.hubs
            .with_node_mut(node_id, |n| n.connectors.push(connector));
        Ok(())
    }

    /// Whether the node owns a connector with the given identifier.
    pub fn has_connector(&self, node_id: &Id, connector_id: &Id) -> bool {
        self.hubs
            .node(node_id)
            .is_some_and(|n| n.has_connector(connector_id))
    }

    /// The node's connectors, in attachment order. Empty when the node
    /// does not resolve.
    pub fn node_connectors(&self, node_id: &Id) -> Vec<Connector> {
        self.hubs
            .node(node_id)
            .map(|n| n.connectors)
            .unwrap_or_default()
    }
}
