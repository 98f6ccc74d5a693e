// ── Connector manager ──
//
// Allocates connector identifiers, attaches connectors through the node
// manager, and answers type- and node-filtered queries over the full
// connector set.

use std::sync::Arc;

use crate::error::CoreError;
use crate::model::{Connector, ConnectorKind, ExternalHandle, Id};
use crate::store::HubStore;

use super::NodeManager;

#[derive(Clone)]
pub struct ConnectorManager {
    hubs: Arc<HubStore>,
    nodes: NodeManager,
}

impl ConnectorManager {
    pub(crate) fn new(hubs: Arc<HubStore>, nodes: NodeManager) -> Self {
        Self { hubs, nodes }
    }

    /// Allocate and attach a connector of `kind` to the node.
    ///
    /// The element handle stays empty until the rendering layer
    /// registers one. Fails with [`CoreError::NodeNotFound`] when the
    /// node does not resolve.
    pub fn add_connector(
        &self,
        node_id: &Id,
        kind: ConnectorKind,
        element: Option<ExternalHandle>,
    ) -> Result<Connector, CoreError> {
        if self.hubs.node(node_id).is_none() {
            return Err(CoreError::NodeNotFound {
                id: node_id.clone(),
            });
        }

        let connector = Connector {
            id: Id::connector(),
            parent_node: node_id.clone(),
            kind,
            element,
            connected_to: None,
        };

        self.nodes
            .add_connector_to_node(node_id, connector.clone())?;
        Ok(connector)
    }

    /// Late-bind the rendering layer's element handle to a connector.
    pub fn register_element(
        &self,
        connector_id: &Id,
        element: Option<ExternalHandle>,
    ) -> Result<(), CoreError> {
        let mut connector =
            self.hubs
                .connector(connector_id)
                .ok_or_else(|| CoreError::ConnectorNotFound {
                    id: connector_id.clone(),
                })?;
        connector.element = element;
        self.hubs.update_connector(connector_id, connector);
        Ok(())
    }

    /// Snapshot of a single connector.
    pub fn connector_by_id(&self, connector_id: &Id) -> Option<Connector> {
        self.hubs.connector(connector_id)
    }

    /// All connectors of the given kind, across every node.
    pub fn connectors_by_kind(&self, kind: ConnectorKind) -> Vec<Connector> {
        self.hubs
            .connectors()
            .into_iter()
            .filter(|c| c.kind == kind)
            .collect()
    }

    /// All connectors owned by the given node.
    pub fn connectors_by_node(&self, node_id: &Id) -> Vec<Connector> {
        self.hubs
            .connectors()
            .into_iter()
            .filter(|c| c.parent_node == *node_id)
            .collect()
    }

    /// Every connector in the graph, flattened in store order.
    pub fn connectors(&self) -> Vec<Connector> {
        self.hubs.connectors()
    }
}
