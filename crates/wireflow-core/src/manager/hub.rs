// ── Hub manager ──
//
// Hub-level composition: installs the hub graph and provisions the I/O
// connectors every node needs before it can be wired.

use std::sync::Arc;

use tracing::info;

use crate::error::CoreError;
use crate::model::{ConnectorKind, Hub, HubKind, Id, Node};
use crate::store::HubStore;

use super::ConnectorManager;

#[derive(Clone)]
pub struct HubManager {
    hubs: Arc<HubStore>,
    connectors: ConnectorManager,
}

impl HubManager {
    pub(crate) fn new(hubs: Arc<HubStore>, connectors: ConnectorManager) -> Self {
        Self { hubs, connectors }
    }

    /// Replace the hub collection wholesale and provision one `request`
    /// and one `response` connector for every node in every hub.
    ///
    /// Single-shot initialization: call once at startup. Calling again
    /// replaces the previous graph and provisions fresh connectors for
    /// the new one.
    pub fn set_hubs(&self, hubs: Vec<Hub>) -> Result<(), CoreError> {
        let node_ids: Vec<Id> = hubs
            .iter()
            .flat_map(|h| h.nodes.iter().map(|n| n.id.clone()))
            .collect();

        info!(hubs = hubs.len(), nodes = node_ids.len(), "installing hub graph");
        self.hubs.set_hubs(hubs);

        for node_id in &node_ids {
            self.connectors
                .add_connector(node_id, ConnectorKind::Request, None)?;
            self.connectors
                .add_connector(node_id, ConnectorKind::Response, None)?;
        }
        Ok(())
    }

    /// Append a hub. Thin passthrough: no connectors are provisioned.
    pub fn add_hub(&self, hub: Hub) -> bool {
        self.hubs.add_hub(hub)
    }

    /// Remove a hub and the nodes it owns. Connections wired to those
    /// nodes are left to callers.
    pub fn remove_hub(&self, hub_id: &Id) -> Option<Arc<Hub>> {
        self.hubs.remove_hub(hub_id)
    }

    /// Find a node anywhere in the graph (flattened scan).
    pub fn node_by_id(&self, node_id: &Id) -> Option<Node> {
        self.hubs.node(node_id)
    }

    pub fn hub_by_id(&self, hub_id: &Id) -> Option<Arc<Hub>> {
        self.hubs.hub_by_id(hub_id)
    }

    /// All hubs of the given kind, in store order.
    pub fn hubs_by_kind(&self, kind: HubKind) -> Vec<Arc<Hub>> {
        self.hubs
            .snapshot()
            .iter()
            .filter(|h| h.kind == kind)
            .cloned()
            .collect()
    }

    /// All nodes from all hubs.
    pub fn nodes(&self) -> Vec<Node> {
        self.hubs.nodes()
    }

    /// The full hub snapshot.
    pub fn hubs(&self) -> Arc<Vec<Arc<Hub>>> {
        self.hubs.snapshot()
    }
}
