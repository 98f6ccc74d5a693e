// ── Hub store ──
//
// Single source of truth for the hub/node/connector graph. Nested node
// and connector updates rebuild the affected hub wholesale -- fine for
// the small graphs this models; a large graph would index nodes and
// connectors directly instead.

use std::sync::Arc;

use crate::model::{Connector, Hub, Id, Node};
use crate::stream::CollectionStream;

use super::collection::{Collection, Keyed};

impl Keyed for Hub {
    fn key(&self) -> &Id {
        &self.id
    }
}

pub struct HubStore {
    hubs: Collection<Hub>,
}

impl HubStore {
    pub fn new() -> Self {
        Self {
            hubs: Collection::new(),
        }
    }

    // ── Collection contract ──────────────────────────────────────────

    /// Replace the hub collection wholesale.
    pub fn set_hubs(&self, hubs: Vec<Hub>) {
        self.hubs.set(hubs);
    }

    /// Append a hub; no-op (returning `false`) if the id is taken.
    pub fn add_hub(&self, hub: Hub) -> bool {
        self.hubs.add(hub)
    }

    pub fn remove_hub(&self, hub_id: &Id) -> Option<Arc<Hub>> {
        self.hubs.remove(hub_id)
    }

    /// Replace a hub by identifier; silent no-op without a match.
    pub fn update_hub(&self, hub: Hub) -> bool {
        self.hubs.update(hub)
    }

    pub fn hub_by_id(&self, hub_id: &Id) -> Option<Arc<Hub>> {
        self.hubs.get(hub_id)
    }

    pub fn snapshot(&self) -> Arc<Vec<Arc<Hub>>> {
        self.hubs.snapshot()
    }

    pub fn subscribe(&self) -> CollectionStream<Hub> {
        CollectionStream::new(self.hubs.subscribe())
    }

    pub fn len(&self) -> usize {
        self.hubs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hubs.is_empty()
    }

    // ── Nested queries ───────────────────────────────────────────────

    /// Find a node anywhere in the graph (flattened scan).
    pub fn node(&self, node_id: &Id) -> Option<Node> {
        let snap = self.hubs.snapshot();
        snap.iter()
            .flat_map(|h| h.nodes.iter())
            .find(|n| n.id == *node_id)
            .cloned()
    }

    /// All nodes across all hubs, in store order.
    pub fn nodes(&self) -> Vec<Node> {
        let snap = self.hubs.snapshot();
        snap.iter().flat_map(|h| h.nodes.iter()).cloned().collect()
    }

    /// Find a connector anywhere in the graph.
    pub fn connector(&self, connector_id: &Id) -> Option<Connector> {
        let snap = self.hubs.snapshot();
        snap.iter()
            .flat_map(|h| h.nodes.iter())
            .flat_map(|n| n.connectors.iter())
            .find(|c| c.id == *connector_id)
            .cloned()
    }

    /// All connectors across all hubs' nodes, in store order.
    pub fn connectors(&self) -> Vec<Connector> {
        let snap = self.hubs.snapshot();
        snap.iter()
            .flat_map(|h| h.nodes.iter())
            .flat_map(|n| n.connectors.iter())
            .cloned()
            .collect()
    }

    // ── Nested mutations ─────────────────────────────────────────────

    /// Replace a single node in whichever hub owns it. Returns `false`
    /// when the node does not resolve.
    pub fn update_node(&self, node_id: &Id, node: Node) -> bool {
        self.with_node_mut(node_id, |slot| *slot = node).is_some()
    }

    /// Atomically edit a single node in place.
    pub(crate) fn with_node_mut<R>(
        &self,
        node_id: &Id,
        f: impl FnOnce(&mut Node) -> R,
    ) -> Option<R> {
        self.hubs.mutate(|hubs| {
            let hub_pos = hubs
                .iter()
                .position(|h| h.nodes.iter().any(|n| n.id == *node_id))?;
            let mut hub = (*hubs[hub_pos]).clone();
            let node = hub.nodes.iter_mut().find(|n| n.id == *node_id)?;
            let result = f(node);
            hubs[hub_pos] = Arc::new(hub);
            Some(result)
        })
    }

    /// Replace a single connector wherever it lives, rebuilding the
    /// owning hub. Returns `false` when the connector does not resolve.
    pub fn update_connector(&self, connector_id: &Id, connector: Connector) -> bool {
        self.hubs
            .mutate(move |hubs| {
                let hub_pos = hubs
                    .iter()
                    .position(|h| h.nodes.iter().any(|n| n.has_connector(connector_id)))?;
                let mut hub = (*hubs[hub_pos]).clone();
                let slot = hub
                    .nodes
                    .iter_mut()
                    .flat_map(|n| n.connectors.iter_mut())
                    .find(|c| c.id == *connector_id)?;
                *slot = connector;
                hubs[hub_pos] = Arc::new(hub);
                Some(())
            })
            .is_some()
    }
}

impl Default for HubStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::{ConnectorKind, HubKind, Node, Request};

    fn store_with_one_action_node() -> (HubStore, Id) {
        let node = Node::action(Request::new("GET", "/users"));
        let node_id = node.id.clone();
        let hub = Hub::new("hub-1", HubKind::Client).with_nodes(vec![node]);
        let store = HubStore::new();
        store.set_hubs(vec![hub]);
        (store, node_id)
    }

    fn connector_for(node_id: &Id) -> Connector {
        Connector {
            id: Id::connector(),
            parent_node: node_id.clone(),
            kind: ConnectorKind::Request,
            element: None,
            connected_to: None,
        }
    }

    #[test]
    fn node_lookup_scans_all_hubs() {
        let (store, node_id) = store_with_one_action_node();
        assert!(store.node(&node_id).is_some());
        assert!(store.node(&Id::from("node-missing00")).is_none());
    }

    #[test]
    fn update_node_replaces_in_owning_hub() {
        let (store, node_id) = store_with_one_action_node();
        let mut node = store.node(&node_id).unwrap();
        node.connectors.push(connector_for(&node_id));

        assert!(store.update_node(&node_id, node));
        assert_eq!(store.node(&node_id).unwrap().connectors.len(), 1);
    }

    #[test]
    fn update_connector_rebuilds_the_graph() {
        let (store, node_id) = store_with_one_action_node();
        let connector = connector_for(&node_id);
        let connector_id = connector.id.clone();
        store.with_node_mut(&node_id, |n| n.connectors.push(connector));

        let mut updated = store.connector(&connector_id).unwrap();
        updated.connected_to = Some(Id::from("node-opposite"));
        assert!(store.update_connector(&connector_id, updated));

        let connected = store.connector(&connector_id).unwrap().connected_to;
        assert_eq!(connected, Some(Id::from("node-opposite")));
    }

    #[test]
    fn update_hub_replaces_by_id() {
        let (store, _) = store_with_one_action_node();
        let mut hub = (*store.hub_by_id(&Id::from("hub-1")).unwrap()).clone();
        hub.name = Some("renamed".into());

        assert!(store.update_hub(hub));
        assert_eq!(
            store.hub_by_id(&Id::from("hub-1")).unwrap().name.as_deref(),
            Some("renamed")
        );
    }

    #[test]
    fn connectors_flatten_across_nodes() {
        let (store, node_id) = store_with_one_action_node();
        store.with_node_mut(&node_id, |n| {
            let connector = connector_for(&n.id);
            n.connectors.push(connector);
        });
        assert_eq!(store.connectors().len(), 1);
    }
}
