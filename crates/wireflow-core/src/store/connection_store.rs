// ── Connection store ──
//
// Canonical holder of all connections. Duplicate-pair rejection happens
// here, inside one atomic check-then-insert, so a second caller racing
// on the same node pair loses even while the first request is in flight.

use std::sync::Arc;

use crate::model::{Connection, Id};
use crate::stream::CollectionStream;

use super::collection::{Collection, Keyed};

impl Keyed for Connection {
    fn key(&self) -> &Id {
        &self.id
    }
}

pub struct ConnectionStore {
    connections: Collection<Connection>,
}

impl ConnectionStore {
    pub fn new() -> Self {
        Self {
            connections: Collection::new(),
        }
    }

    /// Replace the connection collection wholesale.
    pub fn set_connections(&self, connections: Vec<Connection>) {
        self.connections.set(connections);
    }

    /// Append a connection; no-op (returning `false`) if the id is taken.
    pub fn add_connection(&self, connection: Connection) -> bool {
        self.connections.add(connection)
    }

    /// Atomic compare-and-insert: append only when no connection with
    /// the same identifier or the same `(source, target)` pair exists.
    pub fn insert_unique_pair(&self, connection: Connection) -> bool {
        let source = connection.source.id.clone();
        let target = connection.target.id.clone();
        self.connections.insert_if(connection, move |existing| {
            !existing.iter().any(|c| c.links(&source, &target))
        })
    }

    pub fn remove_connection(&self, connection_id: &Id) -> Option<Arc<Connection>> {
        self.connections.remove(connection_id)
    }

    /// Replace a connection by identifier; silent no-op without a match.
    pub fn update_connection(&self, connection: Connection) -> bool {
        self.connections.update(connection)
    }

    pub fn connection_by_id(&self, connection_id: &Id) -> Option<Arc<Connection>> {
        self.connections.get(connection_id)
    }

    pub fn snapshot(&self) -> Arc<Vec<Arc<Connection>>> {
        self.connections.snapshot()
    }

    pub fn subscribe(&self) -> CollectionStream<Connection> {
        CollectionStream::new(self.connections.subscribe())
    }

    pub fn len(&self) -> usize {
        self.connections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }
}

impl Default for ConnectionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::{ConnectionStatus, Node, Request};

    fn connection_between(source: &Node, target: &Node) -> Connection {
        Connection {
            id: Id::connection(),
            source: source.clone(),
            target: target.clone(),
            status: ConnectionStatus::Pending,
            request: None,
            response: None,
            draw: None,
        }
    }

    #[test]
    fn second_insert_for_same_pair_is_rejected() {
        let store = ConnectionStore::new();
        let source = Node::action(Request::new("GET", "/users"));
        let target = Node::endpoint("https://api.example.com");

        assert!(store.insert_unique_pair(connection_between(&source, &target)));
        assert!(!store.insert_unique_pair(connection_between(&source, &target)));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn reverse_direction_is_a_distinct_pair() {
        let store = ConnectionStore::new();
        let source = Node::action(Request::new("GET", "/users"));
        let target = Node::endpoint("https://api.example.com");

        assert!(store.insert_unique_pair(connection_between(&source, &target)));
        assert!(store.insert_unique_pair(connection_between(&target, &source)));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn pair_becomes_available_again_after_removal() {
        let store = ConnectionStore::new();
        let source = Node::action(Request::new("GET", "/users"));
        let target = Node::endpoint("https://api.example.com");

        let first = connection_between(&source, &target);
        let first_id = first.id.clone();
        store.insert_unique_pair(first);
        store.remove_connection(&first_id);

        assert!(store.insert_unique_pair(connection_between(&source, &target)));
    }
}
