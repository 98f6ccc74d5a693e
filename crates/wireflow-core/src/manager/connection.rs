// ── Connection manager ──
//
// The orchestration core: creates a connection between two nodes,
// rejects duplicates, triggers request dispatch, and drives the terminal
// status transition. Together with the response manager's attach path,
// these are the only writers of connection state after creation.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::error::CoreError;
use crate::events::{DomainEvent, EventBus};
use crate::model::{
    Connection, ConnectionStatus, ExternalHandle, Id, Request, Response,
};
use crate::store::{ConnectionStore, HubStore};

use super::RequestManager;

#[derive(Clone)]
pub struct ConnectionManager {
    connections: Arc<ConnectionStore>,
    hubs: Arc<HubStore>,
    requests: RequestManager,
    bus: EventBus,
}

impl ConnectionManager {
    pub(crate) fn new(
        connections: Arc<ConnectionStore>,
        hubs: Arc<HubStore>,
        requests: RequestManager,
        bus: EventBus,
    ) -> Self {
        Self {
            connections,
            hubs,
            requests,
            bus,
        }
    }

    // ── Creation ─────────────────────────────────────────────────────

    /// Create a connection from `source` to `target` and dispatch its
    /// request.
    ///
    /// Fails with [`CoreError::DuplicateConnection`] -- touching nothing
    /// -- when a connection for exactly this pair already exists, even
    /// one whose request is still in flight. Otherwise the connection is
    /// registered PENDING, both sides' connectors are wired to the
    /// opposite node (best-effort: a node without connectors is left
    /// alone), `connectionCreated` fires, and the request dispatches.
    ///
    /// On dispatch success the connection completes with its response
    /// attached. On dispatch failure it is marked FAILED and the failure
    /// propagates; the FAILED record stays queryable in the store.
    pub async fn create_connection(
        &self,
        source_id: &Id,
        target_id: &Id,
    ) -> Result<Arc<Connection>, CoreError> {
        self.create_connection_with_draw(source_id, target_id, None)
            .await
    }

    /// Same as [`create_connection`](Self::create_connection), carrying
    /// an opaque drawing payload from the rendering layer.
    pub async fn create_connection_with_draw(
        &self,
        source_id: &Id,
        target_id: &Id,
        draw: Option<ExternalHandle>,
    ) -> Result<Arc<Connection>, CoreError> {
        let source = self
            .hubs
            .node(source_id)
            .ok_or_else(|| CoreError::NodeNotFound {
                id: source_id.clone(),
            })?;
        let target = self
            .hubs
            .node(target_id)
            .ok_or_else(|| CoreError::NodeNotFound {
                id: target_id.clone(),
            })?;

        // The source's request wins when both sides carry one.
        let request = source.request().or_else(|| target.request()).cloned();

        let connection = Connection {
            id: Id::connection(),
            source,
            target,
            status: ConnectionStatus::Pending,
            request,
            response: None,
            draw,
        };
        let id = connection.id.clone();

        // Check-then-insert is one atomic step inside the store; a
        // second caller racing on the same pair loses here.
        if !self.connections.insert_unique_pair(connection) {
            return Err(CoreError::DuplicateConnection {
                src: source_id.clone(),
                target: target_id.clone(),
            });
        }

        debug!(connection = %id, source = %source_id, target = %target_id, "connection registered");

        self.bind_connectors(source_id, target_id);
        self.refresh_endpoint_snapshots(&id, source_id, target_id);

        let created = self
            .connections
            .connection_by_id(&id)
            .ok_or_else(|| CoreError::ConnectionNotFound { id: id.clone() })?;
        self.bus
            .emit(DomainEvent::ConnectionCreated(Arc::clone(&created)));

        match self.requests.dispatch(&created).await {
            Ok(response) => self.update_connection_status(
                &id,
                ConnectionStatus::Completed,
                created.request.clone(),
                Some(response),
            ),
            Err(e) => {
                warn!(connection = %id, error = %e, "dispatch failed");
                if let Err(update_err) =
                    self.update_connection_status(&id, ConnectionStatus::Failed, None, None)
                {
                    warn!(connection = %id, error = %update_err, "failed to record FAILED status");
                }
                Err(e)
            }
        }
    }

    // ── Removal ──────────────────────────────────────────────────────

    /// Remove the connection owning the given connector (either
    /// endpoint's) and emit `connectionCancelled`.
    ///
    /// Fails with [`CoreError::ConnectionNotFound`] when no connection
    /// owns the connector.
    pub fn remove_connection(&self, connector_id: &Id) -> Result<Arc<Connection>, CoreError> {
        let connection = self.connection_by_connector(connector_id).ok_or_else(|| {
            CoreError::ConnectionNotFound {
                id: connector_id.clone(),
            }
        })?;

        self.connections.remove_connection(&connection.id);
        debug!(connection = %connection.id, connector = %connector_id, "connection removed");

        self.bus
            .emit(DomainEvent::ConnectionCancelled(Arc::clone(&connection)));
        Ok(connection)
    }

    // ── Mutation ─────────────────────────────────────────────────────

    /// Attach a response to a connection and broadcast the update.
    pub fn update_connection_response(
        &self,
        connection_id: &Id,
        response: Response,
    ) -> Result<Arc<Connection>, CoreError> {
        self.apply_update(connection_id, |conn| {
            conn.response = Some(response);
            Ok(())
        })
    }

    /// Drive the status transition, optionally (re)attaching the request
    /// and response involved.
    ///
    /// A connection transitions exactly once out of PENDING: once
    /// COMPLETED or FAILED, any different status fails with
    /// [`CoreError::InvalidTransition`].
    pub fn update_connection_status(
        &self,
        connection_id: &Id,
        status: ConnectionStatus,
        request: Option<Request>,
        response: Option<Response>,
    ) -> Result<Arc<Connection>, CoreError> {
        self.apply_update(connection_id, |conn| {
            if conn.status.is_terminal() && conn.status != status {
                return Err(CoreError::InvalidTransition {
                    connection: conn.id.clone(),
                    from: conn.status,
                    to: status,
                });
            }
            conn.status = status;
            if let Some(request) = request {
                conn.request = Some(request);
            }
            if let Some(response) = response {
                conn.response = Some(response);
            }
            Ok(())
        })
    }

    // ── Queries ──────────────────────────────────────────────────────

    /// The connection wired from `source` to `target`, if any. Exact
    /// match on both endpoint identifiers, first match in store order.
    pub fn connection_between(&self, source_id: &Id, target_id: &Id) -> Option<Arc<Connection>> {
        self.connections
            .snapshot()
            .iter()
            .find(|c| c.links(source_id, target_id))
            .cloned()
    }

    pub fn connection_by_id(&self, connection_id: &Id) -> Option<Arc<Connection>> {
        self.connections.connection_by_id(connection_id)
    }

    /// The connection owning the given connector, scanning both
    /// endpoints' connector sets.
    pub fn connection_by_connector(&self, connector_id: &Id) -> Option<Arc<Connection>> {
        self.connections
            .snapshot()
            .iter()
            .find(|c| c.owns_connector(connector_id))
            .cloned()
    }

    pub fn has_connection(&self, connection_id: &Id) -> bool {
        self.connections.connection_by_id(connection_id).is_some()
    }

    /// Snapshot of every connection, in store order.
    pub fn connections(&self) -> Arc<Vec<Arc<Connection>>> {
        self.connections.snapshot()
    }

    // ── Internals ────────────────────────────────────────────────────

    /// Fetch, mutate a copy, replace in the store, and broadcast
    /// `connectionUpdated`.
    fn apply_update(
        &self,
        connection_id: &Id,
        mutate: impl FnOnce(&mut Connection) -> Result<(), CoreError>,
    ) -> Result<Arc<Connection>, CoreError> {
        let current =
            self.connections
                .connection_by_id(connection_id)
                .ok_or_else(|| CoreError::ConnectionNotFound {
                    id: connection_id.clone(),
                })?;

        let mut updated = (*current).clone();
        mutate(&mut updated)?;
        self.connections.update_connection(updated);

        let connection =
            self.connections
                .connection_by_id(connection_id)
                .ok_or_else(|| CoreError::ConnectionNotFound {
                    id: connection_id.clone(),
                })?;
        self.bus
            .emit(DomainEvent::ConnectionUpdated(Arc::clone(&connection)));
        Ok(connection)
    }

    /// Point each side's connectors at the opposite node. Best-effort:
    /// nodes with no connectors are left unmodified.
    fn bind_connectors(&self, source_id: &Id, target_id: &Id) {
        self.hubs.with_node_mut(source_id, |node| {
            for connector in &mut node.connectors {
                connector.connected_to = Some(target_id.clone());
            }
        });
        self.hubs.with_node_mut(target_id, |node| {
            for connector in &mut node.connectors {
                connector.connected_to = Some(source_id.clone());
            }
        });
    }

    /// Re-snapshot the endpoints into the stored connection so queries
    /// see the wired connectors. Not an observable mutation: no event.
    fn refresh_endpoint_snapshots(&self, connection_id: &Id, source_id: &Id, target_id: &Id) {
        let Some(current) = self.connections.connection_by_id(connection_id) else {
            return;
        };
        let mut refreshed = (*current).clone();
        if let Some(node) = self.hubs.node(source_id) {
            refreshed.source = node;
        }
        if let Some(node) = self.hubs.node(target_id) {
            refreshed.target = node;
        }
        self.connections.update_connection(refreshed);
    }
}
