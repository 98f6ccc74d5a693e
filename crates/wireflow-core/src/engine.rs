// ── Engine ──
//
// Constructs every store, the event bus, the settings cell, and the
// managers exactly once and wires them together. Cheaply cloneable via
// `Arc<EngineInner>`; all state is per-instance, so every test gets a
// fully isolated engine.

use std::sync::Arc;

use tokio::sync::broadcast;

use wireflow_transport::Transport;

use crate::config::{Settings, SettingsHandle};
use crate::events::{DomainEvent, EventBus};
use crate::manager::{
    ConnectionManager, ConnectorManager, HubManager, NodeManager, RequestManager, ResponseManager,
};
use crate::model::{Connection, Hub, Response};
use crate::store::{ConnectionStore, HubStore, ResponseStore};
use crate::stream::CollectionStream;

/// The main entry point for consumers.
///
/// Owns the canonical stores and the managers operating on them. Clone
/// freely -- clones share the same state.
#[derive(Clone)]
pub struct Engine {
    inner: Arc<EngineInner>,
}

struct EngineInner {
    hub_store: Arc<HubStore>,
    connection_store: Arc<ConnectionStore>,
    response_store: Arc<ResponseStore>,
    bus: EventBus,
    settings: SettingsHandle,
    nodes: NodeManager,
    connectors: ConnectorManager,
    hubs: HubManager,
    responses: ResponseManager,
    requests: RequestManager,
    connections: ConnectionManager,
}

impl Engine {
    /// Build an engine around the given transport.
    ///
    /// Settings start empty; install them through
    /// [`settings()`](Self::settings) before the first dispatch.
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        let hub_store = Arc::new(HubStore::new());
        let connection_store = Arc::new(ConnectionStore::new());
        let response_store = Arc::new(ResponseStore::new());
        let bus = EventBus::new();
        let settings = SettingsHandle::new();

        let nodes = NodeManager::new(Arc::clone(&hub_store));
        let connectors = ConnectorManager::new(Arc::clone(&hub_store), nodes.clone());
        let hubs = HubManager::new(Arc::clone(&hub_store), connectors.clone());
        let responses = ResponseManager::new(
            Arc::clone(&response_store),
            Arc::clone(&connection_store),
            bus.clone(),
        );
        let requests = RequestManager::new(settings.clone(), transport, responses.clone());
        let connections = ConnectionManager::new(
            Arc::clone(&connection_store),
            Arc::clone(&hub_store),
            requests.clone(),
            bus.clone(),
        );

        Self {
            inner: Arc::new(EngineInner {
                hub_store,
                connection_store,
                response_store,
                bus,
                settings,
                nodes,
                connectors,
                hubs,
                responses,
                requests,
                connections,
            }),
        }
    }

    /// Build an engine with settings already installed.
    pub fn with_settings(transport: Arc<dyn Transport>, settings: Settings) -> Self {
        let engine = Self::new(transport);
        engine.settings().set(settings);
        engine
    }

    // ── Components ───────────────────────────────────────────────────

    pub fn hubs(&self) -> &HubManager {
        &self.inner.hubs
    }

    pub fn nodes(&self) -> &NodeManager {
        &self.inner.nodes
    }

    pub fn connectors(&self) -> &ConnectorManager {
        &self.inner.connectors
    }

    pub fn connections(&self) -> &ConnectionManager {
        &self.inner.connections
    }

    pub fn requests(&self) -> &RequestManager {
        &self.inner.requests
    }

    pub fn responses(&self) -> &ResponseManager {
        &self.inner.responses
    }

    /// The live settings cell.
    pub fn settings(&self) -> &SettingsHandle {
        &self.inner.settings
    }

    // ── Stores ───────────────────────────────────────────────────────

    pub fn hub_store(&self) -> &Arc<HubStore> {
        &self.inner.hub_store
    }

    pub fn connection_store(&self) -> &Arc<ConnectionStore> {
        &self.inner.connection_store
    }

    pub fn response_store(&self) -> &Arc<ResponseStore> {
        &self.inner.response_store
    }

    // ── Observation ──────────────────────────────────────────────────

    /// Subscribe to the domain event stream.
    pub fn events(&self) -> broadcast::Receiver<Arc<DomainEvent>> {
        self.inner.bus.subscribe()
    }

    /// Subscribe to hub collection changes.
    pub fn hub_stream(&self) -> CollectionStream<Hub> {
        self.inner.hub_store.subscribe()
    }

    /// Subscribe to connection collection changes.
    pub fn connection_stream(&self) -> CollectionStream<Connection> {
        self.inner.connection_store.subscribe()
    }

    /// Subscribe to response collection changes.
    pub fn response_stream(&self) -> CollectionStream<Response> {
        self.inner.response_store.subscribe()
    }
}
