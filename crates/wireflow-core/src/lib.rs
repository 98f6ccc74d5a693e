// wireflow-core: node graph and connection orchestration.
//
// Models a directed graph of interactive API nodes grouped into hubs and
// manages the lifecycle of a connection drawn between two of them:
// validation, HTTP dispatch through wireflow-transport, response capture,
// and consistent fan-out to reactive stores and event subscribers.

pub mod config;
pub mod engine;
pub mod error;
pub mod events;
pub mod manager;
pub mod model;
pub mod store;
pub mod stream;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{ClientSettings, ServerSettings, Settings, SettingsHandle};
pub use engine::Engine;
pub use error::CoreError;
pub use events::{DomainEvent, EventBus};
pub use manager::{
    ConnectionManager, ConnectorManager, HubManager, NodeManager, RequestManager, ResponseManager,
};
pub use store::{ConnectionStore, HubStore, ResponseStore};
pub use stream::{CollectionStream, CollectionWatchStream};

// Re-export model types at the crate root for ergonomics.
pub use model::{
    Connection, ConnectionStatus, Connector, ConnectorKind, ExternalHandle, Hub, HubKind, Id,
    Node, NodeKind, Request, Response, ResponseDraft,
};

// Re-export the transport contract so embedders can implement stubs
// without a direct wireflow-transport dependency.
pub use wireflow_transport::{Transport, TransportError, TransportRequest, TransportResponse};
