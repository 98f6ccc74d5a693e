// ── Core error types ──
//
// User-facing errors from wireflow-core. Transport failures are wrapped,
// not exposed raw: the `From<TransportError>` impl translates the
// network layer's errors into the one variant callers handle.

use thiserror::Error;

use wireflow_transport::TransportError;

use crate::model::{ConnectionStatus, Id};

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection lifecycle ─────────────────────────────────────────
    /// Creation attempted for an already-wired pair. Recoverable; no
    /// state was touched.
    #[error("A connection already exists between {src} and {target}")]
    DuplicateConnection { src: Id, target: Id },

    #[error("Connection not found: {id}")]
    ConnectionNotFound { id: Id },

    /// A terminal status can never change again.
    #[error("Connection {connection} is already {from} and cannot become {to}")]
    InvalidTransition {
        connection: Id,
        from: ConnectionStatus,
        to: ConnectionStatus,
    },

    // ── Graph lookups ────────────────────────────────────────────────
    #[error("Node not found: {id}")]
    NodeNotFound { id: Id },

    #[error("Connector {connector} already exists on node {node}")]
    ConnectorExists { connector: Id, node: Id },

    #[error("Connector not found: {id}")]
    ConnectorNotFound { id: Id },

    // ── Dispatch ─────────────────────────────────────────────────────
    /// No runtime settings installed; aborted before any network I/O.
    #[error("Runtime settings are not configured")]
    ConfigMissing,

    /// Neither endpoint of the connection carries a request descriptor.
    #[error("Connection {connection} has no request descriptor to dispatch")]
    RequestMissing { connection: Id },

    /// The transport rejected the dispatch. A response documenting the
    /// failure was still recorded and the connection marked FAILED.
    #[error("Request failed: {message}")]
    RequestFailed {
        status: Option<u16>,
        message: String,
        #[source]
        source: TransportError,
    },
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<TransportError> for CoreError {
    fn from(err: TransportError) -> Self {
        Self::RequestFailed {
            status: err.status(),
            message: err.to_string(),
            source: err,
        }
    }
}
