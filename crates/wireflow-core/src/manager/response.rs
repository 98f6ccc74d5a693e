// ── Response manager ──
//
// The single writer of response records: deduplicates by identifier,
// normalizes partial data, attaches the response to its connection, and
// broadcasts `responseReceived`.

use std::sync::Arc;

use tracing::debug;

use crate::error::CoreError;
use crate::events::{DomainEvent, EventBus};
use crate::model::{Connection, Id, Response, ResponseDraft};
use crate::store::{ConnectionStore, ResponseStore};

#[derive(Clone)]
pub struct ResponseManager {
    responses: Arc<ResponseStore>,
    connections: Arc<ConnectionStore>,
    bus: EventBus,
}

impl ResponseManager {
    pub(crate) fn new(
        responses: Arc<ResponseStore>,
        connections: Arc<ConnectionStore>,
        bus: EventBus,
    ) -> Self {
        Self {
            responses,
            connections,
            bus,
        }
    }

    /// Normalize and record a response for `connection`.
    ///
    /// Insertion is idempotent: when the draft names an identifier that
    /// is already stored, nothing is mutated and no event fires -- the
    /// existing record is returned. The duplicate check runs against the
    /// incoming identifier, before any defaulting. Otherwise the missing
    /// fields are defaulted, the owning connection's response field is
    /// updated, the record lands in the response store, and
    /// `responseReceived` fires with both.
    pub fn add_response(
        &self,
        connection: &Connection,
        draft: ResponseDraft,
    ) -> Result<Arc<Response>, CoreError> {
        if let Some(id) = &draft.id {
            if let Some(existing) = self.responses.response_by_id(id) {
                return Ok(existing);
            }
        }

        let id = draft.id.clone().unwrap_or_else(Id::response);
        let response = draft.into_response(id);

        // Attach to the owning connection first so store observers see
        // the response in place before the record itself lands.
        let updated = self.attach_to_connection(&connection.id, response.clone())?;

        self.responses.add_response(response.clone());
        let response = Arc::new(response);

        debug!(
            connection = %connection.id,
            response = %response.id,
            status = response.status,
            "response recorded"
        );

        self.bus.emit(DomainEvent::ResponseReceived {
            connection: updated,
            response: Arc::clone(&response),
        });

        Ok(response)
    }

    /// Point lookup by response identifier.
    pub fn response_by_id(&self, response_id: &Id) -> Option<Arc<Response>> {
        self.responses.response_by_id(response_id)
    }

    /// Snapshot of every stored response.
    pub fn responses(&self) -> Arc<Vec<Arc<Response>>> {
        self.responses.snapshot()
    }

    /// Set the connection's response field and broadcast the update.
    fn attach_to_connection(
        &self,
        connection_id: &Id,
        response: Response,
    ) -> Result<Arc<Connection>, CoreError> {
        let current =
            self.connections
                .connection_by_id(connection_id)
                .ok_or_else(|| CoreError::ConnectionNotFound {
                    id: connection_id.clone(),
                })?;

        let mut updated = (*current).clone();
        updated.response = Some(response);
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
}
