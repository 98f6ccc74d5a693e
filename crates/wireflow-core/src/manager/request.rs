// ── Request manager ──
//
// Translates a connection's request descriptor into an outbound HTTP
// call against the configured server settings, measures latency, and
// maps the outcome to a response record either way.

use std::sync::Arc;
use std::time::Instant;

use tracing::debug;

use wireflow_transport::{Transport, TransportRequest};

use crate::config::SettingsHandle;
use crate::error::CoreError;
use crate::model::{Connection, Response, ResponseDraft};

use super::ResponseManager;

#[derive(Clone)]
pub struct RequestManager {
    settings: SettingsHandle,
    transport: Arc<dyn Transport>,
    responses: ResponseManager,
}

impl RequestManager {
    pub(crate) fn new(
        settings: SettingsHandle,
        transport: Arc<dyn Transport>,
        responses: ResponseManager,
    ) -> Self {
        Self {
            settings,
            transport,
            responses,
        }
    }

    /// Dispatch the connection's request and record the outcome.
    ///
    /// Fails with [`CoreError::ConfigMissing`] before any network I/O
    /// when no settings are installed, and with
    /// [`CoreError::RequestMissing`] when neither endpoint carries a
    /// request descriptor (the source's wins when both do).
    ///
    /// On success the captured response is recorded through the response
    /// manager and returned. On transport failure a response documenting
    /// the failure (the error's status or `0`, its message, zero elapsed
    /// time) is still recorded, then the failure propagates to the
    /// caller.
    pub async fn dispatch(&self, connection: &Connection) -> Result<Response, CoreError> {
        let settings = self.settings.get().ok_or(CoreError::ConfigMissing)?;

        let request = connection
            .source
            .request()
            .or_else(|| connection.target.request())
            .ok_or_else(|| CoreError::RequestMissing {
                connection: connection.id.clone(),
            })?;

        let url = format!("{}{}", settings.server.base_url(), request.endpoint);
        debug!(connection = %connection.id, method = %request.method, url = %url, "dispatching");

        let outbound = TransportRequest {
            method: request.method.clone(),
            url,
            headers: request.headers.clone(),
            body: request.body.clone(),
        };

        let start = Instant::now();
        match self.transport.dispatch(outbound).await {
            Ok(answer) => {
                let draft = ResponseDraft {
                    id: None,
                    status: Some(answer.status),
                    status_text: Some(answer.status_text),
                    response_time_ms: Some(elapsed_ms(start)),
                    headers: Some(answer.headers),
                    body: answer.body,
                };
                let response = self.responses.add_response(connection, draft)?;
                Ok((*response).clone())
            }
            Err(e) => {
                let draft = ResponseDraft {
                    status: e.status(),
                    status_text: Some(e.to_string()),
                    response_time_ms: Some(0),
                    ..ResponseDraft::default()
                };
                // Bookkeeping first, then re-raise the original failure.
                self.responses.add_response(connection, draft)?;
                Err(e.into())
            }
        }
    }
}

fn elapsed_ms(start: Instant) -> u64 {
    u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX)
}
