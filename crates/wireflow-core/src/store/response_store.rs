// ── Response store ──

use std::sync::Arc;

use crate::model::{Id, Response};
use crate::stream::CollectionStream;

use super::collection::{Collection, Keyed};

impl Keyed for Response {
    fn key(&self) -> &Id {
        &self.id
    }
}

/// Canonical holder of all captured responses.
///
/// Insertion is idempotent by identifier: a response whose id is already
/// present is dropped silently.
pub struct ResponseStore {
    responses: Collection<Response>,
}

impl ResponseStore {
    pub fn new() -> Self {
        Self {
            responses: Collection::new(),
        }
    }

    /// Replace the response collection wholesale.
    pub fn set_responses(&self, responses: Vec<Response>) {
        self.responses.set(responses);
    }

    /// Append a response; no-op (returning `false`) if the id is taken.
    pub fn add_response(&self, response: Response) -> bool {
        self.responses.add(response)
    }

    pub fn remove_response(&self, response_id: &Id) -> Option<Arc<Response>> {
        self.responses.remove(response_id)
    }

    /// Replace a response by identifier; silent no-op without a match.
    pub fn update_response(&self, response: Response) -> bool {
        self.responses.update(response)
    }

    /// Drop every stored response.
    pub fn clear(&self) {
        self.responses.clear();
    }

    pub fn response_by_id(&self, response_id: &Id) -> Option<Arc<Response>> {
        self.responses.get(response_id)
    }

    pub fn snapshot(&self) -> Arc<Vec<Arc<Response>>> {
        self.responses.snapshot()
    }

    pub fn subscribe(&self) -> CollectionStream<Response> {
        CollectionStream::new(self.responses.subscribe())
    }

    pub fn len(&self) -> usize {
        self.responses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.responses.is_empty()
    }
}

impl Default for ResponseStore {
    fn default() -> Self {
        Self::new()
    }
}
