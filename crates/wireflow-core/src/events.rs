// ── Domain event bus ──
//
// Decouples state mutation from interested observers (rendering,
// logging, anything downstream). Managers publish; anyone with an engine
// handle subscribes.

use std::sync::Arc;

use tokio::sync::broadcast;
use tracing::trace;

use crate::model::{Connection, Response};

const EVENT_CHANNEL_SIZE: usize = 256;

/// Named domain events published by the managers.
#[derive(Debug, Clone)]
pub enum DomainEvent {
    /// A connection was registered (emitted once, while still PENDING).
    ConnectionCreated(Arc<Connection>),
    /// A connection's status or response changed.
    ConnectionUpdated(Arc<Connection>),
    /// A connection was removed.
    ConnectionCancelled(Arc<Connection>),
    /// A response was recorded for a connection.
    ResponseReceived {
        connection: Arc<Connection>,
        response: Arc<Response>,
    },
}

impl DomainEvent {
    /// The wire-level event name observers subscribe by.
    pub fn name(&self) -> &'static str {
        match self {
            Self::ConnectionCreated(_) => "connectionCreated",
            Self::ConnectionUpdated(_) => "connectionUpdated",
            Self::ConnectionCancelled(_) => "connectionCancelled",
            Self::ResponseReceived { .. } => "responseReceived",
        }
    }
}

/// Publish/subscribe channel for domain events.
///
/// Emission never blocks and never fails: events published with no
/// subscribers are dropped, and a receiver subscribed mid-stream only
/// observes later events. Each subscriber sees events in emission order.
#[derive(Clone)]
pub struct EventBus {
    tx: broadcast::Sender<Arc<DomainEvent>>,
}

impl EventBus {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(EVENT_CHANNEL_SIZE);
        Self { tx }
    }

    /// Publish an event to all current subscribers.
    pub fn emit(&self, event: DomainEvent) {
        trace!(event = event.name(), "emitting domain event");
        let _ = self.tx.send(Arc::new(event));
    }

    /// Subscribe to all events emitted from this point on. Dropping the
    /// receiver unsubscribes.
    pub fn subscribe(&self) -> broadcast::Receiver<Arc<DomainEvent>> {
        self.tx.subscribe()
    }

    /// One-shot subscription: wait for the next event with the given
    /// name, skipping others. Returns `None` if the bus shuts down
    /// first.
    pub async fn once(&self, name: &str) -> Option<Arc<DomainEvent>> {
        let mut rx = self.subscribe();
        loop {
            match rx.recv().await {
                Ok(event) if event.name() == name => return Some(event),
                Ok(_) | Err(broadcast::error::RecvError::Lagged(_)) => {}
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::{Connection, ConnectionStatus, Id, Node, Request};

    fn sample_connection() -> Arc<Connection> {
        Arc::new(Connection {
            id: Id::connection(),
            source: Node::action(Request::new("GET", "/ping")),
            target: Node::endpoint("https://api.example.com"),
            status: ConnectionStatus::Pending,
            request: None,
            response: None,
            draw: None,
        })
    }

    #[tokio::test]
    async fn subscribers_see_events_in_emission_order() {
        let bus = EventBus::new();
        let mut rx = bus.subscribe();

        bus.emit(DomainEvent::ConnectionCreated(sample_connection()));
        bus.emit(DomainEvent::ConnectionCancelled(sample_connection()));

        assert_eq!(rx.recv().await.unwrap().name(), "connectionCreated");
        assert_eq!(rx.recv().await.unwrap().name(), "connectionCancelled");
    }

    #[test]
    fn emit_without_subscribers_is_fine() {
        let bus = EventBus::new();
        bus.emit(DomainEvent::ConnectionCreated(sample_connection()));
    }

    #[tokio::test]
    async fn once_skips_events_with_other_names() {
        let bus = EventBus::new();
        let waiter = {
            let bus = bus.clone();
            tokio::spawn(async move { bus.once("connectionCancelled").await })
        };
        tokio::task::yield_now().await;

        bus.emit(DomainEvent::ConnectionCreated(sample_connection()));
        bus.emit(DomainEvent::ConnectionCancelled(sample_connection()));

        let event = waiter.await.unwrap().unwrap();
        assert_eq!(event.name(), "connectionCancelled");
    }

    #[tokio::test]
    async fn late_subscribers_miss_earlier_events() {
        let bus = EventBus::new();
        bus.emit(DomainEvent::ConnectionCreated(sample_connection()));

        let mut rx = bus.subscribe();
        bus.emit(DomainEvent::ConnectionCancelled(sample_connection()));

        assert_eq!(rx.recv().await.unwrap().name(), "connectionCancelled");
        assert!(rx.try_recv().is_err());
    }
}
