// ── Canonical reactive stores ──
//
// One store per entity collection. Each holds its collection as an
// observable current value: point queries return snapshots, mutations
// commit atomically and notify subscribers.

mod collection;
mod connection_store;
mod hub_store;
mod response_store;

pub use connection_store::ConnectionStore;
pub use hub_store::HubStore;
pub use response_store::ResponseStore;
