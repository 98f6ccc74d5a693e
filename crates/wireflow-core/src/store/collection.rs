// ── Generic reactive collection ──
//
// Ordered storage for one entity type with push-based change
// notification. The full snapshot lives inside the watch channel itself,
// so every read-modify-write runs atomically under the channel's lock
// and subscribers only ever observe complete snapshots.

use std::sync::Arc;

use tokio::sync::watch;

use crate::model::Id;

/// Entities stored in a [`Collection`] expose their identifier.
pub(crate) trait Keyed {
    fn key(&self) -> &Id;
}

pub(crate) struct Collection<T> {
    snapshot: watch::Sender<Arc<Vec<Arc<T>>>>,
}

impl<T: Keyed + Clone + Send + Sync + 'static> Collection<T> {
    pub(crate) fn new() -> Self {
        let (snapshot, _) = watch::channel(Arc::new(Vec::new()));
        Self { snapshot }
    }

    /// Replace the collection wholesale.
    pub(crate) fn set(&self, entities: Vec<T>) {
        let items: Vec<Arc<T>> = entities.into_iter().map(Arc::new).collect();
        self.snapshot.send_modify(|snap| *snap = Arc::new(items));
    }

    /// Append an entity unless one with the same identifier exists.
    /// Returns `false` on the duplicate no-op.
    pub(crate) fn add(&self, entity: T) -> bool {
        self.insert_if(entity, |_| true)
    }

    /// Atomic check-then-insert: append `entity` only when no entry with
    /// its identifier exists and `vacant` approves the current snapshot.
    pub(crate) fn insert_if<F>(&self, entity: T, vacant: F) -> bool
    where
        F: FnOnce(&[Arc<T>]) -> bool,
    {
        let mut inserted = false;
        self.snapshot.send_if_modified(|snap| {
            if snap.iter().any(|e| e.key() == entity.key()) || !vacant(snap) {
                return false;
            }
            let mut items = (**snap).clone();
            items.push(Arc::new(entity));
            *snap = Arc::new(items);
            inserted = true;
            true
        });
        inserted
    }

    /// Remove by identifier. Returns the removed entity if it existed.
    pub(crate) fn remove(&self, id: &Id) -> Option<Arc<T>> {
        let mut removed = None;
        self.snapshot.send_if_modified(|snap| {
            let Some(pos) = snap.iter().position(|e| e.key() == id) else {
                return false;
            };
            let mut items = (**snap).clone();
            removed = Some(items.remove(pos));
            *snap = Arc::new(items);
            true
        });
        removed
    }

    /// Replace the entry matching the entity's identifier, leaving the
    /// rest untouched. Silent no-op when nothing matches; returns
    /// whether a replacement happened.
    pub(crate) fn update(&self, entity: T) -> bool {
        let mut updated = false;
        self.snapshot.send_if_modified(|snap| {
            let Some(pos) = snap.iter().position(|e| e.key() == entity.key()) else {
                return false;
            };
            let mut items = (**snap).clone();
            items[pos] = Arc::new(entity);
            *snap = Arc::new(items);
            updated = true;
            true
        });
        updated
    }

    /// Apply an arbitrary atomic edit. The closure returns `Some` to
    /// commit the rewritten snapshot, `None` to leave the store as-is.
    pub(crate) fn mutate<R, F>(&self, f: F) -> Option<R>
    where
        F: FnOnce(&mut Vec<Arc<T>>) -> Option<R>,
    {
        let mut result = None;
        self.snapshot.send_if_modified(|snap| {
            let mut items = (**snap).clone();
            match f(&mut items) {
                Some(r) => {
                    result = Some(r);
                    *snap = Arc::new(items);
                    true
                }
                None => false,
            }
        });
        result
    }

    /// Remove all entries.
    pub(crate) fn clear(&self) {
        self.snapshot.send_modify(|snap| *snap = Arc::new(Vec::new()));
    }

    /// Point lookup by identifier.
    pub(crate) fn get(&self, id: &Id) -> Option<Arc<T>> {
        self.snapshot.borrow().iter().find(|e| e.key() == id).cloned()
    }

    /// The current snapshot (cheap `Arc` clone), in insertion order.
    pub(crate) fn snapshot(&self) -> Arc<Vec<Arc<T>>> {
        self.snapshot.borrow().clone()
    }

    /// Subscribe to snapshot changes.
    pub(crate) fn subscribe(&self) -> watch::Receiver<Arc<Vec<Arc<T>>>> {
        self.snapshot.subscribe()
    }

    pub(crate) fn len(&self) -> usize {
        self.snapshot.borrow().len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.snapshot.borrow().is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Entry {
        id: Id,
        value: u32,
    }

    impl Keyed for Entry {
        fn key(&self) -> &Id {
            &self.id
        }
    }

    fn entry(id: &str, value: u32) -> Entry {
        Entry {
            id: Id::from(id),
            value,
        }
    }

    #[test]
    fn add_is_idempotent_by_id() {
        let col: Collection<Entry> = Collection::new();
        assert!(col.add(entry("a", 1)));
        assert!(!col.add(entry("a", 2)));
        assert_eq!(col.len(), 1);
        assert_eq!(col.get(&Id::from("a")).unwrap().value, 1);
    }

    #[test]
    fn set_replaces_wholesale() {
        let col: Collection<Entry> = Collection::new();
        col.add(entry("a", 1));
        col.set(vec![entry("b", 2), entry("c", 3)]);
        assert!(col.get(&Id::from("a")).is_none());
        assert_eq!(col.len(), 2);
    }

    #[test]
    fn update_replaces_only_the_match() {
        let col: Collection<Entry> = Collection::new();
        col.add(entry("a", 1));
        col.add(entry("b", 2));
        assert!(col.update(entry("a", 10)));
        assert_eq!(col.get(&Id::from("a")).unwrap().value, 10);
        assert_eq!(col.get(&Id::from("b")).unwrap().value, 2);
    }

    #[test]
    fn update_is_a_silent_noop_without_match() {
        let col: Collection<Entry> = Collection::new();
        assert!(!col.update(entry("ghost", 1)));
        assert!(col.is_empty());
    }

    #[test]
    fn remove_filters_by_id() {
        let col: Collection<Entry> = Collection::new();
        col.add(entry("a", 1));
        let removed = col.remove(&Id::from("a")).unwrap();
        assert_eq!(removed.value, 1);
        assert!(col.is_empty());
        assert!(col.remove(&Id::from("a")).is_none());
    }

    #[test]
    fn insert_if_rejects_when_predicate_fails() {
        let col: Collection<Entry> = Collection::new();
        col.add(entry("a", 1));
        let inserted = col.insert_if(entry("b", 2), |items| {
            !items.iter().any(|e| e.value == 1)
        });
        assert!(!inserted);
        assert_eq!(col.len(), 1);
    }

    #[test]
    fn snapshot_preserves_insertion_order() {
        let col: Collection<Entry> = Collection::new();
        col.add(entry("a", 1));
        col.add(entry("b", 2));
        col.add(entry("c", 3));
        let snap = col.snapshot();
        let ids: Vec<&str> = snap.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, ["a", "b", "c"]);
    }

    #[tokio::test]
    async fn subscribers_observe_complete_snapshots() {
        let col: Collection<Entry> = Collection::new();
        let mut rx = col.subscribe();
        col.add(entry("a", 1));
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow().len(), 1);
    }
}
