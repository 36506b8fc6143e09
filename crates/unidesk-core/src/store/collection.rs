// ── Generic reactive entity collection ──
//
// An ordered container whose whole content lives in a `watch` channel.
// Readers borrow an `Arc` snapshot; writers build the next vector and
// swap it in with one `send_modify`, so nobody ever sees half a refresh.

use std::sync::Arc;

use tokio::sync::watch;

use crate::model::Record;

/// A reactive, ordered collection for a single record type.
///
/// Order is the backend's list order; merges append at the end. Every
/// mutation bumps a version counter and publishes a new snapshot.
pub(crate) struct EntityCollection<T: Record> {
    /// Version counter, bumped on every mutation.
    version: watch::Sender<u64>,

    /// Full snapshot, swapped on mutation.
    snapshot: watch::Sender<Arc<Vec<Arc<T>>>>,
}

impl<T: Record> EntityCollection<T> {
    pub(crate) fn new() -> Self {
        let (version, _) = watch::channel(0u64);
        let (snapshot, _) = watch::channel(Arc::new(Vec::new()));

        Self { version, snapshot }
    }

    /// Replace the whole content in one swap.
    pub(crate) fn replace(&self, items: Vec<T>) {
        let next: Vec<Arc<T>> = items.into_iter().map(Arc::new).collect();
        self.publish(next);
    }

    /// Insert or replace in place by id. Returns `true` if the id was new.
    pub(crate) fn upsert(&self, entity: T) -> bool {
        let id = entity.id();
        let mut next: Vec<Arc<T>> = self.snapshot().iter().cloned().collect();
        let is_new = match next.iter().position(|e| e.id() == id) {
            Some(pos) => {
                next[pos] = Arc::new(entity);
                false
            }
            None => {
                next.push(Arc::new(entity));
                true
            }
        };
        self.publish(next);
        is_new
    }

    /// Remove the element with this id. Returns it if it existed.
    pub(crate) fn remove(&self, id: T::Id) -> Option<Arc<T>> {
        let current = self.snapshot();
        let pos = current.iter().position(|e| e.id() == id)?;
        let removed = Arc::clone(&current[pos]);
        let next: Vec<Arc<T>> = current
            .iter()
            .filter(|e| e.id() != id)
            .cloned()
            .collect();
        self.publish(next);
        Some(removed)
    }

    pub(crate) fn get(&self, id: T::Id) -> Option<Arc<T>> {
        self.snapshot.borrow().iter().find(|e| e.id() == id).cloned()
    }

    /// Get the current snapshot (cheap `Arc` clone).
    pub(crate) fn snapshot(&self) -> Arc<Vec<Arc<T>>> {
        self.snapshot.borrow().clone()
    }

    /// Subscribe to snapshot changes via a `watch::Receiver`.
    pub(crate) fn subscribe(&self) -> watch::Receiver<Arc<Vec<Arc<T>>>> {
        self.snapshot.subscribe()
    }

    pub(crate) fn len(&self) -> usize {
        self.snapshot.borrow().len()
    }

    pub(crate) fn version(&self) -> u64 {
        *self.version.borrow()
    }

    // ── Private helpers ──────────────────────────────────────────────

    fn publish(&self, next: Vec<Arc<T>>) {
        // `send_modify` updates unconditionally, even with zero receivers.
        self.snapshot.send_modify(|snap| *snap = Arc::new(next));
        self.version.send_modify(|v| *v += 1);
    }
}
