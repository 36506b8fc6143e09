// ── Container subscriptions ──
//
// Readers hold a watch receiver on one container. Every swap the store
// publishes is a complete snapshot; intermediate swaps may be skipped by
// slow readers, partial ones are never observed.

use std::sync::Arc;

use futures_core::Stream;
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;

use crate::model::Record;

/// One published state of a container.
pub type Snapshot<T> = Arc<Vec<Arc<T>>>;

/// A subscription to one container of the store.
pub struct EntityStream<T: Record> {
    seen: Snapshot<T>,
    rx: watch::Receiver<Snapshot<T>>,
}

impl<T: Record> EntityStream<T> {
    pub(crate) fn new(rx: watch::Receiver<Snapshot<T>>) -> Self {
        let seen = Arc::clone(&rx.borrow());
        Self { seen, rx }
    }

    /// Snapshot as of subscription, or as of the last [`changed`](Self::changed).
    pub fn current(&self) -> &Snapshot<T> {
        &self.seen
    }

    /// Whatever the store holds right now.
    pub fn latest(&self) -> Snapshot<T> {
        Arc::clone(&self.rx.borrow())
    }

    /// Suspend until the container is swapped again. `None` once the
    /// store is gone.
    pub async fn changed(&mut self) -> Option<Snapshot<T>> {
        if self.rx.changed().await.is_err() {
            return None;
        }
        self.seen = Arc::clone(&self.rx.borrow_and_update());
        Some(Arc::clone(&self.seen))
    }

    /// Yields the current snapshot first, then one item per swap.
    pub fn into_stream(self) -> impl Stream<Item = Snapshot<T>> + Send + Unpin {
        WatchStream::new(self.rx)
    }
}
