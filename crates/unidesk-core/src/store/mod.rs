// ── Reactive data store ──
//
// Snapshot-swapping containers with push-based change notification.

mod aggregate;
mod collection;
mod data_store;

pub use aggregate::{EntityCounts, StatusPartition};
pub use data_store::{DataStore, StoreFailure};
