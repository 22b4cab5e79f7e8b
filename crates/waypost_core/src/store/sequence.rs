//! Next-identifier allocation for a collection.

use super::{KeyedStore, StoreResult};
use log::debug;
use rusqlite::Connection;

/// Computes the next unique integer identifier for a collection.
///
/// Policy: one past the highest integer id currently stored. An empty
/// collection yields `None` — "no auto-assignment" — and callers persist
/// the caller-supplied id untouched. A non-empty collection holding no
/// integer ids also yields `None`, since there is nothing to count from.
pub struct SequenceAllocator<'conn> {
    store: KeyedStore<'conn>,
}

impl<'conn> SequenceAllocator<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self {
            store: KeyedStore::new(conn),
        }
    }

    /// Returns the next id for `collection`, or `None` when no id can be
    /// derived from the stored entries.
    pub fn next_id(&self, collection: &str) -> StoreResult<Option<i64>> {
        let entries = self.store.load::<serde_json::Value>(collection)?;

        let next = entries
            .ids()
            .filter_map(|id| id.as_int())
            .max()
            .map(|highest| highest + 1);

        debug!(
            "event=sequence_next module=store collection={collection} size={} next={next:?}",
            entries.len()
        );
        Ok(next)
    }
}
