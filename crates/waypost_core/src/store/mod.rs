//! Keyed collection store over the SQLite payload table.
//!
//! # Responsibility
//! - Load and save whole named collections as ordered id→record mappings.
//! - Allocate the next integer identifier for a collection.
//!
//! # Invariants
//! - A collection round-trips as an ordered list of `[identifier, record]`
//!   pairs; insertion order is preserved across save/load.
//! - A missing payload row loads as an empty collection; a malformed
//!   payload is a `Payload` error, never silently empty.
//! - Each save rewrites the whole collection in a single-row replacement.

use crate::db::DbError;
use crate::model::EntityId;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

mod kv;
mod sequence;

pub use kv::KeyedStore;
pub use sequence::SequenceAllocator;

pub type StoreResult<T> = Result<T, StoreError>;

/// Failures crossing the store boundary.
#[derive(Debug)]
pub enum StoreError {
    /// Underlying SQLite failure.
    Db(DbError),
    /// Persisted payload does not parse as the collection shape.
    Payload(serde_json::Error),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Payload(err) => write!(f, "malformed collection payload: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Payload(err) => Some(err),
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Payload(value)
    }
}

/// Insertion-ordered mapping from identifier to record, the in-memory form
/// of one persisted collection.
///
/// Backed by a vector of pairs so the serialized shape and the iteration
/// order are the same thing. Lookups are linear probes; collections stay
/// small enough that this never matters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Collection<T> {
    entries: Vec<(EntityId, T)>,
}

impl<T> Collection<T> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Exact-key lookup against the stored (already normalized) key.
    pub fn get(&self, id: &EntityId) -> Option<&T> {
        self.entries
            .iter()
            .find(|(key, _)| key == id)
            .map(|(_, record)| record)
    }

    /// Inserts or overwrites the entry at `id`, keeping its original
    /// position when the key already exists.
    pub fn insert(&mut self, id: EntityId, record: T) {
        match self.entries.iter().position(|(key, _)| *key == id) {
            Some(index) => self.entries[index].1 = record,
            None => self.entries.push((id, record)),
        }
    }

    /// Iterates `(id, record)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&EntityId, &T)> {
        self.entries.iter().map(|(id, record)| (id, record))
    }

    /// Iterates stored keys in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = &EntityId> {
        self.entries.iter().map(|(id, _)| id)
    }

    /// Consumes the collection into its records, insertion order preserved.
    pub fn into_records(self) -> Vec<T> {
        self.entries
            .into_iter()
            .map(|(_, record)| record)
            .collect()
    }
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self::new()
    }
}
