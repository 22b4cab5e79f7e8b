//! Generic load/save of named collections.
//!
//! # Responsibility
//! - Deserialize one collection payload into an ordered mapping.
//! - Persist a record by rewriting its whole collection in one statement.
//!
//! # Invariants
//! - Textual record identifiers are lowercased before keying, so ids that
//!   differ only by letter case collapse to one entry.
//! - The record itself is stored as given; only the key is normalized.

use super::{Collection, StoreResult};
use crate::model::EntityRecord;
use log::error;
use rusqlite::{params, Connection, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Store facade over the `collections` payload table.
pub struct KeyedStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> KeyedStore<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    /// Loads the named collection.
    ///
    /// A missing payload row yields an empty collection; a payload that no
    /// longer parses is an error for the caller to surface.
    pub fn load<T>(&self, collection: &str) -> StoreResult<Collection<T>>
    where
        T: DeserializeOwned,
    {
        let payload: Option<String> = self
            .conn
            .query_row(
                "SELECT payload FROM collections WHERE name = ?1;",
                [collection],
                |row| row.get(0),
            )
            .optional()
            .map_err(|err| {
                error!("event=collection_load module=store status=error collection={collection} error={err}");
                err
            })?;

        match payload {
            None => Ok(Collection::new()),
            Some(text) => serde_json::from_str(&text).map_err(|err| {
                error!("event=collection_load module=store status=error collection={collection} error={err}");
                err.into()
            }),
        }
    }

    /// Inserts or overwrites `record` in the named collection.
    ///
    /// Whole-collection read-modify-write: the current payload is loaded,
    /// the entry at the record's normalized id replaced, and the full
    /// collection written back as one row. The single-row replacement is
    /// the only atomicity this layer relies on.
    pub fn save<T>(&self, record: T, collection: &str) -> StoreResult<()>
    where
        T: Serialize + DeserializeOwned + EntityRecord,
    {
        let mut entries: Collection<T> = self.load(collection)?;
        entries.insert(record.id().normalized(), record);

        let payload = serde_json::to_string(&entries)?;
        self.conn
            .execute(
                "INSERT INTO collections (name, payload) VALUES (?1, ?2)
                 ON CONFLICT(name) DO UPDATE SET payload = excluded.payload;",
                params![collection, payload],
            )
            .map_err(|err| {
                error!("event=collection_save module=store status=error collection={collection} error={err}");
                err
            })?;

        Ok(())
    }
}
