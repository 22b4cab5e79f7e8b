//! Location repository contract and keyed-store implementation.
//!
//! # Responsibility
//! - Provide CRUD APIs over the `locations` collection.
//! - Own the post→location relational lookup.
//!
//! # Invariants
//! - `location_by_post_id` verifies the post exists before scanning.
//! - At most one location per post is assumed; the first match wins.

use crate::model::location::Location;
use crate::model::{EntityId, EntityRecord};
use crate::repo::post_repo::{KeyedPostRepository, PostRepository};
use crate::repo::RepoResult;
use crate::store::{KeyedStore, SequenceAllocator};
use log::debug;
use rusqlite::Connection;

pub const LOCATIONS: &str = "locations";

/// Repository interface for location persistence and lookups.
pub trait LocationRepository {
    /// Allocates an id when possible, then persists the location.
    fn create_location(&self, location: Location) -> RepoResult<Location>;
    /// Persists a fully-formed location as-is.
    fn save_location(&self, location: Location) -> RepoResult<Location>;
    /// All locations in storage insertion order.
    fn find_all(&self) -> RepoResult<Vec<Location>>;
    /// Exact-key lookup against the stored key.
    fn find_location_by_id(&self, id: &EntityId) -> RepoResult<Option<Location>>;
    /// First location referencing the given post, or `None` when the post
    /// does not exist or no location references it.
    fn location_by_post_id(&self, post_id: &EntityId) -> RepoResult<Option<Location>>;
}

/// Keyed-store-backed location repository.
pub struct KeyedLocationRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> KeyedLocationRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn store(&self) -> KeyedStore<'conn> {
        KeyedStore::new(self.conn)
    }
}

impl LocationRepository for KeyedLocationRepository<'_> {
    fn create_location(&self, mut location: Location) -> RepoResult<Location> {
        if let Some(next) = SequenceAllocator::new(self.conn).next_id(LOCATIONS)? {
            location.assign_id(EntityId::Int(next));
        }
        self.save_location(location)
    }

    fn save_location(&self, location: Location) -> RepoResult<Location> {
        location.validate()?;
        self.store().save(location.clone(), LOCATIONS)?;
        Ok(location)
    }

    fn find_all(&self) -> RepoResult<Vec<Location>> {
        Ok(self.store().load::<Location>(LOCATIONS)?.into_records())
    }

    fn find_location_by_id(&self, id: &EntityId) -> RepoResult<Option<Location>> {
        let locations = self.store().load::<Location>(LOCATIONS)?;
        Ok(locations.get(id).cloned())
    }

    fn location_by_post_id(&self, post_id: &EntityId) -> RepoResult<Option<Location>> {
        let post = KeyedPostRepository::new(self.conn).find_post_by_id(post_id)?;
        if post.is_none() {
            debug!("event=location_by_post module=repo status=unknown_post post_id={post_id}");
            return Ok(None);
        }

        let locations = self.find_all()?;
        Ok(locations
            .into_iter()
            .find(|location| location.post_id.as_ref() == Some(post_id)))
    }
}
