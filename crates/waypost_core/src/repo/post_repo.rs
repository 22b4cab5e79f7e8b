//! Post repository contract and keyed-store implementation.
//!
//! # Responsibility
//! - Provide stable CRUD APIs over the `posts` collection.
//!
//! # Invariants
//! - `create_post` assigns an allocator id when one is available and
//!   otherwise persists the caller-supplied id untouched.
//! - `find_all` returns posts in storage insertion order.

use crate::model::post::Post;
use crate::model::{EntityId, EntityRecord};
use crate::repo::RepoResult;
use crate::store::{KeyedStore, SequenceAllocator};
use rusqlite::Connection;

pub const POSTS: &str = "posts";

/// Repository interface for post persistence.
pub trait PostRepository {
    /// Allocates an id when possible, then persists the post.
    fn create_post(&self, post: Post) -> RepoResult<Post>;
    /// Persists a fully-formed post as-is.
    fn save_post(&self, post: Post) -> RepoResult<Post>;
    /// All posts in storage insertion order.
    fn find_all(&self) -> RepoResult<Vec<Post>>;
    /// Exact-key lookup against the stored key.
    fn find_post_by_id(&self, id: &EntityId) -> RepoResult<Option<Post>>;
}

/// Keyed-store-backed post repository.
pub struct KeyedPostRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> KeyedPostRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn store(&self) -> KeyedStore<'conn> {
        KeyedStore::new(self.conn)
    }
}

impl PostRepository for KeyedPostRepository<'_> {
    fn create_post(&self, mut post: Post) -> RepoResult<Post> {
        if let Some(next) = SequenceAllocator::new(self.conn).next_id(POSTS)? {
            post.assign_id(EntityId::Int(next));
        }
        self.save_post(post)
    }

    fn save_post(&self, post: Post) -> RepoResult<Post> {
        post.validate()?;
        self.store().save(post.clone(), POSTS)?;
        Ok(post)
    }

    fn find_all(&self) -> RepoResult<Vec<Post>> {
        Ok(self.store().load::<Post>(POSTS)?.into_records())
    }

    fn find_post_by_id(&self, id: &EntityId) -> RepoResult<Option<Post>> {
        let posts = self.store().load::<Post>(POSTS)?;
        Ok(posts.get(id).cloned())
    }
}
