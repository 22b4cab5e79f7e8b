//! User repository contract and keyed-store implementation.
//!
//! # Responsibility
//! - Provide CRUD and lookup APIs over the `users` collection.
//! - Own the user→posts relational query.
//!
//! # Invariants
//! - Username/email scans cover the whole collection; when duplicates
//!   exist the last stored match wins.
//! - `all_posts_by_user` distinguishes an unknown user (`None`) from a
//!   known user with zero posts (`Some(empty)`).

use crate::model::post::Post;
use crate::model::user::User;
use crate::model::{EntityId, EntityRecord};
use crate::repo::post_repo::{KeyedPostRepository, PostRepository};
use crate::repo::RepoResult;
use crate::store::{KeyedStore, SequenceAllocator};
use log::debug;
use rusqlite::Connection;

pub const USERS: &str = "users";

/// Repository interface for user persistence and queries.
pub trait UserRepository {
    /// Allocates an id when possible, then persists the user.
    fn create_user(&self, user: User) -> RepoResult<User>;
    /// Persists a fully-formed user as-is.
    fn save_user(&self, user: User) -> RepoResult<User>;
    /// All users in storage insertion order.
    fn find_all(&self) -> RepoResult<Vec<User>>;
    /// Exact-key lookup against the stored key.
    fn find_user_by_id(&self, id: &EntityId) -> RepoResult<Option<User>>;
    /// Full-collection scan by username.
    fn find_user_by_username(&self, username: &str) -> RepoResult<Option<User>>;
    /// Full-collection scan by email address.
    fn find_user_by_email(&self, email_address: &str) -> RepoResult<Option<User>>;
    /// Posts authored by the given user, or `None` when the user does not
    /// exist.
    fn all_posts_by_user(&self, user_id: &EntityId) -> RepoResult<Option<Vec<Post>>>;
}

/// Keyed-store-backed user repository.
pub struct KeyedUserRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> KeyedUserRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn store(&self) -> KeyedStore<'conn> {
        KeyedStore::new(self.conn)
    }

    fn scan(&self, matches: impl Fn(&User) -> bool) -> RepoResult<Option<User>> {
        let users = self.store().load::<User>(USERS)?;

        // Deliberately scans to the end: duplicates resolve to the last
        // stored match.
        let mut found = None;
        for (_, user) in users.iter() {
            if matches(user) {
                found = Some(user.clone());
            }
        }
        Ok(found)
    }
}

impl UserRepository for KeyedUserRepository<'_> {
    fn create_user(&self, mut user: User) -> RepoResult<User> {
        if let Some(next) = SequenceAllocator::new(self.conn).next_id(USERS)? {
            user.assign_id(EntityId::Int(next));
        }
        self.save_user(user)
    }

    fn save_user(&self, user: User) -> RepoResult<User> {
        user.validate()?;
        self.store().save(user.clone(), USERS)?;
        Ok(user)
    }

    fn find_all(&self) -> RepoResult<Vec<User>> {
        Ok(self.store().load::<User>(USERS)?.into_records())
    }

    fn find_user_by_id(&self, id: &EntityId) -> RepoResult<Option<User>> {
        let users = self.store().load::<User>(USERS)?;
        Ok(users.get(id).cloned())
    }

    fn find_user_by_username(&self, username: &str) -> RepoResult<Option<User>> {
        self.scan(|user| user.username == username)
    }

    fn find_user_by_email(&self, email_address: &str) -> RepoResult<Option<User>> {
        self.scan(|user| user.email_address == email_address)
    }

    fn all_posts_by_user(&self, user_id: &EntityId) -> RepoResult<Option<Vec<Post>>> {
        if self.find_user_by_id(user_id)?.is_none() {
            debug!("event=posts_by_user module=repo status=unknown_user user_id={user_id}");
            return Ok(None);
        }

        let posts = KeyedPostRepository::new(self.conn).find_all()?;
        Ok(Some(
            posts
                .into_iter()
                .filter(|post| &post.user_id == user_id)
                .collect(),
        ))
    }
}
