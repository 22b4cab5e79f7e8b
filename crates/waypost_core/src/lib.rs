//! Core persistence logic for waypost.
//! This crate is the single source of truth for the posts/users/locations
//! collections and their invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod store;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::location::{Address, Location};
pub use model::post::Post;
pub use model::user::User;
pub use model::{EntityId, EntityRecord, RecordValidationError};
pub use repo::location_repo::{KeyedLocationRepository, LocationRepository};
pub use repo::post_repo::{KeyedPostRepository, PostRepository};
pub use repo::user_repo::{KeyedUserRepository, UserRepository};
pub use repo::{RepoError, RepoResult};
pub use service::compose_service::{
    ComposeService, ComposeServiceError, ComposedPost, TimelineEntry,
};
pub use store::{Collection, KeyedStore, SequenceAllocator, StoreError, StoreResult};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
