//! Compose and feed use-case service.
//!
//! # Responsibility
//! - Publish a post with its resolved location in one call.
//! - Assemble the chronological feed with author and place attached.
//!
//! # Invariants
//! - A post is published under an existing author, resolved by username.
//! - The location is persisted only after the post, carrying its id.
//! - Feed entries whose author no longer resolves are skipped, not erred.

use crate::model::location::Location;
use crate::model::post::Post;
use crate::model::user::User;
use crate::model::RecordValidationError;
use crate::repo::location_repo::LocationRepository;
use crate::repo::post_repo::PostRepository;
use crate::repo::user_repo::UserRepository;
use crate::repo::RepoError;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for compose/feed use-cases.
#[derive(Debug)]
pub enum ComposeServiceError {
    /// No account matches the authoring username.
    UserNotFound(String),
    /// Post body is empty once markup is stripped.
    EmptyContent,
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for ComposeServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UserNotFound(username) => write!(f, "user not found: {username}"),
            Self::EmptyContent => write!(f, "content is empty"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ComposeServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for ComposeServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::Validation(RecordValidationError::EmptyContent) => Self::EmptyContent,
            other => Self::Repo(other),
        }
    }
}

/// A freshly published post with everything the feed needs to render it.
#[derive(Debug, Clone, PartialEq)]
pub struct ComposedPost {
    pub post: Post,
    pub author: User,
    pub location: Location,
}

/// One feed row: a post joined with its author and, when present, the
/// place it was published from.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineEntry {
    pub post: Post,
    pub author: User,
    pub location: Option<Location>,
}

impl TimelineEntry {
    /// Place label for this row, empty when no location is attached.
    pub fn display_location(&self) -> &str {
        self.location
            .as_ref()
            .map(Location::display_label)
            .unwrap_or("")
    }
}

/// Use-case facade over the three entity repositories.
pub struct ComposeService<P, U, L>
where
    P: PostRepository,
    U: UserRepository,
    L: LocationRepository,
{
    posts: P,
    users: U,
    locations: L,
}

impl<P, U, L> ComposeService<P, U, L>
where
    P: PostRepository,
    U: UserRepository,
    L: LocationRepository,
{
    /// Creates a service using the provided repository implementations.
    pub fn new(posts: P, users: U, locations: L) -> Self {
        Self {
            posts,
            users,
            locations,
        }
    }

    /// Publishes a post for `username` and attaches `location` to it.
    ///
    /// # Contract
    /// - Resolves the author by username; unknown authors are rejected.
    /// - Creates the post first, then persists the location carrying the
    ///   created post's id.
    pub fn compose_post(
        &self,
        username: &str,
        content: impl Into<String>,
        mut location: Location,
    ) -> Result<ComposedPost, ComposeServiceError> {
        let author = self
            .users
            .find_user_by_username(username)?
            .ok_or_else(|| ComposeServiceError::UserNotFound(username.to_string()))?;

        // The allocator assigns past the highest stored id; for an empty
        // collection it assigns nothing and this seed id becomes the first.
        let post = Post::new(1, author.id.clone(), content);
        let created = self.posts.create_post(post)?;

        location.post_id = Some(created.id.clone());
        let saved_location = self.locations.save_location(location)?;

        Ok(ComposedPost {
            post: created,
            author,
            location: saved_location,
        })
    }

    /// Returns the feed: all posts in chronological order, joined with
    /// their author and place. Posts whose author cannot be resolved are
    /// dropped from the feed.
    pub fn timeline(&self) -> Result<Vec<TimelineEntry>, ComposeServiceError> {
        let mut posts = self.posts.find_all()?;
        posts.sort_by_key(|post| post.created_at);

        let users = self.users.find_all()?;

        let mut entries = Vec::with_capacity(posts.len());
        for post in posts {
            let Some(author) = users.iter().find(|user| user.id == post.user_id) else {
                continue;
            };
            let location = self.locations.location_by_post_id(&post.id)?;
            entries.push(TimelineEntry {
                author: author.clone(),
                location,
                post,
            });
        }

        Ok(entries)
    }
}
