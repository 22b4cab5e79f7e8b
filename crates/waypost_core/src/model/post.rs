//! Post record.
//!
//! # Responsibility
//! - Define the persisted post shape and its creation-time defaults.
//! - Reject bodies that are empty once rich-text markup is stripped.

use super::{EntityId, EntityRecord, RecordValidationError};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

static MARKUP_TAG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<[^>]*>").expect("valid markup tag regex"));

/// One published post. `content` holds the rich-text HTML produced by the
/// composer; `user_id` is a soft reference to the author.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: EntityId,
    pub user_id: EntityId,
    pub content: String,
    /// Unix seconds, captured when the post is constructed.
    pub created_at: i64,
}

impl Post {
    /// Creates a post stamped with the current time.
    ///
    /// The `id` is a caller-supplied placeholder; `create_post` overwrites
    /// it whenever the sequence allocator produces one.
    pub fn new(
        id: impl Into<EntityId>,
        user_id: impl Into<EntityId>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            user_id: user_id.into(),
            content: content.into(),
            created_at: unix_now(),
        }
    }

    /// Returns the body with markup tags removed and entities collapsed,
    /// the text the composer validates against.
    pub fn plain_text(&self) -> String {
        strip_markup(&self.content)
    }
}

impl EntityRecord for Post {
    fn id(&self) -> &EntityId {
        &self.id
    }

    fn assign_id(&mut self, id: EntityId) {
        self.id = id;
    }

    fn validate(&self) -> Result<(), RecordValidationError> {
        if self.plain_text().trim().is_empty() {
            return Err(RecordValidationError::EmptyContent);
        }
        Ok(())
    }
}

/// Strips markup tags and non-breaking spaces from rich-text content.
pub fn strip_markup(content: &str) -> String {
    MARKUP_TAG_RE
        .replace_all(content, "")
        .replace("&nbsp;", " ")
}

fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or(Duration::ZERO)
        .as_secs() as i64
}
