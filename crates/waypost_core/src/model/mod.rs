//! Domain records persisted by the keyed store.
//!
//! # Responsibility
//! - Define the canonical post/user/location records and their identifiers.
//! - Own per-record validation invoked by repository write paths.
//!
//! # Invariants
//! - Identifier uniqueness within a collection is the only model-wide
//!   invariant; cross-record references (`userId`, `postId`) are soft.
//! - Textual identifiers compare case-insensitively once persisted; the
//!   store normalizes them to lowercase on save.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod location;
pub mod post;
pub mod user;

/// Identifier for any persisted record: an allocator-assigned integer or a
/// caller-supplied string.
///
/// Serialized untagged, so the wire shape is a bare number or bare string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntityId {
    Int(i64),
    Text(String),
}

impl EntityId {
    /// Returns the form the store keys on: textual ids lowercased, integer
    /// ids unchanged.
    pub fn normalized(&self) -> EntityId {
        match self {
            Self::Int(value) => Self::Int(*value),
            Self::Text(value) => Self::Text(value.to_lowercase()),
        }
    }

    /// Returns the integer value for integer ids, `None` for textual ids.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(value) => Some(*value),
            Self::Text(_) => None,
        }
    }
}

impl Display for EntityId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Int(value) => write!(f, "{value}"),
            Self::Text(value) => write!(f, "{value}"),
        }
    }
}

impl From<i64> for EntityId {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<&str> for EntityId {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for EntityId {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Contract every persisted record fulfills so the store and the sequence
/// allocator can key, re-key and vet it without knowing its shape.
pub trait EntityRecord {
    /// Current identifier of the record.
    fn id(&self) -> &EntityId;

    /// Overwrites the identifier. Called by `create` when the allocator
    /// produced a fresh one.
    fn assign_id(&mut self, id: EntityId);

    /// Checks record-level invariants before persistence.
    fn validate(&self) -> Result<(), RecordValidationError>;
}

/// Validation failures raised by repository write paths.
#[derive(Debug)]
pub enum RecordValidationError {
    /// Post body is empty once markup is stripped.
    EmptyContent,
    /// Username is missing or whitespace-only.
    MissingUsername,
    /// Email address is missing or whitespace-only.
    MissingEmail,
    /// Latitude outside [-90, 90].
    LatitudeOutOfRange(f64),
    /// Longitude outside [-180, 180].
    LongitudeOutOfRange(f64),
}

impl Display for RecordValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyContent => write!(f, "post content is empty"),
            Self::MissingUsername => write!(f, "username must not be empty"),
            Self::MissingEmail => write!(f, "email address must not be empty"),
            Self::LatitudeOutOfRange(value) => {
                write!(f, "latitude {value} is outside [-90, 90]")
            }
            Self::LongitudeOutOfRange(value) => {
                write!(f, "longitude {value} is outside [-180, 180]")
            }
        }
    }
}

impl Error for RecordValidationError {}

#[cfg(test)]
mod tests {
    use super::EntityId;

    #[test]
    fn normalized_lowercases_textual_ids_only() {
        assert_eq!(
            EntityId::from("Ada.Lovelace").normalized(),
            EntityId::from("ada.lovelace")
        );
        assert_eq!(EntityId::from(7).normalized(), EntityId::Int(7));
    }

    #[test]
    fn wire_shape_is_untagged() {
        let int_id: EntityId = serde_json::from_str("42").unwrap();
        assert_eq!(int_id, EntityId::Int(42));

        let text_id: EntityId = serde_json::from_str("\"ada\"").unwrap();
        assert_eq!(text_id, EntityId::from("ada"));
        assert_eq!(serde_json::to_string(&text_id).unwrap(), "\"ada\"");
    }
}
