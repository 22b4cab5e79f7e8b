//! Location record.
//!
//! # Responsibility
//! - Define the geocoded place attached to a post.
//! - Resolve the display label the feed renders for a post's place.
//!
//! # Invariants
//! - At most one location per post is assumed by lookup logic; the
//!   repository returns the first match.
//! - Coordinates must stay inside WGS84 bounds.

use super::{EntityId, EntityRecord, RecordValidationError};
use serde::{Deserialize, Serialize};

/// Structured address subset consumed by the feed. Geocoder responses carry
/// more fields; only these survive persistence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Address {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub country: Option<String>,
}

/// One geocoded place. `post_id` is a soft back-reference, absent until the
/// composition flow attaches the created post's id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub id: EntityId,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub post_id: Option<EntityId>,
    pub lat: f64,
    pub lon: f64,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub address: Option<Address>,
}

impl Location {
    pub fn new(id: impl Into<EntityId>, lat: f64, lon: f64) -> Self {
        Self {
            id: id.into(),
            post_id: None,
            lat,
            lon,
            name: None,
            display_name: None,
            address: None,
        }
    }

    /// Label shown in the feed: `name`, else the address city, else empty.
    pub fn display_label(&self) -> &str {
        self.name
            .as_deref()
            .or_else(|| {
                self.address
                    .as_ref()
                    .and_then(|address| address.city.as_deref())
            })
            .unwrap_or("")
    }
}

impl EntityRecord for Location {
    fn id(&self) -> &EntityId {
        &self.id
    }

    fn assign_id(&mut self, id: EntityId) {
        self.id = id;
    }

    fn validate(&self) -> Result<(), RecordValidationError> {
        if !(-90.0..=90.0).contains(&self.lat) {
            return Err(RecordValidationError::LatitudeOutOfRange(self.lat));
        }
        if !(-180.0..=180.0).contains(&self.lon) {
            return Err(RecordValidationError::LongitudeOutOfRange(self.lon));
        }
        Ok(())
    }
}
