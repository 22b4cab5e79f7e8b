//! User record.

use super::{EntityId, EntityRecord, RecordValidationError};
use serde::{Deserialize, Serialize};

/// One registered account. `username` and `email_address` are
/// expected-unique across the collection but not enforced by storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: EntityId,
    pub username: String,
    pub email_address: String,
    pub first_name: String,
    pub last_name: String,
    /// Avatar image URL shown next to the user's posts.
    pub avatar: String,
}

impl User {
    pub fn new(
        id: impl Into<EntityId>,
        username: impl Into<String>,
        email_address: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            username: username.into(),
            email_address: email_address.into(),
            first_name: String::new(),
            last_name: String::new(),
            avatar: String::new(),
        }
    }

    /// "First Last" as rendered in the post header.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

impl EntityRecord for User {
    fn id(&self) -> &EntityId {
        &self.id
    }

    fn assign_id(&mut self, id: EntityId) {
        self.id = id;
    }

    fn validate(&self) -> Result<(), RecordValidationError> {
        if self.username.trim().is_empty() {
            return Err(RecordValidationError::MissingUsername);
        }
        if self.email_address.trim().is_empty() {
            return Err(RecordValidationError::MissingEmail);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::User;
    use crate::model::{EntityRecord, RecordValidationError};

    #[test]
    fn blank_username_is_rejected() {
        let user = User::new(1, "  ", "ada@example.com");
        assert!(matches!(
            user.validate(),
            Err(RecordValidationError::MissingUsername)
        ));
    }

    #[test]
    fn display_name_trims_missing_parts() {
        let mut user = User::new(1, "ada", "ada@example.com");
        assert_eq!(user.display_name(), "");
        user.first_name = "Ada".to_string();
        user.last_name = "Lovelace".to_string();
        assert_eq!(user.display_name(), "Ada Lovelace");
    }
}
