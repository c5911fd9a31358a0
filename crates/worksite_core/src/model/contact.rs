//! Contact directory domain model.
//!
//! All display fields are optional; the directory stores whatever the user
//! filled in. A contact with every field blank carries no information and
//! is rejected at the service boundary.

use crate::model::epoch_ms_now;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for one directory contact.
pub type ContactId = Uuid;

/// One directory contact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    /// Stable global ID assigned at creation.
    pub contact_uuid: ContactId,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    /// Epoch ms creation timestamp.
    pub created_at: i64,
}

/// Field values for creating a contact.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactDraft {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

impl ContactDraft {
    /// Returns whether every field is missing or whitespace-only.
    pub fn is_blank(&self) -> bool {
        [&self.name, &self.email, &self.phone, &self.address]
            .into_iter()
            .all(|field| field.as_deref().map_or(true, |value| value.trim().is_empty()))
    }
}

impl Contact {
    /// Creates a contact from draft fields.
    pub fn from_draft(draft: ContactDraft) -> Self {
        Self {
            contact_uuid: Uuid::new_v4(),
            name: draft.name,
            email: draft.email,
            phone: draft.phone,
            address: draft.address,
            created_at: epoch_ms_now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ContactDraft;

    #[test]
    fn draft_with_only_whitespace_is_blank() {
        let draft = ContactDraft {
            name: Some("   ".to_string()),
            ..ContactDraft::default()
        };
        assert!(draft.is_blank());
    }

    #[test]
    fn draft_with_one_field_is_not_blank() {
        let draft = ContactDraft {
            phone: Some("+47 555 01 234".to_string()),
            ..ContactDraft::default()
        };
        assert!(!draft.is_blank());
    }
}
