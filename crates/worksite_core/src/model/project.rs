//! Project domain model.
//!
//! The project is the owning aggregate: checklist items and gallery images
//! are keyed by its ID, and at most one directory contact is assigned.

use crate::model::contact::ContactId;
use crate::model::epoch_ms_now;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for one project.
pub type ProjectId = Uuid;

/// One field-service project record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Stable global ID assigned at creation.
    pub project_uuid: ProjectId,
    /// Display name. Not required to be unique.
    pub name: String,
    /// Free-form description, edited in place. Defaults to empty.
    pub description: String,
    /// Assigned directory contact, if any.
    pub contact_uuid: Option<ContactId>,
    /// Epoch ms creation timestamp.
    pub created_at: i64,
}

impl Project {
    /// Creates a new project with an empty description and no contact.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            project_uuid: Uuid::new_v4(),
            name: name.into(),
            description: String::new(),
            contact_uuid: None,
            created_at: epoch_ms_now(),
        }
    }
}
