//! Checklist item domain model.
//!
//! # Responsibility
//! - Define the checklist entry record shared by every project checklist.
//! - Provide constructors that encode the two-level hierarchy at the type
//!   boundary.
//!
//! # Invariants
//! - `item_uuid` is stable and never reused for another item.
//! - `project_uuid` and `created_at` are fixed at creation.
//! - A child's `parent_uuid` points at a root item of the same project;
//!   children never have children of their own.

use crate::model::epoch_ms_now;
use crate::model::project::ProjectId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for one checklist entry.
pub type ChecklistItemId = Uuid;

/// One entry in a project checklist, root or child.
///
/// Ordering among siblings (and among roots) is ascending `created_at`;
/// the timestamp is the sole sort key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistItem {
    /// Stable global ID assigned at creation.
    pub item_uuid: ChecklistItemId,
    /// Owning project. Every item belongs to exactly one.
    pub project_uuid: ProjectId,
    /// `None` for root items; `Some(root)` for children.
    pub parent_uuid: Option<ChecklistItemId>,
    /// Free-form description text. Defaults to empty.
    pub content: String,
    /// Completion toggle. Defaults to false.
    pub is_checked: bool,
    /// Epoch ms creation timestamp. Immutable sort key.
    pub created_at: i64,
}

impl ChecklistItem {
    /// Creates a new top-level item for `project_uuid`.
    pub fn new_root(project_uuid: ProjectId, content: impl Into<String>) -> Self {
        Self {
            item_uuid: Uuid::new_v4(),
            project_uuid,
            parent_uuid: None,
            content: content.into(),
            is_checked: false,
            created_at: epoch_ms_now(),
        }
    }

    /// Creates a new child under `parent`, inheriting its project.
    ///
    /// The caller is responsible for checking that `parent` is a root item
    /// before persisting; the service layer rejects deeper nesting.
    pub fn new_child(parent: &ChecklistItem, content: impl Into<String>) -> Self {
        Self {
            item_uuid: Uuid::new_v4(),
            project_uuid: parent.project_uuid,
            parent_uuid: Some(parent.item_uuid),
            content: content.into(),
            is_checked: false,
            created_at: epoch_ms_now(),
        }
    }

    /// Returns whether this item sits at the top level.
    pub fn is_root(&self) -> bool {
        self.parent_uuid.is_none()
    }
}
