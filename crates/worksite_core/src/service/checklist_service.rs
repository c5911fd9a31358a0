//! Checklist use-case service.
//!
//! # Responsibility
//! - Validate hierarchy invariants above the repository layer.
//! - Provide load, add, edit, and remove operations for one project's
//!   checklist forest.
//!
//! # Invariants
//! - A child is only ever created under a root item of the same project;
//!   the rejection happens before any store mutation.
//! - Removing a child that empties its parent removes the parent too.
//! - Removing a root item removes its children with it.
//! - Every mutating call commits before returning and hands back state
//!   re-read from the store; a failed call leaves the store untouched.

use crate::model::checklist::{ChecklistItem, ChecklistItemId};
use crate::model::project::ProjectId;
use crate::repo::checklist_repo::ChecklistRepository;
use crate::repo::RepoError;
use log::error;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Why a parent reference was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidParentReason {
    /// No item with that id exists.
    NotFound,
    /// The referenced item is itself a child; depth is capped at two.
    NotRoot,
    /// The referenced item belongs to a different project.
    ForeignProject,
}

/// Errors from checklist service operations.
#[derive(Debug)]
pub enum ChecklistServiceError {
    /// Caller tried to add a child under an unusable parent.
    InvalidParent {
        parent_uuid: ChecklistItemId,
        reason: InvalidParentReason,
    },
    /// Target item does not exist.
    ItemNotFound(ChecklistItemId),
    /// Target project does not exist.
    ProjectNotFound(ProjectId),
    /// Repository-level failure.
    Repo(RepoError),
}

impl Display for ChecklistServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidParent {
                parent_uuid,
                reason,
            } => {
                let detail = match reason {
                    InvalidParentReason::NotFound => "parent does not exist",
                    InvalidParentReason::NotRoot => "parent is itself a child item",
                    InvalidParentReason::ForeignProject => "parent belongs to another project",
                };
                write!(f, "invalid checklist parent {parent_uuid}: {detail}")
            }
            Self::ItemNotFound(id) => write!(f, "checklist item not found: {id}"),
            Self::ProjectNotFound(id) => write!(f, "project not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ChecklistServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for ChecklistServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::ItemNotFound(item_uuid) => Self::ItemNotFound(item_uuid),
            RepoError::ProjectNotFound(project_uuid) => Self::ProjectNotFound(project_uuid),
            other => Self::Repo(other),
        }
    }
}

/// What a successful [`ChecklistService::remove`] call deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Removal {
    /// A child was removed; `parent_removed` reports the cascade.
    Child { parent_removed: bool },
    /// A root was removed together with `children_removed` children.
    Root { children_removed: usize },
}

/// Checklist service facade over one repository implementation.
pub struct ChecklistService<R: ChecklistRepository> {
    repo: R,
}

impl<R: ChecklistRepository> ChecklistService<R> {
    /// Creates service from repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Loads the full checklist forest of one project as a flat sequence,
    /// ascending by creation time.
    pub fn load(&self, project_uuid: ProjectId) -> Result<Vec<ChecklistItem>, ChecklistServiceError> {
        self.ensure_project_exists(project_uuid)?;
        self.repo
            .list_project_items(project_uuid)
            .map_err(|err| surface("load", err))
    }

    /// Creates a new root item for `project_uuid`.
    pub fn add_root(
        &self,
        project_uuid: ProjectId,
        content: impl Into<String>,
    ) -> Result<ChecklistItem, ChecklistServiceError> {
        self.ensure_project_exists(project_uuid)?;
        let item = ChecklistItem::new_root(project_uuid, content);
        self.repo
            .insert_item(&item)
            .map_err(|err| surface("add_root", err))
    }

    /// Creates a new child under `parent_uuid`.
    ///
    /// The parent must exist, be a root item, and belong to
    /// `project_uuid`; otherwise the call is rejected before any store
    /// mutation.
    pub fn add_child(
        &self,
        project_uuid: ProjectId,
        parent_uuid: ChecklistItemId,
        content: impl Into<String>,
    ) -> Result<ChecklistItem, ChecklistServiceError> {
        let parent = self.require_parent(project_uuid, parent_uuid)?;
        let child = ChecklistItem::new_child(&parent, content);
        self.repo
            .insert_item(&child)
            .map_err(|err| surface("add_child", err))
    }

    /// Replaces one item's text, persisting immediately.
    pub fn set_text(
        &self,
        item_uuid: ChecklistItemId,
        content: impl AsRef<str>,
    ) -> Result<ChecklistItem, ChecklistServiceError> {
        self.repo
            .update_content(item_uuid, content.as_ref())
            .map_err(|err| surface("set_text", err))
    }

    /// Replaces one item's checked flag, persisting immediately.
    pub fn set_checked(
        &self,
        item_uuid: ChecklistItemId,
        is_checked: bool,
    ) -> Result<ChecklistItem, ChecklistServiceError> {
        self.repo
            .update_checked(item_uuid, is_checked)
            .map_err(|err| surface("set_checked", err))
    }

    /// Removes one item.
    ///
    /// Children cascade upward: when the removal empties the parent's
    /// child set, the parent is deleted in the same transaction. Roots
    /// cascade downward: their children are deleted with them.
    pub fn remove(&self, item_uuid: ChecklistItemId) -> Result<Removal, ChecklistServiceError> {
        let item = self
            .repo
            .get_item(item_uuid)
            .map_err(|err| surface("remove", err))?
            .ok_or(ChecklistServiceError::ItemNotFound(item_uuid))?;

        match item.parent_uuid {
            Some(parent_uuid) => {
                let parent_removed = self
                    .repo
                    .remove_child_item(item_uuid, parent_uuid)
                    .map_err(|err| surface("remove", err))?;
                Ok(Removal::Child { parent_removed })
            }
            None => {
                let children_removed = self
                    .repo
                    .remove_root_item(item_uuid)
                    .map_err(|err| surface("remove", err))?;
                Ok(Removal::Root { children_removed })
            }
        }
    }

    fn ensure_project_exists(
        &self,
        project_uuid: ProjectId,
    ) -> Result<(), ChecklistServiceError> {
        if !self.repo.project_exists(project_uuid)? {
            return Err(ChecklistServiceError::ProjectNotFound(project_uuid));
        }
        Ok(())
    }

    fn require_parent(
        &self,
        project_uuid: ProjectId,
        parent_uuid: ChecklistItemId,
    ) -> Result<ChecklistItem, ChecklistServiceError> {
        let reject = |reason| ChecklistServiceError::InvalidParent {
            parent_uuid,
            reason,
        };

        let parent = self
            .repo
            .get_item(parent_uuid)?
            .ok_or_else(|| reject(InvalidParentReason::NotFound))?;
        if parent.project_uuid != project_uuid {
            return Err(reject(InvalidParentReason::ForeignProject));
        }
        if !parent.is_root() {
            return Err(reject(InvalidParentReason::NotRoot));
        }
        Ok(parent)
    }
}

fn surface(op: &str, err: RepoError) -> ChecklistServiceError {
    error!("event=checklist_op op={op} module=service status=error error={err}");
    err.into()
}
