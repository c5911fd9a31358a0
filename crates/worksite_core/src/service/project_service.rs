//! Project use-case service.
//!
//! # Responsibility
//! - Provide project creation, description editing, and contact
//!   assignment entry points.
//!
//! # Invariants
//! - Description edits persist immediately; callers treat the returned
//!   record as the new source of truth.
//! - Contact assignment only accepts contacts present in the directory.

use crate::model::contact::ContactId;
use crate::model::project::{Project, ProjectId};
use crate::repo::project_repo::ProjectRepository;
use crate::repo::RepoError;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors from project service operations.
#[derive(Debug)]
pub enum ProjectServiceError {
    /// Target project does not exist.
    ProjectNotFound(ProjectId),
    /// Assigned contact does not exist.
    ContactNotFound(ContactId),
    /// Repository-level failure.
    Repo(RepoError),
}

impl Display for ProjectServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ProjectNotFound(id) => write!(f, "project not found: {id}"),
            Self::ContactNotFound(id) => write!(f, "contact not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ProjectServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for ProjectServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::ProjectNotFound(project_uuid) => Self::ProjectNotFound(project_uuid),
            RepoError::ContactNotFound(contact_uuid) => Self::ContactNotFound(contact_uuid),
            other => Self::Repo(other),
        }
    }
}

/// Project service facade.
pub struct ProjectService<R: ProjectRepository> {
    repo: R,
}

impl<R: ProjectRepository> ProjectService<R> {
    /// Creates service from repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates a project with an empty description and no contact.
    pub fn create_project(
        &self,
        name: impl Into<String>,
    ) -> Result<Project, ProjectServiceError> {
        let project = Project::new(name);
        self.repo.insert_project(&project).map_err(Into::into)
    }

    /// Loads one project by id.
    pub fn get_project(
        &self,
        project_uuid: ProjectId,
    ) -> Result<Option<Project>, ProjectServiceError> {
        self.repo.get_project(project_uuid).map_err(Into::into)
    }

    /// Replaces the project description, persisting immediately.
    pub fn set_description(
        &self,
        project_uuid: ProjectId,
        description: impl AsRef<str>,
    ) -> Result<Project, ProjectServiceError> {
        self.repo
            .update_description(project_uuid, description.as_ref())
            .map_err(Into::into)
    }

    /// Assigns a directory contact to the project, or clears the
    /// assignment with `None`.
    pub fn assign_contact(
        &self,
        project_uuid: ProjectId,
        contact_uuid: Option<ContactId>,
    ) -> Result<Project, ProjectServiceError> {
        if let Some(contact_uuid) = contact_uuid {
            if !self.repo.contact_exists(contact_uuid)? {
                return Err(ProjectServiceError::ContactNotFound(contact_uuid));
            }
        }
        self.repo
            .update_contact(project_uuid, contact_uuid)
            .map_err(Into::into)
    }
}
