//! Gallery use-case service.
//!
//! # Responsibility
//! - Provide image import, listing, and deletion for one project's
//!   gallery.
//!
//! # Invariants
//! - Empty byte payloads are rejected before any store mutation.
//! - A failed save surfaces a recoverable error; the core never halts the
//!   process over a store failure.

use crate::model::gallery::{GalleryImage, GalleryImageId};
use crate::model::project::ProjectId;
use crate::repo::gallery_repo::GalleryRepository;
use crate::repo::RepoError;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors from gallery service operations.
#[derive(Debug)]
pub enum GalleryServiceError {
    /// Caller handed in an empty byte payload.
    EmptyImageData,
    /// Target project does not exist.
    ProjectNotFound(ProjectId),
    /// Target image does not exist.
    ImageNotFound(GalleryImageId),
    /// Repository-level failure.
    Repo(RepoError),
}

impl Display for GalleryServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyImageData => write!(f, "image data must not be empty"),
            Self::ProjectNotFound(id) => write!(f, "project not found: {id}"),
            Self::ImageNotFound(id) => write!(f, "gallery image not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for GalleryServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for GalleryServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::ProjectNotFound(project_uuid) => Self::ProjectNotFound(project_uuid),
            RepoError::ImageNotFound(image_uuid) => Self::ImageNotFound(image_uuid),
            other => Self::Repo(other),
        }
    }
}

/// Gallery service facade.
pub struct GalleryService<R: GalleryRepository> {
    repo: R,
}

impl<R: GalleryRepository> GalleryService<R> {
    /// Creates service from repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Stores raw image bytes under `project_uuid`.
    pub fn import_image(
        &self,
        project_uuid: ProjectId,
        image_data: Vec<u8>,
    ) -> Result<GalleryImage, GalleryServiceError> {
        if image_data.is_empty() {
            return Err(GalleryServiceError::EmptyImageData);
        }
        if !self.repo.project_exists(project_uuid)? {
            return Err(GalleryServiceError::ProjectNotFound(project_uuid));
        }

        let image = GalleryImage::new(project_uuid, image_data);
        self.repo.insert_image(&image).map_err(Into::into)
    }

    /// Lists all images of one project, ascending by creation time.
    pub fn list_images(
        &self,
        project_uuid: ProjectId,
    ) -> Result<Vec<GalleryImage>, GalleryServiceError> {
        if !self.repo.project_exists(project_uuid)? {
            return Err(GalleryServiceError::ProjectNotFound(project_uuid));
        }
        self.repo.list_project_images(project_uuid).map_err(Into::into)
    }

    /// Deletes one image from the gallery.
    pub fn delete_image(&self, image_uuid: GalleryImageId) -> Result<(), GalleryServiceError> {
        self.repo.delete_image(image_uuid).map_err(Into::into)
    }
}
