//! Gallery image domain model.
//!
//! Images are opaque byte blobs keyed by project. Decoding and display are
//! the embedding application's concern; the core only guarantees the bytes
//! come back as stored.

use crate::model::epoch_ms_now;
use crate::model::project::ProjectId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for one stored image.
pub type GalleryImageId = Uuid;

/// One stored gallery image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryImage {
    /// Stable global ID assigned at creation.
    pub image_uuid: GalleryImageId,
    /// Owning project.
    pub project_uuid: ProjectId,
    /// Raw image bytes as handed in by the caller. Never empty.
    pub image_data: Vec<u8>,
    /// Epoch ms creation timestamp.
    pub created_at: i64,
}

impl GalleryImage {
    /// Creates an image record for `project_uuid` from raw bytes.
    pub fn new(project_uuid: ProjectId, image_data: Vec<u8>) -> Self {
        Self {
            image_uuid: Uuid::new_v4(),
            project_uuid,
            image_data,
            created_at: epoch_ms_now(),
        }
    }
}
