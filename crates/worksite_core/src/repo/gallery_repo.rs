//! Gallery image repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Persist raw image blobs keyed by project.
//!
//! # Invariants
//! - Project listing is deterministic: `created_at ASC, rowid ASC`.
//! - Bytes come back exactly as stored.

use crate::model::gallery::{GalleryImage, GalleryImageId};
use crate::model::project::ProjectId;
use crate::repo::{parse_uuid, RepoError, RepoResult};
use rusqlite::{params, Connection, Row};

const IMAGE_SELECT_SQL: &str = "SELECT
    image_uuid,
    project_uuid,
    image_data,
    created_at
FROM gallery_images";

/// Repository interface for gallery image operations.
pub trait GalleryRepository {
    /// Returns whether the project row exists.
    fn project_exists(&self, project_uuid: ProjectId) -> RepoResult<bool>;
    /// Persists one image and returns it as re-read from storage.
    fn insert_image(&self, image: &GalleryImage) -> RepoResult<GalleryImage>;
    /// Loads one image by id.
    fn get_image(&self, image_uuid: GalleryImageId) -> RepoResult<Option<GalleryImage>>;
    /// Lists all images of one project, ascending by creation time.
    fn list_project_images(&self, project_uuid: ProjectId) -> RepoResult<Vec<GalleryImage>>;
    /// Deletes one image.
    fn delete_image(&self, image_uuid: GalleryImageId) -> RepoResult<()>;
}

/// SQLite-backed gallery repository.
pub struct SqliteGalleryRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteGalleryRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl GalleryRepository for SqliteGalleryRepository<'_> {
    fn project_exists(&self, project_uuid: ProjectId) -> RepoResult<bool> {
        let exists: i64 = self.conn.query_row(
            "SELECT EXISTS(
                SELECT 1 FROM projects WHERE project_uuid = ?1
            );",
            [project_uuid.to_string()],
            |row| row.get(0),
        )?;
        Ok(exists == 1)
    }

    fn insert_image(&self, image: &GalleryImage) -> RepoResult<GalleryImage> {
        self.conn.execute(
            "INSERT INTO gallery_images (
                image_uuid,
                project_uuid,
                image_data,
                created_at
            ) VALUES (?1, ?2, ?3, ?4);",
            params![
                image.image_uuid.to_string(),
                image.project_uuid.to_string(),
                image.image_data.as_slice(),
                image.created_at,
            ],
        )?;
        load_required_image(self.conn, image.image_uuid)
    }

    fn get_image(&self, image_uuid: GalleryImageId) -> RepoResult<Option<GalleryImage>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{IMAGE_SELECT_SQL} WHERE image_uuid = ?1;"))?;
        let mut rows = stmt.query([image_uuid.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_image_row(row)?));
        }
        Ok(None)
    }

    fn list_project_images(&self, project_uuid: ProjectId) -> RepoResult<Vec<GalleryImage>> {
        let mut stmt = self.conn.prepare(&format!(
            "{IMAGE_SELECT_SQL}
             WHERE project_uuid = ?1
             ORDER BY created_at ASC, rowid ASC;"
        ))?;
        let mut rows = stmt.query([project_uuid.to_string()])?;
        let mut images = Vec::new();
        while let Some(row) = rows.next()? {
            images.push(parse_image_row(row)?);
        }
        Ok(images)
    }

    fn delete_image(&self, image_uuid: GalleryImageId) -> RepoResult<()> {
        let changed = self.conn.execute(
            "DELETE FROM gallery_images WHERE image_uuid = ?1;",
            [image_uuid.to_string()],
        )?;
        if changed == 0 {
            return Err(RepoError::ImageNotFound(image_uuid));
        }
        Ok(())
    }
}

fn load_required_image(conn: &Connection, image_uuid: GalleryImageId) -> RepoResult<GalleryImage> {
    let mut stmt = conn.prepare(&format!("{IMAGE_SELECT_SQL} WHERE image_uuid = ?1;"))?;
    let mut rows = stmt.query([image_uuid.to_string()])?;
    if let Some(row) = rows.next()? {
        return parse_image_row(row);
    }
    Err(RepoError::ImageNotFound(image_uuid))
}

fn parse_image_row(row: &Row<'_>) -> RepoResult<GalleryImage> {
    let image_uuid_text: String = row.get("image_uuid")?;
    let project_uuid_text: String = row.get("project_uuid")?;
    Ok(GalleryImage {
        image_uuid: parse_uuid(&image_uuid_text, "gallery_images.image_uuid")?,
        project_uuid: parse_uuid(&project_uuid_text, "gallery_images.project_uuid")?,
        image_data: row.get("image_data")?,
        created_at: row.get("created_at")?,
    })
}
