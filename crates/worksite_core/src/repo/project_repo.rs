//! Project repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide persistence APIs for project records: creation, description
//!   editing, and contact assignment.
//!
//! # Invariants
//! - Mutating calls hand back the row as re-read from storage.
//! - Contact assignment references an existing directory contact; the
//!   schema clears the assignment when that contact is deleted.

use crate::model::contact::ContactId;
use crate::model::project::{Project, ProjectId};
use crate::repo::{parse_uuid, RepoError, RepoResult};
use rusqlite::{params, Connection, Row};

const PROJECT_SELECT_SQL: &str = "SELECT
    project_uuid,
    name,
    description,
    contact_uuid,
    created_at
FROM projects";

/// Repository interface for project record operations.
pub trait ProjectRepository {
    /// Persists one project and returns it as re-read from storage.
    fn insert_project(&self, project: &Project) -> RepoResult<Project>;
    /// Loads one project by id.
    fn get_project(&self, project_uuid: ProjectId) -> RepoResult<Option<Project>>;
    /// Replaces the description text and returns the updated row.
    fn update_description(
        &self,
        project_uuid: ProjectId,
        description: &str,
    ) -> RepoResult<Project>;
    /// Replaces the contact assignment and returns the updated row.
    fn update_contact(
        &self,
        project_uuid: ProjectId,
        contact_uuid: Option<ContactId>,
    ) -> RepoResult<Project>;
    /// Returns whether the contact row exists.
    fn contact_exists(&self, contact_uuid: ContactId) -> RepoResult<bool>;
}

/// SQLite-backed project repository.
pub struct SqliteProjectRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteProjectRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl ProjectRepository for SqliteProjectRepository<'_> {
    fn insert_project(&self, project: &Project) -> RepoResult<Project> {
        self.conn.execute(
            "INSERT INTO projects (
                project_uuid,
                name,
                description,
                contact_uuid,
                created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                project.project_uuid.to_string(),
                project.name.as_str(),
                project.description.as_str(),
                project.contact_uuid.map(|value| value.to_string()),
                project.created_at,
            ],
        )?;
        load_required_project(self.conn, project.project_uuid)
    }

    fn get_project(&self, project_uuid: ProjectId) -> RepoResult<Option<Project>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{PROJECT_SELECT_SQL} WHERE project_uuid = ?1;"))?;
        let mut rows = stmt.query([project_uuid.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_project_row(row)?));
        }
        Ok(None)
    }

    fn update_description(
        &self,
        project_uuid: ProjectId,
        description: &str,
    ) -> RepoResult<Project> {
        let changed = self.conn.execute(
            "UPDATE projects SET description = ?2 WHERE project_uuid = ?1;",
            params![project_uuid.to_string(), description],
        )?;
        if changed == 0 {
            return Err(RepoError::ProjectNotFound(project_uuid));
        }
        load_required_project(self.conn, project_uuid)
    }

    fn update_contact(
        &self,
        project_uuid: ProjectId,
        contact_uuid: Option<ContactId>,
    ) -> RepoResult<Project> {
        let changed = self.conn.execute(
            "UPDATE projects SET contact_uuid = ?2 WHERE project_uuid = ?1;",
            params![
                project_uuid.to_string(),
                contact_uuid.map(|value| value.to_string()),
            ],
        )?;
        if changed == 0 {
            return Err(RepoError::ProjectNotFound(project_uuid));
        }
        load_required_project(self.conn, project_uuid)
    }

    fn contact_exists(&self, contact_uuid: ContactId) -> RepoResult<bool> {
        let exists: i64 = self.conn.query_row(
            "SELECT EXISTS(
                SELECT 1 FROM contacts WHERE contact_uuid = ?1
            );",
            [contact_uuid.to_string()],
            |row| row.get(0),
        )?;
        Ok(exists == 1)
    }
}

fn load_required_project(conn: &Connection, project_uuid: ProjectId) -> RepoResult<Project> {
    let mut stmt = conn.prepare(&format!("{PROJECT_SELECT_SQL} WHERE project_uuid = ?1;"))?;
    let mut rows = stmt.query([project_uuid.to_string()])?;
    if let Some(row) = rows.next()? {
        return parse_project_row(row);
    }
    Err(RepoError::ProjectNotFound(project_uuid))
}

fn parse_project_row(row: &Row<'_>) -> RepoResult<Project> {
    let project_uuid_text: String = row.get("project_uuid")?;
    let contact_uuid = row
        .get::<_, Option<String>>("contact_uuid")?
        .map(|value| parse_uuid(&value, "projects.contact_uuid"))
        .transpose()?;

    Ok(Project {
        project_uuid: parse_uuid(&project_uuid_text, "projects.project_uuid")?,
        name: row.get("name")?,
        description: row.get("description")?,
        contact_uuid,
        created_at: row.get("created_at")?,
    })
}
