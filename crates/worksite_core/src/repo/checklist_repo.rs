//! Checklist repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide persistence APIs for the two-level checklist forest.
//! - Keep SQL details, ordering behavior, and delete transactions inside
//!   the repository boundary.
//!
//! # Invariants
//! - Project listing is deterministic: `created_at ASC, rowid ASC` (ties
//!   resolve to insertion order).
//! - Every write commits before the call returns; mutating calls hand back
//!   the row as re-read from storage.
//! - Removing a child that empties its parent removes the parent in the
//!   same transaction.

use crate::db::migrations::latest_version;
use crate::model::checklist::{ChecklistItem, ChecklistItemId};
use crate::model::project::ProjectId;
use crate::repo::{parse_bool, parse_uuid, RepoError, RepoResult};
use rusqlite::{params, Connection, Row, Transaction, TransactionBehavior};

const ITEM_SELECT_SQL: &str = "SELECT
    item_uuid,
    project_uuid,
    parent_uuid,
    content,
    is_checked,
    created_at
FROM checklist_items";

/// Repository interface for checklist forest operations.
pub trait ChecklistRepository {
    /// Returns whether the project row exists.
    fn project_exists(&self, project_uuid: ProjectId) -> RepoResult<bool>;
    /// Persists one item and returns it as re-read from storage.
    fn insert_item(&self, item: &ChecklistItem) -> RepoResult<ChecklistItem>;
    /// Loads one item by id.
    fn get_item(&self, item_uuid: ChecklistItemId) -> RepoResult<Option<ChecklistItem>>;
    /// Lists all items of one project, ascending by creation time.
    fn list_project_items(&self, project_uuid: ProjectId) -> RepoResult<Vec<ChecklistItem>>;
    /// Replaces one item's text and returns the updated row.
    fn update_content(
        &self,
        item_uuid: ChecklistItemId,
        content: &str,
    ) -> RepoResult<ChecklistItem>;
    /// Replaces one item's checked flag and returns the updated row.
    fn update_checked(
        &self,
        item_uuid: ChecklistItemId,
        is_checked: bool,
    ) -> RepoResult<ChecklistItem>;
    /// Deletes one child item; deletes the parent too when the removal
    /// left it with no children. Returns whether the parent was removed.
    fn remove_child_item(
        &self,
        child_uuid: ChecklistItemId,
        parent_uuid: ChecklistItemId,
    ) -> RepoResult<bool>;
    /// Deletes one root item together with its children. Returns how many
    /// children were removed alongside it.
    fn remove_root_item(&self, root_uuid: ChecklistItemId) -> RepoResult<usize>;
}

/// SQLite-backed checklist repository.
#[derive(Debug)]
pub struct SqliteChecklistRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteChecklistRepository<'conn> {
    /// Creates repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl ChecklistRepository for SqliteChecklistRepository<'_> {
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

    fn insert_item(&self, item: &ChecklistItem) -> RepoResult<ChecklistItem> {
        self.conn.execute(
            "INSERT INTO checklist_items (
                item_uuid,
                project_uuid,
                parent_uuid,
                content,
                is_checked,
                created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                item.item_uuid.to_string(),
                item.project_uuid.to_string(),
                item.parent_uuid.map(|value| value.to_string()),
                item.content.as_str(),
                i64::from(item.is_checked),
                item.created_at,
            ],
        )?;
        load_required_item(self.conn, item.item_uuid)
    }

    fn get_item(&self, item_uuid: ChecklistItemId) -> RepoResult<Option<ChecklistItem>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{ITEM_SELECT_SQL} WHERE item_uuid = ?1;"))?;
        let mut rows = stmt.query([item_uuid.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_item_row(row)?));
        }
        Ok(None)
    }

    fn list_project_items(&self, project_uuid: ProjectId) -> RepoResult<Vec<ChecklistItem>> {
        let mut stmt = self.conn.prepare(&format!(
            "{ITEM_SELECT_SQL}
             WHERE project_uuid = ?1
             ORDER BY created_at ASC, rowid ASC;"
        ))?;
        let mut rows = stmt.query([project_uuid.to_string()])?;
        let mut items = Vec::new();
        while let Some(row) = rows.next()? {
            items.push(parse_item_row(row)?);
        }
        Ok(items)
    }

    fn update_content(
        &self,
        item_uuid: ChecklistItemId,
        content: &str,
    ) -> RepoResult<ChecklistItem> {
        let changed = self.conn.execute(
            "UPDATE checklist_items SET content = ?2 WHERE item_uuid = ?1;",
            params![item_uuid.to_string(), content],
        )?;
        if changed == 0 {
            return Err(RepoError::ItemNotFound(item_uuid));
        }
        load_required_item(self.conn, item_uuid)
    }

    fn update_checked(
        &self,
        item_uuid: ChecklistItemId,
        is_checked: bool,
    ) -> RepoResult<ChecklistItem> {
        let changed = self.conn.execute(
            "UPDATE checklist_items SET is_checked = ?2 WHERE item_uuid = ?1;",
            params![item_uuid.to_string(), i64::from(is_checked)],
        )?;
        if changed == 0 {
            return Err(RepoError::ItemNotFound(item_uuid));
        }
        load_required_item(self.conn, item_uuid)
    }

    fn remove_child_item(
        &self,
        child_uuid: ChecklistItemId,
        parent_uuid: ChecklistItemId,
    ) -> RepoResult<bool> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;

        let changed = tx.execute(
            "DELETE FROM checklist_items WHERE item_uuid = ?1;",
            [child_uuid.to_string()],
        )?;
        if changed == 0 {
            return Err(RepoError::ItemNotFound(child_uuid));
        }

        // Post-condition for the cascade rule: a parent emptied by this
        // removal must not survive it.
        let remaining: i64 = tx.query_row(
            "SELECT COUNT(*) FROM checklist_items WHERE parent_uuid = ?1;",
            [parent_uuid.to_string()],
            |row| row.get(0),
        )?;

        let parent_removed = if remaining == 0 {
            tx.execute(
                "DELETE FROM checklist_items WHERE item_uuid = ?1;",
                [parent_uuid.to_string()],
            )? > 0
        } else {
            false
        };

        tx.commit()?;
        Ok(parent_removed)
    }

    fn remove_root_item(&self, root_uuid: ChecklistItemId) -> RepoResult<usize> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;

        let children_removed = tx.execute(
            "DELETE FROM checklist_items WHERE parent_uuid = ?1;",
            [root_uuid.to_string()],
        )?;
        let changed = tx.execute(
            "DELETE FROM checklist_items WHERE item_uuid = ?1;",
            [root_uuid.to_string()],
        )?;
        if changed == 0 {
            return Err(RepoError::ItemNotFound(root_uuid));
        }

        tx.commit()?;
        Ok(children_removed)
    }
}

fn load_required_item(
    conn: &Connection,
    item_uuid: ChecklistItemId,
) -> RepoResult<ChecklistItem> {
    let mut stmt = conn.prepare(&format!("{ITEM_SELECT_SQL} WHERE item_uuid = ?1;"))?;
    let mut rows = stmt.query([item_uuid.to_string()])?;
    if let Some(row) = rows.next()? {
        return parse_item_row(row);
    }
    Err(RepoError::ItemNotFound(item_uuid))
}

fn parse_item_row(row: &Row<'_>) -> RepoResult<ChecklistItem> {
    let item_uuid_text: String = row.get("item_uuid")?;
    let project_uuid_text: String = row.get("project_uuid")?;
    let parent_uuid = row
        .get::<_, Option<String>>("parent_uuid")?
        .map(|value| parse_uuid(&value, "checklist_items.parent_uuid"))
        .transpose()?;

    Ok(ChecklistItem {
        item_uuid: parse_uuid(&item_uuid_text, "checklist_items.item_uuid")?,
        project_uuid: parse_uuid(&project_uuid_text, "checklist_items.project_uuid")?,
        parent_uuid,
        content: row.get("content")?,
        is_checked: parse_bool(row.get("is_checked")?, "checklist_items.is_checked")?,
        created_at: row.get("created_at")?,
    })
}

fn ensure_connection_ready(conn: &Connection) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    for table in ["projects", "checklist_items"] {
        let exists: i64 = conn.query_row(
            "SELECT EXISTS(
                SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1
            );",
            [table],
            |row| row.get(0),
        )?;
        if exists != 1 {
            return Err(RepoError::MissingRequiredTable(table));
        }
    }

    Ok(())
}
