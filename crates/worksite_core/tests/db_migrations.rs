use worksite_core::db::migrations::latest_version;
use worksite_core::db::{open_db, open_db_in_memory};

#[test]
fn migrations_reach_latest_version() {
    let conn = open_db_in_memory().unwrap();
    let version: u32 = conn
        .query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(version, latest_version());
}

#[test]
fn migration_1_creates_all_tables() {
    let conn = open_db_in_memory().unwrap();

    for table in ["contacts", "projects", "checklist_items", "gallery_images"] {
        let exists: i64 = conn
            .query_row(
                "SELECT EXISTS(
                    SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1
                );",
                [table],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(exists, 1, "missing table {table}");
    }
}

#[test]
fn checklist_items_has_expected_columns() {
    let conn = open_db_in_memory().unwrap();

    let mut stmt = conn.prepare("PRAGMA table_info(checklist_items);").unwrap();
    let mut rows = stmt.query([]).unwrap();
    let mut columns = Vec::new();
    while let Some(row) = rows.next().unwrap() {
        let column_name: String = row.get(1).unwrap();
        columns.push(column_name);
    }
    for column in [
        "item_uuid",
        "project_uuid",
        "parent_uuid",
        "content",
        "is_checked",
        "created_at",
    ] {
        assert!(columns.contains(&column.to_string()), "missing {column}");
    }
}

#[test]
fn foreign_keys_are_enabled() {
    let conn = open_db_in_memory().unwrap();
    let enabled: i64 = conn
        .query_row("PRAGMA foreign_keys;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(enabled, 1);
}

#[test]
fn reopening_a_file_database_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("worksite.db");

    {
        let conn = open_db(&db_path).unwrap();
        conn.execute(
            "INSERT INTO projects (project_uuid, name, description, created_at)
             VALUES ('11111111-1111-1111-1111-111111111111', 'Site A', '', 1);",
            [],
        )
        .unwrap();
    }

    let conn = open_db(&db_path).unwrap();
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM projects;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 1);

    let version: u32 = conn
        .query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(version, latest_version());
}
