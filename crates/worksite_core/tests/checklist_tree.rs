use rusqlite::Connection;
use uuid::Uuid;
use worksite_core::db::open_db_in_memory;
use worksite_core::{
    ChecklistItem, ChecklistRepository, ChecklistService, ChecklistServiceError,
    InvalidParentReason, Project, ProjectRepository, Removal, RepoError,
    SqliteChecklistRepository, SqliteProjectRepository,
};

fn setup() -> Connection {
    open_db_in_memory().unwrap()
}

fn insert_project(conn: &Connection, name: &str) -> Project {
    let repo = SqliteProjectRepository::new(conn);
    repo.insert_project(&Project::new(name)).unwrap()
}

fn service(conn: &Connection) -> ChecklistService<SqliteChecklistRepository<'_>> {
    ChecklistService::new(SqliteChecklistRepository::try_new(conn).unwrap())
}

#[test]
fn load_sorts_by_creation_time_regardless_of_insertion_order() {
    let conn = setup();
    let project = insert_project(&conn, "Site");
    let repo = SqliteChecklistRepository::try_new(&conn).unwrap();

    // Insert out of order with explicit, distinct timestamps.
    let mut late = ChecklistItem::new_root(project.project_uuid, "late");
    late.created_at = 3_000;
    let mut early = ChecklistItem::new_root(project.project_uuid, "early");
    early.created_at = 1_000;
    let mut middle = ChecklistItem::new_root(project.project_uuid, "middle");
    middle.created_at = 2_000;
    repo.insert_item(&late).unwrap();
    repo.insert_item(&early).unwrap();
    repo.insert_item(&middle).unwrap();

    let items = service(&conn).load(project.project_uuid).unwrap();
    let contents: Vec<_> = items.iter().map(|item| item.content.as_str()).collect();
    assert_eq!(contents, ["early", "middle", "late"]);
}

#[test]
fn equal_timestamps_keep_insertion_order() {
    let conn = setup();
    let project = insert_project(&conn, "Site");
    let repo = SqliteChecklistRepository::try_new(&conn).unwrap();

    for label in ["first", "second", "third"] {
        let mut item = ChecklistItem::new_root(project.project_uuid, label);
        item.created_at = 500;
        repo.insert_item(&item).unwrap();
    }

    let items = service(&conn).load(project.project_uuid).unwrap();
    let contents: Vec<_> = items.iter().map(|item| item.content.as_str()).collect();
    assert_eq!(contents, ["first", "second", "third"]);
}

#[test]
fn add_child_links_both_directions() {
    let conn = setup();
    let project = insert_project(&conn, "Site");
    let checklist = service(&conn);

    let root = checklist.add_root(project.project_uuid, "fuse box").unwrap();
    let child = checklist
        .add_child(project.project_uuid, root.item_uuid, "check breakers")
        .unwrap();

    assert_eq!(child.parent_uuid, Some(root.item_uuid));
    assert_eq!(child.project_uuid, project.project_uuid);

    let items = checklist.load(project.project_uuid).unwrap();
    let child_ids: Vec<_> = items
        .iter()
        .filter(|item| item.parent_uuid == Some(root.item_uuid))
        .map(|item| item.item_uuid)
        .collect();
    assert_eq!(child_ids, [child.item_uuid]);
}

#[test]
fn removing_last_child_removes_parent_too() {
    let conn = setup();
    let project = insert_project(&conn, "Site");
    let checklist = service(&conn);

    let root = checklist.add_root(project.project_uuid, "crawl space").unwrap();
    let child = checklist
        .add_child(project.project_uuid, root.item_uuid, "photos")
        .unwrap();

    let removal = checklist.remove(child.item_uuid).unwrap();
    assert_eq!(removal, Removal::Child {
        parent_removed: true
    });

    let items = checklist.load(project.project_uuid).unwrap();
    assert!(items.is_empty());
}

#[test]
fn removing_one_of_two_children_keeps_parent_and_sibling() {
    let conn = setup();
    let project = insert_project(&conn, "Site");
    let checklist = service(&conn);

    let root = checklist.add_root(project.project_uuid, "rack").unwrap();
    let child_a = checklist
        .add_child(project.project_uuid, root.item_uuid, "patch panel")
        .unwrap();
    let child_b = checklist
        .add_child(project.project_uuid, root.item_uuid, "label cables")
        .unwrap();

    let removal = checklist.remove(child_a.item_uuid).unwrap();
    assert_eq!(removal, Removal::Child {
        parent_removed: false
    });

    let items = checklist.load(project.project_uuid).unwrap();
    let ids: Vec<_> = items.iter().map(|item| item.item_uuid).collect();
    assert!(ids.contains(&root.item_uuid));
    assert!(ids.contains(&child_b.item_uuid));
    assert!(!ids.contains(&child_a.item_uuid));
}

#[test]
fn add_child_under_a_child_is_rejected_without_persisting() {
    let conn = setup();
    let project = insert_project(&conn, "Site");
    let checklist = service(&conn);

    let root = checklist.add_root(project.project_uuid, "roof").unwrap();
    let child = checklist
        .add_child(project.project_uuid, root.item_uuid, "gutters")
        .unwrap();

    let err = checklist
        .add_child(project.project_uuid, child.item_uuid, "downpipe")
        .unwrap_err();
    assert!(matches!(
        err,
        ChecklistServiceError::InvalidParent {
            parent_uuid,
            reason: InvalidParentReason::NotRoot,
        } if parent_uuid == child.item_uuid
    ));

    let items = checklist.load(project.project_uuid).unwrap();
    assert_eq!(items.len(), 2);
}

#[test]
fn add_child_under_unknown_parent_is_rejected() {
    let conn = setup();
    let project = insert_project(&conn, "Site");
    let checklist = service(&conn);
    let unknown_parent = Uuid::new_v4();

    let err = checklist
        .add_child(project.project_uuid, unknown_parent, "x")
        .unwrap_err();
    assert!(matches!(
        err,
        ChecklistServiceError::InvalidParent {
            parent_uuid,
            reason: InvalidParentReason::NotFound,
        } if parent_uuid == unknown_parent
    ));
}

#[test]
fn add_child_under_another_projects_root_is_rejected() {
    let conn = setup();
    let project_a = insert_project(&conn, "Site A");
    let project_b = insert_project(&conn, "Site B");
    let checklist = service(&conn);

    let foreign_root = checklist.add_root(project_a.project_uuid, "survey").unwrap();
    let err = checklist
        .add_child(project_b.project_uuid, foreign_root.item_uuid, "x")
        .unwrap_err();
    assert!(matches!(
        err,
        ChecklistServiceError::InvalidParent {
            reason: InvalidParentReason::ForeignProject,
            ..
        }
    ));

    assert!(checklist.load(project_b.project_uuid).unwrap().is_empty());
}

#[test]
fn load_twice_without_mutation_returns_equal_sequences() {
    let conn = setup();
    let project = insert_project(&conn, "Site");
    let checklist = service(&conn);

    let root = checklist.add_root(project.project_uuid, "walkthrough").unwrap();
    checklist
        .add_child(project.project_uuid, root.item_uuid, "notes")
        .unwrap();

    let first = checklist.load(project.project_uuid).unwrap();
    let second = checklist.load(project.project_uuid).unwrap();
    assert_eq!(first, second);
}

#[test]
fn edits_persist_immediately_and_return_stored_state() {
    let conn = setup();
    let project = insert_project(&conn, "Site");
    let checklist = service(&conn);

    let root = checklist.add_root(project.project_uuid, "").unwrap();
    assert_eq!(root.content, "");
    assert!(!root.is_checked);

    let renamed = checklist.set_text(root.item_uuid, "order parts").unwrap();
    assert_eq!(renamed.content, "order parts");

    let checked = checklist.set_checked(root.item_uuid, true).unwrap();
    assert!(checked.is_checked);

    let items = checklist.load(project.project_uuid).unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].content, "order parts");
    assert!(items[0].is_checked);
}

#[test]
fn removing_a_root_removes_its_children_with_it() {
    let conn = setup();
    let project = insert_project(&conn, "Site");
    let checklist = service(&conn);

    let root = checklist.add_root(project.project_uuid, "demolition").unwrap();
    checklist
        .add_child(project.project_uuid, root.item_uuid, "permits")
        .unwrap();
    checklist
        .add_child(project.project_uuid, root.item_uuid, "skip hire")
        .unwrap();
    let other_root = checklist.add_root(project.project_uuid, "rebuild").unwrap();

    let removal = checklist.remove(root.item_uuid).unwrap();
    assert_eq!(removal, Removal::Root {
        children_removed: 2
    });

    let items = checklist.load(project.project_uuid).unwrap();
    let ids: Vec<_> = items.iter().map(|item| item.item_uuid).collect();
    assert_eq!(ids, [other_root.item_uuid]);
}

#[test]
fn operations_on_unknown_targets_fail_cleanly() {
    let conn = setup();
    let project = insert_project(&conn, "Site");
    let checklist = service(&conn);
    let unknown = Uuid::new_v4();

    assert!(matches!(
        checklist.remove(unknown).unwrap_err(),
        ChecklistServiceError::ItemNotFound(id) if id == unknown
    ));
    assert!(matches!(
        checklist.set_text(unknown, "x").unwrap_err(),
        ChecklistServiceError::ItemNotFound(id) if id == unknown
    ));
    assert!(matches!(
        checklist.load(Uuid::new_v4()).unwrap_err(),
        ChecklistServiceError::ProjectNotFound(_)
    ));

    // Nothing leaked into the real project.
    assert!(checklist.load(project.project_uuid).unwrap().is_empty());
}

#[test]
fn repository_rejects_unmigrated_connections() {
    let conn = Connection::open_in_memory().unwrap();
    let err = SqliteChecklistRepository::try_new(&conn).unwrap_err();
    assert!(matches!(
        err,
        RepoError::UninitializedConnection { actual_version: 0, .. }
    ));
}

#[test]
fn buy_cable_walkthrough() {
    let conn = setup();
    let project = insert_project(&conn, "Cable run");
    let checklist = service(&conn);

    let root = checklist.add_root(project.project_uuid, "Buy cable").unwrap();
    let child = checklist
        .add_child(project.project_uuid, root.item_uuid, "10m")
        .unwrap();

    let items = checklist.load(project.project_uuid).unwrap();
    let ids: Vec<_> = items.iter().map(|item| item.item_uuid).collect();
    assert_eq!(ids, [root.item_uuid, child.item_uuid]);

    checklist.remove(child.item_uuid).unwrap();
    assert!(checklist.load(project.project_uuid).unwrap().is_empty());
}
