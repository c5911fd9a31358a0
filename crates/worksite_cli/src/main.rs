//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `worksite_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

use worksite_core::db::open_db_in_memory;
use worksite_core::{ChecklistService, ProjectService, SqliteChecklistRepository, SqliteProjectRepository};

fn main() {
    println!("worksite_core version={}", worksite_core::core_version());

    // Exercise the full stack once against a throwaway in-memory store.
    if let Err(err) = smoke() {
        eprintln!("smoke check failed: {err}");
        std::process::exit(1);
    }
    println!("smoke check ok");
}

fn smoke() -> Result<(), Box<dyn std::error::Error>> {
    let conn = open_db_in_memory()?;
    let projects = ProjectService::new(SqliteProjectRepository::new(&conn));
    let checklist = ChecklistService::new(SqliteChecklistRepository::try_new(&conn)?);

    let project = projects.create_project("Smoke test site")?;
    let root = checklist.add_root(project.project_uuid, "Buy cable")?;
    checklist.add_child(project.project_uuid, root.item_uuid, "10m")?;

    let items = checklist.load(project.project_uuid)?;
    println!("smoke checklist items={}", items.len());
    Ok(())
}
