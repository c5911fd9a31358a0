//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Enforce domain invariants above the persistence boundary.

pub mod checklist_service;
pub mod contact_service;
pub mod gallery_service;
pub mod project_service;
