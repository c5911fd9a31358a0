//! Domain records for field-service project tracking.
//!
//! # Responsibility
//! - Define the plain data shapes shared by repository and service layers.
//! - Keep construction helpers next to the records they build.
//!
//! # Invariants
//! - Every record is identified by a stable UUID assigned at creation.
//! - Creation timestamps are epoch milliseconds and never change.

pub mod checklist;
pub mod contact;
pub mod gallery;
pub mod project;

use std::time::{SystemTime, UNIX_EPOCH};

/// Current wall-clock time as epoch milliseconds.
///
/// Clamps to zero if the system clock reports a pre-epoch time.
pub(crate) fn epoch_ms_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as i64)
        .unwrap_or_default()
}
