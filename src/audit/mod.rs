//! Audit log
//!
//! Every create, update and delete performed by a service is appended to
//! `audit.log` as one JSON object per line, with the record's state before
//! and after the change.

mod diff;
mod entry;
mod logger;

pub use diff::diff_summary;
pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
