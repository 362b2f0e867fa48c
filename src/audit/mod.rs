//! Audit trail for CreatorFlow
//!
//! Every create, update and delete against a collection is appended to
//! `audit.log` as one JSON object per line, with before/after snapshots and
//! a short summary of the fields that changed. Bulk operations share a
//! batch id so they can be read back as one unit.
//!
//! Payments are recorded as project updates; the log is the only place
//! where individual payments can be reconstructed from.

mod diff;
mod entry;
mod logger;

pub use diff::generate_diff;
pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
