//! Audit logging for fintrack
//!
//! Every create, update and delete of a record, and every goal
//! contribution, is appended to `audit.log` with the record's state before
//! and after. The log is line-delimited JSON (JSONL).
//!
//! - `AuditEntry`: one logged operation with timestamp, entity information
//!   and optional before/after values.
//! - `AuditLogger`: appends entries to the log file and reads them back.
//! - `summarize_changes`: the one-line field diff stored on update entries.

mod diff;
mod entry;
mod logger;

pub use diff::summarize_changes;
pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
