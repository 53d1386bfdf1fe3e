//! Audit log display formatting

use crate::audit::AuditEntry;

/// Format audit entries, one block per entry, in the order given
pub fn format_audit_log(entries: &[AuditEntry]) -> String {
    if entries.is_empty() {
        return "Audit log is empty.\n".to_string();
    }

    entries
        .iter()
        .map(|e| format!("{}\n", e.format_human_readable()))
        .collect()
}
