//! Change summaries for audit entries
//!
//! Compares the JSON form of a record before and after an update and lists
//! the top-level fields that changed.

use serde_json::Value;

/// Fields refreshed on every write; listing them would only add noise
const BOOKKEEPING_FIELDS: &[&str] = &["updated_at"];

const MAX_STRING_CHARS: usize = 40;

/// Summarize the fields that differ between two serialized records
///
/// Returns `None` when nothing but bookkeeping fields changed.
pub fn summarize_changes(before: &Value, after: &Value) -> Option<String> {
    let changes: Vec<String> = match (before, after) {
        (Value::Object(before_obj), Value::Object(after_obj)) => {
            let mut changes = Vec::new();

            for (key, before_val) in before_obj {
                if BOOKKEEPING_FIELDS.contains(&key.as_str()) {
                    continue;
                }
                match after_obj.get(key) {
                    Some(after_val) if after_val == before_val => {}
                    Some(after_val) => changes.push(format!(
                        "{}: {} -> {}",
                        key,
                        render(before_val),
                        render(after_val)
                    )),
                    None => changes.push(format!("{}: {} -> (removed)", key, render(before_val))),
                }
            }

            for (key, after_val) in after_obj {
                if !before_obj.contains_key(key) && !BOOKKEEPING_FIELDS.contains(&key.as_str()) {
                    changes.push(format!("{}: (added) -> {}", key, render(after_val)));
                }
            }

            changes
        }
        _ if before != after => vec![format!("{} -> {}", render(before), render(after))],
        _ => Vec::new(),
    };

    if changes.is_empty() {
        None
    } else {
        Some(changes.join(", "))
    }
}

fn render(value: &Value) -> String {
    match value {
        Value::String(s) if s.chars().count() > MAX_STRING_CHARS => {
            let head: String = s.chars().take(MAX_STRING_CHARS - 3).collect();
            format!("\"{}...\"", head)
        }
        Value::Array(items) => format!("[{} items]", items.len()),
        Value::Object(fields) => format!("{{{} fields}}", fields.len()),
        other => other.to_string(),
    }
}
