//! Change summaries for update entries

use serde_json::{Map, Value};

/// Fields that change on every write and carry no information for a reader
const IGNORED_FIELDS: &[&str] = &["updated_at"];

const MAX_STRING_LEN: usize = 40;

/// Summarize what changed between two serialized records.
///
/// Nested objects are walked with dotted paths (`payer.id`). Returns `None`
/// when nothing a reader would care about changed.
pub fn diff_summary(before: &Value, after: &Value) -> Option<String> {
    let mut changes = Vec::new();
    collect_changes(before, after, "", &mut changes);

    if changes.is_empty() {
        None
    } else {
        Some(changes.join(", "))
    }
}

fn collect_changes(before: &Value, after: &Value, path: &str, changes: &mut Vec<String>) {
    match (before, after) {
        (Value::Object(before_obj), Value::Object(after_obj)) => {
            collect_object_changes(before_obj, after_obj, path, changes);
        }
        _ if before != after => {
            let label = if path.is_empty() { "value" } else { path };
            changes.push(format!("{}: {} -> {}", label, render(before), render(after)));
        }
        _ => {}
    }
}

fn collect_object_changes(
    before: &Map<String, Value>,
    after: &Map<String, Value>,
    path: &str,
    changes: &mut Vec<String>,
) {
    let mut keys: Vec<&String> = before.keys().chain(after.keys()).collect();
    keys.sort();
    keys.dedup();

    for key in keys {
        if path.is_empty() && IGNORED_FIELDS.contains(&key.as_str()) {
            continue;
        }

        let field = if path.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", path, key)
        };

        match (before.get(key), after.get(key)) {
            (Some(old), Some(new)) => collect_changes(old, new, &field, changes),
            (Some(old), None) => changes.push(format!("{}: {} -> (none)", field, render(old))),
            (None, Some(new)) => changes.push(format!("{}: (none) -> {}", field, render(new))),
            (None, None) => {}
        }
    }
}

fn render(value: &Value) -> String {
    match value {
        Value::String(s) if s.chars().count() > MAX_STRING_LEN => {
            let head: String = s.chars().take(MAX_STRING_LEN - 3).collect();
            format!("\"{}...\"", head)
        }
        Value::Array(items) => format!("[{} items]", items.len()),
        Value::Object(fields) => format!("{{{} fields}}", fields.len()),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_no_changes() {
        let value = json!({"name": "Alice", "amount": 1000});
        assert_eq!(diff_summary(&value, &value), None);
    }

    #[test]
    fn test_changed_fields_in_key_order() {
        let before = json!({"name": "Taxi", "amount": 1000});
        let after = json!({"name": "Airport taxi", "amount": 1500});

        assert_eq!(
            diff_summary(&before, &after),
            Some(r#"amount: 1000 -> 1500, name: "Taxi" -> "Airport taxi""#.to_string())
        );
    }

    #[test]
    fn test_nested_paths() {
        let before = json!({"payer": {"kind": "person", "id": "a"}});
        let after = json!({"payer": {"kind": "subgroup", "id": "b"}});

        assert_eq!(
            diff_summary(&before, &after),
            Some(r#"payer.id: "a" -> "b", payer.kind: "person" -> "subgroup""#.to_string())
        );
    }

    #[test]
    fn test_added_removed_and_ignored() {
        let before = json!({"note": "cash", "updated_at": "2026-01-01"});
        let after = json!({"category": "Food", "updated_at": "2026-01-02"});

        assert_eq!(
            diff_summary(&before, &after),
            Some(r#"category: (none) -> "Food", note: "cash" -> (none)"#.to_string())
        );
    }

    #[test]
    fn test_long_strings_and_collections() {
        let before = json!({"description": "x".repeat(60), "members": ["a"]});
        let after = json!({"description": "y", "members": ["a", "b"]});

        let summary = diff_summary(&before, &after).unwrap();
        assert!(summary.contains("...\" -> \"y\""));
        assert!(summary.contains("members: [1 items] -> [2 items]"));
    }
}
