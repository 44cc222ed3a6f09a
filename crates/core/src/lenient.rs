//! Field accessors that default instead of failing.
//!
//! Model replies routinely drop keys, quote numbers ("165 kcal") or nest list
//! items as objects. Missing numbers read as 0, missing strings as `"Unknown"`.

use serde_json::Value as JsonValue;

pub const UNKNOWN: &str = "Unknown";

/// Numeric field, accepting numbers and strings with a leading number.
pub fn number(value: &JsonValue, key: &str) -> f64 {
    value.get(key).map(as_number).unwrap_or(0.0)
}

/// Numeric field that is `None` when the key is absent.
pub fn number_opt(value: &JsonValue, key: &str) -> Option<f64> {
    value.get(key).filter(|v| !v.is_null()).map(as_number)
}

fn as_number(value: &JsonValue) -> f64 {
    match value {
        JsonValue::Number(n) => n.as_f64().unwrap_or(0.0),
        JsonValue::String(s) => s
            .trim()
            .split(|c: char| !(c.is_ascii_digit() || c == '.'))
            .find(|part| !part.is_empty())
            .and_then(|part| part.parse().ok())
            .unwrap_or(0.0),
        _ => 0.0,
    }
}

/// String field, or `"Unknown"`.
pub fn text(value: &JsonValue, key: &str) -> String {
    text_or(value, key, UNKNOWN)
}

/// String field with an explicit default. Scalars are stringified and lists joined.
pub fn text_or(value: &JsonValue, key: &str, default: &str) -> String {
    value
        .get(key)
        .and_then(item_text)
        .unwrap_or_else(|| default.to_string())
}

/// First present key among `keys`, as text.
pub fn text_any(value: &JsonValue, keys: &[&str]) -> String {
    keys.iter()
        .find_map(|key| value.get(*key).and_then(item_text))
        .unwrap_or_else(|| UNKNOWN.to_string())
}

/// List of strings from a field that may hold a list, a single string, or objects.
pub fn string_list(value: &JsonValue, key: &str) -> Vec<String> {
    value.get(key).map(list_items).unwrap_or_default()
}

/// Items of a JSON list (or a lone scalar) as display strings.
///
/// Objects contribute their `tip` field, else their first string value.
/// Blank and `"undefined"` items are dropped.
pub fn list_items(value: &JsonValue) -> Vec<String> {
    let items: Vec<&JsonValue> = match value {
        JsonValue::Array(items) => items.iter().collect(),
        other => vec![other],
    };
    items.into_iter().filter_map(item_text).collect()
}

fn item_text(value: &JsonValue) -> Option<String> {
    let text = match value {
        JsonValue::String(s) => s.trim().to_string(),
        JsonValue::Number(n) => n.to_string(),
        JsonValue::Bool(b) => b.to_string(),
        JsonValue::Object(map) => map
            .get("tip")
            .and_then(|v| v.as_str())
            .or_else(|| map.values().find_map(|v| v.as_str()))?
            .trim()
            .to_string(),
        JsonValue::Array(items) => items
            .iter()
            .filter_map(item_text)
            .collect::<Vec<_>>()
            .join(", "),
        JsonValue::Null => return None,
    };

    if text.is_empty() || text.eq_ignore_ascii_case("undefined") {
        None
    } else {
        Some(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn numbers_default_to_zero_and_parse_units() {
        let v = json!({"calories": "165 kcal", "protein": 31, "fat": null});
        assert_eq!(number(&v, "calories"), 165.0);
        assert_eq!(number(&v, "protein"), 31.0);
        assert_eq!(number(&v, "fat"), 0.0);
        assert_eq!(number(&v, "fiber"), 0.0);
        assert_eq!(number_opt(&v, "fiber"), None);
    }

    #[test]
    fn text_defaults_to_unknown() {
        let v = json!({"food": "Rice"});
        assert_eq!(text(&v, "food"), "Rice");
        assert_eq!(text(&v, "type"), "Unknown");
    }

    #[test]
    fn list_items_handle_objects_and_junk() {
        let v = json!(["Walk daily", {"tip": "Sleep early"}, {"text": "Eat greens"}, "undefined", "  "]);
        assert_eq!(list_items(&v), vec!["Walk daily", "Sleep early", "Eat greens"]);
    }

    #[test]
    fn string_field_is_a_one_item_list() {
        let v = json!({"interactions": "None found"});
        assert_eq!(string_list(&v, "interactions"), vec!["None found"]);
    }
}
