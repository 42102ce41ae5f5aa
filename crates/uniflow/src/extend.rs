//! Shallow merge for object-shaped values.

use serde_json::{Map, Value};

/// Merges the given objects into a new one, later sources overriding earlier
/// ones on key collision. Inputs are left untouched; nested values are
/// copied as-is, not merged.
pub fn extend<'a, I>(sources: I) -> Map<String, Value>
where
    I: IntoIterator<Item = &'a Map<String, Value>>,
{
    let mut merged = Map::new();
    for source in sources {
        for (key, value) in source {
            merged.insert(key.clone(), value.clone());
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn later_sources_override_earlier_ones() {
        let base = object(json!({ "a": 1, "b": 2 }));
        let patch = object(json!({ "b": 20, "c": 30 }));

        let merged = extend([&base, &patch]);
        assert_eq!(Value::Object(merged), json!({ "a": 1, "b": 20, "c": 30 }));

        // Inputs survive unchanged.
        assert_eq!(base.get("b"), Some(&json!(2)));
        assert_eq!(patch.len(), 2);
    }

    #[test]
    fn no_sources_yields_an_empty_object() {
        let none: [&Map<String, Value>; 0] = [];
        assert!(extend(none).is_empty());
    }

    #[test]
    fn nested_values_are_not_deep_merged() {
        let base = object(json!({ "nested": { "keep": true, "x": 1 } }));
        let patch = object(json!({ "nested": { "x": 2 } }));

        let merged = extend([&base, &patch]);
        assert_eq!(Value::Object(merged), json!({ "nested": { "x": 2 } }));
    }
}
