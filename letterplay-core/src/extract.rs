use serde_json::Value;

/// Keys under which list endpoints wrap their array, in lookup order.
pub const LIST_KEYS: &[&str] = &["data", "results", "ranking", "jogos", "games", "items"];

/// Pull the array out of a list response.
///
/// A bare array is returned as-is. An object yields the first of
/// [`LIST_KEYS`] whose value is an array. Anything else is an empty slice.
pub fn extract_list(response: &Value) -> &[Value] {
    match response {
        Value::Array(items) => items,
        Value::Object(map) => LIST_KEYS
            .iter()
            .find_map(|key| map.get(*key).and_then(Value::as_array))
            .map(Vec::as_slice)
            .unwrap_or(&[]),
        _ => &[],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn bare_array() {
        let v = json!([1, 2]);
        assert_eq!(extract_list(&v), &[json!(1), json!(2)]);
    }

    #[test]
    fn ranking_key() {
        let v = json!({"ranking": [1, 2, 3]});
        assert_eq!(extract_list(&v), &[json!(1), json!(2), json!(3)]);
    }

    #[test]
    fn empty_object() {
        assert!(extract_list(&json!({})).is_empty());
    }

    #[test]
    fn first_array_key_wins() {
        // `data` is not an array, so lookup continues to `results`
        let v = json!({"data": {"nested": true}, "results": ["a"], "items": ["b"]});
        assert_eq!(extract_list(&v), &[json!("a")]);
    }

    #[test]
    fn items_key_for_paginated_users() {
        let v = json!({"items": [{"id": 1}], "total": 1});
        assert_eq!(extract_list(&v).len(), 1);
    }

    #[test]
    fn scalars_yield_empty() {
        assert!(extract_list(&json!(null)).is_empty());
        assert!(extract_list(&json!("text")).is_empty());
        assert!(extract_list(&json!(5)).is_empty());
    }
}
