//! Property filter shared by every backend.
//!
//! A record matches `(property, value)` when its serialized field equals one
//! of the candidates, or when the field is an array containing one of them.
//! An array `value` supplies several candidates (an `IN` query); any other
//! value is a single candidate.

use serde_json::Value;

pub fn candidates(value: &Value) -> Vec<&Value> {
    match value {
        Value::Array(items) => items.iter().collect(),
        other => vec![other],
    }
}

/// Returns true when `document[property]` matches `value`.
pub fn matches(document: &Value, property: &str, value: &Value) -> bool {
    let Some(field) = document.get(property) else {
        return false;
    };

    candidates(value).into_iter().any(|candidate| {
        field == candidate
            || matches!(field, Value::Array(items) if items.iter().any(|item| item == candidate))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scalar_equality() {
        let doc = json!({ "document": "123", "code": "1A-M" });
        assert!(matches(&doc, "document", &json!("123")));
        assert!(!matches(&doc, "document", &json!("124")));
    }

    #[test]
    fn test_missing_property_never_matches() {
        let doc = json!({ "code": "1A-M" });
        assert!(!matches(&doc, "teacher", &json!("t1")));
        assert!(!matches(&doc, "teacher", &Value::Null));
    }

    #[test]
    fn test_null_field_matches_null() {
        let doc = json!({ "teacher": null });
        assert!(matches(&doc, "teacher", &Value::Null));
    }

    #[test]
    fn test_array_field_contains_value() {
        let doc = json!({ "parents": ["p1", "p2"] });
        assert!(matches(&doc, "parents", &json!("p2")));
        assert!(!matches(&doc, "parents", &json!("p3")));
    }

    #[test]
    fn test_array_value_is_an_in_query() {
        let doc = json!({ "class": "c2", "parents": ["p1"] });
        assert!(matches(&doc, "class", &json!(["c1", "c2"])));
        assert!(!matches(&doc, "class", &json!(["c3"])));
        assert!(matches(&doc, "parents", &json!(["p9", "p1"])));
        assert!(!matches(&doc, "class", &json!([])));
    }
}
