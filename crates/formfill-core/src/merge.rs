//! Deep merge of primary and supplemental application data.

use serde_json::Value;

/// Deep-merge `primary` over `supplemental`.
///
/// Recursion happens only where both sides hold a plain object at the
/// same key; everywhere else the primary value wins wholesale. Arrays and
/// scalars are never merged element-wise — an address history supplied by
/// the primary source replaces the supplemental one entirely.
pub fn deep_merge(primary: &Value, supplemental: &Value) -> Value {
    match (primary, supplemental) {
        (Value::Object(p), Value::Object(s)) => {
            let mut merged = s.clone();
            for (key, p_val) in p {
                let entry = match s.get(key) {
                    Some(s_val) => deep_merge(p_val, s_val),
                    None => p_val.clone(),
                };
                merged.insert(key.clone(), entry);
            }
            Value::Object(merged)
        }
        _ => primary.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn supplemental_only_keys_survive() {
        let primary = json!({"a": 1});
        let supplemental = json!({"b": 2});
        assert_eq!(deep_merge(&primary, &supplemental), json!({"a": 1, "b": 2}));
    }

    #[test]
    fn primary_wins_on_conflict() {
        let primary = json!({"a": 1});
        let supplemental = json!({"a": 99, "b": 2});
        assert_eq!(deep_merge(&primary, &supplemental), json!({"a": 1, "b": 2}));
    }

    #[test]
    fn nested_objects_merge_recursively() {
        let primary = json!({"applicant": {"lastName": "Doe"}});
        let supplemental = json!({"applicant": {"firstName": "Jane", "lastName": "Smith"}});
        assert_eq!(
            deep_merge(&primary, &supplemental),
            json!({"applicant": {"firstName": "Jane", "lastName": "Doe"}})
        );
    }

    #[test]
    fn arrays_replaced_wholesale() {
        let primary = json!({"addresses": [{"city": "X"}]});
        let supplemental = json!({"addresses": [{"city": "A"}, {"city": "B"}]});
        assert_eq!(
            deep_merge(&primary, &supplemental),
            json!({"addresses": [{"city": "X"}]})
        );
    }

    #[test]
    fn primary_scalar_beats_supplemental_object() {
        let primary = json!({"spouse": "none"});
        let supplemental = json!({"spouse": {"lastName": "Doe"}});
        assert_eq!(
            deep_merge(&primary, &supplemental),
            json!({"spouse": "none"})
        );
    }

    #[test]
    fn primary_null_beats_supplemental_value() {
        // Null in the primary is still a primary value; it wins wholesale.
        let primary = json!({"middleName": null});
        let supplemental = json!({"middleName": "Ann"});
        assert_eq!(
            deep_merge(&primary, &supplemental),
            json!({"middleName": null})
        );
    }

    #[test]
    fn empty_primary_keeps_supplemental() {
        let primary = json!({});
        let supplemental = json!({"a": {"b": 1}});
        assert_eq!(deep_merge(&primary, &supplemental), supplemental);
    }

    #[test]
    fn non_object_primary_wins_at_root() {
        assert_eq!(deep_merge(&json!([1, 2]), &json!({"a": 1})), json!([1, 2]));
    }
}
