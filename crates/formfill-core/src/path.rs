//! Dot-notation path resolution over nested application data.

use serde_json::Value;

/// Resolve a dot-notation path against a nested data object.
///
/// Returns `None` the moment any intermediate is null, missing, or not an
/// object — absence is an answer here, not an error. Malformed paths
/// (empty segments, trailing dots) simply fail to resolve.
pub fn resolve<'a>(data: &'a Value, dot_path: &str) -> Option<&'a Value> {
    let mut current = data;
    for segment in dot_path.split('.') {
        current = current.as_object()?.get(segment)?;
    }
    Some(current)
}

/// Collect the dot-paths of every leaf in a data object.
///
/// Arrays count as leaves (repeating sections are rendered whole, never
/// addressed element-wise). Used to discover data the layout mapping set
/// does not cover.
pub fn collect_paths(data: &Value) -> Vec<String> {
    let mut paths = Vec::new();
    collect_into(data, String::new(), &mut paths);
    paths
}

fn collect_into(value: &Value, prefix: String, out: &mut Vec<String>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                collect_into(child, path, out);
            }
        }
        _ => {
            if !prefix.is_empty() {
                out.push(prefix);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn resolve_top_level() {
        let data = json!({"name": "Jane"});
        assert_eq!(resolve(&data, "name"), Some(&json!("Jane")));
    }

    #[test]
    fn resolve_nested() {
        let data = json!({"applicant": {"address": {"city": "Oakland"}}});
        assert_eq!(
            resolve(&data, "applicant.address.city"),
            Some(&json!("Oakland"))
        );
    }

    #[test]
    fn resolve_missing_key_is_none() {
        let data = json!({"applicant": {"lastName": "Doe"}});
        assert_eq!(resolve(&data, "applicant.firstName"), None);
    }

    #[test]
    fn resolve_missing_intermediate_is_none() {
        let data = json!({"applicant": {"lastName": "Doe"}});
        assert_eq!(resolve(&data, "spouse.lastName"), None);
    }

    #[test]
    fn resolve_through_null_is_none() {
        let data = json!({"applicant": null});
        assert_eq!(resolve(&data, "applicant.lastName"), None);
    }

    #[test]
    fn resolve_through_scalar_is_none() {
        let data = json!({"applicant": "Doe"});
        assert_eq!(resolve(&data, "applicant.lastName"), None);
    }

    #[test]
    fn resolve_through_array_is_none() {
        // Arrays are not dot-addressable; repeating sections resolve whole.
        let data = json!({"addresses": [{"city": "X"}]});
        assert_eq!(resolve(&data, "addresses.0.city"), None);
        assert!(resolve(&data, "addresses").is_some());
    }

    #[test]
    fn resolve_null_leaf_is_some_null() {
        let data = json!({"middleName": null});
        assert_eq!(resolve(&data, "middleName"), Some(&Value::Null));
    }

    #[test]
    fn resolve_malformed_path_is_none() {
        let data = json!({"a": {"b": 1}});
        assert_eq!(resolve(&data, "a..b"), None);
        assert_eq!(resolve(&data, "a.b."), None);
        assert_eq!(resolve(&data, ""), None);
    }

    #[test]
    fn collect_paths_flat() {
        let data = json!({"a": 1, "b": "x"});
        assert_eq!(collect_paths(&data), vec!["a", "b"]);
    }

    #[test]
    fn collect_paths_nested() {
        let data = json!({"applicant": {"lastName": "Doe", "address": {"city": "X"}}});
        assert_eq!(
            collect_paths(&data),
            vec!["applicant.address.city", "applicant.lastName"]
        );
    }

    #[test]
    fn collect_paths_array_is_leaf() {
        let data = json!({"addressHistory": [{"city": "X"}, {"city": "Y"}]});
        assert_eq!(collect_paths(&data), vec!["addressHistory"]);
    }

    #[test]
    fn collect_paths_empty_object() {
        assert!(collect_paths(&json!({})).is_empty());
    }
}
