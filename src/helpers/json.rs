use serde_json::Value;

pub fn value_at<'a>(root: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter().try_fold(root, |node, key| node.get(key))
}

pub fn str_at<'a>(root: &'a Value, path: &[&str]) -> Option<&'a str> {
    value_at(root, path).and_then(Value::as_str)
}

pub fn non_empty_str_at<'a>(root: &'a Value, path: &[&str]) -> Option<&'a str> {
    str_at(root, path).filter(|s| !s.is_empty())
}

/// Positive dimension or absent. Zero and negative values count as unknown.
pub fn dim_at(root: &Value, path: &[&str]) -> Option<u32> {
    value_at(root, path)
        .and_then(Value::as_u64)
        .and_then(|raw| u32::try_from(raw).ok())
        .filter(|dim| *dim > 0)
}

pub fn array_at<'a>(root: &'a Value, path: &[&str]) -> Option<&'a [Value]> {
    value_at(root, path).and_then(Value::as_array).map(Vec::as_slice)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn value_at_walks_nested_objects() {
        let root = json!({"a": {"b": {"c": 7}}});
        assert_eq!(value_at(&root, &["a", "b", "c"]), Some(&json!(7)));
        assert_eq!(value_at(&root, &[]), Some(&root));
    }

    #[test]
    fn missing_intermediate_key_is_absence() {
        let root = json!({"a": {"b": 1}});
        assert_eq!(value_at(&root, &["a", "x", "c"]), None);
        assert_eq!(str_at(&root, &["a", "b", "c"]), None);
        assert_eq!(dim_at(&root, &["nope"]), None);
    }

    #[test]
    fn non_object_intermediate_is_absence_not_panic() {
        let root = json!({"a": [1, 2, 3]});
        assert_eq!(value_at(&root, &["a", "b"]), None);
        assert_eq!(str_at(&json!("scalar"), &["a"]), None);
    }

    #[test]
    fn non_empty_str_rejects_empty() {
        let root = json!({"url": "", "other": "x"});
        assert_eq!(non_empty_str_at(&root, &["url"]), None);
        assert_eq!(non_empty_str_at(&root, &["other"]), Some("x"));
    }

    #[test]
    fn dim_requires_positive_integer() {
        let root = json!({"w": 1080, "zero": 0, "text": "720"});
        assert_eq!(dim_at(&root, &["w"]), Some(1080));
        assert_eq!(dim_at(&root, &["zero"]), None);
        assert_eq!(dim_at(&root, &["text"]), None);
    }

    #[test]
    fn array_at_yields_slice() {
        let root = json!({"list": [{"x": 1}]});
        assert_eq!(array_at(&root, &["list"]).map(<[Value]>::len), Some(1));
        assert_eq!(array_at(&root, &["missing"]), None);
    }
}
