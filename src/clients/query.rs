//! Query string encoding.
//!
//! Invoiced reads nested parameters in bracket notation, so a filter such as
//! `{"filter": {"customer": 123}}` becomes `filter%5Bcustomer%5D=123`.

use serde_json::{Map, Value};

/// Encodes a JSON object as a URL query string (without the leading `?`).
///
/// - Nested objects flatten to `key[sub]=value`
/// - Arrays of scalars flatten to `key[]=value` per element
/// - Objects inside arrays flatten to `key[index][sub]=value`
/// - `null` values are skipped
/// - Keys and values are percent-encoded
///
/// Non-object input encodes to an empty string.
///
/// # Example
///
/// ```rust
/// use invoiced::clients::encode_query;
/// use serde_json::json;
///
/// let query = encode_query(&json!({"page": 2, "filter": {"status": "paid"}}));
/// assert_eq!(query, "page=2&filter%5Bstatus%5D=paid");
/// ```
#[must_use]
pub fn encode_query(params: &Value) -> String {
    let Value::Object(map) = params else {
        return String::new();
    };

    let mut pairs = Vec::new();
    flatten_object(map, None, &mut pairs);

    pairs
        .iter()
        .map(|(key, value)| {
            format!(
                "{}={}",
                urlencoding::encode(key),
                urlencoding::encode(value)
            )
        })
        .collect::<Vec<_>>()
        .join("&")
}

fn flatten_object(map: &Map<String, Value>, prefix: Option<&str>, out: &mut Vec<(String, String)>) {
    for (key, value) in map {
        let key = prefix.map_or_else(|| key.clone(), |p| format!("{p}[{key}]"));
        flatten_value(&key, value, out);
    }
}

fn flatten_value(key: &str, value: &Value, out: &mut Vec<(String, String)>) {
    match value {
        Value::Null => {}
        Value::String(s) => out.push((key.to_string(), s.clone())),
        Value::Number(n) => out.push((key.to_string(), n.to_string())),
        Value::Bool(b) => out.push((key.to_string(), b.to_string())),
        Value::Object(map) => flatten_object(map, Some(key), out),
        Value::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                if item.is_object() || item.is_array() {
                    flatten_value(&format!("{key}[{index}]"), item, out);
                } else {
                    flatten_value(&format!("{key}[]"), item, out);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scalars() {
        let query = encode_query(&json!({"per_page": 25, "paid": true, "sort": "date DESC"}));
        assert_eq!(query, "per_page=25&paid=true&sort=date%20DESC");
    }

    #[test]
    fn test_nested_filter() {
        let query = encode_query(&json!({"filter": {"customer": 123, "status": "past_due"}}));
        assert_eq!(
            query,
            "filter%5Bcustomer%5D=123&filter%5Bstatus%5D=past_due"
        );
    }

    #[test]
    fn test_arrays_use_empty_brackets() {
        let query = encode_query(&json!({"expand": ["customer", "invoice"]}));
        assert_eq!(query, "expand%5B%5D=customer&expand%5B%5D=invoice");
    }

    #[test]
    fn test_objects_in_arrays_are_indexed() {
        let query = encode_query(&json!({"items": [{"name": "a"}, {"name": "b"}]}));
        assert_eq!(
            query,
            "items%5B0%5D%5Bname%5D=a&items%5B1%5D%5Bname%5D=b"
        );
    }

    #[test]
    fn test_nulls_skipped_and_values_escaped() {
        let query = encode_query(&json!({"q": "a&b=c", "skip": null}));
        assert_eq!(query, "q=a%26b%3Dc");
    }

    #[test]
    fn test_non_object_encodes_to_empty() {
        assert_eq!(encode_query(&json!([1, 2])), "");
        assert_eq!(encode_query(&Value::Null), "");
        assert_eq!(encode_query(&json!({})), "");
    }
}
