//! HTTP response types for the Invoiced client.
//!
//! This module provides the [`HttpResponse`] type returned by every dispatch.

use std::collections::HashMap;

use serde_json::Value;

use crate::clients::pagination::ListMetadata;

/// Name of the header carrying the total number of list results.
pub const TOTAL_COUNT_HEADER: &str = "x-total-count";

/// A successful response from the Invoiced API.
///
/// Header names are stored lower-cased, and [`HttpResponse::header`] lower-cases
/// its argument, so lookups are case-insensitive.
///
/// # Example
///
/// ```rust
/// use invoiced::clients::HttpResponse;
/// use std::collections::HashMap;
/// use serde_json::json;
///
/// let mut headers = HashMap::new();
/// headers.insert("X-Total-Count".to_string(), vec!["15".to_string()]);
///
/// let response = HttpResponse::new(200, headers, Some(json!([])));
/// assert_eq!(response.header("x-total-count"), Some("15"));
/// assert_eq!(response.header("X-TOTAL-COUNT"), Some("15"));
/// assert_eq!(response.list_metadata().total_count(), 15);
/// ```
#[derive(Clone, Debug)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub code: u16,
    /// Response headers keyed by lower-cased name (headers may repeat).
    pub headers: HashMap<String, Vec<String>>,
    /// The parsed body; `None` for 204 No Content and empty bodies.
    pub body: Option<Value>,
}

impl HttpResponse {
    /// Creates a new `HttpResponse`, normalizing header names to lower case.
    #[must_use]
    pub fn new(code: u16, headers: HashMap<String, Vec<String>>, body: Option<Value>) -> Self {
        let mut normalized: HashMap<String, Vec<String>> = HashMap::with_capacity(headers.len());
        for (name, values) in headers {
            normalized
                .entry(name.to_ascii_lowercase())
                .or_default()
                .extend(values);
        }

        Self {
            code,
            headers: normalized,
            body,
        }
    }

    /// Returns `true` if the response status code is in the 2xx range.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code >= 200 && self.code <= 299
    }

    /// Returns `true` for 204 No Content.
    #[must_use]
    pub const fn is_no_content(&self) -> bool {
        self.code == 204
    }

    /// Returns the first value of a header, matched case-insensitively.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Returns the `X-Request-Id` header value, if present.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        self.header("x-request-id")
    }

    /// Returns the `Link` header, with repeated header lines joined by `", "`.
    #[must_use]
    pub fn link(&self) -> Option<String> {
        self.headers
            .get("link")
            .filter(|values| !values.is_empty())
            .map(|values| values.join(", "))
    }

    /// Parses pagination metadata from the `Link` and `X-Total-Count` headers.
    #[must_use]
    pub fn list_metadata(&self) -> ListMetadata {
        ListMetadata::new(self.link().as_deref(), self.header(TOTAL_COUNT_HEADER))
    }

    /// Consumes the response and returns the body, `null` when there was none.
    #[must_use]
    pub fn into_body(self) -> Value {
        self.body.unwrap_or(Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_is_ok_returns_true_for_2xx() {
        for code in 200..=299 {
            let response = HttpResponse::new(code, HashMap::new(), None);
            assert!(
                response.is_ok(),
                "Expected is_ok() to be true for code {code}"
            );
        }
    }

    #[test]
    fn test_is_ok_returns_false_for_4xx_and_5xx() {
        for code in [400, 401, 404, 429, 500] {
            assert!(!HttpResponse::new(code, HashMap::new(), None).is_ok());
        }
    }

    #[test]
    fn test_header_lookup_is_case_insensitive() {
        let mut headers = HashMap::new();
        headers.insert("Content-Type".to_string(), vec!["application/json".to_string()]);
        headers.insert("X-Request-Id".to_string(), vec!["abc-123".to_string()]);

        let response = HttpResponse::new(200, headers, Some(json!({})));
        assert_eq!(response.header("content-type"), Some("application/json"));
        assert_eq!(response.header("CONTENT-TYPE"), Some("application/json"));
        assert_eq!(response.request_id(), Some("abc-123"));
        assert!(response.header("link").is_none());
    }

    #[test]
    fn test_duplicate_header_names_merge() {
        let mut headers = HashMap::new();
        headers.insert("Link".to_string(), vec!["<a>; rel=\"next\"".to_string()]);
        headers.insert("link".to_string(), vec!["<b>; rel=\"prev\"".to_string()]);

        let response = HttpResponse::new(200, headers, None);
        assert_eq!(response.headers.get("link").map(Vec::len), Some(2));
    }

    #[test]
    fn test_link_relations_across_header_lines() {
        let mut headers = HashMap::new();
        headers.insert(
            "Link".to_string(),
            vec![
                r#"<https://api.invoiced.com/invoices?page=2>; rel="next""#.to_string(),
                r#"<https://api.invoiced.com/invoices?page=5>; rel="last""#.to_string(),
            ],
        );

        let response = HttpResponse::new(200, headers, Some(json!([])));
        assert_eq!(
            response.link().as_deref(),
            Some(r#"<https://api.invoiced.com/invoices?page=2>; rel="next", <https://api.invoiced.com/invoices?page=5>; rel="last""#)
        );

        let metadata = response.list_metadata();
        assert_eq!(metadata.next_page(), Some(2));
        assert_eq!(metadata.last_page(), Some(5));
    }

    #[test]
    fn test_no_content() {
        let response = HttpResponse::new(204, HashMap::new(), None);
        assert!(response.is_no_content());
        assert_eq!(response.into_body(), Value::Null);
    }

    #[test]
    fn test_list_metadata_from_headers() {
        let mut headers = HashMap::new();
        headers.insert("x-total-count".to_string(), vec!["42".to_string()]);
        headers.insert(
            "link".to_string(),
            vec![r#"<https://api.invoiced.com/invoices?page=2>; rel="next", <https://api.invoiced.com/invoices?page=5>; rel="last""#.to_string()],
        );

        let metadata = HttpResponse::new(200, headers, Some(json!([]))).list_metadata();
        assert_eq!(metadata.total_count(), 42);
        assert_eq!(metadata.next_page(), Some(2));
        assert_eq!(metadata.last_page(), Some(5));
        assert_eq!(metadata.prev_page(), None);
    }
}
