//! Common list parameters.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Query parameters accepted by every list endpoint.
///
/// Any `Serialize` value can be passed to the list operations; this struct
/// covers the parameters the API documents for all collections.
///
/// # Example
///
/// ```rust
/// use invoiced::rest::ListParams;
/// use invoiced::clients::encode_query;
/// use serde_json::json;
///
/// let params = ListParams {
///     per_page: Some(10),
///     sort: Some("date DESC".into()),
///     filter: Some(json!({"status": "past_due"}).as_object().unwrap().clone()),
///     ..Default::default()
/// };
///
/// let query = encode_query(&serde_json::to_value(&params).unwrap());
/// assert_eq!(query, "per_page=10&sort=date%20DESC&filter%5Bstatus%5D=past_due");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ListParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<Map<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Map<String, Value>>,
    /// Unix timestamp; only objects updated after it are returned.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_after: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expand: Option<String>,
}
