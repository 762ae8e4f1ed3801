//! HTTP request types for the Invoiced client.
//!
//! This module provides the [`HttpRequest`] type and its builder for
//! constructing requests to the Invoiced API.

use std::fmt;

use serde_json::Value;

use crate::clients::errors::InvalidHttpRequestError;
use crate::clients::query::encode_query;

/// HTTP methods used by the Invoiced API.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HttpMethod {
    /// HTTP GET method for retrieving resources.
    Get,
    /// HTTP HEAD method.
    Head,
    /// HTTP POST method for creating resources and sub-actions.
    Post,
    /// HTTP PUT method for replacing singular resources.
    Put,
    /// HTTP PATCH method for partial updates.
    Patch,
    /// HTTP DELETE method for removing resources.
    Delete,
}

impl HttpMethod {
    /// Returns `true` if parameters travel in a JSON body rather than the query string.
    #[must_use]
    pub const fn has_body(&self) -> bool {
        matches!(self, Self::Post | Self::Put | Self::Patch)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "get"),
            Self::Head => write!(f, "head"),
            Self::Post => write!(f, "post"),
            Self::Put => write!(f, "put"),
            Self::Patch => write!(f, "patch"),
            Self::Delete => write!(f, "delete"),
        }
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => Self::GET,
            HttpMethod::Head => Self::HEAD,
            HttpMethod::Post => Self::POST,
            HttpMethod::Put => Self::PUT,
            HttpMethod::Patch => Self::PATCH,
            HttpMethod::Delete => Self::DELETE,
        }
    }
}

/// An HTTP request to be sent to the Invoiced API.
///
/// Parameters are placed according to the method: GET, HEAD and DELETE encode
/// them into the query string, every other method sends them as the JSON body.
///
/// # Example
///
/// ```rust
/// use invoiced::clients::{HttpRequest, HttpMethod};
/// use serde_json::json;
///
/// let request = HttpRequest::builder(HttpMethod::Get, "/invoices")
///     .params(json!({"page": 2}))
///     .build()
///     .unwrap();
/// assert_eq!(request.path_and_query(), "/invoices?page=2");
/// assert!(request.body().is_none());
///
/// let request = HttpRequest::builder(HttpMethod::Post, "/customers")
///     .params(json!({"name": "Pied Piper"}))
///     .build()
///     .unwrap();
/// assert_eq!(request.body().as_deref(), Some(r#"{"name":"Pied Piper"}"#));
/// ```
#[derive(Clone, Debug)]
pub struct HttpRequest {
    /// The HTTP method for this request.
    pub http_method: HttpMethod,
    /// The endpoint path, starting with `/`, possibly with a query component.
    pub path: String,
    /// Request parameters (a JSON object), if any.
    pub params: Option<Value>,
}

impl HttpRequest {
    /// Creates a new builder for constructing an `HttpRequest`.
    #[must_use]
    pub fn builder(method: HttpMethod, path: impl Into<String>) -> HttpRequestBuilder {
        HttpRequestBuilder::new(method, path)
    }

    /// Validates the request.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError`] if:
    /// - `path` does not start with `/`
    /// - `params` is present but not a JSON object
    pub fn verify(&self) -> Result<(), InvalidHttpRequestError> {
        if !self.path.starts_with('/') {
            return Err(InvalidHttpRequestError::InvalidPath {
                path: self.path.clone(),
            });
        }

        match &self.params {
            None | Some(Value::Object(_)) => Ok(()),
            Some(other) => Err(InvalidHttpRequestError::ParamsNotObject {
                method: self.http_method.to_string(),
                found: json_type_name(other),
            }),
        }
    }

    /// Returns the path with encoded query parameters appended.
    ///
    /// For methods with a body this is the path unchanged. Otherwise the
    /// parameters are appended after `?`, or after `&` when the path already
    /// has a query component.
    #[must_use]
    pub fn path_and_query(&self) -> String {
        if self.http_method.has_body() {
            return self.path.clone();
        }

        let query = self
            .params
            .as_ref()
            .map(encode_query)
            .unwrap_or_default();
        if query.is_empty() {
            return self.path.clone();
        }

        let separator = if self.path.contains('?') { '&' } else { '?' };
        format!("{}{separator}{query}", self.path)
    }

    /// Returns the serialized JSON body.
    ///
    /// `None` for GET, HEAD and DELETE. Methods with a body always send one,
    /// falling back to `{}` when no parameters were given.
    #[must_use]
    pub fn body(&self) -> Option<String> {
        if !self.http_method.has_body() {
            return None;
        }
        Some(
            self.params
                .as_ref()
                .map_or_else(|| "{}".to_string(), Value::to_string),
        )
    }
}

const fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Builder for constructing [`HttpRequest`] instances.
#[derive(Debug)]
pub struct HttpRequestBuilder {
    http_method: HttpMethod,
    path: String,
    params: Option<Value>,
}

impl HttpRequestBuilder {
    fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            http_method: method,
            path: path.into(),
            params: None,
        }
    }

    /// Sets all parameters at once. `null` clears them.
    #[must_use]
    pub fn params(mut self, params: impl Into<Value>) -> Self {
        let params = params.into();
        self.params = if params.is_null() { None } else { Some(params) };
        self
    }

    /// Adds a single parameter.
    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        if !matches!(self.params, Some(Value::Object(_))) {
            self.params = Some(Value::Object(serde_json::Map::new()));
        }
        if let Some(Value::Object(map)) = self.params.as_mut() {
            map.insert(key.into(), value.into());
        }
        self
    }

    /// Builds the [`HttpRequest`], validating it in the process.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError`] if the request fails validation.
    pub fn build(self) -> Result<HttpRequest, InvalidHttpRequestError> {
        let request = HttpRequest {
            http_method: self.http_method,
            path: self.path,
            params: self.params,
        };
        request.verify()?;
        Ok(request)
    }
}
