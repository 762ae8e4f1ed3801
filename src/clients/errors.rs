//! Error types for Invoiced API operations.
//!
//! Every operation in this crate fails with [`InvoicedError`]. The variants
//! that originate from the API, the transport or the connection lock map onto
//! [`ErrorKind`], so callers can branch on the failure category without
//! matching every variant:
//!
//! - [`ErrorKind::Connection`]: no response was received
//! - [`ErrorKind::Authentication`]: HTTP 401
//! - [`ErrorKind::InvalidRequest`]: HTTP 400, 403 and 404
//! - [`ErrorKind::Api`]: any other non-2xx status, or a body that is not JSON
//! - [`ErrorKind::LockTimeout`]: the connection lock could not be acquired in time
//!
//! # Example
//!
//! ```rust,ignore
//! use invoiced::clients::{ErrorKind, InvoicedError};
//!
//! match client.invoices.retrieve(42).await {
//!     Ok(invoice) => println!("Invoice {}", invoice.number().unwrap_or_default()),
//!     Err(InvoicedError::InvalidRequest(e)) if e.code == 404 => println!("No such invoice"),
//!     Err(e) if e.kind() == Some(ErrorKind::Connection) => println!("Network trouble: {e}"),
//!     Err(e) => return Err(e.into()),
//! }
//! ```

use std::time::Duration;

use serde_json::Value;
use thiserror::Error;

/// Message attached to every transport failure.
pub const CONNECTION_ERROR_MESSAGE: &str = "There was an error connecting to Invoiced.";

/// The failure category of an [`InvoicedError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The request never produced a response.
    Connection,
    /// The API rejected the credentials (401).
    Authentication,
    /// The API rejected the request (400, 403, 404).
    InvalidRequest,
    /// Any other API failure.
    Api,
    /// The connection lock was not acquired within its wait bound.
    LockTimeout,
}

impl ErrorKind {
    /// Classifies a non-2xx status code.
    ///
    /// ```rust
    /// use invoiced::clients::ErrorKind;
    ///
    /// assert_eq!(ErrorKind::from_status(404), ErrorKind::InvalidRequest);
    /// assert_eq!(ErrorKind::from_status(401), ErrorKind::Authentication);
    /// assert_eq!(ErrorKind::from_status(502), ErrorKind::Api);
    /// ```
    #[must_use]
    pub const fn from_status(code: u16) -> Self {
        match code {
            400 | 403 | 404 => Self::InvalidRequest,
            401 => Self::Authentication,
            _ => Self::Api,
        }
    }
}

/// A non-2xx response from the API.
///
/// `message` is the `message` field of the error payload, or a synthesized
/// `"API Error {code} - {body}"` when the body was not JSON. `error` holds the
/// full parsed payload when there was one.
#[derive(Clone, Debug, Error, PartialEq)]
#[error("{message}")]
pub struct ApiErrorResponse {
    /// The HTTP status code of the response.
    pub code: u16,
    /// Human readable error message.
    pub message: String,
    /// The parsed error payload, if the body was JSON.
    pub error: Option<Value>,
    /// The `X-Request-Id` header of the response, if present.
    pub request_id: Option<String>,
}

impl ApiErrorResponse {
    /// Returns the `type` field of the error payload (e.g. `invalid_request`).
    #[must_use]
    pub fn error_type(&self) -> Option<&str> {
        self.error
            .as_ref()
            .and_then(|e| e.get("type"))
            .and_then(Value::as_str)
    }

    /// Returns the `param` field of the error payload, naming the offending input.
    #[must_use]
    pub fn param(&self) -> Option<&str> {
        self.error
            .as_ref()
            .and_then(|e| e.get("param"))
            .and_then(Value::as_str)
    }
}

/// Returned when the connection lock could not be acquired in time.
///
/// No HTTP request is made when this error is returned.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("Acquire lock timed out: {lock_name} (waited {waited:?})")]
pub struct LockTimeoutError {
    /// The name of the lock that was requested.
    pub lock_name: String,
    /// How long acquisition was attempted.
    pub waited: Duration,
}

/// Returned when a request fails validation before it is sent.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum InvalidHttpRequestError {
    /// The request path does not start with `/`.
    #[error("Invalid request path '{path}'. Paths must start with '/'.")]
    InvalidPath {
        /// The rejected path.
        path: String,
    },

    /// Request parameters must serialize to a JSON object.
    #[error("Request parameters for {method} must be a JSON object, got {found}.")]
    ParamsNotObject {
        /// The HTTP method of the request.
        method: String,
        /// The JSON type that was supplied instead.
        found: &'static str,
    },
}

/// Unified error type for every client operation.
#[derive(Debug, Error)]
pub enum InvoicedError {
    /// The request did not produce a response (DNS, connect, TLS, timeout).
    #[error("{message}")]
    Connection {
        /// Fixed message describing the failure.
        message: String,
        /// The underlying transport error.
        #[source]
        source: reqwest::Error,
    },

    /// The API rejected the credentials (401).
    #[error("{0}")]
    Authentication(ApiErrorResponse),

    /// The API rejected the request (400, 403, 404).
    #[error("{0}")]
    InvalidRequest(ApiErrorResponse),

    /// Any other non-2xx response, including bodies that are not JSON.
    #[error("{0}")]
    Api(ApiErrorResponse),

    /// The connection lock was not acquired within its wait bound.
    #[error(transparent)]
    LockTimeout(#[from] LockTimeoutError),

    /// The lock backend itself failed.
    #[error("Lock backend error: {message}")]
    LockBackend {
        /// Description reported by the backend.
        message: String,
    },

    /// The operation needs an identifier the object does not have.
    #[error("{resource} has no id; cannot {operation}")]
    MissingId {
        /// The resource type name.
        resource: &'static str,
        /// The operation that was attempted.
        operation: &'static str,
    },

    /// A successful response body did not have the expected shape.
    #[error("Unexpected {what} response body: {source}")]
    Decode {
        /// What was being decoded.
        what: &'static str,
        /// The underlying decoding error.
        #[source]
        source: serde_json::Error,
    },

    /// Parameters could not be converted to JSON.
    #[error("Failed to serialize parameters: {0}")]
    InvalidParams(#[from] serde_json::Error),

    /// The request failed validation before it was sent.
    #[error(transparent)]
    InvalidHttpRequest(#[from] InvalidHttpRequestError),
}

impl InvoicedError {
    /// Wraps a transport failure.
    #[must_use]
    pub fn connection(source: reqwest::Error) -> Self {
        Self::Connection {
            message: CONNECTION_ERROR_MESSAGE.to_string(),
            source,
        }
    }

    /// Builds the error for a non-2xx response.
    ///
    /// When `body` is not valid JSON the result is [`InvoicedError::Api`] with
    /// the message `"API Error {code} - {body}"` and no payload. Otherwise the
    /// status decides the variant (see [`ErrorKind::from_status`]) and the
    /// payload's `message` field becomes the error message.
    ///
    /// ```rust
    /// use invoiced::clients::{ErrorKind, InvoicedError};
    ///
    /// let error = InvoicedError::from_response(500, "Internal Server Error", None);
    /// assert_eq!(error.kind(), Some(ErrorKind::Api));
    /// assert_eq!(error.to_string(), "API Error 500 - Internal Server Error");
    ///
    /// let error = InvoicedError::from_response(401, r#"{"message":"Invalid API key"}"#, None);
    /// assert_eq!(error.kind(), Some(ErrorKind::Authentication));
    /// assert_eq!(error.status(), Some(401));
    /// ```
    #[must_use]
    pub fn from_response(code: u16, body: &str, request_id: Option<&str>) -> Self {
        let request_id = request_id.map(ToString::to_string);

        let Ok(error) = serde_json::from_str::<Value>(body) else {
            return Self::Api(ApiErrorResponse {
                code,
                message: format!("API Error {code} - {body}"),
                error: None,
                request_id,
            });
        };

        let message = error
            .get("message")
            .and_then(Value::as_str)
            .map_or_else(|| format!("API Error {code}"), ToString::to_string);

        let response = ApiErrorResponse {
            code,
            message,
            error: Some(error),
            request_id,
        };

        match ErrorKind::from_status(code) {
            ErrorKind::InvalidRequest => Self::InvalidRequest(response),
            ErrorKind::Authentication => Self::Authentication(response),
            _ => Self::Api(response),
        }
    }

    /// Returns the failure category.
    ///
    /// Client-side failures that never reached the network or the lock
    /// (`MissingId`, `Decode`, `InvalidParams`, `InvalidHttpRequest`,
    /// `LockBackend`)
    /// have no category and return `None`.
    #[must_use]
    pub const fn kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Connection { .. } => Some(ErrorKind::Connection),
            Self::Authentication(_) => Some(ErrorKind::Authentication),
            Self::InvalidRequest(_) => Some(ErrorKind::InvalidRequest),
            Self::Api(_) => Some(ErrorKind::Api),
            Self::LockTimeout(_) => Some(ErrorKind::LockTimeout),
            Self::LockBackend { .. }
            | Self::MissingId { .. }
            | Self::Decode { .. }
            | Self::InvalidParams(_)
            | Self::InvalidHttpRequest(_) => None,
        }
    }

    /// Returns the API response details for HTTP-originated errors.
    #[must_use]
    pub const fn response(&self) -> Option<&ApiErrorResponse> {
        match self {
            Self::Authentication(r) | Self::InvalidRequest(r) | Self::Api(r) => Some(r),
            _ => None,
        }
    }

    /// Returns the HTTP status code, if a response was received.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        self.response().map(|r| r.code)
    }

    /// Returns the raw error payload, if the response carried one.
    #[must_use]
    pub fn payload(&self) -> Option<&Value> {
        self.response().and_then(|r| r.error.as_ref())
    }

    /// Returns the `X-Request-Id` of the failed response, if any.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        self.response().and_then(|r| r.request_id.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_classification() {
        assert_eq!(ErrorKind::from_status(400), ErrorKind::InvalidRequest);
        assert_eq!(ErrorKind::from_status(403), ErrorKind::InvalidRequest);
        assert_eq!(ErrorKind::from_status(404), ErrorKind::InvalidRequest);
        assert_eq!(ErrorKind::from_status(401), ErrorKind::Authentication);
        assert_eq!(ErrorKind::from_status(402), ErrorKind::Api);
        assert_eq!(ErrorKind::from_status(429), ErrorKind::Api);
        assert_eq!(ErrorKind::from_status(500), ErrorKind::Api);
        assert_eq!(ErrorKind::from_status(503), ErrorKind::Api);
    }

    #[test]
    fn test_non_json_body_synthesizes_message() {
        let error = InvoicedError::from_response(500, "Internal Server Error", None);

        assert!(matches!(error, InvoicedError::Api(_)));
        assert_eq!(error.to_string(), "API Error 500 - Internal Server Error");
        assert_eq!(error.status(), Some(500));
        assert!(error.payload().is_none());
    }

    #[test]
    fn test_non_json_body_on_client_error_is_still_api_error() {
        let error = InvoicedError::from_response(404, "<html>Not Found</html>", None);

        assert_eq!(error.kind(), Some(ErrorKind::Api));
        assert_eq!(error.to_string(), "API Error 404 - <html>Not Found</html>");
    }

    #[test]
    fn test_json_body_carries_message_and_payload() {
        let body = r#"{"type":"invalid_request","message":"Customer was not found: 123","param":"id"}"#;
        let error = InvoicedError::from_response(404, body, Some("req_1"));

        let InvoicedError::InvalidRequest(response) = &error else {
            panic!("expected InvalidRequest, got {error:?}");
        };
        assert_eq!(response.code, 404);
        assert_eq!(response.message, "Customer was not found: 123");
        assert_eq!(response.error_type(), Some("invalid_request"));
        assert_eq!(response.param(), Some("id"));
        assert_eq!(error.request_id(), Some("req_1"));
        assert_eq!(
            error.payload(),
            Some(&json!({
                "type": "invalid_request",
                "message": "Customer was not found: 123",
                "param": "id"
            }))
        );
    }

    #[test]
    fn test_authentication_error() {
        let error = InvoicedError::from_response(401, r#"{"message":"Unauthorized"}"#, None);
        assert!(matches!(error, InvoicedError::Authentication(_)));
        assert_eq!(error.to_string(), "Unauthorized");
    }

    #[test]
    fn test_json_without_message_field() {
        let error = InvoicedError::from_response(502, r#"{"error":"bad gateway"}"#, None);
        assert_eq!(error.kind(), Some(ErrorKind::Api));
        assert_eq!(error.to_string(), "API Error 502");
        assert!(error.payload().is_some());
    }

    #[test]
    fn test_lock_timeout_kind() {
        let error: InvoicedError = LockTimeoutError {
            lock_name: "invoiced_lock_3".to_string(),
            waited: Duration::from_millis(50),
        }
        .into();

        assert_eq!(error.kind(), Some(ErrorKind::LockTimeout));
        assert!(error.to_string().contains("invoiced_lock_3"));
        assert!(error.status().is_none());
    }

    #[test]
    fn test_client_side_errors_have_no_kind() {
        let error = InvoicedError::MissingId {
            resource: "Customer",
            operation: "delete",
        };
        assert!(error.kind().is_none());
        assert_eq!(error.to_string(), "Customer has no id; cannot delete");
    }

    #[test]
    fn test_error_types_implement_std_error() {
        let _: &dyn std::error::Error = &InvoicedError::LockBackend {
            message: "down".to_string(),
        };
        let _: &dyn std::error::Error = &InvalidHttpRequestError::InvalidPath {
            path: "x".to_string(),
        };
    }
}
