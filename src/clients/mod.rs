//! HTTP client types for Invoiced API communication.
//!
//! This module provides the transport layer every resource operation goes
//! through: request construction, authenticated dispatch, response parsing,
//! error mapping, pagination metadata and the optional connection lock.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`HttpClient`]: The async dispatcher for API communication
//! - [`HttpRequest`]: A request to be sent to the API
//! - [`HttpResponse`]: A parsed successful response
//! - [`HttpMethod`]: Supported HTTP methods
//! - [`InvoicedError`] and [`ErrorKind`]: Failure reporting
//! - [`ListMetadata`]: `Link` and `X-Total-Count` navigation state
//! - [`LockBackend`], [`InMemoryLockBackend`] and [`ConnectionLimiter`]:
//!   the connection lock
//!
//! # Example
//!
//! ```rust,ignore
//! use invoiced::{InvoicedConfig, ApiKey};
//! use invoiced::clients::{HttpClient, HttpMethod};
//!
//! let config = InvoicedConfig::builder()
//!     .api_key(ApiKey::new("my-api-key").unwrap())
//!     .build()
//!     .unwrap();
//! let client = HttpClient::new(&config)?;
//!
//! let response = client.dispatch(HttpMethod::Get, "/customers/123", None).await?;
//! let name = response.body.as_ref().and_then(|b| b["name"].as_str());
//! ```
//!
//! # Parameter Placement
//!
//! GET, HEAD and DELETE encode parameters into the query string using bracket
//! notation (see [`encode_query`]). POST, PUT and PATCH send them as a JSON
//! body, which is `{}` when no parameters were given.

mod errors;
mod http_client;
mod http_request;
mod http_response;
mod lock;
mod pagination;
mod query;

pub use errors::{
    ApiErrorResponse, ErrorKind, InvalidHttpRequestError, InvoicedError, LockTimeoutError,
    CONNECTION_ERROR_MESSAGE,
};
pub use http_client::{HttpClient, SDK_VERSION};
pub use http_request::{HttpMethod, HttpRequest, HttpRequestBuilder};
pub use http_response::{HttpResponse, TOTAL_COUNT_HEADER};
pub use lock::{
    lock_name, ConnectionLimiter, InMemoryLockBackend, LockBackend, LockBackendError,
    LockSettings, LockToken, LOCK_NAME_PREFIX,
};
pub use pagination::ListMetadata;
pub use query::encode_query;
