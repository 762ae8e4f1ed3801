//! HTTP client for Invoiced API communication.
//!
//! This module provides the [`HttpClient`] type, the single dispatcher every
//! resource operation goes through.

use std::collections::HashMap;
use std::fmt;

use base64::Engine;
use serde_json::Value;

use crate::clients::errors::{ApiErrorResponse, InvoicedError};
use crate::clients::http_request::{HttpMethod, HttpRequest};
use crate::clients::http_response::HttpResponse;
use crate::clients::lock::ConnectionLimiter;
use crate::config::InvoicedConfig;
use crate::error::ConfigError;

/// SDK version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// HTTP client for making requests to the Invoiced API.
///
/// The client handles:
/// - Base URL selection (live, sandbox or an explicit override)
/// - Default headers including Basic authentication and User-Agent
/// - Parameter placement (query string or JSON body)
/// - Mapping non-2xx responses onto [`InvoicedError`]
/// - The optional connection lock around each request
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync`, making it safe to share across async tasks.
///
/// # Example
///
/// ```rust,ignore
/// use invoiced::{InvoicedConfig, ApiKey};
/// use invoiced::clients::{HttpClient, HttpMethod};
/// use serde_json::json;
///
/// let config = InvoicedConfig::builder()
///     .api_key(ApiKey::new("my-api-key").unwrap())
///     .build()
///     .unwrap();
/// let client = HttpClient::new(&config)?;
///
/// let response = client
///     .dispatch(HttpMethod::Get, "/invoices", Some(json!({"per_page": 10})))
///     .await?;
/// ```
pub struct HttpClient {
    /// The internal reqwest HTTP client.
    client: reqwest::Client,
    /// Base URL without trailing slash (e.g., `https://api.invoiced.com`).
    api_url: String,
    /// Default headers to include in all requests.
    default_headers: HashMap<String, String>,
    /// Serializes requests when a lock backend is configured.
    limiter: Option<ConnectionLimiter>,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let headers: HashMap<&str, &str> = self
            .default_headers
            .iter()
            .map(|(name, value)| {
                if name.eq_ignore_ascii_case("authorization") {
                    (name.as_str(), "*****")
                } else {
                    (name.as_str(), value.as_str())
                }
            })
            .collect();

        f.debug_struct("HttpClient")
            .field("api_url", &self.api_url)
            .field("default_headers", &headers)
            .field("limiter", &self.limiter)
            .finish_non_exhaustive()
    }
}

impl HttpClient {
    /// Creates a new HTTP client from the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::HttpClientBuild`] if the underlying reqwest
    /// client cannot be created (e.g., TLS initialization failure).
    ///
    /// # Example
    ///
    /// ```rust
    /// use invoiced::{InvoicedConfig, ApiKey};
    /// use invoiced::clients::HttpClient;
    ///
    /// let config = InvoicedConfig::builder()
    ///     .api_key(ApiKey::new("my-api-key").unwrap())
    ///     .sandbox(true)
    ///     .build()
    ///     .unwrap();
    ///
    /// let client = HttpClient::new(&config).unwrap();
    /// assert_eq!(client.api_url(), "https://api.sandbox.invoiced.com");
    /// ```
    pub fn new(config: &InvoicedConfig) -> Result<Self, ConfigError> {
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let user_agent = format!("{user_agent_prefix}Invoiced Rust/{SDK_VERSION}");

        let credentials = base64::engine::general_purpose::STANDARD
            .encode(format!("{}:", config.api_key().as_ref()));

        let mut default_headers = HashMap::new();
        default_headers.insert("Authorization".to_string(), format!("Basic {credentials}"));
        default_headers.insert("Content-Type".to_string(), "application/json".to_string());
        default_headers.insert("Accept".to_string(), "application/json".to_string());
        default_headers.insert("User-Agent".to_string(), user_agent);

        let mut builder = reqwest::Client::builder().use_rustls_tls();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| ConfigError::HttpClientBuild {
            reason: e.to_string(),
        })?;

        let limiter = config
            .lock_backend()
            .map(|backend| ConnectionLimiter::new(backend.clone(), config.lock_settings().clone()));

        Ok(Self {
            client,
            api_url: config.api_url().to_string(),
            default_headers,
            limiter,
        })
    }

    /// Returns the base URL requests are sent to.
    #[must_use]
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Returns the default headers for this client.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Returns `true` when requests go through the connection lock.
    #[must_use]
    pub const fn is_locked(&self) -> bool {
        self.limiter.is_some()
    }

    /// Sends a request built from its parts.
    ///
    /// Shorthand for building an [`HttpRequest`] and calling [`request`](Self::request).
    ///
    /// # Errors
    ///
    /// See [`request`](Self::request).
    pub async fn dispatch(
        &self,
        method: HttpMethod,
        path: &str,
        params: Option<Value>,
    ) -> Result<HttpResponse, InvoicedError> {
        let mut builder = HttpRequest::builder(method, path);
        if let Some(params) = params {
            builder = builder.params(params);
        }
        self.request(builder.build()?).await
    }

    /// Sends an HTTP request to the Invoiced API.
    ///
    /// When a lock backend is configured the request runs while holding one
    /// lock of the pool; if no lock becomes free in time the request is never
    /// sent.
    ///
    /// # Errors
    ///
    /// Returns [`InvoicedError`] if:
    /// - Request validation fails (`InvalidHttpRequest`)
    /// - The lock cannot be acquired (`LockTimeout`, `LockBackend`)
    /// - No response was received (`Connection`)
    /// - A non-2xx response was received (`Authentication`, `InvalidRequest`, `Api`)
    /// - A 2xx body is not JSON (`Api`)
    pub async fn request(&self, request: HttpRequest) -> Result<HttpResponse, InvoicedError> {
        request.verify()?;

        match &self.limiter {
            Some(limiter) => limiter.run(|| self.send(&request)).await,
            None => self.send(&request).await,
        }
    }

    async fn send(&self, request: &HttpRequest) -> Result<HttpResponse, InvoicedError> {
        let url = format!("{}{}", self.api_url, request.path_and_query());
        tracing::debug!(method = %request.http_method, %url, "Sending request to Invoiced");

        let mut req_builder = self
            .client
            .request(request.http_method.into(), &url);
        for (key, value) in &self.default_headers {
            req_builder = req_builder.header(key, value);
        }
        if let Some(body) = request.body() {
            req_builder = req_builder.body(body);
        }

        let res = req_builder.send().await.map_err(|e| {
            tracing::debug!(error = %e, %url, "Transport failure");
            InvoicedError::connection(e)
        })?;

        let code = res.status().as_u16();
        let res_headers = Self::parse_response_headers(res.headers());
        let body_text = res.text().await.map_err(InvoicedError::connection)?;

        tracing::debug!(code, %url, "Received response from Invoiced");

        let request_id = res_headers
            .get("x-request-id")
            .and_then(|values| values.first())
            .map(String::as_str);

        if !(200..=299).contains(&code) {
            let error = InvoicedError::from_response(code, &body_text, request_id);
            tracing::debug!(code, error = %error, "Invoiced returned an error");
            return Err(error);
        }

        let body = if code == 204 || body_text.trim().is_empty() {
            None
        } else {
            match serde_json::from_str(&body_text) {
                Ok(value) => Some(value),
                Err(_) => {
                    return Err(InvoicedError::Api(ApiErrorResponse {
                        code,
                        message: format!("API Error {code} - {body_text}"),
                        error: None,
                        request_id: request_id.map(ToString::to_string),
                    }));
                }
            }
        };

        Ok(HttpResponse::new(code, res_headers, body))
    }

    /// Parses response headers into a `HashMap`.
    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }
}
