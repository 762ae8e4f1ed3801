//! Validated newtype wrappers for configuration values.
//!
//! This module provides type-safe wrappers around string values that validate
//! their contents on construction. Invalid values are rejected with clear error messages.

use crate::error::ConfigError;
use std::fmt;

/// A validated Invoiced API key.
///
/// This newtype ensures the API key is non-empty and masks its value in
/// debug output. The key is the username half of the HTTP Basic credential
/// sent with every request, so it must never end up in logs.
///
/// # Example
///
/// ```rust
/// use invoiced::ApiKey;
///
/// let key = ApiKey::new("my-api-key").unwrap();
/// assert_eq!(key.as_ref(), "my-api-key");
/// assert_eq!(format!("{:?}", key), "ApiKey(*****)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Creates a new validated API key.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyApiKey`] if the key is empty.
    pub fn new(key: impl Into<String>) -> Result<Self, ConfigError> {
        let key = key.into();
        if key.trim().is_empty() {
            return Err(ConfigError::EmptyApiKey);
        }
        Ok(Self(key))
    }
}

impl AsRef<str> for ApiKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(*****)")
    }
}

/// A validated API base URL.
///
/// Overrides the URL derived from the [`Environment`](super::Environment),
/// e.g. to point the client at a proxy or a local mock server. The value
/// must carry a scheme and a host; a trailing slash is dropped so paths such
/// as `/invoices` can be appended directly.
///
/// # Example
///
/// ```rust
/// use invoiced::ApiBase;
///
/// let base = ApiBase::new("http://localhost:8080/").unwrap();
/// assert_eq!(base.as_ref(), "http://localhost:8080");
/// assert_eq!(base.scheme(), "http");
/// assert_eq!(base.host_name(), Some("localhost"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiBase {
    url: String,
    scheme_end: usize,
    host_start: usize,
    host_end: usize,
}

impl ApiBase {
    /// Creates a new validated base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidApiBase`] if the URL is invalid.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into();
        let url = url.trim().trim_end_matches('/').to_string();

        let scheme_end = url
            .find("://")
            .ok_or_else(|| ConfigError::InvalidApiBase { url: url.clone() })?;

        let scheme = &url[..scheme_end];
        if scheme.is_empty() || !scheme.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ConfigError::InvalidApiBase { url: url.clone() });
        }

        let host_start = scheme_end + 3;
        if host_start >= url.len() {
            return Err(ConfigError::InvalidApiBase { url: url.clone() });
        }

        // Host ends at port, path, query, or end of string
        let remainder = &url[host_start..];
        let host_end = remainder
            .find([':', '/', '?', '#'])
            .map_or(url.len(), |i| host_start + i);

        if host_end == host_start {
            return Err(ConfigError::InvalidApiBase { url: url.clone() });
        }

        // A query or fragment would swallow every appended endpoint path
        if remainder.contains(['?', '#']) {
            return Err(ConfigError::InvalidApiBase { url: url.clone() });
        }

        Ok(Self {
            url,
            scheme_end,
            host_start,
            host_end,
        })
    }

    /// Returns the URL scheme (e.g., "https").
    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.url[..self.scheme_end]
    }

    /// Returns the host name portion of the URL.
    #[must_use]
    pub fn host_name(&self) -> Option<&str> {
        let host = &self.url[self.host_start..self.host_end];
        if host.is_empty() {
            None
        } else {
            Some(host)
        }
    }
}

impl AsRef<str> for ApiBase {
    fn as_ref(&self) -> &str {
        &self.url
    }
}

impl fmt::Display for ApiBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_key_rejects_empty_string() {
        assert!(matches!(ApiKey::new(""), Err(ConfigError::EmptyApiKey)));
        assert!(matches!(ApiKey::new("   "), Err(ConfigError::EmptyApiKey)));
    }

    #[test]
    fn test_api_key_masks_value_in_debug() {
        let key = ApiKey::new("sk_live_secret").unwrap();
        let debug_output = format!("{:?}", key);
        assert_eq!(debug_output, "ApiKey(*****)");
        assert!(!debug_output.contains("sk_live_secret"));
    }

    #[test]
    fn test_api_base_validates_format() {
        let base = ApiBase::new("https://api.invoiced.com").unwrap();
        assert_eq!(base.scheme(), "https");
        assert_eq!(base.host_name(), Some("api.invoiced.com"));

        // With port
        let base = ApiBase::new("http://127.0.0.1:4010").unwrap();
        assert_eq!(base.scheme(), "http");
        assert_eq!(base.host_name(), Some("127.0.0.1"));
        assert_eq!(base.as_ref(), "http://127.0.0.1:4010");

        // With path prefix and trailing slash
        let base = ApiBase::new("https://proxy.example.com/invoiced/").unwrap();
        assert_eq!(base.as_ref(), "https://proxy.example.com/invoiced");
    }

    #[test]
    fn test_api_base_rejects_invalid() {
        // No scheme
        assert!(ApiBase::new("api.invoiced.com").is_err());

        // Empty host
        assert!(ApiBase::new("https://").is_err());

        // Invalid scheme
        assert!(ApiBase::new("://example.com").is_err());

        // Query component
        assert!(ApiBase::new("https://example.com?x=1").is_err());
    }
}
