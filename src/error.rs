//! Error types for the Invoiced client configuration.
//!
//! This module contains error types used when constructing configuration
//! values and clients. Errors raised by API operations live in
//! [`crate::clients::InvoicedError`].
//!
//! # Error Handling
//!
//! All configuration constructors return `Result<T, ConfigError>` to enable
//! fail-fast validation. Error messages are designed to be clear and actionable.
//!
//! # Example
//!
//! ```rust
//! use invoiced::{ApiKey, ConfigError};
//!
//! let result = ApiKey::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyApiKey)));
//! ```

use thiserror::Error;

/// Errors that can occur during client configuration.
///
/// Each variant provides a clear, actionable error message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// API key cannot be empty.
    #[error("API key cannot be empty. Please provide a valid Invoiced API key.")]
    EmptyApiKey,

    /// API base URL is invalid.
    #[error("Invalid API base URL '{url}'. Please provide a URL with scheme (e.g., 'https://api.invoiced.com').")]
    InvalidApiBase {
        /// The invalid URL that was provided.
        url: String,
    },

    /// Environment name is not recognized.
    #[error("Invalid environment '{name}'. Expected 'live' or 'sandbox'.")]
    InvalidEnvironment {
        /// The unrecognized name.
        name: String,
    },

    /// Lock settings are unusable.
    #[error("Invalid lock settings: {reason}")]
    InvalidLockSettings {
        /// The reason the settings were rejected.
        reason: String,
    },

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },

    /// The underlying HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {reason}")]
    HttpClientBuild {
        /// The reason reported by the HTTP stack.
        reason: String,
    },
}
