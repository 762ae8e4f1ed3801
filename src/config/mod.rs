//! Configuration types for the Invoiced client.
//!
//! This module provides the configuration types used to construct a
//! [`Client`](crate::Client).
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`InvoicedConfig`]: The configuration struct holding all client settings
//! - [`InvoicedConfigBuilder`]: A builder for constructing [`InvoicedConfig`] instances
//! - [`ApiKey`]: A validated API key newtype with masked debug output
//! - [`ApiBase`]: A validated base URL override
//! - [`Environment`]: Live or sandbox
//!
//! # Example
//!
//! ```rust
//! use invoiced::{InvoicedConfig, ApiKey};
//!
//! let config = InvoicedConfig::builder()
//!     .api_key(ApiKey::new("my-api-key").unwrap())
//!     .sandbox(true)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.api_url(), "https://api.sandbox.invoiced.com");
//! ```

mod environment;
mod newtypes;

pub use environment::{Environment, API_BASE, API_BASE_SANDBOX};
pub use newtypes::{ApiBase, ApiKey};

use std::sync::Arc;
use std::time::Duration;

use crate::clients::{LockBackend, LockSettings};
use crate::error::ConfigError;

/// Configuration for the Invoiced client.
///
/// # Thread Safety
///
/// `InvoicedConfig` is `Clone`, `Send`, and `Sync`. The lock backend is held
/// behind an `Arc`, so clones share one backend.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use invoiced::{InvoicedConfig, ApiKey};
/// use invoiced::clients::InMemoryLockBackend;
///
/// let config = InvoicedConfig::builder()
///     .api_key(ApiKey::new("your-api-key").unwrap())
///     .lock_backend(Arc::new(InMemoryLockBackend::new()))
///     .build()
///     .unwrap();
///
/// assert!(config.lock_backend().is_some());
/// ```
#[derive(Clone, Debug)]
pub struct InvoicedConfig {
    api_key: ApiKey,
    environment: Environment,
    api_base: Option<ApiBase>,
    user_agent_prefix: Option<String>,
    timeout: Option<Duration>,
    lock_backend: Option<Arc<dyn LockBackend>>,
    lock_settings: LockSettings,
}

impl InvoicedConfig {
    /// Creates a new builder for constructing an `InvoicedConfig`.
    #[must_use]
    pub fn builder() -> InvoicedConfigBuilder {
        InvoicedConfigBuilder::new()
    }

    /// Returns the API key.
    #[must_use]
    pub const fn api_key(&self) -> &ApiKey {
        &self.api_key
    }

    /// Returns the environment.
    #[must_use]
    pub const fn environment(&self) -> Environment {
        self.environment
    }

    /// Returns `true` when the sandbox environment is selected.
    #[must_use]
    pub const fn sandbox(&self) -> bool {
        self.environment.is_sandbox()
    }

    /// Returns the base URL override, if configured.
    #[must_use]
    pub const fn api_base(&self) -> Option<&ApiBase> {
        self.api_base.as_ref()
    }

    /// Returns the URL requests are sent to.
    ///
    /// The explicit [`ApiBase`] wins over the environment's URL.
    #[must_use]
    pub fn api_url(&self) -> &str {
        self.api_base
            .as_ref()
            .map_or_else(|| self.environment.base_url(), AsRef::as_ref)
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }

    /// Returns the request timeout, if configured.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Returns the lock backend, if configured.
    #[must_use]
    pub fn lock_backend(&self) -> Option<&Arc<dyn LockBackend>> {
        self.lock_backend.as_ref()
    }

    /// Returns the lock settings.
    #[must_use]
    pub const fn lock_settings(&self) -> &LockSettings {
        &self.lock_settings
    }
}

// Verify InvoicedConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<InvoicedConfig>();
};

/// Builder for constructing [`InvoicedConfig`] instances.
///
/// The only required field is `api_key`.
///
/// # Defaults
///
/// - `environment`: [`Environment::Live`]
/// - `api_base`: `None`
/// - `user_agent_prefix`: `None`
/// - `timeout`: `None` (transport default)
/// - `lock_backend`: `None` (requests are not serialized)
/// - `lock_settings`: [`LockSettings::default`]
#[derive(Debug, Default)]
pub struct InvoicedConfigBuilder {
    api_key: Option<ApiKey>,
    environment: Option<Environment>,
    api_base: Option<ApiBase>,
    user_agent_prefix: Option<String>,
    timeout: Option<Duration>,
    lock_backend: Option<Arc<dyn LockBackend>>,
    lock_settings: Option<LockSettings>,
}

impl InvoicedConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API key (required).
    #[must_use]
    pub fn api_key(mut self, key: ApiKey) -> Self {
        self.api_key = Some(key);
        self
    }

    /// Selects the sandbox (`true`) or live (`false`) environment.
    #[must_use]
    pub const fn sandbox(mut self, sandbox: bool) -> Self {
        self.environment = Some(Environment::from_sandbox(sandbox));
        self
    }

    /// Sets the environment.
    #[must_use]
    pub const fn environment(mut self, environment: Environment) -> Self {
        self.environment = Some(environment);
        self
    }

    /// Overrides the base URL derived from the environment.
    #[must_use]
    pub fn api_base(mut self, base: ApiBase) -> Self {
        self.api_base = Some(base);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Sets the transport timeout applied to every request.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Enables the connection lock around every request.
    #[must_use]
    pub fn lock_backend(mut self, backend: Arc<dyn LockBackend>) -> Self {
        self.lock_backend = Some(backend);
        self
    }

    /// Sets the lock pool size, TTL and acquisition wait.
    #[must_use]
    pub const fn lock_settings(mut self, settings: LockSettings) -> Self {
        self.lock_settings = Some(settings);
        self
    }

    /// Builds the [`InvoicedConfig`], validating that required fields are set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `api_key` is not set.
    /// Returns [`ConfigError::InvalidLockSettings`] if the lock settings are
    /// unusable.
    pub fn build(self) -> Result<InvoicedConfig, ConfigError> {
        let api_key = self
            .api_key
            .ok_or(ConfigError::MissingRequiredField { field: "api_key" })?;

        let lock_settings = self.lock_settings.unwrap_or_default();
        lock_settings.validate()?;

        Ok(InvoicedConfig {
            api_key,
            environment: self.environment.unwrap_or_default(),
            api_base: self.api_base,
            user_agent_prefix: self.user_agent_prefix,
            timeout: self.timeout,
            lock_backend: self.lock_backend,
            lock_settings,
        })
    }
}
