//! Invoiced API environments.
//!
//! This module provides the [`Environment`] enum that selects the API host.

use crate::error::ConfigError;
use std::fmt;
use std::str::FromStr;

/// Base URL of the production API.
pub const API_BASE: &str = "https://api.invoiced.com";

/// Base URL of the sandbox API.
pub const API_BASE_SANDBOX: &str = "https://api.sandbox.invoiced.com";

/// The Invoiced environment a client talks to.
///
/// Live and sandbox accounts use separate hosts and separate API keys.
///
/// # Example
///
/// ```rust
/// use invoiced::Environment;
///
/// let env: Environment = "sandbox".parse().unwrap();
/// assert_eq!(env, Environment::Sandbox);
/// assert_eq!(env.base_url(), "https://api.sandbox.invoiced.com");
/// assert_eq!(Environment::from_sandbox(false), Environment::Live);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Environment {
    /// Production (`https://api.invoiced.com`).
    #[default]
    Live,
    /// Sandbox (`https://api.sandbox.invoiced.com`).
    Sandbox,
}

impl Environment {
    /// Maps the `sandbox` flag onto an environment.
    #[must_use]
    pub const fn from_sandbox(sandbox: bool) -> Self {
        if sandbox {
            Self::Sandbox
        } else {
            Self::Live
        }
    }

    /// Returns the API base URL for this environment.
    #[must_use]
    pub const fn base_url(&self) -> &'static str {
        match self {
            Self::Live => API_BASE,
            Self::Sandbox => API_BASE_SANDBOX,
        }
    }

    /// Returns `true` for the sandbox environment.
    #[must_use]
    pub const fn is_sandbox(&self) -> bool {
        matches!(self, Self::Sandbox)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Live => f.write_str("live"),
            Self::Sandbox => f.write_str("sandbox"),
        }
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "live" | "production" => Ok(Self::Live),
            "sandbox" => Ok(Self::Sandbox),
            _ => Err(ConfigError::InvalidEnvironment {
                name: s.to_string(),
            }),
        }
    }
}
