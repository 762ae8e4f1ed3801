//! Connection lock that serializes requests across a pool of named locks.
//!
//! When a [`LockBackend`] is configured, every dispatch first acquires one lock
//! picked at random from `invoiced_lock_1 ..= invoiced_lock_N`. With a shared
//! backend (Redis `SET NX PX`, a database row, ...) this caps the number of
//! concurrent connections all processes open against the Invoiced API at `N`.
//!
//! The crate ships [`InMemoryLockBackend`] for single-process use and tests.
//! Distributed backends are implemented by the embedding application.

use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;
use thiserror::Error;
use tokio::sync::Mutex;
use tokio::time::Instant;

use crate::clients::errors::{InvoicedError, LockTimeoutError};
use crate::error::ConfigError;

/// Prefix shared by every lock name in the pool.
pub const LOCK_NAME_PREFIX: &str = "invoiced_lock_";

/// Returns the name of the `n`th lock in the pool.
///
/// ```rust
/// assert_eq!(invoiced::clients::lock_name(7), "invoiced_lock_7");
/// ```
#[must_use]
pub fn lock_name(n: u32) -> String {
    format!("{LOCK_NAME_PREFIX}{n}")
}

/// Opaque value identifying the holder of a lock.
///
/// Only the token returned by [`LockBackend::try_acquire`] releases the lock.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct LockToken(String);

impl LockToken {
    /// Wraps a backend-specific token value.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Generates a fresh random token.
    #[must_use]
    pub fn random() -> Self {
        Self(format!("{:032x}", rand::random::<u128>()))
    }

    /// Returns the token value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Failure reported by a [`LockBackend`].
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("{0}")]
pub struct LockBackendError(pub String);

/// Storage for named, expiring locks.
///
/// Implementations must make `try_acquire` atomic: at most one holder per
/// name until the holder releases or the TTL elapses.
///
/// # Example
///
/// ```rust,ignore
/// use async_trait::async_trait;
/// use invoiced::clients::{LockBackend, LockBackendError, LockToken};
///
/// #[derive(Debug)]
/// struct RedisLocks { pool: deadpool_redis::Pool }
///
/// #[async_trait]
/// impl LockBackend for RedisLocks {
///     async fn try_acquire(&self, name: &str, ttl: Duration)
///         -> Result<Option<LockToken>, LockBackendError>
///     {
///         // SET name token NX PX ttl
///     }
///
///     async fn release(&self, name: &str, token: &LockToken)
///         -> Result<(), LockBackendError>
///     {
///         // compare-and-delete script
///     }
/// }
/// ```
#[async_trait]
pub trait LockBackend: Send + Sync + fmt::Debug {
    /// Attempts to take the lock once.
    ///
    /// Returns `Ok(None)` when another holder has it.
    async fn try_acquire(
        &self,
        name: &str,
        ttl: Duration,
    ) -> Result<Option<LockToken>, LockBackendError>;

    /// Releases the lock if `token` still holds it.
    async fn release(&self, name: &str, token: &LockToken) -> Result<(), LockBackendError>;
}

/// A process-local [`LockBackend`].
///
/// Expired entries are replaced on the next acquisition attempt.
#[derive(Debug, Default)]
pub struct InMemoryLockBackend {
    locks: Mutex<HashMap<String, (LockToken, Instant)>>,
}

impl InMemoryLockBackend {
    /// Creates an empty backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if `name` is currently held and not expired.
    pub async fn is_held(&self, name: &str) -> bool {
        let locks = self.locks.lock().await;
        locks
            .get(name)
            .is_some_and(|(_, expires_at)| *expires_at > Instant::now())
    }
}

#[async_trait]
impl LockBackend for InMemoryLockBackend {
    async fn try_acquire(
        &self,
        name: &str,
        ttl: Duration,
    ) -> Result<Option<LockToken>, LockBackendError> {
        let mut locks = self.locks.lock().await;
        let now = Instant::now();

        if let Some((_, expires_at)) = locks.get(name) {
            if *expires_at > now {
                return Ok(None);
            }
        }

        let token = LockToken::random();
        locks.insert(name.to_string(), (token.clone(), now + ttl));
        Ok(Some(token))
    }

    async fn release(&self, name: &str, token: &LockToken) -> Result<(), LockBackendError> {
        let mut locks = self.locks.lock().await;
        if locks.get(name).is_some_and(|(holder, _)| holder == token) {
            locks.remove(name);
        }
        Ok(())
    }
}

/// Pool size and timing of the connection lock.
///
/// # Defaults
///
/// - `pool_size`: 20
/// - `ttl`: 7 seconds
/// - `wait_timeout`: 10 seconds
/// - `poll_interval`: 10 milliseconds
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LockSettings {
    /// Number of named locks in the pool.
    pub pool_size: u32,
    /// How long a held lock lives before it expires on its own.
    pub ttl: Duration,
    /// How long acquisition is attempted before giving up.
    pub wait_timeout: Duration,
    /// Delay between acquisition attempts.
    pub poll_interval: Duration,
}

impl Default for LockSettings {
    fn default() -> Self {
        Self {
            pool_size: 20,
            ttl: Duration::from_secs(7),
            wait_timeout: Duration::from_secs(10),
            poll_interval: Duration::from_millis(10),
        }
    }
}

impl LockSettings {
    /// Sets the number of named locks.
    #[must_use]
    pub const fn pool_size(mut self, pool_size: u32) -> Self {
        self.pool_size = pool_size;
        self
    }

    /// Sets the lock TTL.
    #[must_use]
    pub const fn ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Sets the acquisition wait bound.
    #[must_use]
    pub const fn wait_timeout(mut self, wait_timeout: Duration) -> Self {
        self.wait_timeout = wait_timeout;
        self
    }

    /// Sets the delay between acquisition attempts.
    #[must_use]
    pub const fn poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Checks that the settings can be used.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidLockSettings`] if the pool is empty, or the
    /// TTL or poll interval is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let reason = if self.pool_size == 0 {
            "pool_size must be at least 1"
        } else if self.ttl.is_zero() {
            "ttl must be greater than zero"
        } else if self.poll_interval.is_zero() {
            "poll_interval must be greater than zero"
        } else {
            return Ok(());
        };

        Err(ConfigError::InvalidLockSettings {
            reason: reason.to_string(),
        })
    }
}

/// Serializes requests through a [`LockBackend`].
#[derive(Clone, Debug)]
pub struct ConnectionLimiter {
    backend: Arc<dyn LockBackend>,
    settings: LockSettings,
}

// Verify ConnectionLimiter is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ConnectionLimiter>();
};

impl ConnectionLimiter {
    /// Creates a limiter over `backend`.
    #[must_use]
    pub fn new(backend: Arc<dyn LockBackend>, settings: LockSettings) -> Self {
        Self { backend, settings }
    }

    /// Returns the settings in use.
    #[must_use]
    pub const fn settings(&self) -> &LockSettings {
        &self.settings
    }

    /// Picks a lock name uniformly at random from the pool.
    #[must_use]
    pub fn pick_lock_name(&self) -> String {
        let n = rand::thread_rng().gen_range(1..=self.settings.pool_size.max(1));
        lock_name(n)
    }

    /// Acquires `name`, polling until the wait bound is exceeded.
    ///
    /// At least one attempt is always made.
    ///
    /// # Errors
    ///
    /// Returns [`InvoicedError::LockTimeout`] when the lock stays taken, or
    /// [`InvoicedError::LockBackend`] when the backend fails.
    pub async fn acquire(&self, name: &str) -> Result<LockToken, InvoicedError> {
        let started = Instant::now();

        loop {
            let attempt = self
                .backend
                .try_acquire(name, self.settings.ttl)
                .await
                .map_err(|e| InvoicedError::LockBackend { message: e.0 })?;

            if let Some(token) = attempt {
                tracing::trace!(lock = name, "Acquired connection lock");
                return Ok(token);
            }

            let waited = started.elapsed();
            if waited >= self.settings.wait_timeout {
                tracing::warn!(lock = name, ?waited, "Timed out acquiring connection lock");
                return Err(LockTimeoutError {
                    lock_name: name.to_string(),
                    waited,
                }
                .into());
            }

            tokio::time::sleep(self.settings.poll_interval).await;
        }
    }

    /// Releases `name`. Failures are logged, never returned.
    pub async fn release(&self, name: &str, token: &LockToken) {
        if let Err(e) = self.backend.release(name, token).await {
            tracing::warn!(lock = name, error = %e, "Failed to release connection lock");
        }
    }

    /// Runs `operation` while holding a lock from the pool.
    ///
    /// The lock is released whether or not `operation` succeeds, and also
    /// when the returned future is dropped mid-flight. If the lock cannot be
    /// acquired, `operation` is never started.
    ///
    /// # Errors
    ///
    /// Returns the acquisition error, or whatever `operation` returns.
    pub async fn run<T, F, Fut>(&self, operation: F) -> Result<T, InvoicedError>
    where
        F: FnOnce() -> Fut + Send,
        Fut: Future<Output = Result<T, InvoicedError>> + Send,
        T: Send,
    {
        let name = self.pick_lock_name();
        let token = self.acquire(&name).await?;
        let mut held = HeldLock {
            backend: Arc::clone(&self.backend),
            name,
            token: Some(token),
        };

        let result = operation().await;

        if let Some(token) = held.token.take() {
            self.release(&held.name, &token).await;
        }
        result
    }
}

/// A lock taken by [`ConnectionLimiter::run`].
///
/// If the future driving `run` is dropped before the operation finishes, the
/// lock is released from a spawned task instead of waiting out its TTL.
struct HeldLock {
    backend: Arc<dyn LockBackend>,
    name: String,
    token: Option<LockToken>,
}

impl Drop for HeldLock {
    fn drop(&mut self) {
        let Some(token) = self.token.take() else {
            return;
        };
        let name = std::mem::take(&mut self.name);

        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            tracing::warn!(lock = %name, "No runtime to release connection lock, it expires with its TTL");
            return;
        };

        let backend = Arc::clone(&self.backend);
        runtime.spawn(async move {
            tracing::debug!(lock = %name, "Releasing connection lock of cancelled request");
            if let Err(e) = backend.release(&name, &token).await {
                tracing::warn!(lock = %name, error = %e, "Failed to release connection lock");
            }
        });
    }
}
