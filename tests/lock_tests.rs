//! Integration tests for the connection lock.
//!
//! These tests run requests through a client configured with an in-memory
//! lock backend and verify that locks are held around requests, released
//! afterwards, and that an exhausted pool fails without touching the network.

use std::sync::Arc;
use std::time::Duration;

use invoiced::clients::{
    lock_name, ErrorKind, InMemoryLockBackend, LockBackend, LockSettings,
};
use invoiced::{ApiBase, ApiKey, Client, InvoicedConfig, InvoicedError};
use serde_json::json;
use tokio_test::assert_err;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a client whose requests go through `backend` with a pool of one lock.
fn create_locked_client(server: &MockServer, backend: Arc<InMemoryLockBackend>) -> Client {
    let settings = LockSettings::default()
        .pool_size(1)
        .wait_timeout(Duration::from_millis(100))
        .poll_interval(Duration::from_millis(5));

    let config = InvoicedConfig::builder()
        .api_key(ApiKey::new("test").unwrap())
        .api_base(ApiBase::new(server.uri()).unwrap())
        .lock_backend(backend)
        .lock_settings(settings)
        .build()
        .unwrap();
    Client::new(config).unwrap()
}

// ============================================================================
// Lock Lifecycle
// ============================================================================

#[tokio::test]
async fn test_lock_is_released_after_success() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/customers/123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 123})))
        .expect(2)
        .mount(&server)
        .await;

    let backend = Arc::new(InMemoryLockBackend::new());
    let client = create_locked_client(&server, Arc::clone(&backend));
    assert!(client.http_client().is_locked());

    client.customers.retrieve(123).await.unwrap();
    assert!(!backend.is_held(&lock_name(1)).await);

    // The single lock is free again for the next request
    client.customers.retrieve(123).await.unwrap();
}

#[tokio::test]
async fn test_lock_is_released_after_failed_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/customers/123"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .expect(1)
        .mount(&server)
        .await;

    let backend = Arc::new(InMemoryLockBackend::new());
    let client = create_locked_client(&server, Arc::clone(&backend));

    let err = assert_err!(client.customers.retrieve(123).await);
    assert_eq!(err.kind(), Some(ErrorKind::Api));
    assert!(!backend.is_held(&lock_name(1)).await);
}

#[tokio::test]
async fn test_exhausted_pool_times_out_without_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 123})))
        .expect(0)
        .mount(&server)
        .await;

    let backend = Arc::new(InMemoryLockBackend::new());
    let held = backend
        .try_acquire(&lock_name(1), Duration::from_secs(60))
        .await
        .unwrap();
    assert!(held.is_some());

    let client = create_locked_client(&server, Arc::clone(&backend));
    let err = assert_err!(client.customers.retrieve(123).await);

    assert_eq!(err.kind(), Some(ErrorKind::LockTimeout));
    match err {
        InvoicedError::LockTimeout(timeout) => {
            assert_eq!(timeout.lock_name, "invoiced_lock_1");
            assert!(timeout.waited >= Duration::from_millis(100));
        }
        other => panic!("Expected LockTimeout, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_lock_frees_up_while_waiting() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/customers/123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 123})))
        .expect(1)
        .mount(&server)
        .await;

    let backend = Arc::new(InMemoryLockBackend::new());
    let token = backend
        .try_acquire(&lock_name(1), Duration::from_secs(60))
        .await
        .unwrap()
        .unwrap();

    let releaser = {
        let backend = Arc::clone(&backend);
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            backend.release(&lock_name(1), &token).await.unwrap();
        })
    };

    let client = create_locked_client(&server, Arc::clone(&backend));
    let customer = client.customers.retrieve(123).await.unwrap();
    assert_eq!(customer.endpoint(), "/customers/123");

    releaser.await.unwrap();
}

#[tokio::test]
async fn test_lock_is_released_when_request_is_cancelled() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/customers/1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"id": 1}))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let backend = Arc::new(InMemoryLockBackend::new());
    let client = create_locked_client(&server, Arc::clone(&backend));

    let result =
        tokio::time::timeout(Duration::from_millis(200), client.customers.retrieve(1)).await;
    assert!(result.is_err(), "request should still be in flight");

    // Give the spawned release a moment to run
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(!backend.is_held(&lock_name(1)).await);
}
