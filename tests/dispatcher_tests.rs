//! Integration tests for the request dispatcher.
//!
//! These tests run the dispatcher against a local mock server and verify
//! authentication, parameter encoding, response parsing, and error
//! classification.

use invoiced::clients::{ErrorKind, HttpClient, HttpMethod, CONNECTION_ERROR_MESSAGE, SDK_VERSION};
use invoiced::{ApiBase, ApiKey, InvoicedConfig, InvoicedError};
use serde_json::json;
use tokio_test::{assert_err, assert_ok};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a dispatcher pointed at the mock server.
fn create_client(server: &MockServer) -> HttpClient {
    let config = InvoicedConfig::builder()
        .api_key(ApiKey::new("test").unwrap())
        .api_base(ApiBase::new(server.uri()).unwrap())
        .build()
        .unwrap();
    HttpClient::new(&config).unwrap()
}

// ============================================================================
// Request Building
// ============================================================================

#[tokio::test]
async fn test_sends_basic_auth_and_json_headers() {
    let server = MockServer::start().await;

    // base64("test:")
    Mock::given(method("GET"))
        .and(path("/customers"))
        .and(header("Authorization", "Basic dGVzdDo="))
        .and(header("Content-Type", "application/json"))
        .and(header("Accept", "application/json"))
        .and(header("User-Agent", format!("Invoiced Rust/{SDK_VERSION}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server);
    let response = assert_ok!(client.dispatch(HttpMethod::Get, "/customers", None).await);
    assert_eq!(response.code, 200);
    assert_eq!(response.body, Some(json!([])));
}

#[tokio::test]
async fn test_user_agent_prefix() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/invoices"))
        .and(header(
            "User-Agent",
            format!("acme-billing/2.0 | Invoiced Rust/{SDK_VERSION}").as_str(),
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let config = InvoicedConfig::builder()
        .api_key(ApiKey::new("test").unwrap())
        .api_base(ApiBase::new(server.uri()).unwrap())
        .user_agent_prefix("acme-billing/2.0")
        .build()
        .unwrap();
    let client = HttpClient::new(&config).unwrap();

    assert_ok!(client.dispatch(HttpMethod::Get, "/invoices", None).await);
}

#[tokio::test]
async fn test_get_params_become_bracketed_query() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/invoices"))
        .and(query_param("per_page", "10"))
        .and(query_param("filter[status]", "past_due"))
        .and(query_param("filter[customer]", "15444"))
        .and(query_param("sort", "date DESC"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server);
    let params = json!({
        "per_page": 10,
        "filter": {"status": "past_due", "customer": 15444},
        "sort": "date DESC"
    });
    assert_ok!(
        client
            .dispatch(HttpMethod::Get, "/invoices", Some(params))
            .await
    );
}

#[tokio::test]
async fn test_post_params_become_json_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/customers"))
        .and(body_json(json!({"name": "Pied Piper", "metadata": {"tier": "gold"}})))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!({"id": 123, "name": "Pied Piper"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server);
    let response = client
        .dispatch(
            HttpMethod::Post,
            "/customers",
            Some(json!({"name": "Pied Piper", "metadata": {"tier": "gold"}})),
        )
        .await
        .unwrap();

    assert_eq!(response.code, 201);
    assert_eq!(response.into_body()["id"], 123);
}

#[tokio::test]
async fn test_post_without_params_sends_empty_object() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/invoices/1234/pay"))
        .and(body_json(json!({})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 1234})))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server);
    assert_ok!(
        client
            .dispatch(HttpMethod::Post, "/invoices/1234/pay", None)
            .await
    );
}

#[tokio::test]
async fn test_invalid_request_never_reaches_server() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = create_client(&server);

    let err = assert_err!(client.dispatch(HttpMethod::Get, "customers", None).await);
    assert!(matches!(err, InvoicedError::InvalidHttpRequest(_)));

    let err = assert_err!(
        client
            .dispatch(HttpMethod::Get, "/customers", Some(json!(["not", "an", "object"])))
            .await
    );
    assert!(matches!(err, InvoicedError::InvalidHttpRequest(_)));
}

// ============================================================================
// Response Parsing
// ============================================================================

#[tokio::test]
async fn test_no_content_has_no_body() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/customers/123"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let client = create_client(&server);
    let response = client
        .dispatch(HttpMethod::Delete, "/customers/123", None)
        .await
        .unwrap();

    assert!(response.is_no_content());
    assert!(response.body.is_none());
}

#[tokio::test]
async fn test_pagination_headers_are_exposed() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/customers"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("X-Total-Count", "15")
                .insert_header(
                    "Link",
                    "<https://api.invoiced.com/customers?per_page=25&page=1>; rel=\"self\", \
                     <https://api.invoiced.com/customers?per_page=25&page=1>; rel=\"first\", \
                     <https://api.invoiced.com/customers?per_page=25&page=1>; rel=\"last\"",
                )
                .insert_header("X-Request-Id", "req_abc123")
                .set_body_json(json!([{"id": 123}])),
        )
        .mount(&server)
        .await;

    let client = create_client(&server);
    let response = client
        .dispatch(HttpMethod::Get, "/customers", None)
        .await
        .unwrap();

    assert_eq!(response.header("x-total-count"), Some("15"));
    assert_eq!(response.request_id(), Some("req_abc123"));

    let metadata = response.list_metadata();
    assert_eq!(metadata.total_count(), 15);
    assert_eq!(metadata.first_page(), Some(1));
    assert_eq!(metadata.last_page(), Some(1));
    assert_eq!(metadata.self_page(), Some(1));
    assert_eq!(metadata.next_page(), None);
    assert!(!metadata.has_next_page());
}

#[tokio::test]
async fn test_non_json_success_body_is_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/customers"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let client = create_client(&server);
    let err = assert_err!(client.dispatch(HttpMethod::Get, "/customers", None).await);

    assert_eq!(err.kind(), Some(ErrorKind::Api));
    assert_eq!(err.to_string(), "API Error 200 - <html>oops</html>");
    assert!(err.payload().is_none());
}

// ============================================================================
// Error Classification
// ============================================================================

#[tokio::test]
async fn test_401_is_authentication_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/customers"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "type": "authentication_error",
            "message": "Invalid API key"
        })))
        .mount(&server)
        .await;

    let client = create_client(&server);
    let err = assert_err!(client.dispatch(HttpMethod::Get, "/customers", None).await);

    assert!(matches!(err, InvoicedError::Authentication(_)));
    assert_eq!(err.to_string(), "Invalid API key");
    assert_eq!(err.status(), Some(401));
    assert_eq!(err.payload().unwrap()["type"], "authentication_error");
}

#[tokio::test]
async fn test_400_403_404_are_invalid_request_errors() {
    let server = MockServer::start().await;

    for (code, route) in [(400, "/bad"), (403, "/forbidden"), (404, "/missing")] {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(code).set_body_json(json!({
                "type": "invalid_request",
                "message": format!("Request failed with {code}"),
                "param": "id"
            })))
            .mount(&server)
            .await;
    }

    let client = create_client(&server);
    for (code, route) in [(400, "/bad"), (403, "/forbidden"), (404, "/missing")] {
        let err = assert_err!(client.dispatch(HttpMethod::Get, route, None).await);
        assert_eq!(err.kind(), Some(ErrorKind::InvalidRequest), "status {code}");
        assert_eq!(err.status(), Some(code));
        assert_eq!(err.to_string(), format!("Request failed with {code}"));
        assert_eq!(err.response().unwrap().param(), Some("id"));
    }
}

#[tokio::test]
async fn test_other_statuses_are_api_errors() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/unavailable"))
        .respond_with(ResponseTemplate::new(503).set_body_json(json!({
            "type": "api_error",
            "message": "Service unavailable"
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/crash"))
        .respond_with(
            ResponseTemplate::new(500)
                .insert_header("X-Request-Id", "req_500")
                .set_body_string("Internal Server Error"),
        )
        .mount(&server)
        .await;

    let client = create_client(&server);

    let err = assert_err!(client.dispatch(HttpMethod::Get, "/unavailable", None).await);
    assert!(matches!(err, InvoicedError::Api(_)));
    assert_eq!(err.to_string(), "Service unavailable");

    let err = assert_err!(client.dispatch(HttpMethod::Get, "/crash", None).await);
    assert!(matches!(err, InvoicedError::Api(_)));
    assert_eq!(err.to_string(), "API Error 500 - Internal Server Error");
    assert_eq!(err.status(), Some(500));
    assert_eq!(err.request_id(), Some("req_500"));
    assert!(err.payload().is_none());
}

#[tokio::test]
async fn test_unreachable_host_is_connection_error() {
    // Reserve a free port, then close it so nothing is listening
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let config = InvoicedConfig::builder()
        .api_key(ApiKey::new("test").unwrap())
        .api_base(ApiBase::new(format!("http://127.0.0.1:{port}")).unwrap())
        .build()
        .unwrap();
    let client = HttpClient::new(&config).unwrap();

    let err = assert_err!(client.dispatch(HttpMethod::Get, "/customers", None).await);
    assert_eq!(err.kind(), Some(ErrorKind::Connection));
    assert_eq!(err.to_string(), CONNECTION_ERROR_MESSAGE);
    assert!(std::error::Error::source(&err).is_some());
}
