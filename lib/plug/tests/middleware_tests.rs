//! Integration tests for middleware functionality against a live server.

use std::sync::Arc;

use plug::{Client, Headers, Middleware, TransportConfig, middleware::Cache};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{header, header_exists, method, path},
};

/// Builds a client with `configure` and runs `f` on a blocking thread.
async fn run<T, B, F>(configure: B, f: F) -> T
where
    T: Send + 'static,
    B: FnOnce(plug::ClientBuilder) -> plug::ClientBuilder + Send + 'static,
    F: FnOnce(&Client) -> T + Send + 'static,
{
    tokio::task::spawn_blocking(move || {
        let builder = Client::builder().hyper(TransportConfig::default());
        let client = configure(builder).build().expect("client");
        f(&client)
    })
    .await
    .expect("blocking task")
}

/// Test that bearer auth middleware adds Authorization header.
#[tokio::test(flavor = "multi_thread")]
async fn test_bearer_auth_header() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/protected"))
        .and(header("Authorization", "Bearer my-secret-token"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"user": "alice"})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let url = format!("{}/protected", mock_server.uri());
    let response = run(
        |builder| builder.with_bearer_auth("my-secret-token"),
        move |client| client.get(&url, Headers::new()),
    )
    .await
    .expect("response");

    assert!(response.is_success());
}

/// Test that basic auth middleware adds Authorization header.
#[cfg(feature = "middleware-basic-auth")]
#[tokio::test(flavor = "multi_thread")]
async fn test_basic_auth_header() {
    let mock_server = MockServer::start().await;

    // "user:pass" -> "dXNlcjpwYXNz"
    Mock::given(method("GET"))
        .and(path("/basic"))
        .and(header("Authorization", "Basic dXNlcjpwYXNz"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let url = format!("{}/basic", mock_server.uri());
    let response = run(
        |builder| builder.with_basic_auth("user", "pass"),
        move |client| client.get(&url, Headers::new()),
    )
    .await
    .expect("response");

    assert!(response.is_success());
}

/// Test that logging middleware doesn't break request/response flow.
#[tokio::test(flavor = "multi_thread")]
async fn test_logging_middleware() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/logged"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"logged": true})))
        .mount(&mock_server)
        .await;

    let url = format!("{}/logged", mock_server.uri());
    let response = run(
        plug::ClientBuilder::with_debug_logging,
        move |client| client.get(&url, Headers::new()),
    )
    .await
    .expect("response");

    assert!(response.is_success());
}

/// Test multiple middleware composed together.
#[tokio::test(flavor = "multi_thread")]
async fn test_middleware_composition() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/composed"))
        .and(header("Authorization", "Bearer token"))
        .and(header_exists("X-Client"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&mock_server)
        .await;

    let url = format!("{}/composed", mock_server.uri());
    let response = run(
        |builder| {
            builder
                .with_logging()
                .with_retry(2)
                .with_bearer_auth("token")
                .with_default_headers(Headers::from([("X-Client", "plug")]))
        },
        move |client| client.post(&url, Headers::new(), "{}"),
    )
    .await
    .expect("response");

    assert_eq!(response.status(), 201);
}

/// Test that the cache answers the second GET without touching the server.
#[tokio::test(flavor = "multi_thread")]
async fn test_cache_serves_repeated_get() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/cached"))
        .respond_with(ResponseTemplate::new(200).set_body_string("fresh"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let cache = Arc::new(Cache::new());
    let shared = Arc::clone(&cache) as Arc<dyn Middleware>;
    let url = format!("{}/cached", mock_server.uri());
    let (first, second) = run(
        move |builder| builder.with_shared(shared),
        move |client| {
            (
                client.get(&url, Headers::new()),
                client.get(&url, Headers::new()),
            )
        },
    )
    .await;

    assert_eq!(first.expect("first").body().as_ref(), b"fresh");
    assert_eq!(second.expect("second").body().as_ref(), b"fresh");
    assert_eq!(cache.len(), 1);
}

/// Test that retry gives up on a dead host and reports the connection error.
#[tokio::test(flavor = "multi_thread")]
async fn test_retry_exhausts_on_dead_host() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
        listener.local_addr().expect("addr").port()
    };

    let url = format!("http://127.0.0.1:{port}/");
    let err = run(
        |builder| builder.with_retry(2),
        move |client| client.get(&url, Headers::new()),
    )
    .await
    .expect_err("dead host");

    assert!(err.is_connection());
}
