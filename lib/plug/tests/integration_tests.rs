//! Integration tests for `HyperTransport` using wiremock.
//!
//! The transport blocks on its own runtime, so every call runs on a blocking
//! thread while the mock server lives on the test runtime.

use std::time::Duration;

use plug::{Client, Error, Headers, HttpVersion, Method, Request, TransportConfig, Url};
use serde::{Deserialize, Serialize};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, body_string, header, method, path, query_param},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct User {
    id: u64,
    name: String,
}

/// Runs `f` with a fresh client on a blocking thread.
async fn with_client<T, F>(config: TransportConfig, f: F) -> T
where
    T: Send + 'static,
    F: FnOnce(&Client) -> T + Send + 'static,
{
    tokio::task::spawn_blocking(move || {
        let client = Client::with_config(config).expect("client");
        f(&client)
    })
    .await
    .expect("blocking task")
}

#[tokio::test(flavor = "multi_thread")]
async fn test_get_request() {
    let mock_server = MockServer::start().await;

    let user = User {
        id: 1,
        name: "Alice".to_string(),
    };

    Mock::given(method("GET"))
        .and(path("/users/1"))
        .and(header("Accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&user))
        .expect(1)
        .mount(&mock_server)
        .await;

    let url = format!("{}/users/1", mock_server.uri());
    let response = with_client(TransportConfig::default(), move |client| {
        client.get(&url, Headers::from([("Accept", "application/json")]))
    })
    .await
    .expect("response");

    assert!(response.is_success());
    assert_eq!(response.status(), 200);

    let body: User = response.json().expect("json");
    assert_eq!(body, user);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_post_request_with_json_body() {
    let mock_server = MockServer::start().await;

    let input = User {
        id: 0,
        name: "Bob".to_string(),
    };
    let output = User {
        id: 42,
        name: "Bob".to_string(),
    };

    Mock::given(method("POST"))
        .and(path("/users"))
        .and(header("Content-Type", "application/json"))
        .and(body_json(&input))
        .respond_with(ResponseTemplate::new(201).set_body_json(&output))
        .mount(&mock_server)
        .await;

    let url = Url::parse(&format!("{}/users", mock_server.uri())).expect("url");
    let request = Request::builder(Method::Post, url)
        .json(&input)
        .expect("json body")
        .build();

    let exchange = with_client(TransportConfig::default(), move |client| {
        client.execute(request)
    })
    .await
    .expect("exchange");

    assert_eq!(exchange.response().status(), 201);
    assert_eq!(exchange.request().method(), Method::Post);

    let body: User = exchange.response().json().expect("json");
    assert_eq!(body, output);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_every_verb_reaches_the_server() {
    let mock_server = MockServer::start().await;

    for verb in ["GET", "HEAD", "POST", "PUT", "PATCH", "DELETE"] {
        Mock::given(method(verb))
            .and(path("/items/7"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&mock_server)
            .await;
    }

    let url = format!("{}/items/7", mock_server.uri());
    let statuses = with_client(TransportConfig::default(), move |client| {
        vec![
            client.get(&url, Headers::new()).map(|r| r.status()),
            client.head(&url, Headers::new()).map(|r| r.status()),
            client.post(&url, Headers::new(), "{}").map(|r| r.status()),
            client.put(&url, Headers::new(), "{}").map(|r| r.status()),
            client.patch(&url, Headers::new(), "{}").map(|r| r.status()),
            client.delete(&url, Headers::new(), "").map(|r| r.status()),
        ]
    })
    .await;

    for status in statuses {
        assert_eq!(status.expect("response"), 204);
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn test_query_and_body_are_sent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/notes"))
        .and(query_param("draft", "true"))
        .and(body_string("remember the milk"))
        .respond_with(ResponseTemplate::new(200).set_body_string("saved"))
        .mount(&mock_server)
        .await;

    let url = Url::parse(&format!("{}/notes", mock_server.uri())).expect("url");
    let request = Request::builder(Method::Put, url)
        .query("draft", "true")
        .body("remember the milk")
        .build();

    let response = with_client(TransportConfig::default(), move |client| {
        client.execute(request)
    })
    .await
    .expect("exchange")
    .into_response();

    assert_eq!(response.text().expect("utf-8"), "saved");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_error_statuses_are_responses() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("nope"))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let base = mock_server.uri();
    let (missing, broken) = with_client(TransportConfig::default(), move |client| {
        (
            client.get(&format!("{base}/missing"), Headers::new()),
            client.get(&format!("{base}/broken"), Headers::new()),
        )
    })
    .await;

    let missing = missing.expect("404 is a response");
    assert!(missing.is_client_error());
    assert_eq!(missing.body().as_ref(), b"nope");

    assert!(broken.expect("503 is a response").is_server_error());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_response_headers_are_kept() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/headers"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("X-Request-Id", "abc-123")
                .insert_header("Content-Type", "text/plain"),
        )
        .mount(&mock_server)
        .await;

    let url = format!("{}/headers", mock_server.uri());
    let response = with_client(TransportConfig::default(), move |client| {
        client.get(&url, Headers::new())
    })
    .await
    .expect("response");

    assert_eq!(response.header("x-request-id"), Some("abc-123"));
    assert_eq!(response.header("content-type"), Some("text/plain"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_timeout() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
        .mount(&mock_server)
        .await;

    let config = TransportConfig::builder()
        .timeout(Duration::from_millis(100))
        .build();
    let url = format!("{}/slow", mock_server.uri());
    let err = with_client(config, move |client| client.get(&url, Headers::new()))
        .await
        .expect_err("timeout");

    assert!(err.is_timeout());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_connection_refused() {
    // Grab a free port, then close the listener so nothing answers there.
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
        listener.local_addr().expect("addr").port()
    };

    let url = format!("http://127.0.0.1:{port}/");
    let err = with_client(TransportConfig::default(), move |client| {
        client.get(&url, Headers::new())
    })
    .await
    .expect_err("connection refused");

    assert!(err.is_connection(), "unexpected error: {err}");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_config_default_headers_are_sent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/defaults"))
        .and(header("User-Agent", "plug-tests"))
        .and(header("Accept", "text/plain"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = TransportConfig::builder()
        .default_header("User-Agent", "plug-tests")
        .default_header("Accept", "application/json")
        .http_version(HttpVersion::Http11)
        .build();
    let url = format!("{}/defaults", mock_server.uri());
    let exchange = with_client(config, move |client| {
        client.send(
            Method::Get,
            &url,
            Headers::from([("Accept", "text/plain")]),
            "",
        )
    })
    .await
    .expect("exchange");

    assert_eq!(exchange.request().header("user-agent"), Some("plug-tests"));
    assert_eq!(exchange.request().header("accept"), Some("text/plain"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_client_from_config_file() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/configured"))
        .and(header("X-From-File", "yes"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let file = std::env::temp_dir().join(format!("plug-config-{}.json", std::process::id()));
    std::fs::write(
        &file,
        r#"{ "timeout_ms": 2000, "http_version": "1.1", "headers": ["X-From-File: yes"] }"#,
    )
    .expect("write config");

    let url = format!("{}/configured", mock_server.uri());
    let path = file.clone();
    let result = tokio::task::spawn_blocking(move || {
        let client = Client::from_config_file(&path)?;
        client.get(&url, Headers::new())
    })
    .await
    .expect("blocking task");

    std::fs::remove_file(&file).ok();
    assert!(result.expect("response").is_success());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_missing_config_file() {
    let err = tokio::task::spawn_blocking(|| Client::from_config_file("/no/such/plug.json"))
        .await
        .expect("blocking task")
        .expect_err("missing file");

    assert!(matches!(err, Error::Io(_)));
}
