//! `process_url` and `UrlHandler` against a local mock server.
//!
//! The fetch path is blocking, so each call runs on tokio's blocking pool
//! while the mock server keeps serving on the async runtime.

#![cfg(feature = "fetch")]
#![allow(clippy::expect_used)] // expect() is appropriate in tests for clear panic messages

use head_meta::handler::{Request, Response, UrlHandler};
use head_meta::{process_url, Error, HeadMetadata, Options, Result};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PAGE: &str = r#"<!DOCTYPE html>
<html><head>
<title>Served</title>
<meta property="og:site_name" content="Local">
</head><body><p>body</p></body></html>"#;

/// Mount a single `GET /page` response that must be requested exactly once.
async fn serve(server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/page"))
        .respond_with(response)
        .expect(1)
        .mount(server)
        .await;
}

async fn fetch(url: String, options: Options) -> Result<HeadMetadata> {
    tokio::task::spawn_blocking(move || process_url(&url, &options))
        .await
        .expect("fetch task panicked")
}

async fn handle(request: Request) -> Response {
    tokio::task::spawn_blocking(move || UrlHandler::default().handle(&request))
        .await
        .expect("handler task panicked")
}

#[tokio::test]
async fn fetches_and_extracts_html() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/page"))
        .and(header("user-agent", "head-meta-test/1.0"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(PAGE, "text/html; charset=utf-8"))
        .expect(1)
        .mount(&server)
        .await;

    let options = Options {
        user_agent: "head-meta-test/1.0".into(),
        ..Options::default()
    };
    let metadata = fetch(format!("{}/page", server.uri()), options)
        .await
        .expect("HTML page should be extracted");

    assert_eq!(metadata.title, "Served");
    assert_eq!(metadata.meta("og:site_name"), Some("Local"));
}

#[tokio::test]
async fn missing_content_type_is_accepted() {
    let server = MockServer::start().await;
    serve(&server, ResponseTemplate::new(200).set_body_bytes(PAGE)).await;

    let metadata = fetch(format!("{}/page", server.uri()), Options::default())
        .await
        .expect("missing content type should be accepted");
    assert_eq!(metadata.title, "Served");
}

#[tokio::test]
async fn non_html_content_type_is_rejected() {
    let server = MockServer::start().await;
    serve(&server, ResponseTemplate::new(200).set_body_raw("{}", "application/json")).await;

    let err = fetch(format!("{}/page", server.uri()), Options::default())
        .await
        .expect_err("JSON is not HTML");
    assert!(matches!(err, Error::ContentTypeNotHtml(ref media_type) if media_type == "application/json"));
}

#[tokio::test]
async fn error_status_is_rejected() {
    let server = MockServer::start().await;
    serve(&server, ResponseTemplate::new(404).set_body_raw(PAGE, "text/html")).await;

    let err = fetch(format!("{}/page", server.uri()), Options::default())
        .await
        .expect_err("404 should be rejected");
    assert!(matches!(err, Error::InvalidStatusCode(404)));
}

#[tokio::test]
async fn unmatched_path_is_not_served() {
    let server = MockServer::start().await;
    serve(&server, ResponseTemplate::new(200).set_body_raw(PAGE, "text/html")).await;

    let err = fetch(format!("{}/other", server.uri()), Options::default())
        .await
        .expect_err("unmounted path answers 404");
    assert!(matches!(err, Error::InvalidStatusCode(404)));

    fetch(format!("{}/page", server.uri()), Options::default())
        .await
        .expect("mounted path should be served");
}

#[test]
fn invalid_url_is_rejected() {
    assert!(matches!(process_url("::not a url::", &Options::default()), Err(Error::InvalidUrl(_))));
}

#[tokio::test]
async fn url_handler_serves_json() {
    let server = MockServer::start().await;
    serve(&server, ResponseTemplate::new(200).set_body_raw(PAGE, "text/html")).await;

    let response = handle(Request::new(None, format!("{}/page", server.uri()))).await;
    assert_eq!(response.status, 200);
    assert_eq!(response.content_type, "application/json");

    let metadata: HeadMetadata = serde_json::from_slice(&response.body).expect("JSON body");
    assert_eq!(metadata.title, "Served");
}

#[tokio::test]
async fn url_handler_maps_upstream_failures_to_bad_gateway() {
    let server = MockServer::start().await;
    serve(&server, ResponseTemplate::new(500).set_body_raw(PAGE, "text/html")).await;

    let query = format!("url={}/page", server.uri());
    let response = handle(Request::new(Some(&query), "")).await;
    assert_eq!(response.status, 502);
    assert_eq!(response.text(), "invalid status code: 500\n");
}
