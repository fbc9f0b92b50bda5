//! Dispatcher integration tests
//!
//! Drive `PivotalClient::send` against a mock Tracker server

use httpmock::prelude::*;
use pivotal::services::client::NIL_DOCUMENT;
use pivotal::{ApiError, ApiRequest, FileUpload, Fields, PivotalClient, RequestError, TrackerConfig, Value};
use std::io::Write;

const TOKEN: &str = "0123456789abcdef";

fn client(server: &MockServer) -> PivotalClient {
    PivotalClient::from_config(TrackerConfig {
        base_url: server.base_url(),
        token: Some(TOKEN.to_string()),
        timeout: Some(5),
    })
    .unwrap()
}

#[tokio::test]
async fn test_get_sends_token_and_accept_headers() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/services/v3/projects/42")
                .header("x-trackertoken", TOKEN)
                .header("accept", "text/html,application/xhtml+xml,application/xml")
                .header("content-length", "0");
            then.status(200)
                .body("<?xml version=\"1.0\"?><project><id type=\"integer\">42</id><name>Demo</name></project>");
        })
        .await;

    let request = ApiRequest::get().segment("projects").segment(42).build().unwrap();
    let value = client(&server).send(request).await.unwrap().unwrap();

    mock.assert_async().await;
    assert_eq!(value.get("id"), Some(&Value::Integer(42)));
    assert_eq!(value.get("name").and_then(Value::as_str), Some("Demo"));
}

#[tokio::test]
async fn test_no_token_header_without_credential() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/services/v3/projects")
                .header_missing("x-trackertoken");
            then.status(200).body("<projects><project><id>1</id></project></projects>");
        })
        .await;

    let anonymous = PivotalClient::from_config(TrackerConfig {
        base_url: server.base_url(),
        ..Default::default()
    })
    .unwrap();
    let request = ApiRequest::get().segment("projects").build().unwrap();
    assert!(anonymous.send(request).await.unwrap().is_some());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_xml_body_headers_and_length() {
    let server = MockServer::start_async().await;
    // "é" is two bytes on the wire
    let expected = "<note><text>café</text></note>";
    let length = expected.len().to_string();
    let mock = server
        .mock_async(|when, then| {
            when.method(PUT)
                .path("/services/v3/projects/1/stories/2/notes")
                .header("content-type", "application/xml")
                .header("content-length", length.as_str())
                .body(expected);
            then.status(200).body("<note><id>5</id><text>café</text></note>");
        })
        .await;

    let body = Fields::new().with("note", Fields::new().with("text", "café"));
    let request = ApiRequest::put()
        .segments(["projects", "1", "stories", "2", "notes"])
        .body(body)
        .build()
        .unwrap();
    let value = client(&server).send(request).await.unwrap().unwrap();

    mock.assert_async().await;
    assert_eq!(value.get("text").and_then(Value::as_str), Some("café"));
}

#[tokio::test]
async fn test_raw_body_sent_verbatim() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/services/v3/tokens/active")
                .header_missing("content-type")
                .header("content-length", "9")
                .body("a=1&b=two");
            then.status(200).body("<token><guid>abc</guid></token>");
        })
        .await;

    let request = ApiRequest::post()
        .segments(["tokens", "active"])
        .body("a=1&b=two")
        .build()
        .unwrap();
    client(&server).send(request).await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn test_non_200_status_is_error_without_parsing() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/services/v3/projects/404");
            then.status(404).body("<<< not xml at all");
        })
        .await;

    let request = ApiRequest::get().segments(["projects", "404"]).build().unwrap();
    let err = client(&server).send(request).await.unwrap_err();

    assert!(matches!(err, ApiError::HttpStatus { status: 404 }));
    assert_eq!(err.code(), Some(404));
    assert_eq!(err.description(), "API returned an HTTP error");
}

#[tokio::test]
async fn test_status_check_is_strict_equality() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/services/v3/projects");
            then.status(201).body("<project><id>1</id></project>");
        })
        .await;

    let request = ApiRequest::post().segment("projects").build().unwrap();
    let err = client(&server).send(request).await.unwrap_err();
    assert_eq!(err.code(), Some(201));
}

#[tokio::test]
async fn test_nil_sentinel_resolves_to_none() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/services/v3/projects/1/stories");
            then.status(200).body(NIL_DOCUMENT);
        })
        .await;

    let request = ApiRequest::get()
        .segments(["projects", "1", "stories"])
        .build()
        .unwrap();
    assert!(client(&server).send(request).await.unwrap().is_none());
}

#[tokio::test]
async fn test_unparseable_body_wraps_cause() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/services/v3/projects/1");
            then.status(200).body("<project><name>broken</project>");
        })
        .await;

    let request = ApiRequest::get().segments(["projects", "1"]).build().unwrap();
    let err = client(&server).send(request).await.unwrap_err();

    assert!(matches!(err, ApiError::Parse(_)));
    assert_eq!(err.description(), "Error while parsing service response");
    assert!(std::error::Error::source(&err).is_some());
}

#[tokio::test]
async fn test_body_with_trailing_page_is_parse_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/services/v3/projects/1");
            then.status(200)
                .body("<project><id>1</id></project>\n<html><body>502 Bad Gateway");
        })
        .await;

    let request = ApiRequest::get().segments(["projects", "1"]).build().unwrap();
    let err = client(&server).send(request).await.unwrap_err();

    assert!(matches!(err, ApiError::Parse(_)));
    assert_eq!(err.description(), "Error while parsing service response");
}

#[tokio::test]
async fn test_nil_document_without_declaration_resolves_to_none() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/services/v3/projects/1/stories/9");
            then.status(200).body("<nil-classes type=\"array\"/>\r\n");
        })
        .await;

    let request = ApiRequest::get()
        .segments(["projects", "1", "stories", "9"])
        .build()
        .unwrap();
    assert!(client(&server).send(request).await.unwrap().is_none());
}

#[tokio::test]
async fn test_embedded_errors_are_remote_failures() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/services/v3/projects/1/stories");
            then.status(200).body(
                "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
                 <errors><error>Name can't be blank</error><error>Story type is invalid</error></errors>",
            );
        })
        .await;

    let request = ApiRequest::post()
        .segments(["projects", "1", "stories"])
        .body(Fields::new().with("story", Fields::new()))
        .build()
        .unwrap();
    let err = client(&server).send(request).await.unwrap_err();

    assert!(err.is_remote());
    assert_eq!(
        err.remote_errors(),
        vec!["Name can't be blank".to_string(), "Story type is invalid".to_string()]
    );
}

#[tokio::test]
async fn test_transport_failure() {
    let client = PivotalClient::from_config(TrackerConfig {
        base_url: "http://127.0.0.1:1".to_string(),
        token: Some(TOKEN.to_string()),
        timeout: Some(5),
    })
    .unwrap();

    let request = ApiRequest::get().segment("projects").build().unwrap();
    let err = client.send(request).await.unwrap_err();

    assert!(matches!(err, ApiError::Transport(_)));
    assert_eq!(err.error_type(), "transport_error");
}

#[tokio::test]
async fn test_body_and_file_never_reach_the_server() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.any_request();
            then.status(200).body("<ok/>");
        })
        .await;

    let result = ApiRequest::post()
        .segments(["projects", "1", "stories", "2", "attachments"])
        .body("x")
        .file(FileUpload::from_data("a.txt", "abc"))
        .build();

    assert_eq!(result.unwrap_err(), RequestError::BodyAndFile);
    assert_eq!(mock.hits_async().await, 0);
}

#[tokio::test]
async fn test_multipart_from_memory() {
    let server = MockServer::start_async().await;
    let length = (196 + 5 + 5).to_string();
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/services/v3/projects/1/stories/2/attachments")
                .header("content-length", length.as_str())
                .header_exists("content-type")
                .body_includes("name=\"Filedata\"; filename=\"a.txt\"")
                .body_includes("hello");
            then.status(200)
                .body("<attachment><id>9</id><status>Pending</status></attachment>");
        })
        .await;

    let request = ApiRequest::post()
        .segments(["projects", "1", "stories", "2", "attachments"])
        .file(FileUpload::from_data("a.txt", "hello"))
        .build()
        .unwrap();
    let value = client(&server).send(request).await.unwrap().unwrap();

    mock.assert_async().await;
    assert_eq!(value.get("status").and_then(Value::as_str), Some("Pending"));
}

#[tokio::test]
async fn test_multipart_streams_from_disk() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"streamed attachment bytes").unwrap();

    let server = MockServer::start_async().await;
    let length = (196 + 8 + 25).to_string();
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/services/v3/projects/1/stories/2/attachments")
                .header("content-length", length.as_str())
                .body_includes("streamed attachment bytes");
            then.status(200).body("<attachment><id>10</id></attachment>");
        })
        .await;

    let request = ApiRequest::post()
        .segments(["projects", "1", "stories", "2", "attachments"])
        .file(FileUpload::from_path("notes.md", file.path()))
        .build()
        .unwrap();
    client(&server).send(request).await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn test_missing_upload_file_is_io_error() {
    let server = MockServer::start_async().await;
    let request = ApiRequest::post()
        .segments(["projects", "1", "stories", "2", "attachments"])
        .file(FileUpload::from_path("gone.txt", "/no/such/file.txt"))
        .build()
        .unwrap();

    let err = client(&server).send(request).await.unwrap_err();
    assert!(matches!(err, ApiError::Io(_)));
}

#[tokio::test]
async fn test_concurrent_calls_with_distinct_tokens() {
    let server = MockServer::start_async().await;
    let alice = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/services/v3/projects/1")
                .header("x-trackertoken", "alice");
            then.status(200).body("<project><name>Alice</name></project>");
        })
        .await;
    let bob = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/services/v3/projects/1")
                .header("x-trackertoken", "bob");
            then.status(404);
        })
        .await;

    let base = client(&server);
    let alice_client = base.with_token("alice");
    let bob_client = base.with_token("bob");
    let request = || ApiRequest::get().segments(["projects", "1"]).build().unwrap();

    let (a, b) = tokio::join!(alice_client.send(request()), bob_client.send(request()));

    let a = a.unwrap().unwrap();
    assert_eq!(a.get("name").and_then(Value::as_str), Some("Alice"));
    assert_eq!(b.unwrap_err().code(), Some(404));
    alice.assert_async().await;
    bob.assert_async().await;
    assert_eq!(base.token(), Some(TOKEN));
}

#[tokio::test]
async fn test_sequential_failures_do_not_leak() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/services/v3/projects/1");
            then.status(500);
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/services/v3/projects/2");
            then.status(200).body("<project><id>2</id></project>");
        })
        .await;

    let client = client(&server);
    let first = client
        .send(ApiRequest::get().segments(["projects", "1"]).build().unwrap())
        .await;
    let second = client
        .send(ApiRequest::get().segments(["projects", "2"]).build().unwrap())
        .await;

    assert_eq!(first.unwrap_err().code(), Some(500));
    assert!(second.unwrap().is_some());
}
