//! Error handling tests

use pivotal::utils::error::{HTTP_ERROR_DESCRIPTION, PARSE_ERROR_DESCRIPTION};
use pivotal::xml::{decode, XmlError};
use pivotal::{ApiError, ApiResult, Fields, NormalizedError, RequestError, Value};
use std::error::Error;

#[test]
fn test_http_status_normalization() {
    let error = ApiError::HttpStatus { status: 401 };
    let normalized = error.normalize();

    assert_eq!(normalized.code, Some(401));
    assert_eq!(normalized.error_type, "http_status_error");
    assert_eq!(normalized.description, HTTP_ERROR_DESCRIPTION);
    assert!(normalized.cause.is_none());
    assert!(error.source().is_none());
}

#[test]
fn test_parse_error_chain() {
    let xml_error = decode("<a><b></a>").unwrap_err();
    let error = ApiError::from(xml_error);

    assert_eq!(error.description(), PARSE_ERROR_DESCRIPTION);
    let source = error.source().unwrap();
    assert!(source.downcast_ref::<XmlError>().is_some());
    assert!(error.to_string().starts_with("Error while parsing service response"));
}

#[test]
fn test_io_error_conversion() {
    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.txt");
    let error: ApiError = io.into();

    assert_eq!(error.error_type(), "file_error");
    assert!(!error.is_remote());
    assert_eq!(error.normalize().cause.as_deref(), Some("missing.txt"));
}

#[test]
fn test_remote_error_with_single_message() {
    let body = decode("<errors><error>Story not found</error></errors>").unwrap();
    let error = ApiError::Remote(Value::Map(Fields::new().with("errors", body)));

    assert_eq!(error.remote_errors(), vec!["Story not found".to_string()]);
    assert_eq!(error.to_string(), "Remote service error: Story not found");
}

#[test]
fn test_normalized_error_serialization() {
    let normalized = ApiError::HttpStatus { status: 500 }.normalize();
    let json = serde_json::to_value(&normalized).unwrap();

    assert_eq!(json["code"], 500);
    assert_eq!(json["type"], "http_status_error");
    assert!(json.get("cause").is_none());

    let parsed: NormalizedError = serde_json::from_value(json).unwrap();
    assert_eq!(parsed, normalized);
}

#[test]
fn test_request_error_display() {
    assert_eq!(
        RequestError::BodyAndFile.to_string(),
        "The Tracker API does not support file upload and XML posting at the same time"
    );
}

#[test]
fn test_api_result_with_question_mark() {
    fn parse(xml: &str) -> ApiResult<Value> {
        Ok(decode(xml)?)
    }

    assert!(parse("<ok>1</ok>").is_ok());
    assert!(matches!(parse("<broken>"), Err(ApiError::Parse(_))));
}
