//! Error handling module
//!
//! Defines the normalized error reported by every Tracker API call, plus the
//! programming error raised when a request descriptor is built incorrectly

use crate::xml::{Value, XmlError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Description reported for a non-200 response
pub const HTTP_ERROR_DESCRIPTION: &str = "API returned an HTTP error";

/// Description reported for a body that could not be decoded
pub const PARSE_ERROR_DESCRIPTION: &str = "Error while parsing service response";

/// Failure of a single Tracker API call
///
/// Every variant is terminal for that call; nothing in this crate retries.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Connection, DNS, TLS or body read failure
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered with a status other than 200
    #[error("API returned an HTTP error: {status}")]
    HttpStatus {
        /// HTTP status code
        status: u16,
    },

    /// The response body was not well-formed XML
    #[error("Error while parsing service response: {0}")]
    Parse(#[source] XmlError),

    /// A well-formed body that carries an `errors` element
    #[error("Remote service error: {}", remote_messages(.0).join("; "))]
    Remote(Value),

    /// A file upload could not be read from disk
    #[error("File error: {0}")]
    Io(#[from] std::io::Error),
}

/// Serializable view of an [`ApiError`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedError {
    /// HTTP status (only for status failures)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<u16>,
    /// Error category
    #[serde(rename = "type")]
    pub error_type: String,
    /// Human readable description
    pub description: String,
    /// Wrapped cause (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cause: Option<String>,
}

impl ApiError {
    /// HTTP status code, when the failure came from one
    pub fn code(&self) -> Option<u16> {
        match self {
            ApiError::HttpStatus { status } => Some(*status),
            ApiError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Get error type string
    pub fn error_type(&self) -> &'static str {
        match self {
            ApiError::Transport(_) => "transport_error",
            ApiError::HttpStatus { .. } => "http_status_error",
            ApiError::Parse(_) => "parse_error",
            ApiError::Remote(_) => "remote_service_error",
            ApiError::Io(_) => "file_error",
        }
    }

    /// Fixed description for the failure category
    pub fn description(&self) -> String {
        match self {
            ApiError::HttpStatus { .. } => HTTP_ERROR_DESCRIPTION.to_string(),
            ApiError::Parse(_) => PARSE_ERROR_DESCRIPTION.to_string(),
            ApiError::Remote(errors) => remote_messages(errors).join("; "),
            ApiError::Transport(_) => "Transport error".to_string(),
            ApiError::Io(_) => "File error".to_string(),
        }
    }

    /// Messages carried by a remote `errors` body
    pub fn remote_errors(&self) -> Vec<String> {
        match self {
            ApiError::Remote(errors) => remote_messages(errors),
            _ => Vec::new(),
        }
    }

    /// Whether the service itself rejected the request
    pub fn is_remote(&self) -> bool {
        matches!(self, ApiError::Remote(_) | ApiError::HttpStatus { .. })
    }

    /// Convert to the serializable normalized shape
    pub fn normalize(&self) -> NormalizedError {
        let cause = match self {
            ApiError::Transport(e) => Some(e.to_string()),
            ApiError::Parse(e) => Some(e.to_string()),
            ApiError::Io(e) => Some(e.to_string()),
            ApiError::HttpStatus { .. } | ApiError::Remote(_) => None,
        };
        NormalizedError {
            code: self.code(),
            error_type: self.error_type().to_string(),
            description: self.description(),
            cause,
        }
    }
}

impl From<XmlError> for ApiError {
    fn from(error: XmlError) -> Self {
        ApiError::Parse(error)
    }
}

/// Collect `<error>` texts from an `errors` structure
fn remote_messages(errors: &Value) -> Vec<String> {
    let inner = errors.get("errors").unwrap_or(errors);
    let Some(list) = inner.get("error") else {
        return inner.as_str().map(|s| vec![s.to_string()]).unwrap_or_default();
    };
    list.clone()
        .into_list()
        .iter()
        .filter_map(|e| e.as_str().map(str::to_string))
        .collect()
}

/// Result type alias
pub type ApiResult<T> = Result<T, ApiError>;

/// A request descriptor that violates its construction rules
///
/// This is a caller bug, raised before any network I/O and never reported
/// through [`ApiResult`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RequestError {
    /// Both an XML/raw body and a file upload were supplied
    #[error("The Tracker API does not support file upload and XML posting at the same time")]
    BodyAndFile,
}
