//! HTTP client service
//!
//! Encapsulates HTTP communication with the Tracker API: one request in, one
//! terminal outcome out

use crate::config::TrackerConfig;
use crate::services::multipart::MultipartBody;
use crate::services::request::{ApiRequest, Payload};
use crate::utils::error::{ApiError, ApiResult};
use crate::utils::logging::body_summary;
use crate::xml::{self, Fields, Value};
use anyhow::{Context, Result};
use reqwest::header::{ACCEPT, CONTENT_LENGTH, CONTENT_TYPE};
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::{debug, error, warn};

/// Header carrying the API token
pub const TOKEN_HEADER: &str = "X-TrackerToken";

/// Media types accepted from the service
pub const ACCEPT_TYPES: &str = "text/html,application/xhtml+xml,application/xml";

/// Content type of XML request bodies
pub const XML_CONTENT_TYPE: &str = "application/xml";

/// Document the service returns instead of an empty collection
pub const NIL_DOCUMENT: &str =
    "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<nil-classes type=\"array\"/>";

/// Root element of the empty collection document, however it is serialized
const NIL_ROOT: &str = "nil-classes";

const USER_AGENT: &str = concat!("pivotal-rs/", env!("CARGO_PKG_VERSION"));

/// Tracker API client
///
/// Owns the credential; nothing is shared between client values except the
/// underlying connection handle, so clones with different tokens can be used
/// concurrently.
#[derive(Debug, Clone)]
pub struct PivotalClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl PivotalClient {
    /// Create a client for the public Tracker host
    pub fn new() -> Result<Self> {
        Self::from_config(TrackerConfig::default())
    }

    /// Create a client from configuration
    pub fn from_config(config: TrackerConfig) -> Result<Self> {
        config.validate()?;

        let mut builder = Client::builder().user_agent(USER_AGENT);
        if let Some(secs) = config.timeout {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build().context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token,
        })
    }

    /// Replace the token used for subsequent calls
    pub fn use_token(&mut self, token: impl Into<String>) {
        self.token = Some(token.into());
    }

    /// Independent client sharing this one's transport, with another token
    pub fn with_token(&self, token: impl Into<String>) -> Self {
        Self {
            client: self.client.clone(),
            base_url: self.base_url.clone(),
            token: Some(token.into()),
        }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Send one request and interpret the response
    ///
    /// Resolves to `Ok(None)` when the service answers with its empty
    /// collection document. No retries are attempted.
    pub async fn send(&self, request: ApiRequest) -> ApiResult<Option<Value>> {
        let url = format!("{}{}", self.base_url, request.path());
        let method = request.method();
        debug!(
            "Requesting Tracker API: {} {} ({} payload)",
            method,
            request.path(),
            request.payload().kind()
        );

        let mut builder = self
            .client
            .request(method.into(), &url)
            .header(ACCEPT, ACCEPT_TYPES);
        if let Some(token) = &self.token {
            builder = builder.header(TOKEN_HEADER, token);
        }

        builder = match request.into_payload() {
            Payload::Empty => builder.header(CONTENT_LENGTH, 0),
            Payload::Raw(raw) => builder.header(CONTENT_LENGTH, raw.len()).body(raw),
            Payload::Xml(fields) => {
                let body = xml::encode(&fields);
                debug!("Request body: {}", body_summary(&body));
                builder
                    .header(CONTENT_TYPE, XML_CONTENT_TYPE)
                    .header(CONTENT_LENGTH, body.len())
                    .body(body)
            }
            Payload::File(file) => {
                let multipart = MultipartBody::prepare(file).await?;
                builder
                    .header(CONTENT_TYPE, multipart.content_type())
                    .header(CONTENT_LENGTH, multipart.content_length())
                    .body(multipart.into_body().await?)
            }
        };

        let response = builder.send().await.map_err(|e| {
            error!("Tracker request failed: {} {} - {}", method, url, e);
            ApiError::Transport(e)
        })?;

        let status = response.status();
        if status != StatusCode::OK {
            warn!("Tracker API returned HTTP {} for {} {}", status, method, url);
            return Err(ApiError::HttpStatus {
                status: status.as_u16(),
            });
        }

        let content = response.text().await?;
        debug!("Result: {}", body_summary(&content));
        interpret_body(&content)
    }
}

/// Interpret the body of a 200 response
///
/// Handles the empty-collection sentinel, undecodable bodies and faults the
/// service embeds in successful responses. The sentinel is also recognised
/// after decoding, as an empty `<nil-classes>` root, so a variant without the
/// declaration or with other line endings still yields `None`.
pub fn interpret_body(content: &str) -> ApiResult<Option<Value>> {
    if content.trim() == NIL_DOCUMENT {
        return Ok(None);
    }

    let document = xml::decode_document(content).map_err(|e| {
        error!("Unparseable Tracker response: {} - {}", e, body_summary(content));
        ApiError::Parse(e)
    })?;

    let blank = document.value.as_str().is_some_and(|t| t.trim().is_empty());
    if document.root == NIL_ROOT && blank {
        return Ok(None);
    }
    if document.root == "errors" {
        return Err(ApiError::Remote(Value::Map(
            Fields::new().with("errors", document.value),
        )));
    }
    if document.value.get("errors").is_some() {
        return Err(ApiError::Remote(document.value));
    }

    Ok(Some(document.value))
}
