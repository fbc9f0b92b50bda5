//! Request descriptors
//!
//! A request is assembled with [`RequestBuilder`] and frozen into an
//! [`ApiRequest`]. Building is where the one construction rule is enforced: an
//! XML or raw body and a file upload are mutually exclusive, and asking for
//! both is rejected before anything touches the network.

use crate::utils::error::RequestError;
use crate::xml::Fields;
use bytes::Bytes;
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use std::fmt;
use std::path::PathBuf;

/// Versioned path prefix of every Tracker resource
pub const API_PREFIX: &str = "/services/v3/";

/// Characters escaped inside a single path segment
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// HTTP verbs used by the Tracker API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

/// Where the bytes of an upload come from
#[derive(Debug, Clone, PartialEq)]
pub enum FileSource {
    /// Streamed from disk when the request is sent
    Path(PathBuf),
    /// Already in memory
    Data(Bytes),
}

/// A single file attached to a request
#[derive(Debug, Clone, PartialEq)]
pub struct FileUpload {
    /// File name reported to the service
    pub name: String,
    /// File content
    pub source: FileSource,
}

impl FileUpload {
    /// Upload a file from disk under the given name
    pub fn from_path(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            source: FileSource::Path(path.into()),
        }
    }

    /// Upload in-memory bytes under the given name
    pub fn from_data(name: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            source: FileSource::Data(data.into()),
        }
    }
}

/// Request body other than a file
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    /// Serialized through the XML codec
    Xml(Fields),
    /// Sent verbatim, without a content type
    Raw(String),
}

impl From<Fields> for Body {
    fn from(fields: Fields) -> Self {
        Body::Xml(fields)
    }
}

impl From<String> for Body {
    fn from(raw: String) -> Self {
        Body::Raw(raw)
    }
}

impl From<&str> for Body {
    fn from(raw: &str) -> Self {
        Body::Raw(raw.to_string())
    }
}

/// What a validated request carries
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Empty,
    Xml(Fields),
    Raw(String),
    File(FileUpload),
}

impl Payload {
    /// Short label for logs
    pub fn kind(&self) -> &'static str {
        match self {
            Payload::Empty => "empty",
            Payload::Xml(_) => "xml",
            Payload::Raw(_) => "raw",
            Payload::File(_) => "multipart",
        }
    }
}

/// Builder for [`ApiRequest`]
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    method: Method,
    segments: Vec<String>,
    query: Vec<(String, String)>,
    body: Option<Body>,
    file: Option<FileUpload>,
}

impl RequestBuilder {
    pub fn new(method: Method) -> Self {
        Self {
            method,
            segments: Vec::new(),
            query: Vec::new(),
            body: None,
            file: None,
        }
    }

    /// Append one path segment
    pub fn segment(mut self, segment: impl fmt::Display) -> Self {
        self.segments.push(segment.to_string());
        self
    }

    /// Append several path segments
    pub fn segments<I, T>(mut self, segments: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: fmt::Display,
    {
        self.segments
            .extend(segments.into_iter().map(|s| s.to_string()));
        self
    }

    /// Add a query parameter
    pub fn query(mut self, key: impl Into<String>, value: impl fmt::Display) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    /// Add a query parameter when present
    pub fn query_opt<T: fmt::Display>(self, key: impl Into<String>, value: Option<T>) -> Self {
        match value {
            Some(value) => self.query(key, value),
            None => self,
        }
    }

    /// Add already-rendered query parameters
    pub fn query_pairs<I>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        self.query.extend(pairs);
        self
    }

    /// Set an XML or raw body
    pub fn body(mut self, body: impl Into<Body>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Attach a file upload
    pub fn file(mut self, file: FileUpload) -> Self {
        self.file = Some(file);
        self
    }

    /// Validate and freeze the request
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::BodyAndFile`] when both a body and a file were set.
    pub fn build(mut self) -> Result<ApiRequest, RequestError> {
        let payload = match (self.body.take(), self.file.take()) {
            (Some(_), Some(_)) => return Err(RequestError::BodyAndFile),
            (Some(Body::Xml(fields)), None) => Payload::Xml(fields),
            (Some(Body::Raw(raw)), None) => Payload::Raw(raw),
            (None, Some(file)) => Payload::File(file),
            (None, None) => Payload::Empty,
        };

        Ok(self.with_payload(payload))
    }

    /// Freeze the request with an explicit payload
    ///
    /// Any body or file set on the builder is discarded. A [`Payload`] holds
    /// at most one of them, so this cannot fail.
    pub fn with_payload(self, payload: Payload) -> ApiRequest {
        ApiRequest {
            method: self.method,
            path: build_path(&self.segments, &self.query),
            payload,
        }
    }
}

/// A validated request, ready for the dispatcher
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    method: Method,
    path: String,
    payload: Payload,
}

impl ApiRequest {
    pub fn get() -> RequestBuilder {
        RequestBuilder::new(Method::Get)
    }

    pub fn post() -> RequestBuilder {
        RequestBuilder::new(Method::Post)
    }

    pub fn put() -> RequestBuilder {
        RequestBuilder::new(Method::Put)
    }

    pub fn delete() -> RequestBuilder {
        RequestBuilder::new(Method::Delete)
    }

    pub fn method(&self) -> Method {
        self.method
    }

    /// Path and query, starting with [`API_PREFIX`]
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    pub fn into_payload(self) -> Payload {
        self.payload
    }
}

/// Join the prefix, encoded segments and canonical query string
fn build_path(segments: &[String], query: &[(String, String)]) -> String {
    let encoded: Vec<String> = segments
        .iter()
        .map(|s| utf8_percent_encode(s, PATH_SEGMENT).to_string())
        .collect();
    let mut path = format!("{}{}", API_PREFIX, encoded.join("/"));

    if !query.is_empty() {
        let query_string = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(query.iter())
            .finish();
        path.push('?');
        path.push_str(&query_string);
    }

    path
}
