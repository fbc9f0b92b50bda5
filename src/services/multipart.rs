//! Multipart body builder
//!
//! Frames a single file as one `Filedata` part of a `multipart/form-data`
//! body. The Tracker upload endpoint accepts exactly one file per request.
//!
//! The transport needs `Content-Length` before the first body byte, so the
//! length is computed up front from the framing size, the filename and the
//! payload size (the on-disk size for path uploads, which are then streamed).

use crate::services::request::{FileSource, FileUpload};
use bytes::{Bytes, BytesMut};
use std::io;
use tokio_stream::StreamExt;
use tokio_util::io::ReaderStream;
use uuid::Uuid;

/// Dashes preceding the boundary key in the `Content-Type` header
pub const BOUNDARY_DASHES: &str = "----------------------------";

/// Framing bytes around the payload, excluding the filename
pub const FRAMING_OVERHEAD: u64 = 196;

/// Length of the random boundary key
pub const BOUNDARY_KEY_LEN: usize = 12;

/// Declared `Content-Length` for a file of `payload_len` bytes named `name`
pub fn content_length(name: &str, payload_len: u64) -> u64 {
    FRAMING_OVERHEAD + name.len() as u64 + payload_len
}

/// Random boundary key
pub fn generate_boundary_key() -> String {
    Uuid::new_v4()
        .simple()
        .to_string()
        .chars()
        .take(BOUNDARY_KEY_LEN)
        .collect()
}

/// A framed single-file upload
#[derive(Debug)]
pub struct MultipartBody {
    boundary_key: String,
    name: String,
    source: FileSource,
    payload_len: u64,
}

impl MultipartBody {
    /// Frame a file with a fresh boundary
    pub async fn prepare(file: FileUpload) -> io::Result<Self> {
        Self::with_boundary(file, generate_boundary_key()).await
    }

    /// Frame a file with a caller-chosen boundary key
    ///
    /// The key must be [`BOUNDARY_KEY_LEN`] characters for the declared
    /// length to match the framing.
    pub async fn with_boundary(file: FileUpload, boundary_key: String) -> io::Result<Self> {
        let payload_len = match &file.source {
            FileSource::Data(data) => data.len() as u64,
            FileSource::Path(path) => tokio::fs::metadata(path).await?.len(),
        };

        Ok(Self {
            boundary_key,
            name: file.name,
            source: file.source,
            payload_len,
        })
    }

    /// Value of the `Content-Type` header
    pub fn content_type(&self) -> String {
        format!(
            "multipart/form-data; boundary={}{}",
            BOUNDARY_DASHES, self.boundary_key
        )
    }

    /// Value of the `Content-Length` header
    pub fn content_length(&self) -> u64 {
        content_length(&self.name, self.payload_len)
    }

    pub fn boundary_key(&self) -> &str {
        &self.boundary_key
    }

    fn head(&self) -> Bytes {
        Bytes::from(format!(
            "--{}{}\r\n\
             Content-Disposition: form-data; name=\"Filedata\"; filename=\"{}\"\r\n\
             Content-Type: application/octet-stream\r\n\r\n",
            BOUNDARY_DASHES, self.boundary_key, self.name
        ))
    }

    fn tail(&self) -> Bytes {
        Bytes::from(format!("\r\n--{}{}--\r\n", BOUNDARY_DASHES, self.boundary_key))
    }

    /// Turn into a request body
    ///
    /// In-memory data is sent as one buffer; path uploads stream the file.
    pub async fn into_body(self) -> io::Result<reqwest::Body> {
        let head = self.head();
        let tail = self.tail();

        match self.source {
            FileSource::Data(data) => Ok(reqwest::Body::from(concat(&head, &data, &tail))),
            FileSource::Path(path) => {
                let file = tokio::fs::File::open(&path).await?;
                let stream = tokio_stream::iter([Ok::<Bytes, io::Error>(head)])
                    .chain(ReaderStream::new(file))
                    .chain(tokio_stream::iter([Ok(tail)]));
                Ok(reqwest::Body::wrap_stream(stream))
            }
        }
    }

    /// Collect the whole framed body in memory
    pub async fn into_bytes(self) -> io::Result<Bytes> {
        let head = self.head();
        let tail = self.tail();

        let data = match self.source {
            FileSource::Data(data) => data,
            FileSource::Path(path) => Bytes::from(tokio::fs::read(&path).await?),
        };
        Ok(concat(&head, &data, &tail))
    }
}

fn concat(head: &[u8], data: &[u8], tail: &[u8]) -> Bytes {
    let mut buf = BytesMut::with_capacity(head.len() + data.len() + tail.len());
    buf.extend_from_slice(head);
    buf.extend_from_slice(data);
    buf.extend_from_slice(tail);
    buf.freeze()
}
