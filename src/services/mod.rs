//! Service layer module
//!
//! Contains request descriptors, the multipart body builder and the HTTP
//! client that dispatches requests

pub mod client;
pub mod multipart;
pub mod request;

pub use client::{interpret_body, PivotalClient};
pub use multipart::MultipartBody;
pub use request::{ApiRequest, Body, FileSource, FileUpload, Method, Payload, RequestBuilder};
