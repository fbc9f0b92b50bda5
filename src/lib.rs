//! Pivotal Tracker client library
//!
//! Async bindings to the Pivotal Tracker v3 HTTP/XML API

pub mod api;
pub mod config;
pub mod models;
pub mod services;
pub mod utils;
pub mod xml;

// Re-export common types
pub use config::{Settings, TrackerConfig};
pub use models::{
    ActivityFilters, IterationFilters, IterationGroup, MembershipRole, MovePosition,
    NewMembership, NewProject, Person, StoryData, StoryFilters, StoryMove, StoryType, TaskData,
};
pub use services::{ApiRequest, FileUpload, Method, PivotalClient, RequestBuilder};
pub use utils::error::{ApiError, ApiResult, NormalizedError, RequestError};
pub use xml::{Fields, Value};

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Library description
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Get version information
pub fn version_info() -> String {
    format!("{} v{} - {}", NAME, VERSION, DESCRIPTION)
}
