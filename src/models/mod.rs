//! Data models module
//!
//! Typed inputs for the resource methods. Each one lowers into the XML
//! [`Fields`](crate::xml::Fields) sent as a request body, or into the query
//! pairs appended to the request path.

pub mod filters;
pub mod project;
pub mod story;

pub use filters::{ActivityFilters, IterationFilters, IterationGroup, StoryFilters};
pub use project::{MembershipRole, NewMembership, NewProject, Person};
pub use story::{MovePosition, StoryData, StoryMove, StoryType, TaskData};
