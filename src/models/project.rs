//! Project and membership models

use crate::xml::Fields;
use serde::{Deserialize, Serialize};
use std::fmt;

/// New project
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewProject {
    /// Project name
    pub name: String,
    /// Iteration length in weeks
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iteration_length: Option<u32>,
    /// Whether the project is created without an owner (defaults to true)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub no_owner: Option<bool>,
}

impl NewProject {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn iteration_length(mut self, weeks: u32) -> Self {
        self.iteration_length = Some(weeks);
        self
    }

    pub fn no_owner(mut self, no_owner: bool) -> Self {
        self.no_owner = Some(no_owner);
        self
    }

    /// Content of the `<project>` element
    pub fn to_fields(&self) -> Fields {
        Fields::new()
            .with("name", self.name.as_str())
            .with_opt("iteration_length", self.iteration_length)
            .with("no_owner", self.no_owner.unwrap_or(true))
    }
}

/// Role granted to a project member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MembershipRole {
    Member,
    Owner,
}

impl MembershipRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            MembershipRole::Member => "Member",
            MembershipRole::Owner => "Owner",
        }
    }
}

impl fmt::Display for MembershipRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Person invited into a project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    /// Full name
    pub name: String,
    /// Initials
    pub initials: String,
    /// E-mail address
    pub email: String,
}

impl Person {
    pub fn new(
        name: impl Into<String>,
        initials: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            initials: initials.into(),
            email: email.into(),
        }
    }

    fn to_fields(&self) -> Fields {
        Fields::new()
            .with("name", self.name.as_str())
            .with("initials", self.initials.as_str())
            .with("email", self.email.as_str())
    }
}

/// New project membership
///
/// The person does not need an existing account; the service sends an
/// invitation e-mail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewMembership {
    pub role: MembershipRole,
    pub person: Person,
}

impl NewMembership {
    pub fn new(role: MembershipRole, person: Person) -> Self {
        Self { role, person }
    }

    /// Content of the `<membership>` element
    pub fn to_fields(&self) -> Fields {
        Fields::new()
            .with("role", self.role.as_str())
            .with("person", self.person.to_fields())
    }
}
