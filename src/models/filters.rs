//! Query filters for collection endpoints

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Format the service expects for `occurred_since_date`
const ACTIVITY_DATE_FORMAT: &str = "%Y/%m/%d %H:%M:%S UTC";

/// Filters for the activity feed
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActivityFilters {
    /// Restrict to one project (routed into the path, not the query)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<u64>,
    /// Maximum number of entries
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    /// Earliest entry date
    #[serde(skip_serializing_if = "Option::is_none")]
    pub occurred_since_date: Option<DateTime<Utc>>,
    /// Only entries with a greater version
    #[serde(skip_serializing_if = "Option::is_none")]
    pub newer_than_version: Option<u64>,
}

impl ActivityFilters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn project(mut self, project_id: u64) -> Self {
        self.project = Some(project_id);
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn occurred_since(mut self, date: DateTime<Utc>) -> Self {
        self.occurred_since_date = Some(date);
        self
    }

    pub fn newer_than_version(mut self, version: u64) -> Self {
        self.newer_than_version = Some(version);
        self
    }

    /// Query pairs, excluding `project`
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut query = Vec::new();
        if let Some(limit) = self.limit {
            query.push(("limit".to_string(), limit.to_string()));
        }
        if let Some(date) = self.occurred_since_date {
            query.push((
                "occurred_since_date".to_string(),
                date.format(ACTIVITY_DATE_FORMAT).to_string(),
            ));
        }
        if let Some(version) = self.newer_than_version {
            query.push(("newer_than_version".to_string(), version.to_string()));
        }
        query
    }
}

/// Iteration subset, appended to the iterations path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IterationGroup {
    Done,
    Current,
    Backlog,
    CurrentBacklog,
}

impl IterationGroup {
    pub fn as_str(&self) -> &'static str {
        match self {
            IterationGroup::Done => "done",
            IterationGroup::Current => "current",
            IterationGroup::Backlog => "backlog",
            IterationGroup::CurrentBacklog => "current_backlog",
        }
    }
}

impl fmt::Display for IterationGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Filters for the iteration list
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IterationFilters {
    /// Iteration subset (routed into the path, not the query)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<IterationGroup>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
}

impl IterationFilters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn group(mut self, group: IterationGroup) -> Self {
        self.group = Some(group);
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Query pairs, excluding `group`
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut query = Vec::new();
        if let Some(limit) = self.limit {
            query.push(("limit".to_string(), limit.to_string()));
        }
        if let Some(offset) = self.offset {
            query.push(("offset".to_string(), offset.to_string()));
        }
        query
    }
}

/// Filters for the story list
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoryFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    /// Start from the Nth story
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
    /// Search string, e.g. `label:"needs feedback" type:bug`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
}

impl StoryFilters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut query = Vec::new();
        if let Some(limit) = self.limit {
            query.push(("limit".to_string(), limit.to_string()));
        }
        if let Some(offset) = self.offset {
            query.push(("offset".to_string(), offset.to_string()));
        }
        if let Some(filter) = &self.filter {
            query.push(("filter".to_string(), filter.clone()));
        }
        query
    }
}
