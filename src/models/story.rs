//! Story and task models

use crate::xml::Fields;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of story
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoryType {
    Feature,
    Bug,
    Chore,
    Release,
}

impl StoryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoryType::Feature => "feature",
            StoryType::Bug => "bug",
            StoryType::Chore => "chore",
            StoryType::Release => "release",
        }
    }
}

impl fmt::Display for StoryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Story fields for creation and update
///
/// Unset fields are left out of the request body, so an update only touches
/// what is set here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoryData {
    /// Destination project, moves the story when updating
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub story_type: Option<StoryType>,
    /// Difficulty points
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimate: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Comma-separated labels
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<String>,
    /// Name of the requesting member
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requested_by: Option<String>,
}

impl StoryData {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    pub fn project_id(mut self, project_id: u64) -> Self {
        self.project_id = Some(project_id);
        self
    }

    pub fn story_type(mut self, story_type: StoryType) -> Self {
        self.story_type = Some(story_type);
        self
    }

    pub fn estimate(mut self, estimate: i64) -> Self {
        self.estimate = Some(estimate);
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn labels(mut self, labels: impl Into<String>) -> Self {
        self.labels = Some(labels.into());
        self
    }

    pub fn requested_by(mut self, requested_by: impl Into<String>) -> Self {
        self.requested_by = Some(requested_by.into());
        self
    }

    /// Content of the `<story>` element
    pub fn to_fields(&self) -> Fields {
        Fields::new()
            .with_opt("project_id", self.project_id)
            .with_opt("name", self.name.as_deref())
            .with_opt("story_type", self.story_type.map(|t| t.as_str()))
            .with_opt("estimate", self.estimate)
            .with_opt("description", self.description.as_deref())
            .with_opt("labels", self.labels.as_deref())
            .with_opt("requested_by", self.requested_by.as_deref())
    }
}

/// Side of the target story a moved story lands on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MovePosition {
    Before,
    After,
}

impl MovePosition {
    pub fn as_str(&self) -> &'static str {
        match self {
            MovePosition::Before => "before",
            MovePosition::After => "after",
        }
    }
}

/// Priority move relative to another story
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryMove {
    /// Id of the story to move next to
    pub target: u64,
    #[serde(rename = "move")]
    pub position: MovePosition,
}

impl StoryMove {
    pub fn before(target: u64) -> Self {
        Self {
            target,
            position: MovePosition::Before,
        }
    }

    pub fn after(target: u64) -> Self {
        Self {
            target,
            position: MovePosition::After,
        }
    }

    /// Query pairs in the `move[...]` form the service expects
    pub fn to_query(&self) -> Vec<(String, String)> {
        vec![
            ("move[target]".to_string(), self.target.to_string()),
            ("move[move]".to_string(), self.position.as_str().to_string()),
        ]
    }
}

/// Task fields for creation and update
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub complete: Option<bool>,
}

impl TaskData {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: Some(description.into()),
            complete: None,
        }
    }

    pub fn complete(mut self, complete: bool) -> Self {
        self.complete = Some(complete);
        self
    }

    /// Content of the `<task>` element
    pub fn to_fields(&self) -> Fields {
        Fields::new()
            .with_opt("description", self.description.as_deref())
            .with_opt("complete", self.complete)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::{encode, Value};

    #[test]
    fn test_story_skips_unset_fields() {
        let fields = StoryData::new("Login page")
            .story_type(StoryType::Bug)
            .estimate(3)
            .to_fields();

        assert_eq!(fields.len(), 3);
        assert_eq!(fields.get("story_type").and_then(Value::as_str), Some("bug"));
        assert_eq!(fields.get("estimate"), Some(&Value::Integer(3)));
    }

    #[test]
    fn test_story_update_moves_project() {
        let fields = StoryData::default().project_id(99).to_fields();
        assert_eq!(
            encode(&Fields::new().with("story", fields)),
            "<story><project_id type=\"integer\">99</project_id></story>"
        );
    }

    #[test]
    fn test_move_query() {
        assert_eq!(
            StoryMove::after(12).to_query(),
            vec![
                ("move[target]".to_string(), "12".to_string()),
                ("move[move]".to_string(), "after".to_string()),
            ]
        );
    }

    #[test]
    fn test_task_fields() {
        let fields = TaskData::new("Write docs").complete(true).to_fields();
        assert_eq!(fields.get("complete"), Some(&Value::Bool(true)));
    }
}
