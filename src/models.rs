//! Frontend Models
//!
//! Board view-model as rendered by the server page.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// Server ids arrive as strings or integers depending on the endpoint
#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(i64),
}

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// DOM element id of the rendered node
            pub fn element_id(&self) -> String {
                format!("{}{}", $prefix, self.0)
            }

            /// Recover the id from a rendered element id
            pub fn from_element_id(element_id: &str) -> Option<Self> {
                element_id
                    .strip_prefix($prefix)
                    .filter(|rest| !rest.is_empty())
                    .map(Self::new)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self::new(id)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                Ok(match RawId::deserialize(deserializer)? {
                    RawId::Text(s) => Self(s),
                    RawId::Number(n) => Self(n.to_string()),
                })
            }
        }
    };
}

string_id!(
    /// Task id; rendered as `task-<id>`
    TaskId,
    "task-"
);
string_id!(
    /// Column id; rendered as `column-<id>`
    ColumnId,
    "column-"
);
string_id!(BoardId, "board-");

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
    Urgent,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
            Priority::Urgent => "urgent",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
            Priority::Urgent => "Urgent",
        }
    }
}

/// Task card (matches the server's board payload)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub priority: Option<Priority>,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub assignee: Option<String>,
    #[serde(default)]
    pub labels: Vec<String>,
    /// Server-assigned CSS class, refreshed by move responses
    #[serde(default, alias = "colorClass")]
    pub color_class: Option<String>,
}

/// Board column; task order is display order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub id: ColumnId,
    pub name: String,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Board {
    pub id: BoardId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub columns: Vec<Column>,
}

/// `{columnId, position}` pair of a bulk column reorder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnPosition {
    pub column_id: ColumnId,
    pub position: i32,
}

/// Where a task sits on the board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskLocation {
    pub column_id: ColumnId,
    pub position: usize,
}

/// Move of one task to `position` in `column_id`.
///
/// `position` indexes the target column with the moved task removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskMove {
    pub task_id: TaskId,
    pub column_id: ColumnId,
    pub position: usize,
}

impl TaskMove {
    pub fn new(task_id: TaskId, column_id: ColumnId, position: usize) -> Self {
        Self { task_id, column_id, position }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_id_roundtrip() {
        let id = TaskId::new("42");
        assert_eq!(id.element_id(), "task-42");
        assert_eq!(TaskId::from_element_id("task-42"), Some(id));
        assert_eq!(TaskId::from_element_id("column-42"), None);
        assert_eq!(TaskId::from_element_id("task-"), None);
    }

    #[test]
    fn test_board_payload_accepts_numeric_ids() {
        let json = r#"{
            "id": 7,
            "name": "Launch",
            "columns": [
                {"id": 1, "name": "To Do", "tasks": [
                    {"id": 10, "title": "Write copy", "priority": "high", "due_date": "2026-11-02",
                     "labels": ["marketing"], "colorClass": "border-danger"}
                ]},
                {"id": "2", "name": "Done"}
            ]
        }"#;
        let board: Board = serde_json::from_str(json).unwrap();

        assert_eq!(board.id, BoardId::new("7"));
        assert_eq!(board.columns[0].id, ColumnId::new("1"));
        assert_eq!(board.columns[1].id, ColumnId::new("2"));
        assert!(board.columns[1].tasks.is_empty());

        let task = &board.columns[0].tasks[0];
        assert_eq!(task.id, TaskId::new("10"));
        assert_eq!(task.priority, Some(Priority::High));
        assert_eq!(task.due_date, NaiveDate::from_ymd_opt(2026, 11, 2));
        assert_eq!(task.color_class.as_deref(), Some("border-danger"));
        assert_eq!(task.description, "");
    }
}
