//! Board Commands
//!
//! Request/response shapes for task moves and column reorders.

use serde::{Deserialize, Serialize};

use super::default_true;
use crate::models::{BoardId, ColumnId, ColumnPosition, TaskId, TaskMove};

pub const MOVE_TASK_PATH: &str = "/tasks/move/";
pub const REORDER_COLUMNS_PATH: &str = "/columns/reorder-multiple/";

// ========================
// Argument Structs
// ========================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveTaskRequest {
    pub task_id: TaskId,
    pub column_id: ColumnId,
    pub position: usize,
}

impl From<&TaskMove> for MoveTaskRequest {
    fn from(mv: &TaskMove) -> Self {
        Self {
            task_id: mv.task_id.clone(),
            column_id: mv.column_id.clone(),
            position: mv.position,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderColumnsRequest {
    pub columns: Vec<ColumnPosition>,
    pub board_id: BoardId,
}

// ========================
// Responses
// ========================

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveTaskResponse {
    #[serde(default = "default_true")]
    pub success: bool,
    #[serde(default)]
    pub color_class: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl Default for MoveTaskResponse {
    fn default() -> Self {
        Self { success: true, color_class: None, error: None }
    }
}

/// Bare `{success, error?}` acknowledgement
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Ack {
    #[serde(default = "default_true")]
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_move_request_wire_shape() {
        let mv = TaskMove::new(TaskId::new("12"), ColumnId::new("3"), 1);
        let body = serde_json::to_value(MoveTaskRequest::from(&mv)).unwrap();
        assert_eq!(body, json!({"taskId": "12", "columnId": "3", "position": 1}));
    }

    #[test]
    fn test_reorder_request_wire_shape() {
        let request = ReorderColumnsRequest {
            columns: vec![
                ColumnPosition { column_id: ColumnId::new("b"), position: 0 },
                ColumnPosition { column_id: ColumnId::new("a"), position: 1 },
            ],
            board_id: BoardId::new("9"),
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "columns": [{"columnId": "b", "position": 0}, {"columnId": "a", "position": 1}],
                "boardId": "9"
            })
        );
    }

    #[test]
    fn test_move_response_color_class_optional() {
        let with: MoveTaskResponse = serde_json::from_str(r#"{"success": true, "colorClass": "bg-warning"}"#).unwrap();
        assert_eq!(with.color_class.as_deref(), Some("bg-warning"));

        let rejected: MoveTaskResponse = serde_json::from_str(r#"{"success": false, "error": "locked"}"#).unwrap();
        assert!(!rejected.success);
        assert_eq!(rejected.error.as_deref(), Some("locked"));

        let bare: Ack = serde_json::from_str("{}").unwrap();
        assert!(bare.success);
    }
}
