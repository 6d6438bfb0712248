//! Search Commands
//!
//! Semantic task search over the board.

use serde::{Deserialize, Serialize};

use super::default_true;
use crate::models::{BoardId, TaskId};

pub const SEMANTIC_SEARCH_PATH: &str = "/api/search-tasks-semantic/";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SemanticSearchRequest {
    pub query: String,
    pub board_id: BoardId,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SemanticMatch {
    #[serde(alias = "id")]
    pub task_id: TaskId,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, alias = "relevance")]
    pub score: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SemanticSearchResponse {
    #[serde(default = "default_true")]
    pub success: bool,
    #[serde(default)]
    pub results: Vec<SemanticMatch>,
    #[serde(default)]
    pub explanation: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl SemanticSearchResponse {
    pub fn empty() -> Self {
        Self { success: true, results: Vec::new(), explanation: None, error: None }
    }
}
