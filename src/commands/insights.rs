//! AI Insight Commands
//!
//! Bindings for the server's AI analysis endpoints. Raw responses are
//! decoded leniently and then narrowed into an [`Analysis`], so the UI only
//! ever sees either a complete result or an explicit "not available".

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::{default_true, ApiResult, HttpClient};
use crate::models::{Board, BoardId, Priority, Task, TaskId};

pub const SUGGEST_PRIORITY_PATH: &str = "/api/suggest-task-priority/";
pub const PREDICT_DEADLINE_PATH: &str = "/api/predict-deadline/";
pub const RECOMMEND_COLUMNS_PATH: &str = "/api/recommend-columns/";
pub const SUGGEST_BREAKDOWN_PATH: &str = "/api/suggest-task-breakdown/";
pub const ANALYZE_WORKFLOW_PATH: &str = "/api/analyze-workflow-optimization/";

/// Result of one AI request
#[derive(Debug, Clone, PartialEq)]
pub enum Analysis<T> {
    Available(T),
    Unavailable { reason: String },
}

impl<T> Analysis<T> {
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Analysis::Unavailable { reason: reason.into() }
    }
}

/// Narrow a raw response into its typed analysis
pub trait IntoAnalysis {
    type Output;

    fn into_analysis(self) -> Analysis<Self::Output>;
}

fn rejected<T>(success: bool, error: &Option<String>, fallback: &str) -> Option<Analysis<T>> {
    if success {
        None
    } else {
        Some(Analysis::unavailable(error.clone().unwrap_or_else(|| fallback.to_string())))
    }
}

/// Confidence as a whole percentage; servers send either 0..1 or 0..100
pub fn confidence_percent(score: f64) -> u8 {
    let pct = if score <= 1.0 { score * 100.0 } else { score };
    pct.round().clamp(0.0, 100.0) as u8
}

// ========================
// Request Context
// ========================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskContext {
    pub task_id: TaskId,
    pub board_id: BoardId,
    pub title: String,
    pub description: String,
    pub column: Option<String>,
    pub priority: Option<Priority>,
    pub due_date: Option<NaiveDate>,
    pub assignee: Option<String>,
}

impl TaskContext {
    pub fn from_task(board: &Board, task: &Task) -> Self {
        let column = board
            .locate_task(&task.id)
            .and_then(|at| board.column(&at.column_id).map(|c| c.name.clone()));
        Self {
            task_id: task.id.clone(),
            board_id: board.id.clone(),
            title: task.title.clone(),
            description: task.description.clone(),
            column,
            priority: task.priority,
            due_date: task.due_date,
            assignee: task.assignee.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnSummary {
    pub name: String,
    pub task_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoardContext {
    pub board_id: BoardId,
    pub board_name: String,
    pub columns: Vec<ColumnSummary>,
}

impl BoardContext {
    pub fn from_board(board: &Board) -> Self {
        Self {
            board_id: board.id.clone(),
            board_name: board.name.clone(),
            columns: board
                .columns
                .iter()
                .map(|c| ColumnSummary { name: c.name.clone(), task_count: c.tasks.len() })
                .collect(),
        }
    }
}

// ========================
// Priority
// ========================

#[derive(Debug, Clone, PartialEq)]
pub struct PrioritySuggestion {
    pub priority: Priority,
    pub confidence: Option<f64>,
    pub reasoning: String,
    pub factors: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct RawPrioritySuggestion {
    #[serde(default = "default_true")]
    success: bool,
    #[serde(default)]
    error: Option<String>,
    #[serde(default, alias = "priority")]
    suggested_priority: Option<Priority>,
    #[serde(default, alias = "confidence")]
    confidence_score: Option<f64>,
    #[serde(default)]
    reasoning: Option<String>,
    #[serde(default, alias = "contributing_factors")]
    factors: Vec<String>,
}

impl IntoAnalysis for RawPrioritySuggestion {
    type Output = PrioritySuggestion;

    fn into_analysis(self) -> Analysis<PrioritySuggestion> {
        if let Some(r) = rejected(self.success, &self.error, "Priority suggestion failed") {
            return r;
        }
        match self.suggested_priority {
            Some(priority) => Analysis::Available(PrioritySuggestion {
                priority,
                confidence: self.confidence_score,
                reasoning: self.reasoning.unwrap_or_default(),
                factors: self.factors,
            }),
            None => Analysis::unavailable("Could not suggest a priority for this task."),
        }
    }
}

// ========================
// Deadline
// ========================

#[derive(Debug, Clone, PartialEq)]
pub struct DeadlinePrediction {
    pub date: NaiveDate,
    pub confidence: Option<f64>,
    pub reasoning: String,
    pub risk_factors: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct RawDeadlinePrediction {
    #[serde(default = "default_true")]
    success: bool,
    #[serde(default)]
    error: Option<String>,
    #[serde(default, alias = "predicted_deadline")]
    predicted_date: Option<String>,
    #[serde(default, alias = "confidence")]
    confidence_score: Option<f64>,
    #[serde(default)]
    reasoning: Option<String>,
    #[serde(default)]
    risk_factors: Vec<String>,
}

impl IntoAnalysis for RawDeadlinePrediction {
    type Output = DeadlinePrediction;

    fn into_analysis(self) -> Analysis<DeadlinePrediction> {
        if let Some(r) = rejected(self.success, &self.error, "Deadline prediction failed") {
            return r;
        }
        // Accept a bare date or the date part of an ISO timestamp
        let date = self
            .predicted_date
            .as_deref()
            .and_then(|s| s.get(..10))
            .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok());
        match date {
            Some(date) => Analysis::Available(DeadlinePrediction {
                date,
                confidence: self.confidence_score,
                reasoning: self.reasoning.unwrap_or_default(),
                risk_factors: self.risk_factors,
            }),
            None => Analysis::unavailable("Could not predict a deadline for this task."),
        }
    }
}

// ========================
// Column Recommendations
// ========================

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RecommendedColumn {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnRecommendations {
    pub columns: Vec<RecommendedColumn>,
    pub reasoning: String,
}

#[derive(Debug, Deserialize)]
pub struct RawColumnRecommendations {
    #[serde(default = "default_true")]
    success: bool,
    #[serde(default)]
    error: Option<String>,
    #[serde(default, alias = "columns")]
    recommended_columns: Vec<RecommendedColumn>,
    #[serde(default)]
    reasoning: Option<String>,
}

impl IntoAnalysis for RawColumnRecommendations {
    type Output = ColumnRecommendations;

    fn into_analysis(self) -> Analysis<ColumnRecommendations> {
        if let Some(r) = rejected(self.success, &self.error, "Column recommendation failed") {
            return r;
        }
        if self.recommended_columns.is_empty() {
            return Analysis::unavailable("No column recommendations were generated.");
        }
        Analysis::Available(ColumnRecommendations {
            columns: self.recommended_columns,
            reasoning: self.reasoning.unwrap_or_default(),
        })
    }
}

// ========================
// Task Breakdown
// ========================

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Subtask {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, alias = "effort")]
    pub estimated_effort: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TaskBreakdown {
    pub subtasks: Vec<Subtask>,
    pub reasoning: String,
}

#[derive(Debug, Deserialize)]
pub struct RawTaskBreakdown {
    #[serde(default = "default_true")]
    success: bool,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    subtasks: Vec<Subtask>,
    #[serde(default)]
    reasoning: Option<String>,
}

impl IntoAnalysis for RawTaskBreakdown {
    type Output = TaskBreakdown;

    fn into_analysis(self) -> Analysis<TaskBreakdown> {
        if let Some(r) = rejected(self.success, &self.error, "Task breakdown failed") {
            return r;
        }
        if self.subtasks.is_empty() {
            return Analysis::unavailable("Could not break this task down.");
        }
        Analysis::Available(TaskBreakdown { subtasks: self.subtasks, reasoning: self.reasoning.unwrap_or_default() })
    }
}

// ========================
// Workflow Optimization
// ========================

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Bottleneck {
    #[serde(alias = "column")]
    pub area: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Recommendation {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub impact: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowOptimization {
    pub health_score: Option<f64>,
    pub summary: Option<String>,
    pub bottlenecks: Vec<Bottleneck>,
    pub recommendations: Vec<Recommendation>,
}

#[derive(Debug, Deserialize)]
pub struct RawWorkflowOptimization {
    #[serde(default = "default_true")]
    success: bool,
    #[serde(default)]
    error: Option<String>,
    #[serde(default, alias = "overall_health_score")]
    health_score: Option<f64>,
    #[serde(default)]
    summary: Option<String>,
    #[serde(default)]
    bottlenecks: Vec<Bottleneck>,
    #[serde(default)]
    recommendations: Vec<Recommendation>,
}

impl IntoAnalysis for RawWorkflowOptimization {
    type Output = WorkflowOptimization;

    fn into_analysis(self) -> Analysis<WorkflowOptimization> {
        if let Some(r) = rejected(self.success, &self.error, "Workflow analysis failed") {
            return r;
        }
        let summary = self.summary.filter(|s| !s.trim().is_empty());
        if self.health_score.is_none() && summary.is_none() && self.bottlenecks.is_empty() && self.recommendations.is_empty() {
            return Analysis::unavailable("Could not analyze this workflow.");
        }
        Analysis::Available(WorkflowOptimization {
            health_score: self.health_score,
            summary,
            bottlenecks: self.bottlenecks,
            recommendations: self.recommendations,
        })
    }
}

// ========================
// Summaries
// ========================

#[derive(Debug, Deserialize)]
pub struct RawSummary {
    #[serde(default = "default_true")]
    success: bool,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    summary: Option<String>,
}

impl IntoAnalysis for RawSummary {
    type Output = String;

    fn into_analysis(self) -> Analysis<String> {
        if let Some(r) = rejected(self.success, &self.error, "Summary generation failed") {
            return r;
        }
        match self.summary.filter(|s| !s.trim().is_empty()) {
            Some(summary) => Analysis::Available(summary),
            None => Analysis::unavailable("Could not generate a summary. Please try again later."),
        }
    }
}

// ========================
// Commands
// ========================

impl HttpClient {
    async fn analysis<B, R>(&self, path: &str, body: Option<&B>) -> ApiResult<Analysis<R::Output>>
    where
        B: Serialize + ?Sized,
        R: IntoAnalysis + DeserializeOwned,
    {
        let raw: R = match body {
            Some(body) => self.post(path, body).await?,
            None => self.get(path).await?,
        };
        Ok(raw.into_analysis())
    }

    pub async fn suggest_priority(&self, ctx: &TaskContext) -> ApiResult<Analysis<PrioritySuggestion>> {
        self.analysis::<_, RawPrioritySuggestion>(SUGGEST_PRIORITY_PATH, Some(ctx)).await
    }

    pub async fn predict_deadline(&self, ctx: &TaskContext) -> ApiResult<Analysis<DeadlinePrediction>> {
        self.analysis::<_, RawDeadlinePrediction>(PREDICT_DEADLINE_PATH, Some(ctx)).await
    }

    pub async fn suggest_breakdown(&self, ctx: &TaskContext) -> ApiResult<Analysis<TaskBreakdown>> {
        self.analysis::<_, RawTaskBreakdown>(SUGGEST_BREAKDOWN_PATH, Some(ctx)).await
    }

    pub async fn recommend_columns(&self, ctx: &BoardContext) -> ApiResult<Analysis<ColumnRecommendations>> {
        self.analysis::<_, RawColumnRecommendations>(RECOMMEND_COLUMNS_PATH, Some(ctx)).await
    }

    pub async fn analyze_workflow(&self, ctx: &BoardContext) -> ApiResult<Analysis<WorkflowOptimization>> {
        self.analysis::<_, RawWorkflowOptimization>(ANALYZE_WORKFLOW_PATH, Some(ctx)).await
    }

    pub async fn summarize_board(&self, board_id: &BoardId) -> ApiResult<Analysis<String>> {
        let path = format!("/api/summarize-board/{}/", board_id);
        self.analysis::<(), RawSummary>(&path, None).await
    }

    pub async fn summarize_task(&self, task_id: &TaskId) -> ApiResult<Analysis<String>> {
        let path = format!("/api/summarize-task/{}/", task_id);
        self.analysis::<(), RawSummary>(&path, None).await
    }
}
