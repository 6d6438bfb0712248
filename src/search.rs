//! Task Search
//!
//! Keyword filtering runs locally. AI mode asks the server for semantic
//! matches and falls back to the keyword filter whenever that yields
//! nothing usable.

use std::collections::HashSet;

use crate::commands::{BoardApi, SemanticSearchRequest};
use crate::models::{Board, Task, TaskId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchMode {
    #[default]
    Keyword,
    Ai,
}

/// Which path produced the matches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchSource {
    Keyword,
    Semantic,
    KeywordFallback,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    pub query: String,
    pub matches: Vec<TaskId>,
    pub explanation: Option<String>,
    pub source: SearchSource,
}

impl SearchOutcome {
    pub fn is_match(&self, id: &TaskId) -> bool {
        self.matches.contains(id)
    }
}

fn task_matches(task: &Task, terms: &[String]) -> bool {
    let haystack = {
        let mut text = format!("{} {}", task.title, task.description);
        if let Some(assignee) = &task.assignee {
            text.push(' ');
            text.push_str(assignee);
        }
        for label in &task.labels {
            text.push(' ');
            text.push_str(label);
        }
        text.to_lowercase()
    };
    terms.iter().all(|term| haystack.contains(term.as_str()))
}

/// Ids of tasks matching every term of `query`, in board order
pub fn keyword_filter(board: &Board, query: &str) -> Vec<TaskId> {
    let terms: Vec<String> = query.split_whitespace().map(str::to_lowercase).collect();
    board
        .tasks()
        .filter(|task| task_matches(task, &terms))
        .map(|task| task.id.clone())
        .collect()
}

fn keyword_outcome(board: &Board, query: &str, source: SearchSource) -> SearchOutcome {
    SearchOutcome {
        query: query.to_string(),
        matches: keyword_filter(board, query),
        explanation: None,
        source,
    }
}

pub async fn run_search<A: BoardApi + ?Sized>(
    api: &A,
    board: &Board,
    mode: SearchMode,
    query: &str,
    min_semantic_len: usize,
) -> SearchOutcome {
    let trimmed = query.trim();
    if mode == SearchMode::Keyword || trimmed.chars().count() < min_semantic_len {
        return keyword_outcome(board, query, SearchSource::Keyword);
    }

    let request = SemanticSearchRequest { query: trimmed.to_string(), board_id: board.id.clone() };
    match api.search_tasks(&request).await {
        Ok(response) if response.success => {
            let on_board: HashSet<&TaskId> = board.tasks().map(|t| &t.id).collect();
            let mut seen = HashSet::new();
            let matches: Vec<TaskId> = response
                .results
                .into_iter()
                .map(|m| m.task_id)
                .filter(|id| on_board.contains(id) && seen.insert(id.clone()))
                .collect();
            if matches.is_empty() {
                tracing::debug!("semantic search found nothing for {:?}, using keywords", trimmed);
                return keyword_outcome(board, query, SearchSource::KeywordFallback);
            }
            SearchOutcome {
                query: query.to_string(),
                matches,
                explanation: response.explanation.filter(|e| !e.trim().is_empty()),
                source: SearchSource::Semantic,
            }
        }
        Ok(_) => {
            tracing::warn!("semantic search declined, using keywords");
            keyword_outcome(board, query, SearchSource::KeywordFallback)
        }
        Err(e) => {
            tracing::warn!("semantic search failed: {}", e);
            keyword_outcome(board, query, SearchSource::KeywordFallback)
        }
    }
}
