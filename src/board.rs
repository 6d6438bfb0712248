//! Board Operations
//!
//! Pure reordering logic over the board view-model. The optimistic update
//! and the rollback replay both go through these functions.

use std::collections::{BTreeSet, HashSet};

use thiserror::Error;

use crate::models::{Board, Column, ColumnId, ColumnPosition, Task, TaskId, TaskLocation, TaskMove};

/// Default number of tasks a column shows before it scrolls internally
pub const DEFAULT_COLUMN_SCROLL_THRESHOLD: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReorderError {
    #[error("position {position} is assigned to more than one column")]
    DuplicatePosition { position: i32 },
    #[error("column positions must run from 0 without gaps (missing {missing})")]
    Gap { missing: i32 },
    #[error("column {0} is not on this board")]
    UnknownColumn(ColumnId),
    #[error("column {0} appears more than once")]
    DuplicateColumn(ColumnId),
    #[error("column {0} is missing from the new order")]
    MissingColumn(ColumnId),
}

impl Board {
    pub fn column(&self, id: &ColumnId) -> Option<&Column> {
        self.columns.iter().find(|c| &c.id == id)
    }

    fn column_index(&self, id: &ColumnId) -> Option<usize> {
        self.columns.iter().position(|c| &c.id == id)
    }

    pub fn tasks(&self) -> impl Iterator<Item = &Task> {
        self.columns.iter().flat_map(|c| c.tasks.iter())
    }

    pub fn task(&self, id: &TaskId) -> Option<&Task> {
        self.tasks().find(|t| &t.id == id)
    }

    pub fn task_mut(&mut self, id: &TaskId) -> Option<&mut Task> {
        self.columns
            .iter_mut()
            .flat_map(|c| c.tasks.iter_mut())
            .find(|t| &t.id == id)
    }

    pub fn locate_task(&self, id: &TaskId) -> Option<TaskLocation> {
        self.columns.iter().find_map(|c| {
            c.tasks.iter().position(|t| &t.id == id).map(|position| TaskLocation {
                column_id: c.id.clone(),
                position,
            })
        })
    }

    pub fn column_order(&self) -> Vec<ColumnId> {
        self.columns.iter().map(|c| c.id.clone()).collect()
    }

    /// Full `{columnId, position}` list in display order
    pub fn column_positions(&self) -> Vec<ColumnPosition> {
        self.columns
            .iter()
            .enumerate()
            .map(|(position, c)| ColumnPosition { column_id: c.id.clone(), position: position as i32 })
            .collect()
    }

    /// Whether applying `mv` would leave the board unchanged
    pub fn is_noop_move(&self, mv: &TaskMove) -> bool {
        match self.locate_task(&mv.task_id) {
            Some(at) => at.column_id == mv.column_id && at.position == mv.position,
            None => false,
        }
    }

    /// Re-parent a task. Returns false (and changes nothing) when the task
    /// or the target column is unknown.
    pub fn apply_move(&mut self, mv: &TaskMove) -> bool {
        let Some(target) = self.column_index(&mv.column_id) else {
            return false;
        };
        let Some(from) = self.locate_task(&mv.task_id) else {
            return false;
        };
        let Some(source) = self.column_index(&from.column_id) else {
            return false;
        };

        let task = self.columns[source].tasks.remove(from.position);
        let tasks = &mut self.columns[target].tasks;
        let position = mv.position.min(tasks.len());
        tasks.insert(position, task);
        true
    }

    /// Reorder columns to `order`, which must be a permutation of the
    /// current columns.
    pub fn apply_column_order(&mut self, order: &[ColumnId]) -> bool {
        let unique: HashSet<&ColumnId> = order.iter().collect();
        if order.len() != self.columns.len()
            || unique.len() != order.len()
            || order.iter().any(|id| self.column(id).is_none())
        {
            return false;
        }
        let mut remaining = std::mem::take(&mut self.columns);
        for id in order {
            if let Some(i) = remaining.iter().position(|c| &c.id == id) {
                self.columns.push(remaining.remove(i));
            }
        }
        true
    }
}

/// Check a bulk reorder payload against `board` and return the column ids
/// sorted by their new position.
pub fn validate_column_positions(board: &Board, positions: &[ColumnPosition]) -> Result<Vec<ColumnId>, ReorderError> {
    let mut seen_positions = HashSet::new();
    for p in positions {
        if !seen_positions.insert(p.position) {
            return Err(ReorderError::DuplicatePosition { position: p.position });
        }
    }
    for expected in 0..positions.len() as i32 {
        if !seen_positions.contains(&expected) {
            return Err(ReorderError::Gap { missing: expected });
        }
    }

    let mut seen_columns = HashSet::new();
    for p in positions {
        if board.column(&p.column_id).is_none() {
            return Err(ReorderError::UnknownColumn(p.column_id.clone()));
        }
        if !seen_columns.insert(&p.column_id) {
            return Err(ReorderError::DuplicateColumn(p.column_id.clone()));
        }
    }
    if let Some(missing) = board.columns.iter().find(|c| !seen_columns.contains(&c.id)) {
        return Err(ReorderError::MissingColumn(missing.id.clone()));
    }

    let mut sorted: Vec<&ColumnPosition> = positions.iter().collect();
    sorted.sort_by_key(|p| p.position);
    Ok(sorted.into_iter().map(|p| p.column_id.clone()).collect())
}

/// Build the `{columnId, position}` list for a column order
pub fn positions_for(order: &[ColumnId]) -> Vec<ColumnPosition> {
    order
        .iter()
        .enumerate()
        .map(|(position, id)| ColumnPosition { column_id: id.clone(), position: position as i32 })
        .collect()
}

pub fn column_needs_scroll(task_count: usize, threshold: usize) -> bool {
    task_count > threshold
}

/// Columns whose task list should scroll internally
pub fn scrolling_columns(board: &Board, threshold: usize) -> BTreeSet<ColumnId> {
    board
        .columns
        .iter()
        .filter(|c| column_needs_scroll(c.tasks.len(), threshold))
        .map(|c| c.id.clone())
        .collect()
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    fn mv(task: &str, column: &str, position: usize) -> TaskMove {
        TaskMove::new(TaskId::new(task), ColumnId::new(column), position)
    }

    fn cp(column: &str, position: i32) -> ColumnPosition {
        ColumnPosition { column_id: ColumnId::new(column), position }
    }

    #[test]
    fn test_move_across_columns() {
        let mut board = sample_board();
        assert!(board.apply_move(&mv("t2", "doing", 0)));

        assert_eq!(ids(&board, "todo"), vec!["t1", "t3"]);
        assert_eq!(ids(&board, "doing"), vec!["t2", "t4"]);
        assert_eq!(
            board.locate_task(&TaskId::new("t2")),
            Some(TaskLocation { column_id: ColumnId::new("doing"), position: 0 })
        );
    }

    #[test]
    fn test_move_within_column() {
        let mut board = sample_board();
        assert!(board.apply_move(&mv("t1", "todo", 2)));
        assert_eq!(ids(&board, "todo"), vec!["t2", "t3", "t1"]);
    }

    #[test]
    fn test_move_to_empty_column_clamps_position() {
        let mut board = sample_board();
        assert!(board.apply_move(&mv("t4", "done", 5)));
        assert_eq!(ids(&board, "done"), vec!["t4"]);
        assert!(ids(&board, "doing").is_empty());
    }

    #[test]
    fn test_move_unknown_task_or_column_changes_nothing() {
        let mut board = sample_board();
        assert!(!board.apply_move(&mv("nope", "doing", 0)));
        assert!(!board.apply_move(&mv("t1", "archive", 0)));
        assert_eq!(board, sample_board());
    }

    #[test]
    fn test_noop_move_detection() {
        let board = sample_board();
        assert!(board.is_noop_move(&mv("t2", "todo", 1)));
        assert!(!board.is_noop_move(&mv("t2", "todo", 0)));
        assert!(!board.is_noop_move(&mv("t2", "doing", 1)));
        assert!(!board.is_noop_move(&mv("missing", "todo", 0)));
    }

    #[test]
    fn test_apply_column_order() {
        let mut board = sample_board();
        let order = vec![ColumnId::new("done"), ColumnId::new("todo"), ColumnId::new("doing")];
        assert!(board.apply_column_order(&order));
        assert_eq!(board.column_order(), order);
        // Tasks travel with their column
        assert_eq!(ids(&board, "todo"), vec!["t1", "t2", "t3"]);
    }

    #[test]
    fn test_apply_column_order_rejects_non_permutation() {
        let mut board = sample_board();
        let original = board.column_order();

        assert!(!board.apply_column_order(&[ColumnId::new("todo")]));
        assert!(!board.apply_column_order(&[ColumnId::new("todo"), ColumnId::new("doing"), ColumnId::new("x")]));
        assert_eq!(board.column_order(), original);
        assert_eq!(ids(&board, "todo"), vec!["t1", "t2", "t3"]);
    }

    #[test]
    fn test_validate_rejects_duplicate_positions() {
        let board = sample_board();
        let err = validate_column_positions(&board, &[cp("todo", 2), cp("doing", 2), cp("done", 1)]);
        assert_eq!(err, Err(ReorderError::DuplicatePosition { position: 2 }));
    }

    #[test]
    fn test_validate_rejects_gaps_and_unknown_columns() {
        let board = sample_board();
        assert_eq!(
            validate_column_positions(&board, &[cp("todo", 0), cp("doing", 1), cp("done", 3)]),
            Err(ReorderError::Gap { missing: 2 })
        );
        assert_eq!(
            validate_column_positions(&board, &[cp("todo", 0), cp("doing", 1), cp("archive", 2)]),
            Err(ReorderError::UnknownColumn(ColumnId::new("archive")))
        );
        assert_eq!(
            validate_column_positions(&board, &[cp("todo", 0), cp("todo", 1), cp("done", 2)]),
            Err(ReorderError::DuplicateColumn(ColumnId::new("todo")))
        );
        assert_eq!(
            validate_column_positions(&board, &[cp("todo", 0), cp("doing", 1)]),
            Err(ReorderError::MissingColumn(ColumnId::new("done")))
        );
    }

    #[test]
    fn test_validate_returns_order_by_position() {
        let board = sample_board();
        let order = validate_column_positions(&board, &[cp("todo", 2), cp("doing", 0), cp("done", 1)]).unwrap();
        assert_eq!(order, vec![ColumnId::new("doing"), ColumnId::new("done"), ColumnId::new("todo")]);
    }

    #[test]
    fn test_positions_for_order() {
        let order = vec![ColumnId::new("b"), ColumnId::new("a")];
        assert_eq!(positions_for(&order), vec![cp("b", 0), cp("a", 1)]);
    }

    #[test]
    fn test_scrolling_columns_uses_threshold() {
        let mut board = sample_board();
        assert!(scrolling_columns(&board, DEFAULT_COLUMN_SCROLL_THRESHOLD).is_empty());

        for i in 0..2 {
            board.columns[0].tasks.push(task(&format!("x{}", i), "extra"));
        }
        let scrolling = scrolling_columns(&board, DEFAULT_COLUMN_SCROLL_THRESHOLD);
        assert_eq!(scrolling.into_iter().collect::<Vec<_>>(), vec![ColumnId::new("todo")]);
        assert!(!column_needs_scroll(4, 4));
        assert!(column_needs_scroll(5, 4));
    }
}
