//! Optimistic Updates
//!
//! Every drag result is applied to the board immediately and recorded as a
//! pending operation. The visible board is always the last confirmed board
//! with the pending operations replayed in order, so a rejected operation
//! can be dropped without disturbing the ones still in flight.

use std::cell::RefCell;

use crate::board::{positions_for, validate_column_positions, ReorderError};
use crate::commands::{ensure_success, ApiError, BoardApi, MoveTaskRequest, ReorderColumnsRequest};
use crate::models::{Board, BoardId, ColumnId, ColumnPosition, TaskMove};
use crate::notifications::NotificationLevel;

pub type OpId = u64;

#[derive(Debug, Clone, PartialEq)]
pub enum BoardOp {
    MoveTask(TaskMove),
    ReorderColumns(Vec<ColumnId>),
}

impl BoardOp {
    fn apply(&self, board: &mut Board) -> bool {
        match self {
            BoardOp::MoveTask(mv) => board.apply_move(mv),
            BoardOp::ReorderColumns(order) => board.apply_column_order(order),
        }
    }
}

#[derive(Debug, Clone)]
struct PendingOp {
    id: OpId,
    op: BoardOp,
    /// Server agreed, but an older op is still in flight
    acked: bool,
}

/// Confirmed board plus the operations still waiting on the server.
///
/// Ops reach the confirmed board strictly in the order they were made:
/// an acknowledged op waits behind any older op still in flight.
#[derive(Debug, Clone)]
pub struct Ledger {
    confirmed: Board,
    pending: Vec<PendingOp>,
    next_id: OpId,
    view: Board,
}

impl Ledger {
    pub fn new(board: Board) -> Self {
        Self { view: board.clone(), confirmed: board, pending: Vec::new(), next_id: 1 }
    }

    pub fn view(&self) -> &Board {
        &self.view
    }

    pub fn confirmed(&self) -> &Board {
        &self.confirmed
    }

    /// Ops not yet folded into the confirmed board, acknowledged or not
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Apply `op` to the view. Ops that cannot apply are not recorded.
    pub fn apply(&mut self, op: BoardOp) -> Option<OpId> {
        if !op.apply(&mut self.view) {
            return None;
        }
        let id = self.next_id;
        self.next_id += 1;
        self.pending.push(PendingOp { id, op, acked: false });
        Some(id)
    }

    /// Mark an op as accepted and fold every leading accepted op into the
    /// confirmed board
    pub fn confirm(&mut self, id: OpId) -> bool {
        let Some(entry) = self.pending.iter_mut().find(|p| p.id == id && !p.acked) else {
            return false;
        };
        entry.acked = true;
        self.fold_acked();
        self.rebuild();
        true
    }

    /// Drop a pending op and re-derive the view without it
    pub fn reject(&mut self, id: OpId) -> Option<BoardOp> {
        let index = self.pending.iter().position(|p| p.id == id && !p.acked)?;
        let removed = self.pending.remove(index);
        self.fold_acked();
        self.rebuild();
        Some(removed.op)
    }

    /// Edit the confirmed board directly (server-assigned fields)
    pub fn update_confirmed(&mut self, f: impl FnOnce(&mut Board)) {
        f(&mut self.confirmed);
        self.rebuild();
    }

    fn fold_acked(&mut self) {
        let ready = self.pending.iter().take_while(|p| p.acked).count();
        for entry in self.pending.drain(..ready) {
            if !entry.op.apply(&mut self.confirmed) {
                tracing::debug!("confirmed op {} no longer applies", entry.id);
            }
        }
    }

    fn rebuild(&mut self) {
        let mut view = self.confirmed.clone();
        for entry in &self.pending {
            if !entry.op.apply(&mut view) {
                tracing::debug!("pending op {} no longer applies", entry.id);
            }
        }
        self.view = view;
    }
}

/// Where reconciliation results are shown
pub trait BoardView {
    fn render(&self, board: &Board);

    fn notify(&self, level: NotificationLevel, message: String);

    /// A task changed column or position; `confirmed` once the server agrees
    fn task_moved(&self, mv: &TaskMove, confirmed: bool);
}

#[derive(Debug, Clone, PartialEq)]
pub enum Reconciled {
    /// Nothing changed, so nothing was sent
    Unchanged,
    Saved,
    RolledBack(ApiError),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PendingMove {
    pub op: OpId,
    pub mv: TaskMove,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PendingReorder {
    pub op: OpId,
    pub positions: Vec<ColumnPosition>,
}

pub struct Reconciler<A, V> {
    api: A,
    view: V,
    ledger: RefCell<Ledger>,
}

impl<A: BoardApi, V: BoardView> Reconciler<A, V> {
    pub fn new(api: A, view: V, board: Board) -> Self {
        Self { api, view, ledger: RefCell::new(Ledger::new(board)) }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    /// Snapshot of the board as currently shown
    pub fn board(&self) -> Board {
        self.ledger.borrow().view().clone()
    }

    pub fn board_id(&self) -> BoardId {
        self.ledger.borrow().confirmed().id.clone()
    }

    pub fn pending_ops(&self) -> usize {
        self.ledger.borrow().pending_len()
    }

    fn render(&self) {
        let board = self.board();
        self.view.render(&board);
    }

    // ========================
    // Task Moves
    // ========================

    /// Apply a move locally. Returns `None` when it would change nothing.
    pub fn begin_move(&self, mv: TaskMove) -> Option<PendingMove> {
        let op = {
            let mut ledger = self.ledger.borrow_mut();
            if ledger.view().is_noop_move(&mv) {
                tracing::debug!("task {} dropped on its own position", mv.task_id);
                return None;
            }
            ledger.apply(BoardOp::MoveTask(mv.clone()))
        };
        let Some(op) = op else {
            tracing::debug!("ignoring move of unknown task {} or column {}", mv.task_id, mv.column_id);
            return None;
        };

        self.render();
        self.view.task_moved(&mv, false);
        Some(PendingMove { op, mv })
    }

    /// Persist a move started with [`Self::begin_move`]
    pub async fn finish_move(&self, pending: PendingMove) -> Reconciled {
        let request = MoveTaskRequest::from(&pending.mv);
        let result = self
            .api
            .move_task(&request)
            .await
            .and_then(|resp| ensure_success(resp.success, resp.error.clone()).map(|_| resp));

        match result {
            Ok(resp) => {
                {
                    let mut ledger = self.ledger.borrow_mut();
                    ledger.confirm(pending.op);
                    if let Some(color_class) = resp.color_class {
                        let task_id = pending.mv.task_id.clone();
                        ledger.update_confirmed(|board| {
                            if let Some(task) = board.task_mut(&task_id) {
                                task.color_class = Some(color_class);
                            }
                        });
                    }
                }
                tracing::info!("task {} saved in column {}", pending.mv.task_id, pending.mv.column_id);
                self.render();
                self.view.task_moved(&pending.mv, true);
                self.view.notify(NotificationLevel::Success, "Task moved successfully".to_string());
                Reconciled::Saved
            }
            Err(e) => {
                tracing::error!("failed to move task {}: {}", pending.mv.task_id, e);
                self.ledger.borrow_mut().reject(pending.op);
                self.render();
                self.view.notify(NotificationLevel::Error, format!("Could not move task: {}", e));
                Reconciled::RolledBack(e)
            }
        }
    }

    pub async fn move_task(&self, mv: TaskMove) -> Reconciled {
        match self.begin_move(mv) {
            Some(pending) => self.finish_move(pending).await,
            None => Reconciled::Unchanged,
        }
    }

    // ========================
    // Column Reorders
    // ========================

    /// Validate and apply a bulk column reorder locally
    pub fn begin_column_reorder(&self, positions: Vec<ColumnPosition>) -> Result<Option<PendingReorder>, ReorderError> {
        let op = {
            let mut ledger = self.ledger.borrow_mut();
            match validate_column_positions(ledger.view(), &positions) {
                Ok(order) if order == ledger.view().column_order() => Ok(None),
                Ok(order) => Ok(ledger.apply(BoardOp::ReorderColumns(order))),
                Err(e) => Err(e),
            }
        };

        match op {
            Ok(Some(op)) => {
                self.render();
                Ok(Some(PendingReorder { op, positions }))
            }
            Ok(None) => Ok(None),
            Err(e) => {
                tracing::warn!("rejected column positions: {}", e);
                self.view.notify(NotificationLevel::Error, format!("Invalid column order: {}", e));
                Err(e)
            }
        }
    }

    pub async fn finish_column_reorder(&self, pending: PendingReorder) -> Reconciled {
        let request = ReorderColumnsRequest { columns: pending.positions, board_id: self.board_id() };

        match self.api.reorder_columns(&request).await {
            Ok(()) => {
                self.ledger.borrow_mut().confirm(pending.op);
                tracing::info!("saved order of {} columns", request.columns.len());
                self.render();
                self.view.notify(NotificationLevel::Success, "Column order saved".to_string());
                Reconciled::Saved
            }
            Err(e) => {
                tracing::error!("failed to save column order: {}", e);
                self.ledger.borrow_mut().reject(pending.op);
                self.render();
                self.view.notify(NotificationLevel::Error, format!("Could not save column order: {}", e));
                Reconciled::RolledBack(e)
            }
        }
    }

    pub async fn save_column_positions(&self, positions: Vec<ColumnPosition>) -> Result<Reconciled, ReorderError> {
        match self.begin_column_reorder(positions)? {
            Some(pending) => Ok(self.finish_column_reorder(pending).await),
            None => Ok(Reconciled::Unchanged),
        }
    }

    /// Submit `order` as the full column sequence
    pub async fn reorder_columns(&self, order: &[ColumnId]) -> Result<Reconciled, ReorderError> {
        self.save_column_positions(positions_for(order)).await
    }
}
