//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity.

use std::collections::BTreeSet;

use gloo_timers::callback::Timeout;
use leptos::prelude::*;
use reactive_stores::Store;
use serde::Serialize;

use crate::board::scrolling_columns;
use crate::dom;
use crate::models::{Board, ColumnId, TaskId, TaskMove};
use crate::notifications::{NotificationCenter, NotificationLevel};
use crate::reconcile::BoardView;
use crate::search::{SearchMode, SearchOutcome};

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// Board as currently shown (confirmed + pending moves)
    pub board: Board,
    pub notifications: NotificationCenter,
    pub search_mode: SearchMode,
    /// Active search; `None` shows every card normally
    pub search: Option<SearchOutcome>,
    /// Columns whose task list scrolls internally
    pub scrolling_columns: BTreeSet<ColumnId>,
    /// Task whose insight panel is open
    pub selected_task: Option<TaskId>,
    /// Version counter for task moves (increment on every `taskMoved`)
    pub moves_version: u32,
}

impl AppState {
    pub fn new(board: Board, column_scroll_threshold: usize) -> Self {
        Self {
            scrolling_columns: scrolling_columns(&board, column_scroll_threshold),
            board,
            ..Default::default()
        }
    }
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

// ========================
// Store Helper Functions
// ========================

/// Show a toast and dismiss it after `duration_ms`
pub fn store_notify(store: &AppStore, level: NotificationLevel, message: impl Into<String>, duration_ms: u32) {
    let id = store.notifications().write().push(level, message);
    let store = *store;
    // Detached; the toast lives until the timer fires
    let _ = Timeout::new(duration_ms, move || {
        store.notifications().write().dismiss(id);
    })
    .forget();
}

pub fn store_dismiss(store: &AppStore, id: u64) {
    store.notifications().write().dismiss(id);
}

pub fn store_clear_search(store: &AppStore) {
    *store.search().write() = None;
}

/// `detail` of the window `taskMoved` event
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskMovedDetail<'a> {
    pub task_id: &'a TaskId,
    pub column_id: &'a ColumnId,
    pub position: usize,
    pub confirmed: bool,
}

/// Reconciliation output written into the store
#[derive(Clone, Copy)]
pub struct StoreBoardView {
    pub store: AppStore,
    pub column_scroll_threshold: usize,
    pub notification_ms: u32,
}

impl BoardView for StoreBoardView {
    fn render(&self, board: &Board) {
        *self.store.scrolling_columns().write() = scrolling_columns(board, self.column_scroll_threshold);
        *self.store.board().write() = board.clone();
    }

    fn notify(&self, level: NotificationLevel, message: String) {
        store_notify(&self.store, level, message, self.notification_ms);
    }

    fn task_moved(&self, mv: &TaskMove, confirmed: bool) {
        let detail = TaskMovedDetail {
            task_id: &mv.task_id,
            column_id: &mv.column_id,
            position: mv.position,
            confirmed,
        };
        dom::dispatch_window_event(dom::TASK_MOVED_EVENT, &detail);
        *self.store.moves_version().write() += 1;
    }
}
