//! Application Context
//!
//! Shared services and drag state provided via Leptos Context API.

use std::rc::Rc;

use leptos::prelude::*;
use leptos_dragdrop::{create_dnd_signals, viewport_height, AutoScroller, DndSignals, WindowTicker};

use crate::commands::HttpClient;
use crate::config::BoardConfig;
use crate::models::{ColumnId, TaskId};
use crate::reconcile::Reconciler;
use crate::store::StoreBoardView;

pub type BoardReconciler = Reconciler<Rc<HttpClient>, StoreBoardView>;

/// App-wide services provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    pub config: StoredValue<BoardConfig>,
    client: StoredValue<Rc<HttpClient>, LocalStorage>,
    reconciler: StoredValue<Rc<BoardReconciler>, LocalStorage>,
}

impl AppContext {
    pub fn new(config: BoardConfig, client: Rc<HttpClient>, reconciler: Rc<BoardReconciler>) -> Self {
        Self {
            config: StoredValue::new(config),
            client: StoredValue::new_local(client),
            reconciler: StoredValue::new_local(reconciler),
        }
    }

    pub fn client(&self) -> Rc<HttpClient> {
        self.client.get_value()
    }

    pub fn reconciler(&self) -> Rc<BoardReconciler> {
        self.reconciler.get_value()
    }
}

pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}

/// Drag sessions for tasks and columns plus the shared edge scroller.
/// Task drags hover columns; column drags hover other columns.
#[derive(Clone, Copy)]
pub struct DragContext {
    pub tasks: DndSignals<TaskId, ColumnId>,
    pub columns: DndSignals<ColumnId, ColumnId>,
    scroller: StoredValue<AutoScroller<WindowTicker>, LocalStorage>,
}

impl DragContext {
    pub fn new(config: &BoardConfig) -> Self {
        Self {
            tasks: create_dnd_signals(),
            columns: create_dnd_signals(),
            scroller: StoredValue::new_local(AutoScroller::for_window(
                config.auto_scroll_tick_ms,
                config.auto_scroll_step_px,
                config.auto_scroll_threshold_px,
            )),
        }
    }

    /// `dragover` pointer position for edge scrolling
    pub fn feed_pointer(&self, client_y: f64) {
        if let Some(height) = viewport_height() {
            self.scroller.update_value(|s| {
                s.update(client_y, height);
            });
        }
    }

    /// Window `dragover` feed; covers the pointer outside any column
    pub fn track_pointer(&self, client_y: f64) {
        let dragging = self.in_drag();
        let Some(height) = viewport_height() else {
            return;
        };
        self.scroller.update_value(|s| {
            s.track(dragging, client_y, height);
        });
    }

    pub fn stop_scroll(&self) {
        self.scroller.update_value(|s| s.stop());
    }

    /// Untracked
    pub fn in_drag(&self) -> bool {
        self.tasks.is_active() || self.columns.is_active()
    }

    /// Tracked
    pub fn is_dragging_any(&self) -> bool {
        self.tasks.in_session() || self.columns.in_session()
    }
}

pub fn use_drag_context() -> DragContext {
    expect_context::<DragContext>()
}
