//! Kanban Column Component
//!
//! One board column: a draggable header and a task list that accepts
//! dropped tasks. Column drags may only start from the header.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_dragdrop::{insertion_index, is_own_event, make_on_dragover, reinsert, started_within, Axis, Span};
use web_sys::{DragEvent, MouseEvent};

use crate::components::{TaskCard, BOARD_ELEMENT_ID};
use crate::context::{use_app_context, use_drag_context};
use crate::dom;
use crate::models::{ColumnId, Task, TaskId, TaskMove};
use crate::store::{use_app_store, AppStateStoreFields};

const HEADER_SELECTOR: &str = ".kanban-column-header";
const TASK_LIST_SELECTOR: &str = ".kanban-column-tasks";

#[component]
pub fn KanbanColumn(column_id: ColumnId) -> impl IntoView {
    let store = use_app_store();
    let ctx = use_app_context();
    let drag = use_drag_context();

    // Set on mousedown; a column drag only starts when the press was on the header
    let (header_armed, set_header_armed) = signal(false);

    let id = StoredValue::new(column_id.clone());
    let name = move || store.board().with(|b| id.with_value(|id| b.column(id).map(|c| c.name.clone())).unwrap_or_default());
    let tasks = Memo::new(move |_| {
        store
            .board()
            .with(|b| id.with_value(|id| b.column(id).map(|c| c.tasks.clone())).unwrap_or_default())
    });
    let scrolls = move || store.scrolling_columns().with(|cols| id.with_value(|id| cols.contains(id)));

    let on_mousedown = move |ev: MouseEvent| {
        set_header_armed.set(started_within(&ev, HEADER_SELECTOR, TASK_LIST_SELECTOR));
    };

    let on_dragstart = move |ev: DragEvent| {
        if !is_own_event(&ev) || !header_armed.get_untracked() {
            ev.prevent_default();
            return;
        }
        ev.stop_propagation();
        drag.columns.start(&ev, id.get_value());
    };

    let on_dragend = move |ev: DragEvent| {
        ev.stop_propagation();
        drag.columns.end();
        drag.stop_scroll();
        set_header_armed.set(false);
    };

    let on_dragover = make_on_dragover(move |ev: &DragEvent| {
        ev.stop_propagation();
        drag.feed_pointer(ev.client_y() as f64);
    });

    let on_dragenter = move |ev: DragEvent| {
        ev.prevent_default();
        ev.stop_propagation();
        if drag.tasks.is_active() {
            drag.tasks.enter(id.get_value());
        } else if drag.columns.is_active() {
            drag.columns.enter(id.get_value());
        }
    };

    let on_dragleave = move |ev: DragEvent| {
        ev.stop_propagation();
        id.with_value(|id| {
            drag.tasks.leave(&ev, id);
            drag.columns.leave(&ev, id);
        });
    };

    let on_drop = move |ev: DragEvent| {
        ev.prevent_default();
        ev.stop_propagation();
        let target = id.get_value();
        let reconciler = ctx.reconciler();

        if let Some(task_id) = drag.tasks.take_drop(&target) {
            let selector = format!("#{} .kanban-task", target.element_id());
            let siblings = dom::collect_spans(&selector, Axis::Vertical, TaskId::from_element_id);
            let pointer = Span::pointer(&ev, Axis::Vertical);
            let index = insertion_index(pointer, siblings.iter().map(|(id, span)| (id, *span)), &task_id);

            tracing::debug!("task {} dropped on column {} at {}", task_id, target, index);
            // The card is re-rendered in its new column and may never see its dragend
            drag.tasks.end();
            drag.stop_scroll();
            if let Some(pending) = reconciler.begin_move(TaskMove::new(task_id, target, index)) {
                spawn_local(async move {
                    reconciler.finish_move(pending).await;
                });
            }
        } else if let Some(dragged) = drag.columns.take_drop(&target) {
            let selector = format!("#{} > .kanban-column", BOARD_ELEMENT_ID);
            let siblings = dom::collect_spans(&selector, Axis::Horizontal, ColumnId::from_element_id);
            let pointer = Span::pointer(&ev, Axis::Horizontal);
            let index = insertion_index(pointer, siblings.iter().map(|(id, span)| (id, *span)), &dragged);
            let order = reinsert(&reconciler.board().column_order(), &dragged, index);

            tracing::debug!("column {} dropped at {}", dragged, index);
            drag.columns.end();
            drag.stop_scroll();
            spawn_local(async move {
                // Invalid orders are reported by the reconciler itself
                let _ = reconciler.reorder_columns(&order).await;
            });
        }
    };

    view! {
        <div
            id=column_id.element_id()
            class=move || {
                let mut c = "kanban-column".to_string();
                id.with_value(|id| {
                    if drag.tasks.is_hovering(id) || drag.columns.is_hovering(id) { c.push_str(" drag-over"); }
                    if drag.columns.is_dragging(id) { c.push_str(" dragging"); }
                });
                c
            }
            draggable="true"
            on:mousedown=on_mousedown
            on:dragstart=on_dragstart
            on:dragend=on_dragend
            on:dragover=on_dragover
            on:dragenter=on_dragenter
            on:dragleave=on_dragleave
            on:drop=on_drop
        >
            <div class="kanban-column-header">
                <h3 class="kanban-column-title">{name}</h3>
                <span class="kanban-column-count">{move || tasks.with(|t| t.len())}</span>
            </div>
            <div class=move || if scrolls() { "kanban-column-tasks scrollable" } else { "kanban-column-tasks" }>
                <For
                    each=move || tasks.get()
                    key=|task: &Task| (task.id.clone(), task.color_class.clone())
                    children=move |task| view! { <TaskCard task=task /> }
                />
            </div>
        </div>
    }
}
