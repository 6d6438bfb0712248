//! Kanban Board Component
//!
//! Lays out the board's columns side by side in display order and feeds
//! window-wide drag positions to the edge scroller.

use leptos::prelude::*;

use crate::components::KanbanColumn;
use crate::context::use_drag_context;
use crate::store::{use_app_store, AppStateStoreFields};

pub const BOARD_ELEMENT_ID: &str = "kanban-board";

#[component]
pub fn KanbanBoard() -> impl IntoView {
    let store = use_app_store();
    let drag = use_drag_context();

    let column_ids = move || store.board().with(|b| b.column_order());
    let board_name = move || store.board().with(|b| b.name.clone());

    // Columns stop their own dragover, so this sees the pointer everywhere else
    let dragover = window_event_listener(leptos::ev::dragover, move |event| {
        drag.track_pointer(event.client_y() as f64);
    });
    on_cleanup(move || dragover.remove());

    view! {
        <section class="kanban">
            <h2 class="kanban-title">{board_name}</h2>
            <div
                id=BOARD_ELEMENT_ID
                class=move || {
                    let mut c = "kanban-board".to_string();
                    if drag.is_dragging_any() { c.push_str(" is-dragging"); }
                    c
                }
            >
                <For
                    each=column_ids
                    key=|id| id.clone()
                    children=move |id| view! { <KanbanColumn column_id=id /> }
                />
            </div>
        </section>
    }
}
