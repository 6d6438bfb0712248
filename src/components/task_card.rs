//! Task Card Component

use leptos::prelude::*;
use web_sys::DragEvent;

use crate::context::use_drag_context;
use crate::models::Task;
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn TaskCard(task: Task) -> impl IntoView {
    let store = use_app_store();
    let drag = use_drag_context();

    let id = StoredValue::new(task.id.clone());
    let color_class = task.color_class.clone().unwrap_or_default();

    let on_dragstart = move |ev: DragEvent| {
        // Keep the column's own drag handlers out of it
        ev.stop_propagation();
        drag.tasks.start(&ev, id.get_value());
    };

    let on_dragend = move |ev: DragEvent| {
        ev.stop_propagation();
        drag.tasks.end();
        drag.stop_scroll();
    };

    let class = move || {
        let mut c = format!("kanban-task {}", color_class);
        id.with_value(|id| {
            if drag.tasks.is_dragging(id) {
                c.push_str(" dragging");
            }
            match store.search().with(|s| s.as_ref().map(|s| s.is_match(id))) {
                Some(true) => c.push_str(" search-match"),
                Some(false) => c.push_str(" search-dimmed"),
                None => {}
            }
            if store.selected_task().with(|sel| sel.as_ref() == Some(id)) {
                c.push_str(" selected");
            }
        });
        c
    };

    let priority = task.priority.map(|p| {
        view! { <span class=format!("task-priority priority-{}", p.as_str())>{p.label()}</span> }
    });
    let due = task.due_date.map(|d| view! { <span class="task-due">{d.format("%b %-d").to_string()}</span> });
    let assignee = task.assignee.clone().map(|a| view! { <span class="task-assignee">{a}</span> });
    let labels = task
        .labels
        .iter()
        .map(|l| view! { <span class="task-label">{l.clone()}</span> })
        .collect_view();

    view! {
        <div
            id=task.id.element_id()
            class=class
            draggable="true"
            on:dragstart=on_dragstart
            on:dragend=on_dragend
            on:click=move |_| *store.selected_task().write() = Some(id.get_value())
        >
            <div class="task-title">{task.title.clone()}</div>
            <div class="task-meta">
                {priority}
                {due}
                {assignee}
            </div>
            <div class="task-labels">{labels}</div>
        </div>
    }
}
