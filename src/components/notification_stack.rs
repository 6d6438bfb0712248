//! Notification Stack Component

use leptos::prelude::*;

use crate::notifications::Notification;
use crate::store::{store_dismiss, use_app_store, AppStateStoreFields};

#[component]
pub fn NotificationStack() -> impl IntoView {
    let store = use_app_store();

    view! {
        <div class="notification-stack" role="status" aria-live="polite">
            <For
                each=move || store.notifications().with(|n| n.items().to_vec())
                key=|n: &Notification| n.id
                children=move |n| {
                    let id = n.id;
                    view! {
                        <div class=n.level.css_class()>
                            <span class="notification-message">{n.message}</span>
                            <button class="notification-close" on:click=move |_| store_dismiss(&store, id)>"×"</button>
                        </div>
                    }
                }
            />
        </div>
    }
}
