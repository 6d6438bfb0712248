//! Search Bar Component
//!
//! Keyword / AI search over the board's tasks. Input is debounced, and a
//! result is only applied if no newer search started meanwhile.

use gloo_timers::callback::Timeout;
use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;

use crate::context::use_app_context;
use crate::markdown::render_inline;
use crate::requests::LatestOnly;
use crate::search::{run_search, SearchMode, SearchSource};
use crate::store::{store_clear_search, use_app_store, AppStateStoreFields};

#[component]
pub fn SearchBar() -> impl IntoView {
    let store = use_app_store();
    let ctx = use_app_context();

    let (query, set_query) = signal(String::new());
    let requests = StoredValue::new(LatestOnly::new());
    let debounce = StoredValue::new_local(None::<Timeout>);

    let run = move |q: String| {
        if q.trim().is_empty() {
            requests.update_value(|r| r.invalidate());
            store_clear_search(&store);
            return;
        }
        let Some(ticket) = requests.try_update_value(|r| r.begin()) else { return };

        let mode = store.search_mode().get_untracked();
        let board = store.board().get_untracked();
        let min_len = ctx.config.with_value(|c| c.semantic_min_query_len);
        let client = ctx.client();
        spawn_local(async move {
            let outcome = run_search(client.as_ref(), &board, mode, &q, min_len).await;
            if requests.try_update_value(|r| r.finish(ticket)).unwrap_or(false) {
                *store.search().write() = Some(outcome);
            } else {
                tracing::debug!("discarding stale results for {:?}", q);
            }
        });
    };

    let on_input = move |ev: web_sys::Event| {
        let Some(input) = ev.target().and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok()) else {
            return;
        };
        let q = input.value();
        set_query.set(q.clone());
        let delay = ctx.config.with_value(|c| c.search_debounce_ms);
        // Replacing the timeout cancels the previous one
        debounce.set_value(Some(Timeout::new(delay, move || run(q))));
    };

    let set_mode = move |mode: SearchMode| {
        *store.search_mode().write() = mode;
        debounce.set_value(None);
        run(query.get_untracked());
    };

    let clear = move |_| {
        set_query.set(String::new());
        debounce.set_value(None);
        run(String::new());
    };

    let mode_class = move |mode: SearchMode| {
        move || {
            if store.search_mode().get() == mode {
                "search-mode active"
            } else {
                "search-mode"
            }
        }
    };

    let status = move || {
        store.search().with(|s| {
            s.as_ref().map(|s| {
                let label = match s.source {
                    SearchSource::Semantic => "AI matches",
                    SearchSource::KeywordFallback => "Keyword matches (AI found nothing)",
                    SearchSource::Keyword => "Keyword matches",
                };
                let explanation = s.explanation.as_deref().map(render_inline).unwrap_or_default();
                view! {
                    <div class="search-status">
                        <span class="search-count">{format!("{}: {}", label, s.matches.len())}</span>
                        <span class="search-explanation" inner_html=explanation></span>
                    </div>
                }
            })
        })
    };

    view! {
        <div class="search-bar">
            <input
                type="search"
                class="search-input"
                placeholder="Search tasks..."
                prop:value=move || query.get()
                on:input=on_input
            />
            <div class="search-modes">
                <button class=mode_class(SearchMode::Keyword) on:click=move |_| set_mode(SearchMode::Keyword)>
                    "Keyword"
                </button>
                <button class=mode_class(SearchMode::Ai) on:click=move |_| set_mode(SearchMode::Ai)>
                    "AI"
                </button>
            </div>
            <button class="search-clear" on:click=clear>"Clear"</button>
            {status}
        </div>
    }
}
