//! Prizm Board App
//!
//! Wires the page's embedded config and board data into the store, the
//! HTTP client and the reconciler, then renders the board.

use std::rc::Rc;

use leptos::prelude::*;
use reactive_stores::Store;

use crate::commands::HttpClient;
use crate::components::{BoardInsights, KanbanBoard, NotificationStack, SearchBar, TaskInsights};
use crate::config::{load_config, BoardConfig};
use crate::context::{AppContext, DragContext};
use crate::dom;
use crate::models::Board;
use crate::reconcile::Reconciler;
use crate::store::{AppState, StoreBoardView};

pub const BOARD_DATA_SCRIPT_ID: &str = "board-data";

/// Initial board rendered by the server; an empty board if absent or malformed
fn load_board() -> Board {
    let Some(json) = dom::script_text(BOARD_DATA_SCRIPT_ID) else {
        tracing::warn!("no board data on the page");
        return Board::default();
    };
    match serde_json::from_str::<Board>(&json) {
        Ok(board) => {
            tracing::info!("loaded board {} with {} columns", board.id, board.columns.len());
            board
        }
        Err(e) => {
            tracing::error!("could not parse board data: {}", e);
            Board::default()
        }
    }
}

fn build_client(config: &BoardConfig) -> HttpClient {
    let token = dom::csrf_token();
    if token.is_none() {
        tracing::warn!("no CSRF token found; writes will be rejected");
    }
    HttpClient::new(config.resolved_api_base(&dom::origin()), token)
}

#[component]
pub fn App() -> impl IntoView {
    let config = load_config();
    let board = load_board();

    let store = Store::new(AppState::new(board.clone(), config.column_scroll_threshold));
    provide_context(store);

    let client = Rc::new(build_client(&config));
    let view = StoreBoardView {
        store,
        column_scroll_threshold: config.column_scroll_threshold,
        notification_ms: config.notification_ms,
    };
    let reconciler = Rc::new(Reconciler::new(client.clone(), view, board));

    provide_context(DragContext::new(&config));
    provide_context(AppContext::new(config, client, reconciler));

    view! {
        <div class="board-app">
            <SearchBar />
            <div class="board-layout">
                <KanbanBoard />
                <div class="board-sidebar">
                    <TaskInsights />
                    <BoardInsights />
                </div>
            </div>
            <NotificationStack />
        </div>
    }
}
