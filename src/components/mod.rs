//! UI Components
//!
//! Leptos components for the board page.

mod insight_panel;
mod kanban_board;
mod kanban_column;
mod notification_stack;
mod search_bar;
mod task_card;

pub use insight_panel::{BoardInsights, TaskInsights};
pub use kanban_board::{KanbanBoard, BOARD_ELEMENT_ID};
pub use kanban_column::KanbanColumn;
pub use notification_stack::NotificationStack;
pub use search_bar::SearchBar;
pub use task_card::TaskCard;
