//! In-process doubles for the server API and the rendered board.

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};

use async_trait::async_trait;
use tokio::sync::oneshot;

use crate::commands::{
    ApiError, ApiResult, BoardApi, MoveTaskRequest, MoveTaskResponse, ReorderColumnsRequest, SemanticSearchRequest,
    SemanticSearchResponse,
};
use crate::models::{Board, TaskId, TaskMove};
use crate::notifications::NotificationLevel;
use crate::reconcile::BoardView;

type Reply<T> = oneshot::Sender<ApiResult<T>>;

async fn settle<T>(rx: oneshot::Receiver<ApiResult<T>>) -> ApiResult<T> {
    rx.await.unwrap_or_else(|_| Err(ApiError::Network("reply dropped".to_string())))
}

/// Fake server: records every request and answers from queued replies,
/// or succeeds when nothing is queued.
#[derive(Default)]
pub struct FakeApi {
    pub moves: RefCell<Vec<MoveTaskRequest>>,
    pub reorders: RefCell<Vec<ReorderColumnsRequest>>,
    pub searches: RefCell<Vec<SemanticSearchRequest>>,
    move_replies: RefCell<VecDeque<ApiResult<MoveTaskResponse>>>,
    deferred_moves: RefCell<HashMap<TaskId, oneshot::Receiver<ApiResult<MoveTaskResponse>>>>,
    reorder_replies: RefCell<VecDeque<ApiResult<()>>>,
    search_replies: RefCell<VecDeque<ApiResult<SemanticSearchResponse>>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply_move(&self, reply: ApiResult<MoveTaskResponse>) {
        self.move_replies.borrow_mut().push_back(reply);
    }

    /// Hold the reply for `task` until the returned sender fires
    pub fn defer_move(&self, task: &str) -> Reply<MoveTaskResponse> {
        let (tx, rx) = oneshot::channel();
        self.deferred_moves.borrow_mut().insert(TaskId::new(task), rx);
        tx
    }

    pub fn reply_reorder(&self, reply: ApiResult<()>) {
        self.reorder_replies.borrow_mut().push_back(reply);
    }

    pub fn reply_search(&self, reply: ApiResult<SemanticSearchResponse>) {
        self.search_replies.borrow_mut().push_back(reply);
    }

    pub fn request_count(&self) -> usize {
        self.moves.borrow().len() + self.reorders.borrow().len() + self.searches.borrow().len()
    }
}

#[async_trait(?Send)]
impl BoardApi for FakeApi {
    async fn move_task(&self, request: &MoveTaskRequest) -> ApiResult<MoveTaskResponse> {
        self.moves.borrow_mut().push(request.clone());
        let deferred = self.deferred_moves.borrow_mut().remove(&request.task_id);
        match deferred {
            Some(rx) => settle(rx).await,
            None => self.move_replies.borrow_mut().pop_front().unwrap_or_else(|| Ok(MoveTaskResponse::default())),
        }
    }

    async fn reorder_columns(&self, request: &ReorderColumnsRequest) -> ApiResult<()> {
        self.reorders.borrow_mut().push(request.clone());
        self.reorder_replies.borrow_mut().pop_front().unwrap_or(Ok(()))
    }

    async fn search_tasks(&self, request: &SemanticSearchRequest) -> ApiResult<SemanticSearchResponse> {
        self.searches.borrow_mut().push(request.clone());
        self.search_replies
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Ok(SemanticSearchResponse::empty()))
    }
}

/// Records what the reconciler asked the page to show
#[derive(Default)]
pub struct RecordingView {
    pub renders: RefCell<Vec<Board>>,
    pub notices: RefCell<Vec<(NotificationLevel, String)>>,
    pub moved: RefCell<Vec<(TaskMove, bool)>>,
}

impl RecordingView {
    pub fn last_render(&self) -> Option<Board> {
        self.renders.borrow().last().cloned()
    }

    pub fn levels(&self) -> Vec<NotificationLevel> {
        self.notices.borrow().iter().map(|(level, _)| *level).collect()
    }
}

impl BoardView for RecordingView {
    fn render(&self, board: &Board) {
        self.renders.borrow_mut().push(board.clone());
    }

    fn notify(&self, level: NotificationLevel, message: String) {
        self.notices.borrow_mut().push((level, message));
    }

    fn task_moved(&self, mv: &TaskMove, confirmed: bool) {
        self.moved.borrow_mut().push((mv.clone(), confirmed));
    }
}
