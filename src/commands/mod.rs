//! Server API Bindings
//!
//! Frontend bindings to the board's REST endpoints, organized by domain.
//! Every call goes through [`HttpClient::request`], which attaches the
//! CSRF token and maps transport failures into [`ApiError`].

mod board;
mod insights;
mod search;

use std::rc::Rc;

use async_trait::async_trait;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

pub use board::*;
pub use insights::*;
pub use search::*;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),
    #[error("server responded with status {0}")]
    Status(u16),
    #[error("could not read server response: {0}")]
    Decode(String),
    #[error("{0}")]
    Rejected(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Endpoints the reconciliation and search flows depend on
#[async_trait(?Send)]
pub trait BoardApi {
    async fn move_task(&self, request: &MoveTaskRequest) -> ApiResult<MoveTaskResponse>;

    async fn reorder_columns(&self, request: &ReorderColumnsRequest) -> ApiResult<()>;

    async fn search_tasks(&self, request: &SemanticSearchRequest) -> ApiResult<SemanticSearchResponse>;
}

#[async_trait(?Send)]
impl<T: BoardApi + ?Sized> BoardApi for Rc<T> {
    async fn move_task(&self, request: &MoveTaskRequest) -> ApiResult<MoveTaskResponse> {
        (**self).move_task(request).await
    }

    async fn reorder_columns(&self, request: &ReorderColumnsRequest) -> ApiResult<()> {
        (**self).reorder_columns(request).await
    }

    async fn search_tasks(&self, request: &SemanticSearchRequest) -> ApiResult<SemanticSearchResponse> {
        (**self).search_tasks(request).await
    }
}

pub(crate) fn default_true() -> bool {
    true
}

/// Turn a `{success: false, error}` envelope into an error
pub(crate) fn ensure_success(success: bool, error: Option<String>) -> ApiResult<()> {
    if success {
        Ok(())
    } else {
        Err(ApiError::Rejected(error.unwrap_or_else(|| "The server rejected the request".to_string())))
    }
}

/// Thin JSON client over `reqwest` (fetch on wasm32)
#[derive(Clone, Debug)]
pub struct HttpClient {
    client: reqwest::Client,
    base_url: String,
    csrf_token: Option<String>,
}

impl HttpClient {
    pub fn new(base_url: impl Into<String>, csrf_token: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            csrf_token,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path.trim_start_matches('/'))
    }

    /// Single typed request helper used by every endpoint
    pub(crate) async fn request<B, T>(&self, method: Method, path: &str, body: Option<&B>) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(path);
        tracing::debug!("{} {}", method, url);

        let mut builder = self.client.request(method, &url).header("Accept", "application/json");
        if let Some(token) = &self.csrf_token {
            builder = builder.header("X-CSRFToken", token);
        }
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let resp = builder.send().await.map_err(|e| ApiError::Network(e.to_string()))?;
        let status = resp.status();
        if !status.is_success() {
            tracing::warn!("{} failed with status {}", url, status);
            return Err(ApiError::Status(status.as_u16()));
        }

        resp.json::<T>().await.map_err(|e| ApiError::Decode(e.to_string()))
    }

    pub(crate) async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(&self, path: &str, body: &B) -> ApiResult<T> {
        self.request(Method::POST, path, Some(body)).await
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        self.request::<(), T>(Method::GET, path, None).await
    }
}

#[async_trait(?Send)]
impl BoardApi for HttpClient {
    async fn move_task(&self, request: &MoveTaskRequest) -> ApiResult<MoveTaskResponse> {
        let response: MoveTaskResponse = self.post(MOVE_TASK_PATH, request).await?;
        ensure_success(response.success, response.error.clone())?;
        Ok(response)
    }

    async fn reorder_columns(&self, request: &ReorderColumnsRequest) -> ApiResult<()> {
        let ack: Ack = self.post(REORDER_COLUMNS_PATH, request).await?;
        ensure_success(ack.success, ack.error)
    }

    async fn search_tasks(&self, request: &SemanticSearchRequest) -> ApiResult<SemanticSearchResponse> {
        let response: SemanticSearchResponse = self.post(SEMANTIC_SEARCH_PATH, request).await?;
        ensure_success(response.success, response.error.clone())?;
        Ok(response)
    }
}
