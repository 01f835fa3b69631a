//! Seams between the lifecycle manager and the outside world.

use async_trait::async_trait;
use contracts::domain::a002_calculate_cpi::{
    CalculationRequest, DraftInfo, LineItemUpdate, RequestListQuery, UpdateLineItemBody,
};
use futures::future::LocalBoxFuture;

use crate::shared::api_error::ApiError;

/// Remote CPI service (REST backend)
#[async_trait(?Send)]
pub trait CpiService {
    /// Current draft pointer; `None` when the user has no draft
    async fn draft_info(&self) -> Result<Option<DraftInfo>, ApiError>;

    async fn get_request(&self, id: i64) -> Result<CalculationRequest, ApiError>;

    /// Attach a category to the user's draft, creating the draft if needed
    async fn add_category_to_draft(&self, category_id: i64) -> Result<(), ApiError>;

    async fn update_line_item(
        &self,
        request_id: i64,
        category_id: i64,
        body: UpdateLineItemBody,
    ) -> Result<LineItemUpdate, ApiError>;

    async fn remove_line_item(&self, request_id: i64, category_id: i64) -> Result<(), ApiError>;

    async fn delete_request(&self, id: i64) -> Result<(), ApiError>;

    async fn update_request(
        &self,
        id: i64,
        request: &CalculationRequest,
    ) -> Result<CalculationRequest, ApiError>;

    /// DRAFT -> FORMED
    async fn form_draft(&self, id: i64) -> Result<CalculationRequest, ApiError>;

    /// FORMED -> COMPLETED (approve) or REJECTED
    async fn moderate(&self, id: i64, approve: bool) -> Result<CalculationRequest, ApiError>;

    async fn list_requests(
        &self,
        query: &RequestListQuery,
    ) -> Result<Vec<CalculationRequest>, ApiError>;
}

/// Side-channel notified after a draft is formed
#[async_trait(?Send)]
pub trait SubmitNotifier {
    async fn notify_formed(&self, request_id: i64) -> Result<(), ApiError>;
}

/// Runs tasks that nobody awaits
pub trait TaskSpawner {
    fn spawn_detached(&self, task: LocalBoxFuture<'static, ()>);
}

/// Spawns onto the browser's microtask queue
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalSpawner;

impl TaskSpawner for LocalSpawner {
    fn spawn_detached(&self, task: LocalBoxFuture<'static, ()>) {
        wasm_bindgen_futures::spawn_local(task);
    }
}
