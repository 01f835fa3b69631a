//! Draft/request lifecycle.
//!
//! Orchestrates the remote calls behind every user intent on a calculation
//! request and returns plain outcome values; applying them to UI state is the
//! job of [`super::state::RequestsState`].
//!
//! ```text
//! (none) --add category--> DRAFT --submit--> FORMED --approve--> COMPLETED
//!                            |                  \----reject---> REJECTED
//!                            \--last item removed--> DELETED
//! ```

use std::rc::Rc;

use chrono::NaiveDate;
use contracts::domain::a002_calculate_cpi::{
    CalculationRequest, DraftInfo, InvalidSpend, RequestListQuery, UpdateLineItemBody,
};
use contracts::enums::RequestStatus;
use thiserror::Error;

use super::api::HttpCpiService;
use super::notifier::HttpNotifier;
use super::service::{CpiService, LocalSpawner, SubmitNotifier, TaskSpawner};
use crate::shared::api_error::ApiError;
use crate::shared::config::AppConfig;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LifecycleError {
    #[error(transparent)]
    InvalidAmount(#[from] InvalidSpend),

    #[error(transparent)]
    Api(#[from] ApiError),
}

impl LifecycleError {
    /// Message for the user: validation text, the backend's message, or `fallback`
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            LifecycleError::InvalidAmount(e) => e.to_string(),
            LifecycleError::Api(e) => e.user_message(fallback),
        }
    }
}

/// Current draft pointer together with the full draft
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DraftSnapshot {
    pub info: Option<DraftInfo>,
    pub draft: Option<CalculationRequest>,
}

/// What a line-item removal ended up deleting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Removed {
    Item,
    /// The last item of a draft was removed, so the draft went with it
    Request,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RemovalOutcome {
    pub request_id: i64,
    pub deleted: Removed,
    pub remaining_draft: Option<CalculationRequest>,
    pub info: Option<DraftInfo>,
}

pub struct CpiLifecycle<S, N, T> {
    service: S,
    notifier: Rc<N>,
    spawner: T,
}

/// Lifecycle wired to the REST backend
pub type HttpCpiLifecycle = CpiLifecycle<HttpCpiService, HttpNotifier, LocalSpawner>;

impl HttpCpiLifecycle {
    pub fn from_config(config: &AppConfig) -> Self {
        CpiLifecycle::new(
            HttpCpiService::new(&config.api.base_url),
            HttpNotifier::new(config.notifier.clone()),
            LocalSpawner,
        )
    }
}

impl<S, N, T> CpiLifecycle<S, N, T>
where
    S: CpiService,
    N: SubmitNotifier + 'static,
    T: TaskSpawner,
{
    pub fn new(service: S, notifier: N, spawner: T) -> Self {
        Self {
            service,
            notifier: Rc::new(notifier),
            spawner,
        }
    }

    /// Fetch the draft pointer and, if a draft exists, the draft itself.
    /// Never fails: any error means "no draft".
    pub async fn load_draft(&self) -> DraftSnapshot {
        match self.try_load_draft().await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                log::warn!("Failed to load draft, treating as absent: {}", e);
                DraftSnapshot::default()
            }
        }
    }

    async fn try_load_draft(&self) -> Result<DraftSnapshot, ApiError> {
        let Some(info) = self.service.draft_info().await? else {
            return Ok(DraftSnapshot::default());
        };
        let Some(draft_id) = info.existing_draft_id() else {
            return Ok(DraftSnapshot::default());
        };
        let draft = self.service.get_request(draft_id).await?;
        Ok(DraftSnapshot {
            info: Some(info),
            draft: Some(draft),
        })
    }

    /// Attach a category to the draft (created server-side if absent) and resync
    pub async fn add_category(&self, category_id: i64) -> Result<DraftSnapshot, LifecycleError> {
        self.service.add_category_to_draft(category_id).await?;
        log::info!("Category {} added to draft", category_id);
        Ok(self.load_draft().await)
    }

    /// Change the spend of one line item and return the updated parent request
    pub async fn update_line_item_amount(
        &self,
        request_id: i64,
        category_id: i64,
        amount: f64,
    ) -> Result<CalculationRequest, LifecycleError> {
        let body = UpdateLineItemBody::new(amount)?;
        let update = self
            .service
            .update_line_item(request_id, category_id, body)
            .await?;

        match update.into_parent() {
            Some(parent) => Ok(parent),
            None => {
                log::debug!(
                    "Update of request {} carried no parent, refetching",
                    request_id
                );
                Ok(self.service.get_request(request_id).await?)
            }
        }
    }

    /// Remove a line item; removing the last item of a draft deletes the draft
    pub async fn remove_line_item(
        &self,
        request_id: i64,
        category_id: i64,
    ) -> Result<RemovalOutcome, LifecycleError> {
        let current = match self.service.get_request(request_id).await {
            Ok(request) => Some(request),
            Err(e) => {
                log::warn!("Failed to load request {} before removal: {}", request_id, e);
                None
            }
        };
        let empties_draft = current
            .as_ref()
            .map_or(false, CalculationRequest::removal_empties_draft);

        self.service.remove_line_item(request_id, category_id).await?;

        if empties_draft {
            match self.service.delete_request(request_id).await {
                Ok(()) => {
                    log::info!("Draft {} deleted because its last category was removed", request_id);
                    return Ok(RemovalOutcome {
                        request_id,
                        deleted: Removed::Request,
                        remaining_draft: None,
                        info: None,
                    });
                }
                Err(e) => log::error!("Failed to delete empty draft {}: {}", request_id, e),
            }
        }

        let info = match self.service.draft_info().await {
            Ok(info) => info,
            Err(e) => {
                log::info!("Draft info not found after deletion, draft may be empty: {}", e);
                None
            }
        };

        let remaining_draft = match info.and_then(|i| i.existing_draft_id()) {
            Some(draft_id) => match self.service.get_request(draft_id).await {
                Ok(draft) => Some(draft),
                Err(e) => {
                    log::error!("Failed to load draft {} after deletion: {}", draft_id, e);
                    None
                }
            },
            None => None,
        };

        Ok(RemovalOutcome {
            request_id,
            deleted: Removed::Item,
            remaining_draft,
            info,
        })
    }

    /// Remove every listed category in order, skipping failures.
    /// Returns the outcome of the last successful removal.
    pub async fn clear_draft(
        &self,
        request_id: i64,
        category_ids: &[i64],
    ) -> Option<RemovalOutcome> {
        let mut last = None;
        for &category_id in category_ids {
            match self.remove_line_item(request_id, category_id).await {
                Ok(outcome) => last = Some(outcome),
                Err(e) => log::error!("Failed to delete category {}: {}", category_id, e),
            }
        }
        last
    }

    /// DRAFT -> FORMED. The notification service is told in the background;
    /// its outcome never affects the result.
    pub async fn submit(&self, draft_id: i64) -> Result<CalculationRequest, LifecycleError> {
        let formed = self.service.form_draft(draft_id).await?;
        log::info!("Draft {} formed", draft_id);
        if let Some(id) = formed.id {
            self.dispatch_notification(id);
        }
        Ok(formed)
    }

    fn dispatch_notification(&self, request_id: i64) {
        let notifier = Rc::clone(&self.notifier);
        self.spawner.spawn_detached(Box::pin(async move {
            match notifier.notify_formed(request_id).await {
                Ok(()) => log::info!("Async service called for request {}", request_id),
                Err(e) => log::error!(
                    "Failed to call async service for request {}: {}",
                    request_id,
                    e
                ),
            }
        }));
    }

    /// FORMED -> COMPLETED (approve) or REJECTED
    pub async fn moderate(
        &self,
        request_id: i64,
        approve: bool,
    ) -> Result<CalculationRequest, LifecycleError> {
        let updated = self.service.moderate(request_id, approve).await?;
        let expected = RequestStatus::moderation_outcome(approve);
        if updated.status != expected {
            log::warn!(
                "Request {} moderated to {} but backend reports {}",
                request_id,
                expected,
                updated.status
            );
        }
        Ok(updated)
    }

    pub async fn load_request(&self, request_id: i64) -> Result<CalculationRequest, LifecycleError> {
        Ok(self.service.get_request(request_id).await?)
    }

    /// Set or clear the comparison date of a request
    pub async fn update_comparison_date(
        &self,
        request: &CalculationRequest,
        request_id: i64,
        date: Option<NaiveDate>,
    ) -> Result<CalculationRequest, LifecycleError> {
        let mut body = request.clone();
        body.comparison_date = date;
        Ok(self.service.update_request(request_id, &body).await?)
    }

    /// Requests visible to the user, filtered and ordered for the list view
    /// Every request visible to the user; period and status are filtered
    /// on the client
    pub async fn list_requests(&self) -> Result<Vec<CalculationRequest>, LifecycleError> {
        let requests = self
            .service
            .list_requests(&RequestListQuery::default())
            .await?;
        Ok(requests)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! In-memory doubles for the lifecycle seams.

    use super::*;
    use async_trait::async_trait;
    use contracts::domain::a002_calculate_cpi::LineItemUpdate;
    use futures::future::LocalBoxFuture;
    use std::cell::RefCell;
    use std::collections::{HashMap, VecDeque};

    #[derive(Debug, Clone, PartialEq)]
    pub enum Call {
        DraftInfo,
        GetRequest(i64),
        AddCategory(i64),
        UpdateLineItem(i64, i64, f64),
        RemoveLineItem(i64, i64),
        DeleteRequest(i64),
        UpdateRequest(i64),
        FormDraft(i64),
        Moderate(i64, bool),
        ListRequests(RequestListQuery),
    }

    #[derive(Default)]
    pub struct MockService {
        pub calls: RefCell<Vec<Call>>,
        /// Successive draft-info answers; an empty queue means "no draft"
        pub draft_infos: RefCell<VecDeque<Result<Option<DraftInfo>, ApiError>>>,
        pub requests: RefCell<HashMap<i64, CalculationRequest>>,
        pub get_errors: RefCell<HashMap<i64, ApiError>>,
        pub update_response: RefCell<Option<LineItemUpdate>>,
        pub fail_add: RefCell<Option<ApiError>>,
        pub fail_remove: RefCell<Option<ApiError>>,
        pub fail_delete: RefCell<Option<ApiError>>,
        pub fail_form: RefCell<Option<ApiError>>,
        pub list: RefCell<Vec<CalculationRequest>>,
    }

    impl MockService {
        pub fn record(&self, call: Call) {
            self.calls.borrow_mut().push(call);
        }

        pub fn calls(&self) -> Vec<Call> {
            self.calls.borrow().clone()
        }

        pub fn with_request(self, request: CalculationRequest) -> Self {
            let id = request.id.expect("fixture needs an id");
            self.requests.borrow_mut().insert(id, request);
            self
        }

        pub fn with_draft_info(self, info: Result<Option<DraftInfo>, ApiError>) -> Self {
            self.draft_infos.borrow_mut().push_back(info);
            self
        }

        fn take(slot: &RefCell<Option<ApiError>>) -> Result<(), ApiError> {
            match slot.borrow_mut().take() {
                Some(e) => Err(e),
                None => Ok(()),
            }
        }
    }

    #[async_trait(?Send)]
    impl CpiService for Rc<MockService> {
        async fn draft_info(&self) -> Result<Option<DraftInfo>, ApiError> {
            self.record(Call::DraftInfo);
            self.draft_infos.borrow_mut().pop_front().unwrap_or(Ok(None))
        }

        async fn get_request(&self, id: i64) -> Result<CalculationRequest, ApiError> {
            self.record(Call::GetRequest(id));
            if let Some(e) = self.get_errors.borrow().get(&id) {
                return Err(e.clone());
            }
            self.requests
                .borrow()
                .get(&id)
                .cloned()
                .ok_or(ApiError::Status {
                    status: 404,
                    message: None,
                })
        }

        async fn add_category_to_draft(&self, category_id: i64) -> Result<(), ApiError> {
            self.record(Call::AddCategory(category_id));
            MockService::take(&self.fail_add)
        }

        async fn update_line_item(
            &self,
            request_id: i64,
            category_id: i64,
            body: UpdateLineItemBody,
        ) -> Result<LineItemUpdate, ApiError> {
            self.record(Call::UpdateLineItem(request_id, category_id, body.user_spent));
            Ok(self
                .update_response
                .borrow_mut()
                .take()
                .unwrap_or_else(|| LineItemUpdate::Envelope(Default::default())))
        }

        async fn remove_line_item(&self, request_id: i64, category_id: i64) -> Result<(), ApiError> {
            self.record(Call::RemoveLineItem(request_id, category_id));
            MockService::take(&self.fail_remove)
        }

        async fn delete_request(&self, id: i64) -> Result<(), ApiError> {
            self.record(Call::DeleteRequest(id));
            MockService::take(&self.fail_delete)
        }

        async fn update_request(
            &self,
            id: i64,
            request: &CalculationRequest,
        ) -> Result<CalculationRequest, ApiError> {
            self.record(Call::UpdateRequest(id));
            self.requests.borrow_mut().insert(id, request.clone());
            Ok(request.clone())
        }

        async fn form_draft(&self, id: i64) -> Result<CalculationRequest, ApiError> {
            self.record(Call::FormDraft(id));
            MockService::take(&self.fail_form)?;
            let mut request = self.requests.borrow().get(&id).cloned().ok_or(ApiError::Status {
                status: 404,
                message: None,
            })?;
            request.status = RequestStatus::Formed;
            Ok(request)
        }

        async fn moderate(&self, id: i64, approve: bool) -> Result<CalculationRequest, ApiError> {
            self.record(Call::Moderate(id, approve));
            let mut request = self.requests.borrow().get(&id).cloned().ok_or(ApiError::Status {
                status: 404,
                message: None,
            })?;
            request.status = RequestStatus::moderation_outcome(approve);
            Ok(request)
        }

        async fn list_requests(
            &self,
            query: &RequestListQuery,
        ) -> Result<Vec<CalculationRequest>, ApiError> {
            self.record(Call::ListRequests(query.clone()));
            Ok(self.list.borrow().clone())
        }
    }

    /// Notifier that records ids and answers with a fixed result
    pub struct MockNotifier {
        pub notified: Rc<RefCell<Vec<i64>>>,
        pub result: Result<(), ApiError>,
    }

    #[async_trait(?Send)]
    impl SubmitNotifier for MockNotifier {
        async fn notify_formed(&self, request_id: i64) -> Result<(), ApiError> {
            self.notified.borrow_mut().push(request_id);
            self.result.clone()
        }
    }

    /// Spawner that parks tasks until the test decides to run them
    #[derive(Clone, Default)]
    pub struct QueueSpawner {
        pub queue: Rc<RefCell<Vec<LocalBoxFuture<'static, ()>>>>,
    }

    impl QueueSpawner {
        pub fn pending(&self) -> usize {
            self.queue.borrow().len()
        }

        pub fn run_all(&self) {
            let tasks: Vec<_> = self.queue.borrow_mut().drain(..).collect();
            for task in tasks {
                futures::executor::block_on(task);
            }
        }
    }

    impl TaskSpawner for QueueSpawner {
        fn spawn_detached(&self, task: LocalBoxFuture<'static, ()>) {
            self.queue.borrow_mut().push(task);
        }
    }
}
