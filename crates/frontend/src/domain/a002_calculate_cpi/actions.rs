//! Store actions: run a lifecycle operation and fold its outcome into
//! [`RequestsState`](super::state::RequestsState).
//!
//! Mutations return `Err(message)` for the view and leave the state untouched
//! apart from the loading/error flags.

use chrono::NaiveDate;
use leptos::prelude::Update;
use contracts::domain::a002_calculate_cpi::CalculationRequest;

use super::lifecycle::{LifecycleError, Removed};
use crate::layout::global_context::AppStore;

fn failed(store: AppStore, error: LifecycleError, fallback: &str) -> String {
    let message = error.user_message(fallback);
    log::error!("{}: {}", fallback, error);
    store.requests.update(|r| r.fail(message.clone()));
    message
}

pub async fn load_draft(store: AppStore) {
    store.requests.update(|r| r.begin());
    let snapshot = store.lifecycle().load_draft().await;
    store.requests.update(|r| r.apply_draft(snapshot));
}

pub async fn add_category(store: AppStore, category_id: i64) -> Result<(), String> {
    store.requests.update(|r| r.begin());
    match store.lifecycle().add_category(category_id).await {
        Ok(snapshot) => {
            store.requests.update(|r| r.apply_draft(snapshot));
            Ok(())
        }
        Err(e) => Err(failed(store, e, "Не удалось добавить категорию")),
    }
}

/// Spend edits are frequent; they do not toggle the loading flag
pub async fn update_amount(
    store: AppStore,
    request_id: i64,
    category_id: i64,
    amount: f64,
) -> Result<(), String> {
    match store
        .lifecycle()
        .update_line_item_amount(request_id, category_id, amount)
        .await
    {
        Ok(updated) => {
            store.requests.update(|r| r.apply_updated(updated));
            Ok(())
        }
        Err(e) => {
            let message = e.user_message("Не удалось сохранить сумму расходов");
            log::error!("Failed to update spend for category {}: {}", category_id, e);
            Err(message)
        }
    }
}

pub async fn remove_line_item(
    store: AppStore,
    request_id: i64,
    category_id: i64,
) -> Result<Removed, String> {
    store.requests.update(|r| r.begin());
    match store.lifecycle().remove_line_item(request_id, category_id).await {
        Ok(outcome) => {
            let removed = outcome.deleted;
            store.requests.update(|r| r.apply_removal(outcome));
            Ok(removed)
        }
        Err(e) => Err(failed(store, e, "Не удалось удалить категорию")),
    }
}

pub async fn clear_draft(store: AppStore, request_id: i64, category_ids: Vec<i64>) {
    store.requests.update(|r| r.begin());
    let lifecycle = store.lifecycle();
    match lifecycle.clear_draft(request_id, &category_ids).await {
        Some(outcome) => store.requests.update(|r| r.apply_removal(outcome)),
        None => {
            // Nothing removed; resync from the backend
            let snapshot = lifecycle.load_draft().await;
            store.requests.update(|r| r.apply_draft(snapshot));
        }
    }
}

pub async fn submit(store: AppStore, draft_id: i64) -> Result<CalculationRequest, String> {
    store.requests.update(|r| r.begin());
    match store.lifecycle().submit(draft_id).await {
        Ok(formed) => {
            store.requests.update(|r| r.apply_submitted(formed.clone()));
            Ok(formed)
        }
        Err(e) => Err(failed(store, e, "Не удалось сформировать расчёт")),
    }
}

pub async fn moderate(store: AppStore, request_id: i64, approve: bool) -> Result<(), String> {
    store.requests.update(|r| r.begin());
    match store.lifecycle().moderate(request_id, approve).await {
        Ok(updated) => {
            store
                .requests
                .update(|r| r.apply_moderated(request_id, updated));
            Ok(())
        }
        Err(e) => Err(failed(store, e, "Не удалось одобрить/отклонить расчёт")),
    }
}

/// Read path: failure is reported through the error flag only
pub async fn load_request(store: AppStore, request_id: i64) {
    store.requests.update(|r| r.begin());
    match store.lifecycle().load_request(request_id).await {
        Ok(request) => store.requests.update(|r| r.apply_request(request)),
        Err(e) => {
            log::warn!("Failed to load request {}: {}", request_id, e);
            let message = e.user_message("Не удалось загрузить расчёт");
            store.requests.update(|r| r.fail_request(message));
        }
    }
}

pub async fn update_comparison_date(
    store: AppStore,
    request: CalculationRequest,
    request_id: i64,
    date: Option<NaiveDate>,
) -> Result<(), String> {
    let lifecycle = store.lifecycle();
    match lifecycle
        .update_comparison_date(&request, request_id, date)
        .await
    {
        Ok(_) => {
            if request.is_draft() {
                let snapshot = lifecycle.load_draft().await;
                store.requests.update(|r| r.apply_draft(snapshot));
            } else {
                load_request(store, request_id).await;
            }
            Ok(())
        }
        Err(e) => Err(failed(store, e, "Не удалось обновить дату сравнения")),
    }
}

pub async fn list_requests(store: AppStore) -> Result<Vec<CalculationRequest>, String> {
    store
        .lifecycle()
        .list_requests()
        .await
        .map_err(|e| {
            log::warn!("Failed to load requests: {}", e);
            e.user_message("Не удалось загрузить расчёты")
        })
}
