use async_trait::async_trait;
use contracts::domain::a002_calculate_cpi::{
    CalculationRequest, DraftInfo, LineItemUpdate, RequestListQuery, UpdateLineItemBody,
};
use gloo_net::http::Request;

use super::service::CpiService;
use crate::shared::api_error::ApiError;
use crate::shared::api_utils::{api_base, read_json, send, send_json};

/// REST implementation of [`CpiService`]
#[derive(Debug, Clone)]
pub struct HttpCpiService {
    base: String,
}

impl HttpCpiService {
    pub fn new(configured_base: &str) -> Self {
        Self {
            base: api_base(configured_base),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }
}

#[async_trait(?Send)]
impl CpiService for HttpCpiService {
    async fn draft_info(&self) -> Result<Option<DraftInfo>, ApiError> {
        match send(Request::get(&self.url("/api/calculate-cpi/draft-info"))).await {
            Ok(response) => {
                // The backend answers 200 with an empty body when there is no draft
                let body = response
                    .text()
                    .await
                    .map_err(|e| ApiError::Decode(e.to_string()))?;
                if body.trim().is_empty() {
                    return Ok(None);
                }
                let info: DraftInfo =
                    serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))?;
                Ok(info.existing_draft_id().map(|_| info))
            }
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn get_request(&self, id: i64) -> Result<CalculationRequest, ApiError> {
        let response = send(Request::get(&self.url(&format!("/api/calculate-cpi/{}", id)))).await?;
        read_json(response).await
    }

    async fn add_category_to_draft(&self, category_id: i64) -> Result<(), ApiError> {
        send(Request::post(
            &self.url(&format!("/api/categories/{}/draft", category_id)),
        ))
        .await?;
        Ok(())
    }

    async fn update_line_item(
        &self,
        request_id: i64,
        category_id: i64,
        body: UpdateLineItemBody,
    ) -> Result<LineItemUpdate, ApiError> {
        let url = self.url(&format!(
            "/api/calculate-cpi-categories/{}/category/{}",
            request_id, category_id
        ));
        let response = send_json(Request::put(&url), &body).await?;
        read_json(response).await
    }

    async fn remove_line_item(&self, request_id: i64, category_id: i64) -> Result<(), ApiError> {
        let url = self.url(&format!(
            "/api/calculate-cpi-categories/{}/category/{}",
            request_id, category_id
        ));
        send(Request::delete(&url)).await?;
        Ok(())
    }

    async fn delete_request(&self, id: i64) -> Result<(), ApiError> {
        send(Request::delete(&self.url(&format!("/api/calculate-cpi/{}", id)))).await?;
        Ok(())
    }

    async fn update_request(
        &self,
        id: i64,
        request: &CalculationRequest,
    ) -> Result<CalculationRequest, ApiError> {
        let url = self.url(&format!("/api/calculate-cpi/{}", id));
        let response = send_json(Request::put(&url), request).await?;
        read_json(response).await
    }

    async fn form_draft(&self, id: i64) -> Result<CalculationRequest, ApiError> {
        let url = self.url(&format!("/api/calculate-cpi/form/{}", id));
        let response = send(Request::put(&url)).await?;
        read_json(response).await
    }

    async fn moderate(&self, id: i64, approve: bool) -> Result<CalculationRequest, ApiError> {
        let url = self.url(&format!(
            "/api/calculate-cpi/deny-complete/{}?approve={}",
            id, approve
        ));
        let response = send(Request::put(&url)).await?;
        read_json(response).await
    }

    async fn list_requests(
        &self,
        query: &RequestListQuery,
    ) -> Result<Vec<CalculationRequest>, ApiError> {
        let qs = serde_qs::to_string(query)
            .map_err(|e| ApiError::Decode(format!("Failed to encode query: {}", e)))?;
        let url = if qs.is_empty() {
            self.url("/api/calculate-cpi")
        } else {
            self.url(&format!("/api/calculate-cpi?{}", qs))
        };
        let response = send(Request::get(&url)).await?;
        read_json(response).await
    }
}
