//! Notification of the asynchronous calculation service.
//!
//! After a draft is formed the external service is told which request to
//! process. The call is best-effort: it has its own timeout and its errors
//! are only logged by the caller.

use async_trait::async_trait;
use futures::future::{select, Either};
use gloo_net::http::Request;
use gloo_timers::future::TimeoutFuture;
use serde::Serialize;

use super::service::SubmitNotifier;
use crate::shared::api_error::ApiError;
use crate::shared::config::NotifierConfig;

#[derive(Debug, Clone, Serialize, PartialEq)]
struct NotifyPayload<'a> {
    pk: i64,
    token: &'a str,
}

#[derive(Debug, Clone)]
pub struct HttpNotifier {
    config: NotifierConfig,
}

impl HttpNotifier {
    pub fn new(config: NotifierConfig) -> Self {
        Self { config }
    }

    async fn post(&self, request_id: i64) -> Result<(), ApiError> {
        let payload = NotifyPayload {
            pk: request_id,
            token: &self.config.token,
        };
        let response = Request::post(&self.config.url)
            .json(&payload)
            .map_err(|e| ApiError::Decode(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        if !response.ok() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::from_status(status, &body));
        }
        Ok(())
    }
}

#[async_trait(?Send)]
impl SubmitNotifier for HttpNotifier {
    async fn notify_formed(&self, request_id: i64) -> Result<(), ApiError> {
        let timeout_ms = self.config.timeout_ms;
        let call = Box::pin(self.post(request_id));
        let timer = Box::pin(TimeoutFuture::new(timeout_ms));
        match select(call, timer).await {
            Either::Left((result, _)) => result,
            Either::Right(_) => Err(ApiError::Timeout(timeout_ms)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_shape() {
        let payload = NotifyPayload {
            pk: 42,
            token: "lab8token",
        };
        assert_eq!(
            serde_json::to_string(&payload).unwrap(),
            r#"{"pk":42,"token":"lab8token"}"#
        );
    }
}
