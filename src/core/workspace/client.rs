//! HTTP client for the workspace API

use super::error::ApiError;
use super::remote::TaskRemote;
use crate::config::WorkspaceConfig;
use crate::core::models::{ReferenceConfig, Task, TaskChanges, TaskPayload};
use crate::utils::error::{Result, TasklaneError};
use async_trait::async_trait;
use reqwest::{Method, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;
use uuid::Uuid;

/// reqwest-backed implementation of [`TaskRemote`]
///
/// Cheap to clone; the underlying connection pool is shared.
#[derive(Debug, Clone)]
pub struct WorkspaceClient {
    client: reqwest::Client,
    base_url: String,
    api_token: String,
}

impl WorkspaceClient {
    /// Build a client from workspace configuration
    pub fn new(config: &WorkspaceConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| TasklaneError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_token: config.api_token.clone(),
        })
    }

    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        self.client
            .request(method, format!("{}{}", self.base_url, path))
            .bearer_auth(&self.api_token)
            .header("x-request-id", Uuid::new_v4().to_string())
    }

    async fn parse_response<T: DeserializeOwned>(
        response: reqwest::Response,
        resource: &str,
    ) -> std::result::Result<T, ApiError> {
        let status = response.status();
        if !status.is_success() {
            return Err(Self::error_from_response(status, response, resource).await);
        }

        response.json::<T>().await.map_err(|e| ApiError::Payload {
            message: e.to_string(),
        })
    }

    async fn error_from_response(
        status: StatusCode,
        response: reqwest::Response,
        resource: &str,
    ) -> ApiError {
        let retry_after = response
            .headers()
            .get("retry-after")
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.parse::<u64>().ok());

        let message = response
            .text()
            .await
            .ok()
            .and_then(|body| extract_error_message(&body))
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string()
            });

        debug!(status = status.as_u16(), %message, "workspace request failed");

        match status.as_u16() {
            401 | 403 => ApiError::Authentication { message },
            404 => ApiError::NotFound {
                resource: resource.to_string(),
            },
            429 => ApiError::RateLimit {
                message,
                retry_after,
            },
            400 | 422 => ApiError::InvalidRequest { message },
            code => ApiError::Upstream {
                status: code,
                message,
            },
        }
    }
}

#[async_trait]
impl TaskRemote for WorkspaceClient {
    async fn create_task(&self, payload: &TaskPayload) -> std::result::Result<Task, ApiError> {
        let response = self
            .request(Method::POST, "/tasks")
            .json(payload)
            .send()
            .await
            .map_err(ApiError::from_reqwest)?;

        Self::parse_response(response, "task").await
    }

    async fn update_task(
        &self,
        id: &str,
        changes: &TaskChanges,
    ) -> std::result::Result<Task, ApiError> {
        let response = self
            .request(Method::PATCH, &format!("/tasks/{}", id))
            .json(changes)
            .send()
            .await
            .map_err(ApiError::from_reqwest)?;

        Self::parse_response(response, "task").await
    }

    async fn delete_task(&self, id: &str) -> std::result::Result<(), ApiError> {
        let response = self
            .request(Method::DELETE, &format!("/tasks/{}", id))
            .send()
            .await
            .map_err(ApiError::from_reqwest)?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(Self::error_from_response(status, response, "task").await)
        }
    }

    async fn fetch_task(&self, id: &str) -> std::result::Result<Task, ApiError> {
        let response = self
            .request(Method::GET, &format!("/tasks/{}", id))
            .send()
            .await
            .map_err(ApiError::from_reqwest)?;

        Self::parse_response(response, "task").await
    }

    async fn fetch_reference_config(&self) -> std::result::Result<ReferenceConfig, ApiError> {
        let response = self
            .request(Method::GET, "/config")
            .send()
            .await
            .map_err(ApiError::from_reqwest)?;

        Self::parse_response(response, "reference configuration").await
    }
}

/// Pull a message out of a JSON error body, accepting both
/// `{"error": {"message": ...}}` and `{"message": ...}` shapes.
fn extract_error_message(body: &str) -> Option<String> {
    #[derive(Deserialize)]
    struct ErrorDetail {
        message: String,
    }

    #[derive(Deserialize)]
    struct ErrorBody {
        error: Option<ErrorDetail>,
        message: Option<String>,
    }

    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    parsed.error.map(|e| e.message).or(parsed.message)
}
