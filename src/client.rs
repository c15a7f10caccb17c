//! HTTP client for the tracker API.
//!
//! [`ApiClient`] wraps the four application endpoints (plus stats). Every
//! non-success response becomes a [`ClientError`] carrying the server's body
//! text; callers only see the message, never the status code. Each call is one
//! round trip with no retries or caching.

use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;

use crate::models::application::{
    Application, CreateApplicationRequest, UpdateApplicationRequest,
};
use crate::services::stats::{filter_by_status, ApplicationStats, StatusFilter};

pub const DEFAULT_BASE_URL: &str = "http://localhost:4000/api";

const FALLBACK_MESSAGE: &str = "Request failed";

/// The single failure kind surfaced to callers, for both transport failures
/// and non-2xx responses.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ClientError {
    pub message: String,
}

impl ClientError {
    fn new(message: impl Into<String>) -> Self {
        let message = message.into();
        if message.is_empty() {
            Self { message: FALLBACK_MESSAGE.to_string() }
        } else {
            Self { message }
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(error: reqwest::Error) -> Self {
        ClientError::new(error.to_string())
    }
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn get_applications(&self) -> Result<Vec<Application>, ClientError> {
        let response = self.http.get(self.url("/applications")).send().await?;
        Ok(handle_response(response).await?.unwrap_or_default())
    }

    /// Lists everything and narrows locally; the server never filters.
    pub async fn list_filtered(&self, filter: StatusFilter) -> Result<Vec<Application>, ClientError> {
        let applications = self.get_applications().await?;
        Ok(filter_by_status(&applications, filter))
    }

    pub async fn create_application(
        &self,
        application: &CreateApplicationRequest,
    ) -> Result<Application, ClientError> {
        let response = self
            .http
            .post(self.url("/applications"))
            .json(application)
            .send()
            .await?;
        expect_body(handle_response(response).await?)
    }

    pub async fn update_application(
        &self,
        id: i64,
        updates: &UpdateApplicationRequest,
    ) -> Result<Application, ClientError> {
        let response = self
            .http
            .put(self.url(&format!("/applications/{}", id)))
            .json(updates)
            .send()
            .await?;
        expect_body(handle_response(response).await?)
    }

    pub async fn delete_application(&self, id: i64) -> Result<(), ClientError> {
        let response = self
            .http
            .delete(self.url(&format!("/applications/{}", id)))
            .send()
            .await?;
        handle_response::<serde_json::Value>(response).await?;
        Ok(())
    }

    pub async fn stats(&self) -> Result<ApplicationStats, ClientError> {
        let response = self.http.get(self.url("/stats")).send().await?;
        expect_body(handle_response(response).await?)
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

async fn handle_response<T: DeserializeOwned>(response: Response) -> Result<Option<T>, ClientError> {
    let status = response.status();
    if !status.is_success() {
        let message = response.text().await.unwrap_or_default();
        tracing::debug!(status = status.as_u16(), "API request failed");
        return Err(ClientError::new(message));
    }
    if status == StatusCode::NO_CONTENT {
        return Ok(None);
    }

    let bytes = response.bytes().await?;
    if bytes.is_empty() {
        return Ok(None);
    }
    serde_json::from_slice(&bytes)
        .map(Some)
        .map_err(|e| ClientError::new(format!("Invalid response body: {}", e)))
}

fn expect_body<T>(body: Option<T>) -> Result<T, ClientError> {
    body.ok_or_else(|| ClientError::new("Empty response body"))
}
