//! HTTP analyzer over the service's REST API.
//!
//! Talks to the `/api/v1/analyze` endpoint: JSON `{"text": ...}` in,
//! an analysis payload out. Service errors arrive as a JSON body with
//! an `error` (application exceptions) or `detail` (framework
//! exceptions) field.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::time::timeout;
use tracing::debug;

use super::{Analyzer, ServiceError, GENERIC_SERVICE_ERROR};
use crate::domain::AnalysisResult;

/// Request body for the analyze endpoint
#[derive(Debug, Serialize)]
struct AnalyzeRequest<'a> {
    text: &'a str,
}

/// Error payload from the service
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
    detail: Option<String>,
}

impl ErrorBody {
    fn message(self) -> Option<String> {
        self.error.or(self.detail)
    }
}

/// Analysis service client
pub struct HttpAnalyzer {
    /// Service base URL, without trailing slash
    base_url: String,
    /// HTTP client
    client: reqwest::Client,
}

impl HttpAnalyzer {
    /// Create a client for the service at `base_url`
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    /// Build an endpoint URL
    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn post_analyze(&self, text: &str) -> Result<AnalysisResult, ServiceError> {
        let url = self.endpoint("/api/v1/analyze");
        debug!(%url, text_len = text.len(), "submitting text for analysis");

        let response = self
            .client
            .post(&url)
            .json(&AnalyzeRequest { text })
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(ErrorBody::message)
                .unwrap_or_else(|| GENERIC_SERVICE_ERROR.to_string());
            return Err(ServiceError::Service { message });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl Analyzer for HttpAnalyzer {
    fn name(&self) -> &str {
        "http"
    }

    async fn analyze(
        &self,
        text: &str,
        call_timeout: Duration,
    ) -> Result<AnalysisResult, ServiceError> {
        timeout(call_timeout, self.post_analyze(text))
            .await
            .map_err(|_| ServiceError::Timeout {
                seconds: call_timeout.as_secs(),
            })?
    }

    async fn health_check(&self) -> Result<(), ServiceError> {
        let response = self.client.get(self.endpoint("/health")).send().await?;

        if !response.status().is_success() {
            return Err(ServiceError::Service {
                message: format!("health check returned {}", response.status()),
            });
        }

        Ok(())
    }
}
