//! Adapter interfaces for the analysis service.
//!
//! The service is an opaque asynchronous capability: text in, an
//! [`AnalysisResult`](crate::domain::AnalysisResult) or an error out.
//! The trait keeps the state machine testable against mocks.

pub mod http;

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::AnalysisResult;

// Re-export the HTTP analyzer
pub use http::HttpAnalyzer;

/// Fallback shown when the service gives no usable error message
pub const GENERIC_SERVICE_ERROR: &str = "Failed to analyze text. Please try again later.";

/// Errors from the analysis service call
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("analysis timed out after {seconds}s")]
    Timeout { seconds: u64 },

    #[error("{message}")]
    Service { message: String },

    #[error("invalid response from service: {0}")]
    InvalidResponse(#[from] serde_json::Error),
}

impl ServiceError {
    /// Message surfaced to the user in the `Failed` state.
    ///
    /// Service-provided text is passed through verbatim; transport and
    /// decode failures collapse to a generic retryable message.
    pub fn user_message(&self) -> String {
        match self {
            ServiceError::Service { message } => message.clone(),
            ServiceError::Timeout { .. } => self.to_string(),
            ServiceError::Http(_) | ServiceError::InvalidResponse(_) => {
                GENERIC_SERVICE_ERROR.to_string()
            }
        }
    }
}

/// Trait for analysis service backends
#[async_trait]
pub trait Analyzer: Send + Sync {
    /// Human-readable analyzer name
    fn name(&self) -> &str;

    /// Analyze text, settling within the timeout
    async fn analyze(&self, text: &str, timeout: Duration) -> Result<AnalysisResult, ServiceError>;

    /// Health check against the service
    async fn health_check(&self) -> Result<(), ServiceError>;
}
