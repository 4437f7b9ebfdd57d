//! Error types for the salary lookup service
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Message returned to clients for any failure past request validation.
pub const GENERIC_FAILURE_MESSAGE: &str =
    "An unexpected error occurred while fetching salary data";

// == Salary Error Enum ==
/// Unified error type for the salary lookup service.
#[derive(Error, Debug)]
pub enum SalaryError {
    /// Upstream base URL or headers are absent or unusable
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Transport failure or non-success status from the upstream provider
    #[error("Upstream request failed{}: {message}", status_suffix(.status))]
    UpstreamTransport {
        status: Option<u16>,
        message: String,
    },

    /// Upstream payload did not have the expected shape
    #[error("Malformed upstream response: {0}")]
    MalformedResponse(String),

    /// Company or job title lookup returned zero results
    #[error("{0}")]
    NoMatch(String),

    /// Invalid request data
    #[error("{0}")]
    InvalidRequest(String),

    /// Unknown route or method
    #[error("API Not Found")]
    NotFound,

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

fn status_suffix(status: &Option<u16>) -> String {
    status
        .map(|s| format!(" with status {}", s))
        .unwrap_or_default()
}

impl SalaryError {
    /// Builds a "no company found" failure for the given search text.
    pub fn no_company(name: &str) -> Self {
        SalaryError::NoMatch(format!("No company found for '{}'", name))
    }

    /// Builds a "no job titles found" failure for the given search text.
    pub fn no_job_title(title: &str) -> Self {
        SalaryError::NoMatch(format!("No job titles found for '{}'", title))
    }
}

impl From<reqwest::Error> for SalaryError {
    fn from(err: reqwest::Error) -> Self {
        SalaryError::UpstreamTransport {
            status: err.status().map(|s| s.as_u16()),
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for SalaryError {
    fn from(err: serde_json::Error) -> Self {
        SalaryError::MalformedResponse(err.to_string())
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for SalaryError {
    fn into_response(self) -> Response {
        match self {
            SalaryError::InvalidRequest(msg) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "error": msg }))).into_response()
            }
            SalaryError::NotFound => (
                StatusCode::NOT_FOUND,
                Json(json!({
                    "error": "NOT FOUND",
                    "message": "API Not Found"
                })),
            )
                .into_response(),
            other => {
                let request_id = uuid::Uuid::new_v4().to_string();
                // Detail stays in the operator log; the client only gets the request id.
                error!(request_id = %request_id, error = ?other, "Request failed: {}", other);

                let body = Json(json!({
                    "error": "Internal Server Error",
                    "message": GENERIC_FAILURE_MESSAGE,
                    "requestId": request_id,
                    "timestamp": chrono::Utc::now().to_rfc3339(),
                }));

                (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
            }
        }
    }
}

// == Result Type Alias ==
/// Convenience Result type for the salary lookup service.
pub type Result<T> = std::result::Result<T, SalaryError>;
