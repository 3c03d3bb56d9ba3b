//! Error taxonomy for calls to the remote service.
//!
//! Transport failures, non-success statuses and the service's business-rule
//! rejections are kept apart so views can react to each differently.

use serde::Deserialize;
use thiserror::Error;

/// `errorCode` the service uses for business-rule rejections
/// (e.g. voting on one's own movie).
pub const BUSINESS_RULE_CODE: i32 = 306;

/// Errors that can occur while talking to the service.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Failed to build the underlying HTTP client
    #[error("HTTP client error: {0}")]
    Client(String),

    /// Failed to reach the service or read its response
    #[error("Request failed: {source}")]
    Transport {
        #[source]
        source: reqwest::Error,
    },

    /// Request exceeded the configured timeout
    #[error("Request timed out")]
    Timeout,

    /// Response body did not have the expected shape
    #[error("Unexpected response body: {0}")]
    Decode(String),

    /// Server-enforced constraint violation (errorCode 306)
    #[error("{description}")]
    BusinessRule { code: i32, description: String },

    /// Any other non-success response
    #[error("Server returned {status}: {message}")]
    Status {
        status: u16,
        code: Option<i32>,
        message: String,
    },
}

/// Error body produced by the service's exception handler.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    #[serde(default)]
    pub error_code: Option<i32>,
    #[serde(default)]
    pub error_description: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub validation_errors: Option<Vec<String>>,
}

impl ErrorBody {
    /// Best human-readable message the body carries.
    pub fn message(&self) -> Option<String> {
        if let Some(description) = self.error_description.as_ref().filter(|d| !d.is_empty()) {
            return Some(description.clone());
        }
        if let Some(errors) = self.validation_errors.as_ref().filter(|e| !e.is_empty()) {
            let mut errors = errors.clone();
            errors.sort();
            return Some(errors.join("; "));
        }
        self.error.clone().filter(|e| !e.is_empty())
    }
}

impl ApiError {
    pub(crate) fn from_transport(source: reqwest::Error) -> Self {
        if source.is_timeout() {
            ApiError::Timeout
        } else {
            ApiError::Transport { source }
        }
    }

    /// Classify a non-success response from its status and raw body.
    pub fn from_response(status: u16, body: &[u8]) -> Self {
        let parsed: ErrorBody = serde_json::from_slice(body).unwrap_or_default();

        if parsed.error_code == Some(BUSINESS_RULE_CODE) {
            return ApiError::BusinessRule {
                code: BUSINESS_RULE_CODE,
                description: parsed.message().unwrap_or_default(),
            };
        }

        ApiError::Status {
            status,
            code: parsed.error_code,
            message: parsed.message().unwrap_or_else(|| format!("HTTP {}", status)),
        }
    }

    pub fn is_business_rule(&self) -> bool {
        matches!(self, ApiError::BusinessRule { .. })
    }

    /// Whether the service rejected the credential.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Status { status: 401 | 403, .. })
    }

    /// Message suitable for showing to a user.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::BusinessRule { description, .. } => description.clone(),
            ApiError::Status { message, .. } => message.clone(),
            ApiError::Transport { .. } | ApiError::Timeout => {
                "Could not reach the server. Please try again later.".to_string()
            }
            ApiError::Decode(_) | ApiError::Client(_) => "An error occurred".to_string(),
        }
    }
}
