use std::sync::LazyLock;

use apex_common::error::ApexError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use regex::Regex;
use serde::Serialize;

use crate::envelope::now_timestamp;
use crate::request_id;

const PHI_PATTERNS: &[&str] = &[
    // SSN, dashed
    r"\b\d{3}-\d{2}-\d{4}\b",
    // SSN, nine bare digits
    r"\b\d{9}\b",
    // MM/DD/YYYY
    r"\b\d{2}/\d{2}/\d{4}\b",
    // YYYY-MM-DD
    r"\b\d{4}-\d{2}-\d{2}\b",
    r"(?i)\b[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,}\b",
];

static PHI_REGEXES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    PHI_PATTERNS
        .iter()
        .filter_map(|p| Regex::new(p).ok())
        .collect()
});

/// Replace anything that looks like PHI with `[REDACTED]`.
pub fn redact_phi(message: &str) -> String {
    let mut redacted = message.to_string();
    for re in PHI_REGEXES.iter() {
        redacted = re.replace_all(&redacted, "[REDACTED]").into_owned();
    }
    redacted
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    code: &'static str,
    message: String,
    #[serde(rename = "requestId", skip_serializing_if = "Option::is_none")]
    request_id: Option<String>,
    timestamp: String,
}

#[derive(Debug, Serialize)]
struct ErrorEnvelope {
    success: bool,
    error: ErrorBody,
}

pub struct ApiError(pub ApexError);

impl From<ApexError> for ApiError {
    fn from(err: ApexError) -> Self {
        Self(err)
    }
}

impl ApiError {
    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Self(ApexError::Unauthorized(msg.into()))
    }

    fn parts(&self) -> (StatusCode, &'static str, String) {
        match &self.0 {
            ApexError::Database(_) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "DATABASE_UNAVAILABLE",
                "Database temporarily unavailable. Please try again.".to_string(),
            ),
            ApexError::Unauthorized(msg) => {
                (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
            }
            ApexError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
            }
            ApexError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            ApexError::Config(_) | ApexError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An unexpected error occurred. Please try again later.".to_string(),
            ),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();
        let message = redact_phi(&message);
        let request_id = request_id::current();

        // server errors log the underlying cause; clients only see the generic text
        if status.is_server_error() {
            tracing::error!(
                status = status.as_u16(),
                code,
                request_id = request_id.as_deref(),
                error = %redact_phi(&self.0.to_string()),
                "request failed"
            );
        } else {
            tracing::warn!(
                status = status.as_u16(),
                code,
                request_id = request_id.as_deref(),
                message = %message,
                "request failed"
            );
        }

        let body = ErrorEnvelope {
            success: false,
            error: ErrorBody {
                code,
                message,
                request_id,
                timestamp: now_timestamp(),
            },
        };
        (status, Json(body)).into_response()
    }
}
