//! Mapping of domain failures onto HTTP responses
//!
//! Every failure body has the shape
//! `{"success": false, "error": "...", "code": "MACHINE_CODE", "details": "..."}`.

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::ToSchema;

use crate::domain::DomainError;

/// Error envelope returned by every failing endpoint
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub success: bool,
    pub error: String,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: &'static str,
    pub message: String,
    pub details: Option<String>,
}

impl ApiError {
    pub fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn bad_request(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, code, message)
    }

    pub fn unauthorized(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, code, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, "FORBIDDEN", message)
    }
}

impl From<DomainError> for ApiError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::Validation(msg) => {
                Self::bad_request("INVALID_INPUT", "Missing or invalid fields").with_details(msg)
            }
            DomainError::InvalidSlot(slot) => {
                Self::bad_request("INVALID_SLOT", "Invalid time slot").with_details(slot)
            }
            e @ DomainError::SlotTaken { .. } => {
                Self::bad_request("SLOT_TAKEN", "Slot already booked").with_details(e.to_string())
            }
            DomainError::InvalidCredentials => {
                Self::bad_request("INVALID_CREDENTIALS", "Invalid credentials")
            }
            DomainError::NotEligible(msg) => Self::bad_request("NOT_ELIGIBLE", msg),
            DomainError::AlreadyRegistered(_) => Self::bad_request(
                "ALREADY_REGISTERED",
                "Faculty already registered. Please login.",
            ),
            DomainError::Conflict(msg) => Self::new(StatusCode::CONFLICT, "CONFLICT", msg),
            DomainError::Forbidden(msg) => Self::forbidden(msg),
            DomainError::NotFound {
                entity,
                field,
                value,
            } => Self::new(StatusCode::NOT_FOUND, "NOT_FOUND", format!("{} not found", entity))
                .with_details(format!("{}={}", field, value)),
            DomainError::Timeout(op) => Self::new(
                StatusCode::SERVICE_UNAVAILABLE,
                "TIMEOUT",
                "Storage did not respond in time, please retry",
            )
            .with_details(op),
            DomainError::Storage(msg) => {
                error!(error = %msg, "Storage failure");
                Self::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "Internal server error",
                )
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let retryable = self.status == StatusCode::SERVICE_UNAVAILABLE;
        let body = Json(ErrorBody {
            success: false,
            error: self.message,
            code: self.code.to_string(),
            details: self.details,
        });

        if retryable {
            (self.status, [(header::RETRY_AFTER, "1")], body).into_response()
        } else {
            (self.status, body).into_response()
        }
    }
}
