//! API error handling
//!
//! Every failure leaves the server as a JSON body `{error, code}`; internal
//! failures only carry `details` when exposure is switched on (development
//! environment or debug mode).

use std::sync::atomic::{AtomicBool, Ordering};

use application::ApplicationError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

static EXPOSE_INTERNAL_ERRORS: AtomicBool = AtomicBool::new(false);

/// Configure whether internal error details are included in responses
pub fn set_expose_internal_errors(expose: bool) {
    EXPOSE_INTERNAL_ERRORS.store(expose, Ordering::SeqCst);
}

fn should_expose_details() -> bool {
    EXPOSE_INTERNAL_ERRORS.load(Ordering::SeqCst)
}

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "error": "Date not found. Please enter a start date",
    "code": "not_found"
}))]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Machine-readable error code
    pub code: String,
    /// Internal failure details (debug mode only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = match self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg, None),
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg, None),
            Self::Internal(msg) => {
                tracing::error!(error = %msg, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                    should_expose_details().then_some(msg),
                )
            },
        };

        let body = ErrorResponse {
            error: message,
            code: code.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

impl From<ApplicationError> for ApiError {
    fn from(err: ApplicationError) -> Self {
        match err {
            ApplicationError::Domain(e) => Self::BadRequest(e.to_string()),
            ApplicationError::NotFound(msg) => Self::NotFound(msg),
            ApplicationError::Internal(msg) => Self::Internal(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::body::to_bytes;

    use super::*;

    async fn body_of(err: ApiError) -> (StatusCode, ErrorResponse) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[test]
    fn api_error_messages() {
        assert_eq!(
            ApiError::NotFound("resource".to_string()).to_string(),
            "Not found: resource"
        );
        assert_eq!(
            ApiError::Internal("unexpected".to_string()).to_string(),
            "Internal error: unexpected"
        );
    }

    #[tokio::test]
    async fn not_found_keeps_message() {
        let (status, body) =
            body_of(ApiError::NotFound("Date not found. Please enter a start date".into())).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body.code, "not_found");
        assert_eq!(body.error, "Date not found. Please enter a start date");
        assert!(body.details.is_none());
    }

    #[tokio::test]
    async fn bad_request_status() {
        let (status, body) = body_of(ApiError::BadRequest("invalid".into())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.code, "bad_request");
    }

    #[tokio::test]
    async fn internal_error_details_follow_exposure_flag() {
        set_expose_internal_errors(false);
        let (status, hidden) = body_of(ApiError::Internal("disk I/O error".into())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(hidden.error, "An internal error occurred");
        assert!(hidden.details.is_none());

        set_expose_internal_errors(true);
        let (_, shown) = body_of(ApiError::Internal("disk I/O error".into())).await;
        assert_eq!(shown.details.as_deref(), Some("disk I/O error"));
        set_expose_internal_errors(false);
    }

    #[test]
    fn error_response_omits_empty_details() {
        let resp = ErrorResponse {
            error: "Not found".to_string(),
            code: "not_found".to_string(),
            details: None,
        };
        let json = serde_json::to_string(&resp).unwrap();
        assert_eq!(json, r#"{"error":"Not found","code":"not_found"}"#);
    }

    #[test]
    fn application_not_found_converts_to_not_found() {
        let err: ApiError = ApplicationError::NotFound("gone".to_string()).into();
        assert!(matches!(err, ApiError::NotFound(msg) if msg == "gone"));
    }

    #[test]
    fn application_domain_error_converts_to_bad_request() {
        let source = ApplicationError::Domain(domain::DomainError::ValidationError("x".into()));
        assert!(matches!(ApiError::from(source), ApiError::BadRequest(_)));
    }

    #[test]
    fn application_internal_converts_to_internal() {
        let internal: ApiError = ApplicationError::Internal("crash".to_string()).into();
        assert!(matches!(internal, ApiError::Internal(msg) if msg == "crash"));
    }
}
