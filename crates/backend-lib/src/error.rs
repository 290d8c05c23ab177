// ============================
// crates/backend-lib/src/error.rs
// ============================
//! Central error type + Axum integration.
//!
//! The access-control components themselves return plain values; only the
//! HTTP handlers construct these errors when translating decisions into
//! protocol responses.
use axum::{
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::validation::ValidationError;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("authentication required")]
    Unauthorized,

    #[error("rate limit exceeded")]
    RateLimited { remaining: u32, reset_at_millis: u64 },

    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidCredentials | AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Json(_) | AppError::Io(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Message suitable for a response body. Credential failures are
    /// deliberately uniform: the body never reveals which check failed.
    pub fn public_message(&self) -> String {
        match self {
            AppError::InvalidCredentials => "Invalid credentials".to_string(),
            AppError::Unauthorized => "Authentication required".to_string(),
            AppError::RateLimited { .. } => {
                "Too many requests, please try again later".to_string()
            }
            AppError::Validation(e) => e.to_string(),
            AppError::Json(_) | AppError::Io(_) | AppError::Internal(_) => {
                "An internal server error occurred".to_string()
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let mut body = serde_json::json!({
            "error": { "message": self.public_message() }
        });

        // A denied rate-limit check is a normal decision outcome: give the
        // client enough structure to back off intelligently.
        if let AppError::RateLimited {
            remaining,
            reset_at_millis,
        } = &self
        {
            body["remaining"] = serde_json::json!(remaining);
            body["reset_at_millis"] = serde_json::json!(reset_at_millis);
        }

        let mut response = (status, axum::Json(body)).into_response();
        if let AppError::RateLimited {
            remaining,
            reset_at_millis,
        } = self
        {
            let headers = response.headers_mut();
            headers.insert("x-ratelimit-remaining", HeaderValue::from(remaining));
            headers.insert("x-ratelimit-reset", HeaderValue::from(reset_at_millis));
        }
        response
    }
}

impl From<String> for AppError {
    fn from(msg: String) -> Self {
        AppError::Internal(msg)
    }
}

impl From<&str> for AppError {
    fn from(msg: &str) -> Self {
        AppError::Internal(msg.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes() {
        assert_eq!(
            AppError::InvalidCredentials.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::Unauthorized.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::RateLimited {
                remaining: 0,
                reset_at_millis: 0
            }
            .status_code(),
            StatusCode::TOO_MANY_REQUESTS
        );
        assert_eq!(
            AppError::Internal("boom".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn credential_failures_share_one_message() {
        // wrong password and malformed token must be indistinguishable
        assert_eq!(
            AppError::InvalidCredentials.public_message(),
            "Invalid credentials"
        );
        assert!(!AppError::Internal("secret detail".to_string())
            .public_message()
            .contains("secret detail"));
    }

    #[test]
    fn rate_limited_response_carries_backoff_headers() {
        let response = AppError::RateLimited {
            remaining: 0,
            reset_at_millis: 1_700_000_000_000,
        }
        .into_response();

        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(
            response.headers().get("x-ratelimit-remaining").unwrap(),
            "0"
        );
        assert_eq!(
            response.headers().get("x-ratelimit-reset").unwrap(),
            "1700000000000"
        );
    }

    #[test]
    fn from_impls() {
        let app_err: AppError = "boom".into();
        assert!(matches!(app_err, AppError::Internal(_)));

        let json_err: serde_json::Error =
            serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let app_err: AppError = json_err.into();
        assert!(matches!(app_err, AppError::Json(_)));
    }
}
