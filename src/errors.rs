//! Error type shared by every layer, and its HTTP rendering.
//!
//! Every variant renders as a 4xx with `{"error": {"code", "message"}}`.
//! Storage and internal failures are logged in full but reach the client
//! only as `400 OPERATION_FAILED` / "Operation failed".

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::config::OPERATION_FAILED_MESSAGE;

#[derive(Error, Debug)]
pub enum AppError {
    /// No bearer token on a protected route
    #[error("Missing bearer token")]
    Unauthorized,

    /// Unknown login and wrong password share this variant.
    #[error("Invalid login or password")]
    InvalidCredentials,

    /// Also used for todos owned by someone else.
    #[error("Todo not found")]
    NotFound,

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Database(#[from] sea_orm::DbErr),

    /// Token failed signature or expiry checks
    #[error(transparent)]
    Jwt(#[from] jsonwebtoken::errors::Error),

    #[error("{0}")]
    Internal(String),
}

pub type AppResult<T> = Result<T, AppError>;

#[derive(Serialize)]
struct ErrorEnvelope<'a> {
    error: ErrorDetail<'a>,
}

#[derive(Serialize)]
struct ErrorDetail<'a> {
    code: &'static str,
    message: &'a str,
}

impl AppError {
    pub fn conflict(message: impl Into<String>) -> Self {
        AppError::Conflict(message.into())
    }

    pub fn validation(message: impl Into<String>) -> Self {
        AppError::Validation(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        AppError::Internal(message.into())
    }

    /// Machine-readable code placed in the response body.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Unauthorized => "UNAUTHORIZED",
            AppError::InvalidCredentials => "INVALID_CREDENTIALS",
            AppError::Jwt(_) => "AUTH_ERROR",
            AppError::NotFound => "NOT_FOUND",
            AppError::Conflict(_) => "CONFLICT",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::Database(_) | AppError::Internal(_) => "OPERATION_FAILED",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Unauthorized | AppError::InvalidCredentials | AppError::Jwt(_) => {
                StatusCode::UNAUTHORIZED
            }
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Validation(_) | AppError::Database(_) | AppError::Internal(_) => {
                StatusCode::BAD_REQUEST
            }
        }
    }

    /// Text safe to show the client.
    fn public_message(&self) -> String {
        match self {
            AppError::Database(_) | AppError::Internal(_) => OPERATION_FAILED_MESSAGE.to_string(),
            AppError::Jwt(_) => "Invalid or expired token".to_string(),
            other => other.to_string(),
        }
    }

    fn log(&self) {
        match self {
            AppError::Database(e) => tracing::error!(error = ?e, "Storage operation failed"),
            AppError::Internal(msg) => tracing::error!("Internal failure: {}", msg),
            AppError::Jwt(e) => tracing::debug!("Token rejected: {}", e),
            _ => {}
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.log();

        let message = self.public_message();
        let body = ErrorEnvelope {
            error: ErrorDetail {
                code: self.code(),
                message: &message,
            },
        };

        (self.status(), Json(body)).into_response()
    }
}

pub trait OptionExt<T> {
    /// `None` becomes `AppError::NotFound`.
    fn ok_or_not_found(self) -> AppResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_not_found(self) -> AppResult<T> {
        self.ok_or(AppError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(error: AppError) -> (StatusCode, serde_json::Value) {
        let response = error.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[test]
    fn test_no_variant_maps_to_server_error() {
        let errors = [
            AppError::Unauthorized,
            AppError::InvalidCredentials,
            AppError::NotFound,
            AppError::conflict("Login is already taken"),
            AppError::validation("Name must be between 1 and 255 characters"),
            AppError::Database(sea_orm::DbErr::Custom("boom".to_string())),
            AppError::internal("boom"),
        ];

        for error in errors {
            assert!(error.status().is_client_error(), "{:?}", error);
        }
    }

    #[tokio::test]
    async fn test_storage_failure_hides_detail() {
        let error = AppError::Database(sea_orm::DbErr::Custom(
            "relation \"todos\" does not exist".to_string(),
        ));

        let (status, body) = body_json(error).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "OPERATION_FAILED");
        assert_eq!(body["error"]["message"], OPERATION_FAILED_MESSAGE);
    }

    #[tokio::test]
    async fn test_conflict_body() {
        let (status, body) = body_json(AppError::conflict("Login is already taken")).await;

        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"]["code"], "CONFLICT");
        assert_eq!(body["error"]["message"], "Login is already taken");
    }

    #[test]
    fn test_ok_or_not_found() {
        let missing: Option<i32> = None;
        assert!(matches!(missing.ok_or_not_found(), Err(AppError::NotFound)));
        assert_eq!(Some(7).ok_or_not_found().unwrap(), 7);
    }
}
