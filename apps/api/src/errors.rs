use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::sheet::FillError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Template error: {0}")]
    Fill(#[from] FillError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Fill(e) => {
                tracing::error!("Template fill error: {e}");
                let (code, message) = match e {
                    FillError::TemplateNotFound { .. } => (
                        "TEMPLATE_NOT_FOUND",
                        "The character sheet template is unavailable",
                    ),
                    FillError::TemplateInvalid { .. } => (
                        "TEMPLATE_INVALID",
                        "The character sheet template could not be read",
                    ),
                    FillError::TemplateWriteError { .. } => (
                        "TEMPLATE_WRITE_ERROR",
                        "The filled character sheet could not be saved",
                    ),
                };
                (StatusCode::INTERNAL_SERVER_ERROR, code, message.to_string())
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
