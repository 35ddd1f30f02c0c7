use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use food_core::{
    FieldErrors,
    payloads::{ErrorEnvelope, ValidationEnvelope},
};
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Food not found")]
    NotFound,

    #[error("Validation failed")]
    Validation(FieldErrors),

    #[error("Storage error: {0}")]
    Storage(#[from] sqlx::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::NotFound => (
                StatusCode::NOT_FOUND,
                Json(ErrorEnvelope {
                    error: "Food not found".to_string(),
                }),
            )
                .into_response(),

            AppError::Validation(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ValidationEnvelope { errors }),
            )
                .into_response(),

            AppError::Storage(e) => {
                error!("Storage error: {e}");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal error").into_response()
            }
        }
    }
}
