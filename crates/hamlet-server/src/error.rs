//! Server-specific error types
//!
//! Every handler returns `Result<_, AppError>`; this module is the single place
//! where failures are turned into HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use std::sync::atomic::{AtomicBool, Ordering};
use thiserror::Error;

use crate::api::response::ErrorResponse;
use crate::features::shared::error_helpers::{check_constraint_violation, ConstraintViolation};
use crate::features::shared::validation::ValidationErrors;

static EXPOSE_INTERNAL_DETAILS: AtomicBool = AtomicBool::new(false);

/// Include a `stack` field with the error's debug rendering in 5xx bodies.
///
/// Set once at startup; enabled outside production.
pub fn set_expose_internal_details(enabled: bool) {
    EXPOSE_INTERNAL_DETAILS.store(enabled, Ordering::Relaxed);
}

fn expose_internal_details() -> bool {
    EXPOSE_INTERNAL_DETAILS.load(Ordering::Relaxed)
}

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(ValidationErrors),
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation(errors)
    }
}

impl AppError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    fn internal_body(&self, error: &str, message: &str) -> ErrorResponse {
        let body = ErrorResponse::new(error, message);
        if expose_internal_details() {
            body.with_stack(format!("{:?}", self))
        } else {
            body
        }
    }

    fn database_response(self) -> (StatusCode, ErrorResponse) {
        let AppError::Database(err) = self else {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse::new("Internal Server Error", "Unexpected error"),
            );
        };

        if matches!(err, sqlx::Error::RowNotFound) {
            return (
                StatusCode::NOT_FOUND,
                ErrorResponse::new("Not Found", "The requested record was not found"),
            );
        }

        let constraint = match &err {
            sqlx::Error::Database(db_err) => db_err.constraint().map(str::to_string),
            _ => None,
        };

        match check_constraint_violation(err) {
            ConstraintViolation::UniqueViolation => {
                tracing::warn!(?constraint, "Unique constraint violated");
                let body = ErrorResponse::new(
                    "Conflict",
                    "A record with this unique field already exists",
                );
                let body = match constraint {
                    Some(field) => body.with_field(field),
                    None => body,
                };
                (StatusCode::CONFLICT, body)
            },
            ConstraintViolation::ForeignKeyViolation => {
                tracing::warn!(?constraint, "Foreign key constraint violated");
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse::new("Bad Request", "Foreign key constraint failed"),
                )
            },
            ConstraintViolation::Other(e) => {
                tracing::error!("Database error: {:?}", e);
                let wrapped = AppError::Database(e);
                let body = wrapped.internal_body("Database Error", "A database error occurred");
                (StatusCode::INTERNAL_SERVER_ERROR, body)
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::Database(_) => self.database_response(),
            AppError::NotFound(ref message) => {
                (StatusCode::NOT_FOUND, ErrorResponse::new("Not Found", message.clone()))
            },
            AppError::Validation(ref errors) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::new("Validation Error", "Invalid query parameters")
                    .with_details(errors.fields().to_vec()),
            ),
        };

        (status, Json(body)).into_response()
    }
}
