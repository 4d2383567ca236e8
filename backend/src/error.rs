//! Error handling for the AgriTrade Management Platform
//!
//! Every error carries enough context (entity, id, field) for the caller
//! to render a user message. Nothing is retried: failures come from
//! invalid input or business-rule conflicts, not transient faults.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    /// An invariant on a single field was violated before any write
    #[error("Validation error on {entity}.{field}: {message}")]
    Validation {
        entity: &'static str,
        field: &'static str,
        message: String,
    },

    /// A delete was blocked by existing child records (protect semantics)
    #[error("{entity} {id} is referenced by {child_count} {child_entity} record(s)")]
    ReferentialIntegrity {
        entity: &'static str,
        id: Uuid,
        child_entity: &'static str,
        child_count: i64,
    },

    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: Uuid },

    // Database errors
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    // Internal errors
    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

/// Result alias used throughout the backend
pub type AppResult<T> = Result<T, AppError>;

/// Error response structure
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, entity, field, id) = match &self {
            AppError::Validation { entity, field, .. } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "VALIDATION_ERROR",
                Some(entity.to_string()),
                Some(field.to_string()),
                None,
            ),
            AppError::ReferentialIntegrity { entity, id, .. } => (
                StatusCode::CONFLICT,
                "REFERENTIAL_INTEGRITY_ERROR",
                Some(entity.to_string()),
                None,
                Some(*id),
            ),
            AppError::NotFound { entity, id } => (
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                Some(entity.to_string()),
                None,
                Some(*id),
            ),
            AppError::Database(err) => {
                tracing::error!("Database error: {err}");
                (StatusCode::INTERNAL_SERVER_ERROR, "DATABASE_ERROR", None, None, None)
            }
            AppError::Internal(err) => {
                tracing::error!("Internal error: {err}");
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", None, None, None)
            }
        };

        let body = ErrorResponse {
            error: ErrorDetail {
                code: code.to_string(),
                message: self.to_string(),
                entity,
                field,
                id,
            },
        };

        (status, Json(body)).into_response()
    }
}
