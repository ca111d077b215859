// src/error.rs
use std::fmt;

use axum::{http::StatusCode, response::{IntoResponse, Response}, Json};
use serde_json::json;
use tracing::error;

use crate::repository::StoreError;

#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    ValidationError(String),
    Conflict(String),
    Internal(String),
}

impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::ValidationError(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        AppError::Conflict(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        AppError::NotFound(msg.into())
    }

    /// Maps a store failure, keeping uniqueness and reference violations
    /// client-facing and prefixing everything else with `context`.
    pub fn store(context: &str, err: StoreError) -> Self {
        match err {
            StoreError::Conflict(msg) => AppError::Conflict(msg),
            StoreError::MissingReference(msg) => AppError::ValidationError(msg),
            StoreError::Database(e) => {
                error!(error = %e, "{context}");
                AppError::Internal(format!("{context}, details = {e}"))
            }
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            // Duplicates are client-correctable, same class as bad input.
            AppError::ValidationError(_) | AppError::Conflict(_) => StatusCode::BAD_REQUEST,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Attaches the name of the operation that raised the error.
    pub fn at(self, source_function: &'static str) -> ApiError {
        ApiError {
            source_function,
            error: self,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::NotFound(msg)
            | AppError::ValidationError(msg)
            | AppError::Conflict(msg)
            | AppError::Internal(msg) => f.write_str(msg),
        }
    }
}

/// An [`AppError`] tagged with the operation it came from; this is what
/// handlers return.
#[derive(Debug)]
pub struct ApiError {
    pub source_function: &'static str,
    pub error: AppError,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "source_function": self.source_function,
            "err_message": self.error.to_string(),
        }));

        (self.error.status(), body).into_response()
    }
}

pub trait ResultExt<T> {
    fn at(self, source_function: &'static str) -> Result<T, ApiError>;
}

impl<T> ResultExt<T> for Result<T, AppError> {
    fn at(self, source_function: &'static str) -> Result<T, ApiError> {
        self.map_err(|e| e.at(source_function))
    }
}
