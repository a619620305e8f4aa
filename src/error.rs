// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent API responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Authentication required")]
    Unauthorized,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Missing required fields: {0}")]
    Validation(String),

    /// The provider answered but gave nothing usable.
    #[error("No valid response from the model: {0}")]
    NoCompletion(String),

    /// The provider could not be reached or returned an error status.
    #[error("Completion API error: {0}")]
    CompletionApi(String),

    #[error("Identity provider error: {0}")]
    Identity(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = match &self {
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "Authentication required".to_string(),
                None,
            ),
            AppError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                "Invalid email or password".to_string(),
                Some("Please check your credentials and try again".to_string()),
            ),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone(), None),
            AppError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                "Invalid request".to_string(),
                Some(msg.clone()),
            ),
            AppError::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                "Missing required fields".to_string(),
                Some(msg.clone()),
            ),
            AppError::NoCompletion(msg) => {
                tracing::warn!(reason = %msg, "Completion provider returned no usable choice");
                (
                    StatusCode::BAD_REQUEST,
                    "No valid response from the model".to_string(),
                    None,
                )
            }
            AppError::CompletionApi(msg) => {
                tracing::error!(error = %msg, "Completion API call failed");
                (
                    StatusCode::BAD_GATEWAY,
                    "Error occurred during API call".to_string(),
                    None,
                )
            }
            AppError::Identity(msg) => (StatusCode::BAD_REQUEST, msg.clone(), None),
            AppError::Database(msg) => {
                tracing::error!(error = %msg, "Database error");
                (StatusCode::INTERNAL_SERVER_ERROR, msg.clone(), None)
            }
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                    None,
                )
            }
        };

        let body = ErrorResponse { error, details };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;
