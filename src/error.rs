//! Error types for the order service.
//!
//! `RepositoryError` is what storage backends report. `ApiError` is the
//! HTTP-facing taxonomy; only it knows about status codes.

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::error;

use crate::models::ErrorResponse;

/// Content type of every response that carries a body.
pub const JSON_CONTENT_TYPE: &str = "application/json;charset=UTF-8";

const INVALID_INPUT_MESSAGE: &str =
    "Invalid request body, orderId / total / postalCode / town fields cannot be empty.";
const MISSING_NAMESPACE_MESSAGE: &str = "No namespace provided.";
const INTERNAL_MESSAGE: &str = "Internal error.";

/// Failures reported by an [`OrderRepository`](crate::repository::OrderRepository).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("order {0} already exists")]
    DuplicateKey(String),

    #[error("repository lock poisoned during {0}")]
    LockPoisoned(&'static str),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Errors returned by route handlers, rendered as `{status, message}` bodies.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid request body")]
    InvalidInput,

    #[error("missing path parameter: {0}")]
    MissingParameter(&'static str),

    #[error("order {0} already exists")]
    Conflict(String),

    #[error("internal error")]
    Internal,
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidInput | Self::MissingParameter(_) => StatusCode::BAD_REQUEST,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client-facing message. Internal failures never expose their cause.
    pub fn message(&self) -> String {
        match self {
            Self::InvalidInput => INVALID_INPUT_MESSAGE.to_string(),
            Self::MissingParameter(_) => MISSING_NAMESPACE_MESSAGE.to_string(),
            Self::Conflict(order_id) => format!("Order {} already exists.", order_id),
            Self::Internal => INTERNAL_MESSAGE.to_string(),
        }
    }

    /// Log a repository failure and collapse it into an API error.
    ///
    /// Only `DuplicateKey` survives as its own kind.
    pub fn from_repository(context: &str, err: RepositoryError) -> Self {
        match err {
            RepositoryError::DuplicateKey(order_id) => Self::Conflict(order_id),
            other => {
                error!("{}: {}", context, other);
                Self::Internal
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            status: status.as_u16(),
            message: self.message(),
        };

        match serde_json::to_vec(&body) {
            Ok(bytes) => {
                (status, [(header::CONTENT_TYPE, JSON_CONTENT_TYPE)], bytes).into_response()
            }
            Err(e) => {
                error!("Error sending response: {}", e);
                status.into_response()
            }
        }
    }
}
