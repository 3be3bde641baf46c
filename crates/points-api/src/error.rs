//! Error Mapping
//!
//! Core errors surface to callers as the standard envelope with the status
//! as the code. Internal detail stays in server-side logs only.

use crate::models::Envelope;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use points_core::{DirectoryError, ResolveError};

/// Boundary error taxonomy.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Duplicate unique key (merchant name)
    #[error("{0}")]
    Conflict(String),
    /// Credential missing, unknown, inactive, or expired
    #[error("invalid or expired api key")]
    Unauthorized,
    /// Referenced entity does not exist
    #[error("{0} not found")]
    NotFound(&'static str),
    /// Merchant registered but namespace provisioning incomplete
    #[error("tenant not ready")]
    NotReady,
    /// Storage or infrastructure failure
    #[error("internal error")]
    Internal(String),
}

impl From<DirectoryError> for ApiError {
    fn from(err: DirectoryError) -> Self {
        match err {
            DirectoryError::DuplicateName(name) => {
                Self::Conflict(format!("merchant already exists: {name}"))
            }
            DirectoryError::MerchantNotFound => Self::NotFound("merchant"),
        }
    }
}

impl From<ResolveError> for ApiError {
    fn from(err: ResolveError) -> Self {
        match err {
            ResolveError::Unauthorized => Self::Unauthorized,
            ResolveError::NotReady => Self::NotReady,
        }
    }
}

impl ApiError {
    /// Status and caller-visible message. Internal detail is logged here and
    /// never reaches the message.
    fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            ApiError::Conflict(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "invalid or expired api key".to_string(),
            ),
            ApiError::NotFound(what) => (StatusCode::NOT_FOUND, format!("{what} not found")),
            ApiError::NotReady => (StatusCode::SERVICE_UNAVAILABLE, "tenant not ready".to_string()),
            ApiError::Internal(detail) => {
                tracing::error!(detail = %detail, "internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal error".to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();
        (status, Json(Envelope::error(status, &message))).into_response()
    }
}
