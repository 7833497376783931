//! Application error types and their HTTP mapping.
//!
//! Every failure ends the request. The body carries a machine-stable `error`
//! reason and a short message; the underlying cause is logged, never echoed.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

/// Application-level errors.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    #[error("Account already exists")]
    DuplicateAccount,

    #[error("Invalid email or password")]
    InvalidCredential,

    #[error("Missing token")]
    MissingToken,

    #[error("Invalid signing method")]
    InvalidSigningMethod,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Not found")]
    NotFound,

    #[error("Store error: {0}")]
    Store(#[from] sqlx::Error),

    #[error("Hashing failure: {0}")]
    HashingFailure(String),

    #[error("Signing failure: {0}")]
    SigningFailure(String),

    #[error("Operation timed out")]
    Timeout,

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Short reason exposed to clients.
    pub fn reason(&self) -> &'static str {
        match self {
            AppError::MalformedInput(_) => "MalformedInput",
            AppError::DuplicateAccount => "DuplicateAccount",
            AppError::InvalidCredential => "InvalidCredential",
            AppError::MissingToken => "MissingToken",
            // Signing method and signature/expiry failures look the same from outside.
            AppError::InvalidSigningMethod | AppError::InvalidToken(_) => "InvalidToken",
            AppError::Unauthorized => "Unauthorized",
            AppError::NotFound => "NotFound",
            AppError::Store(_) => "StoreError",
            AppError::HashingFailure(_) => "HashingFailure",
            AppError::SigningFailure(_) => "SigningFailure",
            AppError::Timeout => "Timeout",
            AppError::Internal(_) => "InternalError",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MalformedInput(_) | AppError::DuplicateAccount => StatusCode::BAD_REQUEST,
            AppError::InvalidCredential | AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::MissingToken
            | AppError::InvalidSigningMethod
            | AppError::InvalidToken(_)
            | AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Timeout => StatusCode::GATEWAY_TIMEOUT,
            AppError::Store(_)
            | AppError::HashingFailure(_)
            | AppError::SigningFailure(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn public_message(&self) -> String {
        match self {
            AppError::MalformedInput(msg) => msg.clone(),
            AppError::DuplicateAccount => "user already exists".to_string(),
            AppError::InvalidCredential => "invalid credentials".to_string(),
            AppError::MissingToken => "missing token".to_string(),
            AppError::InvalidSigningMethod | AppError::InvalidToken(_) => {
                "invalid token".to_string()
            }
            AppError::Unauthorized => "unauthorized".to_string(),
            AppError::NotFound => "user not found".to_string(),
            AppError::Timeout => "request timed out".to_string(),
            AppError::Store(_)
            | AppError::HashingFailure(_)
            | AppError::SigningFailure(_)
            | AppError::Internal(_) => "internal server error".to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, reason = self.reason(), "request failed");
        } else {
            warn!(error = %self, reason = self.reason(), "request rejected");
        }

        let body = Json(json!({
            "error": self.reason(),
            "message": self.public_message(),
        }));
        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
