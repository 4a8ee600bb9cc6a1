//! エラー型定義
//!
//! 統一エラー型（thiserror使用）
//!
//! `InvError`は`status_code()`と`external_message()`メソッドを提供し、
//! 内部詳細を漏らさないHTTPエラーレスポンスを生成できます。

use axum::http::StatusCode;
use thiserror::Error;

/// inventory control error type
#[derive(Debug, Error)]
pub enum InvError {
    /// Request validation error (bad input shape)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Login failed (unknown user or wrong password, indistinguishable)
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Authorization header missing or not `Bearer <token>`
    #[error("Malformed authorization header")]
    MalformedAuthHeader,

    /// Token rejected (bad signature, malformed payload or expired)
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Conflict error (e.g., duplicate username)
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(String),

    /// Password hash error
    #[error("Password hash error: {0}")]
    PasswordHash(String),

    /// JWT error (token issuance failed)
    #[error("JWT error: {0}")]
    Jwt(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl InvError {
    /// Returns a safe error message for external clients.
    ///
    /// This method returns a generic error message that does not expose
    /// internal implementation details, stored usernames or token contents.
    /// Use this for HTTP responses to external clients.
    ///
    /// For debugging purposes, use the `Display` implementation
    /// (`to_string()`) which includes full error details - but only in
    /// server logs.
    pub fn external_message(&self) -> &'static str {
        match self {
            Self::Validation(_) => "Invalid request",
            Self::InvalidCredentials => "Invalid username or password",
            Self::MalformedAuthHeader => "Invalid authorization header",
            Self::InvalidToken(_) => "Invalid token",
            Self::NotFound(_) => "Not found",
            Self::Conflict(_) => "Resource conflict",
            Self::Database(_) => "Storage unavailable",
            Self::PasswordHash(_) => "Internal server error",
            Self::Jwt(_) => "Internal server error",
            Self::Internal(_) => "Internal server error",
        }
    }

    /// Returns the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::MalformedAuthHeader => StatusCode::UNAUTHORIZED,
            Self::InvalidToken(_) => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::PasswordHash(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Jwt(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Result type alias
pub type InvResult<T> = Result<T, InvError>;
