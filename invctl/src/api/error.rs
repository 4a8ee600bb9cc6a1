//! APIエラーレスポンス型
//!
//! axum用の共通エラーハンドリング

use crate::common::error::InvError;
use axum::{response::IntoResponse, Json};
use serde_json::json;

/// Axum用のエラーレスポンス型
#[derive(Debug)]
pub struct AppError(pub InvError);

impl From<InvError> for AppError {
    fn from(err: InvError) -> Self {
        AppError(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        // Use external_message() to avoid exposing internal details
        // (stored usernames, token contents, storage errors, etc.)
        // Full error details are logged separately for debugging
        let status = self.0.status_code();
        let payload = json!({
            "error": self.0.external_message()
        });

        (status, Json(payload)).into_response()
    }
}
