//! 認証API
//!
//! ログインとJWTトークン発行

use crate::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};

use super::error::AppError;

/// トークン有効期限（秒、ログインレスポンス用）
const TOKEN_EXPIRES_IN_SECS: usize = 86400;

/// ログインリクエスト
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// ユーザー名
    pub username: String,
    /// パスワード
    pub password: String,
}

/// ログインレスポンス
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    /// JWTトークン
    pub token: String,
    /// トークン有効期限（秒）
    pub expires_in: usize,
    /// ユーザー情報
    pub user: UserInfo,
}

/// ユーザー情報（ログインレスポンス用、password_hash除外）
#[derive(Debug, Serialize)]
pub struct UserInfo {
    /// ユーザー名
    pub username: String,
    /// ロール
    pub role: String,
}

/// POST /login - ログイン
///
/// ユーザー名とパスワードで認証し、JWTトークンを発行する。
/// ユーザー不在とパスワード誤りは同一の401レスポンスになる。
///
/// # Arguments
/// * `State(app_state)` - アプリケーション状態（db_pool, config）
/// * `Json(request)` - ログインリクエスト（username, password）
///
/// # Returns
/// * `200 OK` - ログイン成功（JWT token）
/// * `401 Unauthorized` - 認証失敗
/// * `500 Internal Server Error` - サーバーエラー
pub async fn login(
    State(app_state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let (token, user) = crate::auth::authenticate(
        &app_state.db_pool,
        &app_state.config.jwt_secret,
        &request.username,
        &request.password,
    )
    .await
    .map_err(|e| {
        // 失敗理由（不在/不一致/内部エラー）はログにのみ残す
        tracing::warn!("Login failed for {}: {}", request.username, e);
        AppError(e)
    })?;

    tracing::info!("User {} logged in", user.username);

    Ok((
        StatusCode::OK,
        Json(LoginResponse {
            token,
            expires_in: TOKEN_EXPIRES_IN_SECS,
            user: UserInfo {
                username: user.username,
                role: user.role.as_str().to_string(),
            },
        }),
    ))
}
