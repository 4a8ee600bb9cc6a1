// 認証モジュール

/// パスワードハッシュ化・検証（bcrypt）
pub mod password;

/// JWT生成・検証（jsonwebtoken）
pub mod jwt;

/// 認証ミドルウェア（Bearerトークン）
pub mod middleware;

/// 初回起動時の管理者アカウント作成
pub mod bootstrap;

use crate::common::auth::{Claims, User};
use crate::common::error::InvError;
use sqlx::SqlitePool;

/// 認証情報を検証しJWTトークンを発行する（ログインフロー）
///
/// ユーザー不在とパスワード不一致はどちらも`InvalidCredentials`を返し、
/// 呼び出し側からどちらのケースかは判別できない。
///
/// # Arguments
/// * `pool` - データベース接続プール
/// * `secret` - JWTシークレットキー
/// * `username` - ユーザー名
/// * `password` - 平文パスワード
///
/// # Returns
/// * `Ok((String, User))` - 発行されたトークンと認証済みユーザー
/// * `Err(InvError)` - 認証失敗
pub async fn authenticate(
    pool: &SqlitePool,
    secret: &str,
    username: &str,
    password: &str,
) -> Result<(String, User), InvError> {
    let user = crate::db::users::find_by_username(pool, username)
        .await?
        .ok_or(InvError::InvalidCredentials)?;

    let is_valid = password::verify_password(password, &user.password_hash)?;
    if !is_valid {
        return Err(InvError::InvalidCredentials);
    }

    let token = jwt::issue_token(&user.username, user.role, secret)?;
    Ok((token, user))
}

/// Authorizationヘッダー値を検証しクレームを取り出す
///
/// `Bearer <token>`形式を要求する。ヘッダー欠落・プレフィックス不一致・
/// 空トークンは`MalformedAuthHeader`、トークン自体の検証失敗は
/// `InvalidToken`となる。
///
/// # Arguments
/// * `header` - Authorizationヘッダー値（存在しない場合はNone）
/// * `secret` - JWTシークレットキー
///
/// # Returns
/// * `Ok(Claims)` - 検証済みクレーム
/// * `Err(InvError)` - 検証失敗
pub fn verify_bearer(header: Option<&str>, secret: &str) -> Result<Claims, InvError> {
    let header = header.ok_or(InvError::MalformedAuthHeader)?;
    let token = header
        .strip_prefix("Bearer ")
        .ok_or(InvError::MalformedAuthHeader)?;
    if token.is_empty() {
        return Err(InvError::MalformedAuthHeader);
    }
    jwt::verify_token(token, secret)
}
