//! JWT生成と検証（jsonwebtoken実装）

use crate::common::auth::{Claims, Role};
use crate::common::error::InvError;
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};

/// JWT有効期限（24時間）
const TOKEN_TTL_HOURS: i64 = 24;

/// JWTトークンを生成
///
/// # Arguments
/// * `username` - ユーザー名（sub claimに入る）
/// * `role` - ユーザーロール
/// * `secret` - JWTシークレットキー
///
/// # Returns
/// * `Ok(String)` - JWTトークン
/// * `Err(InvError)` - 生成失敗
pub fn issue_token(username: &str, role: Role, secret: &str) -> Result<String, InvError> {
    let issued_at = Utc::now();
    let expires_at = issued_at
        .checked_add_signed(chrono::Duration::hours(TOKEN_TTL_HOURS))
        .ok_or_else(|| InvError::Jwt("Failed to calculate expiration time".to_string()))?;

    let claims = Claims {
        sub: username.to_string(),
        role,
        iat: issued_at.timestamp() as usize,
        exp: expires_at.timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| InvError::Jwt(format!("Failed to create JWT: {}", e)))
}

/// JWTトークンを検証
///
/// 署名不一致・ペイロード不正・期限切れはいずれも`InvalidToken`に
/// 畳み込み、呼び出し側からは区別できない。
///
/// # Arguments
/// * `token` - 検証するJWTトークン
/// * `secret` - JWTシークレットキー
///
/// # Returns
/// * `Ok(Claims)` - 検証済みクレーム
/// * `Err(InvError)` - 検証失敗
pub fn verify_token(token: &str, secret: &str) -> Result<Claims, InvError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| InvError::InvalidToken(format!("Failed to verify JWT: {}", e)))
}
