//! パスワードハッシュ化と検証（bcrypt実装）

use crate::common::error::InvError;
use bcrypt::{hash, verify};

/// パスワードハッシュ化のコスト（12推奨、200-300ms）
const HASH_COST: u32 = 12;

/// パスワードをbcryptでハッシュ化
///
/// # Arguments
/// * `password` - ハッシュ化するパスワード
///
/// # Returns
/// * `Ok(String)` - bcryptハッシュ文字列（$2b$で始まる、ソルト内包）
/// * `Err(InvError)` - ハッシュ化失敗
pub fn hash_password(password: &str) -> Result<String, InvError> {
    hash(password, HASH_COST)
        .map_err(|e| InvError::PasswordHash(format!("Failed to hash password: {}", e)))
}

/// パスワードを検証
///
/// bcryptの定数時間比較を使用する。
///
/// # Arguments
/// * `password` - 検証する平文パスワード
/// * `hash` - bcryptハッシュ文字列
///
/// # Returns
/// * `Ok(true)` - パスワード一致
/// * `Ok(false)` - パスワード不一致
/// * `Err(InvError)` - 検証失敗（ハッシュ文字列が不正など）
pub fn verify_password(password: &str, hash: &str) -> Result<bool, InvError> {
    verify(password, hash)
        .map_err(|e| InvError::PasswordHash(format!("Failed to verify password: {}", e)))
}
