//! 初回起動時の管理者アカウント作成
//!
//! 環境変数から管理者を作成

use crate::auth::password::hash_password;
use crate::common::auth::Role;
use crate::common::error::InvError;
use crate::db;

/// 環境変数から管理者を作成
///
/// # Arguments
/// * `pool` - データベース接続プール
///
/// # Environment Variables
/// * `INVCTL_ADMIN_USERNAME` - 管理者ユーザー名（省略時: "admin"）
/// * `INVCTL_ADMIN_PASSWORD` - 管理者パスワード（未設定なら作成しない）
///
/// # Returns
/// * `Ok(Some(username))` - 管理者作成成功（ユーザー名を返す）
/// * `Ok(None)` - INVCTL_ADMIN_PASSWORDが未設定（作成しない）
/// * `Err(InvError)` - 作成失敗
pub async fn create_admin_from_env(pool: &sqlx::SqlitePool) -> Result<Option<String>, InvError> {
    let password = match std::env::var("INVCTL_ADMIN_PASSWORD") {
        Ok(p) if !p.is_empty() => p,
        _ => {
            tracing::debug!("INVCTL_ADMIN_PASSWORD not set, skipping admin creation from env");
            return Ok(None);
        }
    };

    let username =
        std::env::var("INVCTL_ADMIN_USERNAME").unwrap_or_else(|_| "admin".to_string());

    let password_hash = hash_password(&password)?;

    match db::users::create(pool, &username, &password_hash, Role::Admin).await {
        Ok(user) => {
            tracing::info!("Created admin user from env: username={}", username);
            Ok(Some(user.username))
        }
        Err(InvError::Conflict(_)) => {
            tracing::warn!("Admin user {} already exists, skipping creation", username);
            Ok(Some(username))
        }
        Err(e) => {
            tracing::error!("Failed to create admin user from env: {}", e);
            Err(e)
        }
    }
}
