//! ユーザーCRUD操作
//!
//! このコアの範囲ではユーザーは読み取り専用（ログイン時の照合のみ）。
//! createはCLIと初回起動ブートストラップからのプロビジョニング用。

use crate::common::auth::{Role, User};
use crate::common::error::InvError;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;

/// ユーザーを作成
///
/// # Arguments
/// * `pool` - データベース接続プール
/// * `username` - ユーザー名
/// * `password_hash` - bcryptハッシュ化されたパスワード
/// * `role` - ユーザーロール
///
/// # Returns
/// * `Ok(User)` - 作成されたユーザー
/// * `Err(InvError)` - 作成失敗（ユーザー名重複はConflict）
pub async fn create(
    pool: &SqlitePool,
    username: &str,
    password_hash: &str,
    role: Role,
) -> Result<User, InvError> {
    let id = Uuid::new_v4();
    let created_at = Utc::now();

    sqlx::query(
        "INSERT INTO users (id, username, password_hash, role, created_at)
         VALUES (?, ?, ?, ?, ?)",
    )
    .bind(id.to_string())
    .bind(username)
    .bind(password_hash)
    .bind(role.as_str())
    .bind(created_at.to_rfc3339())
    .execute(pool)
    .await
    .map_err(|e| {
        if e.to_string().contains("UNIQUE constraint failed") {
            InvError::Conflict(format!("Username '{}' already exists", username))
        } else {
            InvError::Database(format!("Failed to create user: {}", e))
        }
    })?;

    Ok(User {
        id,
        username: username.to_string(),
        password_hash: password_hash.to_string(),
        role,
        created_at,
    })
}

/// ユーザー名でユーザーを検索
///
/// # Arguments
/// * `pool` - データベース接続プール
/// * `username` - ユーザー名
///
/// # Returns
/// * `Ok(Some(User))` - ユーザーが見つかった
/// * `Ok(None)` - ユーザーが見つからなかった
/// * `Err(InvError)` - 検索失敗
pub async fn find_by_username(pool: &SqlitePool, username: &str) -> Result<Option<User>, InvError> {
    let row = sqlx::query_as::<_, UserRow>(
        "SELECT id, username, password_hash, role, created_at FROM users WHERE username = ?",
    )
    .bind(username)
    .fetch_optional(pool)
    .await
    .map_err(|e| InvError::Database(format!("Failed to find user: {}", e)))?;

    row.map(UserRow::into_user).transpose()
}

/// すべてのユーザーを取得
///
/// # Arguments
/// * `pool` - データベース接続プール
///
/// # Returns
/// * `Ok(Vec<User>)` - ユーザー一覧
/// * `Err(InvError)` - 取得失敗
pub async fn list(pool: &SqlitePool) -> Result<Vec<User>, InvError> {
    let rows = sqlx::query_as::<_, UserRow>(
        "SELECT id, username, password_hash, role, created_at FROM users ORDER BY created_at",
    )
    .fetch_all(pool)
    .await
    .map_err(|e| InvError::Database(format!("Failed to list users: {}", e)))?;

    rows.into_iter().map(UserRow::into_user).collect()
}

/// sqlx::FromRow用の行構造体
#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: String,
    username: String,
    password_hash: String,
    role: String,
    created_at: String,
}

impl UserRow {
    fn into_user(self) -> Result<User, InvError> {
        let id = Uuid::parse_str(&self.id)
            .map_err(|e| InvError::Database(format!("Invalid user id in database: {}", e)))?;
        let created_at = DateTime::parse_from_rfc3339(&self.created_at)
            .map_err(|e| InvError::Database(format!("Invalid user timestamp in database: {}", e)))?
            .with_timezone(&Utc);

        Ok(User {
            id,
            username: self.username,
            password_hash: self.password_hash,
            role: Role::from_str_or_viewer(&self.role),
            created_at,
        })
    }
}
