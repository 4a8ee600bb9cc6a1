//! 認証関連のデータモデル

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// ユーザーロール
///
/// ロールはトークンに載せて下流へ伝搬するが、この層では操作を
/// 制限しない（認証済みユーザーは全操作を実行できる）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// 管理者
    Admin,
    /// マネージャー
    Manager,
    /// 閲覧者
    Viewer,
}

impl Role {
    /// DB格納用の文字列表現
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Manager => "manager",
            Role::Viewer => "viewer",
        }
    }

    /// DB格納文字列からの復元（未知の値はViewerに落とす）
    pub fn from_str_or_viewer(s: &str) -> Role {
        match s {
            "admin" => Role::Admin,
            "manager" => Role::Manager,
            _ => Role::Viewer,
        }
    }
}

/// ユーザー
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// ユーザーID
    pub id: Uuid,
    /// ユーザー名
    pub username: String,
    /// パスワードハッシュ（bcrypt）
    pub password_hash: String,
    /// ユーザーロール
    pub role: Role,
    /// 作成日時
    pub created_at: DateTime<Utc>,
}

/// JWTクレーム
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// ユーザー名（JWT sub claim）
    pub sub: String,
    /// ユーザーロール
    pub role: Role,
    /// 発行日時（UNIXタイムスタンプ）
    pub iat: usize,
    /// 有効期限（UNIXタイムスタンプ）
    pub exp: usize,
}
