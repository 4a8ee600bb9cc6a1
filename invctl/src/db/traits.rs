//! Repository traitパターン定義
//!
//! DB操作を抽象化し、テスタビリティを向上させるためのtrait群。
//! 各traitは既存のフリー関数に対応し、本番実装は`SqlitePool`への
//! 委譲、テストではインメモリ実装に差し替えられる。

use async_trait::async_trait;

use crate::common::auth::{Role, User};
use crate::common::error::InvError;
use crate::common::types::{Item, ItemHistory};

// ---------------------------------------------------------------------------
// UserRepository
// ---------------------------------------------------------------------------

/// ユーザー操作のRepository trait
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// ユーザーを作成
    async fn create_user(
        &self,
        username: &str,
        password_hash: &str,
        role: Role,
    ) -> Result<User, InvError>;
    /// ユーザー名でユーザーを検索
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, InvError>;
    /// すべてのユーザーを取得
    async fn list_users(&self) -> Result<Vec<User>, InvError>;
}

// ---------------------------------------------------------------------------
// ItemRepository
// ---------------------------------------------------------------------------

/// 在庫アイテムCRUD操作のRepository trait
///
/// 変更系操作は監査エントリの追記込みで原子的に実行される。
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// アイテムを作成
    async fn create_item(&self, name: &str, quantity: i64, actor: &str)
        -> Result<Item, InvError>;
    /// IDでアイテムを取得
    async fn get_item(&self, id: i64) -> Result<Item, InvError>;
    /// アイテム一覧を取得（ID昇順）
    async fn list_items(&self) -> Result<Vec<Item>, InvError>;
    /// アイテムを更新
    async fn update_item(
        &self,
        id: i64,
        name: &str,
        quantity: i64,
        actor: &str,
    ) -> Result<Item, InvError>;
    /// アイテムを削除
    async fn delete_item(&self, id: i64, actor: &str) -> Result<(), InvError>;
}

// ---------------------------------------------------------------------------
// HistoryRepository
// ---------------------------------------------------------------------------

/// 監査履歴参照のRepository trait（読み取り専用）
#[async_trait]
pub trait HistoryRepository: Send + Sync {
    /// アイテム単位の履歴を取得（新しい順）
    async fn history_for_item(&self, item_id: i64) -> Result<Vec<ItemHistory>, InvError>;
    /// 全履歴を取得（新しい順）
    async fn all_history(&self) -> Result<Vec<ItemHistory>, InvError>;
}

// ---------------------------------------------------------------------------
// SqlitePool実装（フリー関数への委譲）
// ---------------------------------------------------------------------------

#[async_trait]
impl UserRepository for sqlx::SqlitePool {
    async fn create_user(
        &self,
        username: &str,
        password_hash: &str,
        role: Role,
    ) -> Result<User, InvError> {
        super::users::create(self, username, password_hash, role).await
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, InvError> {
        super::users::find_by_username(self, username).await
    }

    async fn list_users(&self) -> Result<Vec<User>, InvError> {
        super::users::list(self).await
    }
}

#[async_trait]
impl ItemRepository for sqlx::SqlitePool {
    async fn create_item(
        &self,
        name: &str,
        quantity: i64,
        actor: &str,
    ) -> Result<Item, InvError> {
        super::items::create(self, name, quantity, actor).await
    }

    async fn get_item(&self, id: i64) -> Result<Item, InvError> {
        super::items::get_by_id(self, id).await
    }

    async fn list_items(&self) -> Result<Vec<Item>, InvError> {
        super::items::list(self).await
    }

    async fn update_item(
        &self,
        id: i64,
        name: &str,
        quantity: i64,
        actor: &str,
    ) -> Result<Item, InvError> {
        super::items::update(self, id, name, quantity, actor).await
    }

    async fn delete_item(&self, id: i64, actor: &str) -> Result<(), InvError> {
        super::items::delete(self, id, actor).await
    }
}

#[async_trait]
impl HistoryRepository for sqlx::SqlitePool {
    async fn history_for_item(&self, item_id: i64) -> Result<Vec<ItemHistory>, InvError> {
        super::history::list_for_item(self, item_id).await
    }

    async fn all_history(&self) -> Result<Vec<ItemHistory>, InvError> {
        super::history::list_all(self).await
    }
}
