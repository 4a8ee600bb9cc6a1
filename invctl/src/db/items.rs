//! 在庫アイテムCRUD操作
//!
//! すべての変更操作は「行の変更 + 監査エントリの追記」を単一の
//! トランザクションで実行する。どちらかが失敗すれば両方ロール
//! バックされ、呼び出し側には部分的な結果は見えない。変更者
//! （actor）は暗黙のコンテキストではなく引数として受け取る。

use crate::common::error::InvError;
use crate::common::types::{HistoryAction, Item, ValueMap};
use crate::db::history;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

/// アイテムを作成
///
/// # Arguments
/// * `pool` - データベース接続プール
/// * `name` - アイテム名（空文字列不可）
/// * `quantity` - 数量
/// * `actor` - 変更者のユーザー名（監査エントリに記録される）
///
/// # Returns
/// * `Ok(Item)` - 作成されたアイテム（採番済みID・タイムスタンプ付き）
/// * `Err(InvError)` - バリデーション失敗または作成失敗
pub async fn create(
    pool: &SqlitePool,
    name: &str,
    quantity: i64,
    actor: &str,
) -> Result<Item, InvError> {
    validate_name(name)?;

    let now = Utc::now();
    let mut tx = pool
        .begin()
        .await
        .map_err(|e| InvError::Database(format!("Failed to begin transaction: {}", e)))?;

    let result = sqlx::query(
        "INSERT INTO items (name, quantity, created_at, updated_at) VALUES (?, ?, ?, ?)",
    )
    .bind(name)
    .bind(quantity)
    .bind(now.to_rfc3339())
    .bind(now.to_rfc3339())
    .execute(&mut *tx)
    .await
    .map_err(|e| InvError::Database(format!("Failed to create item: {}", e)))?;

    let item = Item {
        id: result.last_insert_rowid(),
        name: name.to_string(),
        quantity,
        created_at: now,
        updated_at: now,
    };

    history::record(
        &mut *tx,
        item.id,
        HistoryAction::Create,
        actor,
        ValueMap::new(),
        item.values(),
    )
    .await?;

    tx.commit()
        .await
        .map_err(|e| InvError::Database(format!("Failed to commit transaction: {}", e)))?;

    Ok(item)
}

/// IDでアイテムを取得
///
/// # Arguments
/// * `pool` - データベース接続プール
/// * `id` - アイテムID
///
/// # Returns
/// * `Ok(Item)` - 取得したアイテム
/// * `Err(InvError::NotFound)` - 該当行なし
pub async fn get_by_id(pool: &SqlitePool, id: i64) -> Result<Item, InvError> {
    let row = sqlx::query_as::<_, ItemRow>(
        "SELECT id, name, quantity, created_at, updated_at FROM items WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await
    .map_err(|e| InvError::Database(format!("Failed to get item: {}", e)))?;

    row.ok_or_else(|| InvError::NotFound(format!("item {}", id)))?
        .into_item()
}

/// すべてのアイテムを取得（ID昇順）
///
/// # Arguments
/// * `pool` - データベース接続プール
///
/// # Returns
/// * `Ok(Vec<Item>)` - アイテム一覧のスナップショット
/// * `Err(InvError)` - 取得失敗
pub async fn list(pool: &SqlitePool) -> Result<Vec<Item>, InvError> {
    let rows = sqlx::query_as::<_, ItemRow>(
        "SELECT id, name, quantity, created_at, updated_at FROM items ORDER BY id",
    )
    .fetch_all(pool)
    .await
    .map_err(|e| InvError::Database(format!("Failed to get items: {}", e)))?;

    rows.into_iter().map(ItemRow::into_item).collect()
}

/// アイテムを更新
///
/// 監査エントリのold_values/new_valuesには値が変わったフィールド
/// のみが入る（フィールド単位の差分）。変更がなくても成功した
/// 更新1回につきエントリは必ず1件記録される。
///
/// # Arguments
/// * `pool` - データベース接続プール
/// * `id` - アイテムID
/// * `name` - 新しいアイテム名（空文字列不可）
/// * `quantity` - 新しい数量
/// * `actor` - 変更者のユーザー名
///
/// # Returns
/// * `Ok(Item)` - 更新後のアイテム
/// * `Err(InvError)` - バリデーション失敗・該当行なし・更新失敗
pub async fn update(
    pool: &SqlitePool,
    id: i64,
    name: &str,
    quantity: i64,
    actor: &str,
) -> Result<Item, InvError> {
    validate_name(name)?;

    let mut tx = pool
        .begin()
        .await
        .map_err(|e| InvError::Database(format!("Failed to begin transaction: {}", e)))?;

    let before = fetch_in_tx(&mut tx, id).await?;

    let now = Utc::now();
    sqlx::query("UPDATE items SET name = ?, quantity = ?, updated_at = ? WHERE id = ?")
        .bind(name)
        .bind(quantity)
        .bind(now.to_rfc3339())
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(|e| InvError::Database(format!("Failed to update item: {}", e)))?;

    let after = Item {
        id,
        name: name.to_string(),
        quantity,
        created_at: before.created_at,
        updated_at: now,
    };

    let (old_values, new_values) = diff_values(&before, &after);
    history::record(&mut *tx, id, HistoryAction::Update, actor, old_values, new_values).await?;

    tx.commit()
        .await
        .map_err(|e| InvError::Database(format!("Failed to commit transaction: {}", e)))?;

    Ok(after)
}

/// アイテムを削除（ハードデリート）
///
/// 監査エントリは削除された行より長生きする（item_idは弱参照）。
///
/// # Arguments
/// * `pool` - データベース接続プール
/// * `id` - アイテムID
/// * `actor` - 変更者のユーザー名
///
/// # Returns
/// * `Ok(())` - 削除成功
/// * `Err(InvError)` - 該当行なしまたは削除失敗
pub async fn delete(pool: &SqlitePool, id: i64, actor: &str) -> Result<(), InvError> {
    let mut tx = pool
        .begin()
        .await
        .map_err(|e| InvError::Database(format!("Failed to begin transaction: {}", e)))?;

    let before = fetch_in_tx(&mut tx, id).await?;

    sqlx::query("DELETE FROM items WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(|e| InvError::Database(format!("Failed to delete item: {}", e)))?;

    history::record(
        &mut *tx,
        id,
        HistoryAction::Delete,
        actor,
        before.values(),
        ValueMap::new(),
    )
    .await?;

    tx.commit()
        .await
        .map_err(|e| InvError::Database(format!("Failed to commit transaction: {}", e)))?;

    Ok(())
}

/// トランザクション内で現在の行を取得（変更系操作の前段）
async fn fetch_in_tx(
    tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    id: i64,
) -> Result<Item, InvError> {
    let row = sqlx::query_as::<_, ItemRow>(
        "SELECT id, name, quantity, created_at, updated_at FROM items WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(&mut **tx)
    .await
    .map_err(|e| InvError::Database(format!("Failed to get item: {}", e)))?;

    row.ok_or_else(|| InvError::NotFound(format!("item {}", id)))?
        .into_item()
}

fn validate_name(name: &str) -> Result<(), InvError> {
    if name.trim().is_empty() {
        return Err(InvError::Validation("name must not be empty".to_string()));
    }
    Ok(())
}

/// 変更前後のアイテムから、値が変わった業務フィールドだけの
/// スナップショット対を作る
fn diff_values(before: &Item, after: &Item) -> (ValueMap, ValueMap) {
    let mut old_values = ValueMap::new();
    let mut new_values = ValueMap::new();

    if before.name != after.name {
        old_values.insert(
            "name".to_string(),
            serde_json::Value::String(before.name.clone()),
        );
        new_values.insert(
            "name".to_string(),
            serde_json::Value::String(after.name.clone()),
        );
    }
    if before.quantity != after.quantity {
        old_values.insert("quantity".to_string(), serde_json::json!(before.quantity));
        new_values.insert("quantity".to_string(), serde_json::json!(after.quantity));
    }

    (old_values, new_values)
}

/// sqlx::FromRow用の行構造体
#[derive(Debug, sqlx::FromRow)]
struct ItemRow {
    id: i64,
    name: String,
    quantity: i64,
    created_at: String,
    updated_at: String,
}

impl ItemRow {
    fn into_item(self) -> Result<Item, InvError> {
        let created_at = DateTime::parse_from_rfc3339(&self.created_at)
            .map_err(|e| InvError::Database(format!("Invalid item timestamp in database: {}", e)))?
            .with_timezone(&Utc);
        let updated_at = DateTime::parse_from_rfc3339(&self.updated_at)
            .map_err(|e| InvError::Database(format!("Invalid item timestamp in database: {}", e)))?
            .with_timezone(&Utc);

        Ok(Item {
            id: self.id,
            name: self.name,
            quantity: self.quantity,
            created_at,
            updated_at,
        })
    }
}
