//! 監査履歴ストレージ
//!
//! 変更1件につき1エントリの追記専用ストレージ。書き込みは必ず
//! アイテム変更と同一トランザクション内で行われる（`record`は
//! トランザクション接続を受け取る）。更新・削除APIは存在しない。

use crate::common::error::InvError;
use crate::common::types::{HistoryAction, ItemHistory, ValueMap};
use chrono::{DateTime, Utc};
use sqlx::{SqliteConnection, SqlitePool};

/// 監査エントリを記録する（トランザクション内部用）
///
/// # Arguments
/// * `conn` - 変更本体と同一のトランザクション接続
/// * `item_id` - 対象アイテムID
/// * `action` - アクション種別
/// * `changed_by` - 変更者のユーザー名
/// * `old_values` - 変更前スナップショット（createでは空）
/// * `new_values` - 変更後スナップショット（deleteでは空）
///
/// # Returns
/// * `Ok(ItemHistory)` - 記録されたエントリ
/// * `Err(InvError)` - 記録失敗（呼び出し側でロールバックされる）
pub(crate) async fn record(
    conn: &mut SqliteConnection,
    item_id: i64,
    action: HistoryAction,
    changed_by: &str,
    old_values: ValueMap,
    new_values: ValueMap,
) -> Result<ItemHistory, InvError> {
    let changed_at = Utc::now();
    let old_json = serde_json::to_string(&old_values)
        .map_err(|e| InvError::Internal(format!("Failed to serialize old values: {}", e)))?;
    let new_json = serde_json::to_string(&new_values)
        .map_err(|e| InvError::Internal(format!("Failed to serialize new values: {}", e)))?;

    let result = sqlx::query(
        "INSERT INTO item_history (item_id, action, changed_by, old_values, new_values, changed_at)
         VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(item_id)
    .bind(action.as_str())
    .bind(changed_by)
    .bind(&old_json)
    .bind(&new_json)
    .bind(changed_at.to_rfc3339())
    .execute(conn)
    .await
    .map_err(|e| InvError::Database(format!("Failed to record history: {}", e)))?;

    Ok(ItemHistory {
        id: result.last_insert_rowid(),
        item_id,
        action,
        changed_by: changed_by.to_string(),
        old_values,
        new_values,
        changed_at,
    })
}

/// アイテム単位の履歴を取得（新しい順）
///
/// 存在しないアイテムIDはエラーではなく空のリストを返す。
///
/// # Arguments
/// * `pool` - データベース接続プール
/// * `item_id` - 対象アイテムID
///
/// # Returns
/// * `Ok(Vec<ItemHistory>)` - changed_at降順の履歴一覧
/// * `Err(InvError)` - 取得失敗
pub async fn list_for_item(pool: &SqlitePool, item_id: i64) -> Result<Vec<ItemHistory>, InvError> {
    let rows = sqlx::query_as::<_, HistoryRow>(
        "SELECT id, item_id, action, changed_by, old_values, new_values, changed_at
         FROM item_history WHERE item_id = ? ORDER BY changed_at DESC, id DESC",
    )
    .bind(item_id)
    .fetch_all(pool)
    .await
    .map_err(|e| InvError::Database(format!("Failed to get history: {}", e)))?;

    rows.into_iter().map(HistoryRow::into_entry).collect()
}

/// 全履歴を取得（新しい順）
///
/// # Arguments
/// * `pool` - データベース接続プール
///
/// # Returns
/// * `Ok(Vec<ItemHistory>)` - changed_at降順の履歴一覧
/// * `Err(InvError)` - 取得失敗
pub async fn list_all(pool: &SqlitePool) -> Result<Vec<ItemHistory>, InvError> {
    let rows = sqlx::query_as::<_, HistoryRow>(
        "SELECT id, item_id, action, changed_by, old_values, new_values, changed_at
         FROM item_history ORDER BY changed_at DESC, id DESC",
    )
    .fetch_all(pool)
    .await
    .map_err(|e| InvError::Database(format!("Failed to get all history: {}", e)))?;

    rows.into_iter().map(HistoryRow::into_entry).collect()
}

/// sqlx::FromRow用の行構造体
#[derive(Debug, sqlx::FromRow)]
struct HistoryRow {
    id: i64,
    item_id: i64,
    action: String,
    changed_by: String,
    old_values: String,
    new_values: String,
    changed_at: String,
}

impl HistoryRow {
    fn into_entry(self) -> Result<ItemHistory, InvError> {
        let action = HistoryAction::parse(&self.action).ok_or_else(|| {
            InvError::Database(format!("Invalid history action in database: {}", self.action))
        })?;
        let old_values: ValueMap = serde_json::from_str(&self.old_values)
            .map_err(|e| InvError::Database(format!("Invalid old values in database: {}", e)))?;
        let new_values: ValueMap = serde_json::from_str(&self.new_values)
            .map_err(|e| InvError::Database(format!("Invalid new values in database: {}", e)))?;
        let changed_at = DateTime::parse_from_rfc3339(&self.changed_at)
            .map_err(|e| {
                InvError::Database(format!("Invalid history timestamp in database: {}", e))
            })?
            .with_timezone(&Utc);

        Ok(ItemHistory {
            id: self.id,
            item_id: self.item_id,
            action,
            changed_by: self.changed_by,
            old_values,
            new_values,
            changed_at,
        })
    }
}
