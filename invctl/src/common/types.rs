//! 在庫・監査履歴のデータモデル

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 監査スナップショット（変更前後のフィールド値）
///
/// DB上はJSONオブジェクトのTEXTとして格納される。
pub type ValueMap = serde_json::Map<String, serde_json::Value>;

/// 在庫アイテム
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// アイテムID（サーバー採番、変更不可）
    pub id: i64,
    /// アイテム名（空文字列不可）
    pub name: String,
    /// 数量
    pub quantity: i64,
    /// 作成日時
    pub created_at: DateTime<Utc>,
    /// 更新日時（created_at以上）
    pub updated_at: DateTime<Utc>,
}

impl Item {
    /// 監査スナップショット用の業務フィールド（name, quantity）を返す
    pub fn values(&self) -> ValueMap {
        let mut map = ValueMap::new();
        map.insert(
            "name".to_string(),
            serde_json::Value::String(self.name.clone()),
        );
        map.insert("quantity".to_string(), serde_json::json!(self.quantity));
        map
    }
}

/// 監査アクション種別
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryAction {
    /// アイテム作成
    Create,
    /// アイテム更新
    Update,
    /// アイテム削除
    Delete,
}

impl HistoryAction {
    /// DB格納用の文字列表現
    pub fn as_str(&self) -> &'static str {
        match self {
            HistoryAction::Create => "create",
            HistoryAction::Update => "update",
            HistoryAction::Delete => "delete",
        }
    }

    /// DB格納文字列からの復元
    pub fn parse(s: &str) -> Option<HistoryAction> {
        match s {
            "create" => Some(HistoryAction::Create),
            "update" => Some(HistoryAction::Update),
            "delete" => Some(HistoryAction::Delete),
            _ => None,
        }
    }
}

/// 監査履歴エントリ
///
/// アイテムへの変更1件につき1エントリ。追記専用で、この層からの
/// 更新・削除操作は存在しない。item_idは弱参照（アイテム削除後も残る）。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemHistory {
    /// 履歴ID（サーバー採番）
    pub id: i64,
    /// 対象アイテムID
    pub item_id: i64,
    /// アクション種別
    pub action: HistoryAction,
    /// 変更者のユーザー名
    pub changed_by: String,
    /// 変更前の値（createでは空）
    pub old_values: ValueMap,
    /// 変更後の値（deleteでは空）
    pub new_values: ValueMap,
    /// 変更日時
    pub changed_at: DateTime<Utc>,
}
