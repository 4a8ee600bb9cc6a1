//! 監査履歴API
//!
//! 履歴は読み取り専用。存在しないアイテムIDでも404ではなく
//! 空のリストを返す。

use crate::common::types::ItemHistory;
use crate::AppState;
use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;

use super::error::AppError;

/// 履歴一覧レスポンス
#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    /// 履歴一覧（changed_at降順）
    pub history: Vec<ItemHistory>,
}

/// GET /history - 全履歴取得
///
/// # Returns
/// * `200 OK` - 全履歴（新しい順）
/// * `500 Internal Server Error` - サーバーエラー
pub async fn all_history(
    State(app_state): State<AppState>,
) -> Result<Json<HistoryResponse>, AppError> {
    let history = crate::db::history::list_all(&app_state.db_pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get all history: {}", e);
            AppError(e)
        })?;

    Ok(Json(HistoryResponse { history }))
}

/// GET /history/:id - アイテム単位の履歴取得
///
/// # Returns
/// * `200 OK` - 対象アイテムの履歴（新しい順、空の場合あり）
/// * `500 Internal Server Error` - サーバーエラー
pub async fn item_history(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<HistoryResponse>, AppError> {
    let history = crate::db::history::list_for_item(&app_state.db_pool, id)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get history for item {}: {}", id, e);
            AppError(e)
        })?;

    Ok(Json(HistoryResponse { history }))
}
