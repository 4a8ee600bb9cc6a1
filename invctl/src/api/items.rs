//! 在庫アイテムAPI
//!
//! 認証済みユーザー向けのアイテムCRUD操作。変更者はミドルウェアで
//! 検証されたクレームから取り出し、ストレージ層へ明示的な引数として
//! 渡す（監査の帰属が呼び出し箇所から見えるようにする）。

use crate::common::auth::Claims;
use crate::common::types::Item;
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use serde::{Deserialize, Serialize};

use super::error::AppError;

/// アイテム作成リクエスト
#[derive(Debug, Deserialize)]
pub struct CreateItemRequest {
    /// アイテム名
    pub name: String,
    /// 数量（省略時0）
    #[serde(default)]
    pub quantity: i64,
}

/// アイテム更新リクエスト
#[derive(Debug, Deserialize)]
pub struct UpdateItemRequest {
    /// アイテム名
    pub name: String,
    /// 数量（省略時0）
    #[serde(default)]
    pub quantity: i64,
}

/// アイテム一覧レスポンス
#[derive(Debug, Serialize)]
pub struct ListItemsResponse {
    /// アイテム一覧（ID昇順）
    pub items: Vec<Item>,
}

/// POST /items - アイテム作成
///
/// # Arguments
/// * `Extension(claims)` - JWTクレーム（ミドルウェアで注入）
/// * `State(app_state)` - アプリケーション状態
/// * `Json(request)` - アイテム作成リクエスト
///
/// # Returns
/// * `201 Created` - 作成されたアイテム
/// * `400 Bad Request` - バリデーション失敗（名前が空）
/// * `500 Internal Server Error` - サーバーエラー
pub async fn create_item(
    Extension(claims): Extension<Claims>,
    State(app_state): State<AppState>,
    Json(request): Json<CreateItemRequest>,
) -> Result<impl IntoResponse, AppError> {
    let item = crate::db::items::create(
        &app_state.db_pool,
        &request.name,
        request.quantity,
        &claims.sub,
    )
    .await
    .map_err(|e| {
        tracing::error!("Failed to create item: {}", e);
        AppError(e)
    })?;

    Ok((StatusCode::CREATED, Json(item)))
}

/// GET /items - アイテム一覧取得
///
/// # Returns
/// * `200 OK` - アイテム一覧（ID昇順）
/// * `500 Internal Server Error` - サーバーエラー
pub async fn list_items(
    State(app_state): State<AppState>,
) -> Result<Json<ListItemsResponse>, AppError> {
    let items = crate::db::items::list(&app_state.db_pool).await.map_err(|e| {
        tracing::error!("Failed to list items: {}", e);
        AppError(e)
    })?;

    Ok(Json(ListItemsResponse { items }))
}

/// GET /items/:id - アイテム取得
///
/// # Returns
/// * `200 OK` - アイテム
/// * `404 Not Found` - 該当なし
/// * `500 Internal Server Error` - サーバーエラー
pub async fn get_item(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Item>, AppError> {
    let item = crate::db::items::get_by_id(&app_state.db_pool, id)
        .await
        .map_err(|e| {
            tracing::warn!("Failed to get item {}: {}", id, e);
            AppError(e)
        })?;

    Ok(Json(item))
}

/// PUT /items/:id - アイテム更新
///
/// # Returns
/// * `200 OK` - 更新後のアイテム
/// * `400 Bad Request` - バリデーション失敗（名前が空）
/// * `404 Not Found` - 該当なし
/// * `500 Internal Server Error` - サーバーエラー
pub async fn update_item(
    Extension(claims): Extension<Claims>,
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateItemRequest>,
) -> Result<Json<Item>, AppError> {
    let item = crate::db::items::update(
        &app_state.db_pool,
        id,
        &request.name,
        request.quantity,
        &claims.sub,
    )
    .await
    .map_err(|e| {
        tracing::error!("Failed to update item {}: {}", id, e);
        AppError(e)
    })?;

    Ok(Json(item))
}

/// DELETE /items/:id - アイテム削除
///
/// # Returns
/// * `204 No Content` - 削除成功
/// * `404 Not Found` - 該当なし
/// * `500 Internal Server Error` - サーバーエラー
pub async fn delete_item(
    Extension(claims): Extension<Claims>,
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    crate::db::items::delete(&app_state.db_pool, id, &claims.sub)
        .await
        .map_err(|e| {
            tracing::error!("Failed to delete item {}: {}", id, e);
            AppError(e)
        })?;

    Ok(StatusCode::NO_CONTENT)
}
