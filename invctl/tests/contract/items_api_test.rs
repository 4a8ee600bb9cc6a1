//! 在庫アイテムAPI Contract Tests
//!
//! POST/GET/PUT/DELETE /items と監査エントリの記録

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use invctl::common::auth::Role;
use serde_json::{json, Value};
use tower::ServiceExt;

use crate::support::app::{build_app, issue_token, seed_user};

async fn build_app_with_users() -> Router {
    let (app, db_pool) = build_app().await;
    seed_user(&db_pool, "alice", "alicepass", Role::Manager).await;
    app
}

fn bearer(username: &str) -> String {
    format!("Bearer {}", issue_token(username, Role::Manager))
}

async fn send_json(
    app: &Router,
    method: &str,
    uri: &str,
    actor: &str,
    payload: &Value,
) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .header("content-type", "application/json")
                .header("authorization", bearer(actor))
                .body(Body::from(serde_json::to_vec(payload).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, value)
}

async fn send(app: &Router, method: &str, uri: &str, actor: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .header("authorization", bearer(actor))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, value)
}

// ---------------------------------------------------------------------------
// POST /items
// ---------------------------------------------------------------------------

/// アイテム作成は201で採番済みの行を返す
#[tokio::test]
async fn test_create_item_returns_persisted_row() {
    let app = build_app_with_users().await;

    let (status, body) = send_json(
        &app,
        "POST",
        "/items",
        "alice",
        &json!({"name": "bolt", "quantity": 100}),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["id"], 1);
    assert_eq!(body["name"], "bolt");
    assert_eq!(body["quantity"], 100);
    assert_eq!(body["created_at"], body["updated_at"]);
}

/// 作成直後のgetは同じ内容を返す
#[tokio::test]
async fn test_create_then_get_roundtrip() {
    let app = build_app_with_users().await;

    send_json(
        &app,
        "POST",
        "/items",
        "alice",
        &json!({"name": "bolt", "quantity": 100}),
    )
    .await;

    let (status, body) = send(&app, "GET", "/items/1", "alice").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "bolt");
    assert_eq!(body["quantity"], 100);
    assert_eq!(body["created_at"], body["updated_at"]);
}

/// 空の名前は400で、行も監査エントリも作られない
#[tokio::test]
async fn test_create_empty_name_leaves_no_trace() {
    let app = build_app_with_users().await;

    let (status, body) = send_json(
        &app,
        "POST",
        "/items",
        "alice",
        &json!({"name": "", "quantity": 5}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid request");

    let (_, items) = send(&app, "GET", "/items", "alice").await;
    assert_eq!(items["items"].as_array().unwrap().len(), 0);

    let (_, history) = send(&app, "GET", "/history", "alice").await;
    assert_eq!(history["history"].as_array().unwrap().len(), 0);
}

/// quantity省略時は0で作成される
#[tokio::test]
async fn test_create_quantity_defaults_to_zero() {
    let app = build_app_with_users().await;

    let (status, body) =
        send_json(&app, "POST", "/items", "alice", &json!({"name": "nut"})).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["quantity"], 0);
}

// ---------------------------------------------------------------------------
// GET /items
// ---------------------------------------------------------------------------

/// 一覧はID昇順で、再取得しても同一
#[tokio::test]
async fn test_list_is_ordered_and_idempotent() {
    let app = build_app_with_users().await;

    for (name, quantity) in [("bolt", 100), ("nut", 50), ("washer", 25)] {
        send_json(
            &app,
            "POST",
            "/items",
            "alice",
            &json!({"name": name, "quantity": quantity}),
        )
        .await;
    }

    let (status, first) = send(&app, "GET", "/items", "alice").await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<i64> = first["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![1, 2, 3]);

    let (_, second) = send(&app, "GET", "/items", "alice").await;
    assert_eq!(first, second);
}

/// 存在しないIDのgetは404
#[tokio::test]
async fn test_get_missing_item_is_404() {
    let app = build_app_with_users().await;
    let (status, body) = send(&app, "GET", "/items/42", "alice").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Not found");
}

// ---------------------------------------------------------------------------
// PUT /items/:id
// ---------------------------------------------------------------------------

/// 更新はupdated_atを進め、別の変更者で監査エントリを残す
#[tokio::test]
async fn test_update_flow_with_audit_diff() {
    let app = build_app_with_users().await;

    let (_, created) = send_json(
        &app,
        "POST",
        "/items",
        "alice",
        &json!({"name": "bolt", "quantity": 100}),
    )
    .await;

    let (status, updated) = send_json(
        &app,
        "PUT",
        "/items/1",
        "bob",
        &json!({"name": "bolt", "quantity": 90}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["quantity"], 90);
    assert_eq!(updated["created_at"], created["created_at"]);
    assert!(
        updated["updated_at"].as_str().unwrap() >= created["updated_at"].as_str().unwrap()
    );

    // 履歴は新しい順で2件、先頭がbobの更新差分
    let (_, history) = send(&app, "GET", "/history/1", "alice").await;
    let entries = history["history"].as_array().unwrap();
    assert_eq!(entries.len(), 2);

    assert_eq!(entries[0]["action"], "update");
    assert_eq!(entries[0]["changed_by"], "bob");
    assert_eq!(entries[0]["old_values"], json!({"quantity": 100}));
    assert_eq!(entries[0]["new_values"], json!({"quantity": 90}));

    assert_eq!(entries[1]["action"], "create");
    assert_eq!(entries[1]["changed_by"], "alice");
    assert_eq!(entries[1]["old_values"], json!({}));
    assert_eq!(
        entries[1]["new_values"],
        json!({"name": "bolt", "quantity": 100})
    );
}

/// 存在しないIDの更新は404
#[tokio::test]
async fn test_update_missing_item_is_404() {
    let app = build_app_with_users().await;
    let (status, _) = send_json(
        &app,
        "PUT",
        "/items/42",
        "alice",
        &json!({"name": "bolt", "quantity": 1}),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

/// 空の名前への更新は400
#[tokio::test]
async fn test_update_empty_name_is_400() {
    let app = build_app_with_users().await;
    send_json(
        &app,
        "POST",
        "/items",
        "alice",
        &json!({"name": "bolt", "quantity": 100}),
    )
    .await;

    let (status, _) = send_json(
        &app,
        "PUT",
        "/items/1",
        "alice",
        &json!({"name": "", "quantity": 1}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // 行は変わっていない
    let (_, body) = send(&app, "GET", "/items/1", "alice").await;
    assert_eq!(body["quantity"], 100);
}

// ---------------------------------------------------------------------------
// DELETE /items/:id
// ---------------------------------------------------------------------------

/// 削除は204で、行は消え履歴は残る
#[tokio::test]
async fn test_delete_removes_row_and_keeps_history() {
    let app = build_app_with_users().await;
    send_json(
        &app,
        "POST",
        "/items",
        "alice",
        &json!({"name": "bolt", "quantity": 100}),
    )
    .await;

    let (status, _) = send(&app, "DELETE", "/items/1", "bob").await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, "GET", "/items/1", "alice").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, history) = send(&app, "GET", "/history/1", "alice").await;
    let entries = history["history"].as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["action"], "delete");
    assert_eq!(entries[0]["changed_by"], "bob");
    assert_eq!(
        entries[0]["old_values"],
        json!({"name": "bolt", "quantity": 100})
    );
    assert_eq!(entries[0]["new_values"], json!({}));
}

/// 存在しないIDの削除は404で、履歴件数は変わらない
#[tokio::test]
async fn test_delete_missing_item_leaves_history_unchanged() {
    let app = build_app_with_users().await;
    send_json(
        &app,
        "POST",
        "/items",
        "alice",
        &json!({"name": "bolt", "quantity": 100}),
    )
    .await;

    let (_, before) = send(&app, "GET", "/history", "alice").await;
    let count_before = before["history"].as_array().unwrap().len();

    let (status, _) = send(&app, "DELETE", "/items/999", "alice").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, after) = send(&app, "GET", "/history", "alice").await;
    assert_eq!(after["history"].as_array().unwrap().len(), count_before);
}
