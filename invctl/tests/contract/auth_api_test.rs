//! 認証API Contract Tests
//!
//! POST /login と保護ルートのトークン検証

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use invctl::common::auth::{Claims, Role};
use serde_json::{json, Value};
use tower::ServiceExt;

use crate::support::app::{build_app, seed_user, TEST_JWT_SECRET};

async fn build_app_with_admin() -> (Router, sqlx::SqlitePool) {
    let (app, db_pool) = build_app().await;
    seed_user(&db_pool, "admin", "password123", Role::Admin).await;
    (app, db_pool)
}

async fn login(app: &Router, username: &str, password: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/login")
                .header("content-type", "application/json")
                .body(Body::from(
                    serde_json::to_vec(&json!({
                        "username": username,
                        "password": password
                    }))
                    .unwrap(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, value)
}

async fn get_items_with_auth_header(app: &Router, header: Option<&str>) -> StatusCode {
    let mut builder = Request::builder().method("GET").uri("/items");
    if let Some(value) = header {
        builder = builder.header("authorization", value);
    }
    let response = app
        .clone()
        .oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap();
    response.status()
}

// ---------------------------------------------------------------------------
// POST /login
// ---------------------------------------------------------------------------

/// 登録ユーザーでのログイン成功
#[tokio::test]
async fn test_login_success() {
    let (app, _db_pool) = build_app_with_admin().await;
    let (status, body) = login(&app, "admin", "password123").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["token"].is_string());
    assert_eq!(body["expires_in"], 86400);
    assert_eq!(body["user"]["username"], "admin");
    assert_eq!(body["user"]["role"], "admin");
}

/// 発行されたトークンは24時間有効なクレームを持つ
#[tokio::test]
async fn test_login_token_carries_identity_and_expiry() {
    let (app, _db_pool) = build_app_with_admin().await;
    let (_, body) = login(&app, "admin", "password123").await;

    let token = body["token"].as_str().unwrap();
    let claims = invctl::auth::jwt::verify_token(token, TEST_JWT_SECRET).unwrap();
    assert_eq!(claims.sub, "admin");
    assert_eq!(claims.role, Role::Admin);
    assert_eq!((claims.exp - claims.iat) / 3600, 24);
}

/// パスワード誤りでログイン失敗
#[tokio::test]
async fn test_login_failure_wrong_password() {
    let (app, _db_pool) = build_app_with_admin().await;
    let (status, _body) = login(&app, "admin", "wrongpass").await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

/// 存在しないユーザーと誤パスワードのレスポンスは区別できない
#[tokio::test]
async fn test_login_failure_does_not_leak_user_existence() {
    let (app, _db_pool) = build_app_with_admin().await;

    let (ghost_status, ghost_body) = login(&app, "ghost", "anything").await;
    let (wrong_status, wrong_body) = login(&app, "admin", "wrongpass").await;

    assert_eq!(ghost_status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_status, StatusCode::UNAUTHORIZED);
    // ボディも完全一致（列挙攻撃へのシグナルなし）
    assert_eq!(ghost_body, wrong_body);
    assert_eq!(ghost_body["error"], "Invalid username or password");
}

/// ユーザー名なしのリクエストは422
#[tokio::test]
async fn test_login_missing_field_returns_422() {
    let (app, _db_pool) = build_app_with_admin().await;

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/login")
                .header("content-type", "application/json")
                .body(Body::from(
                    serde_json::to_vec(&json!({"username": "admin"})).unwrap(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

// ---------------------------------------------------------------------------
// 保護ルートのトークン検証
// ---------------------------------------------------------------------------

/// Authorizationヘッダーなしは401
#[tokio::test]
async fn test_protected_route_requires_header() {
    let (app, _db_pool) = build_app_with_admin().await;
    let status = get_items_with_auth_header(&app, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

/// Bearerプレフィックスなしは401
#[tokio::test]
async fn test_protected_route_rejects_malformed_header() {
    let (app, _db_pool) = build_app_with_admin().await;

    let token = crate::support::app::issue_token("admin", Role::Admin);
    // 生トークン（プレフィックスなし）
    assert_eq!(
        get_items_with_auth_header(&app, Some(&token)).await,
        StatusCode::UNAUTHORIZED
    );
    // 別スキーム
    assert_eq!(
        get_items_with_auth_header(&app, Some("Basic YWRtaW46cHc=")).await,
        StatusCode::UNAUTHORIZED
    );
    // 空のBearer
    assert_eq!(
        get_items_with_auth_header(&app, Some("Bearer ")).await,
        StatusCode::UNAUTHORIZED
    );
}

/// 改ざんトークンは401
#[tokio::test]
async fn test_protected_route_rejects_forged_token() {
    let (app, _db_pool) = build_app_with_admin().await;

    let forged =
        invctl::auth::jwt::issue_token("admin", Role::Admin, "some-other-secret").unwrap();
    let header = format!("Bearer {}", forged);
    assert_eq!(
        get_items_with_auth_header(&app, Some(&header)).await,
        StatusCode::UNAUTHORIZED
    );
}

/// 署名が正しくても期限切れトークンは401
#[tokio::test]
async fn test_protected_route_rejects_expired_token() {
    let (app, _db_pool) = build_app_with_admin().await;

    let now = chrono::Utc::now().timestamp() as usize;
    let claims = Claims {
        sub: "admin".to_string(),
        role: Role::Admin,
        iat: now - 100_000,
        exp: now - 7_200,
    };
    let expired = jsonwebtoken::encode(
        &jsonwebtoken::Header::default(),
        &claims,
        &jsonwebtoken::EncodingKey::from_secret(TEST_JWT_SECRET.as_bytes()),
    )
    .unwrap();

    let header = format!("Bearer {}", expired);
    assert_eq!(
        get_items_with_auth_header(&app, Some(&header)).await,
        StatusCode::UNAUTHORIZED
    );
}

/// 有効なトークンは保護ルートを通過する
#[tokio::test]
async fn test_protected_route_accepts_valid_token() {
    let (app, _db_pool) = build_app_with_admin().await;

    let token = crate::support::app::issue_token("admin", Role::Admin);
    let header = format!("Bearer {}", token);
    assert_eq!(
        get_items_with_auth_header(&app, Some(&header)).await,
        StatusCode::OK
    );
}
