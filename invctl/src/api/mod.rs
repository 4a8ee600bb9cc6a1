//! REST APIハンドラー

use crate::AppState;
use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

/// 認証API
pub mod auth;

/// APIエラーレスポンス型
pub mod error;

/// 監査履歴API
pub mod history;

/// 在庫アイテムAPI
pub mod items;

/// アプリケーションのルーターを構築する
///
/// `/login`以外のすべてのルートはJWT認証ミドルウェアの背後に置かれ、
/// ストレージ操作が実行される前にトークン検証が行われる。
///
/// # Arguments
/// * `state` - アプリケーション状態
///
/// # Returns
/// 構築済みのaxum Router
pub fn create_app(state: AppState) -> Router {
    let protected = Router::new()
        .route("/items", post(items::create_item).get(items::list_items))
        .route(
            "/items/:id",
            get(items::get_item)
                .put(items::update_item)
                .delete(items::delete_item),
        )
        .route("/history", get(history::all_history))
        .route("/history/:id", get(history::item_history))
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            crate::auth::middleware::jwt_auth_middleware,
        ));

    Router::new()
        .route("/login", post(auth::login))
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
