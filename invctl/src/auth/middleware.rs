//! 認証ミドルウェア実装

use crate::api::error::AppError;
use crate::AppState;
use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::{IntoResponse, Response},
};

/// JWT認証ミドルウェア
///
/// AuthorizationヘッダーのBearerトークンを検証し、検証済みの
/// クレームをrequest extensionsに格納する。保護対象の全ルートで
/// ストレージ操作より前に実行される。
///
/// # Arguments
/// * `State(state)` - アプリケーション状態（jwt_secret）
/// * `request` - 受信リクエスト
/// * `next` - 次のミドルウェア/ハンドラー
///
/// # Returns
/// * `Ok(Response)` - 認証成功、後続処理のレスポンス
/// * `Err(Response)` - 401 Unauthorized
pub async fn jwt_auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, Response> {
    let header_value = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let claims =
        crate::auth::verify_bearer(header_value, &state.config.jwt_secret).map_err(|e| {
            tracing::warn!("Authentication failed: {}", e);
            AppError(e).into_response()
        })?;

    // 検証済みのClaimsをrequestの拡張データに格納
    request.extensions_mut().insert(claims);

    Ok(next.run(request).await)
}
