//! ロギング初期化ユーティリティ

use tracing_subscriber::EnvFilter;

/// tracingサブスクライバーを初期化する
///
/// `RUST_LOG`が設定されていればそれを使用し、未設定の場合は
/// `invctl=info,tower_http=info`をデフォルトとする。
pub fn init() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "invctl=info,tower_http=info".into());

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .init();
}
