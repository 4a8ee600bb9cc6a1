//! サーバー初期化ロジック
//!
//! データベース接続、マイグレーション、管理者アカウント作成など
//! サーバー起動に必要なコンポーネントの初期化を担当する。

use crate::common::error::InvError;
use crate::config::AppConfig;
use crate::{auth, db, AppState};
use tracing::info;

/// サーバー初期化を実行する
///
/// DB接続プールの作成、マイグレーション、環境変数からの管理者
/// アカウント作成を行い、`AppState`を返す。
///
/// # Arguments
/// * `config` - アプリケーション設定
///
/// # Returns
/// * `Ok(AppState)` - 初期化済みアプリケーション状態
/// * `Err(InvError)` - 初期化失敗
pub async fn initialize(config: AppConfig) -> Result<AppState, InvError> {
    info!("invctl v{}", env!("CARGO_PKG_VERSION"));

    let db_pool = db::migrations::initialize_database(&config.database_url).await?;

    if let Some(username) = auth::bootstrap::create_admin_from_env(&db_pool).await? {
        info!("Admin user available: {}", username);
    }

    Ok(AppState { db_pool, config })
}
