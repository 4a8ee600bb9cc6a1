//! invctl - inventory control service
//!
//! 認証付き在庫管理サービス。アイテムへのすべての変更は変更者を
//! 記録した監査エントリと同一トランザクションで永続化される。

#![warn(missing_docs)]

/// 共通型定義
pub mod common;

/// REST APIハンドラー
pub mod api;

/// 認証・認可機能
pub mod auth;

/// データベースアクセス
pub mod db;

/// 設定管理（環境変数ヘルパー）
pub mod config;

/// ロギング初期化ユーティリティ
pub mod logging;

/// サーバー初期化ロジック
pub mod bootstrap;

/// axumサーバー起動・シャットダウンハンドリング
pub mod server;

/// CLIインターフェース
pub mod cli;

/// アプリケーション状態
#[derive(Clone)]
pub struct AppState {
    /// データベース接続プール
    pub db_pool: sqlx::SqlitePool,
    /// アプリケーション設定（JWT秘密鍵を含む）
    pub config: config::AppConfig,
}
