//! create-user サブコマンド
//!
//! ユーザー行を直接プロビジョニングする（管理用）。

use crate::common::auth::Role;
use crate::common::error::InvError;
use clap::Args;

/// create-user サブコマンドの引数
#[derive(Args, Debug, Clone)]
pub struct CreateUserArgs {
    /// Username
    #[arg(short, long)]
    pub username: String,

    /// Password (hashed with bcrypt before storage)
    #[arg(short, long, env = "INVCTL_CREATE_USER_PASSWORD")]
    pub password: String,

    /// Role: admin, manager or viewer
    #[arg(short, long, default_value = "viewer")]
    pub role: String,
}

/// create-userコマンドを実行する
///
/// # Arguments
/// * `args` - コマンド引数
///
/// # Returns
/// * `Ok(())` - ユーザー作成成功
/// * `Err(InvError)` - 作成失敗
pub async fn execute(args: &CreateUserArgs) -> Result<(), InvError> {
    let role = match args.role.as_str() {
        "admin" => Role::Admin,
        "manager" => Role::Manager,
        "viewer" => Role::Viewer,
        other => {
            return Err(InvError::Validation(format!(
                "unknown role '{}', expected admin, manager or viewer",
                other
            )))
        }
    };

    let config = crate::config::AppConfig::from_env();
    let pool = crate::db::migrations::initialize_database(&config.database_url).await?;

    let password_hash = crate::auth::password::hash_password(&args.password)?;
    let user = crate::db::users::create(&pool, &args.username, &password_hash, role).await?;

    println!("Created user '{}' with role {}", user.username, user.role.as_str());
    Ok(())
}
