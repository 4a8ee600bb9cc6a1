//! hash-password サブコマンド
//!
//! パスワードのbcryptハッシュを出力する（SQLでの手動シード用）。

use crate::common::error::InvError;
use clap::Args;

/// hash-password サブコマンドの引数
#[derive(Args, Debug, Clone)]
pub struct HashPasswordArgs {
    /// Password to hash
    #[arg(short, long)]
    pub password: String,
}

/// hash-passwordコマンドを実行する
///
/// # Arguments
/// * `args` - コマンド引数
///
/// # Returns
/// * `Ok(())` - ハッシュを標準出力へ出力
/// * `Err(InvError)` - ハッシュ化失敗
pub fn execute(args: &HashPasswordArgs) -> Result<(), InvError> {
    let hash = crate::auth::password::hash_password(&args.password)?;
    println!("{}", hash);
    Ok(())
}
