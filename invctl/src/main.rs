//! invctl Server Entry Point

use clap::Parser;
use invctl::cli::{Cli, Commands};
use invctl::config::AppConfig;
use invctl::{bootstrap, logging, server};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init();

    match cli.command {
        Some(Commands::CreateUser(args)) => {
            if let Err(e) = invctl::cli::create_user::execute(&args).await {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
        Some(Commands::HashPassword(args)) => {
            if let Err(e) = invctl::cli::hash_password::execute(&args) {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
        Some(Commands::Serve(args)) => {
            let mut config = AppConfig::from_env();
            config.host = args.host;
            config.port = args.port;
            serve(config).await;
        }
        None => {
            serve(AppConfig::from_env()).await;
        }
    }
}

async fn serve(config: AppConfig) {
    let bind_addr = config.bind_addr();
    let state = bootstrap::initialize(config)
        .await
        .expect("Failed to initialize server");

    server::run(state, &bind_addr).await;
}
