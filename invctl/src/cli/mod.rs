//! CLI module for invctl
//!
//! Provides command-line interface for inventory service management.

pub mod create_user;
pub mod hash_password;
pub mod serve;

use clap::{Parser, Subcommand};

/// invctl - inventory control service with audited mutations
#[derive(Parser, Debug)]
#[command(name = "invctl")]
#[command(version, about, long_about = None)]
#[command(after_help = r#"ENVIRONMENT VARIABLES:
    INVCTL_HOST             Bind address (default: 0.0.0.0)
    INVCTL_PORT             Listen port (default: 8080)
    INVCTL_DATABASE_URL     Database URL (default: sqlite:data/invctl.db)
    INVCTL_JWT_SECRET       JWT signing key (random if not set)
    INVCTL_ADMIN_USERNAME   Initial admin username (default: admin)
    INVCTL_ADMIN_PASSWORD   Initial admin password (enables bootstrap)
"#)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the inventory service
    Serve(serve::ServeArgs),
    /// Create a user directly in the database
    CreateUser(create_user::CreateUserArgs),
    /// Print the bcrypt hash of a password (for out-of-band seeding)
    HashPassword(hash_password::HashPasswordArgs),
}
