//! Configuration management via environment variables
//!
//! All runtime configuration is collected once at startup into an
//! explicit [`AppConfig`] value that is passed into the application
//! state; no global variable holds the signing secret.

use rand::distributions::Alphanumeric;
use rand::Rng;

/// Get an environment variable with a default value
///
/// # Arguments
/// * `name` - The environment variable name
/// * `default` - The default value to return if the variable is not set
///
/// # Returns
/// The environment variable value or the default
pub fn env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

/// Get an environment variable, parsing to a specific type
///
/// # Arguments
/// * `name` - The environment variable name
/// * `default` - The default value to return if the variable is not set
///   or parsing fails
///
/// # Returns
/// The parsed environment variable value or the default
pub fn env_parse<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Bind address
    pub host: String,
    /// Listen port
    pub port: u16,
    /// Database URL (e.g. "sqlite:data/invctl.db")
    pub database_url: String,
    /// JWT signing secret
    pub jwt_secret: String,
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// `INVCTL_JWT_SECRET` should be set in production; if missing, a
    /// random secret is generated and issued tokens will not survive a
    /// restart.
    pub fn from_env() -> Self {
        let host = env_or("INVCTL_HOST", "0.0.0.0");
        let port = env_parse("INVCTL_PORT", 8080u16);
        let database_url = env_or("INVCTL_DATABASE_URL", "sqlite:data/invctl.db");

        let jwt_secret = match std::env::var("INVCTL_JWT_SECRET") {
            Ok(secret) if !secret.is_empty() => secret,
            _ => {
                tracing::warn!(
                    "INVCTL_JWT_SECRET not set, generating a random secret; \
                     issued tokens will be invalidated on restart"
                );
                generate_secret(48)
            }
        };

        Self {
            host,
            port,
            database_url,
            jwt_secret,
        }
    }

    /// Socket address string for the listener.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Generate a random alphanumeric secret of the given length.
fn generate_secret(len: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}
