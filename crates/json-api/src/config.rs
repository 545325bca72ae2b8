//! Server configuration module

use std::time::Duration;

use clap::Parser;

/// Waitline JSON API Server configuration
#[derive(Debug, Parser)]
#[command(name = "waitline-json", about = "Waitline JSON API Server", long_about = None)]
pub struct ServerConfig {
    /// Server host address
    #[arg(short = 'H', long, env = "SERVER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Server port
    #[arg(short, long, env = "PORT", default_value = "3001")]
    pub port: u16,

    /// Log filter applied when `RUST_LOG` is unset
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// `PostgreSQL` connection string
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: String,

    /// Password protecting the admin endpoints
    #[arg(long, env = "ADMIN_PASSWORD", hide_env_values = true)]
    pub admin_password: String,

    /// Signup requests admitted per client per window
    #[arg(long, env = "RATE_LIMIT_MAX", default_value = "5")]
    pub rate_limit_max: u32,

    /// Rate limit window length in seconds
    #[arg(long, env = "RATE_LIMIT_WINDOW_SECS", default_value = "900")]
    pub rate_limit_window_secs: u64,
}

impl ServerConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Get the socket address for binding
    #[must_use]
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Rate limit window as a duration
    #[must_use]
    pub fn rate_limit_window(&self) -> Duration {
        Duration::from_secs(self.rate_limit_window_secs)
    }
}
