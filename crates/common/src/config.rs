//! Configuration management following 12-factor app principles
//!
//! All configuration is loaded from environment variables to ensure
//! clean separation between code and config.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::env;

/// Log output format for the server binary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(anyhow::anyhow!("Unknown LOG_FORMAT '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Database connection URL (PostgreSQL)
    pub database_url: String,

    /// Token signing
    pub jwt_secret: String,
    pub jwt_issuer: Option<String>,
    pub access_token_ttl_minutes: i64,
    pub refresh_token_ttl_days: i64,

    /// Password hashing work factor
    pub bcrypt_cost: u32,

    /// Runtime configuration
    pub rust_log: String,
    pub log_format: LogFormat,
    pub port: u16,
    pub run_migrations: bool,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // Load .env file if it exists

        let config = Self {
            database_url: env::var("DATABASE_URL")
                .map_err(|_| anyhow::anyhow!("DATABASE_URL is required"))?,

            jwt_secret: env::var("JWT_SECRET")
                .map_err(|_| anyhow::anyhow!("JWT_SECRET is required"))?,
            jwt_issuer: env::var("JWT_ISSUER").ok().filter(|s| !s.is_empty()),
            access_token_ttl_minutes: parse_var("ACCESS_TOKEN_TTL_MINUTES", 60)?,
            refresh_token_ttl_days: parse_var("REFRESH_TOKEN_TTL_DAYS", 7)?,

            bcrypt_cost: parse_var("BCRYPT_COST", 12)?,

            rust_log: env::var("RUST_LOG")
                .unwrap_or_else(|_| "jobboard=info,tower_http=info".to_string()),
            log_format: parse_var("LOG_FORMAT", LogFormat::Pretty)?,
            port: parse_var("PORT", 8000)?,
            run_migrations: parse_var("RUN_MIGRATIONS", true)?,
        };

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.jwt_secret.len() < 16 {
            anyhow::bail!("JWT_SECRET must be at least 16 characters");
        }
        if !(4..=31).contains(&self.bcrypt_cost) {
            anyhow::bail!("BCRYPT_COST must be between 4 and 31");
        }
        if self.access_token_ttl_minutes <= 0 || self.refresh_token_ttl_days <= 0 {
            anyhow::bail!("Token lifetimes must be positive");
        }
        Ok(())
    }
}

/// Parse an optional variable, falling back to `default` when unset.
fn parse_var<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| anyhow::anyhow!("{} is invalid: {}", name, e)),
        Err(_) => Ok(default),
    }
}
