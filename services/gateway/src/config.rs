//! Configuration loading from environment variables

use std::env;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(String),

    #[error("Invalid value for {0}: {1}")]
    InvalidVar(String, String),
}

/// Gateway configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// PostgreSQL connection URL
    pub database_url: String,

    /// Listen port
    pub port: u16,

    /// HMAC secret for admin bearer tokens
    pub jwt_secret: String,
}

impl Config {
    /// Load configuration, reading a `.env` file if one is present.
    ///
    /// Required:
    /// - DATABASE_URL
    ///
    /// Optional (with defaults):
    /// - PORT (default: 8080)
    /// - JWT_SECRET (default: dev secret, change in production)
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_env_only()
    }

    /// Load from environment variables only, without touching `.env`.
    pub fn from_env_only() -> Result<Self, ConfigError> {
        let database_url = env::var("DATABASE_URL")
            .map_err(|_| ConfigError::MissingVar("DATABASE_URL".to_string()))?;

        let port = match env::var("PORT") {
            Ok(raw) => raw
                .parse()
                .map_err(|_| ConfigError::InvalidVar("PORT".to_string(), raw))?,
            Err(_) => 8080,
        };

        let jwt_secret = env::var("JWT_SECRET")
            .unwrap_or_else(|_| "dev-secret-change-in-production".to_string());

        Ok(Self {
            database_url,
            port,
            jwt_secret,
        })
    }
}
