//! Configuration management for the API server
//!
//! Configuration comes from environment variables, with a `.env` file
//! picked up in development.
//!
//! # Environment Variables
//!
//! - `API_HOST`: Host to bind to (default: 0.0.0.0)
//! - `API_PORT`: Port to bind to (default: 3001)
//! - `DATA_PATH`: JSON data file (default: data.json)
//! - `JWT_SECRET`: Secret key for credential signing (required, 32+ chars)
//! - `JWT_TTL_DAYS`: Credential validity in days, 1 to 3650 (default: 7)
//! - `CORS_ORIGINS`: Comma-separated allowed origins, or `*` (default: *)
//! - `PRODUCTION`: Enables HSTS when `true` (default: false)
//! - `RUST_LOG`: Log filter
//!
//! # Example
//!
//! ```no_run
//! use familyhub_api::config::Config;
//!
//! # fn example() -> anyhow::Result<()> {
//! let config = Config::from_env()?;
//! println!("Server will listen on {}", config.bind_address());
//! # Ok(())
//! # }
//! ```

use familyhub_shared::auth::jwt::JwtSettings;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// API server configuration
    pub api: ApiConfig,

    /// Data file configuration
    pub storage: StorageConfig,

    /// JWT configuration
    pub jwt: JwtConfig,
}

/// API server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Host to bind to
    pub host: String,

    /// Port to bind to
    pub port: u16,

    /// Allowed CORS origins (`*` = permissive)
    pub cors_origins: Vec<String>,

    /// Production mode (enables HSTS)
    pub production: bool,
}

/// Data file configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Path of the JSON document
    pub data_path: PathBuf,
}

/// JWT configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtConfig {
    /// Secret key for credential signing
    ///
    /// Must be at least 32 characters. Generate with: `openssl rand -hex 32`
    pub secret: String,

    /// Credential validity window in days
    pub ttl_days: i64,
}

impl JwtConfig {
    /// Signing settings for the auth gate
    pub fn settings(&self) -> JwtSettings {
        JwtSettings::new(self.secret.clone()).with_ttl(chrono::Duration::days(self.ttl_days))
    }
}

/// Longest accepted credential lifetime, ten years
const MAX_TTL_DAYS: i64 = 3650;

fn parse_ttl_days(raw: &str) -> anyhow::Result<i64> {
    let days = raw.trim().parse::<i64>()?;
    if !(1..=MAX_TTL_DAYS).contains(&days) {
        anyhow::bail!("JWT_TTL_DAYS must be between 1 and {}", MAX_TTL_DAYS);
    }
    Ok(days)
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

fn parse_bool(raw: &str) -> anyhow::Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => anyhow::bail!("Invalid boolean value: {}", other),
    }
}

impl Config {
    /// Loads configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `JWT_SECRET` is missing or shorter than 32 characters
    /// - A numeric or boolean variable has an invalid value
    pub fn from_env() -> anyhow::Result<Self> {
        // Load .env file if present (for development)
        dotenvy::dotenv().ok();

        let host = env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("API_PORT")
            .unwrap_or_else(|_| "3001".to_string())
            .parse::<u16>()?;

        let cors_origins = parse_origins(&env::var("CORS_ORIGINS").unwrap_or_else(|_| "*".to_string()));
        let production = parse_bool(&env::var("PRODUCTION").unwrap_or_default())?;

        let data_path = env::var("DATA_PATH").unwrap_or_else(|_| "data.json".to_string());

        let secret = env::var("JWT_SECRET")
            .map_err(|_| anyhow::anyhow!("JWT_SECRET environment variable is required"))?;
        if secret.len() < 32 {
            anyhow::bail!("JWT_SECRET must be at least 32 characters long");
        }

        let ttl_days =
            parse_ttl_days(&env::var("JWT_TTL_DAYS").unwrap_or_else(|_| "7".to_string()))?;

        Ok(Self {
            api: ApiConfig {
                host,
                port,
                cors_origins,
                production,
            },
            storage: StorageConfig {
                data_path: PathBuf::from(data_path),
            },
            jwt: JwtConfig { secret, ttl_days },
        })
    }

    /// Returns the server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.api.host, self.api.port)
    }

    /// Whether CORS should allow any origin
    pub fn cors_permissive(&self) -> bool {
        self.api.cors_origins.iter().any(|o| o == "*")
    }
}
