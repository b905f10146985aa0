//! Environment configuration
//!
//! Reads the service settings from environment variables (a `.env` file is
//! loaded by `main` before this runs).

use std::env;
use std::str::FromStr;

use anyhow::{Context, Result};

use super::database::DatabaseConfig;

/// Service configuration
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    pub database: DatabaseConfig,
    pub jwt_secret: String,
    pub jwt_expiration: u64,
    pub cors_origins: Vec<String>,
}

impl EnvironmentConfig {
    /// Build the configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            port: parse_var("PORT", 3000)?,
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            database: DatabaseConfig {
                url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
                max_connections: parse_var("DATABASE_MAX_CONNECTIONS", 10)?,
                ..DatabaseConfig::default()
            },
            jwt_secret: env::var("JWT_SECRET").context("JWT_SECRET must be set")?,
            jwt_expiration: parse_var("JWT_EXPIRATION", 86_400)?,
            cors_origins: parse_origins(&env::var("CORS_ORIGINS").unwrap_or_default()),
        })
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Socket address string to bind
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_var<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .with_context(|| format!("{} must be a valid number, got '{}'", name, raw)),
        _ => Ok(default),
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origins_are_trimmed_and_blank_entries_dropped() {
        assert_eq!(
            parse_origins(" https://planner.example , ,http://localhost:5173"),
            vec!["https://planner.example".to_string(), "http://localhost:5173".to_string()]
        );
        assert!(parse_origins("").is_empty());
    }

    #[test]
    fn production_is_detected_by_name() {
        let config = EnvironmentConfig {
            environment: "production".to_string(),
            port: 3000,
            host: "127.0.0.1".to_string(),
            database: DatabaseConfig::default(),
            jwt_secret: "secret".to_string(),
            jwt_expiration: 60,
            cors_origins: Vec::new(),
        };
        assert!(config.is_production());
        assert_eq!(config.server_url(), "127.0.0.1:3000");
    }

    #[test]
    fn unset_numbers_fall_back_to_defaults() {
        let port: u16 = parse_var("OIL_ROUTES_TEST_UNSET_PORT", 3000).unwrap();
        assert_eq!(port, 3000);
    }
}
