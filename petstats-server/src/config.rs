//! Server configuration loaded from the environment.

use std::str::FromStr;

use petstats_core::{AggregationMode, StatsError};

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_POOL_SIZE: u32 = 10;
const DEFAULT_UI_ORIGINS: &str = "http://127.0.0.1:4200,http://localhost:4200";

/// Runtime settings for the HTTP server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Address to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
    /// PostgreSQL connection string.
    pub database_url: String,
    /// Maximum pooled connections.
    pub pool_size: u32,
    /// Origins allowed by CORS.
    pub ui_origins: Vec<String>,
    /// How statistics are gathered.
    pub aggregation_mode: AggregationMode,
}

impl ServerConfig {
    /// Build the configuration from process environment variables.
    #[cfg_attr(test, allow(dead_code))]
    pub fn from_env() -> Result<Self, StatsError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, StatsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .filter(|value| !value.trim().is_empty())
            .ok_or_else(|| {
                StatsError::Config(
                    "DATABASE_URL must be set to a PostgreSQL connection string".to_string(),
                )
            })?;
        let host = lookup("PETSTATS_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = parse_or("PETSTATS_PORT", lookup("PETSTATS_PORT"), DEFAULT_PORT)?;
        let pool_size = parse_or(
            "PETSTATS_DB_POOL_SIZE",
            lookup("PETSTATS_DB_POOL_SIZE"),
            DEFAULT_POOL_SIZE,
        )?;
        if pool_size == 0 {
            return Err(StatsError::Config(
                "PETSTATS_DB_POOL_SIZE must be at least 1".to_string(),
            ));
        }
        let ui_origins = parse_origins(
            &lookup("PETSTATS_UI_ORIGINS").unwrap_or_else(|| DEFAULT_UI_ORIGINS.to_string()),
        );
        let aggregation_mode = match lookup("PETSTATS_AGGREGATION_MODE") {
            Some(value) => value.parse()?,
            None => AggregationMode::default(),
        };

        Ok(Self {
            host,
            port,
            database_url,
            pool_size,
            ui_origins,
            aggregation_mode,
        })
    }
}

fn parse_or<T: FromStr>(key: &str, value: Option<String>, default: T) -> Result<T, StatsError> {
    match value {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| StatsError::Config(format!("{key} has an invalid value '{raw}'"))),
        None => Ok(default),
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|value| value.trim())
        .filter(|origin| !origin.is_empty())
        .map(String::from)
        .collect()
}
