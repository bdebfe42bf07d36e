use std::{env, str::FromStr};

use anyhow::{Context, Result, anyhow};
use dotenvy::dotenv;
use tracing::Level;

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub server_addr: String,
    pub db_max_connections: u32,
    pub api_prefix: String,

    // Rate limiting
    pub rate_upload_per_min: u32,
    pub rate_calculate_per_min: u32,

    // Logging
    pub log_dir: String,
    pub log_level: Level,

    pub init_schema_on_start: bool,
    pub json_limit_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup, defaulting everything except
    /// `DATABASE_URL`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        fn parsed<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
        where
            T: FromStr,
            T::Err: std::fmt::Display,
        {
            match lookup(key) {
                Some(raw) => raw
                    .trim()
                    .parse()
                    .map_err(|e| anyhow!("{key}={raw:?} is invalid: {e}")),
                None => Ok(default),
            }
        }

        let database_url = lookup("DATABASE_URL").context("DATABASE_URL must be set")?;

        Ok(Self {
            database_url,
            server_addr: lookup("SERVER_ADDR").unwrap_or_else(|| "127.0.0.1:8080".to_string()),
            db_max_connections: parsed(&lookup, "DB_MAX_CONNECTIONS", 10)?,
            api_prefix: lookup("API_PREFIX").unwrap_or_else(|| "/api".to_string()),

            rate_upload_per_min: parsed(&lookup, "RATE_UPLOAD_PER_MIN", 30)?,
            rate_calculate_per_min: parsed(&lookup, "RATE_CALCULATE_PER_MIN", 60)?,

            log_dir: lookup("LOG_DIR").unwrap_or_else(|| "logs".to_string()),
            log_level: parsed(&lookup, "LOG_LEVEL", Level::DEBUG)?,

            init_schema_on_start: parsed(&lookup, "INIT_SCHEMA_ON_START", true)?,
            json_limit_bytes: parsed(&lookup, "JSON_LIMIT_BYTES", 8 * 1024 * 1024)?,
        })
    }
}
