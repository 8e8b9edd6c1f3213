use std::{net::SocketAddr, time::Duration};

use interfaces_gsoc_organizations::index::DEFAULT_BASE_URL;
use thiserror::Error;

pub const DEFAULT_SYNC_YEARS: [i32; 4] = [2022, 2023, 2024, 2025];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing environment variable {key}")]
    Missing { key: &'static str },

    #[error("Invalid value {value:?} for {key}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub user: String,
    pub password: String,
    pub host: String,
    pub port: u16,
    pub name: String,
    pub connect_attempts: u32,
    pub connect_delay: Duration,
    pub connect_timeout: Duration,
}

impl DatabaseConfig {
    pub fn url(&self) -> String {
        format!(
            "postgres://{}:{}@{}:{}/{}",
            urlencoding::encode(&self.user),
            urlencoding::encode(&self.password),
            self.host,
            self.port,
            self.name,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub api_base_url: String,
    pub sync_years: Vec<i32>,
    pub bind_addr: SocketAddr,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let required = |key: &'static str| lookup(key).ok_or(ConfigError::Missing { key });

        let database = DatabaseConfig {
            user: required("DB_USER")?,
            password: required("DB_PASSWORD")?,
            host: required("DB_HOST")?,
            name: required("DB_NAME")?,
            port: parsed(&lookup, "DB_PORT", 5432)?,
            connect_attempts: parsed(&lookup, "DB_CONNECT_ATTEMPTS", 10)?,
            connect_delay: Duration::from_secs(parsed(&lookup, "DB_CONNECT_DELAY_SECS", 3)?),
            connect_timeout: Duration::from_secs(parsed(&lookup, "DB_CONNECT_TIMEOUT_SECS", 3)?),
        };

        let sync_years = match lookup("SYNC_YEARS") {
            Some(raw) => parse_years(&raw)?,
            None => DEFAULT_SYNC_YEARS.to_vec(),
        };

        Ok(Self {
            database,
            api_base_url: lookup("GSOC_API_BASE_URL")
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            sync_years,
            bind_addr: parsed(&lookup, "BIND_ADDR", SocketAddr::from(([0, 0, 0, 0], 8080)))?,
        })
    }
}

fn parsed<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(key) {
        Some(value) => value.trim().parse().map_err(|_| ConfigError::Invalid { key, value }),
        None => Ok(default),
    }
}

fn parse_years(raw: &str) -> Result<Vec<i32>, ConfigError> {
    let years = raw
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| part.parse::<i32>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| ConfigError::Invalid { key: "SYNC_YEARS", value: raw.to_string() })?;

    if years.is_empty() {
        return Err(ConfigError::Invalid { key: "SYNC_YEARS", value: raw.to_string() });
    }
    Ok(years)
}
