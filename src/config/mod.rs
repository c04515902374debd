//! Configuration module for the pet server.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

/// Origins allowed to call the API when `PETS_CORS_ORIGINS` is unset.
pub const DEFAULT_CORS_ORIGINS: [&str; 3] = [
    "http://localhost:5173",
    "http://localhost:5174",
    "https://bjet-11-fc192.web.app",
];

const DEFAULT_PORT: u16 = 5000;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Path to the SQLite document store
    pub db_path: PathBuf,
    /// Origins allowed by the CORS layer (credentials are always allowed)
    pub cors_origins: Vec<String>,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Emit logs as JSON lines instead of human-readable text
    pub log_json: bool,
    /// Insert the literal dataset into empty collections at startup
    pub seed_on_startup: bool,
    /// How long to wait for the store to close during shutdown
    pub shutdown_timeout: Duration,
}

/// A configuration variable that is set but cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    pub variable: &'static str,
    pub value: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid value for {}: {:?}", self.variable, self.value)
    }
}

impl std::error::Error for ConfigError {}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host: IpAddr = parse_var(&lookup, "PETS_HOST", IpAddr::from([0, 0, 0, 0]))?;
        let port: u16 = parse_var(&lookup, "PORT", DEFAULT_PORT)?;

        let db_path = lookup("PETS_DB_PATH")
            .unwrap_or_else(|| "./data/pets.sqlite".to_string())
            .into();

        let cors_origins: Vec<String> = match lookup("PETS_CORS_ORIGINS") {
            Some(raw) => raw
                .split(',')
                .map(str::trim)
                .filter(|origin| !origin.is_empty())
                .map(str::to_string)
                .collect(),
            None => DEFAULT_CORS_ORIGINS.iter().map(|s| s.to_string()).collect(),
        };

        // A wildcard cannot be combined with credentialed CORS responses
        if let Some(wildcard) = cors_origins.iter().find(|origin| origin.as_str() == "*") {
            return Err(ConfigError {
                variable: "PETS_CORS_ORIGINS",
                value: wildcard.clone(),
            });
        }

        let log_level = lookup("PETS_LOG_LEVEL").unwrap_or_else(|| "info".to_string());

        let log_json = match lookup("PETS_LOG_FORMAT") {
            Some(raw) => match raw.trim().to_ascii_lowercase().as_str() {
                "json" => true,
                "text" | "pretty" => false,
                _ => {
                    return Err(ConfigError {
                        variable: "PETS_LOG_FORMAT",
                        value: raw,
                    })
                }
            },
            None => false,
        };

        let seed_on_startup = match lookup("PETS_SEED") {
            Some(raw) => parse_flag(&raw).ok_or(ConfigError {
                variable: "PETS_SEED",
                value: raw,
            })?,
            None => true,
        };

        let shutdown_secs: u64 = parse_var(&lookup, "PETS_SHUTDOWN_TIMEOUT_SECS", 10)?;

        Ok(Self {
            bind_addr: SocketAddr::new(host, port),
            db_path,
            cors_origins,
            log_level,
            log_json,
            seed_on_startup,
            shutdown_timeout: Duration::from_secs(shutdown_secs),
        })
    }
}

fn parse_var<F, T>(lookup: &F, variable: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(variable) {
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError {
            variable,
            value: raw,
        }),
        None => Ok(default),
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
