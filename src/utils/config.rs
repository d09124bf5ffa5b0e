// Configuration utilities
// Author: Gabriel Demetrios Lafis

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::request::DEFAULT_TIMEOUT_MS;
use super::error::{AppError, AppResult};
use super::validation::{validate_not_empty, validate_range};

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub client: ClientConfig,
    pub rate_limit: RateLimitConfig,
    pub logging: LoggingConfig,
}

/// Outbound client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Hard deadline for the outbound fetch, in milliseconds
    pub timeout_ms: u64,
}

/// Per-call rate limit bounds applied by the orchestrator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    pub max_requests: u32,
    pub window_ms: i64,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub file: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            client: ClientConfig {
                timeout_ms: DEFAULT_TIMEOUT_MS,
            },
            rate_limit: RateLimitConfig {
                max_requests: 5,
                window_ms: 60_000,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                file: None,
            },
        }
    }
}

impl Config {
    /// Load configuration from a JSON or YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> AppResult<Self> {
        let mut file = File::open(&path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        let config = if path.as_ref().extension().map_or(false, |ext| ext == "json") {
            serde_json::from_str(&contents)
                .map_err(|err| AppError::Config(err.to_string()))?
        } else if path.as_ref().extension().map_or(false, |ext| ext == "yaml" || ext == "yml") {
            serde_yaml::from_str(&contents)
                .map_err(|err| AppError::Config(err.to_string()))?
        } else {
            return Err(AppError::Config("Unsupported config file format".to_string()));
        };

        Ok(config)
    }

    /// Check that configured values are usable
    pub fn validate(&self) -> AppResult<()> {
        validate_range(self.client.timeout_ms, 1, 300_000, "client.timeout_ms")
            .map_err(AppError::Config)?;
        validate_range(self.rate_limit.max_requests, 1, 10_000, "rate_limit.max_requests")
            .map_err(AppError::Config)?;
        validate_range(self.rate_limit.window_ms, 1, 86_400_000, "rate_limit.window_ms")
            .map_err(AppError::Config)?;
        validate_not_empty(&self.logging.level, "logging.level")
            .map_err(AppError::Config)?;

        Ok(())
    }

    /// Get the log level filter
    pub fn log_level_filter(&self) -> log::LevelFilter {
        match self.logging.level.to_lowercase().as_str() {
            "off" => log::LevelFilter::Off,
            "error" => log::LevelFilter::Error,
            "warn" => log::LevelFilter::Warn,
            "info" => log::LevelFilter::Info,
            "debug" => log::LevelFilter::Debug,
            "trace" => log::LevelFilter::Trace,
            _ => log::LevelFilter::Info,
        }
    }
}
