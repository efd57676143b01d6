//! Configuration management for the election service
//!
//! Loads configuration from environment variables (and an optional `.env`
//! file) with validation.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use zeroize::Zeroizing;

/// Minimum accepted length for the shared admin secret
const MIN_ADMIN_SECRET_LEN: usize = 8;

/// Default data directory, matching the persistent disk of the deployment
const DEFAULT_DATA_DIR: &str = "/var/data";

/// Shared admin secret, wiped from memory on drop
#[derive(Clone)]
pub struct AdminSecret(Zeroizing<String>);

impl AdminSecret {
    pub fn new(secret: impl Into<String>) -> Result<Self> {
        let secret = Zeroizing::new(secret.into());
        if secret.chars().count() < MIN_ADMIN_SECRET_LEN {
            return Err(Error::validation(
                "ELECTION_ADMIN_SECRET",
                format!("must be at least {MIN_ADMIN_SECRET_LEN} characters"),
            ));
        }
        Ok(Self(secret))
    }

    /// Compare a login attempt against the secret in constant time
    pub fn verify(&self, attempt: &str) -> bool {
        use subtle::ConstantTimeEq;
        self.0.as_bytes().ct_eq(attempt.as_bytes()).into()
    }
}

impl fmt::Debug for AdminSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AdminSecret(<redacted>)")
    }
}

/// Where the record store keeps its documents
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    /// `pretty`, `compact` or `json`
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub storage: StorageConfig,
    pub admin_secret: AdminSecret,
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from environment
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let data_dir = std::env::var("ELECTION_DATA_DIR")
            .unwrap_or_else(|_| DEFAULT_DATA_DIR.to_string());
        if data_dir.trim().is_empty() {
            return Err(Error::validation("ELECTION_DATA_DIR", "must not be empty"));
        }

        let admin_secret = std::env::var("ELECTION_ADMIN_SECRET").map_err(|_| {
            Error::validation("ELECTION_ADMIN_SECRET", "environment variable required")
        })?;

        let logging = LoggingConfig {
            level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            format: std::env::var("LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string()),
        };
        Self::validate_log_format(&logging.format)?;

        Ok(Self {
            storage: StorageConfig {
                data_dir: PathBuf::from(data_dir),
            },
            admin_secret: AdminSecret::new(admin_secret)?,
            logging,
        })
    }

    /// Create configuration for testing
    pub fn for_testing(data_dir: impl Into<PathBuf>) -> Result<Self> {
        Ok(Self {
            storage: StorageConfig {
                data_dir: data_dir.into(),
            },
            admin_secret: AdminSecret::new("test-admin-secret")?,
            logging: LoggingConfig {
                level: "debug".to_string(),
                format: "pretty".to_string(),
            },
        })
    }

    fn validate_log_format(format: &str) -> Result<()> {
        match format {
            "pretty" | "compact" | "json" => Ok(()),
            other => Err(Error::validation(
                "LOG_FORMAT",
                format!("expected pretty, compact or json; got {other:?}"),
            )),
        }
    }
}
