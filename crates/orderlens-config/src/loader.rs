//! Configuration loading utilities

use crate::Config;
use chrono::NaiveDate;
use orderlens_common::Result as OrderLensResult;
use std::env;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error when reading configuration file
    #[error("Failed to read configuration file: {0}")]
    IoError(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML configuration: {0}")]
    ParseError(#[from] serde_yaml::Error),

    /// Configuration validation error
    #[error("Configuration validation failed: {0}")]
    ValidationError(#[from] orderlens_common::OrderLensError),

    /// Environment variable parsing error
    #[error("Failed to parse environment variable '{var}': {source}")]
    EnvParseError {
        var: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl From<ConfigError> for orderlens_common::OrderLensError {
    fn from(err: ConfigError) -> Self {
        orderlens_common::OrderLensError::config(err.to_string())
    }
}

fn parse_env_date(var: &str, value: &str) -> Result<NaiveDate, ConfigError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|e| ConfigError::EnvParseError {
        var: var.to_string(),
        source: Box::new(e),
    })
}

fn parse_env_usize(var: &str, value: &str) -> Result<usize, ConfigError> {
    value.parse().map_err(|e: std::num::ParseIntError| {
        ConfigError::EnvParseError {
            var: var.to_string(),
            source: Box::new(e),
        }
    })
}

/// Configuration loader for the application
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a YAML file with environment variable overrides
    pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let mut config: Config = serde_yaml::from_str(&content)?;

        Self::apply_env_overrides(&mut config)?;
        config.validate_all()?;

        debug!("Loaded configuration from {}", path.as_ref().display());
        Ok(config)
    }

    /// Load configuration from environment variables and files.
    ///
    /// Order: `ORDERLENS_CONFIG_PATH`, then `config.yaml`/`config.yml` in the
    /// working directory, then built-in defaults. Environment overrides apply
    /// in every case.
    pub fn load() -> OrderLensResult<Config> {
        let config = if let Ok(config_path) = env::var("ORDERLENS_CONFIG_PATH") {
            Self::load_config(&config_path)?
        } else if Path::new("config.yaml").exists() {
            Self::load_config("config.yaml")?
        } else if Path::new("config.yml").exists() {
            Self::load_config("config.yml")?
        } else {
            let mut config = Config::default();
            Self::apply_env_overrides(&mut config).map_err(orderlens_common::OrderLensError::from)?;
            config.validate_all()?;
            config
        };

        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> OrderLensResult<Config> {
        Ok(Self::load_config(path)?)
    }

    /// Apply environment variable overrides to configuration
    fn apply_env_overrides(config: &mut Config) -> Result<(), ConfigError> {
        if let Ok(path) = env::var("ORDERLENS_DATA_PATH") {
            config.data.csv_path = path;
        }

        if let Ok(date) = env::var("ORDERLENS_START_DATE") {
            config.window.start_date = Some(parse_env_date("ORDERLENS_START_DATE", &date)?);
        }

        if let Ok(date) = env::var("ORDERLENS_END_DATE") {
            config.window.end_date = Some(parse_env_date("ORDERLENS_END_DATE", &date)?);
        }

        if let Ok(level) = env::var("ORDERLENS_LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Ok(currency) = env::var("ORDERLENS_CURRENCY") {
            config.display.currency = currency;
        }

        if let Ok(locale) = env::var("ORDERLENS_LOCALE") {
            config.display.locale = locale;
        }

        if let Ok(n) = env::var("ORDERLENS_TOP_CATEGORIES") {
            config.display.top_categories = parse_env_usize("ORDERLENS_TOP_CATEGORIES", &n)?;
        }

        if let Ok(n) = env::var("ORDERLENS_TOP_STATES") {
            config.display.top_states = parse_env_usize("ORDERLENS_TOP_STATES", &n)?;
        }

        if let Ok(n) = env::var("ORDERLENS_TOP_CUSTOMERS") {
            config.display.top_customers = parse_env_usize("ORDERLENS_TOP_CUSTOMERS", &n)?;
        }

        Ok(())
    }
}
