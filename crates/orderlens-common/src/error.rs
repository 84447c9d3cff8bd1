//! Error types and utilities for orderlens

use thiserror::Error;

/// Result type alias for orderlens operations
pub type Result<T> = std::result::Result<T, OrderLensError>;

/// Main error type for orderlens operations
#[derive(Error, Debug)]
pub enum OrderLensError {
    /// Table construction or column access errors
    #[error("Table error: {message}")]
    Table {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Value parsing errors (timestamps, numerics) in the source data
    #[error("Parse error: {message}")]
    Parse {
        message: String,
        column: Option<String>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration related errors
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// I/O related errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Currency/locale formatting errors
    #[error("Format error: {message}")]
    Format {
        message: String,
        locale: Option<String>,
    },

    /// Validation errors for user input or configuration values
    #[error("Validation error: {message}")]
    Validation {
        message: String,
        field: Option<String>,
    },

    /// Generic error with custom message
    #[error("{message}")]
    Generic {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl OrderLensError {
    /// Create a new generic error with a custom message
    pub fn new(msg: impl Into<String>) -> Self {
        Self::Generic {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new generic error with a custom message and source
    pub fn with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Generic {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new table error
    pub fn table(msg: impl Into<String>) -> Self {
        Self::Table {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new table error with source
    pub fn table_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Table {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new parse error
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse {
            message: msg.into(),
            column: None,
            source: None,
        }
    }

    /// Create a new parse error naming the offending column
    pub fn parse_column(msg: impl Into<String>, column: impl Into<String>) -> Self {
        Self::Parse {
            message: msg.into(),
            column: Some(column.into()),
            source: None,
        }
    }

    /// Create a new parse error with column and source
    pub fn parse_with_source(
        msg: impl Into<String>,
        column: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Parse {
            message: msg.into(),
            column: Some(column.into()),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new configuration error with source
    pub fn config_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Config {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new format error
    pub fn format(msg: impl Into<String>) -> Self {
        Self::Format {
            message: msg.into(),
            locale: None,
        }
    }

    /// Create a new format error with locale
    pub fn format_with_locale(msg: impl Into<String>, locale: impl Into<String>) -> Self {
        Self::Format {
            message: msg.into(),
            locale: Some(locale.into()),
        }
    }

    /// Create a new validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
            field: None,
        }
    }

    /// Create a new validation error with field name
    pub fn validation_field(msg: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
            field: Some(field.into()),
        }
    }
}
