//! Configuration schema and validation

use chrono::NaiveDate;
use orderlens_common::{utils::validate_non_empty, OrderLensError, Result};
use serde::{Deserialize, Serialize};

/// Top-level application configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub data: DataConfig,
    pub window: WindowConfig,
    pub display: DisplayConfig,
    pub logging: LoggingSection,
}

/// Source data configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Path to the order-line CSV export
    pub csv_path: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            csv_path: "main_data.csv".to_string(),
        }
    }
}

/// Date window restricting the analysis. Both bounds inclusive; unset bounds
/// default to the full span of the dataset.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// Presentation settings for the printed dashboard summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Number of best/worst categories to show
    pub top_categories: usize,
    /// Number of states to show
    pub top_states: usize,
    /// Number of customers per RFM ranking
    pub top_customers: usize,
    /// ISO 4217 currency code for monetary totals
    pub currency: String,
    /// BCP 47 locale tag driving number conventions
    pub locale: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            top_categories: 5,
            top_states: 8,
            top_customers: 5,
            currency: "BRL".to_string(),
            locale: "es-CO".to_string(),
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    pub level: String,
    pub file_path: Option<String>,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file_path: None,
        }
    }
}

impl Config {
    /// Validate the assembled configuration.
    ///
    /// The window ordering check only catches operator typos before a run;
    /// the range filter itself treats an inverted window as empty, not as an
    /// error.
    pub fn validate_all(&self) -> Result<()> {
        validate_non_empty(&self.data.csv_path, "data.csv_path")?;
        validate_non_empty(&self.display.currency, "display.currency")?;
        validate_non_empty(&self.display.locale, "display.locale")?;

        if let (Some(start), Some(end)) = (self.window.start_date, self.window.end_date) {
            if start > end {
                return Err(OrderLensError::validation_field(
                    format!("start_date {} is after end_date {}", start, end),
                    "window",
                ));
            }
        }

        for (value, field) in [
            (self.display.top_categories, "display.top_categories"),
            (self.display.top_states, "display.top_states"),
            (self.display.top_customers, "display.top_customers"),
        ] {
            if value == 0 {
                return Err(OrderLensError::validation_field(
                    format!("{} must be at least 1", field),
                    field,
                ));
            }
        }

        Ok(())
    }
}
