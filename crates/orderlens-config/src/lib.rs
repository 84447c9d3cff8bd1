//! Configuration management for orderlens

pub mod loader;
pub mod schema;

pub use loader::{ConfigError, ConfigLoader};
pub use schema::{Config, DataConfig, DisplayConfig, LoggingSection, WindowConfig};
