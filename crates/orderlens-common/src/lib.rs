//! Common utilities and types shared across the orderlens workspace

pub mod error;
pub mod logging;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use error::{OrderLensError, Result};
pub use logging::{
    init_default_logging, init_dev_logging, init_logging, init_prod_logging, LoggingConfig,
};
pub use types::Timestamp;
