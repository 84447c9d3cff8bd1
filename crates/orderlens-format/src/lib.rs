//! Locale-aware currency formatting for orderlens summaries
//!
//! The aggregation pipeline never calls into this crate; it exists for the
//! presentation layer, which turns a numeric total and a (currency, locale)
//! pair into a display string.

pub mod currency;
pub mod locale;

pub use currency::{format_currency, Currency};
pub use locale::NumberConvention;
