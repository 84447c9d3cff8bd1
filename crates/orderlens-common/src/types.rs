//! Shared type aliases for orderlens

use chrono::NaiveDateTime;

/// Timestamp type used for all purchase and delivery clocks.
///
/// Naive on purpose: bucketing and recency use the timestamp's own calendar
/// with no timezone conversion.
pub type Timestamp = NaiveDateTime;
