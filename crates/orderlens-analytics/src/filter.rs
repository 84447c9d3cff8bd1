//! Inclusive date-range filtering over the order table

use chrono::NaiveDate;
use orderlens_data::OrderTable;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Inclusive calendar-date window, no time component.
///
/// Comparison against purchase timestamps is date-truncated, so the whole end
/// day is part of the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Create a new range. An inverted range (`start > end`) is allowed and
    /// simply matches nothing.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// The full span of the table's purchase timestamps, if it has any rows
    pub fn full_span(table: &OrderTable) -> Option<Self> {
        let start = table.min_purchase_timestamp()?.date();
        let end = table.max_purchase_timestamp()?.date();
        Some(Self { start, end })
    }

    /// Whether the given calendar day falls inside the window
    pub fn contains(&self, day: NaiveDate) -> bool {
        day >= self.start && day <= self.end
    }
}

/// Restrict the table to rows whose purchase timestamp falls inside the
/// window. Produces a new table; the source is never mutated.
pub fn filter_by_range(table: &OrderTable, range: &DateRange) -> OrderTable {
    let filtered = table.select(|i| range.contains(table.purchase_timestamps()[i].date()));
    debug!(
        "Range filter kept {} of {} rows ({} to {})",
        filtered.len(),
        table.len(),
        range.start,
        range.end
    );
    filtered
}
