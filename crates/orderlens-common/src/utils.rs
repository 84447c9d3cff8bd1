//! Utility functions used across the orderlens application

use crate::Result;

/// Take the first `len` characters of an identifier, respecting char
/// boundaries. Used as a display shorthand for long ids; collisions between
/// distinct ids sharing a prefix are accepted.
pub fn id_prefix(id: &str, len: usize) -> String {
    id.chars().take(len).collect()
}

/// Validate that a string is not empty after trimming
pub fn validate_non_empty(value: &str, field_name: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(crate::OrderLensError::validation_field(
            format!("{} cannot be empty", field_name),
            field_name,
        ))
    } else {
        Ok(trimmed.to_string())
    }
}
