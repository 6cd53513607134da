//! Field checks that keep the flat-file format parseable
//!
//! Website, username and password share one whitespace-delimited header line,
//! so they must be single non-empty tokens. The question and answer each own a
//! full line and may hold anything except a line break.

use crate::error::{Result, StoreError};

/// Reject empty values and values containing any whitespace
pub(crate) fn validate_token(field: &'static str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(StoreError::MalformedInput {
            field,
            reason: "must not be empty",
        });
    }

    if value.chars().any(char::is_whitespace) {
        return Err(StoreError::MalformedInput {
            field,
            reason: "must not contain whitespace",
        });
    }

    Ok(())
}

/// Reject values containing a line break; empty is allowed
pub(crate) fn validate_line(field: &'static str, value: &str) -> Result<()> {
    if value.contains(['\n', '\r']) {
        return Err(StoreError::MalformedInput {
            field,
            reason: "must not contain line breaks",
        });
    }

    Ok(())
}
