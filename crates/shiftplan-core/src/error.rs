// SPDX-FileCopyrightText: 2026 Shiftplan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Shiftplan scheduler.

use thiserror::Error;

/// The primary error type used across all Shiftplan crates.
///
/// The assignment engine itself never produces an error for an unfillable
/// slot; that outcome is expressed by omission. Everything here is either
/// bad input or a failing collaborator (storage, config files).
#[derive(Debug, Error)]
pub enum ShiftplanError {
    /// Configuration errors (invalid TOML, bad values after validation).
    #[error("configuration error: {0}")]
    Config(String),

    /// A label or value that has no meaning in this domain, such as an
    /// unknown slot label or a malformed clock time.
    #[error("unrecognized {what}: `{value}`")]
    UnrecognizedConfiguration { what: String, value: String },

    /// Storage backend errors (database connection, query failure, serialization).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A referenced record does not exist.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// Caller-supplied input failed a precondition.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ShiftplanError {
    /// Shorthand for [`ShiftplanError::UnrecognizedConfiguration`].
    pub fn unrecognized(what: impl Into<String>, value: impl Into<String>) -> Self {
        Self::UnrecognizedConfiguration {
            what: what.into(),
            value: value.into(),
        }
    }

    /// Shorthand for [`ShiftplanError::NotFound`].
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }
}
