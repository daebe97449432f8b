// ── Core error types ──
//
// Every engine operation either succeeds or fails with one of these.
// Both variants are recoverable: the caller fixes the input (or accepts
// that the entity is gone) and tries again. Nothing here is fatal,
// because the engine performs no I/O that could fail.

use serde::Serialize;
use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// Malformed or out-of-range input.
    #[error("Invalid {field}: {message}")]
    Validation { field: String, message: String },

    /// The referenced entity does not exist (or no longer exists).
    #[error("{entity} not found: {identifier}")]
    NotFound { entity: String, identifier: String },
}

/// Coarse error category, surfaced verbatim to protocol clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum::Display, strum::AsRefStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    Validation,
    NotFound,
}

impl CoreError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn not_found(entity: impl Into<String>, identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
            identifier: identifier.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation { .. } => ErrorKind::Validation,
            Self::NotFound { .. } => ErrorKind::NotFound,
        }
    }
}
