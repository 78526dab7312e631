//! # Trophy Error Types
//!
//! Errors surface only at the edges: loading configuration and explicit
//! catalog lookups. Drop resolution and persistence never fail.

use thiserror::Error;

/// Errors that can occur in the trophy drop engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TrophyError {
    /// Configuration text could not be parsed.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration file could not be read.
    #[error("cannot read configuration {path}: {reason}")]
    ConfigIo {
        /// Path that was read.
        path: String,
        /// Underlying I/O failure.
        reason: String,
    },

    /// No drop section exists for the requested type key.
    #[error("no drop found: {0}")]
    UnknownDrop(String),

    /// The type exists but has no section for the requested variant.
    #[error("variant not found for {type_key}: {variant}")]
    UnknownVariant {
        /// Type key that was found.
        type_key: String,
        /// Variant key that was missing.
        variant: String,
    },
}

/// Result type for trophy operations.
pub type TrophyResult<T> = Result<T, TrophyError>;
