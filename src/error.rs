//! Error types for droid-perms
//!
//! Centralized error handling using thiserror. Decision logic is
//! value-returning and never fails; errors only surface from record
//! store persistence.

use thiserror::Error;

/// Main error type for droid-perms
#[derive(Error, Debug)]
pub enum PermError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Store error: {0}")]
    Store(String),
}

/// Result type alias for droid-perms operations
pub type Result<T> = std::result::Result<T, PermError>;
