//! Core error types for starboard-core.
//!
//! This module defines the error hierarchy using thiserror. Board mutations
//! only fail on contract violations (stale or out-of-range indices); storage
//! and configuration errors are reported to whoever asked for the I/O.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for starboard-core.
///
/// Returned by operations that touch both configuration and storage.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Key-value store errors
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Unknown dot-path key
    #[error("unknown config key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Data directory could not be resolved or created
    #[error("Data directory unavailable: {0}")]
    DataDir(String),
}

/// Errors raised by a [`KeyValueStore`](crate::storage::KeyValueStore) backend.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Backing file could not be read or written
    #[error("Store I/O failed at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A value could not be encoded
    #[error("Failed to encode value for key '{key}': {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Validation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Out of bounds
    #[error("Index {index} out of bounds for {collection} (length: {len})")]
    OutOfBounds {
        collection: String,
        index: usize,
        len: usize,
    },

    /// Token id not present on the board
    #[error("Unknown token id: {0}")]
    UnknownToken(String),
}

/// Errors raised when the setup wizard receives input its current step
/// does not offer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WizardError {
    /// Wizard has not been started
    #[error("Setup wizard is not running")]
    NotStarted,

    /// Wizard already reached its final step
    #[error("Setup wizard already finished")]
    AlreadyComplete,

    /// The current step does not accept this kind of input
    #[error("Step '{step}' does not accept {input}")]
    UnexpectedInput { step: String, input: String },

    /// Token count outside the fixed choice set
    #[error("Invalid token count {0}: choose one of 5, 6, 10, 12")]
    InvalidTokenCount(u32),

    /// The presentation collaborator could not deliver an answer
    #[error("Prompt failed: {0}")]
    PromptFailed(String),
}

impl ValidationError {
    /// Build an out-of-bounds error for the token list.
    pub fn token_index(index: usize, len: usize) -> Self {
        ValidationError::OutOfBounds {
            collection: "tokens".to_string(),
            index,
            len,
        }
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    fn open_in(dir: &str) -> Result<()> {
        let resolved: Result<(), ConfigError> = Err(ConfigError::DataDir(dir.to_string()));
        resolved?;
        Ok(())
    }

    #[test]
    fn config_errors_convert_into_core_error() {
        let err = open_in("/nowhere").unwrap_err();
        assert!(matches!(err, CoreError::Config(ConfigError::DataDir(_))));
        assert_eq!(
            err.to_string(),
            "Configuration error: Data directory unavailable: /nowhere"
        );
    }

    #[test]
    fn store_errors_keep_their_source() {
        let err = CoreError::from(StoreError::Io {
            path: PathBuf::from("board.json"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        });
        let prefix = "Store error: Store I/O failed at board.json";
        assert!(err.to_string().starts_with(prefix));
    }

    #[test]
    fn out_of_bounds_names_collection() {
        assert_eq!(
            ValidationError::token_index(7, 5).to_string(),
            "Index 7 out of bounds for tokens (length: 5)"
        );
    }
}
