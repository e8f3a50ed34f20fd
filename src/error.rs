//! Error types for the akusento library.
//!
//! All fallible operations return [`Result`], whose error side is the
//! [`AkusentoError`] enum. Two failure kinds are fatal for a whole input:
//! a record with the wrong shape ([`AkusentoError::Format`]) and a failing
//! external process ([`AkusentoError::ExternalStage`]). Nothing is emitted
//! for an input that fails.
//!
//! # Examples
//!
//! ```
//! use akusento::error::{AkusentoError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(AkusentoError::format("line 3: expected 13 fields, found 12"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for akusento operations.
#[derive(Error, Debug)]
pub enum AkusentoError {
    /// I/O errors (reading input files, talking to child processes)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A record does not have the structure its stage requires
    #[error("Format error: {0}")]
    Format(String),

    /// An external process could not be started or exited non-zero
    #[error("External stage '{stage}' failed: {message}")]
    ExternalStage { stage: String, message: String },

    /// Invalid pipeline configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// TOML deserialization errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),

    /// Error with context attached, shown with its whole cause chain
    #[error("{0:#}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with AkusentoError.
pub type Result<T> = std::result::Result<T, AkusentoError>;

impl AkusentoError {
    /// Create a new structural format error.
    pub fn format<S: Into<String>>(msg: S) -> Self {
        AkusentoError::Format(msg.into())
    }

    /// Create a new external stage failure.
    pub fn external_stage<S: Into<String>, M: Into<String>>(stage: S, message: M) -> Self {
        AkusentoError::ExternalStage {
            stage: stage.into(),
            message: message.into(),
        }
    }

    /// Create a new configuration error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        AkusentoError::Config(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        AkusentoError::Other(msg.into())
    }

    /// Returns true when the error came from a malformed record.
    pub fn is_format(&self) -> bool {
        matches!(self, AkusentoError::Format(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_construction() {
        let error = AkusentoError::format("line 1: expected 13 fields, found 2");
        assert_eq!(
            error.to_string(),
            "Format error: line 1: expected 13 fields, found 2"
        );
        assert!(error.is_format());

        let error = AkusentoError::external_stage("mecab", "dictionary not found");
        assert_eq!(
            error.to_string(),
            "External stage 'mecab' failed: dictionary not found"
        );
        assert!(!error.is_format());

        let error = AkusentoError::config("empty command");
        assert_eq!(error.to_string(), "Configuration error: empty command");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error = AkusentoError::from(io_error);

        match error {
            AkusentoError::Io(_) => {} // Expected
            _ => panic!("Expected IO error variant"),
        }
    }
}
