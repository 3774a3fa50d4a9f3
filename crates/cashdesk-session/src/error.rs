//! # Session Error Types
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  ValidationError / CoreError (cashdesk-core)                           │
//! │  toml::de::Error / std::io::Error                                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SessionError (this module) ← Adds context (config path, etc.)         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Caller displays / logs the message                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use cashdesk_core::{CoreError, ValidationError};
use thiserror::Error;

/// Errors raised by the session layer.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The config file could not be read.
    #[error("Failed to read config file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid TOML or has unknown keys.
    #[error("Invalid config: {0}")]
    Config(#[from] toml::de::Error),

    /// A ledger operation failed.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The global tracing subscriber was already set.
    #[error("Failed to initialize tracing: {0}")]
    Tracing(String),
}

impl From<ValidationError> for SessionError {
    fn from(err: ValidationError) -> Self {
        SessionError::Core(CoreError::Validation(err))
    }
}

/// Convenience type alias for Results with SessionError.
pub type SessionResult<T> = Result<T, SessionError>;
