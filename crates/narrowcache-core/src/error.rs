//! Error types for `narrowcache`.
//!
//! Cache operations never fail; misses are reported as `None`. Errors come
//! from the collaborators around the cache: filter parsing, configuration,
//! and trace files.

use thiserror::Error;

/// Result type alias for `narrowcache` operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur around the recency cache.
///
/// Error codes follow the pattern `NARROW-XXX`.
#[derive(Error, Debug)]
pub enum Error {
    /// Filter could not be parsed (NARROW-001).
    #[error("[NARROW-001] Invalid filter: {0}")]
    InvalidFilter(String),

    /// Configuration error (NARROW-002).
    #[error("[NARROW-002] Configuration error: {0}")]
    Config(String),

    /// IO error (NARROW-003).
    #[error("[NARROW-003] IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed trace line (NARROW-004).
    #[error("[NARROW-004] Invalid trace at line {line}: {message}")]
    InvalidTrace {
        /// 1-based line number in the trace file.
        line: usize,
        /// What was wrong with the line.
        message: String,
    },
}

impl Error {
    /// Returns the error code (e.g., "NARROW-001").
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidFilter(_) => "NARROW-001",
            Self::Config(_) => "NARROW-002",
            Self::Io(_) => "NARROW-003",
            Self::InvalidTrace { .. } => "NARROW-004",
        }
    }

    /// Returns true if the caller can fix the input and retry.
    ///
    /// Configuration errors are fatal for a process: they are detected once,
    /// at startup.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        !matches!(self, Self::Config(_))
    }
}

impl From<crate::config::ConfigError> for Error {
    fn from(err: crate::config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}
