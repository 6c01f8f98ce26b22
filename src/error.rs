//! Error types for Solidafy Pager
//!
//! Engine failures live in [`Error`]. A pagination session surfaces them
//! together with the fetcher's own error type through [`PagerError`].

use thiserror::Error;

/// Errors raised by the pagination engine itself
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    // ============================================================================
    // Page Access Errors
    // ============================================================================
    #[error("Response type mismatch: expected {expected}, found {actual}")]
    TypeMismatch {
        expected: &'static str,
        actual: &'static str,
    },

    // ============================================================================
    // Session Errors
    // ============================================================================
    #[error("Pagination contract violation: {message}")]
    ContractViolation { message: String },

    #[error("Pagination cancelled")]
    Cancelled,
}

impl Error {
    /// Create a type mismatch error
    pub fn type_mismatch(expected: &'static str, actual: &'static str) -> Self {
        Self::TypeMismatch { expected, actual }
    }

    /// Create a contract violation error
    pub fn contract(message: impl Into<String>) -> Self {
        Self::ContractViolation {
            message: message.into(),
        }
    }
}

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error yielded by a pagination session
///
/// `Transport` carries whatever the page fetcher returned, untouched.
#[derive(Error, Debug)]
pub enum PagerError<E> {
    #[error("Page request failed: {0}")]
    Transport(#[source] E),

    #[error(transparent)]
    Engine(#[from] Error),
}

impl<E> PagerError<E> {
    /// Check if the session was cancelled
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Engine(Error::Cancelled))
    }

    /// Check if the fetcher raised this error
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// Recover the fetcher's original error
    pub fn into_transport(self) -> Option<E> {
        match self {
            Self::Transport(e) => Some(e),
            Self::Engine(_) => None,
        }
    }

    /// Get the engine error, if any
    pub fn engine(&self) -> Option<&Error> {
        match self {
            Self::Engine(e) => Some(e),
            Self::Transport(_) => None,
        }
    }
}
