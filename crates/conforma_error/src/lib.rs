//! Error types for the Conforma structured generation library.
//!
//! This crate provides the closed error taxonomy used throughout the Conforma
//! workspace. Each error family is a location-tracked struct; the crate-level
//! [`ConformaErrorKind`] enum discriminates between families so retry logic
//! can be written as a total function over error kind.

mod config;
mod storage;
mod transport;
mod validation;

pub use config::ConfigError;
pub use storage::StorageError;
pub use transport::TransportError;
pub use validation::{AcceptanceError, ParseError};

/// Crate-level error variants.
#[derive(Debug, derive_more::From)]
pub enum ConformaErrorKind {
    /// Generation client could not be reached or returned a non-success status
    Transport(TransportError),
    /// Returned text could not be interpreted as the declared shape
    Parse(ParseError),
    /// Parsed successfully but failed the domain acceptance rule
    Acceptance(AcceptanceError),
    /// Caller supplied invalid configuration
    Config(ConfigError),
    /// Persistence of accepted results failed
    Storage(StorageError),
}

impl std::fmt::Display for ConformaErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConformaErrorKind::Transport(e) => write!(f, "{}", e),
            ConformaErrorKind::Parse(e) => write!(f, "{}", e),
            ConformaErrorKind::Acceptance(e) => write!(f, "{}", e),
            ConformaErrorKind::Config(e) => write!(f, "{}", e),
            ConformaErrorKind::Storage(e) => write!(f, "{}", e),
        }
    }
}

impl ConformaErrorKind {
    /// Check if this error kind should trigger another generation attempt.
    ///
    /// Transport, parse, and acceptance failures share one retry budget.
    /// Configuration and storage errors are caller defects and must fail fast.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ConformaErrorKind::Transport(_)
                | ConformaErrorKind::Parse(_)
                | ConformaErrorKind::Acceptance(_)
        )
    }
}

/// Conforma error with kind discrimination.
#[derive(Debug)]
pub struct ConformaError(Box<ConformaErrorKind>);

impl ConformaError {
    /// Create a new error from a kind.
    pub fn new(kind: ConformaErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &ConformaErrorKind {
        &self.0
    }
}

impl std::fmt::Display for ConformaError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Conforma Error: {}", self.0)
    }
}

impl std::error::Error for ConformaError {}

// Generic From implementation for any type that converts to ConformaErrorKind
impl<T> From<T> for ConformaError
where
    T: Into<ConformaErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

impl RetryableError for ConformaError {
    fn is_retryable(&self) -> bool {
        self.0.is_retryable()
    }
}

/// Result type for Conforma operations.
pub type ConformaResult<T> = std::result::Result<T, ConformaError>;

/// Trait for errors that support retry logic.
///
/// Transient failures (unreachable service, malformed output, rejected
/// output) return true; caller defects (bad configuration) return false.
pub trait RetryableError {
    /// Returns true if this error should trigger a retry.
    fn is_retryable(&self) -> bool;
}
