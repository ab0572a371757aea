//! Transport errors from the generation client boundary.

/// Transport error with source location.
///
/// Raised when the generation client cannot be reached, returns a non-success
/// status, or exceeds its per-call time bound. All transport errors share the
/// same retry budget as validation failures.
#[derive(Debug, Clone)]
pub struct TransportError {
    /// Error message
    pub message: String,
    /// HTTP status code, when the failure carried one
    pub status_code: Option<u16>,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl TransportError {
    /// Create a new TransportError with the given message at the current location.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            status_code: None,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Create a TransportError carrying an HTTP status code.
    #[track_caller]
    pub fn with_status(message: impl Into<String>, status_code: u16) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            status_code: Some(status_code),
            line: location.line(),
            file: location.file(),
        }
    }

    /// Create a TransportError for an elapsed per-call timeout.
    ///
    /// Timeouts are treated identically to any other transport failure.
    #[track_caller]
    pub fn timed_out(limit: std::time::Duration) -> Self {
        Self::new(format!(
            "generation call exceeded time bound of {:?}",
            limit
        ))
    }
}

impl std::fmt::Display for TransportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.status_code {
            Some(status) => write!(
                f,
                "Transport Error (HTTP {}): {} at line {} in {}",
                status, self.message, self.line, self.file
            ),
            None => write!(
                f,
                "Transport Error: {} at line {} in {}",
                self.message, self.line, self.file
            ),
        }
    }
}

impl std::error::Error for TransportError {}
