//! Validation errors: structural parse failures and acceptance-rule rejections.

/// Parse error with source location.
///
/// Raised when raw model output cannot be interpreted as the declared shape,
/// even after attempting to extract an embedded structured span.
#[derive(Debug, Clone)]
pub struct ParseError {
    /// Error message
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl ParseError {
    /// Create a new ParseError with the given message at the current location.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Parse Error: {} at line {} in {}",
            self.message, self.line, self.file
        )
    }
}

impl std::error::Error for ParseError {}

/// Acceptance error with source location.
///
/// Raised when output parses into the declared shape but fails the domain
/// acceptance rule (too few items, missing correctness flag, and so on).
#[derive(Debug, Clone)]
pub struct AcceptanceError {
    /// Why the parsed value was rejected
    pub reason: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl AcceptanceError {
    /// Create a new AcceptanceError with the given reason at the current location.
    #[track_caller]
    pub fn new(reason: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            reason: reason.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}

impl std::fmt::Display for AcceptanceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Acceptance Error: {} at line {} in {}",
            self.reason, self.line, self.file
        )
    }
}

impl std::error::Error for AcceptanceError {}
