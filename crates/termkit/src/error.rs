//! Error types for termkit.
//!
//! Formatting and rendering are total; the only fallible operation is
//! parsing a human-readable size string.

use std::fmt;

/// Result type alias for termkit operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Why a size string was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeIssue {
    /// Nothing but whitespace.
    Empty,
    /// A unit suffix with no number in front of it (`"MB"`).
    MissingNumber,
    /// The numeric part is not a decimal number.
    NotANumber,
    /// The number is below zero.
    Negative,
    /// The byte count does not fit in 64 bits.
    TooLarge,
}

impl SizeIssue {
    /// Short human description of the issue.
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::Empty => "empty size string",
            Self::MissingNumber => "unit without a number",
            Self::NotANumber => "invalid number",
            Self::Negative => "size cannot be negative",
            Self::TooLarge => "size is too large",
        }
    }
}

impl fmt::Display for SizeIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// Errors that can occur in termkit.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A size string could not be parsed.
    #[error("invalid size '{input}': {issue}")]
    InvalidFormat {
        /// The input as given by the caller.
        input: String,
        /// What was wrong with it.
        issue: SizeIssue,
    },
}

impl Error {
    /// Create an `InvalidFormat` error.
    pub fn invalid_format(input: impl Into<String>, issue: SizeIssue) -> Self {
        Self::InvalidFormat {
            input: input.into(),
            issue,
        }
    }

    /// The size issue behind this error.
    #[must_use]
    pub fn issue(&self) -> SizeIssue {
        match self {
            Self::InvalidFormat { issue, .. } => *issue,
        }
    }
}
