//! Domain error types

use thiserror::Error;

/// Domain-level errors
///
/// Only malformed input to a verification is an error. Judge failures,
/// unparseable output, missed quorum and ties all degrade into values.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("No judges configured for verification")]
    NoJudges,

    #[error("Verification request has no content, URL, images or evidence")]
    EmptyRequest,

    #[error("Invalid consensus policy: {0}")]
    InvalidPolicy(String),

    #[error("Invalid judge id: {0}")]
    InvalidJudge(String),
}

impl DomainError {
    /// Check if this error comes from configuration rather than request data
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            DomainError::NoJudges | DomainError::InvalidPolicy(_) | DomainError::InvalidJudge(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            DomainError::NoJudges.to_string(),
            "No judges configured for verification"
        );
        assert_eq!(
            DomainError::InvalidPolicy("min_quorum must be at least 1".into()).to_string(),
            "Invalid consensus policy: min_quorum must be at least 1"
        );
    }

    #[test]
    fn test_is_configuration() {
        assert!(DomainError::NoJudges.is_configuration());
        assert!(DomainError::InvalidPolicy("x".into()).is_configuration());
        assert!(!DomainError::EmptyRequest.is_configuration());
    }
}
