//! Error types for the pydelta CLI.
//!
//! The parsing and diff core never fails; errors only come from the
//! collaborators around it (file access, config, storage, standard checks).

use crate::exit_codes;
use thiserror::Error;

/// Main error type for pydelta operations.
#[derive(Error, Debug)]
pub enum PydeltaError {
    /// User provided invalid arguments, or config/storage could not be used.
    #[error("{0}")]
    UserError(String),

    /// The given path is not an analyzable source file.
    #[error("Invalid source: {0}")]
    InvalidSource(String),

    /// The source breaks the coding standard.
    #[error("Coding standard violated: {0}")]
    StandardViolation(String),

    /// Raw I/O failure with no better context available.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl PydeltaError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            PydeltaError::UserError(_) => exit_codes::USER_ERROR,
            PydeltaError::Io(_) => exit_codes::USER_ERROR,
            PydeltaError::InvalidSource(_) => exit_codes::INVALID_SOURCE,
            PydeltaError::StandardViolation(_) => exit_codes::STANDARD_VIOLATION,
        }
    }
}

/// Result type alias for pydelta operations.
pub type Result<T> = std::result::Result<T, PydeltaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_error_has_correct_exit_code() {
        let err = PydeltaError::UserError("bad argument".to_string());
        assert_eq!(err.exit_code(), exit_codes::USER_ERROR);
    }

    #[test]
    fn io_error_maps_to_user_error_code() {
        let err: PydeltaError =
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert_eq!(err.exit_code(), exit_codes::USER_ERROR);
    }

    #[test]
    fn invalid_source_has_correct_exit_code() {
        let err = PydeltaError::InvalidSource("notes.txt".to_string());
        assert_eq!(err.exit_code(), exit_codes::INVALID_SOURCE);
    }

    #[test]
    fn standard_violation_has_correct_exit_code() {
        let err = PydeltaError::StandardViolation("lambda".to_string());
        assert_eq!(err.exit_code(), exit_codes::STANDARD_VIOLATION);
    }

    #[test]
    fn error_messages_are_descriptive() {
        let err = PydeltaError::InvalidSource("'a.txt' is not a Python file".to_string());
        assert_eq!(err.to_string(), "Invalid source: 'a.txt' is not a Python file");

        let err = PydeltaError::StandardViolation("1 violation(s)".to_string());
        assert_eq!(err.to_string(), "Coding standard violated: 1 violation(s)");
    }
}
