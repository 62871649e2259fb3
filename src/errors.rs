//! Error types for HairCare+
//!
//! Storage and form errors are shown inline and never end the app; the
//! worst case is falling back to the logged-out flow.

use thiserror::Error;

/// Main error type for the clinic core
#[derive(Error, Debug)]
pub enum ClinicError {
    /// Lookup by id found nothing
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// Persisted session storage could not be read or written
    #[error("Session storage unavailable: {0}")]
    StorageUnavailable(String),

    /// A required form field is missing or malformed
    #[error("Invalid {field}: {message}")]
    Validation { field: String, message: String },

    /// Date text did not match the clinic date format
    #[error("Invalid date '{value}': expected format like '{expected}'")]
    InvalidDate { value: String, expected: String },

    /// Unknown role name
    #[error("Invalid role: {0}")]
    InvalidRole(String),

    /// Unknown clinic location
    #[error("Invalid location: {0}")]
    InvalidLocation(String),

    /// Session may not open the requested records
    #[error("Access denied: {0}")]
    AccessDenied(String),

    /// Duplicate id or dangling foreign key in the record set
    #[error("Integrity error: {0}")]
    Integrity(String),

    /// Navigation state machine errors
    #[error("Invalid navigation from {from} via {event}: {reason}")]
    InvalidTransition {
        from: String,
        event: String,
        reason: String,
    },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Generic errors with context
    #[error("Clinic error: {0}")]
    Generic(String),
}

/// Result type alias for clinic operations
pub type Result<T> = std::result::Result<T, ClinicError>;

impl ClinicError {
    /// Build a validation error for a form field
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        ClinicError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Errors the UI handles inline instead of treating as a failure
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ClinicError::NotFound { .. }
                | ClinicError::StorageUnavailable(_)
                | ClinicError::Validation { .. }
                | ClinicError::AccessDenied(_)
        )
    }

    /// Text shown to the end user next to the form
    pub fn user_message(&self) -> String {
        match self {
            ClinicError::Validation { message, .. } => message.clone(),
            ClinicError::AccessDenied(message) => message.clone(),
            ClinicError::NotFound { entity, .. } => format!("{} not found", entity),
            ClinicError::StorageUnavailable(_) => "Please log in again.".to_string(),
            other => other.to_string(),
        }
    }
}

/// Convert anyhow errors to ClinicError
impl From<anyhow::Error> for ClinicError {
    fn from(err: anyhow::Error) -> Self {
        ClinicError::Generic(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ClinicError::NotFound {
            entity: "Patient",
            id: "p42".to_string(),
        };
        assert!(err.to_string().contains("Patient"));
        assert!(err.to_string().contains("p42"));
    }

    #[test]
    fn test_invalid_transition_error() {
        let err = ClinicError::InvalidTransition {
            from: "Login".to_string(),
            event: "OnboardingFinished".to_string(),
            reason: "not reachable".to_string(),
        };
        assert!(err.to_string().contains("Login"));
        assert!(err.to_string().contains("OnboardingFinished"));
    }

    #[test]
    fn test_recoverable_taxonomy() {
        assert!(ClinicError::StorageUnavailable("disk".into()).is_recoverable());
        assert!(ClinicError::validation("name", "required").is_recoverable());
        assert!(ClinicError::AccessDenied("not yours".into()).is_recoverable());
        assert!(!ClinicError::ConfigError("bad".into()).is_recoverable());
    }

    #[test]
    fn test_user_message_for_validation() {
        let err = ClinicError::validation("phone", "Please fill all required fields");
        assert_eq!(err.user_message(), "Please fill all required fields");
    }
}
