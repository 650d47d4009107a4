//! Application layer errors.
//!
//! These errors represent failures in orchestration and persistence, not
//! validation. Validation failures are `ValidationError` from `crate::domain`.

use thiserror::Error;

use crate::domain::{FieldId, FormId};
use crate::error::ErrorCategory;

/// Errors that occur while talking to a form template store.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApplicationError {
    /// Another template already uses this name.
    #[error("Form name '{name}' is already in use")]
    DuplicateFormName { name: String },

    #[error("Form template not found: {id}")]
    FormNotFound { id: FormId },

    #[error("Field template not found: {id}")]
    FieldNotFound { id: FieldId },

    /// Store access failed (lock poisoned, etc.).
    #[error("Form template store error")]
    StoreLockError,

    /// The backing storage failed (I/O, corrupt document, ...).
    #[error("Storage error: {reason}")]
    Storage { reason: String },
}

impl ApplicationError {
    /// Stable machine-readable code, where the persistence API defines one.
    pub fn code(&self) -> Option<&'static str> {
        match self {
            Self::DuplicateFormName { .. } => Some("DUPLICATE_FORM_NAME"),
            _ => None,
        }
    }

    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::DuplicateFormName { name } => vec![
                format!("A form named '{name}' already exists"),
                "Choose a different form name".into(),
                "Or edit the existing form: evalforms forms update <ID> --file <DRAFT>".into(),
            ],
            Self::FormNotFound { .. } => vec![
                "Check the form id".into(),
                "Try: evalforms forms list".into(),
            ],
            Self::FieldNotFound { .. } => vec![
                "The field may already have been removed".into(),
                "Try: evalforms forms show <ID>".into(),
            ],
            Self::StoreLockError => vec![
                "The form template store is locked".into(),
                "Try again in a moment".into(),
            ],
            Self::Storage { .. } => vec![
                "Check that the store directory exists and is writable".into(),
                "Run: evalforms config get store.path".into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::DuplicateFormName { .. } => ErrorCategory::Validation,
            Self::FormNotFound { .. } | Self::FieldNotFound { .. } => ErrorCategory::NotFound,
            Self::StoreLockError | Self::Storage { .. } => ErrorCategory::Internal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_name_carries_remote_code() {
        let err = ApplicationError::DuplicateFormName {
            name: "Eval A".into(),
        };
        assert_eq!(err.code(), Some("DUPLICATE_FORM_NAME"));
        assert_eq!(err.category(), ErrorCategory::Validation);
        assert!(err.to_string().contains("Eval A"));
    }

    #[test]
    fn missing_records_are_not_found() {
        let err = ApplicationError::FormNotFound {
            id: FormId::generate(),
        };
        assert_eq!(err.category(), ErrorCategory::NotFound);
        assert_eq!(err.code(), None);
    }
}
