// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Why a draft form template cannot be submitted.
///
/// Exactly one reason is reported per attempt: the first rule that fails.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Form name is required")]
    MissingName,

    /// No raw field has both a name and a type.
    #[error("At least one field is required")]
    NoFields,

    /// Nothing survived filtering and normalization.
    #[error("Please add at least one valid field")]
    NoValidFields,

    #[error("Score type is required")]
    MissingScore,

    #[error("Scale Description is required for custom score type")]
    MissingScaleDescription,
}

impl ValidationError {
    /// Stable machine-readable code, as used by the persistence API.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::MissingName => "MISSING_NAME",
            Self::NoFields | Self::NoValidFields => "NO_VALID_FIELDS",
            Self::MissingScore => "MISSING_SCORE",
            Self::MissingScaleDescription => "MISSING_SCALE_DESCRIPTION",
        }
    }
}

/// Root domain error type.
///
/// All errors are:
/// - Cloneable
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors (400-level equivalent)
    // ========================================================================
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Invalid {field}: '{value}'")]
    InvalidValue { field: &'static str, value: String },

    #[error("Invalid {kind} id '{value}': expected 24 hexadecimal characters")]
    InvalidIdentifier { kind: &'static str, value: String },

    // ========================================================================
    // Not Found Errors (404-level equivalent)
    // ========================================================================
    #[error("No field at position {position} (form has {len} fields)")]
    FieldOutOfRange { position: usize, len: usize },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Validation(ValidationError::MissingName) => {
                vec!["Set a non-blank \"formName\" in the draft".into()]
            }
            Self::Validation(ValidationError::NoFields | ValidationError::NoValidFields) => vec![
                "Add at least one field with both \"name\" and \"type\"".into(),
                "Fields without a name or type are dropped on submit".into(),
            ],
            Self::Validation(ValidationError::MissingScore) => {
                vec!["Set \"score\" to either SCORE or OTHER".into()]
            }
            Self::Validation(ValidationError::MissingScaleDescription) => vec![
                "Forms scored as OTHER need their own \"scaleDescription\"".into(),
                "Or switch \"score\" to SCORE to use the standard rubric".into(),
            ],
            Self::InvalidValue { field, .. } => match *field {
                "type" => vec![
                    "Field types: text, textArea, date, select, scale, checkbox".into(),
                ],
                "position" => vec!["Positions: left, right, full".into()],
                "response" => vec!["Responders: tutor, resident, or empty".into()],
                "section" => vec!["Sections are numbered 1 to 10".into()],
                _ => vec!["See documentation for accepted values".into()],
            },
            Self::InvalidIdentifier { kind, .. } => vec![
                format!("A {kind} id is 24 hexadecimal characters"),
                "Try: evalforms forms list".into(),
            ],
            Self::FieldOutOfRange { len, .. } => {
                vec![format!("Positions start at 1 and end at {len}")]
            }
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Validation(_) | Self::InvalidValue { .. } | Self::InvalidIdentifier { .. } => {
                ErrorCategory::Validation
            }
            Self::FieldOutOfRange { .. } => ErrorCategory::NotFound,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Internal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_codes_are_stable() {
        assert_eq!(ValidationError::MissingName.code(), "MISSING_NAME");
        assert_eq!(ValidationError::NoFields.code(), "NO_VALID_FIELDS");
        assert_eq!(ValidationError::NoValidFields.code(), "NO_VALID_FIELDS");
        assert_eq!(ValidationError::MissingScore.code(), "MISSING_SCORE");
        assert_eq!(
            ValidationError::MissingScaleDescription.code(),
            "MISSING_SCALE_DESCRIPTION"
        );
    }

    #[test]
    fn both_field_checks_keep_their_own_message() {
        assert_eq!(
            ValidationError::NoFields.to_string(),
            "At least one field is required"
        );
        assert_eq!(
            ValidationError::NoValidFields.to_string(),
            "Please add at least one valid field"
        );
    }

    #[test]
    fn validation_errors_display_transparently() {
        let err: DomainError = ValidationError::MissingScore.into();
        assert_eq!(err.to_string(), "Score type is required");
        assert_eq!(err.category(), ErrorCategory::Validation);
    }

    #[test]
    fn every_error_has_a_suggestion() {
        let errors = [
            DomainError::from(ValidationError::NoValidFields),
            DomainError::InvalidValue {
                field: "type",
                value: "radio".into(),
            },
            DomainError::InvalidIdentifier {
                kind: "form",
                value: "x".into(),
            },
            DomainError::FieldOutOfRange { position: 4, len: 2 },
        ];
        for err in errors {
            assert!(!err.suggestions().is_empty(), "{err}");
        }
    }
}
