//! Core domain layer for evalforms.
//!
//! Pure form-template logic: the draft model editors work on, the normalized
//! model sent to persistence, and the validator that turns one into the
//! other.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No I/O**: No filesystem, network, or external calls
//! - **Synchronous**: Every operation is a plain function over values
//! - **Immutable edits**: Draft operations consume and return the draft
//! - **Invariants by construction**: `FormTemplate` only comes out of the validator

pub mod entities;
pub mod error;
pub mod validation;
pub mod value_objects;

pub use entities::{
    FieldKind, FieldTemplate, FieldTemplateDoc, FieldTemplateDraft, FormTemplate,
    FormTemplateDraft, StoredFormTemplate,
};
pub use error::{DomainError, ErrorCategory, ValidationError};
pub use validation::{DEFAULT_SCALE_DESCRIPTION, FormTemplateValidator};
pub use value_objects::{FieldId, FieldType, FormId, Position, Responder, ScoreKind, Section};
