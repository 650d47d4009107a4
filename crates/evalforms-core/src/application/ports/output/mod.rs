//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `evalforms-adapters` crate provides implementations.

use crate::domain::{FieldId, FormId, FormTemplate, StoredFormTemplate};
use crate::error::EvalFormsResult;

/// Port for form template persistence.
///
/// Implemented by:
/// - `evalforms_adapters::store::InMemoryStore` (testing, scratch sessions)
/// - `evalforms_adapters::store::JsonFileStore` (one JSON document per form)
///
/// ## Contract
///
/// - Payloads handed to `create`/`update` have already been validated
/// - `formName` is unique across templates; a clash is
///   `ApplicationError::DuplicateFormName`
/// - Unknown ids are `ApplicationError::FormNotFound` / `FieldNotFound`
/// - Fields without an `_id` are new and get one assigned by the store
#[cfg_attr(test, mockall::automock)]
pub trait FormTemplateStore: Send + Sync {
    /// All templates, in store order.
    fn list(&self) -> EvalFormsResult<Vec<StoredFormTemplate>>;

    /// Fetch one template.
    fn get(&self, id: &FormId) -> EvalFormsResult<StoredFormTemplate>;

    /// Persist a new template.
    fn create(&self, form: FormTemplate) -> EvalFormsResult<StoredFormTemplate>;

    /// Replace a template wholesale.
    fn update(&self, id: &FormId, form: FormTemplate) -> EvalFormsResult<StoredFormTemplate>;

    /// Remove a template.
    fn delete(&self, id: &FormId) -> EvalFormsResult<()>;

    /// Remove one persisted field, leaving its siblings untouched.
    fn delete_field(&self, id: &FieldId) -> EvalFormsResult<()>;
}
