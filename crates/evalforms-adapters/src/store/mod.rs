//! Form template stores.
//!
//! Both stores share the same record rules:
//! - form names are unique (exact match), ignoring the form being replaced
//! - fields get a fresh `_id` when theirs is missing, malformed, or repeated
//! - `createdAt` is set once, `updatedAt` on every write

mod json_file;
mod memory;

pub use json_file::JsonFileStore;
pub use memory::InMemoryStore;

use chrono::{DateTime, Utc};
use evalforms_core::{
    application::ApplicationError,
    domain::{FieldId, FormId, FormTemplate, StoredFormTemplate},
    error::EvalFormsResult,
};

/// Reject `name` if a form other than `except` already uses it.
pub(crate) fn ensure_unique_name<'a>(
    mut existing: impl Iterator<Item = &'a StoredFormTemplate>,
    name: &str,
    except: Option<&FormId>,
) -> EvalFormsResult<()> {
    if existing.any(|form| Some(&form.id) != except && form.form_name() == name) {
        return Err(ApplicationError::DuplicateFormName {
            name: name.to_string(),
        }
        .into());
    }
    Ok(())
}

/// Turn a validated payload into the record a store keeps.
pub(crate) fn into_record(
    id: FormId,
    form: FormTemplate,
    created_at: Option<DateTime<Utc>>,
) -> StoredFormTemplate {
    let now = Utc::now();
    StoredFormTemplate {
        id,
        created_at: created_at.or(Some(now)),
        updated_at: Some(now),
        body: form.with_assigned_field_ids(FieldId::generate).into(),
    }
}

/// Drop the field with `field_id` from `form`. Returns whether it was there.
pub(crate) fn remove_field(form: &mut StoredFormTemplate, field_id: &FieldId) -> bool {
    let before = form.body.field_templates.len();
    form.body
        .field_templates
        .retain(|field| field.id.as_ref() != Some(field_id));
    form.body.field_templates.len() != before
}
