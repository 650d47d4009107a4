//! Edit flow for a persisted form template.
//!
//! ```text
//! open_edit(id) ──▶ EditSession { pristine, draft }
//!                     │ replace_draft / delete_field
//!                     ├── commit() ──▶ validate_for_update ──▶ store.update
//!                     └── cancel() ──▶ pristine
//! ```
//!
//! The working draft is owned by the session and replaced wholesale on every
//! change. Deleting a persisted field is sent to the store immediately, not
//! batched with the final save.

use tracing::{debug, info, instrument};

use crate::{
    application::ports::FormTemplateStore,
    domain::{
        DomainError, FieldTemplateDraft, FormId, FormTemplateDraft,
        FormTemplateValidator as validator, StoredFormTemplate,
    },
    error::EvalFormsResult,
};

/// A working copy of one stored form.
pub struct EditSession<'a> {
    store: &'a dyn FormTemplateStore,
    pristine: StoredFormTemplate,
    draft: FormTemplateDraft,
}

impl<'a> EditSession<'a> {
    pub(crate) fn new(store: &'a dyn FormTemplateStore, pristine: StoredFormTemplate) -> Self {
        let draft = pristine.body.clone();
        Self {
            store,
            pristine,
            draft,
        }
    }

    pub fn id(&self) -> &FormId {
        &self.pristine.id
    }

    /// The current working draft.
    pub fn draft(&self) -> &FormTemplateDraft {
        &self.draft
    }

    /// Swap in a new working draft, typically the result of draft edits on
    /// the previous one.
    pub fn replace_draft(&mut self, draft: FormTemplateDraft) {
        self.draft = draft;
    }

    /// Whether the working draft differs from what was fetched.
    pub fn is_dirty(&self) -> bool {
        self.draft != self.pristine.body
    }

    /// Remove the field at `index` (0-based) from the working draft.
    ///
    /// A field that was already persisted is deleted from the store first;
    /// if that fails the draft is left untouched.
    #[instrument(skip(self), fields(form = %self.pristine.id))]
    pub fn delete_field(&mut self, index: usize) -> EvalFormsResult<FieldTemplateDraft> {
        let len = self.draft.field_templates.len();
        let field = self
            .draft
            .field_templates
            .get(index)
            .ok_or(DomainError::FieldOutOfRange {
                position: index + 1,
                len,
            })?;

        if let Some(field_id) = &field.id {
            self.store.delete_field(field_id)?;
            info!(field = %field_id, "Persisted field deleted");
        } else {
            debug!("Removed unsaved field");
        }

        let (draft, removed) = std::mem::take(&mut self.draft).without_field(index);
        self.draft = draft;
        removed.ok_or_else(|| {
            DomainError::FieldOutOfRange {
                position: index + 1,
                len,
            }
            .into()
        })
    }

    /// Abandon the edit and get back the form as originally fetched.
    pub fn cancel(self) -> StoredFormTemplate {
        debug!(form = %self.pristine.id, "Edit cancelled");
        self.pristine
    }

    /// Validate the working draft and replace the stored form with it.
    ///
    /// On a validation failure nothing is sent and the session stays usable,
    /// so the draft can be fixed and committed again.
    #[instrument(skip(self), fields(form = %self.pristine.id))]
    pub fn commit(&self) -> EvalFormsResult<StoredFormTemplate> {
        let payload = validator::validate_for_update(&self.draft)?;
        let stored = self.store.update(&self.pristine.id, payload)?;
        info!("Edit committed");
        Ok(stored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::{ApplicationError, FormTemplateService, ports::MockFormTemplateStore};
    use crate::domain::{FieldId, FieldType, ScoreKind, ValidationError};
    use mockall::predicate::eq;

    fn persisted_form() -> StoredFormTemplate {
        let mut saved = FieldTemplateDraft::named("Saved", FieldType::Text);
        saved.id = Some(FieldId::parse("65a1f0c2e4b0a1b2c3d4e5f6").unwrap());
        StoredFormTemplate {
            id: FormId::parse("65a1f0c2e4b0a1b2c3d4e5aa").unwrap(),
            created_at: None,
            updated_at: None,
            body: FormTemplateDraft::new("Eval")
                .with_score(ScoreKind::Score)
                .with_field(saved)
                .with_field(FieldTemplateDraft::named("Fresh", FieldType::Date)),
        }
    }

    fn store_with(form: StoredFormTemplate) -> MockFormTemplateStore {
        let mut store = MockFormTemplateStore::new();
        store.expect_get().returning(move |_| Ok(form.clone()));
        store
    }

    #[test]
    fn deleting_persisted_field_calls_store_first() {
        let mut store = store_with(persisted_form());
        store
            .expect_delete_field()
            .with(eq(FieldId::parse("65a1f0c2e4b0a1b2c3d4e5f6").unwrap()))
            .times(1)
            .returning(|_| Ok(()));
        let service = FormTemplateService::new(Box::new(store));
        let mut session = service.open_edit(&persisted_form().id).unwrap();

        let removed = session.delete_field(0).unwrap();
        assert_eq!(removed.name, "Saved");
        assert_eq!(session.draft().field_templates.len(), 1);
        assert!(session.is_dirty());
    }

    #[test]
    fn deleting_unsaved_field_is_local_only() {
        let mut store = store_with(persisted_form());
        store.expect_delete_field().never();
        let service = FormTemplateService::new(Box::new(store));
        let mut session = service.open_edit(&persisted_form().id).unwrap();

        let removed = session.delete_field(1).unwrap();
        assert_eq!(removed.name, "Fresh");
    }

    #[test]
    fn failed_remote_delete_keeps_field() {
        let mut store = store_with(persisted_form());
        store.expect_delete_field().returning(|id| {
            Err(ApplicationError::FieldNotFound { id: id.clone() }.into())
        });
        let service = FormTemplateService::new(Box::new(store));
        let mut session = service.open_edit(&persisted_form().id).unwrap();

        assert!(session.delete_field(0).is_err());
        assert_eq!(session.draft().field_templates.len(), 2);
        assert!(!session.is_dirty());
    }

    #[test]
    fn out_of_range_delete_is_reported() {
        let service = FormTemplateService::new(Box::new(store_with(persisted_form())));
        let mut session = service.open_edit(&persisted_form().id).unwrap();

        let err = session.delete_field(5).unwrap_err();
        assert_eq!(
            err,
            DomainError::FieldOutOfRange { position: 6, len: 2 }.into()
        );
    }

    #[test]
    fn cancel_restores_pristine_copy() {
        let service = FormTemplateService::new(Box::new(store_with(persisted_form())));
        let mut session = service.open_edit(&persisted_form().id).unwrap();
        session.replace_draft(FormTemplateDraft::new("Scratch"));

        assert_eq!(session.cancel(), persisted_form());
    }

    #[test]
    fn commit_sends_field_ids_with_update() {
        let form = persisted_form();
        let expected_id = form.id.clone();
        let mut store = store_with(form.clone());
        store
            .expect_update()
            .withf(move |id, payload| {
                *id == expected_id
                    && payload.field_ids().count() == 1
                    && payload.new_fields().count() == 1
            })
            .times(1)
            .returning(move |id, payload| {
                Ok(StoredFormTemplate {
                    id: id.clone(),
                    created_at: None,
                    updated_at: None,
                    body: payload.into(),
                })
            });
        let service = FormTemplateService::new(Box::new(store));
        let session = service.open_edit(&form.id).unwrap();

        let saved = session.commit().unwrap();
        assert_eq!(saved.body.field_templates[1].order, Some(2));
    }

    #[test]
    fn invalid_commit_sends_nothing_and_session_survives() {
        let mut store = store_with(persisted_form());
        store.expect_update().never();
        let service = FormTemplateService::new(Box::new(store));
        let mut session = service.open_edit(&persisted_form().id).unwrap();

        let cleared = session.draft().clone().with_form_name("");
        session.replace_draft(cleared);
        assert_eq!(
            session.commit().unwrap_err(),
            ValidationError::MissingName.into()
        );
        assert_eq!(session.draft().form_name, "");
    }
}
