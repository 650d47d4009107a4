//! In-memory form template store.

use std::{
    collections::HashMap,
    sync::{Arc, RwLock},
};

use tracing::debug;

use evalforms_core::{
    application::{ApplicationError, ports::FormTemplateStore},
    domain::{FieldId, FormId, FormTemplate, StoredFormTemplate},
    error::EvalFormsResult,
};

use super::{ensure_unique_name, into_record, remove_field};

#[derive(Default)]
struct Inner {
    /// Insertion order, for listing.
    order: Vec<FormId>,
    forms: HashMap<FormId, StoredFormTemplate>,
}

impl Inner {
    fn iter(&self) -> impl Iterator<Item = &StoredFormTemplate> {
        self.order.iter().filter_map(|id| self.forms.get(id))
    }
}

/// Thread-safe in-memory form template store.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    inner: Arc<RwLock<Inner>>,
}

impl InMemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-filled with already persisted records.
    pub fn with_records(records: impl IntoIterator<Item = StoredFormTemplate>) -> Self {
        let mut inner = Inner::default();
        for record in records {
            inner.order.push(record.id.clone());
            inner.forms.insert(record.id.clone(), record);
        }
        Self {
            inner: Arc::new(RwLock::new(inner)),
        }
    }

    /// Get the number of form templates.
    pub fn len(&self) -> usize {
        self.inner.read().map(|inner| inner.forms.len()).unwrap_or(0)
    }

    /// Check if store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl FormTemplateStore for InMemoryStore {
    fn list(&self) -> EvalFormsResult<Vec<StoredFormTemplate>> {
        let inner = self
            .inner
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?;

        Ok(inner.iter().cloned().collect())
    }

    fn get(&self, id: &FormId) -> EvalFormsResult<StoredFormTemplate> {
        let inner = self
            .inner
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?;

        inner
            .forms
            .get(id)
            .cloned()
            .ok_or_else(|| ApplicationError::FormNotFound { id: id.clone() }.into())
    }

    fn create(&self, form: FormTemplate) -> EvalFormsResult<StoredFormTemplate> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;

        ensure_unique_name(inner.iter(), form.form_name(), None)?;

        let record = into_record(FormId::generate(), form, None);
        debug!(id = %record.id, "Stored new form template");
        inner.order.push(record.id.clone());
        inner.forms.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, id: &FormId, form: FormTemplate) -> EvalFormsResult<StoredFormTemplate> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;

        let created_at = inner
            .forms
            .get(id)
            .ok_or_else(|| ApplicationError::FormNotFound { id: id.clone() })?
            .created_at;
        ensure_unique_name(inner.iter(), form.form_name(), Some(id))?;

        let record = into_record(id.clone(), form, created_at);
        inner.forms.insert(id.clone(), record.clone());
        Ok(record)
    }

    fn delete(&self, id: &FormId) -> EvalFormsResult<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;

        inner
            .forms
            .remove(id)
            .ok_or_else(|| ApplicationError::FormNotFound { id: id.clone() })?;
        inner.order.retain(|known| known != id);
        Ok(())
    }

    fn delete_field(&self, id: &FieldId) -> EvalFormsResult<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;

        if inner.forms.values_mut().any(|form| remove_field(form, id)) {
            Ok(())
        } else {
            Err(ApplicationError::FieldNotFound { id: id.clone() }.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use evalforms_core::domain::{
        FieldTemplateDraft, FieldType, FormTemplateDraft, FormTemplateValidator, ScoreKind,
    };
    use evalforms_core::error::EvalFormsError;

    fn payload(name: &str) -> FormTemplate {
        let draft = FormTemplateDraft::new(name)
            .with_score(ScoreKind::Score)
            .with_field(FieldTemplateDraft::named("Q1", FieldType::Text))
            .with_field(FieldTemplateDraft::named("Q2", FieldType::Select).with_option_added("a"));
        FormTemplateValidator::validate_for_create(&draft).unwrap()
    }

    #[test]
    fn create_assigns_form_and_field_ids() {
        let store = InMemoryStore::new();
        let stored = store.create(payload("A")).unwrap();

        assert_eq!(stored.id.as_str().len(), 24);
        assert!(stored.created_at.is_some());
        assert!(stored.body.field_templates.iter().all(|f| f.id.is_some()));
        assert_eq!(store.get(&stored.id).unwrap(), stored);
    }

    #[test]
    fn copied_field_id_does_not_reach_a_sibling() {
        let store = InMemoryStore::new();
        let stored = store.create(payload("A")).unwrap();
        let first = stored.body.field_templates[0].id.clone();

        let mut draft = stored.body.clone();
        draft.field_templates[1].id = first.clone();
        let updated = store
            .update(&stored.id, FormTemplateValidator::validate_for_update(&draft).unwrap())
            .unwrap();
        assert_ne!(updated.body.field_templates[1].id, first);

        store.delete_field(&first.unwrap()).unwrap();
        let left = store.get(&stored.id).unwrap().body.field_templates;
        assert_eq!(left.len(), 1);
        assert_eq!(left[0].name, "Q2");
    }

    #[test]
    fn empty_field_id_is_replaced_on_update() {
        let store = InMemoryStore::new();
        let stored = store.create(payload("A")).unwrap();

        let draft: FormTemplateDraft = serde_json::from_value(serde_json::json!({
            "formName": "A",
            "score": "SCORE",
            "fieldTemplates": [{ "_id": "", "name": "Q1", "type": "text" }]
        }))
        .unwrap();
        let updated = store
            .update(&stored.id, FormTemplateValidator::validate_for_update(&draft).unwrap())
            .unwrap();

        let id = updated.body.field_templates[0].id.clone().unwrap();
        assert!(id.is_well_formed());
    }

    #[test]
    fn list_keeps_insertion_order() {
        let store = InMemoryStore::new();
        for name in ["C", "A", "B"] {
            store.create(payload(name)).unwrap();
        }
        let names: Vec<String> = store
            .list()
            .unwrap()
            .iter()
            .map(|f| f.form_name().to_string())
            .collect();
        assert_eq!(names, vec!["C", "A", "B"]);
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let store = InMemoryStore::new();
        store.create(payload("Eval")).unwrap();

        let err = store.create(payload("Eval")).unwrap_err();
        assert_eq!(err.code(), Some("DUPLICATE_FORM_NAME"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn update_may_keep_its_own_name_but_not_take_another() {
        let store = InMemoryStore::new();
        let a = store.create(payload("A")).unwrap();
        store.create(payload("B")).unwrap();

        let same = store.update(&a.id, payload("A")).unwrap();
        assert_eq!(same.created_at, a.created_at);

        let err = store.update(&a.id, payload("B")).unwrap_err();
        assert!(matches!(
            err,
            EvalFormsError::Application(ApplicationError::DuplicateFormName { .. })
        ));
    }

    #[test]
    fn update_keeps_existing_field_ids() {
        let store = InMemoryStore::new();
        let stored = store.create(payload("A")).unwrap();
        let first_id = stored.body.field_templates[0].id.clone();

        let edited = stored
            .body
            .clone()
            .with_field(FieldTemplateDraft::named("Q3", FieldType::Date));
        let form = FormTemplateValidator::validate_for_update(&edited).unwrap();
        let updated = store.update(&stored.id, form).unwrap();

        assert_eq!(updated.body.field_templates.len(), 3);
        assert_eq!(updated.body.field_templates[0].id, first_id);
        assert!(updated.body.field_templates[2].id.is_some());
    }

    #[test]
    fn delete_field_leaves_siblings() {
        let store = InMemoryStore::new();
        let stored = store.create(payload("A")).unwrap();
        let target = stored.body.field_templates[0].id.clone().unwrap();

        store.delete_field(&target).unwrap();
        let after = store.get(&stored.id).unwrap();
        assert_eq!(after.body.field_templates.len(), 1);
        assert_eq!(after.body.field_templates[0].name, "Q2");

        assert!(store.delete_field(&target).is_err());
    }

    #[test]
    fn unknown_ids_are_not_found() {
        let store = InMemoryStore::new();
        let id = FormId::generate();
        assert!(matches!(
            store.get(&id),
            Err(EvalFormsError::Application(ApplicationError::FormNotFound { .. }))
        ));
        assert!(store.delete(&id).is_err());
        assert!(store.update(&id, payload("X")).is_err());
    }
}
